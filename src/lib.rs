//! osulux: a local player for osu! song folders.
//!
//! Everything except the window lives in [`core`]; the binary in `main.rs`
//! is a thin iced front end over [`core::Library`].

pub mod core;
