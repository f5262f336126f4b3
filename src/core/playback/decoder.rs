//! core/playback/decoder.rs
//! Audio decoding (Symphonia) -> rodio::Source.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::Source;
use symphonia::core::audio::{AudioBufferRef, SampleBuffer, Signal, SignalSpec};
use symphonia::core::codecs::{CodecParameters, Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, SeekMode, SeekTo};
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::{Time, TimeBase};
use tracing::{debug, trace};

use crate::core::error::{Error, Result};

/// Open `path` as a rodio Source positioned at `start_ms`.
/// Also returns the total length when the container reports it.
pub fn open_source_at_ms(path: &Path, start_ms: u64) -> Result<(SymphoniaSource, Option<u64>)> {
    let (mut format, track_id, codec_params) = probe(path)?;
    let duration_ms = duration_from_params(codec_params.time_base, codec_params.n_frames);

    if start_ms > 0 {
        let seek_to = SeekTo::Time {
            time: Time::from(Duration::from_millis(start_ms)),
            track_id: Some(track_id),
        };
        format
            .seek(SeekMode::Accurate, seek_to)
            .map_err(|e| playback_err(path, "seek", e))?;
    }

    // Fresh decoder after any seek; no stale state to reset.
    let decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| playback_err(path, "decoder init", e))?;

    debug!(path = %path.display(), start_ms, ?duration_ms, "source opened");
    Ok((SymphoniaSource::new(path.to_path_buf(), format, decoder, track_id), duration_ms))
}

fn probe(path: &Path) -> Result<(Box<dyn FormatReader>, u32, CodecParameters)> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| playback_err(path, "format probe", e))?;

    let format = probed.format;
    let track = format
        .default_track()
        .ok_or_else(|| Error::Playback(format!("{}: no audio track", path.display())))?;

    // Clone codec params so the caller can seek (mutable borrow of format).
    let track_id = track.id;
    let params = track.codec_params.clone();
    Ok((format, track_id, params))
}

fn playback_err(path: &Path, stage: &str, e: SymphoniaError) -> Error {
    Error::Playback(format!("{}: {stage} failed: {e}", path.display()))
}

fn duration_from_params(time_base: Option<TimeBase>, n_frames: Option<u64>) -> Option<u64> {
    let t = time_base?.calc_time(n_frames?);
    // Time is { seconds: u64, frac: f64 } in symphonia 0.5.x.
    let ms = (t.seconds as f64 * 1000.0) + (t.frac * 1000.0);
    Some(ms.round() as u64)
}

/// A streaming rodio Source backed by Symphonia.
pub struct SymphoniaSource {
    path: PathBuf,
    format: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,

    sample_rate: u32,
    channels: u16,

    // Interleaved f32 samples ready to be yielded
    out: Vec<f32>,
    out_pos: usize,

    ended: bool,
}

impl SymphoniaSource {
    fn new(
        path: PathBuf,
        format: Box<dyn FormatReader>,
        decoder: Box<dyn Decoder>,
        track_id: u32,
    ) -> Self {
        let mut this = Self {
            path,
            format,
            decoder,
            track_id,
            sample_rate: 44100,
            channels: 2,
            out: Vec::new(),
            out_pos: 0,
            ended: false,
        };

        // Prime once so sample_rate/channels are right before rodio asks.
        if let Err(e) = this.fill_out_buffer() {
            debug!(path = %this.path.display(), error = %e, "first packet failed");
            this.ended = true;
        }

        this
    }

    fn fill_out_buffer(&mut self) -> std::result::Result<(), SymphoniaError> {
        if self.ended {
            return Ok(());
        }

        self.out.clear();
        self.out_pos = 0;

        loop {
            let packet = match self.format.next_packet() {
                Ok(p) => p,
                Err(SymphoniaError::IoError(_)) => {
                    self.ended = true;
                    return Ok(());
                }
                Err(SymphoniaError::ResetRequired) => {
                    self.decoder.reset();
                    continue;
                }
                Err(e) => return Err(e),
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = match self.decoder.decode(&packet) {
                Ok(d) => d,
                Err(SymphoniaError::IoError(_)) => {
                    self.ended = true;
                    return Ok(());
                }
                Err(SymphoniaError::DecodeError(msg)) => {
                    trace!(path = %self.path.display(), msg, "corrupt packet skipped");
                    continue;
                }
                Err(SymphoniaError::ResetRequired) => {
                    self.decoder.reset();
                    continue;
                }
                Err(e) => return Err(e),
            };

            match decoded {
                AudioBufferRef::F32(buf) => {
                    self.sample_rate = buf.spec().rate;
                    self.channels = buf.spec().channels.count() as u16;

                    let frames = buf.frames();
                    let chans = buf.spec().channels.count();

                    self.out.reserve(frames * chans);
                    for f in 0..frames {
                        for c in 0..chans {
                            self.out.push(buf.chan(c)[f]);
                        }
                    }
                    return Ok(());
                }
                other => {
                    let spec = SignalSpec::new(other.spec().rate, other.spec().channels);
                    self.sample_rate = spec.rate;
                    self.channels = spec.channels.count() as u16;

                    let mut sbuf = SampleBuffer::<f32>::new(other.frames() as u64, spec);
                    sbuf.copy_interleaved_ref(other);

                    self.out.extend_from_slice(sbuf.samples());
                    return Ok(());
                }
            }
        }
    }
}

impl Iterator for SymphoniaSource {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        while self.out_pos >= self.out.len() {
            if self.ended {
                return None;
            }
            if let Err(e) = self.fill_out_buffer() {
                debug!(path = %self.path.display(), error = %e, "decode stopped");
                self.ended = true;
                return None;
            }
        }

        let s = self.out.get(self.out_pos).copied();
        self.out_pos += 1;
        s
    }
}

impl Source for SymphoniaSource {
    // rodio 0.21 uses current_span_len (not current_frame_len).
    fn current_span_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}
