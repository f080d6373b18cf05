//! Audio decoding using symphonia.

use crate::error::{Error, Result};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::warn;

/// Decoded audio data.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Audio samples as mono f32 in range [-1.0, 1.0].
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Duration in seconds.
    pub duration_secs: f32,
}

/// Decode an audio file to mono f32 samples.
///
/// Supports WAV, FLAC, MP3, and AAC containers. Individual corrupt
/// packets are skipped with a warning; a file that yields no usable
/// packets at all is an error.
pub fn decode_audio_file(path: &Path) -> Result<DecodedAudio> {
    let file = File::open(path).map_err(|e| Error::AudioOpen {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

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
        .map_err(|e| Error::AudioOpen {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::NoAudioTracks {
            path: path.to_path_buf(),
        })?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| Error::AudioDecode {
            path: path.to_path_buf(),
            source: "missing sample rate".into(),
        })?;
    let channels = track
        .codec_params
        .channels
        .map_or(1, symphonia::core::audio::Channels::count);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| Error::AudioDecode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut samples = Vec::new();
    let mut skipped_packets = 0usize;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(Error::AudioDecode {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                });
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => mix_to_mono(&decoded, channels, &mut samples),
            Err(symphonia::core::errors::Error::DecodeError(_)) => {
                // Recoverable corruption, keep going with the rest of the file
                skipped_packets += 1;
            }
            Err(e) => {
                return Err(Error::AudioDecode {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                });
            }
        }
    }

    if skipped_packets > 0 {
        warn!(
            "Skipped {} corrupt packet(s) in {}",
            skipped_packets,
            path.display()
        );
    }

    #[allow(clippy::cast_precision_loss)]
    let duration_secs = samples.len() as f32 / sample_rate as f32;

    Ok(DecodedAudio {
        samples,
        sample_rate,
        duration_secs,
    })
}

/// Mix a decoded buffer down to mono and append to `output`.
fn mix_to_mono(buffer: &AudioBufferRef, channels: usize, output: &mut Vec<f32>) {
    match buffer {
        AudioBufferRef::F32(buf) => {
            append_frames(output, channels, buf.frames(), |ch, i| buf.chan(ch)[i]);
        }
        AudioBufferRef::S16(buf) => {
            append_frames(output, channels, buf.frames(), |ch, i| {
                f32::from(buf.chan(ch)[i]) / 32_768.0
            });
        }
        AudioBufferRef::S32(buf) => {
            append_frames(output, channels, buf.frames(), |ch, i| {
                #[allow(clippy::cast_precision_loss)]
                {
                    buf.chan(ch)[i] as f32 / 2_147_483_648.0
                }
            });
        }
        _ => {
            // Other sample layouts are not produced by the supported codecs
        }
    }
}

/// Average samples across channels frame by frame.
fn append_frames(
    output: &mut Vec<f32>,
    channels: usize,
    frames: usize,
    sample_at: impl Fn(usize, usize) -> f32,
) {
    if channels == 1 {
        output.extend((0..frames).map(|i| sample_at(0, i)));
        return;
    }

    #[allow(clippy::cast_precision_loss)]
    let norm = channels as f32;
    for i in 0..frames {
        let sum: f32 = (0..channels).map(|ch| sample_at(ch, i)).sum();
        output.push(sum / norm);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_missing_file_errors() {
        let result = decode_audio_file(Path::new("/nonexistent/audio.wav"));
        assert!(matches!(result, Err(Error::AudioOpen { .. })));
    }

    #[test]
    fn test_decode_non_audio_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("text.wav");
        std::fs::write(&path, b"hello, not a waveform").unwrap();

        assert!(decode_audio_file(&path).is_err());
    }

    #[test]
    fn test_append_frames_averages_channels() {
        let left = [1.0f32, 0.0];
        let right = [0.0f32, 1.0];
        let mut output = Vec::new();
        append_frames(&mut output, 2, 2, |ch, i| if ch == 0 { left[i] } else { right[i] });
        assert_eq!(output, vec![0.5, 0.5]);
    }
}
