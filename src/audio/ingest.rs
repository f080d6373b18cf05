//! Audio ingest: normalize any supported clip into the working WAV.

use crate::audio::{apply_gain, decode_audio_file};
use crate::error::{Error, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A file-backed audio artifact produced by ingest.
///
/// Ownership of the audio is handed off through the filesystem; the
/// classifier reads the path, not an in-memory buffer.
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    /// Path of the written working WAV.
    pub path: PathBuf,
    /// Duration in seconds, for user feedback.
    pub duration_secs: f32,
    /// Sample rate of the written file in Hz.
    pub sample_rate: u32,
}

/// Ingest an audio clip: decode, apply gain, write the working WAV.
///
/// Accepts any container symphonia can decode (WAV/FLAC/MP3/AAC). The
/// output is always 16-bit mono WAV at the decoded sample rate, written
/// to `working_path` (overwritten if present).
pub fn ingest(input: &Path, gain_db: f32, working_path: &Path) -> Result<AudioArtifact> {
    if !input.exists() {
        return Err(Error::InputFileNotFound {
            path: input.to_path_buf(),
        });
    }

    let mut decoded = decode_audio_file(input)?;
    if decoded.samples.is_empty() {
        return Err(Error::EmptyAudio {
            path: input.to_path_buf(),
        });
    }

    if gain_db > 0.0 {
        debug!("Applying {:.1} dB gain boost", gain_db);
    }
    apply_gain(&mut decoded.samples, gain_db)?;

    write_wav(working_path, &decoded.samples, decoded.sample_rate)?;

    info!(
        "Ingested {} ({:.1}s at {} Hz) -> {}",
        input.display(),
        decoded.duration_secs,
        decoded.sample_rate,
        working_path.display()
    );

    Ok(AudioArtifact {
        path: working_path.to_path_buf(),
        duration_secs: decoded.duration_secs,
        sample_rate: decoded.sample_rate,
    })
}

/// Write mono f32 samples as a 16-bit PCM WAV file.
fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).map_err(|e| Error::WavWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    for &sample in samples {
        #[allow(clippy::cast_possible_truncation)]
        let value = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        writer.write_sample(value).map_err(|e| Error::WavWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    writer.finalize().map_err(|e| Error::WavWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Write a small sine WAV fixture and return its path.
    fn write_fixture(dir: &Path, name: &str, amplitude: f32) -> PathBuf {
        let path = dir.join(name);
        let spec = WavSpec {
            channels: 1,
            sample_rate: 16_000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for i in 0..16_000 {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f32 / 16_000.0;
            let sample = amplitude * (t * 440.0 * std::f32::consts::TAU).sin();
            #[allow(clippy::cast_possible_truncation)]
            writer
                .write_sample((sample * f32::from(i16::MAX)) as i16)
                .unwrap();
        }
        writer.finalize().unwrap();
        path
    }

    #[test]
    fn test_ingest_missing_input_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = ingest(
            Path::new("/nonexistent/clip.wav"),
            0.0,
            &dir.path().join("out.wav"),
        );
        assert!(matches!(result, Err(Error::InputFileNotFound { .. })));
    }

    #[test]
    fn test_ingest_reports_duration() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_fixture(dir.path(), "in.wav", 0.5);
        let out = dir.path().join("working.wav");

        let artifact = ingest(&input, 0.0, &out).unwrap();
        assert!((artifact.duration_secs - 1.0).abs() < 0.01);
        assert_eq!(artifact.sample_rate, 16_000);
        assert!(out.exists());
    }

    #[test]
    fn test_ingest_gain_scales_peak() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_fixture(dir.path(), "in.wav", 0.1);

        let quiet = dir.path().join("quiet.wav");
        ingest(&input, 0.0, &quiet).unwrap();
        let boosted = dir.path().join("boosted.wav");
        ingest(&input, 6.0, &boosted).unwrap();

        let peak = |p: &Path| -> f32 {
            let decoded = decode_audio_file(p).unwrap();
            decoded.samples.iter().fold(0.0f32, |m, s| m.max(s.abs()))
        };

        let ratio = peak(&boosted) / peak(&quiet);
        // +6 dB is a factor of 10^(6/20) = 1.995
        assert!((ratio - 1.995).abs() < 0.05, "ratio was {ratio}");
    }

    #[test]
    fn test_ingest_rejects_out_of_range_gain() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_fixture(dir.path(), "in.wav", 0.5);
        let result = ingest(&input, 35.0, &dir.path().join("out.wav"));
        assert!(matches!(result, Err(Error::InvalidGain { .. })));
    }

    #[test]
    fn test_ingest_garbage_input_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noise.wav");
        std::fs::write(&path, b"definitely not audio").unwrap();

        let result = ingest(&path, 0.0, &dir.path().join("out.wav"));
        assert!(result.is_err());
    }
}
