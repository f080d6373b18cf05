//! Audio resampling using rubato.

use crate::error::{Error, Result};
use audioadapter_buffers::direct::SequentialSlice;
use rubato::{Fft, FixedSync, Resampler};

/// Frames fed to the resampler per iteration.
const CHUNK_FRAMES: usize = 1024;

/// Resample mono audio to the target sample rate.
///
/// Returns the input unchanged if already at the target rate.
pub fn resample(samples: Vec<f32>, from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate {
        return Ok(samples);
    }

    let mut resampler = Fft::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        CHUNK_FRAMES,
        1, // sub-chunks
        1, // mono
        FixedSync::Both,
    )
    .map_err(|e| Error::Resample {
        reason: e.to_string(),
    })?;

    let frames_per_chunk = resampler.input_frames_next();
    let ratio = f64::from(to_rate) / f64::from(from_rate);
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut output = Vec::with_capacity((samples.len() as f64 * ratio).ceil() as usize + CHUNK_FRAMES);

    let mut pos = 0;
    while pos < samples.len() {
        let available = samples.len() - pos;
        let take = available.min(frames_per_chunk);
        let chunk = &samples[pos..pos + take];

        let resampled = if take == frames_per_chunk {
            process_chunk(&mut resampler, chunk, frames_per_chunk)?
        } else {
            // Trailing partial chunk, pad with silence and trim the output
            // back to the proportional frame count.
            let mut padded = chunk.to_vec();
            padded.resize(frames_per_chunk, 0.0);
            let mut full = process_chunk(&mut resampler, &padded, frames_per_chunk)?;
            #[allow(
                clippy::cast_precision_loss,
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss
            )]
            let keep = ((take as f64) * ratio).ceil() as usize;
            full.truncate(keep.min(full.len()));
            full
        };

        output.extend_from_slice(&resampled);
        pos += take;
    }

    Ok(output)
}

/// Run one fixed-size chunk through the resampler.
fn process_chunk(
    resampler: &mut Fft<f32>,
    chunk: &[f32],
    frames: usize,
) -> Result<Vec<f32>> {
    let input = SequentialSlice::new(chunk, 1, frames).map_err(|e| Error::Resample {
        reason: format!("failed to wrap input chunk: {e}"),
    })?;

    let resampled = resampler
        .process(&input, 0, None)
        .map_err(|e| Error::Resample {
            reason: e.to_string(),
        })?;

    Ok(resampled.take_data())
}
