//! Segmenting audio into model-sized windows.

/// A segment of audio with its time offset.
#[derive(Debug, Clone)]
pub struct AudioChunk {
    /// Audio samples for this segment, zero-padded to the full window.
    pub samples: Vec<f32>,
    /// Start time in seconds.
    pub start_time: f32,
    /// End time in seconds.
    pub end_time: f32,
}

/// Split samples into fixed-duration windows with optional overlap.
///
/// The final window is zero-padded to the full length. Returns an empty
/// vector when the overlap leaves no forward step.
pub fn chunk_audio(
    samples: &[f32],
    sample_rate: u32,
    segment_duration: f32,
    overlap: f32,
) -> Vec<AudioChunk> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let window = (segment_duration * sample_rate as f32) as usize;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let overlap_samples = (overlap * sample_rate as f32) as usize;

    let step = window.saturating_sub(overlap_samples);
    if step == 0 || samples.is_empty() {
        return Vec::new();
    }

    (0..samples.len())
        .step_by(step)
        .map(|pos| {
            let end = (pos + window).min(samples.len());
            let mut segment = samples[pos..end].to_vec();
            segment.resize(window, 0.0);

            #[allow(clippy::cast_precision_loss)]
            let start_time = pos as f32 / sample_rate as f32;

            AudioChunk {
                samples: segment,
                start_time,
                end_time: start_time + segment_duration,
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_no_overlap() {
        let samples = vec![0.0; 96_000]; // 2s at 48 kHz
        let chunks = chunk_audio(&samples, 48_000, 1.0, 0.0);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].start_time, 0.0);
        assert_eq!(chunks[0].end_time, 1.0);
        assert_eq!(chunks[1].start_time, 1.0);
    }

    #[test]
    fn test_chunk_with_overlap() {
        let samples = vec![0.0; 144_000]; // 3s at 48 kHz
        let chunks = chunk_audio(&samples, 48_000, 1.0, 0.5);
        // 0.5s forward step: 0.0, 0.5, ..., 2.5
        assert_eq!(chunks.len(), 6);
        assert_eq!(chunks[1].start_time, 0.5);
    }

    #[test]
    fn test_chunk_pads_final_window() {
        let samples = vec![0.5; 60_000]; // 1.25s at 48 kHz
        let chunks = chunk_audio(&samples, 48_000, 1.0, 0.0);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].samples.len(), 48_000);
        // Padding is silence
        assert_eq!(chunks[1].samples[20_000], 0.0);
    }

    #[test]
    fn test_chunk_empty_input() {
        let chunks = chunk_audio(&[], 48_000, 1.0, 0.0);
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_chunk_overlap_equals_duration() {
        let samples = vec![0.0; 96_000];
        // Step would be zero, refuse rather than loop forever
        let chunks = chunk_audio(&samples, 48_000, 1.0, 1.0);
        assert!(chunks.is_empty());
    }
}
