//! Audio ingest and preparation pipeline.
//!
//! Turns a recorded or uploaded clip into the canonical working WAV the
//! classifier consumes: decode, optional gain boost, mono WAV export.

mod chunker;
mod decode;
mod gain;
mod ingest;
mod resample;

pub use chunker::{AudioChunk, chunk_audio};
pub use decode::{DecodedAudio, decode_audio_file};
pub use gain::{apply_gain, db_to_amplitude};
pub use ingest::{AudioArtifact, ingest};
pub use resample::resample;
