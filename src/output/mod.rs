//! Detection presentation and result file writers.

mod csv;
mod json;
mod printer;
pub mod progress;
mod types;
mod writer;

pub use csv::CsvWriter;
pub use json::{JsonResultWriter, JsonSettings};
pub use printer::{no_detections_hint, print_detections};
pub use types::Detection;
pub use writer::OutputWriter;
