//! Analysis pipeline: ingest artifact to localized detections.

mod processor;

pub use processor::{
    AnalysisOptions, AnalysisOutcome, ReportContext, analyze_file, output_path_for, write_results,
};
