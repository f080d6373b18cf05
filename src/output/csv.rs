//! CSV output format writer.

use crate::constants::confidence::DECIMAL_PLACES;
use crate::error::Result;
use crate::output::{Detection, OutputWriter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// CSV format output writer.
pub struct CsvWriter {
    writer: BufWriter<File>,
}

impl CsvWriter {
    /// Create a new CSV writer.
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_header(&mut self) -> Result<()> {
        writeln!(
            self.writer,
            "Start (s),End (s),Scientific name,Common name,Original name,Confidence,File"
        )?;
        Ok(())
    }

    fn write_detection(&mut self, detection: &Detection) -> Result<()> {
        writeln!(
            self.writer,
            "{:.1},{:.1},{},{},{},{:.decimal$},{}",
            detection.start_time,
            detection.end_time,
            escape_csv(&detection.scientific_name),
            escape_csv(&detection.common_name),
            escape_csv(&detection.original_name),
            detection.confidence,
            escape_csv(&detection.file_path.display().to_string()),
            decimal = DECIMAL_PLACES,
        )?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Escape a value for CSV output.
fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_writer_basic() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = CsvWriter::new(file.path()).unwrap();

        writer.write_header().unwrap();

        let mut detection = Detection::from_label(
            "Passer domesticus_House Sparrow",
            0.8542,
            0.0,
            3.0,
            PathBuf::from("/path/to/audio.wav"),
        );
        detection.localize("家麻雀".to_string());
        writer.write_detection(&detection).unwrap();
        writer.finalize().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert!(contents.contains("Start (s),End (s)"));
        assert!(contents.contains("家麻雀"));
        assert!(contents.contains("House Sparrow"));
        assert!(contents.contains("0.8542"));
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
    }
}
