//! Output type definitions.

use std::path::PathBuf;

/// A single bird detection.
#[derive(Debug, Clone)]
pub struct Detection {
    /// Path to the source audio file.
    pub file_path: PathBuf,
    /// Detection start time in seconds.
    pub start_time: f32,
    /// Detection end time in seconds.
    pub end_time: f32,
    /// Scientific name of the species.
    pub scientific_name: String,
    /// Common name shown to the user; localized once translation ran.
    pub common_name: String,
    /// English common name as emitted by the model, never overwritten.
    pub original_name: String,
    /// Detection confidence (0.0 - 1.0).
    pub confidence: f32,
}

impl Detection {
    /// Parse a species label in `BirdNET` format.
    ///
    /// `BirdNET` labels are formatted as `ScientificName_CommonName`.
    pub fn from_label(
        label: &str,
        confidence: f32,
        start_time: f32,
        end_time: f32,
        file_path: PathBuf,
    ) -> Self {
        let (scientific_name, common_name) = label.find('_').map_or_else(
            || (label.to_string(), label.to_string()),
            |idx| (label[..idx].to_string(), label[idx + 1..].to_string()),
        );

        Self {
            file_path,
            start_time,
            end_time,
            scientific_name,
            original_name: common_name.clone(),
            common_name,
            confidence,
        }
    }

    /// Replace the displayed common name with its localized form.
    ///
    /// The English original stays available in `original_name`.
    pub fn localize(&mut self, localized_name: String) {
        self.common_name = localized_name;
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_from_label() {
        let detection = Detection::from_label(
            "Passer domesticus_House Sparrow",
            0.95,
            0.0,
            3.0,
            PathBuf::from("test.wav"),
        );
        assert_eq!(detection.scientific_name, "Passer domesticus");
        assert_eq!(detection.common_name, "House Sparrow");
        assert_eq!(detection.original_name, "House Sparrow");
        assert_eq!(detection.confidence, 0.95);
    }

    #[test]
    fn test_detection_from_label_no_underscore() {
        let detection =
            Detection::from_label("Unknown Species", 0.5, 0.0, 3.0, PathBuf::from("test.wav"));
        assert_eq!(detection.scientific_name, "Unknown Species");
        assert_eq!(detection.common_name, "Unknown Species");
    }

    #[test]
    fn test_localize_keeps_original_name() {
        let mut detection = Detection::from_label(
            "Passer domesticus_House Sparrow",
            0.8,
            0.0,
            3.0,
            PathBuf::from("test.wav"),
        );
        detection.localize("家麻雀".to_string());
        assert_eq!(detection.common_name, "家麻雀");
        assert_eq!(detection.original_name, "House Sparrow");
    }
}
