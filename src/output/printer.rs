//! Human-readable detection printing.

use crate::constants::WEB_SEARCH_URL_TEMPLATE;
use crate::enrich::Enricher;
use crate::output::Detection;

/// Print detections in the canonical CLI format.
///
/// With an enricher, each detection is followed by its representative
/// image (when one is found) and a web-search link. Enrichment runs here,
/// per displayed detection, so undisplayed results never trigger queries.
pub fn print_detections(detections: &[Detection], enricher: Option<&Enricher>) {
    for detection in detections {
        println!("{}", format_detection(detection));

        if let Some(enricher) = enricher {
            if let Some(url) = enricher.find_image(&detection.common_name) {
                println!("    Image: {url}");
            }
            println!(
                "    More: {}{}",
                WEB_SEARCH_URL_TEMPLATE, detection.common_name
            );
        }
    }
}

/// Format one detection as a single line.
fn format_detection(detection: &Detection) -> String {
    format!(
        "{} ({}) - Confidence: {:.2} - Time: {:.1}s to {:.1}s",
        detection.common_name,
        detection.scientific_name,
        detection.confidence,
        detection.start_time,
        detection.end_time
    )
}

/// Remediation hint shown when nothing was detected.
pub fn no_detections_hint(min_confidence: f32) -> String {
    format!(
        "No birds detected above {min_confidence:.2} confidence.\n\
         Suggestions:\n\
         1. Upload a cleaner recording (phone voice recorders work well)\n\
         2. Increase --gain if the recording is quiet\n\
         3. Lower --min-confidence"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_detection_line() {
        let mut detection = Detection::from_label(
            "Passer domesticus_House Sparrow",
            0.8,
            0.0,
            3.0,
            PathBuf::from("clip.wav"),
        );
        detection.localize("家麻雀".to_string());

        assert_eq!(
            format_detection(&detection),
            "家麻雀 (Passer domesticus) - Confidence: 0.80 - Time: 0.0s to 3.0s"
        );
    }

    #[test]
    fn test_no_detections_hint_mentions_threshold() {
        let hint = no_detections_hint(0.25);
        assert!(hint.contains("0.25"));
        assert!(hint.contains("--min-confidence"));
    }
}
