//! Inference module for bird species detection.

mod classifier;
mod range_filter;

pub use classifier::BirdClassifier;
pub use range_filter::{RangeFilter, RangeFilterConfig, build_range_filter_config};
