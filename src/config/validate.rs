//! Configuration validation.

use crate::config::{Config, ModelConfig};
use crate::constants::{confidence, gain};
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_defaults(config)?;
    validate_services(config)?;
    Ok(())
}

/// Validate default settings.
fn validate_defaults(config: &Config) -> Result<()> {
    let defaults = &config.defaults;

    if !(confidence::MIN..=confidence::MAX).contains(&defaults.min_confidence) {
        return Err(Error::ConfigValidation {
            message: format!(
                "min_confidence must be between {} and {}, got {}",
                confidence::MIN,
                confidence::MAX,
                defaults.min_confidence
            ),
        });
    }

    if defaults.overlap < 0.0 {
        return Err(Error::ConfigValidation {
            message: format!("overlap must be non-negative, got {}", defaults.overlap),
        });
    }

    if defaults.batch_size == 0 {
        return Err(Error::ConfigValidation {
            message: "batch_size must be at least 1".to_string(),
        });
    }

    if !(gain::MIN_DB..=gain::MAX_DB).contains(&defaults.gain_db) {
        return Err(Error::InvalidGain {
            value: defaults.gain_db,
            min: gain::MIN_DB,
            max: gain::MAX_DB,
        });
    }

    if let Some(lat) = defaults.lat
        && !(-90.0..=90.0).contains(&lat)
    {
        return Err(Error::InvalidLatitude { value: lat });
    }

    if let Some(lon) = defaults.lon
        && !(-180.0..=180.0).contains(&lon)
    {
        return Err(Error::InvalidLongitude { value: lon });
    }

    // Validate default model exists if specified
    if let Some(ref model_name) = defaults.model
        && !config.models.contains_key(model_name)
    {
        return Err(Error::ModelNotFound {
            name: model_name.clone(),
        });
    }

    Ok(())
}

/// Validate external-service settings.
fn validate_services(config: &Config) -> Result<()> {
    if config.translation.timeout_secs == 0 {
        return Err(Error::ConfigValidation {
            message: "translation.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.enrichment.timeout_secs == 0 {
        return Err(Error::ConfigValidation {
            message: "enrichment.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.translation.endpoint.is_empty() {
        return Err(Error::ConfigValidation {
            message: "translation.endpoint must not be empty".to_string(),
        });
    }

    Ok(())
}

/// Validate a model configuration and check files exist.
pub fn validate_model_config(_name: &str, model: &ModelConfig) -> Result<()> {
    if !model.path.exists() {
        return Err(Error::ModelFileNotFound {
            path: model.path.clone(),
        });
    }

    if !model.labels.exists() {
        return Err(Error::LabelsFileNotFound {
            path: model.labels.clone(),
        });
    }

    if let Some(meta_path) = &model.meta_model
        && !meta_path.exists()
    {
        return Err(Error::ModelFileNotFound {
            path: meta_path.clone(),
        });
    }

    Ok(())
}

/// Get a model by name from the config.
pub fn get_model<'a>(config: &'a Config, name: &str) -> Result<&'a ModelConfig> {
    config.models.get(name).ok_or_else(|| Error::ModelNotFound {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_invalid_confidence() {
        let mut config = Config::default();
        config.defaults.min_confidence = 1.5;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_negative_overlap() {
        let mut config = Config::default();
        config.defaults.overlap = -1.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_batch_size() {
        let mut config = Config::default();
        config.defaults.batch_size = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_gain_out_of_range() {
        let mut config = Config::default();
        config.defaults.gain_db = 40.0;
        let result = validate_config(&config);
        assert!(matches!(result, Err(Error::InvalidGain { .. })));
    }

    #[test]
    fn test_validate_missing_default_model() {
        let mut config = Config::default();
        config.defaults.model = Some("nonexistent".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_invalid_latitude() {
        let mut config = Config::default();
        config.defaults.lat = Some(100.0);
        let result = validate_config(&config);
        assert!(matches!(result, Err(Error::InvalidLatitude { .. })));
    }

    #[test]
    fn test_validate_invalid_longitude() {
        let mut config = Config::default();
        config.defaults.lon = Some(200.0);
        let result = validate_config(&config);
        assert!(matches!(result, Err(Error::InvalidLongitude { .. })));
    }

    #[test]
    fn test_validate_zero_translation_timeout() {
        let mut config = Config::default();
        config.translation.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_get_model_missing() {
        let config = Config::default();
        let result = get_model(&config, "absent");
        assert!(matches!(result, Err(Error::ModelNotFound { .. })));
    }
}
