//! Configuration validation.

use crate::config::Config;
use crate::constants::MAX_SAMPLE_RATE;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    let defaults = &config.defaults;

    if !defaults.min_duration.is_finite() || defaults.min_duration < 0.0 {
        return Err(Error::ConfigValidation {
            message: format!(
                "min_duration must be a non-negative number, got {}",
                defaults.min_duration
            ),
        });
    }

    if defaults.fps == 0 {
        return Err(Error::ConfigValidation {
            message: "fps must be at least 1".to_string(),
        });
    }

    if let Some(rate) = config.media.audio_sample_rate
        && !(1..=MAX_SAMPLE_RATE).contains(&rate)
    {
        return Err(Error::ConfigValidation {
            message: format!("audio_sample_rate must be between 1 and {MAX_SAMPLE_RATE}, got {rate}"),
        });
    }

    if config.dataset.input_root == config.dataset.output_root {
        return Err(Error::ConfigValidation {
            message: format!(
                "output_root must differ from input_root ({})",
                config.dataset.input_root.display()
            ),
        });
    }

    Ok(())
}
