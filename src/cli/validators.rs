//! CLI argument validators.
//!
//! Shared validation functions for CLI argument parsing.

/// Parse and validate a duration in seconds (finite, non-negative).
pub fn parse_duration_secs(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !value.is_finite() || value < 0.0 {
        return Err(format!(
            "duration must be a non-negative number of seconds, got {value}"
        ));
    }

    Ok(value)
}
