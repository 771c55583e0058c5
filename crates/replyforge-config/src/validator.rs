//! Sanity checks for `replyforge.toml`.
//!
//! Errors are settings replyforge cannot run with (no endpoint, a zero
//! quota). Warnings are values the completion API or the page will likely
//! reject or make awkward, and are only logged.

use std::fmt;

use crate::schema::Settings;

/// Findings for one [`Settings`] value, keyed by dotted TOML path
/// (`limits.window_secs`).
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A setting that stops startup.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A setting that is accepted but probably not what the user meant.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Checks the provider, quota and observer sections. Notification timings
/// and paths are taken as given.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> ValidationResult {
        let mut result = ValidationResult::default();
        Self::validate_provider(settings, &mut result);
        Self::validate_limits(settings, &mut result);
        Self::validate_observer(settings, &mut result);
        result
    }

    fn validate_provider(settings: &Settings, result: &mut ValidationResult) {
        let provider = &settings.provider;

        match url::Url::parse(&provider.endpoint) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(_) => result.add_error(ValidationError::new(
                "provider.endpoint",
                "endpoint must use http:// or https://",
            )),
            Err(e) => result.add_error(ValidationError::new(
                "provider.endpoint",
                format!("invalid URL: {}", e),
            )),
        }

        if provider.model.is_empty() {
            result.add_error(ValidationError::new("provider.model", "model cannot be empty"));
        }

        if !(0.0..=2.0).contains(&provider.temperature) {
            result.add_warning(ValidationWarning::new(
                "provider.temperature",
                "temperature outside 0.0-2.0 is usually rejected by the API",
            ));
        }

        if provider.max_tokens == 0 {
            result.add_error(ValidationError::new(
                "provider.max_tokens",
                "max_tokens must be greater than 0",
            ));
        }
    }

    fn validate_limits(settings: &Settings, result: &mut ValidationResult) {
        if settings.limits.max_replies_per_hour == 0 {
            result.add_error(ValidationError::new(
                "limits.max_replies_per_hour",
                "max_replies_per_hour must be greater than 0",
            ));
        }

        if settings.limits.window_secs == 0 {
            result.add_error(ValidationError::new(
                "limits.window_secs",
                "window_secs must be greater than 0",
            ));
        }
    }

    fn validate_observer(settings: &Settings, result: &mut ValidationResult) {
        if settings.observer.max_ancestor_depth == 0 {
            result.add_warning(ValidationWarning::new(
                "observer.max_ancestor_depth",
                "depth 0 skips the ancestor walk; every run falls back to the first post",
            ));
        }

        if settings.observer.surface_delay_ms > 5000 {
            result.add_warning(ValidationWarning::new(
                "observer.surface_delay_ms",
                "delays above 5s make the trigger feel unresponsive",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
