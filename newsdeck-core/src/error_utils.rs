use crate::error::*;
use std::time::Duration;
use tracing::{error, info, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn is_retryable(&self) -> bool;
    fn retry_after(&self) -> Option<Duration>;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::Store(e) => {
                error!("Preference store error details: {:?}", e);
            }
            CoreError::Source(e) => {
                error!("Source error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn is_retryable(&self) -> bool {
        match self {
            CoreError::Store(e) => e.is_retryable(),
            CoreError::Source(e) => e.is_retryable(),
            CoreError::Config(e) => e.is_retryable(),
            CoreError::Io(_) => true,
            _ => false,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            CoreError::Store(e) => e.retry_after(),
            _ if self.is_retryable() => Some(Duration::from_secs(1)),
            _ => None,
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::Store(e) => e.user_friendly_message(),
            CoreError::Source(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Io(_) => "A file could not be read or written. Please try again.".to_string(),
            CoreError::Serialization(_) => {
                "Data could not be read. The file may be malformed.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::Store(_) => "STORE".to_string(),
            CoreError::Source(_) => "SOURCE".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Io(_) => "IO".to_string(),
            CoreError::Serialization(_) => "SERIALIZATION".to_string(),
        }
    }
}

impl ErrorExt for StoreError {
    fn log_error(&self) -> &Self {
        error!("StoreError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("StoreError (warning): {}", self);
        self
    }

    fn is_retryable(&self) -> bool {
        matches!(
            self,
            StoreError::DatabaseLocked | StoreError::ConnectionFailed { .. }
        )
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            StoreError::DatabaseLocked => Some(Duration::from_millis(100)),
            _ if self.is_retryable() => Some(Duration::from_secs(1)),
            _ => None,
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            StoreError::ConnectionFailed { .. } => {
                "Preference storage could not be opened. Please try again.".to_string()
            }
            StoreError::DatabaseLocked => {
                "Preference storage is temporarily busy. Please try again.".to_string()
            }
            _ => "Preference storage error occurred. Please try again.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            StoreError::ConnectionFailed { .. } => "STORE_CONNECTION_FAILED".to_string(),
            StoreError::MigrationFailed { .. } => "STORE_MIGRATION_FAILED".to_string(),
            StoreError::DatabaseLocked => "STORE_LOCKED".to_string(),
            StoreError::Sql(_) => "STORE_SQL_ERROR".to_string(),
        }
    }
}

impl ErrorExt for SourceError {
    fn log_error(&self) -> &Self {
        error!("SourceError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("SourceError (warning): {}", self);
        self
    }

    fn is_retryable(&self) -> bool {
        false
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }

    fn user_friendly_message(&self) -> String {
        match self {
            SourceError::InvalidPayload { source_name, .. } => {
                format!("Could not read the response from {}.", source_name)
            }
            SourceError::InvalidTimestamp { .. } => {
                "An item carries an unreadable timestamp.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            SourceError::InvalidPayload { .. } => "SOURCE_INVALID_PAYLOAD".to_string(),
            SourceError::InvalidTimestamp { .. } => "SOURCE_INVALID_TIMESTAMP".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ConfigError (warning): {}", self);
        self
    }

    fn is_retryable(&self) -> bool {
        false // Config errors are typically not retryable
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { .. } => {
                "Configuration file not found. Please check the installation.".to_string()
            }
            ConfigError::InvalidFormat { .. } => {
                "Configuration file format is invalid. Please check the settings.".to_string()
            }
            ConfigError::MissingField { field } => {
                format!("Required configuration field '{}' is missing.", field)
            }
            ConfigError::InvalidValue { field, .. } => {
                format!("Invalid value for configuration field '{}'.", field)
            }
            ConfigError::ValidationFailed { reason } => {
                format!("Configuration is invalid: {}.", reason)
            }
            ConfigError::PermissionDenied { .. } => {
                "Permission denied accessing configuration. Please check file permissions."
                    .to_string()
            }
            ConfigError::Parse(_) => {
                "Configuration error occurred. Please check your settings.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND".to_string(),
            ConfigError::InvalidFormat { .. } => "CONFIG_INVALID_FORMAT".to_string(),
            ConfigError::MissingField { .. } => "CONFIG_MISSING_FIELD".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
            ConfigError::ValidationFailed { .. } => "CONFIG_VALIDATION_FAILED".to_string(),
            ConfigError::PermissionDenied { .. } => "CONFIG_PERMISSION_DENIED".to_string(),
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR".to_string(),
        }
    }
}

/// Logs errors with their code, user-facing message and retry hint.
#[derive(Debug, Default)]
pub struct ErrorReporter;

impl ErrorReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report_error(&self, error: &CoreError) {
        error.log_error();
        info!("Error code: {}", error.error_code());
        info!("User message: {}", error.user_friendly_message());
        if error.is_retryable() {
            if let Some(retry_after) = error.retry_after() {
                info!("Error is retryable. Retry after: {:?}", retry_after);
            }
        }
    }

    /// For errors the caller recovers from.
    pub fn report_warning(&self, error: &CoreError) {
        error.log_warn();
        info!("User message: {}", error.user_friendly_message());
    }
}
