use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Preference store error: {0}")]
    Store(#[from] StoreError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection failed: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Migration failed: {migration}")]
    MigrationFailed { migration: String },

    #[error("Database locked")]
    DatabaseLocked,

    #[error("SQL error: {0}")]
    Sql(#[source] sqlx::Error),
}

const SQLITE_BUSY: i64 = 5;
const SQLITE_LOCKED: i64 = 6;

/// Busy and locked SQLite failures become [`StoreError::DatabaseLocked`] so
/// callers can retry them; everything else stays a plain SQL error.
impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        let locked = e
            .as_database_error()
            .and_then(|db| db.code())
            .is_some_and(|code| is_lock_code(&code));
        if locked {
            StoreError::DatabaseLocked
        } else {
            StoreError::Sql(e)
        }
    }
}

/// SQLite reports extended result codes; the primary code is the low byte.
fn is_lock_code(code: &str) -> bool {
    code.parse::<i64>()
        .is_ok_and(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
}

#[derive(Error, Debug, Clone)]
pub enum SourceError {
    #[error("Invalid {source_name} payload: {details}")]
    InvalidPayload {
        source_name: String,
        details: String,
    },

    #[error("Invalid timestamp: {value}")]
    InvalidTimestamp { value: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid configuration format: {details}")]
    InvalidFormat { details: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Permission denied accessing config: {path}")]
    PermissionDenied { path: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
