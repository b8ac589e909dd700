use crate::categories::{default_categories, KeywordCategory};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://newsdeck.db";
pub const DEFAULT_LOG_FILTER: &str =
    "newsdeck=info,relevance_engine=info,preference_store=info,source_adapters=info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_url: String,
    pub log_filter: String,
    /// Replaces the built-in category table when present.
    pub categories: Option<Vec<KeywordCategory>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            categories: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            std::io::ErrorKind::PermissionDenied => ConfigError::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => ConfigError::InvalidFormat {
                details: e.to_string(),
            },
        })?;

        let config = Self::from_toml(&raw)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database_url".to_string(),
            });
        }

        if let Some(categories) = &self.categories {
            let mut seen = HashSet::new();
            for category in categories {
                if category.id.trim().is_empty() {
                    return Err(ConfigError::ValidationFailed {
                        reason: "category id must not be empty".to_string(),
                    });
                }
                if !seen.insert(category.id.as_str()) {
                    return Err(ConfigError::ValidationFailed {
                        reason: format!("duplicate category id '{}'", category.id),
                    });
                }
                if !category.weight.is_finite() || category.weight <= 0.0 {
                    return Err(ConfigError::InvalidValue {
                        field: format!("categories.{}.weight", category.id),
                        value: category.weight.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn category_table(&self) -> Vec<KeywordCategory> {
        self.categories.clone().unwrap_or_else(default_categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.category_table().len(), 4);
    }

    #[test]
    fn test_category_override() {
        let config = AppConfig::from_toml(
            r#"
            database_url = "sqlite://custom.db"

            [[categories]]
            id = "rust"
            name = "Rust"
            keywords = ["cargo", "borrow checker"]
            weight = 2.0
            "#,
        )
        .unwrap();
        assert_eq!(config.database_url, "sqlite://custom.db");
        let table = config.category_table();
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].keywords, vec!["cargo", "borrow checker"]);
    }

    #[test]
    fn test_duplicate_category_ids_rejected() {
        let err = AppConfig::from_toml(
            r#"
            [[categories]]
            id = "ai"
            name = "AI"

            [[categories]]
            id = "ai"
            name = "AI again"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed { .. }));
    }

    #[test]
    fn test_non_positive_weight_rejected() {
        let err = AppConfig::from_toml(
            r#"
            [[categories]]
            id = "ai"
            name = "AI"
            weight = 0.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }
}
