use crate::config::MAX_UPDATES_CAPACITY;
use crate::utils::error::{PostsError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{
    validate_positive_number, validate_range, validate_required_field, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: Option<ApiConfig>,
    pub updates: Option<UpdatesConfig>,
    pub pagination: Option<PaginationConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatesConfig {
    pub capacity: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<LogFormat>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// Load and parse a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PostsError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse TOML text after substituting `${VAR}` placeholders.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PostsError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unset variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PostsError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(api) = &self.api {
            let url = validate_required_field("api.url", &api.url)?;
            validate_url("api.url", url)?;
        }
        if let Some(capacity) = self.updates.as_ref().and_then(|u| u.capacity) {
            validate_range("updates.capacity", capacity, 1, MAX_UPDATES_CAPACITY)?;
        }
        if let Some(page_size) = self.pagination.as_ref().and_then(|p| p.page_size) {
            validate_positive_number("pagination.page_size", page_size as usize, 1)?;
        }
        Ok(())
    }
}
