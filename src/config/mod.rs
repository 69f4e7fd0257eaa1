#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_positive_number, validate_range, validate_url, Validate};
use toml_config::TomlConfig;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_UPDATES_CAPACITY: usize = 16;
pub const MAX_UPDATES_CAPACITY: usize = 1024;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Posts resource root for an API root: `{api_url}/posts/`.
pub fn posts_endpoint(api_url: &str) -> String {
    format!("{}/posts/", api_url.trim_end_matches('/'))
}

/// Effective configuration after merging the TOML file and command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub updates_capacity: usize,
    pub page_size: u32,
    pub log_format: LogFormat,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            updates_capacity: DEFAULT_UPDATES_CAPACITY,
            page_size: DEFAULT_PAGE_SIZE,
            log_format: LogFormat::default(),
            verbose: false,
        }
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let defaults = Self::default();
        let logging = config.logging.as_ref();
        Self {
            api_url: config
                .api
                .as_ref()
                .and_then(|api| api.url.clone())
                .unwrap_or(defaults.api_url),
            updates_capacity: config
                .updates
                .as_ref()
                .and_then(|u| u.capacity)
                .unwrap_or(defaults.updates_capacity),
            page_size: config
                .pagination
                .as_ref()
                .and_then(|p| p.page_size)
                .unwrap_or(defaults.page_size),
            log_format: logging
                .and_then(|l| l.format)
                .unwrap_or(defaults.log_format),
            verbose: logging.and_then(|l| l.verbose).unwrap_or(defaults.verbose),
        }
    }

    pub fn posts_endpoint(&self) -> String {
        posts_endpoint(&self.api_url)
    }
}

impl ConfigProvider for Settings {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn updates_capacity(&self) -> usize {
        self.updates_capacity
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api_url", &self.api_url)?;
        validate_range("updates_capacity", self.updates_capacity, 1, MAX_UPDATES_CAPACITY)?;
        validate_positive_number("page_size", self.page_size as usize, 1)?;
        Ok(())
    }
}
