use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::Validate;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "posts-client")]
#[command(about = "Command line client for the posts API")]
pub struct CliConfig {
    /// API root; `/posts/` is appended [default: http://localhost:3000/api]
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// TOML config file; command line flags take precedence
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List one page of posts
    List {
        #[arg(long)]
        page_size: Option<u32>,

        #[arg(long, default_value = "1")]
        page: u32,
    },
    /// Show a single post
    Get { id: String },
    /// Create a post with an image upload
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,

        #[arg(long)]
        image: PathBuf,
    },
    /// Replace a post, uploading a new image or keeping the stored one
    #[command(group(ArgGroup::new("image_source").required(true).args(["image", "image_path"])))]
    Update {
        id: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,

        /// New image file to upload
        #[arg(long)]
        image: Option<PathBuf>,

        /// Image path already stored on the server
        #[arg(long)]
        image_path: Option<String>,
    },
    /// Delete a post
    Delete { id: String },
}

impl CliConfig {
    /// Loads and validates the TOML file if given, then applies the command line overrides.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Settings::from_toml(&file)
            }
            None => Settings::default(),
        };

        if let Some(api_url) = &self.api_url {
            settings.api_url = api_url.clone();
        }
        if let Some(format) = self.log_format {
            settings.log_format = format;
        }
        if self.verbose {
            settings.verbose = true;
        }
        if let Command::List {
            page_size: Some(page_size),
            ..
        } = &self.command
        {
            settings.page_size = *page_size;
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_API_URL;

    #[test]
    fn test_list_defaults() {
        let cli = CliConfig::try_parse_from(["posts-client", "list"]).unwrap();
        let settings = cli.settings().unwrap();
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert!(matches!(cli.command, Command::List { page: 1, page_size: None }));
    }

    #[test]
    fn test_flags_override_settings() {
        let cli = CliConfig::try_parse_from([
            "posts-client",
            "list",
            "--page-size",
            "4",
            "--api-url",
            "https://blog.example.com/api",
            "--log-format",
            "json",
            "--verbose",
        ])
        .unwrap();
        let settings = cli.settings().unwrap();
        assert_eq!(settings.page_size, 4);
        assert_eq!(settings.api_url, "https://blog.example.com/api");
        assert_eq!(settings.log_format, LogFormat::Json);
        assert!(settings.verbose);
    }

    #[test]
    fn test_update_requires_one_image_source() {
        let base = ["posts-client", "update", "p1", "--title", "t", "--content", "c"];
        assert!(CliConfig::try_parse_from(base).is_err());

        let mut with_path = base.to_vec();
        with_path.extend(["--image-path", "http://host/images/t.png"]);
        assert!(CliConfig::try_parse_from(with_path).is_ok());

        let mut with_both = base.to_vec();
        with_both.extend(["--image-path", "x", "--image", "y.png"]);
        assert!(CliConfig::try_parse_from(with_both).is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_io_error() {
        let cli = CliConfig::try_parse_from([
            "posts-client",
            "--config",
            "/nonexistent/posts-client.toml",
            "list",
        ])
        .unwrap();
        assert!(matches!(
            cli.settings(),
            Err(crate::utils::error::PostsError::IoError(_))
        ));
    }
}
