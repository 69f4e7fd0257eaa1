pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use adapters::MemoryRouter;
pub use config::{toml_config::TomlConfig, Settings};
pub use crate::core::{
    posts_service::PostsService, request::PostRequest, updates::PostListUpdates,
};
pub use domain::model::{ImageUpload, Post, PostDetail, PostImage, PostListState};
pub use domain::ports::{ConfigProvider, Navigator};
pub use utils::error::{PostsError, Result};
