pub mod posts_service;
pub mod request;
pub mod updates;

pub use crate::domain::model::{ImageUpload, Post, PostDetail, PostImage, PostListState};
pub use crate::domain::ports::{ConfigProvider, Navigator};
pub use crate::utils::error::Result;
