use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A blog post as the UI sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub image_path: String,
    pub creator: Option<String>,
}

/// Single post as returned by `GET {base}{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub image_path: String,
}

/// Snapshot broadcast after every successful list fetch.
///
/// `post_count` is the server-side total, not the length of `posts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostListState {
    pub posts: Arc<[Post]>,
    pub post_count: u64,
}

/// Binary image sent as the multipart `image` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl ImageUpload {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            mime: None,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

/// Image argument of an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostImage {
    /// New upload, sent as multipart form data.
    File(ImageUpload),
    /// Path already stored on the server; sent as JSON.
    Path(String),
}

impl From<ImageUpload> for PostImage {
    fn from(upload: ImageUpload) -> Self {
        PostImage::File(upload)
    }
}

// Wire shapes of the list endpoint.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawPost {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_path: String,
    #[serde(default)]
    pub creator: Option<String>,
}

impl From<RawPost> for Post {
    fn from(raw: RawPost) -> Self {
        Post {
            id: raw.id,
            title: raw.title,
            content: raw.content,
            image_path: raw.image_path,
            creator: raw.creator,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostPage {
    #[serde(default)]
    pub message: Option<String>,
    pub posts: Vec<RawPost>,
    pub max_posts: u64,
}
