use crate::config::posts_endpoint;
use crate::core::request::{check_status, discard_body, read_json, PostRequest};
use crate::core::updates::{PostListBroadcaster, PostListUpdates};
use crate::core::{ConfigProvider, Navigator, Result};
use crate::domain::model::{ImageUpload, Post, PostDetail, PostImage, PostListState, PostPage};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method};
use std::sync::Arc;
use tokio::sync::RwLock;
use url::Url;

const ROOT_ROUTE: &[&str] = &[""];

/// Data access for posts: talks to the backend, keeps the current page and
/// broadcasts it, and hands control back to the router after mutations.
pub struct PostsService<N: Navigator> {
    client: Client,
    base_url: String,
    navigator: N,
    posts: RwLock<Arc<[Post]>>,
    updates: PostListBroadcaster,
}

impl<N: Navigator> PostsService<N> {
    pub fn new<C: ConfigProvider>(config: &C, navigator: N) -> Self {
        Self::with_client(Client::new(), config, navigator)
    }

    pub fn with_client<C: ConfigProvider>(client: Client, config: &C, navigator: N) -> Self {
        Self {
            client,
            base_url: posts_endpoint(config.api_url()),
            navigator,
            posts: RwLock::new(Arc::from(Vec::new())),
            updates: PostListBroadcaster::new(config.updates_capacity()),
        }
    }

    /// `{api_url}/posts/`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// `{base}{id}` with the id escaped as a single path segment.
    fn post_url(&self, id: &str) -> String {
        match Url::parse(&self.base_url) {
            Ok(mut url) => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.pop_if_empty().push(id);
                }
                url.into()
            }
            // Unvalidated base; keep the plain concatenation
            Err(_) => format!("{}{}", self.base_url, id),
        }
    }

    /// Fetches one page and publishes it to subscribers.
    ///
    /// On failure the cached page is kept and nothing is published.
    pub async fn list_posts(&self, page_size: u32, current_page: u32) -> Result<()> {
        let page = match self.fetch_page(page_size, current_page).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(
                    "Listing posts (page size {}, page {}) failed: {}",
                    page_size,
                    current_page,
                    e
                );
                return Err(e);
            }
        };

        if let Some(message) = &page.message {
            tracing::debug!("Backend message: {}", message);
        }

        let posts: Arc<[Post]> = page.posts.into_iter().map(Post::from).collect();
        *self.posts.write().await = Arc::clone(&posts);

        let post_count = page.max_posts;
        let page_len = posts.len();
        let delivered = self.updates.publish(PostListState { posts, post_count });
        tracing::info!(
            "Loaded {} of {} posts, notified {} subscribers",
            page_len,
            post_count,
            delivered
        );
        Ok(())
    }

    async fn fetch_page(&self, page_size: u32, current_page: u32) -> Result<PostPage> {
        tracing::debug!("Making API request to: {}", self.base_url);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("pagesize", page_size), ("currentpage", current_page)])
            .send()
            .await?;
        tracing::debug!("API response status: {}", response.status());

        let response = check_status(response).await?;
        read_json::<PostPage>(response).await
    }

    /// Snapshots published after this call.
    pub fn subscribe(&self) -> PostListUpdates {
        self.updates.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.updates.subscriber_count()
    }

    /// The page stored by the last successful `list_posts`.
    pub async fn cached_posts(&self) -> Arc<[Post]> {
        Arc::clone(&*self.posts.read().await)
    }

    pub async fn cached_post(&self, id: &str) -> Option<Post> {
        self.posts.read().await.iter().find(|p| p.id == id).cloned()
    }

    pub fn fetch_post(&self, id: &str) -> PostRequest<PostDetail> {
        let url = self.post_url(id);
        let request = self.client.get(&url);
        PostRequest::new(Method::GET, url, request, read_json::<PostDetail>)
    }

    pub fn delete_post(&self, id: &str) -> PostRequest<()> {
        let url = self.post_url(id);
        let request = self.client.delete(&url);
        PostRequest::new(Method::DELETE, url, request, discard_body)
    }

    /// Uploads a new post, then navigates to the root route whatever the outcome.
    pub async fn create_post(&self, title: &str, content: &str, image: ImageUpload) -> Result<()> {
        let outcome = self.send_create(title, content, image).await;
        match &outcome {
            Ok(()) => tracing::info!("Created post '{}'", title),
            Err(e) => tracing::warn!("Creating post '{}' failed: {}", title, e),
        }
        self.navigator.navigate(ROOT_ROUTE).await;
        outcome
    }

    async fn send_create(&self, title: &str, content: &str, image: ImageUpload) -> Result<()> {
        let form = post_form(None, title, content, image)?;
        tracing::debug!("Making API request to: {}", self.base_url);
        let response = self
            .client
            .post(&self.base_url)
            .multipart(form)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// Replaces a post, then navigates to the root route whatever the outcome.
    ///
    /// A `PostImage::Path` update is sent as JSON with `creator` set to null.
    pub async fn update_post(
        &self,
        id: &str,
        title: &str,
        content: &str,
        image: PostImage,
    ) -> Result<()> {
        let outcome = self.send_update(id, title, content, image).await;
        match &outcome {
            Ok(()) => tracing::info!("Updated post {}", id),
            Err(e) => tracing::warn!("Updating post {} failed: {}", id, e),
        }
        self.navigator.navigate(ROOT_ROUTE).await;
        outcome
    }

    async fn send_update(
        &self,
        id: &str,
        title: &str,
        content: &str,
        image: PostImage,
    ) -> Result<()> {
        let url = self.post_url(id);
        tracing::debug!("Making API request to: {}", url);
        let request = self.client.put(&url);
        let request = match image {
            PostImage::File(upload) => {
                request.multipart(post_form(Some(id), title, content, upload)?)
            }
            PostImage::Path(image_path) => request.json(&Post {
                id: id.to_string(),
                title: title.to_string(),
                content: content.to_string(),
                image_path,
                creator: None,
            }),
        };
        let response = request.send().await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Multipart body for create and update. The image part's filename is the title.
fn post_form(id: Option<&str>, title: &str, content: &str, image: ImageUpload) -> Result<Form> {
    let mut form = Form::new();
    if let Some(id) = id {
        form = form.text("id", id.to_string());
    }

    let mut part = Part::bytes(image.bytes).file_name(title.to_string());
    if let Some(mime) = &image.mime {
        part = part.mime_str(mime)?;
    }

    Ok(form
        .text("title", title.to_string())
        .text("content", content.to_string())
        .part("image", part))
}
