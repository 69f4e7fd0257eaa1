use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    /// API root, e.g. `http://localhost:3000/api`.
    fn api_url(&self) -> &str;
    fn updates_capacity(&self) -> usize;
}

/// Client-side router the service hands control back to after a mutation.
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Navigate to the route built from `commands`; `[""]` is the root.
    async fn navigate(&self, commands: &[&str]);
}

#[async_trait]
impl<N: Navigator + ?Sized> Navigator for std::sync::Arc<N> {
    async fn navigate(&self, commands: &[&str]) {
        (**self).navigate(commands).await
    }
}
