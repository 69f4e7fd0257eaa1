use crate::utils::error::{PostsError, Result};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

type BoxedResponse<T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'static>>;

/// A prepared request that is only sent when awaited.
///
/// Dropping the handle without awaiting it sends nothing.
#[must_use = "the request is not sent until the handle is awaited"]
pub struct PostRequest<T> {
    method: Method,
    url: String,
    inner: BoxedResponse<T>,
}

impl<T: Send + 'static> PostRequest<T> {
    pub(crate) fn new<F, Fut>(method: Method, url: String, request: RequestBuilder, parse: F) -> Self
    where
        F: FnOnce(Response) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let inner = Box::pin(async move {
            let response = request.send().await?;
            tracing::debug!("API response status: {}", response.status());
            let response = check_status(response).await?;
            parse(response).await
        });
        Self { method, url, inner }
    }
}

impl<T> PostRequest<T> {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl<T> Future for PostRequest<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.as_mut().poll(cx)
    }
}

impl<T> std::fmt::Debug for PostRequest<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

/// Decode a JSON body; malformed payloads become `SerializationError`.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub(crate) async fn discard_body(_response: Response) -> Result<()> {
    Ok(())
}

/// Map a non-success status to `HttpStatusError`, keeping the body for diagnostics.
pub(crate) async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(PostsError::HttpStatusError {
        status: status.as_u16(),
        body,
    })
}
