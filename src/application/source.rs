//! Port describing where listing pages come from.

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::domain::posts::PostsPage;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid upstream URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream answered with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("upstream body could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SourceError {
    /// Error messages from the outermost error down to the root cause.
    pub fn chain(&self) -> Vec<String> {
        let mut messages = vec![self.to_string()];
        let mut current = std::error::Error::source(self);
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        messages
    }
}

#[async_trait]
pub trait PostsSource: Send + Sync {
    /// Fetch one page of posts, reporting every failure.
    async fn try_get_posts(&self, page: u32, limit: u32) -> Result<PostsPage, SourceError>;

    /// Fetch one page of posts, collapsing every failure into an empty page.
    ///
    /// Callers cannot tell "request failed" apart from "no posts"; the
    /// failure is only visible in the logs.
    async fn get_posts(&self, page: u32, limit: u32) -> PostsPage {
        match self.try_get_posts(page, limit).await {
            Ok(posts) => posts,
            Err(err) => {
                warn!(
                    page,
                    limit,
                    error = %err,
                    chain = ?err.chain(),
                    "posts fetch failed; serving an empty page"
                );
                PostsPage::empty()
            }
        }
    }
}
