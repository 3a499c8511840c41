//! HTTP client for the upstream posts API.

use async_trait::async_trait;
use reqwest::{
    Client, Url,
    header::{ACCEPT, ACCEPT_LANGUAGE},
};
use tracing::instrument;

use crate::{
    application::source::{PostsSource, SourceError},
    config::UpstreamSettings,
    domain::posts::PostsPage,
};

const POSTS_PATH: &str = "api/posts";
const ACCEPT_VALUE: &str = "application/json, text/plain, */*";
/// Longest slice of an error body kept in diagnostics.
const BODY_EXCERPT_CHARS: usize = 256;

#[derive(Clone, Debug)]
pub struct PostsApiClient {
    client: Client,
    base: Url,
    accept_language: String,
}

impl PostsApiClient {
    pub fn new(settings: &UpstreamSettings) -> Result<Self, SourceError> {
        let mut builder = Client::builder().user_agent(Self::user_agent());
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base: directory_url(&settings.base_url)?,
            accept_language: settings.accept_language.clone(),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("postboard/", env!("CARGO_PKG_VERSION"))
    }

    pub fn posts_url(&self, page: u32, limit: u32) -> Result<Url, SourceError> {
        let mut url = self.base.join(POSTS_PATH)?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }
}

#[async_trait]
impl PostsSource for PostsApiClient {
    #[instrument(skip(self), err(Display))]
    async fn try_get_posts(&self, page: u32, limit: u32) -> Result<PostsPage, SourceError> {
        let url = self.posts_url(page, limit)?;
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_VALUE)
            .header(ACCEPT_LANGUAGE, self.accept_language.as_str())
            .send()
            .await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            let body: String = String::from_utf8_lossy(&bytes)
                .chars()
                .take(BODY_EXCERPT_CHARS)
                .collect();
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Relative joins keep any path prefix only when the base ends with `/`.
fn directory_url(base: &Url) -> Result<Url, SourceError> {
    if base.path().ends_with('/') {
        return Ok(base.clone());
    }
    let mut url = base.clone();
    let path = format!("{}/", base.path());
    url.set_path(&path);
    Ok(url)
}
