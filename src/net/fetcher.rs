use async_trait::async_trait;
use log::{info, warn};

use crate::config::Settings;
use crate::error::{PipelineError, PipelineResult};

/// Raw body bytes, or a network error message
pub type FetchResult = PipelineResult<Vec<u8>>;

/// Anything that can retrieve the bytes behind a URL.
///
/// The controller only talks to this trait so tests can swap in a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issue a single GET and return the body of a 2xx response
    async fn fetch(&self, url: &str) -> FetchResult;
}

/// Production fetcher backed by reqwest.
///
/// One GET per call: no retry, client-default redirects, no extra headers.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build the HTTP client
    ///
    /// A timeout is only set when `settings.fetch_timeout` asks for one;
    /// by default a stalled server keeps the request open.
    pub fn new(settings: &Settings) -> PipelineResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.fetch_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        info!("🌐 GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                warn!("⚠️  Fetch failed for {}: {}", url, e);
                PipelineError::from(e)
            })?;

        let body = response.bytes().await?;
        info!("📥 Received {} bytes", body.len());

        Ok(body.to_vec())
    }
}
