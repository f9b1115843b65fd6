// Page fetching
//
// One blocking GET per page. No timeout and no retry: a failed request
// aborts the run.

use anyhow::{Context, Result};
use reqwest::blocking::{Client, ClientBuilder};
use tracing::debug;

use crate::error::ScrapeError;

/// Desktop browser identity sent with listing requests to get past basic bot filtering
pub const SPOOFED_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_3) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/35.0.1916.47 Safari/537.36";

/// Anything that can turn a URL into page markup
pub trait PageSource {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP page source backed by a blocking reqwest client
pub struct HttpFetcher {
    client: Client,
}

/// Builder shared by every fetcher. reqwest's blocking client gives up after
/// 30 seconds unless told otherwise; pages here wait as long as they take.
fn client_builder() -> ClientBuilder {
    Client::builder().timeout(None)
}

impl HttpFetcher {
    /// Client with reqwest's default identity
    pub fn new() -> Result<Self> {
        let client = client_builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// Client that presents the given `User-Agent` on every request
    pub fn with_user_agent(user_agent: &str) -> Result<Self> {
        let client = client_builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl PageSource for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| ScrapeError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response
            .text()
            .map_err(|source| ScrapeError::Request {
                url: url.to_string(),
                source,
            })?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
