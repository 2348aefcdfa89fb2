use crate::error::{Result, TopologyError};
use crate::model::RouteDocument;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

/// Where the route mapper serves its route document
pub const DEFAULT_SOURCE_URL: &str = "http://localhost:12345";

/// Single-shot HTTP client for route documents. No retries, no timeouts
/// beyond reqwest's defaults.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("topoviz/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch_document_str(&self, url: &str) -> Result<RouteDocument> {
        let parsed = Url::parse(url).map_err(|e| TopologyError::InvalidUrl(format!("{}: {}", url, e)))?;
        self.fetch_document(&parsed).await
    }

    pub async fn fetch_document(&self, url: &Url) -> Result<RouteDocument> {
        info!("Fetching route document from {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        debug!("{} answered {}", url, status);
        if !status.is_success() {
            return Err(TopologyError::StatusError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!("Received {} bytes", body.len());

        let document = RouteDocument::from_json_slice(&body)?;
        info!("Parsed {} routes", document.len());
        Ok(document)
    }
}
