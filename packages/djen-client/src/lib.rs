//! Client for the DJEN comunica API.
//!
//! DJEN (Diário de Justiça Eletrônico Nacional) publishes judicial
//! communications through the CNJ `comunicaapi` endpoint. This crate covers
//! the one operation the search engine needs: fetching a single page of the
//! communications listing for a set of query parameters.
//!
//! Pagination policy is deliberately out of scope. The client reports rate
//! limiting as its own error variant and leaves pacing, backoff, and
//! termination to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use djen_client::{DjenClient, DjenConfig};
//!
//! let client = DjenClient::new(DjenConfig::from_env())?;
//! let query = vec![("nomeParte".to_string(), "Sinales".to_string())];
//! let page = client.get_communications(&query, 1, 50).await?;
//! println!("fetched {} communications", page.items.len());
//! ```

pub mod error;
pub mod types;

pub use error::{DjenError, Result};
pub use types::{CommunicationsPage, Lawyer, LawyerAssociation, Publication, Recipient};

use std::time::Duration;

use tracing::debug;

/// Production endpoint for the communications listing.
pub const DEFAULT_BASE_URL: &str = "https://comunicaapi.pje.jus.br/api/v1/comunicacao";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`DjenClient`].
#[derive(Debug, Clone)]
pub struct DjenConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for DjenConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl DjenConfig {
    /// Read overrides from `DJEN_BASE_URL` and `DJEN_TIMEOUT_SECS`; anything
    /// unset or unparsable keeps its default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("DJEN_BASE_URL").unwrap_or(defaults.base_url),
            timeout_secs: std::env::var("DJEN_TIMEOUT_SECS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }
}

/// HTTP client for the communications listing endpoint.
#[derive(Debug, Clone)]
pub struct DjenClient {
    client: reqwest::Client,
    base_url: String,
}

impl DjenClient {
    pub fn new(config: DjenConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    /// Point the client at a different base URL. Tests use this with a mock
    /// server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Fetch one page of the communications listing.
    ///
    /// `query` holds the search parameters as wire-name/value pairs; the
    /// pagination parameters (`pagina`, `itensPorPagina`) are appended here.
    pub async fn get_communications(
        &self,
        query: &[(String, String)],
        page: u32,
        per_page: u32,
    ) -> Result<CommunicationsPage> {
        debug!(page, per_page, "requesting communications page");

        let response = self
            .client
            .get(&self.base_url)
            .query(query)
            .query(&[("itensPorPagina", per_page), ("pagina", page)])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DjenError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DjenError::Api { status, body });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
