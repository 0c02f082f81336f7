//! Paginated retrieval of one rule's publications.

use std::time::Duration;

use djen_client::{DjenClient, DjenError, Publication};
use tracing::{debug, error, warn};

use crate::progress::ProgressReporter;
use crate::rules::SearchRule;

/// Pagination policy.
///
/// Defaults match production behavior against the real API; tests shrink
/// the delays to keep runs fast.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Items requested per page (`itensPorPagina`).
    pub per_page: u32,
    /// Pause between consecutive page requests of the same rule.
    pub page_delay: Duration,
    /// Pause before retrying a rate-limited page.
    pub rate_limit_backoff: Duration,
    /// Optional cap on pages fetched per rule. `None` means pagination ends
    /// only when the upstream returns an empty page.
    pub max_pages: Option<u32>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            per_page: 50,
            page_delay: Duration::from_millis(500),
            rate_limit_backoff: Duration::from_secs(10),
            max_pages: None,
        }
    }
}

/// Fetches every publication matching one rule's effective parameters.
pub struct PublicationFetcher {
    client: DjenClient,
    config: FetchConfig,
}

impl PublicationFetcher {
    pub fn new(client: DjenClient, config: FetchConfig) -> Self {
        Self { client, config }
    }

    /// Walk the listing pages for `rule` until the upstream returns an
    /// empty page.
    ///
    /// A short page is not a termination signal; only an empty one is. Rate
    /// limiting retries the same page after a backoff, as many times as it
    /// takes. Any other failure ends pagination early and returns whatever
    /// accumulated, so one bad rule never takes down a whole run.
    pub async fn fetch_rule(
        &self,
        rule: &SearchRule,
        progress: &dyn ProgressReporter,
    ) -> Vec<Publication> {
        let query = rule.query_pairs();
        let mut publications = Vec::new();
        let mut page: u32 = 1;

        loop {
            if let Some(cap) = self.config.max_pages {
                if page > cap {
                    warn!(rule = %rule.name, cap, "page cap reached, stopping pagination");
                    break;
                }
            }

            progress.report(&format!("Fetching {} - page {}", rule.name, page));

            match self
                .client
                .get_communications(&query, page, self.config.per_page)
                .await
            {
                Ok(body) => {
                    if body.items.is_empty() {
                        debug!(rule = %rule.name, page, "empty page, pagination complete");
                        break;
                    }
                    publications.extend(body.items);
                    page += 1;
                    tokio::time::sleep(self.config.page_delay).await;
                }
                Err(DjenError::RateLimited) => {
                    progress.report("Rate limit hit, waiting...");
                    warn!(rule = %rule.name, page, "rate limited, backing off");
                    tokio::time::sleep(self.config.rate_limit_backoff).await;
                }
                Err(e) => {
                    error!(rule = %rule.name, page, error = %e, "fetch failed, keeping partial results");
                    break;
                }
            }
        }

        publications
    }
}
