//! Drives fetch, exclusion, provenance tagging, and deduplication across
//! all enabled rules.

use djen_client::Publication;
use tracing::info;

use crate::dedup::remove_duplicates;
use crate::exclusions::apply_exclusions;
use crate::fetch::PublicationFetcher;
use crate::progress::ProgressReporter;
use crate::rules::SearchRule;
use crate::stats::ExecutionStats;

/// Everything one run produces: the deduplicated publications and the
/// statistics describing how they were obtained.
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    pub publications: Vec<Publication>,
    pub stats: ExecutionStats,
}

/// Executes a caller-owned, ordered list of search rules.
///
/// One lifecycle per call: rules run strictly in input order with a single
/// page in flight at a time, matching what the upstream tolerates. Per-rule
/// fetch failures shrink that rule's yield but never abort the run, so
/// `execute` always returns a report.
pub struct SearchEngine {
    fetcher: PublicationFetcher,
}

impl SearchEngine {
    pub fn new(fetcher: PublicationFetcher) -> Self {
        Self { fetcher }
    }

    /// Run every enabled rule and return the combined, deduplicated result.
    pub async fn execute(
        &self,
        rules: &[SearchRule],
        progress: &dyn ProgressReporter,
    ) -> ExecutionReport {
        let mut combined = Vec::new();
        let mut stats = ExecutionStats::default();

        for rule in rules {
            if !rule.enabled {
                continue;
            }

            stats.rules_executed += 1;
            progress.report(&format!("Running rule: {}", rule.name));

            let fetched = self.fetcher.fetch_rule(rule, progress).await;
            stats.rule_counts.insert(rule.name.clone(), fetched.len());
            info!(rule = %rule.name, fetched = fetched.len(), "rule fetch complete");

            let mut publications = fetched;
            if !rule.exclusions.is_empty() {
                progress.report(&format!("Applying exclusions for: {}", rule.name));
                let (kept, counts) = apply_exclusions(publications, &rule.exclusions);
                stats.record_exclusions(&rule.name, &counts);
                publications = kept;
            }

            // Provenance is stamped after filtering so only surviving
            // records carry it into persisted results.
            for publication in &mut publications {
                publication.source_rule = Some(rule.name.clone());
            }

            combined.extend(publications);
        }

        progress.report("Removing duplicates...");
        let (unique, removed) = remove_duplicates(combined);
        stats.duplicates_removed = removed;
        stats.total_found = unique.len();

        info!(
            rules = stats.rules_executed,
            found = stats.total_found,
            excluded = stats.total_excluded,
            duplicates = stats.duplicates_removed,
            "search run complete"
        );

        ExecutionReport {
            publications: unique,
            stats,
        }
    }
}
