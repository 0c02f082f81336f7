//! Aggregate statistics for one search run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::exclusions::ExclusionCounts;

/// Counters describing one complete run.
///
/// Built fresh per run and fully populated by the time the run returns; the
/// engine keeps nothing between runs. `rule_counts` holds raw per-rule
/// totals before exclusions, so a record found by two rules appears under
/// both entries while counting once toward `total_found`. The counters
/// always satisfy `total_found + duplicates_removed == sum(rule_counts) -
/// total_excluded`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStats {
    /// Enabled rules attempted.
    pub rules_executed: usize,
    /// Rule name to publications fetched, before exclusions.
    pub rule_counts: BTreeMap<String, usize>,
    /// `"<rule> - <exclusion>"` to publications removed by that exclusion.
    pub exclusion_details: BTreeMap<String, usize>,
    /// Sum of all `exclusion_details` values.
    pub total_excluded: usize,
    /// Cross-rule duplicates dropped by the final pass.
    pub duplicates_removed: usize,
    /// Unique publications in the final result.
    pub total_found: usize,
}

impl ExecutionStats {
    /// Fold one rule's exclusion counts in under `"<rule> - <exclusion>"`
    /// keys.
    pub fn record_exclusions(&mut self, rule_name: &str, counts: &ExclusionCounts) {
        for (exclusion_name, count) in counts {
            self.exclusion_details
                .insert(format!("{rule_name} - {exclusion_name}"), *count);
            self.total_excluded += count;
        }
    }
}
