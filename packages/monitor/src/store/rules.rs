//! Rule definitions: a fixed built-in set plus a JSON file of custom rules.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{error, info};

use crate::error::StoreError;
use crate::rules::{ParamValue, Parameters, QueryField, SearchRule};

/// Loads and saves rule definitions.
///
/// The built-in rules exist regardless of any stored configuration; the
/// file at `path` only holds the custom ones. Both kinds run identically.
pub struct RuleStore {
    path: PathBuf,
}

impl RuleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The standing searches, each scoped to publications made available on
    /// `date`.
    pub fn built_in_rules(date: NaiveDate) -> Vec<SearchRule> {
        let dated = |pairs: Vec<(QueryField, ParamValue)>| {
            let mut params = Parameters::new();
            for (field, value) in pairs {
                params.insert(field, value);
            }
            params.insert(QueryField::AvailableFrom, date.into());
            params
        };

        vec![
            SearchRule::new(
                "OAB Principal",
                true,
                dated(vec![
                    (QueryField::OabNumber, "8773".into()),
                    (QueryField::OabState, "ES".into()),
                ]),
                vec![],
            ),
            SearchRule::new(
                "Darwin",
                true,
                dated(vec![
                    (QueryField::PartyName, "Darwin".into()),
                    (QueryField::CourtBodyCode, "TJES".into()),
                ]),
                vec![],
            ),
            SearchRule::new(
                "Sinales",
                true,
                dated(vec![(QueryField::PartyName, "Sinales".into())]),
                vec![],
            ),
            SearchRule::new(
                "Multivix",
                true,
                dated(vec![(QueryField::PartyName, "Multivix".into())]),
                vec![],
            ),
            SearchRule::new(
                "Claretiano",
                true,
                dated(vec![(QueryField::PartyName, "Claretiano".into())]),
                vec![],
            ),
        ]
    }

    /// Custom rules from the backing file. A missing file is an empty set;
    /// an unreadable or malformed file is an error.
    pub fn load_custom(&self) -> Result<Vec<SearchRule>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Built-in rules followed by whatever custom rules load cleanly.
    ///
    /// A broken custom-rules file degrades the run to built-ins only
    /// instead of aborting it; the failure is logged.
    pub fn load_all(&self, date: NaiveDate) -> Vec<SearchRule> {
        let mut rules = Self::built_in_rules(date);
        match self.load_custom() {
            Ok(custom) => {
                info!(
                    built_in = rules.len(),
                    custom = custom.len(),
                    "loaded search rules"
                );
                rules.extend(custom);
            }
            Err(e) => {
                error!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to load custom rules, running built-ins only"
                );
            }
        }
        rules
    }

    /// Overwrite the custom-rules file, creating parent directories as
    /// needed.
    pub fn save(&self, rules: &[SearchRule]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(rules)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
