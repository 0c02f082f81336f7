//! Persistence of finished runs.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate};
use djen_client::Publication;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StoreError;
use crate::executor::ExecutionReport;
use crate::stats::ExecutionStats;

/// A completed run as handed to persistence: what was found, when, and the
/// statistics describing the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Human-readable name of the run, e.g. `Busca do dia 20/08/2025`.
    pub name: String,
    /// The day the run covered.
    pub date: NaiveDate,
    /// When the run finished.
    pub timestamp: DateTime<Local>,
    pub rules_executed: usize,
    pub publications_found: usize,
    pub stats: ExecutionStats,
    pub publications: Vec<Publication>,
}

impl ExecutionRecord {
    pub fn from_report(
        name: impl Into<String>,
        date: NaiveDate,
        timestamp: DateTime<Local>,
        report: ExecutionReport,
    ) -> Self {
        Self {
            name: name.into(),
            date,
            timestamp,
            rules_executed: report.stats.rules_executed,
            publications_found: report.publications.len(),
            stats: report.stats,
            publications: report.publications,
        }
    }
}

/// Where finished runs go. Callers hand the record over; the engine never
/// writes storage itself.
#[async_trait]
pub trait ExecutionStore: Send + Sync {
    async fn save(&self, record: &ExecutionRecord) -> Result<(), StoreError>;
    async fn load(&self, date: NaiveDate) -> Result<Option<ExecutionRecord>, StoreError>;
}

/// One pretty-printed JSON file per day under `dir`, named
/// `results_<YYYY-MM-DD>.json`.
pub struct JsonResultStore {
    dir: PathBuf,
}

impl JsonResultStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file_for(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("results_{}.json", date.format("%Y-%m-%d")))
    }
}

#[async_trait]
impl ExecutionStore for JsonResultStore {
    async fn save(&self, record: &ExecutionRecord) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.file_for(record.date);
        let json = serde_json::to_string_pretty(record)?;
        tokio::fs::write(&path, json).await?;
        info!(
            path = %path.display(),
            publications = record.publications_found,
            "execution results saved"
        );
        Ok(())
    }

    async fn load(&self, date: NaiveDate) -> Result<Option<ExecutionRecord>, StoreError> {
        let path = self.file_for(date);
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::publication;

    fn sample_record() -> ExecutionRecord {
        let mut publications = vec![publication(1, Some("aa")), publication(2, Some("bb"))];
        publications[0].source_rule = Some("Sinales".to_string());
        publications[1].source_rule = Some("Darwin".to_string());

        let mut stats = ExecutionStats::default();
        stats.rules_executed = 2;
        stats.rule_counts.insert("Sinales".to_string(), 1);
        stats.rule_counts.insert("Darwin".to_string(), 1);
        stats.total_found = 2;

        ExecutionRecord {
            name: "Busca do dia 20/08/2025".to_string(),
            date: "2025-08-20".parse().unwrap(),
            timestamp: Local::now(),
            rules_executed: 2,
            publications_found: 2,
            stats,
            publications,
        }
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonResultStore::new(dir.path());
        let record = sample_record();

        store.save(&record).await.unwrap();
        let loaded = store.load(record.date).await.unwrap().unwrap();

        assert_eq!(loaded.name, record.name);
        assert_eq!(loaded.publications_found, 2);
        assert_eq!(loaded.stats, record.stats);
        assert_eq!(
            loaded.publications[0].source_rule.as_deref(),
            Some("Sinales")
        );
    }

    #[tokio::test]
    async fn test_file_name_carries_the_date() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonResultStore::new(dir.path());

        store.save(&sample_record()).await.unwrap();

        assert!(dir.path().join("results_2025-08-20.json").exists());
    }

    #[tokio::test]
    async fn test_load_missing_day_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonResultStore::new(dir.path());

        let loaded = store.load("2025-01-01".parse().unwrap()).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_save_creates_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("daily_results");
        let store = JsonResultStore::new(&nested);

        store.save(&sample_record()).await.unwrap();

        assert!(nested.join("results_2025-08-20.json").exists());
    }
}
