//! File-backed collaborators around the engine: rule definitions and
//! execution results. The engine itself never touches storage.

pub mod results;
pub mod rules;

pub use results::{ExecutionRecord, ExecutionStore, JsonResultStore};
pub use rules::RuleStore;
