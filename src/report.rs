use crate::diff::SearchOutcome;
use crate::parser::Username;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Everything a single check produced, as handed to the output sinks.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub archive: PathBuf,
    pub following: Vec<Username>,
    pub followers: Vec<Username>,
    pub unfollowers: Vec<Username>,
    pub count: usize,
    pub search: Option<SearchOutcome>,
    pub files_extracted: usize,
    pub saved_files: Vec<PathBuf>,
    pub checked_at: DateTime<Utc>,
}

