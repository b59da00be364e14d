pub mod entity;
pub mod mapper;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::model::Report;
use entity::ReportRecord;

/// Errors from the persistence layer. Callers treat persist failures as
/// best-effort: the in-memory state stays authoritative.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to serialize report collection: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// In-memory, persistence-backed collection of all reports.
/// Insertion order is preserved; the backing file is rewritten wholesale
/// on every persist.
pub struct ReportStore {
    path: PathBuf,
    reports: Vec<Report>,
}

impl ReportStore {
    /// Open the store at `path`. A missing file yields an empty store, and
    /// so does malformed or unreadable content (logged, never fatal).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let reports = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<ReportRecord>>(&raw) {
                Ok(records) => records.into_iter().map(Report::from).collect(),
                Err(e) => {
                    warn!(
                        "Discarding unreadable report collection '{}': {}",
                        path.display(),
                        e
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(
                    "Failed to read report collection '{}': {}",
                    path.display(),
                    e
                );
                Vec::new()
            }
        };

        debug!(
            "Report store opened with {} report(s) from '{}'",
            reports.len(),
            path.display()
        );
        Self { path, reports }
    }

    pub fn all(&self) -> &[Report] {
        &self.reports
    }

    pub fn find(&self, id: Uuid) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    pub fn insert(&mut self, report: Report) {
        self.reports.push(report);
    }

    /// Replace the stored report with the same id. Returns false when no
    /// report with that id exists.
    pub fn replace(&mut self, report: Report) -> bool {
        match self.reports.iter_mut().find(|r| r.id == report.id) {
            Some(slot) => {
                *slot = report;
                true
            }
            None => false,
        }
    }

    /// Serialize the entire collection to the backing file.
    pub fn persist(&self) -> Result<(), StoreError> {
        let records: Vec<ReportRecord> = self.reports.iter().map(ReportRecord::from).collect();
        let json = serde_json::to_string_pretty(&records)?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}
