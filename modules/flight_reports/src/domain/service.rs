use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::{Flight, NewReport, Report, ReportPatch};
use crate::infra::catalog::FlightCatalog;
use crate::infra::storage::ReportStore;

/// Domain service over the read-only flight catalog and the report store.
///
/// The catalog is never mutated after load, so it needs no locking. Every
/// report mutation (read-modify-write plus the persist that follows) runs
/// inside the single store lock.
#[derive(Clone)]
pub struct Service {
    catalog: Arc<FlightCatalog>,
    store: Arc<Mutex<ReportStore>>,
}

impl Service {
    pub fn new(catalog: Arc<FlightCatalog>, store: ReportStore) -> Self {
        Self {
            catalog,
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub fn catalog(&self) -> &FlightCatalog {
        &self.catalog
    }

    #[instrument(name = "flight_reports.service.list_flights", skip(self))]
    pub fn list_flights(&self) -> Vec<Flight> {
        debug!("Listing flight catalog");
        self.catalog.flights().to_vec()
    }

    #[instrument(name = "flight_reports.service.get_flight", skip(self), fields(flight_id = %id))]
    pub fn get_flight(&self, id: Uuid) -> Result<Flight, DomainError> {
        debug!("Getting flight by id");
        self.catalog
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::flight_not_found(id))
    }

    #[instrument(name = "flight_reports.service.list_reports", skip(self))]
    pub fn list_reports(&self) -> Vec<Report> {
        debug!("Listing reports");
        self.store.lock().all().to_vec()
    }

    #[instrument(name = "flight_reports.service.get_report", skip(self), fields(report_id = %id))]
    pub fn get_report(&self, id: Uuid) -> Result<Report, DomainError> {
        debug!("Getting report by id");
        self.store
            .lock()
            .find(id)
            .cloned()
            .ok_or_else(|| DomainError::report_not_found(id))
    }

    #[instrument(
        name = "flight_reports.service.create_report",
        skip(self, new_report),
        fields(title = %new_report.title)
    )]
    pub fn create_report(&self, new_report: NewReport) -> Result<Report, DomainError> {
        info!("Creating new report");

        let title = normalize_title(&new_report.title)?;
        let description = new_report
            .description
            .as_deref()
            .and_then(normalize_description);
        let flight_ids = self.retain_known_flights(&new_report.flight_ids);

        let report = Report {
            id: Uuid::new_v4(),
            title,
            description,
            flight_ids,
            created_utc: Utc::now(),
            updated_utc: None,
        };

        let mut store = self.store.lock();
        store.insert(report.clone());
        persist_best_effort(&store);

        info!("Successfully created report with id={}", report.id);
        Ok(report)
    }

    #[instrument(
        name = "flight_reports.service.update_report",
        skip(self, patch),
        fields(report_id = %id)
    )]
    pub fn update_report(&self, id: Uuid, patch: ReportPatch) -> Result<Report, DomainError> {
        info!("Updating report");

        let mut store = self.store.lock();
        let mut report = store
            .find(id)
            .cloned()
            .ok_or_else(|| DomainError::report_not_found(id))?;

        // Blank title means "no change", unlike description below.
        if let Some(title) = patch.title.as_deref() {
            let trimmed = title.trim();
            if !trimmed.is_empty() {
                report.title = trimmed.to_string();
            }
        }

        // A present description always replaces; blank normalizes to None.
        if let Some(description) = patch.description.as_deref() {
            report.description = normalize_description(description);
        }

        // A present list always replaces; an empty list clears.
        if let Some(flight_ids) = patch.flight_ids {
            report.flight_ids = self.retain_known_flights(&flight_ids);
        }

        // Refreshed even when no field actually changed.
        report.updated_utc = Some(Utc::now());

        store.replace(report.clone());
        persist_best_effort(&store);

        info!("Successfully updated report");
        Ok(report)
    }

    /// Keep only ids present in the catalog, dropping duplicates
    /// (first occurrence wins).
    fn retain_known_flights(&self, ids: &[Uuid]) -> Vec<Uuid> {
        let mut seen = HashSet::new();
        ids.iter()
            .filter(|id| self.catalog.contains(**id))
            .filter(|id| seen.insert(**id))
            .copied()
            .collect()
    }
}

fn normalize_title(raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::title_required());
    }
    Ok(trimmed.to_string())
}

/// Trim a description; empty after trimming means "absent".
fn normalize_description(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// The in-memory state is authoritative; a failed write is logged and
/// swallowed, never surfaced to the caller.
fn persist_best_effort(store: &ReportStore) {
    if let Err(e) = store.persist() {
        warn!("Failed to persist report collection: {}", e);
    }
}
