use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Scheduled-flight record from the read-only catalog (no serde; wire and
/// storage representations live in their own layers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flight {
    pub id: Uuid,
    pub number: String,
    pub origin: String,
    pub destination: String,
    pub departure_utc: DateTime<Utc>,
    pub arrival_utc: DateTime<Utc>,
    pub status: String,
}

/// User-created aggregation referencing zero or more catalog flights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Set semantics: no duplicates, every id existed in the catalog when written.
    pub flight_ids: Vec<Uuid>,
    pub created_utc: DateTime<Utc>,
    /// None until the first update.
    pub updated_utc: Option<DateTime<Utc>>,
}

/// Data for creating a new report
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewReport {
    pub title: String,
    pub description: Option<String>,
    pub flight_ids: Vec<Uuid>,
}

/// Partial update data for a report.
///
/// The three fields patch differently on purpose:
/// - `title`: blank or absent means "no change"
/// - `description`: present (even blank) replaces, absent means "no change"
/// - `flight_ids`: present (even empty) replaces, absent means "no change"
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub flight_ids: Option<Vec<Uuid>>,
}
