use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted representation of a catalog flight. Field names are camelCase
/// so the on-disk documents match the wire shape exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    pub id: Uuid,
    pub number: String,
    pub origin: String,
    pub destination: String,
    pub departure_utc: DateTime<Utc>,
    pub arrival_utc: DateTime<Utc>,
    pub status: String,
}

/// Persisted representation of a report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub flight_ids: Vec<Uuid>,
    pub created_utc: DateTime<Utc>,
    #[serde(default)]
    pub updated_utc: Option<DateTime<Utc>>,
}
