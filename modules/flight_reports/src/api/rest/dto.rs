use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::model::{Flight, NewReport, Report, ReportPatch};

/// REST DTO for a catalog flight
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDto {
    pub id: Uuid,
    pub number: String,
    pub origin: String,
    pub destination: String,
    pub departure_utc: DateTime<Utc>,
    pub arrival_utc: DateTime<Utc>,
    pub status: String,
}

/// REST DTO for a report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub flight_ids: Vec<Uuid>,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: Option<DateTime<Utc>>,
}

/// REST DTO for creating a report. The aliases accept the PascalCase
/// spellings established clients still send; a missing title is validated
/// downstream rather than rejected at deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportReq {
    #[serde(default, alias = "Title")]
    pub title: Option<String>,
    #[serde(default, alias = "Description")]
    pub description: Option<String>,
    #[serde(default, alias = "FlightIds")]
    pub flight_ids: Option<Vec<Uuid>>,
}

/// REST DTO for updating a report (partial)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportReq {
    #[serde(default, alias = "Title")]
    pub title: Option<String>,
    #[serde(default, alias = "Description")]
    pub description: Option<String>,
    #[serde(default, alias = "FlightIds")]
    pub flight_ids: Option<Vec<Uuid>>,
}

// Conversion implementations between REST DTOs and domain models

impl From<Flight> for FlightDto {
    fn from(flight: Flight) -> Self {
        Self {
            id: flight.id,
            number: flight.number,
            origin: flight.origin,
            destination: flight.destination,
            departure_utc: flight.departure_utc,
            arrival_utc: flight.arrival_utc,
            status: flight.status,
        }
    }
}

impl From<Report> for ReportDto {
    fn from(report: Report) -> Self {
        Self {
            id: report.id,
            title: report.title,
            description: report.description,
            flight_ids: report.flight_ids,
            created_utc: report.created_utc,
            updated_utc: report.updated_utc,
        }
    }
}

impl From<CreateReportReq> for NewReport {
    fn from(req: CreateReportReq) -> Self {
        Self {
            title: req.title.unwrap_or_default(),
            description: req.description,
            flight_ids: req.flight_ids.unwrap_or_default(),
        }
    }
}

impl From<UpdateReportReq> for ReportPatch {
    fn from(req: UpdateReportReq) -> Self {
        Self {
            title: req.title,
            description: req.description,
            flight_ids: req.flight_ids,
        }
    }
}
