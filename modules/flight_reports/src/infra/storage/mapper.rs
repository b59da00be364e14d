use crate::domain::model::{Flight, Report};
use crate::infra::storage::entity::{FlightRecord, ReportRecord};

// Conversions between storage records and domain models

impl From<FlightRecord> for Flight {
    fn from(record: FlightRecord) -> Self {
        Self {
            id: record.id,
            number: record.number,
            origin: record.origin,
            destination: record.destination,
            departure_utc: record.departure_utc,
            arrival_utc: record.arrival_utc,
            status: record.status,
        }
    }
}

impl From<&Flight> for FlightRecord {
    fn from(flight: &Flight) -> Self {
        Self {
            id: flight.id,
            number: flight.number.clone(),
            origin: flight.origin.clone(),
            destination: flight.destination.clone(),
            departure_utc: flight.departure_utc,
            arrival_utc: flight.arrival_utc,
            status: flight.status.clone(),
        }
    }
}

impl From<ReportRecord> for Report {
    fn from(record: ReportRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            flight_ids: record.flight_ids,
            created_utc: record.created_utc,
            updated_utc: record.updated_utc,
        }
    }
}

impl From<&Report> for ReportRecord {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id,
            title: report.title.clone(),
            description: report.description.clone(),
            flight_ids: report.flight_ids.clone(),
            created_utc: report.created_utc,
            updated_utc: report.updated_utc,
        }
    }
}
