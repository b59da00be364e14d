use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Title is required")]
    TitleRequired,

    #[error("Report not found: {id}")]
    ReportNotFound { id: Uuid },

    #[error("Flight not found: {id}")]
    FlightNotFound { id: Uuid },
}

impl DomainError {
    pub fn title_required() -> Self {
        Self::TitleRequired
    }

    pub fn report_not_found(id: Uuid) -> Self {
        Self::ReportNotFound { id }
    }

    pub fn flight_not_found(id: Uuid) -> Self {
        Self::FlightNotFound { id }
    }
}
