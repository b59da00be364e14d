use std::sync::Arc;

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::Json,
    Extension,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::api::rest::dto::{CreateReportReq, FlightDto, ReportDto, UpdateReportReq};
use crate::api::rest::error::ApiError;
use crate::domain::service::Service;

/// List the full flight catalog
pub async fn list_flights(Extension(svc): Extension<Arc<Service>>) -> Json<Vec<FlightDto>> {
    let flights: Vec<FlightDto> = svc.list_flights().into_iter().map(FlightDto::from).collect();
    Json(flights)
}

/// Get a specific flight by ID
pub async fn get_flight(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> Result<Json<FlightDto>, ApiError> {
    match svc.get_flight(id) {
        Ok(flight) => Ok(Json(FlightDto::from(flight))),
        Err(e) => {
            error!("Failed to get flight {}: {}", id, e);
            Err(ApiError(e))
        }
    }
}

/// List all reports
pub async fn list_reports(Extension(svc): Extension<Arc<Service>>) -> Json<Vec<ReportDto>> {
    let reports: Vec<ReportDto> = svc.list_reports().into_iter().map(ReportDto::from).collect();
    Json(reports)
}

/// Get a specific report by ID
pub async fn get_report(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReportDto>, ApiError> {
    match svc.get_report(id) {
        Ok(report) => Ok(Json(ReportDto::from(report))),
        Err(e) => {
            error!("Failed to get report {}: {}", id, e);
            Err(ApiError(e))
        }
    }
}

/// Create a new report
pub async fn create_report(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<CreateReportReq>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<ReportDto>), ApiError> {
    info!("Creating report: {:?}", req);

    match svc.create_report(req.into()) {
        Ok(report) => {
            let location = format!("/api/reports/{}", report.id);
            Ok((
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(ReportDto::from(report)),
            ))
        }
        Err(e) => {
            error!("Failed to create report: {}", e);
            Err(ApiError(e))
        }
    }
}

/// Update an existing report
pub async fn update_report(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateReportReq>,
) -> Result<Json<ReportDto>, ApiError> {
    info!("Updating report {} with: {:?}", id, req);

    match svc.update_report(id, req.into()) {
        Ok(report) => Ok(Json(ReportDto::from(report))),
        Err(e) => {
            error!("Failed to update report {}: {}", id, e);
            Err(ApiError(e))
        }
    }
}
