// === PUBLIC SURFACE ===
// The REST router plus the domain service it runs on.
pub mod api;
pub mod domain;
pub mod infra;

pub use domain::service::Service;
pub use infra::catalog::FlightCatalog;
pub use infra::storage::ReportStore;
