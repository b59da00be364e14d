use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::{TimeZone, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::model::Flight;
use crate::infra::storage::entity::FlightRecord;

/// The read-only flight catalog, loaded once at startup.
pub struct FlightCatalog {
    flights: Vec<Flight>,
}

impl FlightCatalog {
    /// Load the catalog from `path`.
    ///
    /// A file that exists and parses to a non-empty list is used verbatim.
    /// Anything else (missing, empty, corrupt) is an all-or-nothing failure:
    /// with `strict` the error propagates and startup aborts, otherwise a
    /// built-in sample catalog is substituted.
    pub fn load(path: &Path, strict: bool) -> Result<Self> {
        match read_catalog_file(path) {
            Ok(flights) => {
                info!(
                    "Loaded {} flight(s) from '{}'",
                    flights.len(),
                    path.display()
                );
                Ok(Self { flights })
            }
            Err(e) if strict => {
                Err(e).with_context(|| format!("Flight catalog '{}' unusable", path.display()))
            }
            Err(e) => {
                warn!(
                    "Flight catalog '{}' unusable ({:#}); substituting sample catalog",
                    path.display(),
                    e
                );
                Ok(Self::sample())
            }
        }
    }

    /// Built-in fallback catalog: three sample flights with fresh ids.
    pub fn sample() -> Self {
        let flights = vec![
            sample_flight(
                "FL100",
                "JFK",
                "LAX",
                (2025, 9, 5, 8, 15),
                (2025, 9, 5, 11, 10),
                "On Time",
            ),
            sample_flight(
                "FL200",
                "LAX",
                "ORD",
                (2025, 9, 5, 12, 30),
                (2025, 9, 5, 16, 5),
                "Delayed",
            ),
            sample_flight(
                "FL300",
                "SEA",
                "DEN",
                (2025, 9, 5, 9, 45),
                (2025, 9, 5, 13, 0),
                "Boarding",
            ),
        ];
        Self { flights }
    }

    /// Build a catalog directly from flights; used by tests and tooling.
    pub fn from_flights(flights: Vec<Flight>) -> Self {
        Self { flights }
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn get(&self, id: Uuid) -> Option<&Flight> {
        self.flights.iter().find(|f| f.id == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.flights.iter().any(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }
}

/// Read and parse the catalog document. All-or-nothing: any failure
/// discards the whole attempt.
fn read_catalog_file(path: &Path) -> Result<Vec<Flight>> {
    if !path.exists() {
        return Err(anyhow!("catalog file not found"));
    }

    let raw = std::fs::read_to_string(path).context("failed to read catalog file")?;
    let records: Vec<FlightRecord> =
        serde_json::from_str(&raw).context("failed to parse catalog file")?;

    if records.is_empty() {
        return Err(anyhow!("catalog file contains no flights"));
    }

    Ok(records.into_iter().map(Flight::from).collect())
}

fn sample_flight(
    number: &str,
    origin: &str,
    destination: &str,
    dep: (i32, u32, u32, u32, u32),
    arr: (i32, u32, u32, u32, u32),
    status: &str,
) -> Flight {
    Flight {
        id: Uuid::new_v4(),
        number: number.to_string(),
        origin: origin.to_string(),
        destination: destination.to_string(),
        departure_utc: Utc
            .with_ymd_and_hms(dep.0, dep.1, dep.2, dep.3, dep.4, 0)
            .unwrap(),
        arrival_utc: Utc
            .with_ymd_and_hms(arr.0, arr.1, arr.2, arr.3, arr.4, 0)
            .unwrap(),
        status: status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_catalog(dir: &Path, records: &[FlightRecord]) -> std::path::PathBuf {
        let path = dir.join("flights.json");
        std::fs::write(&path, serde_json::to_string_pretty(records).unwrap()).unwrap();
        path
    }

    fn record(number: &str) -> FlightRecord {
        FlightRecord::from(&sample_flight(
            number,
            "JFK",
            "LAX",
            (2025, 9, 5, 8, 15),
            (2025, 9, 5, 11, 10),
            "On Time",
        ))
    }

    #[test]
    fn test_load_well_formed_catalog_verbatim() {
        let tmp = tempfile::tempdir().unwrap();
        let records = vec![record("AA10"), record("AA20")];
        let path = write_catalog(tmp.path(), &records);

        let catalog = FlightCatalog::load(&path, true).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.flights()[0].number, "AA10");
        assert_eq!(catalog.flights()[1].number, "AA20");
        assert!(catalog.contains(records[0].id));
    }

    #[test]
    fn test_strict_load_fails_on_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("flights.json");

        assert!(FlightCatalog::load(&path, true).is_err());
    }

    #[test]
    fn test_strict_load_fails_on_empty_catalog() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_catalog(tmp.path(), &[]);

        assert!(FlightCatalog::load(&path, true).is_err());
    }

    #[test]
    fn test_strict_load_fails_on_corrupt_catalog() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("flights.json");
        std::fs::write(&path, "[{\"id\": \"not-a-uuid\"}]").unwrap();

        assert!(FlightCatalog::load(&path, true).is_err());
    }

    #[test]
    fn test_lenient_load_falls_back_to_sample_catalog() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("flights.json");

        let catalog = FlightCatalog::load(&path, false).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.flights()[0].number, "FL100");
        assert_eq!(catalog.flights()[2].status, "Boarding");
    }

    #[test]
    fn test_sample_catalog_ids_are_fresh() {
        let a = FlightCatalog::sample();
        let b = FlightCatalog::sample();
        assert_ne!(a.flights()[0].id, b.flights()[0].id);
    }

    #[test]
    fn test_get_by_id() {
        let catalog = FlightCatalog::sample();
        let id = catalog.flights()[1].id;
        assert_eq!(catalog.get(id).unwrap().number, "FL200");
        assert!(catalog.get(Uuid::new_v4()).is_none());
    }
}
