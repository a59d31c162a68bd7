use crate::core::csv_codec::{decode_fleet, encode_fleet, SkippedRecord};
use crate::core::report::{FleetReport, MaintenanceEntry};
use crate::core::search::VehicleFilter;
use crate::domain::ports::Storage;
use crate::domain::vehicle::{compare_by_efficiency, Vehicle, VehicleKind};
use crate::utils::error::{FleetError, Result};
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct BulkFailure {
    pub id: String,
    pub error: FleetError,
}

/// Per-vehicle result of a best-effort operation over the whole fleet.
#[derive(Debug, Default)]
pub struct BulkOutcome {
    pub succeeded: Vec<String>,
    pub failures: Vec<BulkFailure>,
}

impl BulkOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, id: &str, result: Result<()>) {
        match result {
            Ok(()) => self.succeeded.push(id.to_string()),
            Err(error) => self.failures.push(BulkFailure {
                id: id.to_string(),
                error,
            }),
        }
    }
}

#[derive(Debug, Default)]
pub struct LoadSummary {
    pub loaded: usize,
    pub skipped: Vec<SkippedRecord>,
}

/// Owns the fleet. Ids are unique ignoring case; insertion order is kept
/// until [`FleetRegistry::sort_by_efficiency`] reorders it.
#[derive(Debug, Default)]
pub struct FleetRegistry {
    vehicles: Vec<Box<dyn Vehicle>>,
}

impl FleetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Box<dyn Vehicle>> {
        self.vehicles.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.vehicles.iter().map(|v| v.id()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&dyn Vehicle> {
        self.position(id).map(|index| self.vehicles[index].as_ref())
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut (dyn Vehicle + 'static)> {
        let index = self.position(id)?;
        Some(self.vehicles[index].as_mut())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.vehicles.iter().position(|v| v.base().matches_id(id))
    }

    pub fn add<V: Vehicle + 'static>(&mut self, vehicle: V) -> Result<()> {
        self.add_boxed(Box::new(vehicle))
    }

    pub fn add_boxed(&mut self, vehicle: Box<dyn Vehicle>) -> Result<()> {
        if self.contains(vehicle.id()) {
            return Err(FleetError::invalid_operation(format!(
                "Duplicate vehicle ID: {}. Cannot add vehicle.",
                vehicle.id()
            )));
        }
        tracing::info!("Vehicle {} added to the fleet", vehicle.id());
        self.vehicles.push(vehicle);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<Box<dyn Vehicle>> {
        let index = self.position(id).ok_or_else(|| {
            FleetError::invalid_operation(format!(
                "Vehicle with ID {} not found. Cannot remove.",
                id
            ))
        })?;
        let removed = self.vehicles.remove(index);
        tracing::info!("Vehicle {} removed from the fleet", removed.id());
        Ok(removed)
    }

    /// Refuels a single vehicle, surfacing any failure to the caller.
    pub fn refuel(&mut self, id: &str, amount: f64) -> Result<()> {
        let vehicle = self.require_mut(id)?;
        let kind = vehicle.kind();
        vehicle
            .as_fuel_consumable_mut()
            .ok_or_else(|| {
                FleetError::invalid_operation(format!("{} {} does not use fuel", kind, id))
            })?
            .refuel(amount)
    }

    pub fn schedule_maintenance(&mut self, id: &str) -> Result<()> {
        let vehicle = self.require_mut(id)?;
        let kind = vehicle.kind();
        vehicle
            .as_maintainable_mut()
            .ok_or_else(|| {
                FleetError::invalid_operation(format!("{} {} cannot be maintained", kind, id))
            })?
            .schedule_maintenance();
        Ok(())
    }

    fn require_mut(&mut self, id: &str) -> Result<&mut (dyn Vehicle + 'static)> {
        self.get_mut(id).ok_or_else(|| {
            FleetError::invalid_operation(format!("Vehicle with ID {} not found", id))
        })
    }

    /// Moves every vehicle independently; one failure never stops the rest.
    pub fn start_all_journeys(&mut self, distance: f64) -> BulkOutcome {
        tracing::info!("Starting all journeys for {} km", distance);
        let mut outcome = BulkOutcome::default();
        for vehicle in self.vehicles.iter_mut() {
            let result = vehicle.travel(distance);
            if let Err(e) = &result {
                tracing::warn!(
                    "Could not complete journey for vehicle {}: {}",
                    vehicle.id(),
                    e
                );
            }
            outcome.record(vehicle.id(), result);
        }
        tracing::info!(
            "All journeys concluded: {} completed, {} failed",
            outcome.succeeded.len(),
            outcome.failures.len()
        );
        outcome
    }

    /// Refuels every fuel-using vehicle with the same per-item isolation.
    pub fn refuel_all(&mut self, amount: f64) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();
        for vehicle in self.vehicles.iter_mut() {
            let id = vehicle.id().to_string();
            let Some(fuel_user) = vehicle.as_fuel_consumable_mut() else {
                continue;
            };
            let result = fuel_user.refuel(amount);
            if let Err(e) = &result {
                tracing::warn!("Could not refuel vehicle {}: {}", id, e);
            }
            outcome.record(&id, result);
        }
        tracing::info!(
            "Refueling complete: {} refueled, {} failed",
            outcome.succeeded.len(),
            outcome.failures.len()
        );
        outcome
    }

    /// Services every vehicle that reports it needs it. Returns their ids.
    pub fn maintain_all(&mut self) -> Vec<String> {
        let mut serviced = Vec::new();
        for vehicle in self.vehicles.iter_mut() {
            if let Some(maintainable) = vehicle.as_maintainable_mut() {
                if maintainable.needs_maintenance() {
                    maintainable.perform_maintenance();
                    serviced.push(maintainable.id().to_string());
                }
            }
        }
        tracing::info!("Maintenance checks complete, {} serviced", serviced.len());
        serviced
    }

    /// Litres the fleet would burn covering `distance` each in its current
    /// state. Vehicles with zero efficiency cost nothing.
    pub fn total_fuel_consumption(&self, distance: f64) -> f64 {
        self.vehicles
            .iter()
            .filter(|v| v.as_fuel_consumable().is_some())
            .map(|v| v.fuel_efficiency())
            .filter(|efficiency| *efficiency > 0.0)
            .map(|efficiency| distance / efficiency)
            .sum()
    }

    pub fn search(&self, filter: VehicleFilter) -> Vec<&dyn Vehicle> {
        self.vehicles
            .iter()
            .map(|v| v.as_ref())
            .filter(|v| filter.matches(*v))
            .collect()
    }

    pub fn vehicles_needing_maintenance(&self) -> Vec<&dyn Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| {
                v.as_maintainable()
                    .is_some_and(|maintainable| maintainable.needs_maintenance())
            })
            .map(|v| v.as_ref())
            .collect()
    }

    pub fn generate_report(&self) -> FleetReport {
        let mut by_kind: BTreeMap<VehicleKind, usize> = BTreeMap::new();
        for vehicle in &self.vehicles {
            *by_kind.entry(vehicle.kind()).or_insert(0) += 1;
        }

        let efficiencies: Vec<f64> = self
            .vehicles
            .iter()
            .filter(|v| v.as_fuel_consumable().is_some())
            .map(|v| v.fuel_efficiency())
            .filter(|efficiency| *efficiency > 0.0)
            .collect();
        let average_fuel_efficiency = if efficiencies.is_empty() {
            0.0
        } else {
            efficiencies.iter().sum::<f64>() / efficiencies.len() as f64
        };

        let needing_maintenance = self
            .vehicles_needing_maintenance()
            .into_iter()
            .map(|v| MaintenanceEntry {
                id: v.id().to_string(),
                mileage: v.current_mileage(),
            })
            .collect();

        FleetReport {
            total_vehicles: self.vehicles.len(),
            by_kind,
            average_fuel_efficiency,
            total_mileage: self.vehicles.iter().map(|v| v.current_mileage()).sum(),
            needing_maintenance,
        }
    }

    /// Most efficient first; equal vehicles keep their relative order.
    pub fn sort_by_efficiency(&mut self) {
        self.vehicles
            .sort_by(|a, b| compare_by_efficiency(a.as_ref(), b.as_ref()));
    }

    /// Writes one record per vehicle in current order. Returns the count.
    pub fn save<S: Storage>(&self, storage: &S, path: &str) -> Result<usize> {
        let data = encode_fleet(&self.vehicles)?;
        if let Err(e) = storage.write_file(path, &data) {
            tracing::error!("Error saving fleet to {}: {}", path, e);
            return Err(e);
        }
        tracing::info!("Fleet successfully saved to {}", path);
        Ok(self.vehicles.len())
    }

    /// Replaces the fleet with the file's contents, skipping bad records.
    ///
    /// The file is read before the fleet is cleared, so unlike a plain
    /// clear-then-read, an unreadable file leaves the current fleet intact.
    pub fn load<S: Storage>(&mut self, storage: &S, path: &str) -> Result<LoadSummary> {
        let data = match storage.read_file(path) {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("Error loading fleet from {}: {}", path, e);
                return Err(e);
            }
        };

        let decoded = decode_fleet(&data);
        let mut summary = LoadSummary {
            loaded: 0,
            skipped: decoded.skipped,
        };

        self.vehicles.clear();
        for (line, vehicle) in decoded.vehicles {
            if self.contains(vehicle.id()) {
                summary.skipped.push(SkippedRecord {
                    line,
                    content: vehicle.csv_fields().join(","),
                    reason: format!("duplicate vehicle ID {}", vehicle.id()),
                });
                continue;
            }
            self.vehicles.push(vehicle);
            summary.loaded += 1;
        }

        summary.skipped.sort_by_key(|skipped| skipped.line);
        for skipped in &summary.skipped {
            tracing::warn!(
                "Skipping malformed line {} in {}: {} ({})",
                skipped.line,
                path,
                skipped.content,
                skipped.reason
            );
        }
        tracing::info!(
            "Fleet loaded from {}: {} vehicles, {} skipped",
            path,
            summary.loaded,
            summary.skipped.len()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kinds::{Airplane, Bus, Car, CargoShip, Truck};
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                FleetError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn demo_fleet() -> FleetRegistry {
        let mut fleet = FleetRegistry::new();
        fleet.add(Car::new("C-001", "Toyota Camry", 180.0).unwrap()).unwrap();
        fleet.add(Truck::new("T-001", "Volvo FH16", 140.0).unwrap()).unwrap();
        fleet
            .add(Bus::new("B-001", "Mercedes-Benz Tourismo", 150.0).unwrap())
            .unwrap();
        fleet
            .add(Airplane::new("A-001", "Boeing 747", 900.0, 35_000.0).unwrap())
            .unwrap();
        fleet
            .add(CargoShip::new("S-001", "Emma Maersk", 45.0, false).unwrap())
            .unwrap();
        fleet
            .add(CargoShip::new("S-002", "The Black Pearl", 30.0, true).unwrap())
            .unwrap();
        fleet
    }

    #[test]
    fn test_duplicate_id_rejected_ignoring_case() {
        let mut fleet = FleetRegistry::new();
        fleet.add(Car::new("C-001", "Camry", 180.0).unwrap()).unwrap();
        let err = fleet
            .add(Car::new("c-001", "Corolla", 170.0).unwrap())
            .unwrap_err();
        assert!(matches!(err, FleetError::InvalidOperation { .. }));
        assert_eq!(fleet.len(), 1);
        assert_eq!(fleet.get("C-001").unwrap().model(), "Camry");
    }

    #[test]
    fn test_remove_matches_ignoring_case() {
        let mut fleet = demo_fleet();
        let removed = fleet.remove("t-001").unwrap();
        assert_eq!(removed.id(), "T-001");
        assert_eq!(fleet.len(), 5);
        assert!(matches!(
            fleet.remove("T-001"),
            Err(FleetError::InvalidOperation { .. })
        ));
    }

    #[test]
    fn test_journeys_continue_past_failures() {
        let mut fleet = demo_fleet();
        fleet.refuel("C-001", 50.0).unwrap();
        let outcome = fleet.start_all_journeys(100.0);

        assert_eq!(outcome.succeeded, vec!["C-001", "S-001", "S-002"]);
        let failed: Vec<&str> = outcome.failures.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(failed, vec!["T-001", "B-001", "A-001"]);
        assert!(outcome
            .failures
            .iter()
            .all(|f| matches!(f.error, FleetError::InsufficientFuel { .. })));
        assert_eq!(fleet.get("T-001").unwrap().current_mileage(), 0.0);
        assert_eq!(fleet.get("S-002").unwrap().current_mileage(), 100.0);
    }

    #[test]
    fn test_refuel_all_reports_sailing_ship() {
        let mut fleet = demo_fleet();
        let outcome = fleet.refuel_all(100.0);
        assert_eq!(outcome.succeeded.len(), 5);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].id, "S-002");
        assert_eq!(
            fleet
                .get("A-001")
                .unwrap()
                .as_fuel_consumable()
                .unwrap()
                .fuel_level(),
            100.0
        );
    }

    #[test]
    fn test_refuel_all_rejects_non_positive_amount_per_vehicle() {
        let mut fleet = demo_fleet();
        let outcome = fleet.refuel_all(0.0);
        assert!(outcome.succeeded.is_empty());
        assert_eq!(outcome.failures.len(), 6);
    }

    #[test]
    fn test_maintain_all_only_touches_flagged() {
        let mut fleet = demo_fleet();
        fleet.schedule_maintenance("B-001").unwrap();
        fleet.schedule_maintenance("S-002").unwrap();
        assert_eq!(fleet.vehicles_needing_maintenance().len(), 2);

        let serviced = fleet.maintain_all();
        assert_eq!(serviced, vec!["B-001", "S-002"]);
        assert!(fleet.vehicles_needing_maintenance().is_empty());
    }

    #[test]
    fn test_mileage_triggered_maintenance_survives_service() {
        let mut fleet = FleetRegistry::new();
        fleet
            .add(CargoShip::new("S-002", "The Black Pearl", 30.0, true).unwrap())
            .unwrap();
        fleet.start_all_journeys(10_001.0);
        assert_eq!(fleet.maintain_all(), vec!["S-002"]);
        assert_eq!(fleet.vehicles_needing_maintenance().len(), 1);
    }

    #[test]
    fn test_total_fuel_consumption_skips_sailing() {
        let fleet = demo_fleet();
        let expected = 120.0 / 15.0 + 120.0 / 8.0 + 120.0 / 10.0 + 120.0 / 5.0 + 120.0 / 4.0;
        assert!((fleet.total_fuel_consumption(120.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_search_by_kind_and_capability() {
        let fleet = demo_fleet();
        let ships = fleet.search(VehicleFilter::Kind(VehicleKind::CargoShip));
        assert_eq!(ships.len(), 2);

        let passengers: Vec<&str> = fleet
            .search("passengercarrier".parse().unwrap())
            .into_iter()
            .map(|v| v.id())
            .collect();
        assert_eq!(passengers, vec!["C-001", "B-001", "A-001"]);

        let cargo = fleet.search("CargoCarrier".parse().unwrap());
        assert_eq!(cargo.len(), 5);
    }

    #[test]
    fn test_report_aggregates() {
        let mut fleet = demo_fleet();
        fleet.schedule_maintenance("C-001").unwrap();
        let report = fleet.generate_report();

        assert_eq!(report.total_vehicles, 6);
        assert_eq!(report.by_kind[&VehicleKind::CargoShip], 2);
        assert_eq!(report.by_kind[&VehicleKind::Car], 1);
        let expected_average = (15.0 + 8.0 + 10.0 + 5.0 + 4.0) / 5.0;
        assert!((report.average_fuel_efficiency - expected_average).abs() < 1e-9);
        assert_eq!(report.total_mileage, 0.0);
        assert_eq!(report.needing_maintenance.len(), 1);
        assert_eq!(report.needing_maintenance[0].id, "C-001");
    }

    #[test]
    fn test_empty_report() {
        let report = FleetRegistry::new().generate_report();
        assert!(report.is_empty());
        assert_eq!(
            report.to_string(),
            crate::core::report::EMPTY_FLEET_MESSAGE
        );
    }

    #[test]
    fn test_sort_by_efficiency_is_stable() {
        let mut fleet = FleetRegistry::new();
        fleet.add(Truck::new("T-001", "FH16", 140.0).unwrap()).unwrap();
        fleet.add(Car::new("C-001", "Camry", 180.0).unwrap()).unwrap();
        fleet
            .add(CargoShip::new("S-002", "Pearl", 30.0, true).unwrap())
            .unwrap();
        fleet.add(Car::new("C-002", "Civic", 170.0).unwrap()).unwrap();
        fleet.add(Bus::new("B-001", "Tourismo", 150.0).unwrap()).unwrap();

        fleet.sort_by_efficiency();
        assert_eq!(fleet.ids(), vec!["C-001", "C-002", "B-001", "T-001", "S-002"]);
    }

    #[test]
    fn test_save_then_load_restores_state() {
        let storage = MockStorage::default();
        let mut fleet = demo_fleet();
        fleet.refuel("T-001", 64.25).unwrap();
        fleet
            .get_mut("T-001")
            .unwrap()
            .as_cargo_carrier_mut()
            .unwrap()
            .load_cargo(3000.0)
            .unwrap();
        assert_eq!(fleet.save(&storage, "fleet.csv").unwrap(), 6);

        let mut restored = FleetRegistry::new();
        let summary = restored.load(&storage, "fleet.csv").unwrap();
        assert_eq!(summary.loaded, 6);
        assert!(summary.skipped.is_empty());
        assert_eq!(restored.ids(), fleet.ids());

        let truck = restored.get("T-001").unwrap();
        assert_eq!(truck.as_fuel_consumable().unwrap().fuel_level(), 64.25);
        assert_eq!(truck.as_cargo_carrier().unwrap().current_cargo(), 3000.0);
        assert!((truck.fuel_efficiency() - 7.2).abs() < 1e-12);
    }

    #[test]
    fn test_load_replaces_contents_and_skips_duplicates() {
        let storage = MockStorage::default();
        storage
            .write_file(
                "fleet.csv",
                b"Car,C-001,Camry,180.0,4,0.0,5,0\nCar,c-001,Civic,170.0,4,0.0,5,0\nSpaceship,X-1,Falcon,9000.0\n",
            )
            .unwrap();

        let mut fleet = demo_fleet();
        let summary = fleet.load(&storage, "fleet.csv").unwrap();
        assert_eq!(fleet.ids(), vec!["C-001"]);
        assert_eq!(summary.loaded, 1);
        let lines: Vec<u64> = summary.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![2, 3]);
    }

    #[test]
    fn test_load_missing_file_keeps_fleet() {
        let storage = MockStorage::default();
        let mut fleet = demo_fleet();
        assert!(matches!(
            fleet.load(&storage, "missing.csv"),
            Err(FleetError::Io(_))
        ));
        assert_eq!(fleet.len(), 6);
    }
}
