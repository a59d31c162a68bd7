use crate::domain::vehicle::VehicleKind;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub const EMPTY_FLEET_MESSAGE: &str = "Fleet Report: The fleet is currently empty.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceEntry {
    pub id: String,
    pub mileage: f64,
}

/// Aggregate view of the fleet. `Display` renders the text report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetReport {
    pub total_vehicles: usize,
    pub by_kind: BTreeMap<VehicleKind, usize>,
    /// Mean over fuel users with positive efficiency, 0 when there are none.
    pub average_fuel_efficiency: f64,
    pub total_mileage: f64,
    pub needing_maintenance: Vec<MaintenanceEntry>,
}

impl FleetReport {
    pub fn is_empty(&self) -> bool {
        self.total_vehicles == 0
    }
}

impl fmt::Display for FleetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(EMPTY_FLEET_MESSAGE);
        }

        writeln!(f, "================ FLEET REPORT ================")?;
        writeln!(f, "Total Vehicles: {}", self.total_vehicles)?;
        writeln!(f)?;
        writeln!(f, "Vehicles by Type:")?;
        for (kind, count) in &self.by_kind {
            writeln!(f, "  - {}: {}", kind, count)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Average Fuel Efficiency: {:.2} km/l",
            self.average_fuel_efficiency
        )?;
        writeln!(f, "Total Fleet Mileage: {:.1} km", self.total_mileage)?;
        writeln!(f)?;
        writeln!(f, "Maintenance Status:")?;
        if self.needing_maintenance.is_empty() {
            writeln!(f, "  All vehicles are in good condition.")?;
        } else {
            writeln!(
                f,
                "  Vehicles needing maintenance: {}",
                self.needing_maintenance.len()
            )?;
            for entry in &self.needing_maintenance {
                writeln!(f, "    - ID: {}, Mileage: {:.1} km", entry.id, entry.mileage)?;
            }
        }
        write!(f, "==============================================")
    }
}
