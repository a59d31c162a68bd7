use super::format_real;
use crate::domain::capability::{
    CargoCarrier, CargoHold, FuelConsumable, FuelTank, Maintainable, MaintenanceLog,
};
use crate::domain::vehicle::{travel_on_fuel, Vehicle, VehicleBase, VehicleKind};
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct Truck {
    base: VehicleBase,
    num_wheels: u32,
    tank: FuelTank,
    hold: CargoHold,
    maintenance: MaintenanceLog,
}

impl Truck {
    pub const WHEELS: u32 = 8;
    pub const CARGO_CAPACITY: f64 = 5000.0;
    pub const BASE_EFFICIENCY: f64 = 8.0;
    /// Efficiency multiplier once the hold is more than half full.
    pub const HEAVY_LOAD_FACTOR: f64 = 0.9;

    pub fn new(id: impl Into<String>, model: impl Into<String>, max_speed: f64) -> Result<Self> {
        Ok(Self::restore(
            VehicleBase::new(id, model, max_speed)?,
            Self::WHEELS,
            FuelTank::default(),
            CargoHold::new(Self::CARGO_CAPACITY),
        ))
    }

    pub(crate) fn restore(
        base: VehicleBase,
        num_wheels: u32,
        tank: FuelTank,
        hold: CargoHold,
    ) -> Self {
        Self {
            base,
            num_wheels,
            tank,
            hold,
            maintenance: MaintenanceLog::default(),
        }
    }

    pub fn num_wheels(&self) -> u32 {
        self.num_wheels
    }

    fn heavily_loaded(&self) -> bool {
        self.hold.current() > self.hold.capacity() * 0.5
    }
}

impl Vehicle for Truck {
    fn base(&self) -> &VehicleBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut VehicleBase {
        &mut self.base
    }

    fn kind(&self) -> VehicleKind {
        VehicleKind::Truck
    }

    fn travel(&mut self, distance: f64) -> Result<()> {
        travel_on_fuel(self, distance)?;
        tracing::info!(
            "Truck {} is hauling cargo for {:.1} km",
            self.base.id(),
            distance
        );
        Ok(())
    }

    fn fuel_efficiency(&self) -> f64 {
        if self.heavily_loaded() {
            Self::BASE_EFFICIENCY * Self::HEAVY_LOAD_FACTOR
        } else {
            Self::BASE_EFFICIENCY
        }
    }

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.kind().to_string(),
            self.base.id().to_string(),
            self.base.model().to_string(),
            format_real(self.base.max_speed()),
            self.num_wheels.to_string(),
            format_real(self.tank.level()),
            format_real(self.hold.capacity()),
            format_real(self.hold.current()),
        ]
    }

    fn as_fuel_consumable(&self) -> Option<&dyn FuelConsumable> {
        Some(self)
    }

    fn as_fuel_consumable_mut(&mut self) -> Option<&mut dyn FuelConsumable> {
        Some(self)
    }

    fn as_cargo_carrier(&self) -> Option<&dyn CargoCarrier> {
        Some(self)
    }

    fn as_cargo_carrier_mut(&mut self) -> Option<&mut dyn CargoCarrier> {
        Some(self)
    }

    fn as_maintainable(&self) -> Option<&dyn Maintainable> {
        Some(self)
    }

    fn as_maintainable_mut(&mut self) -> Option<&mut dyn Maintainable> {
        Some(self)
    }
}

impl FuelConsumable for Truck {
    fn fuel_tank(&self) -> &FuelTank {
        &self.tank
    }

    fn fuel_tank_mut(&mut self) -> &mut FuelTank {
        &mut self.tank
    }
}

impl CargoCarrier for Truck {
    fn hold(&self) -> &CargoHold {
        &self.hold
    }

    fn hold_mut(&mut self) -> &mut CargoHold {
        &mut self.hold
    }
}

impl Maintainable for Truck {
    fn maintenance_log(&self) -> &MaintenanceLog {
        &self.maintenance
    }

    fn maintenance_log_mut(&mut self) -> &mut MaintenanceLog {
        &mut self.maintenance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FleetError;

    #[test]
    fn test_efficiency_drops_above_half_load() {
        let mut truck = Truck::new("T-001", "Volvo FH16", 140.0).unwrap();
        assert_eq!(truck.fuel_efficiency(), 8.0);

        truck.load_cargo(2500.0).unwrap();
        assert_eq!(truck.fuel_efficiency(), 8.0);

        truck.load_cargo(500.0).unwrap();
        assert!((truck.fuel_efficiency() - 7.2).abs() < 1e-12);

        truck.unload_cargo(3000.0).unwrap();
        assert_eq!(truck.fuel_efficiency(), 8.0);
    }

    #[test]
    fn test_loaded_truck_burns_ten_litres_over_72_km() {
        let mut truck = Truck::new("T-001", "Volvo FH16", 140.0).unwrap();
        truck.load_cargo(3000.0).unwrap();
        truck.refuel(50.0).unwrap();
        truck.travel(72.0).unwrap();
        assert!((truck.fuel_level() - 40.0).abs() < 1e-9);
        assert_eq!(truck.current_mileage(), 72.0);
    }

    #[test]
    fn test_cargo_limits() {
        let mut truck = Truck::new("T-001", "Volvo FH16", 140.0).unwrap();
        assert!(matches!(
            truck.load_cargo(5000.5),
            Err(FleetError::Overload { .. })
        ));
        assert!(matches!(
            truck.unload_cargo(1.0),
            Err(FleetError::InvalidOperation { .. })
        ));
        assert_eq!(truck.current_cargo(), 0.0);
    }

    #[test]
    fn test_csv_fields() {
        let mut truck = Truck::new("T-001", "Volvo FH16", 140.0).unwrap();
        truck.load_cargo(1200.5).unwrap();
        assert_eq!(
            truck.csv_fields().join(","),
            "Truck,T-001,Volvo FH16,140.0,8,0.0,5000.0,1200.5"
        );
    }
}
