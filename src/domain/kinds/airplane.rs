use super::format_real;
use crate::domain::capability::{
    CargoCarrier, CargoHold, FuelConsumable, FuelTank, Maintainable, MaintenanceLog,
    PassengerCabin, PassengerCarrier,
};
use crate::domain::vehicle::{travel_on_fuel, Vehicle, VehicleBase, VehicleKind};
use crate::utils::error::Result;
use crate::utils::validation::validate_positive;

#[derive(Debug, Clone)]
pub struct Airplane {
    base: VehicleBase,
    max_altitude: f64,
    tank: FuelTank,
    cabin: PassengerCabin,
    hold: CargoHold,
    maintenance: MaintenanceLog,
}

impl Airplane {
    pub const EFFICIENCY: f64 = 5.0;
    pub const PASSENGER_CAPACITY: u32 = 200;
    pub const CARGO_CAPACITY: f64 = 10_000.0;

    pub fn new(
        id: impl Into<String>,
        model: impl Into<String>,
        max_speed: f64,
        max_altitude: f64,
    ) -> Result<Self> {
        let base = VehicleBase::new(id, model, max_speed)?;
        validate_positive("max_altitude", max_altitude)?;
        Ok(Self::restore(
            base,
            max_altitude,
            FuelTank::default(),
            PassengerCabin::new(Self::PASSENGER_CAPACITY),
            CargoHold::new(Self::CARGO_CAPACITY),
        ))
    }

    pub(crate) fn restore(
        base: VehicleBase,
        max_altitude: f64,
        tank: FuelTank,
        cabin: PassengerCabin,
        hold: CargoHold,
    ) -> Self {
        Self {
            base,
            max_altitude,
            tank,
            cabin,
            hold,
            maintenance: MaintenanceLog::default(),
        }
    }

    pub fn max_altitude(&self) -> f64 {
        self.max_altitude
    }
}

impl Vehicle for Airplane {
    fn base(&self) -> &VehicleBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut VehicleBase {
        &mut self.base
    }

    fn kind(&self) -> VehicleKind {
        VehicleKind::Airplane
    }

    fn travel(&mut self, distance: f64) -> Result<()> {
        travel_on_fuel(self, distance)?;
        tracing::info!(
            "Airplane {} is flying at {:.0} ft for {:.1} km",
            self.base.id(),
            self.max_altitude,
            distance
        );
        Ok(())
    }

    fn fuel_efficiency(&self) -> f64 {
        Self::EFFICIENCY
    }

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.kind().to_string(),
            self.base.id().to_string(),
            self.base.model().to_string(),
            format_real(self.base.max_speed()),
            format_real(self.max_altitude),
            format_real(self.tank.level()),
            self.cabin.capacity().to_string(),
            self.cabin.current().to_string(),
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

    fn as_passenger_carrier(&self) -> Option<&dyn PassengerCarrier> {
        Some(self)
    }

    fn as_passenger_carrier_mut(&mut self) -> Option<&mut dyn PassengerCarrier> {
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

impl FuelConsumable for Airplane {
    fn fuel_tank(&self) -> &FuelTank {
        &self.tank
    }

    fn fuel_tank_mut(&mut self) -> &mut FuelTank {
        &mut self.tank
    }
}

impl PassengerCarrier for Airplane {
    fn cabin(&self) -> &PassengerCabin {
        &self.cabin
    }

    fn cabin_mut(&mut self) -> &mut PassengerCabin {
        &mut self.cabin
    }
}

impl CargoCarrier for Airplane {
    fn hold(&self) -> &CargoHold {
        &self.hold
    }

    fn hold_mut(&mut self) -> &mut CargoHold {
        &mut self.hold
    }
}

impl Maintainable for Airplane {
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

    #[test]
    fn test_air_journey_is_faster() {
        let plane = Airplane::new("A-001", "Boeing 747", 900.0, 35_000.0).unwrap();
        assert!((plane.estimate_journey_time(1800.0) - 1.9).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_positive_altitude() {
        assert!(Airplane::new("A-001", "Boeing 747", 900.0, 0.0).is_err());
    }

    #[test]
    fn test_flight_consumes_fuel() {
        let mut plane = Airplane::new("A-001", "Boeing 747", 900.0, 35_000.0).unwrap();
        plane.refuel(1000.0).unwrap();
        plane.travel(2500.0).unwrap();
        assert!((plane.fuel_level() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_csv_fields() {
        let plane = Airplane::new("A-001", "Boeing 747", 900.0, 35_000.0).unwrap();
        assert_eq!(
            plane.csv_fields().join(","),
            "Airplane,A-001,Boeing 747,900.0,35000.0,0.0,200,0,10000.0,0.0"
        );
    }
}
