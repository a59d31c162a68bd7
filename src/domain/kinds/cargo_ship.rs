use super::format_real;
use crate::domain::capability::{
    CargoCarrier, CargoHold, FuelConsumable, FuelTank, Maintainable, MaintenanceLog,
};
use crate::domain::vehicle::{
    ensure_positive_distance, travel_on_fuel, Vehicle, VehicleBase, VehicleKind,
};
use crate::utils::error::{FleetError, Result};

/// A sailing ship carries a tank it never uses; only motor ships burn fuel.
#[derive(Debug, Clone)]
pub struct CargoShip {
    base: VehicleBase,
    has_sail: bool,
    tank: FuelTank,
    hold: CargoHold,
    maintenance: MaintenanceLog,
}

impl CargoShip {
    pub const MOTOR_EFFICIENCY: f64 = 4.0;
    pub const CARGO_CAPACITY: f64 = 50_000.0;
    /// Fuel a motor ship starts with. Not persisted.
    pub const MOTOR_STARTING_FUEL: f64 = 50_000.0;

    pub fn new(
        id: impl Into<String>,
        model: impl Into<String>,
        max_speed: f64,
        has_sail: bool,
    ) -> Result<Self> {
        Ok(Self::restore(
            VehicleBase::new(id, model, max_speed)?,
            has_sail,
            CargoHold::new(Self::CARGO_CAPACITY),
        ))
    }

    pub(crate) fn restore(base: VehicleBase, has_sail: bool, hold: CargoHold) -> Self {
        let starting_fuel = if has_sail {
            0.0
        } else {
            Self::MOTOR_STARTING_FUEL
        };
        Self {
            base,
            has_sail,
            tank: FuelTank::new(starting_fuel),
            hold,
            maintenance: MaintenanceLog::default(),
        }
    }

    pub fn has_sail(&self) -> bool {
        self.has_sail
    }
}

impl Vehicle for CargoShip {
    fn base(&self) -> &VehicleBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut VehicleBase {
        &mut self.base
    }

    fn kind(&self) -> VehicleKind {
        VehicleKind::CargoShip
    }

    fn travel(&mut self, distance: f64) -> Result<()> {
        if self.has_sail {
            ensure_positive_distance(distance)?;
            self.base.add_mileage(distance);
        } else {
            travel_on_fuel(self, distance)?;
        }
        tracing::info!(
            "CargoShip {} is sailing with cargo for {:.1} km",
            self.base.id(),
            distance
        );
        Ok(())
    }

    fn fuel_efficiency(&self) -> f64 {
        if self.has_sail {
            0.0
        } else {
            Self::MOTOR_EFFICIENCY
        }
    }

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.kind().to_string(),
            self.base.id().to_string(),
            self.base.model().to_string(),
            format_real(self.base.max_speed()),
            self.has_sail.to_string(),
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

impl FuelConsumable for CargoShip {
    fn fuel_tank(&self) -> &FuelTank {
        &self.tank
    }

    fn fuel_tank_mut(&mut self) -> &mut FuelTank {
        &mut self.tank
    }

    fn refuel(&mut self, amount: f64) -> Result<()> {
        if self.has_sail {
            return Err(FleetError::invalid_operation(format!(
                "Cannot refuel sailing vessel {}",
                self.base.id()
            )));
        }
        self.tank.fill(amount)?;
        tracing::info!(
            "CargoShip {} refueled with {:.1} L, now {:.1} L",
            self.base.id(),
            amount,
            self.tank.level()
        );
        Ok(())
    }

    fn consume_fuel(&mut self, distance: f64) -> Result<f64> {
        if self.has_sail {
            return Ok(0.0);
        }
        self.tank
            .draw(self.base.id(), distance / Self::MOTOR_EFFICIENCY)
    }
}

impl CargoCarrier for CargoShip {
    fn hold(&self) -> &CargoHold {
        &self.hold
    }

    fn hold_mut(&mut self) -> &mut CargoHold {
        &mut self.hold
    }
}

impl Maintainable for CargoShip {
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
    fn test_sailing_ship_refuses_fuel() {
        let mut ship = CargoShip::new("S-002", "The Black Pearl", 30.0, true).unwrap();
        assert!(matches!(
            ship.refuel(10.0),
            Err(FleetError::InvalidOperation { .. })
        ));
        assert_eq!(ship.fuel_level(), 0.0);
        assert_eq!(ship.fuel_efficiency(), 0.0);
        assert_eq!(ship.consume_fuel(100.0).unwrap(), 0.0);
    }

    #[test]
    fn test_sailing_ship_moves_without_fuel() {
        let mut ship = CargoShip::new("S-002", "The Black Pearl", 30.0, true).unwrap();
        ship.travel(50.0).unwrap();
        assert_eq!(ship.current_mileage(), 50.0);
        assert_eq!(ship.fuel_level(), 0.0);
        assert!(ship.travel(0.0).is_err());
        assert_eq!(ship.current_mileage(), 50.0);
    }

    #[test]
    fn test_motor_ship_burns_fuel() {
        let mut ship = CargoShip::new("S-001", "Emma Maersk", 45.0, false).unwrap();
        assert_eq!(ship.fuel_level(), CargoShip::MOTOR_STARTING_FUEL);
        ship.travel(400.0).unwrap();
        assert!((ship.fuel_level() - 49_900.0).abs() < 1e-9);
        ship.refuel(100.0).unwrap();
        assert!((ship.fuel_level() - 50_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_water_journey_time() {
        let ship = CargoShip::new("S-001", "Emma Maersk", 40.0, false).unwrap();
        assert!((ship.estimate_journey_time(80.0) - 2.3).abs() < 1e-9);
    }

    #[test]
    fn test_csv_fields() {
        let ship = CargoShip::new("S-002", "The Black Pearl", 30.0, true).unwrap();
        assert_eq!(
            ship.csv_fields().join(","),
            "CargoShip,S-002,The Black Pearl,30.0,true,50000.0,0.0"
        );
    }
}
