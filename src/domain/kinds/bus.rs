use super::format_real;
use crate::domain::capability::{
    CargoCarrier, CargoHold, FuelConsumable, FuelTank, Maintainable, MaintenanceLog,
    PassengerCabin, PassengerCarrier,
};
use crate::domain::vehicle::{travel_on_fuel, Vehicle, VehicleBase, VehicleKind};
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct Bus {
    base: VehicleBase,
    num_wheels: u32,
    tank: FuelTank,
    cabin: PassengerCabin,
    hold: CargoHold,
    maintenance: MaintenanceLog,
}

impl Bus {
    pub const WHEELS: u32 = 6;
    pub const EFFICIENCY: f64 = 10.0;
    pub const PASSENGER_CAPACITY: u32 = 50;
    pub const CARGO_CAPACITY: f64 = 500.0;

    pub fn new(id: impl Into<String>, model: impl Into<String>, max_speed: f64) -> Result<Self> {
        Ok(Self::restore(
            VehicleBase::new(id, model, max_speed)?,
            Self::WHEELS,
            FuelTank::default(),
            PassengerCabin::new(Self::PASSENGER_CAPACITY),
            CargoHold::new(Self::CARGO_CAPACITY),
        ))
    }

    pub(crate) fn restore(
        base: VehicleBase,
        num_wheels: u32,
        tank: FuelTank,
        cabin: PassengerCabin,
        hold: CargoHold,
    ) -> Self {
        Self {
            base,
            num_wheels,
            tank,
            cabin,
            hold,
            maintenance: MaintenanceLog::default(),
        }
    }

    pub fn num_wheels(&self) -> u32 {
        self.num_wheels
    }
}

impl Vehicle for Bus {
    fn base(&self) -> &VehicleBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut VehicleBase {
        &mut self.base
    }

    fn kind(&self) -> VehicleKind {
        VehicleKind::Bus
    }

    fn travel(&mut self, distance: f64) -> Result<()> {
        travel_on_fuel(self, distance)?;
        tracing::info!(
            "Bus {} is transporting passengers and cargo for {:.1} km",
            self.base.id(),
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
            self.num_wheels.to_string(),
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

impl FuelConsumable for Bus {
    fn fuel_tank(&self) -> &FuelTank {
        &self.tank
    }

    fn fuel_tank_mut(&mut self) -> &mut FuelTank {
        &mut self.tank
    }
}

impl PassengerCarrier for Bus {
    fn cabin(&self) -> &PassengerCabin {
        &self.cabin
    }

    fn cabin_mut(&mut self) -> &mut PassengerCabin {
        &mut self.cabin
    }
}

impl CargoCarrier for Bus {
    fn hold(&self) -> &CargoHold {
        &self.hold
    }

    fn hold_mut(&mut self) -> &mut CargoHold {
        &mut self.hold
    }
}

impl Maintainable for Bus {
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
    fn test_bus_carries_both() {
        let mut bus = Bus::new("B-001", "Mercedes-Benz Tourismo", 150.0).unwrap();
        bus.board_passengers(50).unwrap();
        assert!(matches!(
            bus.board_passengers(1),
            Err(FleetError::Overload { .. })
        ));
        bus.load_cargo(500.0).unwrap();
        assert!(matches!(bus.load_cargo(1.0), Err(FleetError::Overload { .. })));
        assert_eq!(bus.fuel_efficiency(), 10.0);
    }

    #[test]
    fn test_maintenance_flag_and_mileage_trigger() {
        let mut bus = Bus::new("B-001", "Mercedes-Benz Tourismo", 150.0).unwrap();
        assert!(!bus.needs_maintenance());

        bus.schedule_maintenance();
        assert!(bus.needs_maintenance());
        bus.perform_maintenance();
        assert!(!bus.needs_maintenance());

        bus.refuel(2000.0).unwrap();
        bus.travel(10_000.5).unwrap();
        assert!(bus.needs_maintenance());
        bus.perform_maintenance();
        assert!(bus.needs_maintenance());
        assert_eq!(bus.current_mileage(), 10_000.5);
    }

    #[test]
    fn test_csv_fields() {
        let mut bus = Bus::new("B-001", "Tourismo", 150.0).unwrap();
        bus.refuel(80.0).unwrap();
        bus.board_passengers(12).unwrap();
        bus.load_cargo(75.0).unwrap();
        assert_eq!(
            bus.csv_fields().join(","),
            "Bus,B-001,Tourismo,150.0,6,80.0,50,12,500.0,75.0"
        );
    }
}
