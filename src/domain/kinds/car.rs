use super::format_real;
use crate::domain::capability::{
    FuelConsumable, FuelTank, Maintainable, MaintenanceLog, PassengerCabin, PassengerCarrier,
};
use crate::domain::vehicle::{travel_on_fuel, Vehicle, VehicleBase, VehicleKind};
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct Car {
    base: VehicleBase,
    num_wheels: u32,
    tank: FuelTank,
    cabin: PassengerCabin,
    maintenance: MaintenanceLog,
}

impl Car {
    pub const WHEELS: u32 = 4;
    pub const EFFICIENCY: f64 = 15.0;
    pub const PASSENGER_CAPACITY: u32 = 5;

    pub fn new(id: impl Into<String>, model: impl Into<String>, max_speed: f64) -> Result<Self> {
        Ok(Self::restore(
            VehicleBase::new(id, model, max_speed)?,
            Self::WHEELS,
            FuelTank::default(),
            PassengerCabin::new(Self::PASSENGER_CAPACITY),
        ))
    }

    pub(crate) fn restore(
        base: VehicleBase,
        num_wheels: u32,
        tank: FuelTank,
        cabin: PassengerCabin,
    ) -> Self {
        Self {
            base,
            num_wheels,
            tank,
            cabin,
            maintenance: MaintenanceLog::default(),
        }
    }

    pub fn num_wheels(&self) -> u32 {
        self.num_wheels
    }
}

impl Vehicle for Car {
    fn base(&self) -> &VehicleBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut VehicleBase {
        &mut self.base
    }

    fn kind(&self) -> VehicleKind {
        VehicleKind::Car
    }

    fn travel(&mut self, distance: f64) -> Result<()> {
        travel_on_fuel(self, distance)?;
        tracing::info!(
            "Car {} is driving on the road for {:.1} km",
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

    fn as_maintainable(&self) -> Option<&dyn Maintainable> {
        Some(self)
    }

    fn as_maintainable_mut(&mut self) -> Option<&mut dyn Maintainable> {
        Some(self)
    }
}

impl FuelConsumable for Car {
    fn fuel_tank(&self) -> &FuelTank {
        &self.tank
    }

    fn fuel_tank_mut(&mut self) -> &mut FuelTank {
        &mut self.tank
    }
}

impl PassengerCarrier for Car {
    fn cabin(&self) -> &PassengerCabin {
        &self.cabin
    }

    fn cabin_mut(&mut self) -> &mut PassengerCabin {
        &mut self.cabin
    }
}

impl Maintainable for Car {
    fn maintenance_log(&self) -> &MaintenanceLog {
        &self.maintenance
    }

    fn maintenance_log_mut(&mut self) -> &mut MaintenanceLog {
        &mut self.maintenance
    }
}
