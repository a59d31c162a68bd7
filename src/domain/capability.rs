//! Optional behaviour contracts a vehicle kind can opt into.
//!
//! Each capability owns a small state record (tank, cabin, hold, log) that a
//! kind embeds next to its [`VehicleBase`](crate::domain::vehicle::VehicleBase).
//! The trait default methods carry the shared rules so a kind only wires up
//! accessors and overrides what it does differently.

use crate::domain::vehicle::Vehicle;
use crate::utils::error::{FleetError, Result};
use serde::Serialize;
use std::fmt;

/// Mileage above which a vehicle reports it needs maintenance.
pub const MAINTENANCE_MILEAGE_THRESHOLD: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Capability {
    FuelConsumable,
    PassengerCarrier,
    CargoCarrier,
    Maintainable,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::FuelConsumable,
        Capability::PassengerCarrier,
        Capability::CargoCarrier,
        Capability::Maintainable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::FuelConsumable => "FuelConsumable",
            Capability::PassengerCarrier => "PassengerCarrier",
            Capability::CargoCarrier => "CargoCarrier",
            Capability::Maintainable => "Maintainable",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unbounded tank that can never go below empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuelTank {
    level: f64,
}

impl FuelTank {
    pub fn new(level: f64) -> Self {
        Self { level }
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn fill(&mut self, amount: f64) -> Result<()> {
        if amount.is_nan() || amount <= 0.0 || amount.is_infinite() {
            return Err(FleetError::invalid_operation(format!(
                "Refuel amount must be positive, got {}",
                amount
            )));
        }
        self.level += amount;
        Ok(())
    }

    /// Removes `amount` litres, failing instead of going below empty.
    pub fn draw(&mut self, owner: &str, amount: f64) -> Result<f64> {
        if amount > self.level {
            return Err(FleetError::InsufficientFuel {
                id: owner.to_string(),
                needed: amount,
                available: self.level,
            });
        }
        self.level -= amount;
        Ok(amount)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PassengerCabin {
    capacity: u32,
    current: u32,
}

impl PassengerCabin {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            current: 0,
        }
    }

    /// Cabin restored with passengers already aboard.
    pub fn with_occupancy(capacity: u32, current: u32) -> Result<Self> {
        let mut cabin = Self::new(capacity);
        cabin.board(current)?;
        Ok(cabin)
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn board(&mut self, count: u32) -> Result<()> {
        match self.current.checked_add(count) {
            Some(total) if total <= self.capacity => {
                self.current = total;
                Ok(())
            }
            _ => Err(FleetError::overload(format!(
                "Passenger capacity exceeded: {} aboard, {} boarding, capacity {}",
                self.current, count, self.capacity
            ))),
        }
    }

    pub fn disembark(&mut self, count: u32) -> Result<()> {
        if count > self.current {
            return Err(FleetError::invalid_operation(format!(
                "Cannot disembark {} passengers, only {} on board",
                count, self.current
            )));
        }
        self.current -= count;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CargoHold {
    capacity: f64,
    current: f64,
}

impl CargoHold {
    pub fn new(capacity: f64) -> Self {
        Self {
            capacity,
            current: 0.0,
        }
    }

    /// Hold restored with cargo already loaded.
    pub fn with_load(capacity: f64, current: f64) -> Result<Self> {
        if capacity.is_nan() || capacity <= 0.0 || capacity.is_infinite() {
            return Err(FleetError::invalid_operation(format!(
                "Cargo capacity must be positive, got {}",
                capacity
            )));
        }
        let mut hold = Self::new(capacity);
        hold.load(current)?;
        Ok(hold)
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn load(&mut self, weight: f64) -> Result<()> {
        ensure_weight(weight)?;
        if self.current + weight > self.capacity {
            return Err(FleetError::overload(format!(
                "Cargo capacity exceeded: {} kg loaded, {} kg more, capacity {} kg",
                self.current, weight, self.capacity
            )));
        }
        self.current += weight;
        Ok(())
    }

    pub fn unload(&mut self, weight: f64) -> Result<()> {
        ensure_weight(weight)?;
        if weight > self.current {
            return Err(FleetError::invalid_operation(format!(
                "Cannot unload {} kg, only {} kg loaded",
                weight, self.current
            )));
        }
        self.current -= weight;
        Ok(())
    }
}

fn ensure_weight(weight: f64) -> Result<()> {
    if weight.is_nan() || weight < 0.0 || weight.is_infinite() {
        return Err(FleetError::invalid_operation(format!(
            "Cargo weight must be a non-negative number, got {}",
            weight
        )));
    }
    Ok(())
}

/// Manual maintenance flag. The mileage trigger is evaluated on demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaintenanceLog {
    scheduled: bool,
}

impl MaintenanceLog {
    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }
}

pub trait FuelConsumable: Vehicle {
    fn fuel_tank(&self) -> &FuelTank;

    fn fuel_tank_mut(&mut self) -> &mut FuelTank;

    fn refuel(&mut self, amount: f64) -> Result<()> {
        self.fuel_tank_mut().fill(amount)?;
        tracing::info!(
            "{} {} refueled with {:.1} L, now {:.1} L",
            self.kind(),
            self.id(),
            amount,
            self.fuel_level()
        );
        Ok(())
    }

    fn fuel_level(&self) -> f64 {
        self.fuel_tank().level()
    }

    /// Burns the fuel needed for `distance` and returns the litres used.
    fn consume_fuel(&mut self, distance: f64) -> Result<f64> {
        let needed = distance / self.fuel_efficiency();
        let owner = self.id().to_owned();
        self.fuel_tank_mut().draw(&owner, needed)
    }
}

pub trait PassengerCarrier: Vehicle {
    fn cabin(&self) -> &PassengerCabin;

    fn cabin_mut(&mut self) -> &mut PassengerCabin;

    fn board_passengers(&mut self, count: u32) -> Result<()> {
        self.cabin_mut().board(count)
    }

    fn disembark_passengers(&mut self, count: u32) -> Result<()> {
        self.cabin_mut().disembark(count)
    }

    fn passenger_capacity(&self) -> u32 {
        self.cabin().capacity()
    }

    fn current_passengers(&self) -> u32 {
        self.cabin().current()
    }
}

pub trait CargoCarrier: Vehicle {
    fn hold(&self) -> &CargoHold;

    fn hold_mut(&mut self) -> &mut CargoHold;

    fn load_cargo(&mut self, weight: f64) -> Result<()> {
        self.hold_mut().load(weight)
    }

    fn unload_cargo(&mut self, weight: f64) -> Result<()> {
        self.hold_mut().unload(weight)
    }

    fn cargo_capacity(&self) -> f64 {
        self.hold().capacity()
    }

    fn current_cargo(&self) -> f64 {
        self.hold().current()
    }
}

pub trait Maintainable: Vehicle {
    fn maintenance_log(&self) -> &MaintenanceLog;

    fn maintenance_log_mut(&mut self) -> &mut MaintenanceLog;

    fn schedule_maintenance(&mut self) {
        self.maintenance_log_mut().scheduled = true;
    }

    fn needs_maintenance(&self) -> bool {
        self.maintenance_log().is_scheduled()
            || self.current_mileage() > MAINTENANCE_MILEAGE_THRESHOLD
    }

    /// Clears the manual flag only; the odometer is left alone.
    fn perform_maintenance(&mut self) {
        self.maintenance_log_mut().scheduled = false;
        tracing::info!("Maintenance performed on {} {}", self.kind(), self.id());
    }
}
