//! The vehicle contract shared by every kind in the fleet.
//!
//! A concrete kind embeds a [`VehicleBase`] for identity and odometer state
//! and exposes its optional capabilities through the `as_*` probes, which
//! the registry uses to dispatch bulk operations.

use crate::domain::capability::{
    CargoCarrier, Capability, FuelConsumable, Maintainable, PassengerCarrier,
};
use crate::utils::error::{FleetError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_positive};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum VehicleKind {
    Car,
    Truck,
    Bus,
    Airplane,
    CargoShip,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 5] = [
        VehicleKind::Car,
        VehicleKind::Truck,
        VehicleKind::Bus,
        VehicleKind::Airplane,
        VehicleKind::CargoShip,
    ];

    /// Tag written as the first field of a persisted record.
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleKind::Car => "Car",
            VehicleKind::Truck => "Truck",
            VehicleKind::Bus => "Bus",
            VehicleKind::Airplane => "Airplane",
            VehicleKind::CargoShip => "CargoShip",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            VehicleKind::Car | VehicleKind::Truck | VehicleKind::Bus => Category::Land,
            VehicleKind::Airplane => Category::Air,
            VehicleKind::CargoShip => Category::Water,
        }
    }

    /// Exact, case-sensitive match on the persisted tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Land,
    Air,
    Water,
}

impl Category {
    /// Travel overhead applied on top of `distance / max_speed`.
    pub fn journey_time_factor(&self) -> f64 {
        match self {
            Category::Land => 1.10,
            Category::Air => 0.95,
            Category::Water => 1.15,
        }
    }
}

/// Identity and odometer state common to every vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleBase {
    id: String,
    model: String,
    max_speed: f64,
    current_mileage: f64,
}

impl VehicleBase {
    pub fn new(id: impl Into<String>, model: impl Into<String>, max_speed: f64) -> Result<Self> {
        let id = id.into();
        validate_non_empty_string("id", &id)?;
        validate_positive("max_speed", max_speed)?;
        Ok(Self {
            id,
            model: model.into(),
            max_speed,
            current_mileage: 0.0,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn current_mileage(&self) -> f64 {
        self.current_mileage
    }

    pub fn matches_id(&self, other: &str) -> bool {
        self.id.to_lowercase() == other.to_lowercase()
    }

    /// Odometer only moves forward.
    pub(crate) fn add_mileage(&mut self, distance: f64) {
        if distance > 0.0 {
            self.current_mileage += distance;
        }
    }
}

pub trait Vehicle: fmt::Debug {
    fn base(&self) -> &VehicleBase;

    fn base_mut(&mut self) -> &mut VehicleBase;

    fn kind(&self) -> VehicleKind;

    /// Moves the vehicle `distance` km, burning fuel where the kind uses it.
    fn travel(&mut self, distance: f64) -> Result<()>;

    /// Kilometres per litre in the current state. Zero means no fuel is used.
    fn fuel_efficiency(&self) -> f64;

    /// Fields of the persisted record, type tag first.
    fn csv_fields(&self) -> Vec<String>;

    fn estimate_journey_time(&self, distance: f64) -> f64 {
        distance / self.base().max_speed() * self.category().journey_time_factor()
    }

    fn category(&self) -> Category {
        self.kind().category()
    }

    fn id(&self) -> &str {
        self.base().id()
    }

    fn model(&self) -> &str {
        self.base().model()
    }

    fn max_speed(&self) -> f64 {
        self.base().max_speed()
    }

    fn current_mileage(&self) -> f64 {
        self.base().current_mileage()
    }

    fn as_fuel_consumable(&self) -> Option<&dyn FuelConsumable> {
        None
    }

    fn as_fuel_consumable_mut(&mut self) -> Option<&mut dyn FuelConsumable> {
        None
    }

    fn as_passenger_carrier(&self) -> Option<&dyn PassengerCarrier> {
        None
    }

    fn as_passenger_carrier_mut(&mut self) -> Option<&mut dyn PassengerCarrier> {
        None
    }

    fn as_cargo_carrier(&self) -> Option<&dyn CargoCarrier> {
        None
    }

    fn as_cargo_carrier_mut(&mut self) -> Option<&mut dyn CargoCarrier> {
        None
    }

    fn as_maintainable(&self) -> Option<&dyn Maintainable> {
        None
    }

    fn as_maintainable_mut(&mut self) -> Option<&mut dyn Maintainable> {
        None
    }

    fn has_capability(&self, capability: Capability) -> bool {
        match capability {
            Capability::FuelConsumable => self.as_fuel_consumable().is_some(),
            Capability::PassengerCarrier => self.as_passenger_carrier().is_some(),
            Capability::CargoCarrier => self.as_cargo_carrier().is_some(),
            Capability::Maintainable => self.as_maintainable().is_some(),
        }
    }

    fn capabilities(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|capability| self.has_capability(*capability))
            .collect()
    }
}

impl fmt::Display for dyn Vehicle + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Vehicle Info ---")?;
        writeln!(f, "ID: {}", self.id())?;
        writeln!(f, "Type: {}", self.kind())?;
        writeln!(f, "Model: {}", self.model())?;
        writeln!(f, "Max Speed: {:.1} km/h", self.max_speed())?;
        write!(f, "Current Mileage: {:.1} km", self.current_mileage())
    }
}

/// Orders by descending fuel efficiency. Stable sorts keep ties in place.
pub fn compare_by_efficiency(a: &dyn Vehicle, b: &dyn Vehicle) -> Ordering {
    b.fuel_efficiency().total_cmp(&a.fuel_efficiency())
}

/// Shared movement rule for kinds that always burn fuel.
pub(crate) fn travel_on_fuel<V>(vehicle: &mut V, distance: f64) -> Result<()>
where
    V: FuelConsumable + ?Sized,
{
    ensure_positive_distance(distance)?;
    let needed = distance / vehicle.fuel_efficiency();
    let available = vehicle.fuel_level();
    if available < needed {
        return Err(FleetError::InsufficientFuel {
            id: vehicle.id().to_string(),
            needed,
            available,
        });
    }
    vehicle.consume_fuel(distance)?;
    vehicle.base_mut().add_mileage(distance);
    Ok(())
}

pub(crate) fn ensure_positive_distance(distance: f64) -> Result<()> {
    if distance.is_nan() || distance <= 0.0 || distance.is_infinite() {
        return Err(FleetError::invalid_operation(format!(
            "Distance must be positive, got {}",
            distance
        )));
    }
    Ok(())
}
