pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command, KindArg};

pub use crate::config::{storage::LocalStorage, toml_config::FleetConfig};
pub use crate::core::{BulkOutcome, FleetRegistry, FleetReport, LoadSummary, VehicleFilter};
pub use crate::domain::{
    Airplane, Bus, Capability, Car, CargoCarrier, CargoShip, FuelConsumable, Maintainable,
    PassengerCarrier, Truck, Vehicle, VehicleKind,
};
pub use crate::utils::error::{FleetError, Result};
