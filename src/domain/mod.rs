// Domain layer: the vehicle model, capability contracts and ports.

pub mod capability;
pub mod kinds;
pub mod ports;
pub mod vehicle;

pub use capability::{
    Capability, CargoCarrier, CargoHold, FuelConsumable, FuelTank, Maintainable, MaintenanceLog,
    PassengerCabin, PassengerCarrier, MAINTENANCE_MILEAGE_THRESHOLD,
};
pub use kinds::{Airplane, Bus, Car, CargoShip, Truck};
pub use ports::Storage;
pub use vehicle::{compare_by_efficiency, Category, Vehicle, VehicleBase, VehicleKind};
