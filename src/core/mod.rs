pub mod csv_codec;
pub mod registry;
pub mod report;
pub mod search;

pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
pub use registry::{BulkFailure, BulkOutcome, FleetRegistry, LoadSummary};
pub use report::{FleetReport, MaintenanceEntry, EMPTY_FLEET_MESSAGE};
pub use search::VehicleFilter;
