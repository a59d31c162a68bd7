use crate::domain::capability::Capability;
use crate::domain::vehicle::{Vehicle, VehicleKind};
use crate::utils::error::FleetError;
use std::fmt;
use std::str::FromStr;

/// Selects fleet members either by concrete kind or by capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleFilter {
    Kind(VehicleKind),
    Capability(Capability),
}

impl VehicleFilter {
    pub fn matches(&self, vehicle: &dyn Vehicle) -> bool {
        match self {
            VehicleFilter::Kind(kind) => vehicle.kind() == *kind,
            VehicleFilter::Capability(capability) => vehicle.has_capability(*capability),
        }
    }
}

impl FromStr for VehicleFilter {
    type Err = FleetError;

    /// Accepts kind and capability names in any case, ignoring `_`, `-` and spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        if let Some(kind) = VehicleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().to_lowercase() == wanted)
        {
            return Ok(VehicleFilter::Kind(kind));
        }
        if let Some(capability) = Capability::ALL
            .into_iter()
            .find(|capability| capability.as_str().to_lowercase() == wanted)
        {
            return Ok(VehicleFilter::Capability(capability));
        }

        Err(FleetError::invalid_operation(format!(
            "Unknown vehicle type or capability '{}'",
            s
        )))
    }
}

impl fmt::Display for VehicleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleFilter::Kind(kind) => fmt::Display::fmt(kind, f),
            VehicleFilter::Capability(capability) => fmt::Display::fmt(capability, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filters() {
        assert_eq!(
            "car".parse::<VehicleFilter>().unwrap(),
            VehicleFilter::Kind(VehicleKind::Car)
        );
        assert_eq!(
            "Cargo_Ship".parse::<VehicleFilter>().unwrap(),
            VehicleFilter::Kind(VehicleKind::CargoShip)
        );
        assert_eq!(
            "fuelconsumable".parse::<VehicleFilter>().unwrap(),
            VehicleFilter::Capability(Capability::FuelConsumable)
        );
        assert_eq!(
            "PASSENGER-CARRIER".parse::<VehicleFilter>().unwrap(),
            VehicleFilter::Capability(Capability::PassengerCarrier)
        );
        assert!("spaceship".parse::<VehicleFilter>().is_err());
    }
}
