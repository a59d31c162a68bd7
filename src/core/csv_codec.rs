//! Flat-file format: one headerless comma-separated record per vehicle,
//! type tag first.
//!
//! ```text
//! Car,id,model,maxSpeed,numWheels,fuelLevel,passengerCapacity,currentPassengers
//! Truck,id,model,maxSpeed,numWheels,fuelLevel,cargoCapacity,currentCargo
//! Bus,id,model,maxSpeed,numWheels,fuelLevel,passengerCapacity,currentPassengers,cargoCapacity,currentCargo
//! Airplane,id,model,maxSpeed,maxAltitude,fuelLevel,passengerCapacity,currentPassengers,cargoCapacity,currentCargo
//! CargoShip,id,model,maxSpeed,hasSail,cargoCapacity,currentCargo
//! ```
//!
//! Fields are quoted only when they contain a comma or a quote, so ordinary
//! records stay plain text. Decoding never fails as a whole: each bad record
//! is reported as a [`SkippedRecord`] and the rest are kept.

use crate::domain::capability::{CargoHold, FuelTank, PassengerCabin};
use crate::domain::kinds::{Airplane, Bus, Car, CargoShip, Truck};
use crate::domain::vehicle::{Vehicle, VehicleBase, VehicleKind};
use crate::utils::error::{FleetError, Result};
use crate::utils::validation::validate_non_negative;
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRecord {
    pub line: u64,
    pub content: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct DecodedFleet {
    /// Rebuilt vehicles paired with the line they came from.
    pub vehicles: Vec<(u64, Box<dyn Vehicle>)>,
    pub skipped: Vec<SkippedRecord>,
}

pub fn encode_fleet(vehicles: &[Box<dyn Vehicle>]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for vehicle in vehicles {
        writer.write_record(vehicle.csv_fields())?;
    }

    writer
        .into_inner()
        .map_err(|e| FleetError::Io(e.into_error()))
}

pub fn decode_fleet(data: &[u8]) -> DecodedFleet {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut decoded = DecodedFleet::default();
    for (index, result) in reader.records().enumerate() {
        let fallback_line = index as u64 + 1;
        match result {
            Ok(record) => {
                let line = record
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(fallback_line);
                match parse_record(&record) {
                    Ok(vehicle) => decoded.vehicles.push((line, vehicle)),
                    Err(e) => decoded.skipped.push(SkippedRecord {
                        line,
                        content: record.iter().collect::<Vec<_>>().join(","),
                        reason: e.to_string(),
                    }),
                }
            }
            Err(e) => decoded.skipped.push(SkippedRecord {
                line: e
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(fallback_line),
                content: String::new(),
                reason: FleetError::from(e).to_string(),
            }),
        }
    }

    decoded
}

/// Rebuilds one vehicle, including its capability state. Wheel counts and
/// capacities are fixed per kind; a record that disagrees is malformed.
pub fn parse_record(record: &StringRecord) -> Result<Box<dyn Vehicle>> {
    let fields = Fields { record };
    let tag = fields.text(0, "type")?;
    let kind = VehicleKind::from_tag(tag)
        .ok_or_else(|| fields.malformed(format!("unknown vehicle type '{}'", tag)))?;
    fields.expect_len(expected_len(kind))?;

    let base = VehicleBase::new(
        fields.text(1, "id")?,
        fields.text(2, "model")?,
        fields.real(3, "maxSpeed")?,
    )?;

    let vehicle: Box<dyn Vehicle> = match kind {
        VehicleKind::Car => Box::new(Car::restore(
            base,
            fields.wheels(4, Car::WHEELS)?,
            fields.tank(5)?,
            fields.cabin(6, 7, Car::PASSENGER_CAPACITY)?,
        )),
        VehicleKind::Truck => Box::new(Truck::restore(
            base,
            fields.wheels(4, Truck::WHEELS)?,
            fields.tank(5)?,
            fields.hold(6, 7, Truck::CARGO_CAPACITY)?,
        )),
        VehicleKind::Bus => Box::new(Bus::restore(
            base,
            fields.wheels(4, Bus::WHEELS)?,
            fields.tank(5)?,
            fields.cabin(6, 7, Bus::PASSENGER_CAPACITY)?,
            fields.hold(8, 9, Bus::CARGO_CAPACITY)?,
        )),
        VehicleKind::Airplane => {
            let max_altitude = fields.real(4, "maxAltitude")?;
            if max_altitude <= 0.0 {
                return Err(fields.malformed("maxAltitude must be positive"));
            }
            Box::new(Airplane::restore(
                base,
                max_altitude,
                fields.tank(5)?,
                fields.cabin(6, 7, Airplane::PASSENGER_CAPACITY)?,
                fields.hold(8, 9, Airplane::CARGO_CAPACITY)?,
            ))
        }
        VehicleKind::CargoShip => Box::new(CargoShip::restore(
            base,
            fields.flag(4, "hasSail")?,
            fields.hold(5, 6, CargoShip::CARGO_CAPACITY)?,
        )),
    };

    Ok(vehicle)
}

fn expected_len(kind: VehicleKind) -> usize {
    match kind {
        VehicleKind::Car | VehicleKind::Truck => 8,
        VehicleKind::Bus | VehicleKind::Airplane => 10,
        VehicleKind::CargoShip => 7,
    }
}

struct Fields<'r> {
    record: &'r StringRecord,
}

impl Fields<'_> {
    fn malformed(&self, reason: impl Into<String>) -> FleetError {
        FleetError::malformed(
            self.record.iter().collect::<Vec<_>>().join(","),
            reason,
        )
    }

    fn expect_len(&self, expected: usize) -> Result<()> {
        if self.record.len() != expected {
            return Err(self.malformed(format!(
                "expected {} fields, found {}",
                expected,
                self.record.len()
            )));
        }
        Ok(())
    }

    fn text(&self, index: usize, name: &str) -> Result<&str> {
        self.record
            .get(index)
            .ok_or_else(|| self.malformed(format!("missing field '{}'", name)))
    }

    fn real(&self, index: usize, name: &str) -> Result<f64> {
        let raw = self.text(index, name)?.trim();
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(self.malformed(format!("'{}' is not a number for '{}'", raw, name))),
        }
    }

    fn count(&self, index: usize, name: &str) -> Result<u32> {
        let raw = self.text(index, name)?.trim();
        raw.parse::<u32>()
            .map_err(|_| self.malformed(format!("'{}' is not a whole number for '{}'", raw, name)))
    }

    fn flag(&self, index: usize, name: &str) -> Result<bool> {
        let raw = self.text(index, name)?.trim();
        if raw.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(self.malformed(format!("'{}' is not true/false for '{}'", raw, name)))
        }
    }

    fn tank(&self, index: usize) -> Result<FuelTank> {
        let level = self.real(index, "fuelLevel")?;
        validate_non_negative("fuelLevel", level)?;
        Ok(FuelTank::new(level))
    }

    fn wheels(&self, index: usize, expected: u32) -> Result<u32> {
        let wheels = self.count(index, "numWheels")?;
        if wheels != expected {
            return Err(self.malformed(format!(
                "numWheels must be {}, found {}",
                expected, wheels
            )));
        }
        Ok(wheels)
    }

    fn cabin(
        &self,
        capacity_index: usize,
        current_index: usize,
        expected_capacity: u32,
    ) -> Result<PassengerCabin> {
        let capacity = self.count(capacity_index, "passengerCapacity")?;
        if capacity != expected_capacity {
            return Err(self.malformed(format!(
                "passengerCapacity must be {}, found {}",
                expected_capacity, capacity
            )));
        }
        PassengerCabin::with_occupancy(capacity, self.count(current_index, "currentPassengers")?)
            .map_err(|e| self.malformed(e.to_string()))
    }

    fn hold(
        &self,
        capacity_index: usize,
        current_index: usize,
        expected_capacity: f64,
    ) -> Result<CargoHold> {
        let capacity = self.real(capacity_index, "cargoCapacity")?;
        if capacity != expected_capacity {
            return Err(self.malformed(format!(
                "cargoCapacity must be {}, found {}",
                expected_capacity, capacity
            )));
        }
        CargoHold::with_load(capacity, self.real(current_index, "currentCargo")?)
            .map_err(|e| self.malformed(e.to_string()))
    }
}
