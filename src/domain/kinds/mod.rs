pub mod airplane;
pub mod bus;
pub mod car;
pub mod cargo_ship;
pub mod truck;

pub use airplane::Airplane;
pub use bus::Bus;
pub use car::Car;
pub use cargo_ship::CargoShip;
pub use truck::Truck;

/// Shortest text that parses back to the same `f64`.
pub(crate) fn format_real(value: f64) -> String {
    format!("{:?}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_real_round_trips() {
        for value in [0.0, 180.0, 0.1, 1.0 / 3.0, 72.0 / 7.2, 1e-9, 35_000.5] {
            let text = format_real(value);
            assert_eq!(text.parse::<f64>().unwrap(), value);
        }
        assert_eq!(format_real(180.0), "180.0");
    }
}
