pub mod storage;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "fleet")]
#[command(about = "Manage a mixed fleet of land, air and water vehicles")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = toml_config::DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Fleet CSV file, overrides storage.path from the config
    #[arg(short, long)]
    pub file: Option<String>,

    /// Do not write the fleet back after a mutating command
    #[arg(long)]
    pub no_save: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Car,
    Truck,
    Bus,
    Airplane,
    Cargoship,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add a vehicle to the fleet
    Add {
        #[arg(value_enum)]
        kind: KindArg,
        id: String,
        model: String,
        /// Top speed in km/h
        max_speed: f64,
        /// Airplane only, in feet
        #[arg(long)]
        altitude: Option<f64>,
        /// CargoShip only
        #[arg(long)]
        sail: bool,
    },
    /// Remove a vehicle by id
    Remove { id: String },
    /// Move every vehicle the same distance
    Journey {
        #[arg(allow_negative_numbers = true)]
        distance: f64,
    },
    /// Refuel every fuel-using vehicle
    RefuelAll {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },
    /// Refuel one vehicle
    Refuel { id: String, amount: f64 },
    /// Flag one vehicle for maintenance
    Schedule { id: String },
    /// Service every vehicle that needs it
    Maintain,
    /// Print the fleet report
    Report {
        #[arg(long)]
        json: bool,
    },
    /// List vehicles by kind or capability (e.g. car, fuelconsumable)
    Search { filter: String },
    /// List vehicles needing maintenance
    Maintenance,
    /// Reorder the fleet by fuel efficiency
    Sort,
    /// Litres the fleet would burn over a distance
    FuelEstimate { distance: f64 },
    /// Estimated journey time for one vehicle, in hours
    Eta { id: String, distance: f64 },
    /// Replace the fleet with a demonstration fleet
    Demo,
}

#[cfg(feature = "cli")]
impl Command {
    /// Whether the command changes the fleet and should be saved afterwards.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Add { .. }
                | Command::Remove { .. }
                | Command::Journey { .. }
                | Command::RefuelAll { .. }
                | Command::Refuel { .. }
                | Command::Schedule { .. }
                | Command::Maintain
                | Command::Sort
                | Command::Demo
        )
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_airplane() {
        let cli = CliConfig::try_parse_from([
            "fleet", "add", "airplane", "A-001", "Boeing 747", "900", "--altitude", "35000",
        ])
        .unwrap();
        match cli.command {
            Command::Add {
                kind,
                id,
                max_speed,
                altitude,
                sail,
                ..
            } => {
                assert_eq!(kind, KindArg::Airplane);
                assert_eq!(id, "A-001");
                assert_eq!(max_speed, 900.0);
                assert_eq!(altitude, Some(35_000.0));
                assert!(!sail);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.config, "fleet.toml");
    }

    #[test]
    fn test_mutating_commands() {
        let cli = CliConfig::try_parse_from(["fleet", "--file", "x.csv", "report"]).unwrap();
        assert!(!cli.command.mutates());
        assert_eq!(cli.file.as_deref(), Some("x.csv"));

        let cli = CliConfig::try_parse_from(["fleet", "journey", "100"]).unwrap();
        assert!(cli.command.mutates());
    }
}
