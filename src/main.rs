use anyhow::Context;
use clap::Parser;
use fleet_registry::config::toml_config::LogFormat;
use fleet_registry::utils::error::ErrorSeverity;
use fleet_registry::utils::{logger, validation::Validate};
use fleet_registry::{
    Airplane, Bus, Car, CargoShip, CliConfig, Command, FleetConfig, FleetError, FleetRegistry,
    KindArg, Truck, Vehicle,
};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let mut config = FleetConfig::from_file_or_default(&cli.config)
        .with_context(|| format!("failed to read config {}", cli.config))?;
    if let Some(file) = &cli.file {
        config.storage.path = file.clone();
    }

    match config.logging.format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("Error: {}", e);
        eprintln!("Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if let Err(e) = run(&cli, &config) {
        tracing::error!("Command failed: {} (Severity: {:?})", e, e.severity());
        eprintln!("Error: {}", e);
        eprintln!("Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn run(cli: &CliConfig, config: &FleetConfig) -> fleet_registry::Result<()> {
    let fleet_file = config.fleet_file();
    let mut fleet = FleetRegistry::new();
    if Path::new(fleet_file).exists() {
        let summary = fleet.load_from_file(fleet_file)?;
        for skipped in &summary.skipped {
            eprintln!(
                "Skipped line {}: {} ({})",
                skipped.line, skipped.content, skipped.reason
            );
        }
    } else {
        tracing::debug!("No fleet file at {}, starting empty", fleet_file);
    }

    execute(&cli.command, &mut fleet)?;

    if cli.command.mutates() && config.storage.auto_save && !cli.no_save {
        let saved = fleet.save_to_file(fleet_file)?;
        println!("Saved {} vehicles to {}", saved, fleet_file);
    }
    Ok(())
}

fn execute(command: &Command, fleet: &mut FleetRegistry) -> fleet_registry::Result<()> {
    match command {
        Command::Add {
            kind,
            id,
            model,
            max_speed,
            altitude,
            sail,
        } => {
            let vehicle = build_vehicle(*kind, id, model, *max_speed, *altitude, *sail)?;
            fleet.add_boxed(vehicle)?;
            println!("Added {}", id);
        }
        Command::Remove { id } => {
            let removed = fleet.remove(id)?;
            println!("Removed {} {}", removed.kind(), removed.id());
        }
        Command::Journey { distance } => {
            let outcome = fleet.start_all_journeys(*distance);
            for id in &outcome.succeeded {
                println!("{}: completed {} km", id, distance);
            }
            for failure in &outcome.failures {
                println!("{}: {}", failure.id, failure.error);
            }
        }
        Command::RefuelAll { amount } => {
            let outcome = fleet.refuel_all(*amount);
            println!("Refueled {} vehicles", outcome.succeeded.len());
            for failure in &outcome.failures {
                println!("{}: {}", failure.id, failure.error);
            }
        }
        Command::Refuel { id, amount } => {
            fleet.refuel(id, *amount)?;
            println!("Refueled {} with {} L", id, amount);
        }
        Command::Schedule { id } => {
            fleet.schedule_maintenance(id)?;
            println!("Maintenance scheduled for {}", id);
        }
        Command::Maintain => {
            let serviced = fleet.maintain_all();
            if serviced.is_empty() {
                println!("No vehicles needed maintenance");
            }
            for id in serviced {
                println!("Serviced {}", id);
            }
        }
        Command::Report { json } => {
            let report = fleet.generate_report();
            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report);
            }
        }
        Command::Search { filter } => {
            let filter = filter.parse()?;
            for vehicle in fleet.search(filter) {
                println!("{}", vehicle);
            }
        }
        Command::Maintenance => {
            for vehicle in fleet.vehicles_needing_maintenance() {
                println!(
                    "{} {} ({:.1} km)",
                    vehicle.kind(),
                    vehicle.id(),
                    vehicle.current_mileage()
                );
            }
        }
        Command::Sort => {
            fleet.sort_by_efficiency();
            for vehicle in fleet.iter() {
                println!("{}: {:.2} km/l", vehicle.id(), vehicle.fuel_efficiency());
            }
        }
        Command::FuelEstimate { distance } => {
            println!(
                "Estimated fuel for {} km: {:.2} L",
                distance,
                fleet.total_fuel_consumption(*distance)
            );
        }
        Command::Eta { id, distance } => {
            let vehicle = fleet.get(id).ok_or_else(|| {
                FleetError::invalid_operation(format!("Vehicle with ID {} not found", id))
            })?;
            println!(
                "{} would need {:.2} h for {} km",
                vehicle.id(),
                vehicle.estimate_journey_time(*distance),
                distance
            );
        }
        Command::Demo => {
            *fleet = demo_fleet()?;
            println!("Demo fleet created with {} vehicles", fleet.len());
        }
    }
    Ok(())
}

fn build_vehicle(
    kind: KindArg,
    id: &str,
    model: &str,
    max_speed: f64,
    altitude: Option<f64>,
    sail: bool,
) -> fleet_registry::Result<Box<dyn Vehicle>> {
    Ok(match kind {
        KindArg::Car => Box::new(Car::new(id, model, max_speed)?),
        KindArg::Truck => Box::new(Truck::new(id, model, max_speed)?),
        KindArg::Bus => Box::new(Bus::new(id, model, max_speed)?),
        KindArg::Airplane => {
            let altitude = altitude.ok_or_else(|| {
                FleetError::invalid_operation("An airplane needs --altitude")
            })?;
            Box::new(Airplane::new(id, model, max_speed, altitude)?)
        }
        KindArg::Cargoship => Box::new(CargoShip::new(id, model, max_speed, sail)?),
    })
}

fn demo_fleet() -> fleet_registry::Result<FleetRegistry> {
    let mut fleet = FleetRegistry::new();
    fleet.add(Car::new("C-001", "Toyota Camry", 180.0)?)?;
    fleet.add(Truck::new("T-001", "Volvo FH16", 140.0)?)?;
    fleet.add(Bus::new("B-001", "Mercedes-Benz Tourismo", 150.0)?)?;
    fleet.add(Airplane::new("A-001", "Boeing 747", 900.0, 35_000.0)?)?;
    fleet.add(CargoShip::new("S-001", "Emma Maersk", 45.0, false)?)?;
    fleet.add(CargoShip::new("S-002", "The Black Pearl", 30.0, true)?)?;
    Ok(fleet)
}
