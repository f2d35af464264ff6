//! `carbook` CLI — query and book recurring car reservations from the command line.
//!
//! Cars and bookings live in a JSON store file (`--store`, default
//! `bookings.json`). A missing file is treated as an empty store.
//!
//! ## Usage
//!
//! ```sh
//! # Fill an empty store with sample cars and bookings
//! carbook seed
//!
//! # List cars
//! carbook cars
//!
//! # Calendar view for February, all cars
//! carbook calendar --from 2025-02-01 --to 2025-02-28
//!
//! # Calendar view for one car
//! carbook calendar --from 2025-02-01 --to 2025-02-28 --car <CAR_ID>
//!
//! # Create or update a booking from a JSON request (stdin or -i)
//! carbook book -i request.json
//!
//! # Check a request for conflicts without saving it
//! carbook check -i request.json
//!
//! # Engine options from a TOML file, with info-level logs
//! carbook -v --config carbook.toml calendar --from 2025-02-01 --to 2025-02-28
//! ```

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use booking_engine::{
    seed, BookingRequest, BookingService, BookingStore, CalendarQuery, EngineOptions,
    MemoryStore, Snapshot,
};
use chrono::{Local, NaiveDate};
use clap::{ArgAction, Parser, Subcommand};
use tracing::{debug, Level};
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "carbook",
    version,
    about = "Recurring car booking calendar and conflict checker"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file holding cars and bookings
    #[arg(long, global = true, default_value = "bookings.json")]
    store: PathBuf,

    /// TOML file with engine options
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill an empty store with sample cars and bookings
    Seed,
    /// List cars in the store
    Cars,
    /// Show every booking occurrence in a date range
    Calendar {
        /// First date of the range (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,
        /// Last date of the range, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,
        /// Only show bookings for this car
        #[arg(long)]
        car: Option<Uuid>,
    },
    /// Create or update a booking (update when the request carries an id)
    Book {
        /// Request file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Check a booking request for conflicts without saving it
    Check {
        /// Request file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = load_options(cli.config.as_deref())?;
    let snapshot = load_store(&cli.store)?;
    debug!(
        cars = snapshot.cars.len(),
        bookings = snapshot.bookings.len(),
        path = %cli.store.display(),
        "loaded store"
    );

    match cli.command {
        Commands::Seed => {
            if !snapshot.is_empty() {
                anyhow::bail!(
                    "Store '{}' already has data; seed only fills an empty store.",
                    cli.store.display()
                );
            }
            let seeded = seed::snapshot(Local::now().naive_local());
            save_store(&cli.store, &seeded)?;
            println!(
                "Seeded {} cars and {} bookings.",
                seeded.cars.len(),
                seeded.bookings.len()
            );
        }
        Commands::Cars => {
            let cars = MemoryStore::from_snapshot(snapshot).cars()?;
            println!("{}", serde_json::to_string_pretty(&cars)?);
        }
        Commands::Calendar { from, to, car } => {
            let service = BookingService::new(MemoryStore::from_snapshot(snapshot), options);
            let occurrences = service.calendar(&CalendarQuery {
                resource_id: car,
                start: from,
                end: to,
            })?;
            println!("{}", serde_json::to_string_pretty(&occurrences)?);
        }
        Commands::Book { input } => {
            let request = read_request(input.as_deref())?;
            let mut service = BookingService::new(MemoryStore::from_snapshot(snapshot), options);
            let outcome = service.submit(request, Local::now().naive_local())?;
            save_store(&cli.store, service.into_store().snapshot())?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Check { input } => {
            let request = read_request(input.as_deref())?;
            let service = BookingService::new(MemoryStore::from_snapshot(snapshot), options);
            match service.check(&request)? {
                Some(conflict) => anyhow::bail!(
                    "Booking conflict on {}.",
                    conflict.date.format("%Y-%m-%d")
                ),
                None => println!("No conflict."),
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_options(path: Option<&Path>) -> Result<EngineOptions> {
    let Some(path) = path else {
        return Ok(EngineOptions::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("Invalid config: {}", path.display()))
}

fn load_store(path: &Path) -> Result<Snapshot> {
    if !path.exists() {
        return Ok(Snapshot::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read store: {}", path.display()))?;
    Snapshot::from_json(&raw).with_context(|| format!("Invalid store file: {}", path.display()))
}

fn save_store(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let json = snapshot.to_json()?;
    std::fs::write(path, json).with_context(|| format!("Failed to write store: {}", path.display()))
}

fn read_request(path: Option<&str>) -> Result<BookingRequest> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Invalid booking request JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
