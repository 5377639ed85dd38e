//! Bank Reserves Simulation CLI
//!
//! Runs the economy model for a number of ticks, printing progress and
//! writing statistics and world snapshots as JSON.

use clap::Parser;
use std::fs;
use std::path::PathBuf;

use bank_reserves_sim::output;
use bank_reserves_sim::{BankReservesModel, SimConfig};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "bank_reserves_sim")]
#[command(about = "Agent-based simulation of a toy fractional-reserve economy")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to simulate (defaults to the configured run length)
    #[arg(long)]
    ticks: Option<u64>,

    /// Path to a tuning file (tuning.toml is picked up automatically)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Population size
    #[arg(long)]
    people: Option<usize>,

    /// Savings threshold for the rich classification
    #[arg(long)]
    rich_threshold: Option<i64>,

    /// Percent of deposits the bank holds back as reserves
    #[arg(long)]
    reserve_percent: Option<u32>,

    /// Grid width
    #[arg(long)]
    width: Option<u32>,

    /// Grid height
    #[arg(long)]
    height: Option<u32>,

    /// Enforce the reserve cap on new loans
    #[arg(long)]
    enforce_reserve: bool,

    /// Interval between world snapshots (in ticks)
    #[arg(long)]
    snapshot_interval: Option<u64>,

    /// Output directory for statistics and snapshots
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,
}

fn main() {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match SimConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: could not load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => SimConfig::load_or_default(),
    };

    if let Some(people) = args.people {
        config.people.init_people = people;
    }
    if let Some(threshold) = args.rich_threshold {
        config.people.rich_threshold = threshold;
    }
    if let Some(percent) = args.reserve_percent {
        config.bank.reserve_percent = percent;
    }
    if let Some(width) = args.width {
        config.grid.width = width;
    }
    if let Some(height) = args.height {
        config.grid.height = height;
    }
    if let Some(interval) = args.snapshot_interval {
        config.simulation.snapshot_interval = interval;
    }
    if args.enforce_reserve {
        config.bank.enforce_reserve = true;
    }

    let ticks = args.ticks.unwrap_or(config.simulation.default_ticks);

    println!("Bank Reserves Simulation");
    println!("========================");
    println!("Seed: {}", args.seed);
    println!("Ticks: {}", ticks);
    println!("People: {}", config.people.init_people);
    println!("Grid: {}x{}", config.grid.width, config.grid.height);
    println!("Rich threshold: {}", config.people.rich_threshold);
    println!("Reserve percent: {}", config.bank.reserve_percent);
    println!();

    let mut model = match BankReservesModel::new(config, args.seed) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Error: invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Ensure output directories exist
    let snapshots_dir = args.output_dir.join("snapshots");
    fs::create_dir_all(&snapshots_dir).unwrap_or_else(|e| {
        eprintln!("Warning: Could not create output directories: {}", e);
    });

    let initial = output::generate_snapshot(model.world_mut(), "simulation_start");
    if let Err(e) = output::write_snapshot_to_dir(&initial, &snapshots_dir) {
        eprintln!("Warning: Could not write initial snapshot: {}", e);
    }

    println!("Starting simulation...");
    println!();

    for _ in 0..ticks {
        model.step();
        let tick = model.tick();

        let should_snapshot = model
            .world()
            .resource::<output::SnapshotGenerator>()
            .should_snapshot(tick);
        if should_snapshot {
            let snapshot = output::generate_snapshot(model.world_mut(), "periodic");
            if let Err(e) = output::write_snapshot_to_dir(&snapshot, &snapshots_dir) {
                eprintln!("Warning: Could not write snapshot at tick {}: {}", tick, e);
            }
        }

        // Print progress every 100 ticks
        if tick % 100 == 0 {
            if let Some(stats) = model.latest_stats() {
                println!(
                    "[Tick {:>4}] rich: {} poor: {} middle: {} savings: {} loans: {}",
                    stats.tick,
                    stats.rich,
                    stats.poor,
                    stats.middle,
                    stats.total_savings,
                    stats.total_loans
                );
            }
        }
    }

    let final_snapshot = output::generate_snapshot(model.world_mut(), "simulation_end");
    if let Err(e) = output::write_snapshot_to_dir(&final_snapshot, &snapshots_dir) {
        eprintln!("Warning: Could not write final snapshot: {}", e);
    }

    match output::write_stats(&args.output_dir, model.stats_history()) {
        Ok(path) => println!("Wrote statistics to {}", path.display()),
        Err(e) => eprintln!("Warning: Could not write statistics: {}", e),
    }

    println!();
    let bank = model.bank();
    println!("Simulation complete. Ran {} ticks.", ticks);
    println!(
        "Bank: deposits {} loans {} lendable {}",
        bank.total_deposits(),
        bank.total_loans(),
        bank.lendable()
    );
    let snapshot_count = model
        .world()
        .resource::<output::SnapshotGenerator>()
        .snapshot_count();
    println!("Generated {} snapshots.", snapshot_count);
}
