//! voxmech - deterministic block-machine simulation
//!
//! Headless demo driver: runs a harvester and a composter against a scripted
//! field for a fixed number of ticks and reports what happened.

mod config;
mod demo;

use anyhow::Result;
use config::SimConfig;
use demo::{DemoCropBehavior, DemoWorld, PRODUCE_ITEM, SEED_ITEM};
use serde::Serialize;
use std::{env, path::PathBuf};
use tracing::info;
use voxmech_core::{BlockPos, ItemStack};
use voxmech_machines::{BehaviorChain, ComposterState, HarvesterState, SaveMode};

struct CliOptions {
    config: Option<PathBuf>,
    ticks: Option<u64>,
    json: bool,
}

impl CliOptions {
    fn parse<I>(mut args: I) -> Self
    where
        I: Iterator<Item = String>,
    {
        let mut options = Self {
            config: None,
            ticks: None,
            json: false,
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => options.config = args.next().map(PathBuf::from),
                "--ticks" => options.ticks = args.next().and_then(|v| v.parse().ok()),
                "--json" => options.json = true,
                _ => {}
            }
        }
        options
    }
}

#[derive(Debug, Serialize)]
struct RunReport {
    ticks: u64,
    sprouts: usize,
    grown: usize,
    produce_collected: u32,
    energy_left: u32,
    compost_conversions: u32,
    compost_signal: u8,
}

fn main() -> Result<()> {
    // Initialize tracing with INFO level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting voxmech v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let mut sim = match &cli.config {
        Some(path) => SimConfig::load_from_path(path),
        None => SimConfig::load(),
    };
    if let Some(ticks) = cli.ticks {
        sim.ticks = ticks;
    }
    sim.tuning.validate()?;

    let report = run_simulation(&sim);

    info!(
        ticks = report.ticks,
        sprouts = report.sprouts,
        grown = report.grown,
        produce = report.produce_collected,
        energy = report.energy_left,
        compost_conversions = report.compost_conversions,
        "simulation finished"
    );
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

fn run_simulation(sim: &SimConfig) -> RunReport {
    // Metadata 0 decodes to facing West.
    let machine_meta = 0;
    let machine_pos = BlockPos::ORIGIN;

    let mut world = DemoWorld::tilled_field(machine_meta, sim.tuning.harvester_radius, sim.grow_time);
    let mut chain = BehaviorChain::new();
    chain.register(Box::new(DemoCropBehavior));

    let mut harvester = HarvesterState::new(&sim.tuning);
    harvester.energy.receive(sim.charge, false);
    harvester
        .inventory
        .set(0, Some(ItemStack::new(SEED_ITEM, sim.seeds)));

    let mut composter = ComposterState::new(&sim.tuning);
    let mut compost_conversions = 0u32;

    for tick in 1..=sim.ticks {
        world.advance();
        harvester.tick(&mut world, machine_pos, false, &chain);

        // A steady trickle of raw material keeps the composter busy.
        composter.add_input(sim.tuning.compost_input, 1);
        composter.tick();
        if composter.take_output().is_some() {
            compost_conversions += 1;
        }

        if tick % 500 == 0 {
            info!(
                tick,
                sprouts = world.count_sprouts(),
                grown = world.count_grown(),
                energy = harvester.energy.energy(),
                compost_signal = composter.fill_signal(),
                "progress"
            );
        }
    }

    let produce_collected = harvester
        .inventory
        .slots()
        .iter()
        .flatten()
        .filter(|stack| stack.item_id == PRODUCE_ITEM)
        .map(|stack| stack.count as u32)
        .sum();

    // The snapshot is what a real host would persist at this point.
    let snapshot = harvester.snapshot(SaveMode::Tile);
    tracing::debug!(
        slots = snapshot.slots.iter().flatten().count(),
        energy = snapshot.energy,
        "harvester snapshot taken"
    );

    RunReport {
        ticks: sim.ticks,
        sprouts: world.count_sprouts(),
        grown: world.count_grown(),
        produce_collected,
        energy_left: harvester.energy.energy(),
        compost_conversions,
        compost_signal: composter.fill_signal(),
    }
}
