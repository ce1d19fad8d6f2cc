//! Village Simulation
//!
//! Spawns (or restores) a village, runs it for a number of ticks, and
//! writes the event log and a final snapshot.

use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod setup;

use config::SimulationConfig;
use village_core::{DialogueRequest, EventLogger, Simulation, VillagerId};
use village_events::{EventKind, VillageEvent, VillageSnapshot, TICKS_PER_DAY};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "village_sim")]
#[command(about = "Runs a village of goal-driven villagers")]
struct Args {
    /// TOML configuration file
    #[arg(long, default_value = "village.toml")]
    config: PathBuf,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(long)]
    ticks: Option<u64>,

    /// Villagers to spawn
    #[arg(long)]
    villagers: Option<usize>,

    /// Resume from a village snapshot instead of spawning
    #[arg(long)]
    restore: Option<PathBuf>,

    /// Output path for the final snapshot
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Output path for the JSONL event log
    #[arg(long)]
    events: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut SimulationConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(ticks) = self.ticks {
            config.ticks = ticks;
        }
        if let Some(villagers) = self.villagers {
            config.villagers = villagers;
        }
        if let Some(ref path) = self.snapshot {
            config.snapshot_path = path.clone();
        }
        if let Some(ref path) = self.events {
            config.events_path = path.clone();
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let args = Args::parse();
    let mut config = SimulationConfig::load_or_default(&args.config);
    args.apply(&mut config);

    info!(
        seed = config.seed,
        ticks = config.ticks,
        villagers = config.villagers,
        "village simulation starting"
    );

    ensure_parent(&config.events_path)?;
    ensure_parent(&config.snapshot_path)?;

    let mut sim = Simulation::new(config.ai.clone(), config.seed)?;
    match args.restore {
        Some(ref path) => {
            let snapshot = VillageSnapshot::from_json(&fs::read_to_string(path)?)?;
            sim.restore_snapshot(&snapshot);
        }
        None => {
            let mut rng = SmallRng::seed_from_u64(config.seed);
            setup::spawn_village(&mut sim, &mut rng, config.villagers);
        }
    }

    let mut logger = EventLogger::new(&config.events_path)?;
    for _ in 0..config.ticks {
        let tick = sim.current_tick();
        let mut events = sim.step();
        events.extend(sim.drain_dialogue().iter().map(|request| dialogue_event(&sim, request)));
        logger.log_batch(events)?;

        if tick > 0 && tick % TICKS_PER_DAY == 0 {
            info!(
                day = tick / TICKS_PER_DAY,
                events = logger.event_count(),
                "day complete"
            );
        }
    }
    logger.flush()?;

    let snapshot = sim.snapshot();
    fs::write(&config.snapshot_path, snapshot.to_json()?)?;

    info!(
        ticks = sim.current_tick(),
        events = logger.event_count(),
        snapshot = %config.snapshot_path.display(),
        "simulation complete"
    );
    Ok(())
}

/// Stands in for the external dialogue generator: the request is recorded
/// and nothing waits on a reply.
fn dialogue_event(sim: &Simulation, request: &DialogueRequest) -> VillageEvent {
    let name = villager_name(sim, request.villager);
    VillageEvent::new(
        request.tick,
        request.villager.0,
        name,
        EventKind::DialogueRequested {
            partner: request.partner.map(|p| p.0),
            topic: request.topic.clone(),
        },
    )
}

fn villager_name(sim: &Simulation, id: VillagerId) -> String {
    sim.villager(id)
        .map(|v| v.name.clone())
        .unwrap_or_else(|| id.to_string())
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
