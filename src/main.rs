/*
 * Headless Boid Runner
 *
 * Runs the flock for a fixed number of ticks without any window, logging the
 * flock centroid as it goes. Useful for tuning settings files and checking
 * that a configuration stays contained before wiring it to a renderer.
 *
 *   RUST_LOG=info boids3d --config boids.toml --ticks 5000 --snapshot
 */

use boids3d::config::DEFAULT_CONFIG_PATH;
use boids3d::neighbors::count_within;
use boids3d::{AgentId, Flock, FollowController, SimulationConfig, UpdateOrder, Vec3};
use clap::Parser;
use log::{info, warn};
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Command line arguments; anything given here overrides the settings file
#[derive(Parser, Debug)]
#[command(name = "boids3d")]
#[command(about = "Run a 3D boid flock headless")]
struct Args {
    /// Settings file (TOML). Defaults are used when the default file is absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of boids
    #[arg(long)]
    agents: Option<usize>,

    /// Number of ticks to simulate
    #[arg(long)]
    ticks: Option<u64>,

    /// Random seed for the initial population
    #[arg(long)]
    seed: Option<u64>,

    /// sequential, two_phase or parallel
    #[arg(long, value_parser = parse_update_order)]
    update_order: Option<UpdateOrder>,

    /// Track this boid with a follow controller and report its position
    #[arg(long)]
    follow: Option<u64>,

    /// Print every boid's final state as JSON
    #[arg(long)]
    snapshot: bool,
}

fn parse_update_order(value: &str) -> Result<UpdateOrder, String> {
    match value {
        "sequential" => Ok(UpdateOrder::Sequential),
        "two_phase" | "two-phase" => Ok(UpdateOrder::TwoPhase),
        "parallel" => Ok(UpdateOrder::Parallel),
        other => Err(format!("unknown update order '{}'", other)),
    }
}

#[derive(Serialize)]
struct BoidSnapshot {
    id: AgentId,
    position: Vec3,
    velocity: Vec3,
}

fn load_config(args: &Args) -> Result<SimulationConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            SimulationConfig::load(DEFAULT_CONFIG_PATH)?
        }
        None => SimulationConfig::default(),
    };

    if let Some(agents) = args.agents {
        config.agents = agents;
    }
    if let Some(ticks) = args.ticks {
        config.ticks = ticks;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(update_order) = args.update_order {
        config.update_order = update_order;
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;

    info!(
        "{} boids, {} ticks, seed {}, {:?} update, {:?}",
        config.agents,
        config.ticks,
        config.seed,
        config.update_order,
        config.behavior.boundary()
    );

    let mut flock = Flock::with_seed(config.behavior.clone(), config.seed);
    flock.set_update_order(config.update_order);
    flock.reset(config.agents);

    let followed = args.follow.map(AgentId);
    let mut follow = followed.and_then(|id| flock.get(id)).map(|boid| {
        FollowController::new(
            boid.position,
            config.behavior.max_speed * config.follow.speed_factor,
            config.follow.max_force,
        )
        .with_offset(config.follow.offset)
    });
    if followed.is_some() && follow.is_none() {
        warn!("no boid with id {:?}, follow disabled", args.follow);
    }

    let started = Instant::now();
    for _ in 0..config.ticks {
        flock.update();

        if let (Some(follow), Some(id)) = (follow.as_mut(), followed) {
            if let Some(boid) = flock.get(id) {
                follow.update(boid.position);
            }
        }

        let tick = flock.tick_count();
        if config.report_interval > 0 && tick % config.report_interval == 0 {
            report(&flock, follow.as_ref(), &config);
        }
    }

    let elapsed = started.elapsed();
    info!(
        "finished {} ticks in {:.2?} ({:.1} ticks/s)",
        flock.tick_count(),
        elapsed,
        flock.tick_count() as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );

    if args.snapshot {
        let snapshot: Vec<BoidSnapshot> = flock
            .agents()
            .iter()
            .map(|boid| BoidSnapshot {
                id: boid.id,
                position: boid.position,
                velocity: boid.velocity,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }

    Ok(())
}

fn report(flock: &Flock, follow: Option<&FollowController>, config: &SimulationConfig) {
    let center = flock.get_center();
    let agents = flock.agents();
    let max_speed = agents.iter().map(|b| b.speed()).fold(0.0_f32, f32::max);
    let farthest = agents.iter().map(|b| b.position.length()).fold(0.0_f32, f32::max);
    let mean_neighbors = if agents.is_empty() {
        0.0
    } else {
        agents
            .iter()
            .map(|b| count_within(b, agents, config.behavior.cohesion_dist))
            .sum::<usize>() as f32
            / agents.len() as f32
    };

    info!(
        "tick {:>6}: center ({:.1}, {:.1}, {:.1}), farthest {:.1}, top speed {:.2}, {:.1} neighbors",
        flock.tick_count(),
        center.x,
        center.y,
        center.z,
        farthest,
        max_speed,
        mean_neighbors
    );
    if let Some(follow) = follow {
        let p = follow.position();
        info!("  follow at ({:.1}, {:.1}, {:.1})", p.x, p.y, p.z);
    }
}
