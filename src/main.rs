use anyhow::{Context, Result};
use bumbles_core::config::AppConfig;
use bumbles_core::metrics::init_logging;
use bumbles_lib::World;
use clap::Parser;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless Bumbles simulation", long_about = None)]
struct Args {
    /// TOML configuration file; defaults apply when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 5000)]
    ticks: u64,

    /// Seed for a reproducible run; overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Simulation speed multiplier
    #[arg(long)]
    speed: Option<f64>,

    /// Elapsed time fed to every tick, in milliseconds
    #[arg(long, default_value_t = 16.0)]
    delta_ms: f64,

    /// Print a statistics line every N ticks (0 disables)
    #[arg(long, default_value_t = 0)]
    report_every: u64,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the final full snapshot instead of only statistics
    #[arg(long)]
    snapshot: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    tick: u64,
    #[serde(flatten)]
    stats: &'a bumbles_data::SimulationStats,
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {path}"))?;
            AppConfig::from_toml(&content)
                .with_context(|| format!("Failed to parse config file {path}"))?
        }
        None => AppConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }
    if let Some(speed) = args.speed {
        config.world.simulation_speed = speed;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = load_config(&args)?;
    let mut world = World::new(config.clone())?;
    world.initialize(config)?;

    for _ in 0..args.ticks {
        world.tick(args.delta_ms)?;
        if args.report_every > 0 && world.tick % args.report_every == 0 {
            let report = Report {
                tick: world.tick,
                stats: &world.stats,
            };
            println!("{}", serde_json::to_string(&report)?);
        }
        if world.is_extinct() {
            tracing::info!(tick = world.tick, "Stopping early: no bumbles left");
            break;
        }
    }

    let output = if args.snapshot {
        serde_json::to_string_pretty(&world.snapshot())?
    } else {
        serde_json::to_string_pretty(&Report {
            tick: world.tick,
            stats: &world.stats,
        })?
    };
    println!("{output}");
    Ok(())
}
