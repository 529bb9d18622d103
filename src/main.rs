use neutsim::{bench_tick, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use log::info;

use std::path::PathBuf;
use std::process::exit;

// the grid doubles this for spare slots
const MAX_NEUTRONS: u64 = 1 << 32;

#[derive(Parser, Debug)]
#[command(about = "Random walk of a neutron population with capture, scatter and fission")]
struct Args {
    /// Number of neutrons to simulate
    #[arg(value_parser = clap::value_parser!(u64).range(0..=MAX_NEUTRONS))]
    neutrons: u64,

    /// Scenario YAML, either a path or a name under `scenarios/`
    #[arg(short, long)]
    file_name: Option<String>,

    /// Override the number of ticks from the scenario
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the seed from the scenario
    #[arg(long)]
    seed: Option<u64>,

    /// Time `tick` over a range of population sizes instead of running
    #[arg(long)]
    bench: bool,
}

fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            exit(0);
        }
        Err(e) => {
            eprintln!("Must have one command line argument: the number of neutrons to simulate.");
            let _ = e.print();
            exit(1);
        }
    }
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    let Some(file_name) = &args.file_name else {
        return Ok(ScenarioConfig::default());
    };

    let direct = PathBuf::from(file_name);
    let config_path = if direct.exists() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    let cfg = ScenarioConfig::from_yaml_file(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;
    Ok(cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();
    let mut cfg = load_scenario(&args)?;
    if let Some(seed) = args.seed {
        cfg.run.seed = seed;
    }
    if let Some(ticks) = args.ticks {
        cfg.run.ticks = ticks;
    }

    if args.bench {
        bench_tick(&cfg)?;
        return Ok(());
    }

    let mut scenario = Scenario::build_scenario(&cfg, usize::try_from(args.neutrons)?)?;
    let totals = scenario.run(cfg.run.ticks);

    info!(
        "done: {} ticks, {} captures, {} fissions, {} scatters, {} progeny, {} live of {} slots",
        scenario.ticks,
        totals.captures,
        totals.fissions,
        totals.scatters,
        totals.progeny,
        scenario.population().live_count(),
        scenario.population().len()
    );

    Ok(())
}
