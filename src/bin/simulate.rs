//! Balance simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                       # 500 runs, default tuning
//!   cargo run --bin simulate -- -n 100 --seed 42   # reproducible batch
//!   cargo run --bin simulate -- --config game.json --json
//!   cargo run --bin simulate -- --store -q         # best score kept in ~/.skyward

use anyhow::{bail, Context, Result};
use skyward::build_info::version_line;
use skyward::config::GameConfig;
use skyward::simulator::{run_simulation, run_simulation_with_store, SimConfig, SimReport};
use skyward::utils::init_logging;
use skyward::{JsonFileStore, KeyValueStore, BEST_SCORE_KEY};
use std::env;
use std::path::Path;

struct Options {
    sim: SimConfig,
    write_json: bool,
    use_store: bool,
}

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let Some(options) = parse_args(&args)? else {
        print_help();
        return Ok(());
    };
    let config = options.sim;

    if config.verbosity >= 1 {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              SKYWARD BALANCE SIMULATOR                        ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!("  Build:          {}", version_line());
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", config.num_runs);
        println!("  Step:           {:.4}s", config.step_secs);
        println!("  Time Limit:     {:.0}s", config.max_secs_per_run);
        println!(
            "  Crash Odds:     {:.1}% + {:.1}% x narrowness",
            config.base_crash_chance * 100.0,
            config.narrow_gap_penalty * 100.0
        );
        println!("  Pool Size:      {}", config.game.pool_size);
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    let report = if options.use_store {
        simulate_with_saved_best(&config)?
    } else {
        run_simulation(&config).context("simulation config rejected")?
    };
    println!("{}", report.to_text());

    if options.write_json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json())
            .with_context(|| format!("failed to write {}", filename))?;
        if config.verbosity >= 1 {
            println!("JSON report saved to: {}", filename);
        }
    }

    Ok(())
}

/// Play the batch against `~/.skyward/storage.json` so the best score
/// survives between invocations.
fn simulate_with_saved_best(config: &SimConfig) -> Result<SimReport> {
    let store = JsonFileStore::open_default().context("failed to open ~/.skyward store")?;
    if config.verbosity >= 1 {
        println!("Best score store: {}", store.path().display());
        println!(
            "  Saved best:     {}",
            store.get(BEST_SCORE_KEY).unwrap_or_else(|| "none".to_string())
        );
        println!();
    }
    let (report, _) =
        run_simulation_with_store(config, store).context("simulation config rejected")?;
    Ok(report)
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    match args.get(i + 1) {
        Some(v) => Ok(v.as_str()),
        None => bail!("{} needs a value", flag),
    }
}

/// Returns `None` when help was requested.
fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut sim = SimConfig::default();
    let mut write_json = false;
    let mut use_store = false;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-n" | "--runs" => {
                sim.num_runs = value(args, i, flag)?
                    .parse()
                    .with_context(|| format!("invalid {}", flag))?;
                i += 1;
            }
            "-s" | "--seed" => {
                sim.seed = Some(
                    value(args, i, flag)?
                        .parse()
                        .with_context(|| format!("invalid {}", flag))?,
                );
                i += 1;
            }
            "-t" | "--time-limit" => {
                sim.max_secs_per_run = value(args, i, flag)?
                    .parse()
                    .with_context(|| format!("invalid {}", flag))?;
                i += 1;
            }
            "--crash" => {
                sim.base_crash_chance = value(args, i, flag)?
                    .parse()
                    .with_context(|| format!("invalid {}", flag))?;
                i += 1;
            }
            "--narrow-penalty" => {
                sim.narrow_gap_penalty = value(args, i, flag)?
                    .parse()
                    .with_context(|| format!("invalid {}", flag))?;
                i += 1;
            }
            "-c" | "--config" => {
                let path = value(args, i, flag)?;
                sim.game = GameConfig::load(Path::new(path))
                    .with_context(|| format!("failed to load config {}", path))?;
                sim.bird_x = sim.game.field_width * 0.1;
                i += 1;
            }
            "-v" | "--verbose" => sim.verbosity = 2,
            "-q" | "--quiet" => sim.verbosity = 0,
            "--json" => write_json = true,
            "--store" => use_store = true,
            "-h" | "--help" => return Ok(None),
            other => bail!("unknown option {} (try --help)", other),
        }
        i += 1;
    }

    Ok(Some(Options {
        sim,
        write_json,
        use_store,
    }))
}

fn print_help() {
    println!("Skyward Balance Simulator");
    println!();
    println!("Usage: simulate [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -n, --runs <N>           Number of games to play (default: 500)");
    println!("  -s, --seed <N>           Random seed for reproducibility");
    println!("  -t, --time-limit <SECS>  Cut a game off after this long (default: 600)");
    println!("      --crash <P>          Crash chance at every gap (default: 0.01)");
    println!("      --narrow-penalty <P> Extra crash chance for narrow gaps (default: 0.2)");
    println!("  -c, --config <FILE>      Game config JSON (missing fields use defaults)");
    println!("  -v, --verbose            Log every game");
    println!("  -q, --quiet              Only print the report");
    println!("      --store              Load and save the best score in ~/.skyward");
    println!("      --json               Also save the report as JSON");
    println!("  -h, --help               Show this help");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("simulate")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_quiet_drops_to_report_only() {
        let options = parse_args(&args(&["-q"])).unwrap().unwrap();
        assert_eq!(options.sim.verbosity, 0);
        let options = parse_args(&args(&[])).unwrap().unwrap();
        assert_eq!(options.sim.verbosity, 1);
    }

    #[test]
    fn test_store_flag() {
        let options = parse_args(&args(&["--store", "-n", "3"])).unwrap().unwrap();
        assert!(options.use_store);
        assert_eq!(options.sim.num_runs, 3);
        assert!(!parse_args(&args(&[])).unwrap().unwrap().use_store);
    }

    #[test]
    fn test_help_and_unknown_flags() {
        assert!(parse_args(&args(&["--help"])).unwrap().is_none());
        assert!(parse_args(&args(&["--bogus"])).is_err());
        assert!(parse_args(&args(&["-n"])).is_err());
    }
}
