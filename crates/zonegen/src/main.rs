//! zonegen: generate a zone map from the command line
//!
//! Builds a configuration from an optional JSON file plus flags, runs one
//! generation, and prints the result as ASCII or JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{LevelFilter, warn};

use zg_core::map::HeightField;
use zg_core::{ConnectMode, GeneratorConfig, MapExport, MapGenerator, Seed};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum Format {
    #[default]
    Ascii,
    Json,
}

/// Zone map generator
#[derive(Parser, Debug)]
#[command(name = "zonegen")]
#[command(author, version, about = "Generate a connected zone map", long_about = None)]
struct Args {
    /// Base configuration (JSON); flags override its values
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Height field (JSON rows of floats) matching the grid size
    #[arg(long = "heights")]
    heights: Option<PathBuf>,

    #[arg(short = 'W', long)]
    width: Option<i32>,

    #[arg(short = 'H', long)]
    height: Option<i32>,

    /// Seed text; an unsigned integer is used as the raw seed value
    #[arg(short = 's', long)]
    seed: Option<String>,

    /// Seed from the clock instead
    #[arg(long = "random-seed")]
    random_seed: bool,

    #[arg(long)]
    fill_percent: Option<u32>,

    #[arg(long)]
    secondary_weight: Option<u32>,

    #[arg(long)]
    smooth_iterations: Option<u32>,

    #[arg(long)]
    erase_iterations: Option<u32>,

    #[arg(long)]
    erase_run_length: Option<u32>,

    /// Empty regions smaller than this are absorbed
    #[arg(long, allow_negative_numbers = true)]
    wall_threshold: Option<i32>,

    /// Zone regions smaller than this are cleared
    #[arg(long, allow_negative_numbers = true)]
    room_threshold: Option<i32>,

    /// Passage metric: straight or pathfinding
    #[arg(short = 'm', long)]
    mode: Option<ConnectMode>,

    #[arg(long, allow_negative_numbers = true)]
    passage_radius: Option<i32>,

    /// Lower bound of the passable height interval
    #[arg(long)]
    obstacle_low: Option<f32>,

    /// Upper bound of the passable height interval
    #[arg(long)]
    obstacle_high: Option<f32>,

    #[arg(long)]
    strict_obstacles: bool,

    #[arg(long)]
    skip_carved_discs: bool,

    #[arg(long)]
    border_size: Option<usize>,

    #[arg(short = 'f', long, value_enum, default_value_t = Format::Ascii)]
    format: Format,

    /// Print the grid with its wall border
    #[arg(short = 'b', long)]
    bordered: bool,

    /// Debug logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn parse_seed(text: &str) -> Seed {
    match text.parse::<u64>() {
        Ok(n) => Seed::Number(n),
        Err(_) => Seed::from(text),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Merge the config file, height file and flags into one configuration
fn build_config(args: &Args) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => read_json::<GeneratorConfig>(path)?,
        None => GeneratorConfig::default(),
    };

    if let Some(path) = &args.heights {
        config.height_field = Some(read_json::<HeightField>(path)?);
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(seed) = &args.seed {
        config.seed = parse_seed(seed);
    }
    config.use_random_seed |= args.random_seed;
    if let Some(v) = args.fill_percent {
        config.fill_percent = v;
    }
    if let Some(v) = args.secondary_weight {
        config.secondary_weight = v;
    }
    if let Some(v) = args.smooth_iterations {
        config.smooth_iterations = v;
    }
    if let Some(v) = args.erase_iterations {
        config.erase_iterations = v;
    }
    if let Some(v) = args.erase_run_length {
        config.erase_run_length = v;
    }
    if let Some(v) = args.wall_threshold {
        config.region_thresholds.wall = v;
    }
    if let Some(v) = args.room_threshold {
        config.region_thresholds.room = v;
    }

    let connectivity = &mut config.connectivity;
    if let Some(mode) = args.mode {
        connectivity.mode = mode;
    }
    if let Some(v) = args.passage_radius {
        connectivity.passage_radius = v;
    }
    if let Some(low) = args.obstacle_low {
        connectivity.obstacle_bounds.0 = low;
    }
    if let Some(high) = args.obstacle_high {
        connectivity.obstacle_bounds.1 = high;
    }
    connectivity.strict_obstacles |= args.strict_obstacles;
    connectivity.skip_carved_discs |= args.skip_carved_discs;

    if let Some(v) = args.border_size {
        config.border_size = v;
    }
    Ok(config)
}

fn init_logging(verbose: bool) -> Result<()> {
    use simplelog::LevelFilter::Off;
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    simplelog::TermLogger::init(
        level,
        simplelog::ConfigBuilder::new()
            .set_target_level(Off)
            .set_location_level(Off)
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let config = build_config(&args)?;
    let generator = MapGenerator::new(config).context("invalid configuration")?;
    let map = generator.generate();

    match args.format {
        Format::Json => {
            let json = MapExport::from(&map)
                .to_json()
                .context("serializing map")?;
            println!("{json}");
        }
        Format::Ascii => {
            let grid = if args.bordered { &map.bordered } else { &map.grid };
            print!("{grid}");
            println!("seed: {} ({})", map.seed, map.seed_value);
            println!(
                "rooms: {}, passages: {}",
                map.rooms.len(),
                map.report.connections.len()
            );
            if !map.report.unreachable.is_empty() {
                let ids: Vec<String> = map
                    .report
                    .unreachable
                    .iter()
                    .map(|id| id.0.to_string())
                    .collect();
                println!("unreachable: {}", ids.join(", "));
            }
        }
    }

    if !map.report.is_fully_connected() {
        warn!(
            "{} of {} rooms cannot reach the main room",
            map.report.unreachable.len(),
            map.rooms.len()
        );
    }
    Ok(())
}
