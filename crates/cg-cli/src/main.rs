//! cryptgen: generate a dungeon layout from the command line
//!
//! Prints the layout as text (default) or JSON. A JSON config file can be
//! loaded with `--config`; individual flags override its values.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};

use cg_core::dungeon::Neighborhood;
use cg_core::render::{RenderOptions, legend, render_ascii};
use cg_core::{EventableMode, GenerationConfig, Generator, SeedSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Ascii,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Random sample of isolated corridor cells
    Random,
    /// Straight runs of isolated corridor
    Runs,
}

/// Procedural dungeon layout generator
#[derive(Parser, Debug)]
#[command(name = "cryptgen")]
#[command(author, version, about = "Generate a connected grid dungeon", long_about = None)]
struct Args {
    /// JSON config file; flags below override it
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(short = 'W', long)]
    width: Option<i32>,

    /// Grid height in cells
    #[arg(short = 'H', long)]
    height: Option<i32>,

    /// RNG seed (system entropy if omitted)
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Smallest room side
    #[arg(long)]
    min_room: Option<i32>,

    /// Largest room side
    #[arg(long)]
    max_room: Option<i32>,

    /// Stop after this many rooms (0 = no limit)
    #[arg(short = 'r', long)]
    rooms: Option<i32>,

    /// Chance that a partition leaf gets a room
    #[arg(long)]
    density: Option<f64>,

    /// Chance of an extra corridor per room pair
    #[arg(long)]
    connectivity: Option<f64>,

    /// Corridor width (1-3)
    #[arg(long)]
    corridor_width: Option<i32>,

    /// Longest straight corridor piece
    #[arg(long)]
    max_straight: Option<i32>,

    /// Chance that a short straight piece bends
    #[arg(long)]
    bend: Option<f64>,

    /// Count diagonal neighbors when tagging room-adjacent corridor
    #[arg(long)]
    eight: bool,

    /// Eventable selection mode
    #[arg(short = 'm', long, value_enum)]
    mode: Option<Mode>,

    /// Random mode: -1 = all, 0 = use --ratio, N = at most N cells
    #[arg(long, allow_negative_numbers = true)]
    count: Option<i32>,

    /// Random mode: fraction of isolated cells when --count is 0
    #[arg(long)]
    ratio: Option<f64>,

    /// Run mode: shortest eventable run
    #[arg(long)]
    min_run: Option<i32>,

    /// Run mode: longest eventable run
    #[arg(long)]
    max_run: Option<i32>,

    /// Run mode: allow runs that touch rooms
    #[arg(long)]
    ignore_adjacency: bool,

    /// Minimum distance between start and goal room centers
    #[arg(long)]
    min_distance: Option<f64>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = Format::Ascii)]
    format: Format,

    /// Draw plain corridors instead of corridor classes
    #[arg(long)]
    no_overlay: bool,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<GenerationConfig> {
    match path {
        Some(path) => {
            debug!("loading config from {}", path.display());
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse config {}", path.display()))
        }
        None => Ok(GenerationConfig::default()),
    }
}

/// Fold command-line overrides into a config
fn apply_args(config: &mut GenerationConfig, args: &Args) {
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(seed) = args.seed {
        config.seed = SeedSource::Fixed(seed);
    }
    if let Some(min) = args.min_room {
        config.rooms.min_size = min;
    }
    if let Some(max) = args.max_room {
        config.rooms.max_size = max;
    }
    if let Some(rooms) = args.rooms {
        config.rooms.target_count = rooms;
    }
    if let Some(density) = args.density {
        config.rooms.density = density;
    }
    if let Some(connectivity) = args.connectivity {
        config.corridors.connectivity = connectivity;
    }
    if let Some(width) = args.corridor_width {
        config.corridors.width = width;
    }
    if let Some(max) = args.max_straight {
        config.corridors.max_straight_length = max;
    }
    if let Some(bend) = args.bend {
        config.corridors.bend_probability = bend;
    }
    if args.eight {
        config.adjacency = Neighborhood::Eight;
    }
    if let Some(distance) = args.min_distance {
        config.min_room_distance = distance;
    }

    // Switching mode starts from that mode's defaults
    match args.mode {
        Some(Mode::Random) if !matches!(config.eventable, EventableMode::Random { .. }) => {
            config.eventable = EventableMode::default();
        }
        Some(Mode::Runs) if !matches!(config.eventable, EventableMode::RunDetection { .. }) => {
            config.eventable = EventableMode::RunDetection {
                min_length: 3,
                max_length: 6,
                ignore_room_adjacency: false,
            };
        }
        _ => {}
    }

    match &mut config.eventable {
        EventableMode::Random { count, ratio } => {
            if let Some(c) = args.count {
                *count = c;
            }
            if let Some(r) = args.ratio {
                *ratio = r;
            }
        }
        EventableMode::RunDetection {
            min_length,
            max_length,
            ignore_room_adjacency,
        } => {
            if let Some(min) = args.min_run {
                *min_length = min;
            }
            if let Some(max) = args.max_run {
                *max_length = max;
            }
            *ignore_room_adjacency |= args.ignore_adjacency;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = load_config(args.config.as_ref())?;
    apply_args(&mut config, &args);

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let generator = Generator::new(config).context("Invalid generation config")?;
    let layout = generator.generate()?;
    info!("seed {}", layout.seed);

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&layout)?),
        Format::Ascii => {
            let options = RenderOptions {
                overlay: !args.no_overlay,
                markers: true,
            };
            print!("{}", render_ascii(&layout, options));
            println!();
            println!("seed: {}", layout.seed);
            println!("{}", layout.stats);
            match layout.start_goal {
                Some(sg) => println!(
                    "start: room {} / goal: room {} ({:.1} apart)",
                    sg.start, sg.goal, sg.distance
                ),
                None => println!("start/goal: none"),
            }
            if args.verbose {
                for line in legend(options) {
                    println!("  {line}");
                }
            }
        }
    }

    Ok(())
}
