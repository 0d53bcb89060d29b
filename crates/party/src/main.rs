//! Party - critters drift around a stage until every one has been clicked away
//!
//! Runs headless: frames are driven from a simulated clock and pointer
//! activations come from the command line.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use party_engine::config::Config;
use party_engine::foundation::logging;
use party_engine::foundation::time::Stopwatch;
use party_engine::render::{RenderTarget, SpriteAtlas};
use party_engine::spawn::SpawnSchedule;
use party_engine::{Engine, FrameOutcome};

mod config;
mod prefab;
mod surface;

use config::GameConfig;
use prefab::CritterFactory;
use surface::{RecordingSurface, TextSurface};

const DEFAULT_FRAMES: &str = "3600";
const DEFAULT_FRAME_MS: &str = "16.667";
const DEFAULT_CLICK_INTERVAL: &str = "30";
const ASCII_COLUMNS: usize = 96;
const ASCII_ROWS: usize = 32;

/// Command-line options after parsing
#[derive(Debug, Clone, PartialEq)]
struct RunOptions {
    frames: u64,
    frame_ms: f64,
    clicks: Vec<(f32, f32)>,
    click_interval: u64,
}

/// What happened over a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct RunSummary {
    frames: u64,
    ticks: u64,
    spawned: u64,
    clicks: u64,
    cleared: bool,
}

fn cli() -> Command {
    Command::new("party")
        .about("Headless critter party: spawn, bounce, click away")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("TOML or RON configuration file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("frames")
                .short('n')
                .long("frames")
                .value_name("COUNT")
                .help("Frames to present before exiting")
                .default_value(DEFAULT_FRAMES)
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("frame-ms")
                .long("frame-ms")
                .value_name("MILLISECONDS")
                .help("Simulated time between frames")
                .default_value(DEFAULT_FRAME_MS)
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("clicks")
                .long("clicks")
                .value_name("X,Y;X,Y;...")
                .help("Pointer activations, one applied every --click-interval frames"),
        )
        .arg(
            Arg::new("click-interval")
                .long("click-interval")
                .value_name("FRAMES")
                .help("Frames between scripted activations")
                .default_value(DEFAULT_CLICK_INTERVAL)
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .help("Override the configured random seed")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("ascii")
                .long("ascii")
                .help("Print the final frame as text")
                .action(ArgAction::SetTrue),
        )
}

/// Parse `"x,y;x,y"` into activation points
fn parse_clicks(script: &str) -> Result<Vec<(f32, f32)>> {
    script.split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (x, y) = pair
                .split_once(',')
                .with_context(|| format!("Click '{pair}' is not of the form x,y"))?;
            let x = x.trim().parse().with_context(|| format!("Invalid x in click '{pair}'"))?;
            let y = y.trim().parse().with_context(|| format!("Invalid y in click '{pair}'"))?;
            Ok((x, y))
        })
        .collect()
}

fn build_engine(config: &GameConfig) -> Result<Engine> {
    let mut engine = Engine::with_default_systems(&config.engine_config())?;

    let columns = config.critter.atlas_columns.max(1);
    let rows = config.spawn.total.div_ceil(columns).max(1);
    let cell = config.critter.size as u32;
    let atlas = engine
        .atlases_mut()
        .register(SpriteAtlas::new("critters", columns * cell, rows * cell));

    let schedule = SpawnSchedule::new(config.spawn, 0.0)?;
    // Offset so the factory and the reposition system draw different streams
    let mut factory = CritterFactory::new(config.critter, atlas, config.seed.map(|seed| seed.wrapping_add(1)));
    engine.set_spawner(schedule, move |index, viewport| factory.spawn(index, viewport));
    Ok(engine)
}

fn run(engine: &mut Engine, target: &mut dyn RenderTarget, options: &RunOptions) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    let mut clicks = options.clicks.iter();
    let interval = options.click_interval.max(1);

    for frame in 0..options.frames {
        if frame > 0 && frame % interval == 0 {
            if let Some(&(x, y)) = clicks.next() {
                let hit = engine.activate(x, y);
                log::info!("Click at ({x}, {y}) selected {} critters", hit.len());
                summary.clicks += 1;
            }
        }

        let timestamp = frame as f64 * options.frame_ms;
        match engine.frame(timestamp, target)? {
            FrameOutcome::Presented(report) => {
                summary.frames += 1;
                summary.ticks += u64::from(report.ticks);
                summary.spawned += u64::from(report.spawned);
            }
            FrameOutcome::Stopped => break,
        }

        if engine.is_cleared() {
            log::info!("Every critter has been cleared after {} frames", summary.frames);
            summary.cleared = true;
            engine.stop();
        }
    }
    Ok(summary)
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    logging::init();

    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => GameConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(seed);
    }

    let options = RunOptions {
        frames: matches.get_one::<u64>("frames").copied().unwrap_or_default(),
        frame_ms: matches.get_one::<f64>("frame-ms").copied().unwrap_or_default(),
        clicks: match matches.get_one::<String>("clicks") {
            Some(script) => parse_clicks(script)?,
            None => Vec::new(),
        },
        click_interval: matches.get_one::<u64>("click-interval").copied().unwrap_or(1),
    };

    let mut engine = build_engine(&config).context("Failed to build engine")?;
    let stopwatch = Stopwatch::start_new();

    let summary = if matches.get_flag("ascii") {
        let mut surface = TextSurface::new(ASCII_COLUMNS, ASCII_ROWS);
        let summary = run(&mut engine, &mut surface, &options)?;
        print!("{surface}");
        summary
    } else {
        let mut surface = RecordingSurface::new();
        let summary = run(&mut engine, &mut surface, &options)?;
        println!("Sprites drawn: {}", surface.total_sprites);
        summary
    };

    log::info!("Simulated {} frames in {:.1} ms", summary.frames, stopwatch.elapsed_millis());
    println!("Frames: {}", summary.frames);
    println!("Ticks: {}", summary.ticks);
    println!("Spawned: {}", summary.spawned);
    println!("Clicks: {}", summary.clicks);
    println!("Alive: {}", engine.world().len());
    println!("Cleared: {}", summary.cleared);
    Ok(())
}
