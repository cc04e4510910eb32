//! Headless playthrough simulator
//!
//! Grows a single tree day by day from an action script and reports growth,
//! evolution and mesh statistics.
//!
//! Usage:
//!     grow_tree [OPTIONS]
//!
//! Options:
//!     -d, --days <N>          Days to simulate (default: 50)
//!     --seed <SEED>           Tree seed (default: 12345)
//!     -c, --config <PATH>     Tree settings JSON (default: built-in settings)
//!     -s, --script <ACTIONS>  Action per day, cycled: w=water f=fertilize k=kotodama (default: wfk)
//!     --json                  Print final stats as JSON
//!     -h, --help              Show this help message

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use kodama::core::logging;
use kodama::growth::EvolutionEvent;
use kodama::tree::{Tree, TreeSettings, UpdateParams};

/// Simulated frames per day.
const TICKS_PER_DAY: u32 = 60;
/// Seconds per simulated frame.
const FRAME_TIME: f32 = 1.0 / 60.0;
/// Growth increment passed to water and fertilize.
const ACTION_INCREMENT: f32 = 5.0;

fn print_help() {
    eprintln!("grow_tree - Headless playthrough simulator");
    eprintln!();
    eprintln!("Usage: grow_tree [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("    -d, --days <N>          Days to simulate (default: 50)");
    eprintln!("    --seed <SEED>           Tree seed (default: 12345)");
    eprintln!("    -c, --config <PATH>     Tree settings JSON (default: built-in settings)");
    eprintln!("    -s, --script <ACTIONS>  Action per day, cycled: w=water f=fertilize k=kotodama (default: wfk)");
    eprintln!("    --json                  Print final stats as JSON");
    eprintln!("    -h, --help              Show this help message");
    eprintln!();
    eprintln!("Example:");
    eprintln!("    grow_tree --days 30 --script wwk");
    eprintln!("    RUST_LOG=kodama=debug grow_tree --seed 42 --json");
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    Water,
    Fertilize,
    Kotodama,
}

#[derive(Debug)]
struct Args {
    days: u32,
    seed: u64,
    config: Option<PathBuf>,
    script: Vec<Action>,
    json: bool,
}

fn parse_script(script: &str) -> Result<Vec<Action>, String> {
    let actions = script
        .chars()
        .map(|c| match c.to_ascii_lowercase() {
            'w' => Ok(Action::Water),
            'f' => Ok(Action::Fertilize),
            'k' => Ok(Action::Kotodama),
            other => Err(format!("Unknown action '{}'. Valid actions: w, f, k", other)),
        })
        .collect::<Result<Vec<_>, _>>()?;
    if actions.is_empty() {
        return Err("Empty script".to_string());
    }
    Ok(actions)
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut days: u32 = 50;
    let mut seed: u64 = 12345;
    let mut config: Option<PathBuf> = None;
    let mut script = vec![Action::Water, Action::Fertilize, Action::Kotodama];
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-d" | "--days" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --days".to_string());
                }
                days = args[i].parse().map_err(|_| format!("Invalid days: {}", args[i]))?;
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --seed".to_string());
                }
                seed = args[i].parse().map_err(|_| format!("Invalid seed: {}", args[i]))?;
            }
            "-c" | "--config" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --config".to_string());
                }
                config = Some(PathBuf::from(&args[i]));
            }
            "-s" | "--script" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --script".to_string());
                }
                script = parse_script(&args[i])?;
            }
            "--json" => json = true,
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    Ok(Args { days, seed, config, script, json })
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    logging::init();

    let settings = match &args.config {
        Some(path) => TreeSettings::load_or_default(path),
        None => TreeSettings::default(),
    };
    let mut tree = Tree::with_seed(settings, args.seed);

    let start = Instant::now();
    let mut elapsed = 0.0f32;
    let mut rebuilds = 0u32;

    for day in 0..args.days {
        if tree.is_game_over() {
            log::info!("Final day reached, stopping");
            break;
        }

        match args.script[day as usize % args.script.len()] {
            Action::Water => tree.water(1.0, 0, ACTION_INCREMENT),
            Action::Fertilize => tree.fertilize(1.0, 0, ACTION_INCREMENT),
            Action::Kotodama => tree.kotodama(1.0),
        }

        for _ in 0..TICKS_PER_DAY {
            elapsed += FRAME_TIME;
            let params = UpdateParams { elapsed, ..Default::default() };
            if tree.update(&params) {
                rebuilds += 1;
            }
        }

        for event in tree.increment_day() {
            match event {
                EvolutionEvent::Growth(t) => println!("Day {}: evolved into {:?}", tree.day_count(), t),
                EvolutionEvent::Flower(f) => println!("Day {}: flower type {:?}", tree.day_count(), f),
            }
        }

        log::info!(
            "Day {}: length {:.1}, thickness {:.1}, mutation {:.2}, depth {} ({:.0}%)",
            tree.day_count(),
            tree.length(),
            tree.thickness(),
            tree.mutation(),
            tree.depth_level(),
            tree.depth_progress() * 100.0
        );
    }

    let stats = tree.stats();
    let wall = start.elapsed();

    if args.json {
        match serde_json::to_string_pretty(&stats) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing stats: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!();
    println!("Summary:");
    println!("  Day: {}", stats.day);
    println!("  Growth type: {:?}", stats.growth_type);
    println!("  Flower type: {:?}", stats.flower_type);
    println!("  Depth level: {}", stats.depth_level);
    println!("  Peak mutation: {:.2}{}", stats.max_mutation, if stats.bloomed { " (bloomed)" } else { "" });
    println!("  Mesh: {} vertices, {} triangles", stats.vertices, stats.triangles);
    println!("  Parts: {} stems, {} leaves, {} flowers", stats.stems, stats.leaves, stats.flowers);
    println!("  Rebuilds: {}", rebuilds);
    println!("  Total time: {:.2}s", wall.as_secs_f64());
}
