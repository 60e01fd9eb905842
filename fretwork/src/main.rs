// Fretwork practice generator: CLI entry point.
//
// Picks a scale, one of its CAGED shapes and an exercise from the built-in
// routine, prints the shape diagram and the tablature, and writes the
// exercise (forward, then over the reversed shape) to a MIDI file.
//
// Usage:
//   cargo run -p fretwork -- [output.mid] [--seed N] [--tempo BPM]
//     [--config settings.json] [--json]
//
// Set RUST_LOG=debug to see shape and walk diagnostics.

use fretwork::caged::all_caged_shapes;
use fretwork::catalog::default_exercises;
use fretwork::config::GeneratorConfig;
use fretwork::midi::{MidiScore, ScoreWriter};
use fretwork::tab::{header, render_shape, render_tab};
use fretwork::{CagedPosition, ExerciseDescriptor, Position, Shape};
use fretwork_prng::FretRng;
use serde::Serialize;
use std::error::Error;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Everything one run produced, for `--json`.
#[derive(Serialize)]
struct RunSummary<'a> {
    seed: u64,
    scale: &'a str,
    caged_position: CagedPosition,
    shape: &'a Shape,
    exercise: &'a ExerciseDescriptor,
    forward: &'a [Position],
    reverse: Option<&'a [Position]>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();

    let output_path = args
        .get(1)
        .filter(|s| !s.starts_with("--"))
        .map(|s| s.as_str())
        .unwrap_or("exercise.mid");

    let mut config = match parse_flag::<String>(&args, "--config") {
        Some(path) => match GeneratorConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => GeneratorConfig::default(),
    };
    if let Some(seed) = parse_flag(&args, "--seed") {
        config.seed = Some(seed);
    }
    if let Some(tempo) = parse_flag(&args, "--tempo") {
        config.tempo_bpm = tempo;
    }
    let dump_json = args.iter().any(|a| a == "--json");

    if let Err(e) = run(Path::new(output_path), &config, dump_json) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(output_path: &Path, config: &GeneratorConfig, dump_json: bool) -> Result<(), Box<dyn Error>> {
    let seed = config.seed.unwrap_or_else(clock_seed);
    let mut rng = FretRng::new(seed);
    info!(seed, tuning = %config.tuning, "starting generator");

    let scale_text = rng
        .choose(&config.scales)
        .ok_or("config lists no scales")?
        .as_str();
    let ctx = config.context_for(scale_text)?;

    let shapes = all_caged_shapes(&ctx)?;
    let (caged_position, shape) = rng.choose(&shapes).ok_or("no CAGED shapes")?;

    let exercises = default_exercises()?;
    let exercise = rng.choose(&exercises).ok_or("no exercises")?;

    let forward = exercise.walk(shape, false)?;
    let reverse = if config.include_reverse {
        Some(exercise.walk(shape, true)?)
    } else {
        None
    };

    let string_count = ctx.tuning.string_count();
    let shape_title = format!("{} - {} Shape", scale_text, caged_position);
    print!("{}", header(&shape_title));
    println!("{}", render_shape(string_count, shape));
    print!("{}", header(&exercise.name));
    println!("{}", render_tab(string_count, &forward));

    let mut score = MidiScore::new("Exercises", shape_title, ctx.tuning.clone());
    score.tempo_bpm = config.tempo_bpm;
    score.add_exercise(&exercise.name, &forward, exercise.feel)?;
    if let Some(reverse) = &reverse {
        score.add_exercise("", reverse, exercise.feel)?;
    }
    score.write(output_path)?;
    println!(
        "Wrote {} notes in {} measures ({}, {} BPM) to {}",
        score.note_count(),
        score.measure_count(),
        exercise.feel,
        config.tempo_bpm,
        output_path.display()
    );

    if dump_json {
        let summary = RunSummary {
            seed,
            scale: scale_text,
            caged_position: *caged_position,
            shape,
            exercise,
            forward: &forward,
            reverse: reverse.as_deref(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
