//! Command-line wrapper for the Royal Road experiment.
//!
//! Runs experiment 1A (8-segment schema, or the overlapping
//! 10-segment schema with the `O` option) or 1B (14-segment schema)
//! and prints the generation count followed by the per-generation
//! schema percentages as delimited text.

use royal_road::{EngineConfig, Experiment, RoyalRoad};

use rand::rngs::StdRng;
use rand::SeedableRng;

use std::env;
use std::process;

fn usage() -> ! {
    eprintln!("usage: runroyal <1A [O] | 1B> [seed]");
    process::exit(2);
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let experiment = match args.first().map(|arg| arg.parse::<Experiment>()) {
        Some(Ok(experiment)) => experiment,
        _ => usage(),
    };

    let mut overlap = false;
    let mut seed = None;
    for arg in &args[1..] {
        if arg == "O" && experiment == Experiment::A && !overlap {
            overlap = true;
        } else if seed.is_none() {
            match arg.parse::<u64>() {
                Ok(value) => seed = Some(value),
                Err(_) => usage(),
            }
        } else {
            usage();
        }
    }

    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let variant = experiment.variant(overlap);
    let run = match RoyalRoad::new(variant, EngineConfig::default(), rng) {
        Ok(run) => run,
        Err(err) => {
            eprintln!("runroyal: {}", err);
            process::exit(1);
        }
    };

    println!("Optimal score = {}", run.optimal_score());

    let report = run.find_optimal();

    // Generations to find the optimal, 0 if not found. The printed
    // series are capped to that count, so a run that exhausts the cap
    // reports empty series even though the engine recorded them all.
    let generations = report.generations_to_solve();
    println!("{}", generations);

    print_series("s8%", report.history.schema8().take(generations));
    if experiment == Experiment::B {
        print_series("s12%", report.history.schema12().take(generations));
        print_series("s14%", report.history.schema14().take(generations));
    }
    println!();
}

fn print_series(label: &str, values: impl Iterator<Item = u32>) {
    print!("{}, ", label);
    for value in values {
        print!("{},", value);
    }
    println!();
}
