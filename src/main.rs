// Copyright (C) 2025. See LICENSE for details.

//! Command line explorer: builds the base flex library, expands it over
//! the given flexagon's ring size, and maps the reachable state space.
//!
//! Usage: `flex [FLEXAGON]` where FLEXAGON is a literal such as
//! `[[1,2],3,[4,5],6]`. Defaults to that four-pat example.

use flex_search::explore::Counters;
use flex_search::flex::set::{rotate_left, rotate_right, turn_over};
use flex_search::flex::FlexRotation;
use flex_search::{make_atomic_flexes, Explore, FlexError, Flexagon, FlexSet};
use std::process::ExitCode;
use tracing::info;

fn run(literal: &str) -> Result<(), String> {
    let flexagon: Flexagon = literal.parse().map_err(|e| format!("{literal}: {e}"))?;
    if !flexagon.validate_ids() {
        return Err(format!("{literal}: leaf ids must cover 1..N exactly once"));
    }
    let n = flexagon.pat_count();

    let mut flexes = FlexSet::new();
    let add = |set: &mut FlexSet, flex: Result<flex_search::Flex, FlexError>| {
        if let Ok(flex) = flex {
            set.add(flex);
        }
    };
    add(&mut flexes, rotate_right(n));
    add(&mut flexes, rotate_left(n));
    add(&mut flexes, turn_over(n));

    let library = make_atomic_flexes().map_err(|e| e.to_string())?;
    for atomic in library.iter() {
        // building blocks with no ring form are simply skipped
        if let Ok(flex) = atomic.as_flex(n, FlexRotation::None) {
            flexes.add(flex);
        }
    }
    info!(pats = n, flexes = flexes.len(), "flex set ready");

    let mut explore = Explore::new(&flexagon, flexes.iter().cloned().collect());
    explore.explore_all();

    println!("start:           {flexagon}");
    println!("distinct states: {}", explore.total_states());
    println!(
        "flexes tried:    {}",
        explore.statistics().get(Counters::FlexesTried)
    );
    println!(
        "flexes applied:  {}",
        explore.statistics().get(Counters::FlexesApplied)
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let literal = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "[[1,2],3,[4,5],6]".to_string());
    match run(&literal) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
