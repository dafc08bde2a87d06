//! Interactive car configurator demo.
//!
//! Replays the classic two-selection scenarios against the built-in car
//! table (or a table loaded from JSON), printing the still-possible values
//! for every attribute after each choice. Each choice is first explored
//! under a checkpoint; only a feasible choice is committed to the baseline.

use std::{error::Error, fs, path::PathBuf};

use clap::Parser;
use prettytable::{row, Table};
use tracing_subscriber::EnvFilter;
use trellis::{
    catalog::{car, ConfigTable, Labels},
    solver::engine::{Engine, Propagation},
};

#[derive(Parser)]
#[command(name = "configurator", about = "Interactive car configurator demo")]
struct Args {
    /// Path to a JSON configuration table; defaults to the built-in car table.
    #[arg(long)]
    table: Option<PathBuf>,

    /// Scenario to replay (1-10).
    #[arg(long, default_value_t = 1)]
    scenario: usize,
}

/// The two selections of each scenario, as (variable, value) pairs.
fn scenarios() -> Vec<[(&'static str, i64); 2]> {
    vec![
        [("model", car::model::LIMOUSINE), ("motor", 140)],
        [("model", car::model::LIMOUSINE), ("motor", 220)],
        [("model", car::model::LIMOUSINE), ("color", car::color::BLUE)],
        [("model", car::model::LIMOUSINE), ("color", car::color::GRAY)],
        [("model", car::model::COMBI), ("color", car::color::GRAY)],
        [("model", car::model::VAN), ("motor", 260)],
        [("model", car::model::CABRIO), ("motor", 100)],
        [("model", car::model::CABRIO), ("motor", 260)],
        [("model", car::model::CABRIO), ("color", car::color::RED)],
        [("model", car::model::CABRIO), ("color", car::color::WHITE)],
    ]
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let table = match &args.table {
        Some(path) => ConfigTable::from_json(&fs::read_to_string(path)?)?,
        None => car::table(),
    };
    let (mut engine, labels) = table.build()?;

    let selections = *scenarios()
        .get(args.scenario.wrapping_sub(1))
        .ok_or("scenario must be between 1 and 10")?;

    println!("------ INITIAL DOMAINS ------");
    print_domains(&engine, &labels);

    for (name, value) in selections {
        let var = engine.variable(name)?;
        println!(
            "\n------ User selects {} = {} ------",
            name.to_uppercase(),
            labels.label(var, value)
        );

        // Explore the choice under a checkpoint; commit it only if feasible.
        let checkpoint = engine.checkpoint();
        engine.restrict(var, value)?;
        match engine.propagate() {
            Propagation::Consistent(_) => {
                engine.rollback(checkpoint)?;
                engine.restrict(var, value)?;
                engine.propagate();
            }
            Propagation::Contradiction { variable } => {
                println!(
                    "There is a contradiction: no value left for {}.",
                    engine.variable_name(variable)?
                );
                engine.rollback(checkpoint)?;
            }
        }
        print_domains(&engine, &labels);
    }

    Ok(())
}

fn print_domains(engine: &Engine, labels: &Labels) {
    let mut table = Table::new();
    table.add_row(row!["Attribute", "Still possible"]);
    for (var, name) in engine.variables() {
        let rendered: Vec<String> = engine
            .domain_of(var)
            .unwrap_or_default()
            .into_iter()
            .map(|value| labels.label(var, value))
            .collect();
        table.add_row(row![name, rendered.join(", ")]);
    }
    table.printstd();
}
