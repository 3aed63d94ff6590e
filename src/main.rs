use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use kira_lmscentile::error::AppError;
use kira_lmscentile::input::load_measurements;
use kira_lmscentile::logging;
use kira_lmscentile::model::{CentileCalculator, NormalDistribution, StandardNormal};
use kira_lmscentile::pipeline::stage1_score::run_stage1;
use kira_lmscentile::pipeline::stage2_report::{Stage2Input, write_reports};
use kira_lmscentile::report::format_f64_6;
use kira_lmscentile::report::json::render_score_json;
use kira_lmscentile::table::loader::load_table;
use kira_lmscentile::table::{ReferenceTable, TableKind};

#[derive(Debug, Parser)]
#[command(
    name = "kira-lmscentile",
    version,
    about = "LMS growth-reference z-scores and centiles"
)]
struct Cli {
    /// Default log filter; RUST_LOG overrides it.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct TableArgs {
    /// Reference table: rows of `covariate L M S`, optionally gzip-compressed.
    #[arg(long)]
    table: PathBuf,

    /// height-age | weight-age | bmi-age | hc-age | weight-height
    #[arg(long)]
    kind: Option<TableKind>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// z-score and centile of one measurement.
    Score {
        #[command(flatten)]
        table: TableArgs,
        #[arg(long)]
        value: f64,
        #[arg(long)]
        at: f64,
        #[arg(long)]
        json: bool,
    },
    /// Standard normal centile of a z-score.
    Centile {
        #[arg(long, allow_negative_numbers = true)]
        z: f64,
    },
    /// Reference measurement at a z-score or centile.
    Value {
        #[command(flatten)]
        table: TableArgs,
        #[arg(long)]
        at: f64,
        #[arg(
            long,
            allow_negative_numbers = true,
            conflicts_with = "centile",
            required_unless_present = "centile"
        )]
        z: Option<f64>,
        /// Probability in (0, 1).
        #[arg(long)]
        centile: Option<f64>,
    },
    /// Score a TSV of measurements and write centiles.tsv, summary.json and report.txt.
    Batch {
        #[command(flatten)]
        table: TableArgs,
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log_level);
    if let Err(err) = run(cli.command) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), AppError> {
    let normal = StandardNormal;

    match command {
        Command::Score {
            table,
            value,
            at,
            json,
        } => {
            let table = open_table(&table)?;
            let mut calc = CentileCalculator::new(&table, &normal);
            let score = calc.score(value, at)?;
            if json {
                println!("{}", render_score_json(table.name(), value, at, &score)?);
            } else {
                println!("table\t{}", table.name());
                println!("L\t{}", format_f64_6(score.lms.l));
                println!("M\t{}", format_f64_6(score.lms.m));
                println!("S\t{}", format_f64_6(score.lms.s));
                println!("z_score\t{}", format_f64_6(score.z));
                println!("centile\t{}", format_f64_6(score.centile));
                println!("percent\t{:.2}", score.centile * 100.0);
                println!("extrapolated\t{}", score.extrapolated);
            }
        }
        Command::Centile { z } => {
            println!("{}", format_f64_6(normal.cdf(z)));
        }
        Command::Value {
            table,
            at,
            z,
            centile,
        } => {
            let table = open_table(&table)?;
            let mut calc = CentileCalculator::new(&table, &normal);
            let value = match z {
                Some(z) => calc.value_at(z, at)?,
                None => calc.value_for_centile(centile.unwrap_or(f64::NAN), at)?,
            };
            println!("{}", format_f64_6(value));
        }
        Command::Batch { table, input, out } => {
            let table = open_table(&table)?;
            let measurements = load_measurements(&input)?;
            info!(
                "read {} measurements from {}",
                measurements.len(),
                input.display()
            );
            let mut calc = CentileCalculator::new(&table, &normal);
            let stage1 = run_stage1(&mut calc, &measurements);
            let summary = write_reports(
                &Stage2Input {
                    table: &table,
                    stage1: &stage1,
                    tool_name: "kira-lmscentile".to_string(),
                    tool_version: env!("CARGO_PKG_VERSION").to_string(),
                },
                &out,
            )?;
            info!(
                "wrote reports to {} ({} scored, {} failed)",
                out.display(),
                summary.n_scored,
                summary.n_failed
            );
        }
    }
    Ok(())
}

fn open_table(args: &TableArgs) -> Result<ReferenceTable, AppError> {
    let table = load_table(&args.table).map_err(|source| AppError::Table {
        path: args.table.clone(),
        source,
    })?;
    Ok(match args.kind {
        Some(kind) => table.with_kind(kind),
        None => table,
    })
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
