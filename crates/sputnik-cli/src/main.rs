//! sputnik CLI - command-line driver for the CDCL solver.
//!
//! Takes a DIMACS CNF file and prints the verdict in DIMACS solver
//! conventions (`s ...` / `v ... 0` lines). Exit code 10 on SAT, 20 on
//! UNSAT, 0 on unknown, 1 on error.

use anyhow::Context;
use clap::Parser;
use sputnik_cdcl::{CdclConfig, CdclSolver, SatResult};
use sputnik_format::{DimacsCnf, ReportStats, SolveReport, SolveStatus};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const EXIT_SAT: u8 = 10;
const EXIT_UNSAT: u8 = 20;

#[derive(Parser)]
#[command(name = "sputnik")]
#[command(author, version, about = "A compact CDCL SAT solver", long_about = None)]
struct Cli {
    /// Input DIMACS CNF file
    input: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Give up with UNKNOWN after this many conflicts
    #[arg(long)]
    conflict_limit: Option<u64>,

    /// Write a JSON solve report to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging; solver output goes to stdout, diagnostics to stderr.
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("c error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    tracing::info!("loading problem from {}", cli.input.display());
    let content = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let problem = DimacsCnf::from_str(&content)
        .with_context(|| format!("parsing {}", cli.input.display()))?;
    tracing::info!(
        "problem: {} variables, {} clauses",
        problem.num_vars,
        problem.clauses.len()
    );

    let config = CdclConfig {
        conflict_limit: cli.conflict_limit,
        ..CdclConfig::default()
    };
    let mut solver = CdclSolver::with_config(&problem, config);

    let start = Instant::now();
    let result = solver.solve();
    let elapsed = start.elapsed();
    tracing::info!(?elapsed, stats = ?solver.stats(), "search finished");

    let stats: ReportStats = solver.stats().into();
    let (code, report) = match &result {
        SatResult::Sat(model) => {
            println!("s SATISFIABLE");
            let line = value_line(model);
            if line.is_empty() {
                println!("v 0");
            } else {
                println!("v {line} 0");
            }
            let report = SolveReport {
                status: SolveStatus::Sat,
                model: Some(model_literals(model)),
                reason: None,
                stats,
            };
            (ExitCode::from(EXIT_SAT), report)
        }
        SatResult::Unsat => {
            println!("s UNSATISFIABLE");
            let report = SolveReport {
                status: SolveStatus::Unsat,
                model: None,
                reason: None,
                stats,
            };
            (ExitCode::from(EXIT_UNSAT), report)
        }
        SatResult::Unknown(reason) => {
            println!("s UNKNOWN");
            let report = SolveReport {
                status: SolveStatus::Unknown,
                model: None,
                reason: Some(reason.clone()),
                stats,
            };
            (ExitCode::SUCCESS, report)
        }
    };
    println!("c time: {:.3}s", elapsed.as_secs_f64());

    if let Some(path) = &cli.report {
        let json = report.to_json().context("serializing solve report")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }

    Ok(code)
}

/// Model as signed DIMACS literals, variables numbered from 1.
fn model_literals(model: &[bool]) -> Vec<i64> {
    model
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let var = (i + 1) as i64;
            if v { var } else { -var }
        })
        .collect()
}

fn value_line(model: &[bool]) -> String {
    model_literals(model)
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
