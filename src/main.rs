//! hail-thrower
//!
//! Find the single integer thrower that hits three moving points.
//!
//! Usage:
//!     hail-thrower                       (built-in worked instance)
//!     hail-thrower solve --input hail.txt --cross-check --verbose
//!     hail-thrower crossings --input hail.json --min 7 --max 27
//!     hail-thrower generate --seed 3 --count 5

mod algebra;
mod crossing;
mod error;
mod generate;
mod hail;
mod input;
mod linear;
mod solver;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::hail::MovingPoint;
use crate::input::Instance;
use crate::solver::Derivation;

#[derive(Parser)]
#[command(name = "hail-thrower")]
#[command(version)]
#[command(about = "Exact thrower for three moving points", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive t0, t1 and the thrower; prints the position sum last
    Solve {
        /// Instance file (puzzle text, or JSON when it ends in .json)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Confirm the result with the linear cross-product system
        #[arg(long)]
        cross_check: bool,

        /// Diagnostics on stderr
        #[arg(short, long)]
        verbose: bool,
    },

    /// Count forward XY path crossings inside the test area
    Crossings {
        /// Instance file (puzzle text, or JSON when it ends in .json)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Lower edge of the test area
        #[arg(long, allow_negative_numbers = true)]
        min: Option<i64>,

        /// Upper edge of the test area
        #[arg(long, allow_negative_numbers = true)]
        max: Option<i64>,
    },

    /// Print a random solvable instance as JSON
    Generate {
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Number of moving points
        #[arg(short, long, default_value = "3", value_parser = clap::value_parser!(u16).range(3..))]
        count: u16,
    },
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Solve {
        input: None,
        cross_check: false,
        verbose: false,
    });

    if let Err(err) = run(command) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), AppError> {
    match command {
        Commands::Solve { input, cross_check, verbose } => {
            cmd_solve(input.as_deref(), cross_check, verbose)
        }
        Commands::Crossings { input, min, max } => cmd_crossings(input.as_deref(), min, max),
        Commands::Generate { seed, count } => cmd_generate(seed, usize::from(count)),
    }
}

fn load_instance(path: Option<&Path>) -> Result<Instance, AppError> {
    Ok(match path {
        Some(path) => input::load(path)?,
        None => Instance::worked(),
    })
}

fn cmd_solve(path: Option<&Path>, cross_check: bool, verbose: bool) -> Result<(), AppError> {
    let points = load_instance(path)?.moving_points();
    if verbose {
        eprintln!("🚀 Solving with {} moving points (first 3 used)", points.len());
        for p in points.iter().take(3) {
            eprintln!("  {p}");
        }
    }

    let derivation = solver::solve(&points)?;
    if verbose {
        report(&derivation, &points);
    }

    if cross_check {
        linear::cross_check(&derivation.thrower, &points)?;
        if verbose {
            eprintln!("✅ Linear cross-check agrees");
        }
    }

    for line in summary_lines(&derivation) {
        println!("{line}");
    }
    Ok(())
}

/// The four stdout lines of a solve: `t1(t0)`, consistency, `t0`, sum.
fn summary_lines(d: &Derivation) -> [String; 4] {
    [
        format!("t1 = {}", d.t1_of_t0),
        format!("consistency = {}", d.consistency.display("t0")),
        format!("t0 = {}", d.t0),
        d.position_sum().to_string(),
    ]
}

fn report(d: &Derivation, points: &[MovingPoint]) {
    eprintln!("Axis ordering: {}", d.order);
    eprintln!("Integer roots of consistency: {:?}", d.roots);
    eprintln!("t0 = {}, t1 = {}, t2 = {}", d.t0, d.t1, d.t2);
    if let [a, b, c, ..] = points {
        let times = solver::arrival_times(&[*a, *b, *c], &d.t0, &d.t1);
        for (axis, t) in solver::Axis::ALL.iter().zip(times) {
            match t {
                Some(t) => eprintln!("  t_{axis} = {t}"),
                None => eprintln!("  t_{axis} undefined"),
            }
        }
    }
    eprintln!("Thrower: {}", d.thrower);
    for c in &d.collisions {
        eprintln!("  hits point {} at t = {}", c.index, c.time);
    }
}

fn cmd_crossings(path: Option<&Path>, min: Option<i64>, max: Option<i64>) -> Result<(), AppError> {
    let instance = load_instance(path)?;
    let [default_min, default_max] = instance.test_area.unwrap_or(crossing::DEFAULT_TEST_AREA);
    let area = [min.unwrap_or(default_min), max.unwrap_or(default_max)];

    println!("{}", crossing::count_crossings(&instance.moving_points(), area));
    Ok(())
}

fn cmd_generate(seed: u64, count: usize) -> Result<(), AppError> {
    let generated = generate::random_instance(seed, count);
    println!("{}", serde_json::to_string_pretty(&generated.instance)?);
    eprintln!(
        "Generated thrower: {} (sum {}), collision times {:?}",
        generated.thrower,
        generated.thrower.position_sum(),
        generated.times
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lines_worked_instance() {
        let points = Instance::worked().moving_points();
        let d = solver::solve(&points).unwrap();
        assert_eq!(
            summary_lines(&d),
            [
                "t1 = (16323583319231296*t0 - 13981279393557802427008196336) / (27363*t0 - 24897352869042138)".to_string(),
                "consistency = 85*t0^2 - 137977587081393*t0 + 54865030738230917801023634".to_string(),
                "t0 = 696407182343".to_string(),
                "540355811503157".to_string(),
            ]
        );
    }

    #[test]
    fn test_no_subcommand_defaults_to_solve() {
        let cli = Cli::try_parse_from(["hail-thrower"]).unwrap();
        assert!(cli.command.is_none());
        assert!(run(Commands::Solve { input: None, cross_check: true, verbose: false }).is_ok());
    }

    #[test]
    fn test_generate_rejects_fewer_than_three_points() {
        assert!(Cli::try_parse_from(["hail-thrower", "generate", "--count", "2"]).is_err());
        assert!(Cli::try_parse_from(["hail-thrower", "generate", "--count", "3"]).is_ok());
    }
}
