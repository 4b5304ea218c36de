//! gridmask - threshold-mask demonstration over dense random grids
//!
//! Usage:
//!   gridmask                         # fixed demo: 5x5 grids, A > 0.5 -> 1
//!   gridmask --seed 42               # reproducible run
//!   gridmask --show-indices --limit 3 --mode last
//!   gridmask --json                  # machine-readable report

use clap::{ArgAction, Parser};
use gridmask::demo::{self, DemoConfig};
use gridmask::{CmpOp, Coord, GridError, SelectMode};
use log::LevelFilter;
use std::io::{IsTerminal, Write};
use std::process::ExitCode;

mod output;

/// gridmask - threshold-mask demonstration
///
/// Creates two random grids, prints the first, probes one element and sets
/// every cell passing the threshold to a fill value.
#[derive(Parser, Debug)]
#[command(name = "gridmask")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Grid rows
    #[arg(long, default_value_t = 5)]
    rows: usize,

    /// Grid columns
    #[arg(long, default_value_t = 5)]
    cols: usize,

    /// Random seed for reproducible grids
    #[arg(long)]
    seed: Option<u64>,

    /// Threshold the first grid is compared against
    #[arg(short, long, default_value_t = 0.5, allow_negative_numbers = true)]
    threshold: f64,

    /// Comparison operator (>, >=, <, <=, ==, !=)
    #[arg(long, default_value = ">")]
    op: String,

    /// Value written to every selected cell
    #[arg(long = "value", default_value_t = 1.0, allow_negative_numbers = true)]
    fill_value: f64,

    /// Element to print before masking, as ROW,COL
    #[arg(long, default_value = "0,2", value_parser = parse_probe)]
    probe: Coord,

    /// Print the selected index set
    #[arg(long)]
    show_indices: bool,

    /// Also print a capped selection of at most this many indices
    #[arg(long)]
    limit: Option<usize>,

    /// Which matches the capped selection keeps (first, last)
    #[arg(long, default_value = "first")]
    mode: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn parse_probe(s: &str) -> Result<Coord, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{s}'"))?;
    let row = row
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid row '{row}': {e}"))?;
    let col = col
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid column '{col}': {e}"))?;
    Ok((row, col))
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

impl Cli {
    fn to_config(&self) -> Result<DemoConfig, GridError> {
        Ok(DemoConfig {
            rows: self.rows,
            cols: self.cols,
            seed: self.seed,
            threshold: self.threshold,
            op: self.op.parse::<CmpOp>()?,
            fill_value: self.fill_value,
            probe: self.probe,
            show_indices: self.show_indices,
            limit: self.limit,
            mode: self.mode.parse::<SelectMode>()?,
        })
    }
}

fn execute(cli: &Cli) -> Result<(), GridError> {
    let config = cli.to_config()?;
    let report = demo::run(&config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        output::print_report(&mut out, &report)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    colored::control::set_override(!cli.json && std::io::stdout().is_terminal());

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e);
            e.exit_code()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_map_to_fixed_demo() {
        let cli = Cli::parse_from(["gridmask"]);
        let config = cli.to_config().expect("defaults are valid");
        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn test_parse_probe() {
        assert_eq!(parse_probe("0,2"), Ok((0, 2)));
        assert_eq!(parse_probe(" 3 , 4 "), Ok((3, 4)));
        assert!(parse_probe("3").is_err());
        assert!(parse_probe("-1,0").is_err());
    }

    #[test]
    fn test_flags_reach_config() {
        let cli = Cli::parse_from([
            "gridmask",
            "--rows",
            "3",
            "--op",
            "<=",
            "--threshold",
            "-0.25",
            "--limit",
            "2",
            "--mode",
            "last",
        ]);
        let config = cli.to_config().expect("valid flags");
        assert_eq!(config.rows, 3);
        assert_eq!(config.op, CmpOp::Le);
        assert!((config.threshold + 0.25).abs() < f64::EPSILON);
        assert_eq!(config.limit, Some(2));
        assert_eq!(config.mode, SelectMode::Last);
    }

    #[test]
    fn test_bad_operator_is_invalid_argument() {
        let cli = Cli::parse_from(["gridmask", "--op", "=>"]);
        assert!(matches!(
            cli.to_config().unwrap_err(),
            GridError::InvalidArgument { .. }
        ));
    }
}
