//! Terminal output for the gridmask binary.

use colored::Colorize;
use gridmask::demo::DemoReport;
use gridmask::GridError;
use std::fmt::Display;
use std::io::{self, Write};

/// Print a section header
pub(crate) fn section(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}", format!("=== {title} ===").cyan().bold())
}

/// Print a key-value pair
pub(crate) fn kv(out: &mut impl Write, key: &str, value: impl Display) -> io::Result<()> {
    writeln!(out, "  {}: {}", key.white().bold(), value)
}

/// Print an error to stderr
pub(crate) fn error(err: &GridError) {
    eprintln!("{} {err}", "error:".red().bold());
}

/// Print a demonstration report as text
pub(crate) fn print_report(out: &mut impl Write, report: &DemoReport) -> io::Result<()> {
    let cfg = &report.config;
    let (rows, cols) = report.original.shape();
    let rule = format!("A {} {}", cfg.op, cfg.threshold);

    section(out, &format!("Grid A ({rows}x{cols})"))?;
    writeln!(out, "{}", report.original)?;

    section(out, "Probe")?;
    kv(
        out,
        &format!("A({}, {})", cfg.probe.0, cfg.probe.1),
        format!("{:.4}", report.probe_value),
    )?;

    if cfg.show_indices {
        section(out, &format!("Indices where {rule}"))?;
        kv(out, "count", report.indices.len())?;
        kv(out, "indices", &report.indices)?;
        if let (Some(limit), Some(selection)) = (cfg.limit, &report.selection) {
            kv(out, &format!("{} {limit}", cfg.mode), selection)?;
        }
    }

    section(out, &format!("Masked ({rule} -> {})", cfg.fill_value))?;
    writeln!(out, "{}", report.masked)?;
    kv(out, "cells set", report.indices.len())?;
    kv(
        out,
        &format!("A {} B (elementwise)", cfg.op),
        report.elementwise_matches,
    )
}
