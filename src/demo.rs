//! Threshold-mask demonstration driver.
//!
//! Builds two random grids, probes one element, queries the cells that pass
//! the threshold, and masks them to a fill value. The driver only computes;
//! printing is left to the caller.

use crate::error::{GridError, Result};
use crate::primitives::{CmpOp, Coord, DenseGrid, IndexSet, SelectMode};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Parameters of a demonstration run.
///
/// `Default` reproduces the fixed demonstration: two 5x5 grids, probe at
/// (0, 2), cells `> 0.5` set to `1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Grid rows
    pub rows: usize,
    /// Grid columns
    pub cols: usize,
    /// RNG seed for the first grid; the second grid uses `seed + 1`
    pub seed: Option<u64>,
    /// Scalar the first grid is compared against
    pub threshold: f64,
    /// Comparison operator
    pub op: CmpOp,
    /// Value written to every selected cell
    pub fill_value: f64,
    /// Element reported before masking
    pub probe: Coord,
    /// Whether callers should display the selected index set
    pub show_indices: bool,
    /// Optional cap for the secondary capped query
    pub limit: Option<usize>,
    /// Which end of the match sequence the capped query keeps
    pub mode: SelectMode,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 5,
            seed: None,
            threshold: 0.5,
            op: CmpOp::Gt,
            fill_value: 1.0,
            probe: (0, 2),
            show_indices: false,
            limit: None,
            mode: SelectMode::First,
        }
    }
}

impl DemoConfig {
    /// Checks the parameters before any grid is allocated.
    ///
    /// # Errors
    ///
    /// - [`GridError::InvalidDimension`] if `rows * cols` overflows
    /// - [`GridError::InvalidArgument`] for a zero limit or a non-finite
    ///   threshold / fill value
    /// - [`GridError::IndexOutOfRange`] if the probe lies outside the grid
    pub fn validate(&self) -> Result<()> {
        if self.rows.checked_mul(self.cols).is_none() {
            return Err(GridError::InvalidDimension {
                rows: self.rows as i128,
                cols: self.cols as i128,
            });
        }
        if self.limit == Some(0) {
            return Err(GridError::invalid_argument("limit", 0, "a positive integer"));
        }
        if !self.threshold.is_finite() {
            return Err(GridError::invalid_argument(
                "threshold",
                self.threshold,
                "a finite number",
            ));
        }
        if !self.fill_value.is_finite() {
            return Err(GridError::invalid_argument(
                "fill_value",
                self.fill_value,
                "a finite number",
            ));
        }
        let (r, c) = self.probe;
        if r >= self.rows || c >= self.cols {
            return Err(GridError::index_out_of_range(
                r as i128,
                c as i128,
                (self.rows, self.cols),
            ));
        }
        Ok(())
    }
}

/// Everything a demonstration run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoReport {
    /// Parameters the run used
    pub config: DemoConfig,
    /// First grid before masking
    pub original: DenseGrid,
    /// Second grid, compared elementwise against the first
    pub companion: DenseGrid,
    /// Value of the first grid at `config.probe`
    pub probe_value: f64,
    /// Every cell of the first grid passing `op threshold`, row-major
    pub indices: IndexSet,
    /// Capped query result, present when `config.limit` is set
    pub selection: Option<IndexSet>,
    /// Number of cells where `original op companion` holds
    pub elementwise_matches: usize,
    /// First grid after masking
    pub masked: DenseGrid,
}

/// Runs the demonstration sequence.
///
/// # Errors
///
/// Returns the validation error from [`DemoConfig::validate`], or any error
/// raised by the grid operations (none occur for valid parameters).
pub fn run(config: &DemoConfig) -> Result<DemoReport> {
    config.validate()?;

    let (rows, cols) = (config.rows, config.cols);
    let original = DenseGrid::random(rows, cols, config.seed);
    let companion = DenseGrid::random(rows, cols, config.seed.map(|s| s.wrapping_add(1)));
    info!("created two {rows}x{cols} grids (seed {:?})", config.seed);

    let (pr, pc) = config.probe;
    let probe_value = original.get(pr, pc);
    debug!("probe ({pr}, {pc}) = {probe_value}");

    let elementwise_matches = original.compare_elementwise(&companion, config.op)?.len();

    let indices = original.compare_to_scalar(config.threshold, config.op, None, SelectMode::First)?;
    let selection = match config.limit {
        Some(limit) => Some(original.compare_to_scalar(
            config.threshold,
            config.op,
            Some(limit),
            config.mode,
        )?),
        None => None,
    };

    let mut masked = original.clone();
    masked.assign_at_indices(&indices, config.fill_value)?;
    info!(
        "masked {} of {} cells ({} {}) to {}",
        indices.len(),
        masked.len(),
        config.op,
        config.threshold,
        config.fill_value
    );

    Ok(DemoReport {
        config: config.clone(),
        original,
        companion,
        probe_value,
        indices,
        selection,
        elementwise_matches,
        masked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> DemoConfig {
        DemoConfig {
            seed: Some(seed),
            ..DemoConfig::default()
        }
    }

    #[test]
    fn test_default_is_fixed_demo() {
        let cfg = DemoConfig::default();
        assert_eq!((cfg.rows, cfg.cols), (5, 5));
        assert_eq!(cfg.probe, (0, 2));
        assert_eq!(cfg.op, CmpOp::Gt);
        assert!((cfg.threshold - 0.5).abs() < f64::EPSILON);
        assert!((cfg.fill_value - 1.0).abs() < f64::EPSILON);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_run_masks_cells_above_threshold() {
        let report = run(&seeded(42)).expect("valid config");
        assert_eq!(report.original.shape(), (5, 5));
        assert_eq!(report.masked.shape(), (5, 5));

        for r in 0..5 {
            for c in 0..5 {
                let before = report.original.get(r, c);
                let after = report.masked.get(r, c);
                if before > 0.5 {
                    assert!(report.indices.contains((r, c)));
                    assert_eq!(after, 1.0);
                } else {
                    assert!(!report.indices.contains((r, c)));
                    assert_eq!(after, before);
                }
            }
        }
    }

    #[test]
    fn test_run_probe_matches_grid() {
        let report = run(&seeded(3)).expect("valid config");
        assert_eq!(
            report.probe_value,
            report.original.at(0, 2).expect("in bounds")
        );
    }

    #[test]
    fn test_run_is_reproducible_with_seed() {
        let a = run(&seeded(11)).expect("valid config");
        let b = run(&seeded(11)).expect("valid config");
        assert_eq!(a, b);
        assert_ne!(a.original, a.companion);
    }

    #[test]
    fn test_run_elementwise_count() {
        let report = run(&seeded(5)).expect("valid config");
        let expected = report
            .original
            .as_slice()
            .iter()
            .zip(report.companion.as_slice())
            .filter(|(a, b)| a > b)
            .count();
        assert_eq!(report.elementwise_matches, expected);
    }

    #[test]
    fn test_run_with_last_limit() {
        let cfg = DemoConfig {
            limit: Some(2),
            mode: SelectMode::Last,
            ..seeded(8)
        };
        let report = run(&cfg).expect("valid config");
        let selection = report.selection.expect("limit requested");
        let n = report.indices.len().min(2);
        assert_eq!(
            selection.as_slice(),
            &report.indices.as_slice()[report.indices.len() - n..]
        );
    }

    #[test]
    fn test_no_selection_without_limit() {
        let report = run(&seeded(8)).expect("valid config");
        assert!(report.selection.is_none());
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let cfg = DemoConfig {
            limit: Some(0),
            ..DemoConfig::default()
        };
        assert!(matches!(
            run(&cfg).unwrap_err(),
            GridError::InvalidArgument { .. }
        ));
    }

    #[test]
    fn test_validate_rejects_probe_outside() {
        let cfg = DemoConfig {
            rows: 2,
            cols: 2,
            ..DemoConfig::default()
        };
        assert!(matches!(
            cfg.validate().unwrap_err(),
            GridError::IndexOutOfRange { row: 0, col: 2, .. }
        ));
    }

    #[test]
    fn test_validate_rejects_nan_threshold() {
        let cfg = DemoConfig {
            threshold: f64::NAN,
            ..DemoConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overflowing_shape() {
        let cfg = DemoConfig {
            rows: usize::MAX,
            cols: 2,
            ..DemoConfig::default()
        };
        assert!(matches!(
            cfg.validate().unwrap_err(),
            GridError::InvalidDimension { .. }
        ));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let cfg: DemoConfig =
            serde_json::from_str(r#"{"rows": 3, "seed": 9}"#).expect("partial config");
        assert_eq!(cfg.rows, 3);
        assert_eq!(cfg.cols, 5);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.mode, SelectMode::First);
    }

    #[test]
    fn test_report_serializes() {
        let report = run(&seeded(1)).expect("valid config");
        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["original"]["rows"], 5);
        assert!(json["indices"].is_array());
        assert!(json["selection"].is_null());
    }
}
