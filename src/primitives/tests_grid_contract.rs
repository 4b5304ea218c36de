// =========================================================================
// FALSIFY-GR: DenseGrid query/mask contract
//
// Each test names one property the masked-update path relies on:
//   - queries return exactly the matching coordinates, row-major, unique
//   - capped queries are a prefix (first) or suffix (last) of the full scan
//   - masked assignment touches the selected cells and nothing else
// =========================================================================

use super::*;

/// FALSIFY-GR-001: create(r, c) has shape (r, c) and is all zeros
#[test]
fn falsify_gr_001_create_shape_and_zeros() {
    let g = DenseGrid::create(4, 6).expect("valid");
    assert_eq!(g.n_rows(), 4, "FALSIFIED GR-001: rows");
    assert_eq!(g.n_cols(), 6, "FALSIFIED GR-001: cols");
    assert!(
        g.as_slice().iter().all(|&x| x == 0.0),
        "FALSIFIED GR-001: non-zero element after create"
    );
}

/// FALSIFY-GR-002: boundary coordinates are rejected
#[test]
fn falsify_gr_002_at_boundaries() {
    let g = DenseGrid::create(3, 3).expect("valid");
    assert!(
        matches!(g.at(-1, 0), Err(GridError::IndexOutOfRange { .. })),
        "FALSIFIED GR-002: at(-1, 0) accepted"
    );
    assert!(
        matches!(g.at(3, 0), Err(GridError::IndexOutOfRange { .. })),
        "FALSIFIED GR-002: at(rows, 0) accepted"
    );
}

/// FALSIFY-GR-003: limit = 0 is an invalid argument
#[test]
fn falsify_gr_003_zero_limit_rejected() {
    let g = DenseGrid::random(3, 3, Some(1));
    assert!(
        matches!(
            g.compare_to_scalar(0.5, CmpOp::Gt, Some(0), SelectMode::First),
            Err(GridError::InvalidArgument { .. })
        ),
        "FALSIFIED GR-003: limit 0 accepted"
    );
}

/// FALSIFY-GR-004: threshold-mask scenario from a fixed 2x2 grid
#[test]
fn falsify_gr_004_threshold_mask_scenario() {
    let mut g = DenseGrid::from_vec(2, 2, vec![0.2, 0.6, 0.9, 0.1]).expect("valid");
    let idx = g
        .compare_to_scalar(0.5, CmpOp::Gt, None, SelectMode::First)
        .expect("valid");
    assert_eq!(idx.as_slice(), &[(0, 1), (1, 0)], "FALSIFIED GR-004: indices");

    g.assign_at_indices(&idx, 1.0).expect("valid");
    assert_eq!(
        g.as_slice(),
        &[0.2, 1.0, 1.0, 0.1],
        "FALSIFIED GR-004: masked grid"
    );
}

fn brute_force(a: &DenseGrid, op: CmpOp, rhs: impl Fn(usize, usize) -> f64) -> Vec<Coord> {
    let mut out = Vec::new();
    for r in 0..a.n_rows() {
        for c in 0..a.n_cols() {
            if op.apply(a.get(r, c), rhs(r, c)) {
                out.push((r, c));
            }
        }
    }
    out
}

fn is_strictly_row_major(coords: &[Coord]) -> bool {
    coords.windows(2).all(|w| w[0] < w[1])
}

mod grid_proptest_falsify {
    use super::*;
    use proptest::prelude::*;

    fn op_strategy() -> impl Strategy<Value = CmpOp> {
        prop::sample::select(CmpOp::ALL.to_vec())
    }

    // Coarse values so Eq/Ne see real ties.
    fn grid_strategy(rows: usize, cols: usize) -> impl Strategy<Value = DenseGrid> {
        prop::collection::vec((0u8..5).prop_map(|v| f64::from(v) * 0.25), rows * cols)
            .prop_map(move |data| DenseGrid::from_vec(rows, cols, data).expect("valid"))
    }

    fn grid_pair() -> impl Strategy<Value = (DenseGrid, DenseGrid)> {
        (0..=6usize, 0..=6usize)
            .prop_flat_map(|(r, c)| (grid_strategy(r, c), grid_strategy(r, c)))
    }

    fn any_grid() -> impl Strategy<Value = DenseGrid> {
        (0..=7usize, 0..=7usize).prop_flat_map(|(r, c)| grid_strategy(r, c))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// FALSIFY-GR-005-prop: random fill stays in [0, 1)
        #[test]
        fn falsify_gr_005_prop_fill_in_unit_interval(
            rows in 0..=12usize,
            cols in 0..=12usize,
            seed in any::<u64>(),
        ) {
            let g = DenseGrid::random(rows, cols, Some(seed));
            prop_assert_eq!(g.len(), rows * cols);
            for &x in g.as_slice() {
                prop_assert!((0.0..1.0).contains(&x), "FALSIFIED GR-005-prop: {} outside [0,1)", x);
            }
        }

        /// FALSIFY-GR-006-prop: same seed, same grid
        #[test]
        fn falsify_gr_006_prop_seed_reproducible(seed in any::<u64>()) {
            prop_assert_eq!(
                DenseGrid::random(4, 5, Some(seed)),
                DenseGrid::random(4, 5, Some(seed))
            );
        }

        /// FALSIFY-GR-007-prop: elementwise compare matches brute force, row-major, unique
        #[test]
        fn falsify_gr_007_prop_elementwise_exact(
            (a, b) in grid_pair(),
            op in op_strategy(),
        ) {
            let got = a.compare_elementwise(&b, op).expect("same shape");
            let want = brute_force(&a, op, |r, c| b.get(r, c));
            prop_assert_eq!(got.as_slice(), want.as_slice(), "FALSIFIED GR-007-prop: op {}", op);
            prop_assert!(is_strictly_row_major(got.as_slice()));
        }

        /// FALSIFY-GR-008-prop: scalar compare matches brute force
        #[test]
        fn falsify_gr_008_prop_scalar_exact(
            g in any_grid(),
            op in op_strategy(),
            t in (0u8..5).prop_map(|v| f64::from(v) * 0.25),
        ) {
            let got = g.compare_to_scalar(t, op, None, SelectMode::First).expect("no limit");
            let want = brute_force(&g, op, |_, _| t);
            prop_assert_eq!(got.as_slice(), want.as_slice(), "FALSIFIED GR-008-prop: op {} t {}", op, t);
            prop_assert!(is_strictly_row_major(got.as_slice()));
        }

        /// FALSIFY-GR-009-prop: first-K is a prefix, last-K is a suffix
        #[test]
        fn falsify_gr_009_prop_limit_prefix_suffix(
            g in any_grid(),
            k in 1..=20usize,
        ) {
            let all = g.compare_to_scalar(0.5, CmpOp::Gt, None, SelectMode::First).expect("no limit");
            let n = all.len().min(k);

            let head = g.compare_to_scalar(0.5, CmpOp::Gt, Some(k), SelectMode::First).expect("k > 0");
            prop_assert_eq!(head.as_slice(), &all.as_slice()[..n], "FALSIFIED GR-009-prop: prefix");

            let tail = g.compare_to_scalar(0.5, CmpOp::Gt, Some(k), SelectMode::Last).expect("k > 0");
            prop_assert_eq!(tail.as_slice(), &all.as_slice()[all.len() - n..], "FALSIFIED GR-009-prop: suffix");
        }

        /// FALSIFY-GR-010-prop: masked assignment writes selected cells only, and is idempotent
        #[test]
        fn falsify_gr_010_prop_assign_selected_only(
            g in any_grid(),
            op in op_strategy(),
            v in -2.0..2.0f64,
        ) {
            let idx = g.compare_to_scalar(0.5, op, None, SelectMode::First).expect("no limit");

            let mut once = g.clone();
            once.assign_at_indices(&idx, v).expect("grid-derived indices");
            for r in 0..g.n_rows() {
                for c in 0..g.n_cols() {
                    let expected = if idx.contains((r, c)) { v } else { g.get(r, c) };
                    prop_assert_eq!(once.get(r, c), expected, "FALSIFIED GR-010-prop: ({}, {})", r, c);
                }
            }

            let mut twice = once.clone();
            twice.assign_at_indices(&idx, v).expect("grid-derived indices");
            prop_assert_eq!(twice, once, "FALSIFIED GR-010-prop: not idempotent");
        }
    }
}

/// FALSIFY-GR-011: the row-partitioned scan reproduces the sequential row-major order
#[cfg(feature = "parallel")]
#[test]
fn falsify_gr_011_parallel_scan_matches_brute_force() {
    let a = DenseGrid::random(257, 31, Some(11));
    let b = DenseGrid::random(257, 31, Some(12));
    for op in CmpOp::ALL {
        let scalar = a
            .compare_to_scalar(0.5, op, None, SelectMode::First)
            .expect("no limit");
        assert_eq!(
            scalar.as_slice(),
            brute_force(&a, op, |_, _| 0.5).as_slice(),
            "FALSIFIED GR-011: scalar scan with {op}"
        );
        assert!(is_strictly_row_major(scalar.as_slice()));

        let elementwise = a.compare_elementwise(&b, op).expect("same shape");
        assert_eq!(
            elementwise.as_slice(),
            brute_force(&a, op, |r, c| b.get(r, c)).as_slice(),
            "FALSIFIED GR-011: elementwise scan with {op}"
        );
    }

    let tail = a
        .compare_to_scalar(0.5, CmpOp::Gt, Some(5), SelectMode::Last)
        .expect("k > 0");
    let all = brute_force(&a, CmpOp::Gt, |_, _| 0.5);
    assert_eq!(tail.as_slice(), &all[all.len() - 5..]);
}
