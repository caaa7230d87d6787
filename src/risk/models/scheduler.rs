//! Parallel scheduler — rolling windows on a dedicated worker pool.
//!
//! Purpose
//! -------
//! Run the same per-window unit of work as
//! [`run_sequential`](super::rolling::run_sequential) across a pool of
//! worker threads without changing a single output bit.
//!
//! Key behaviors
//! -------------
//! - Builds a dedicated `rayon` pool with the requested number of threads
//!   (default: `num_cpus::get()`), so runs do not compete with the global
//!   pool and the thread count is honored exactly.
//! - Preallocates the output buffer (filled with `NaN`) and splits it into
//!   contiguous chunks with `par_chunks_mut`. Chunk `c` owns window starts
//!   `c·chunk .. c·chunk + len`; each slot is written exactly once.
//! - Every chunk task allocates its own [`WindowWorkspace`]. Inputs and the
//!   grid are shared read-only.
//!
//! Invariants & assumptions
//! ------------------------
//! - Window values do not depend on processing order or on the workspace
//!   instance, so the output is bit-identical to the sequential path for any
//!   worker count and any chunk size.
//! - Results are placed by index, never appended.
use crate::risk::{
    core::{
        data::RiskData, grid::HyperGrid, shape::RiskShape, validation::validate_workers,
        workspace::WindowWorkspace,
    },
    errors::RiskResult,
    models::rolling::{RiskSeries, window_value},
};
use ndarray::Array1;
use rayon::{ThreadPoolBuilder, prelude::*};

/// Chunks handed out per worker; more than one lets early finishers pick up
/// remaining work.
const CHUNKS_PER_WORKER: usize = 4;

/// Resolve an optional worker count: explicit values are validated, `None`
/// means one worker per logical CPU.
///
/// # Errors
/// `RiskError::InvalidWorkerCount` for `Some(0)`.
pub fn resolve_workers(workers: Option<usize>) -> RiskResult<usize> {
    match workers {
        Some(w) => {
            validate_workers(w)?;
            Ok(w)
        }
        None => Ok(std::cmp::max(1, num_cpus::get())),
    }
}

/// Number of consecutive windows per chunk task, at least 1.
pub fn chunk_len(n_windows: usize, workers: usize) -> usize {
    let tasks = workers.max(1) * CHUNKS_PER_WORKER;
    n_windows.div_ceil(tasks).max(1)
}

/// Parallel rolling run.
///
/// Parameters
/// ----------
/// - `data`: `&RiskData` — shared read-only by all workers.
/// - `shape`: `&RiskShape` — window geometry and degree.
/// - `grid`: `&HyperGrid` — shared read-only by all workers.
/// - `workers`: `Option<usize>` — pool size; `None` uses the CPU count.
///
/// Returns
/// -------
/// `RiskResult<RiskSeries>` of length `shape.n_windows(data.len())`,
/// bit-identical to [`run_sequential`](super::rolling::run_sequential).
///
/// Errors
/// ------
/// - `RiskError::InvalidWorkerCount` if `workers == Some(0)`.
/// - `RiskError::ThreadPoolBuild` if the pool cannot be created.
pub fn run_parallel(
    data: &RiskData, shape: &RiskShape, grid: &HyperGrid, workers: Option<usize>,
) -> RiskResult<RiskSeries> {
    let workers = resolve_workers(workers)?;
    let n_windows = shape.n_windows(data.len());
    if n_windows == 0 {
        return Ok(RiskSeries::empty(shape));
    }

    let chunk = chunk_len(n_windows, workers);
    let pool = ThreadPoolBuilder::new().num_threads(workers).build()?;
    let mut out = vec![f64::NAN; n_windows];

    pool.install(|| {
        out.par_chunks_mut(chunk).enumerate().for_each(|(c, slots)| {
            let mut ws = WindowWorkspace::new(shape);
            let first = c * chunk;
            for (offset, slot) in slots.iter_mut().enumerate() {
                *slot = window_value(data, shape, grid, first + offset, &mut ws);
            }
        });
    });

    Ok(RiskSeries::new(Array1::from_vec(out), shape))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::{errors::RiskError, models::rolling::run_sequential};
    use ndarray::{Array2, s};
    use rand::{Rng, SeedableRng, rngs::StdRng};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Bit-identity with the sequential path for several worker counts,
    //   including more workers than windows.
    // - NaN windows staying in place under parallel execution.
    // - Worker validation and chunk sizing.
    // -------------------------------------------------------------------------

    fn random_returns(n: usize, n_factors: usize, seed: u64) -> (Array1<f64>, Array2<f64>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let reference = Array1::from_iter((0..n).map(|_| rng.gen_range(-0.05..0.05)));
        let factors = Array2::from_shape_fn((n, n_factors), |(i, j)| {
            (0.2 + 0.2 * j as f64) * reference[i] + rng.gen_range(-0.04..0.04)
        });
        (reference, factors)
    }

    fn random_data(n: usize, n_factors: usize, seed: u64) -> RiskData {
        let (reference, factors) = random_returns(n, n_factors, seed);
        RiskData::new(reference, factors).unwrap()
    }

    fn assert_bit_identical(a: &RiskSeries, b: &RiskSeries) {
        assert_eq!(a.len(), b.len());
        for (i, (x, y)) in a.values().iter().zip(b.values().iter()).enumerate() {
            assert_eq!(x.to_bits(), y.to_bits(), "window {i}: {x} vs {y}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Parallel output matches the sequential output bit for bit.
    //
    // Given
    // -----
    // - N = 80, F = 3, W = 25, H = 4, D = 3 and a 2 × 2 grid.
    // - Worker counts 1, 2, 3, 4 and 64 (more workers than windows).
    //
    // Expect
    // ------
    // - Every parallel run is bit-identical to `run_sequential`.
    fn run_parallel_is_bit_identical_to_sequential() {
        // Arrange
        let data = random_data(80, 3, 11);
        let shape = RiskShape::new(25, 4, 3).unwrap();
        let grid = HyperGrid::cartesian(&[0.0, 0.05], &[0.001, 0.1]).unwrap();
        let sequential = run_sequential(&data, &shape, &grid).unwrap();

        for workers in [1, 2, 3, 4, 64] {
            // Act
            let parallel = run_parallel(&data, &shape, &grid, Some(workers)).unwrap();

            // Assert
            assert_bit_identical(&sequential, &parallel);
        }
    }

    #[test]
    // Purpose
    // -------
    // NaN windows land in the same slots as in the sequential run.
    fn run_parallel_preserves_nan_positions() {
        // Arrange
        let (mut reference, factors) = random_returns(60, 2, 12);
        reference.slice_mut(s![20..32]).fill(0.0);
        let data = RiskData::new(reference, factors).unwrap();
        let shape = RiskShape::new(12, 0, 2).unwrap();
        let grid = HyperGrid::new([(0.0, 0.01)]).unwrap();

        // Act
        let sequential = run_sequential(&data, &shape, &grid).unwrap();
        let parallel = run_parallel(&data, &shape, &grid, Some(3)).unwrap();

        // Assert
        assert!(parallel.values()[20].is_nan());
        assert_eq!(parallel.valid_count(), sequential.valid_count());
        assert_bit_identical(&sequential, &parallel);
    }

    #[test]
    // Purpose
    // -------
    // Zero workers is rejected; an empty run needs no pool, including one
    // whose window plus horizon overflows.
    fn run_parallel_validates_workers_and_handles_empty_runs() {
        let data = random_data(10, 1, 13);
        let grid = HyperGrid::new([(0.0, 0.01)]).unwrap();

        let shape = RiskShape::new(4, 0, 1).unwrap();
        assert_eq!(
            run_parallel(&data, &shape, &grid, Some(0)),
            Err(RiskError::InvalidWorkerCount { workers: 0 })
        );

        let too_long = RiskShape::new(8, 5, 1).unwrap();
        assert!(run_parallel(&data, &too_long, &grid, None).unwrap().is_empty());

        let overflowing = RiskShape::new(4, usize::MAX, 1).unwrap();
        assert!(run_parallel(&data, &overflowing, &grid, Some(2)).unwrap().is_empty());
    }

    #[test]
    // Purpose
    // -------
    // Chunks cover all windows and never have zero length.
    fn chunk_len_covers_all_windows() {
        assert_eq!(chunk_len(46, 4), 3);
        assert_eq!(chunk_len(3, 8), 1);
        assert_eq!(chunk_len(0, 2), 1);
        assert_eq!(chunk_len(100, 1), 25);
        for (n, w) in [(46, 1), (46, 4), (7, 3), (1000, 6)] {
            let c = chunk_len(n, w);
            assert!(n.div_ceil(c) <= w * CHUNKS_PER_WORKER);
        }
        assert!(resolve_workers(None).unwrap() >= 1);
        assert_eq!(resolve_workers(Some(5)), Ok(5));
    }
}
