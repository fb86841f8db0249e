//! Local and global error of the fixed-step methods against the exact solution.

use log::{debug, info};
use nalgebra::DVector;
use serde::Serialize;

use crate::constants;
use crate::fixed_shared::{IntegrationError, Method};
use crate::problem::Problem;

/// Pointwise absolute error of a trajectory.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ErrorSeries {
    indices: Vec<usize>,
    errors: DVector<f64>,
}

impl ErrorSeries {
    pub fn indices(&self) -> &Vec<usize> {
        &self.indices
    }

    pub fn errors(&self) -> &DVector<f64> {
        &self.errors
    }

    /// Worst-case error. A trajectory containing NaN or infinite values reports `f64::INFINITY`.
    pub fn max(&self) -> f64 {
        self.errors.iter().fold(0.0, |acc: f64, &e| {
            if e.is_nan() {
                f64::INFINITY
            } else {
                acc.max(e)
            }
        })
    }

    /// Average approximation error over all grid points.
    pub fn mean(&self) -> f64 {
        if self.errors.is_empty() {
            return 0.0;
        }
        self.errors.sum() / self.errors.len() as f64
    }
}

/// Computes |trajectory[i] - y_exact(grid[i])| for every index of the grid.
pub fn local_error(
    problem: &Problem,
    grid: &DVector<f64>,
    trajectory: &DVector<f64>,
) -> Result<ErrorSeries, IntegrationError> {
    if grid.len() != trajectory.len() {
        return Err(IntegrationError::LengthMismatch {
            expected: grid.len(),
            found: trajectory.len(),
        });
    }

    let errors = trajectory.zip_map(grid, |y, x| (y - problem.exact_solution(x)).abs());
    Ok(ErrorSeries {
        indices: (0..errors.len()).collect(),
        errors,
    })
}

/// Resolutions probed by the global error analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sweep {
    start: usize,
    end: usize,
    step: usize,
}

impl Sweep {
    /// Creates a sweep over `start, start + step, ...` up to `end` inclusive.
    pub fn new(start: usize, end: usize, step: usize) -> Result<Self, IntegrationError> {
        if step == 0 || start == 0 || start > end {
            return Err(IntegrationError::InvalidSweep { start, end, step });
        }
        Ok(Self { start, end, step })
    }

    pub fn resolutions(&self) -> impl Iterator<Item = usize> {
        (self.start..=self.end).step_by(self.step)
    }
}

impl Default for Sweep {
    fn default() -> Self {
        Self {
            start: constants::sweep::START,
            end: constants::sweep::END,
            step: constants::sweep::STEP,
        }
    }
}

/// Worst-case local error as a function of the number of steps.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Convergence {
    pub resolutions: Vec<usize>,
    pub max_errors: Vec<f64>,
}

/// Convergence profile of `method` over the default sweep 30, 40, ..., 510.
pub fn global_error(problem: &Problem, method: Method) -> Result<Convergence, IntegrationError> {
    global_error_with(problem, method, &Sweep::default())
}

/// Convergence profile of `method` over a custom sweep.
///
/// The grid is rebuilt for every probed resolution; `problem` is left untouched.
pub fn global_error_with(
    problem: &Problem,
    method: Method,
    sweep: &Sweep,
) -> Result<Convergence, IntegrationError> {
    let mut convergence = Convergence::default();
    for n in sweep.resolutions() {
        let grid = problem.grid_at(n)?;
        let solution = method.integrate(problem, &grid)?;
        let max_error = solution.local_error(problem)?.max();
        debug!("{} with {} steps: max local error {}", method, n, max_error);

        convergence.resolutions.push(n);
        convergence.max_errors.push(max_error);
    }

    let diverged = convergence
        .max_errors
        .iter()
        .filter(|e| e.is_infinite())
        .count();
    info!(
        "{}: probed {} resolutions, {} diverged",
        method,
        convergence.resolutions.len(),
        diverged
    );
    Ok(convergence)
}
