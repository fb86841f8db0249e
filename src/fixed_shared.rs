//! Shared traits and structures for euler, improved_euler and rk4.

use std::fmt;
use std::str::FromStr;

use log::{trace, warn};
use nalgebra::DVector;
use serde::Serialize;
use thiserror::Error;

use crate::error_analysis::{local_error, ErrorSeries};
use crate::euler::Euler;
use crate::grid::Grid;
use crate::improved_euler::ImprovedEuler;
use crate::problem::Problem;
use crate::rk4::Rk4;

/// Enumeration of the errors that may arise while setting up or running an integration.
#[derive(Debug, Error, PartialEq)]
pub enum IntegrationError {
    #[error("Invalid interval [{x0}, {x_end}]. x0 must be finite and less than X.")]
    InvalidInterval { x0: f64, x_end: f64 },
    #[error("The number of steps must be positive.")]
    ZeroSteps,
    #[error("Invalid gap half-width {gap}. It must be finite and positive.")]
    InvalidGap { gap: f64 },
    #[error("Undefined singularity: y0 + e^x0 vanishes for x0 = {x0}, y0 = {y0}.")]
    UndefinedSingularity { x0: f64, y0: f64 },
    #[error("The singularity at x = {c} lies outside ({x0}, {x_end}).")]
    SingularityOutsideDomain { c: f64, x0: f64, x_end: f64 },
    #[error("No grid keeps a gap of {gap} around the singularity at x = {c}.")]
    SingularityNearBoundary { c: f64, gap: f64 },
    #[error("The grid was built around x = {grid} but the problem is singular at x = {problem}.")]
    GridMismatch { grid: f64, problem: f64 },
    #[error("Expected {expected} values, found {found}.")]
    LengthMismatch { expected: usize, found: usize },
    #[error("Invalid resolution sweep {start}..={end} by {step}.")]
    InvalidSweep {
        start: usize,
        end: usize,
        step: usize,
    },
    #[error("Unknown method `{0}`.")]
    UnknownMethod(String),
}

/// Contains some statistics of the integration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Stats {
    pub num_eval: u32,
    pub advanced_steps: u32,
    pub reanchored_steps: u32,
    /// Index of the first non-finite value of the trajectory.
    pub diverged_at: Option<usize>,
}

impl Stats {
    pub(crate) fn new() -> Stats {
        Stats::default()
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Number of function evaluations: {}", self.num_eval)?;
        writeln!(f, "Number of advanced steps: {}", self.advanced_steps)?;
        write!(f, "Number of re-anchored steps: {}", self.reanchored_steps)?;
        if let Some(index) = self.diverged_at {
            write!(f, "\nDiverged at step: {}", index)?;
        }
        Ok(())
    }
}

/// Outcome of a single integration step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// The value was computed by the stepping formula of the scheme.
    Advance(f64),
    /// The step crossed the singularity and the value was taken from the exact solution.
    Reanchor(f64),
}

impl Step {
    pub fn value(self) -> f64 {
        match self {
            Step::Advance(y) | Step::Reanchor(y) => y,
        }
    }
}

/// Fixed-step update rule.
pub trait Scheme {
    /// Number of evaluations of the right-hand side per step.
    const NUM_EVAL: u32;

    /// Computes the value at `x + h` from the value `y` at `x`.
    fn advance(&self, x: f64, y: f64, h: f64) -> f64;
}

/// Computes the value at index `i` of the grid from the value `prev_y` at index `i - 1`.
///
/// At the breakpoint the stepping formula is skipped and the trajectory is re-anchored to the
/// exact solution, since no step can cross the asymptote.
pub fn next_step<S: Scheme>(
    scheme: &S,
    problem: &Problem,
    grid: &Grid,
    i: usize,
    prev_y: f64,
) -> Step {
    let points = grid.points();
    if grid.breakpoint() == Some(i) {
        Step::Reanchor(problem.exact_solution(points[i]))
    } else {
        Step::Advance(scheme.advance(points[i - 1], prev_y, grid.step_size()))
    }
}

/// Drives a scheme over every point of a grid.
pub struct Stepper<'a, S: Scheme> {
    scheme: S,
    problem: &'a Problem,
    grid: &'a Grid,
    y_out: Vec<f64>,
    steps: Vec<Step>,
    stats: Stats,
}

impl<'a, S: Scheme> Stepper<'a, S> {
    /// Default initializer for the structure
    ///
    /// # Arguments
    ///
    /// * `scheme`  - Update rule applied between two grid points
    /// * `problem` - Problem providing the initial value and the exact solution
    /// * `grid`    - Grid built for `problem`
    ///
    pub fn new(scheme: S, problem: &'a Problem, grid: &'a Grid) -> Self {
        Stepper {
            scheme,
            problem,
            grid,
            y_out: Vec::new(),
            steps: Vec::new(),
            stats: Stats::new(),
        }
    }

    /// Core integration method.
    pub fn integrate(&mut self) -> Result<Stats, IntegrationError> {
        if self.grid.singularity() != self.problem.singularity()
            || self.grid.points()[0] != self.problem.x0()
        {
            return Err(IntegrationError::GridMismatch {
                grid: self.grid.singularity(),
                problem: self.problem.singularity(),
            });
        }

        self.y_out.clear();
        self.steps.clear();
        self.stats = Stats::new();

        let mut y = self.problem.y0();
        self.y_out.push(y);

        for i in 1..self.grid.len() {
            let step = next_step(&self.scheme, self.problem, self.grid, i, y);
            match step {
                Step::Advance(_) => {
                    self.stats.num_eval += S::NUM_EVAL;
                    self.stats.advanced_steps += 1;
                }
                Step::Reanchor(value) => {
                    trace!(
                        "Re-anchored to the exact solution at x = {}: {}",
                        self.grid.points()[i],
                        value
                    );
                    self.stats.reanchored_steps += 1;
                }
            }

            y = step.value();
            if !y.is_finite() && self.stats.diverged_at.is_none() {
                warn!(
                    "Trajectory diverged at x = {} (step {} of {})",
                    self.grid.points()[i],
                    i,
                    self.grid.resolution()
                );
                self.stats.diverged_at = Some(i);
            }

            self.y_out.push(y);
            self.steps.push(step);
        }
        Ok(self.stats)
    }

    /// Getter for the independent variable's output.
    pub fn x_out(&self) -> &DVector<f64> {
        self.grid.points()
    }

    /// Getter for the dependent variable's output.
    pub fn y_out(&self) -> &Vec<f64> {
        &self.y_out
    }

    /// Outcome of every step, starting with the one producing index 1.
    pub fn steps(&self) -> &Vec<Step> {
        &self.steps
    }
}

/// Integration scheme offered to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Method {
    Euler,
    Improved,
    RungeKutta,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::Euler, Method::Improved, Method::RungeKutta];

    /// Runs the method on a grid built for `problem`.
    pub fn integrate(self, problem: &Problem, grid: &Grid) -> Result<Solution, IntegrationError> {
        let (y_out, stats) = match self {
            Method::Euler => run(Euler, problem, grid)?,
            Method::Improved => run(ImprovedEuler, problem, grid)?,
            Method::RungeKutta => run(Rk4, problem, grid)?,
        };
        Ok(Solution {
            grid: grid.points().clone(),
            trajectory: DVector::from_vec(y_out),
            breakpoint: grid.breakpoint(),
            stats,
        })
    }
}

fn run<S: Scheme>(
    scheme: S,
    problem: &Problem,
    grid: &Grid,
) -> Result<(Vec<f64>, Stats), IntegrationError> {
    let mut stepper = Stepper::new(scheme, problem, grid);
    let stats = stepper.integrate()?;
    Ok((stepper.y_out, stats))
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Method::Euler => "Euler's method",
            Method::Improved => "Improved Euler's method",
            Method::RungeKutta => "Runge-Kutta method",
        };
        f.write_str(name)
    }
}

impl FromStr for Method {
    type Err = IntegrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euler" => Ok(Method::Euler),
            "improved" | "improved-euler" => Ok(Method::Improved),
            "runge-kutta" | "rk4" => Ok(Method::RungeKutta),
            _ => Err(IntegrationError::UnknownMethod(s.to_string())),
        }
    }
}

/// Grid and trajectory produced by one method.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Solution {
    pub grid: DVector<f64>,
    pub trajectory: DVector<f64>,
    pub breakpoint: Option<usize>,
    pub stats: Stats,
}

impl Solution {
    /// Local error of the trajectory against the exact solution of `problem`.
    pub fn local_error(&self, problem: &Problem) -> Result<ErrorSeries, IntegrationError> {
        local_error(problem, &self.grid, &self.trajectory)
    }
}

/// Integrates `problem` at its requested number of steps.
pub fn solve(problem: &Problem, method: Method) -> Result<Solution, IntegrationError> {
    let grid = problem.grid()?;
    method.integrate(problem, &grid)
}
