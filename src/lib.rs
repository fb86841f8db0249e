//! # Singular ODE
//! `singular_ode` compares fixed-step integrators on dy/dx = (1 - 2y)e^x + y^2 + e^(2x), whose
//! exact solution 1/(C - x) + e^x has a vertical asymptote at x = C inside the integration interval.
//!
//! The grid leaves out a small neighbourhood of C and every method re-anchors its trajectory to
//! the exact solution right after crossing it.

// Re-export from external crate
pub use nalgebra::DVector;

// Declare modules
pub mod constants;
pub mod error_analysis;
pub mod euler;
pub mod fixed_shared;
pub mod grid;
pub mod improved_euler;
pub mod problem;
pub mod rk4;

pub use error_analysis::{
    global_error, global_error_with, local_error, Convergence, ErrorSeries, Sweep,
};
pub use fixed_shared::{solve, IntegrationError, Method, Solution, Stats, Step};
pub use grid::{build_grid, Grid};
pub use problem::{formula, Problem};
