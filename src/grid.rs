//! Sample grid that brackets the singularity without landing on it.

use log::debug;
use nalgebra::{DVector, Scalar};
use num_traits::Float;
use serde::Serialize;

use crate::fixed_shared::IntegrationError;

/// Ordered sample points spanning [x0, X] together with the index where they cross the singularity.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid {
    points: DVector<f64>,
    breakpoint: Option<usize>,
    step_size: f64,
    resolution: usize,
    singularity: f64,
}

impl Grid {
    /// Sample points in increasing order.
    pub fn points(&self) -> &DVector<f64> {
        &self.points
    }

    /// First index `i` such that `points[i - 1] < C < points[i]`, if any.
    pub fn breakpoint(&self) -> Option<usize> {
        self.breakpoint
    }

    /// Step height (X - x0) / n used by the integrators on this grid.
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Number of steps the grid was built for.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Singularity the grid was built around.
    pub fn singularity(&self) -> f64 {
        self.singularity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// `count` evenly spaced values from `start` to `end`, both inclusive.
///
/// A single value yields `[start]`; the last value is exactly `end`.
pub fn linspace<T: Float + Scalar>(start: T, end: T, count: usize) -> DVector<T> {
    if count < 2 {
        return DVector::from_element(count, start);
    }
    let step = (end - start) / T::from(count - 1).unwrap();
    DVector::from_fn(count, |i, _| {
        if i == count - 1 {
            end
        } else {
            start + T::from(i).unwrap() * step
        }
    })
}

/// Builds the sample grid on [x0, x_end] with `n` points.
///
/// The fraction of the interval lying before `c` decides how many points are placed on
/// [x0, c - gap]; the remaining ones cover [c + gap, x_end]. When that fraction rounds down
/// to zero points, the grid falls back to a uniform partition of the whole interval, which is
/// only accepted when no point falls within `gap` of `c`.
pub fn build_grid(
    x0: f64,
    x_end: f64,
    n: usize,
    c: f64,
    gap: f64,
) -> Result<Grid, IntegrationError> {
    if !x0.is_finite() || !x_end.is_finite() || x0 >= x_end {
        return Err(IntegrationError::InvalidInterval { x0, x_end });
    }
    if n == 0 {
        return Err(IntegrationError::ZeroSteps);
    }
    if !c.is_finite() || c <= x0 || c >= x_end {
        return Err(IntegrationError::SingularityOutsideDomain { c, x0, x_end });
    }

    let fraction = (x0 - c).abs() / (x0 - x_end).abs();
    let steps_before = (fraction * n as f64).floor() as usize;

    let points = if steps_before == 0 {
        let uniform = linspace(x0, x_end, n);
        if uniform.iter().any(|x| (x - c).abs() < gap) {
            return Err(IntegrationError::SingularityNearBoundary { c, gap });
        }
        debug!(
            "Uniform grid with {} points, singularity at {} clear of every point",
            n, c
        );
        uniform
    } else {
        if c - gap <= x0 || c + gap >= x_end {
            return Err(IntegrationError::SingularityNearBoundary { c, gap });
        }
        let before = linspace(x0, c - gap, steps_before);
        let after = linspace(c + gap, x_end, n - steps_before);
        DVector::from_iterator(n, before.iter().chain(after.iter()).copied())
    };

    let breakpoint = (1..points.len()).find(|&i| points[i - 1] < c && points[i] > c);
    debug!(
        "Grid with {} points, {} before the gap, breakpoint {:?}",
        n, steps_before, breakpoint
    );

    Ok(Grid {
        points,
        breakpoint,
        step_size: (x_end - x0) / n as f64,
        resolution: n,
        singularity: c,
    })
}
