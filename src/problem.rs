//! Definition of the equation dy/dx = (1 - 2y)e^x + y^2 + e^(2x) and of its closed-form solution.

use std::fmt;

use nalgebra::DVector;

use crate::constants;
use crate::fixed_shared::IntegrationError;
use crate::grid::{build_grid, Grid};

/// Right-hand side of the equation.
pub fn formula(x: f64, y: f64) -> f64 {
    (1.0 - 2.0 * y) * x.exp() + y * y + (2.0 * x).exp()
}

/// Parameters of the initial value problem together with the location of the singularity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Problem {
    x0: f64,
    x_end: f64,
    n: usize,
    y0: f64,
    gap: f64,
    c: f64,
}

impl Problem {
    /// Default initializer for the structure
    ///
    /// # Arguments
    ///
    /// * `x0`      - Initial value of the independent variable
    /// * `x_end`   - Final value of the independent variable
    /// * `n`       - Number of steps
    /// * `y0`      - Initial value of the dependent variable
    ///
    pub fn new(x0: f64, x_end: f64, n: usize, y0: f64) -> Result<Self, IntegrationError> {
        Self::from_param(x0, x_end, n, y0, constants::grid::GAP_HALF_WIDTH)
    }

    /// Advanced initializer for the structure.
    ///
    /// # Arguments
    ///
    /// * `x0`      - Initial value of the independent variable
    /// * `x_end`   - Final value of the independent variable
    /// * `n`       - Number of steps
    /// * `y0`      - Initial value of the dependent variable
    /// * `gap`     - Half-width of the neighbourhood of the singularity left out of every grid. Default is 0.1
    ///
    pub fn from_param(
        x0: f64,
        x_end: f64,
        n: usize,
        y0: f64,
        gap: f64,
    ) -> Result<Self, IntegrationError> {
        if !x0.is_finite() || !x_end.is_finite() || x0 >= x_end {
            return Err(IntegrationError::InvalidInterval { x0, x_end });
        }
        if n == 0 {
            return Err(IntegrationError::ZeroSteps);
        }
        if !gap.is_finite() || gap <= 0.0 {
            return Err(IntegrationError::InvalidGap { gap });
        }

        let denominator = y0 + x0.exp();
        let c = 1.0 / denominator + x0;
        if denominator == 0.0 || !c.is_finite() {
            return Err(IntegrationError::UndefinedSingularity { x0, y0 });
        }
        if c <= x0 || c >= x_end {
            return Err(IntegrationError::SingularityOutsideDomain { c, x0, x_end });
        }

        Ok(Self {
            x0,
            x_end,
            n,
            y0,
            gap,
            c,
        })
    }

    /// Closed-form solution 1/(C - x) + e^x. Diverges as x approaches the singularity.
    pub fn exact_solution(&self, x: f64) -> f64 {
        1.0 / (self.c - x) + x.exp()
    }

    /// Samples the closed-form solution on every point of the grid.
    pub fn exact_trajectory(&self, grid: &Grid) -> DVector<f64> {
        grid.points().map(|x| self.exact_solution(x))
    }

    /// Builds the grid at the requested number of steps.
    pub fn grid(&self) -> Result<Grid, IntegrationError> {
        self.grid_at(self.n)
    }

    /// Builds a fresh grid at an arbitrary resolution.
    pub fn grid_at(&self, n: usize) -> Result<Grid, IntegrationError> {
        build_grid(self.x0, self.x_end, n, self.c, self.gap)
    }

    /// Location of the vertical asymptote of the exact solution.
    pub fn singularity(&self) -> f64 {
        self.c
    }

    /// Step height (X - x0) / n.
    pub fn step_size(&self) -> f64 {
        (self.x_end - self.x0) / self.n as f64
    }

    pub fn x0(&self) -> f64 {
        self.x0
    }

    pub fn y0(&self) -> f64 {
        self.y0
    }

    pub fn n(&self) -> usize {
        self.n
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "x0: {}, X: {}, n: {}, y0: {}, h: {}",
            self.x0,
            self.x_end,
            self.n,
            self.y0,
            self.step_size()
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::fixed_shared::IntegrationError;
    use crate::problem::{formula, Problem};
    use approx::assert_relative_eq;

    #[test]
    fn test_singularity_default_configuration() {
        let problem = Problem::new(-5., 0., 100, 2.).unwrap();
        assert_relative_eq!(problem.singularity(), -4.5016788308, epsilon = 1.0E-9);
        assert_relative_eq!(problem.step_size(), 0.05, epsilon = 1.0E-15);
    }

    #[test]
    fn test_formula_is_derivative_of_exact_solution() {
        let problem = Problem::new(-5., 0., 100, 2.).unwrap();
        let c = problem.singularity();
        for &x in &[-5.0, -4.8, -4.2, -3.0, -1.0, 0.0] {
            let slope = 1.0 / ((c - x) * (c - x)) + f64::exp(x);
            assert_relative_eq!(
                formula(x, problem.exact_solution(x)),
                slope,
                max_relative = 1.0E-9
            );
        }
    }

    #[test]
    fn test_exact_solution_at_start() {
        let problem = Problem::new(-5., 0., 100, 2.).unwrap();
        assert_relative_eq!(
            problem.exact_solution(-5.),
            2. + 2. * f64::exp(-5.),
            max_relative = 1.0E-12
        );
    }

    #[test]
    fn test_exact_trajectory() {
        let problem = Problem::new(-5., 0., 100, 2.).unwrap();
        let grid = problem.grid().unwrap();
        let exact = problem.exact_trajectory(&grid);
        assert_eq!(exact.len(), problem.n());
        for (x, y) in grid.points().iter().zip(exact.iter()) {
            assert_eq!(*y, problem.exact_solution(*x));
        }
    }

    #[test]
    fn test_invalid_interval() {
        assert!(matches!(
            Problem::new(0., 0., 100, 2.),
            Err(IntegrationError::InvalidInterval { .. })
        ));
        assert!(matches!(
            Problem::new(1., -1., 100, 2.),
            Err(IntegrationError::InvalidInterval { .. })
        ));
        assert!(matches!(
            Problem::new(f64::NAN, 0., 100, 2.),
            Err(IntegrationError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn test_zero_steps() {
        assert!(matches!(
            Problem::new(-5., 0., 0, 2.),
            Err(IntegrationError::ZeroSteps)
        ));
    }

    #[test]
    fn test_invalid_gap() {
        assert!(matches!(
            Problem::from_param(-5., 0., 100, 2., 0.),
            Err(IntegrationError::InvalidGap { .. })
        ));
    }

    #[test]
    fn test_undefined_singularity() {
        assert!(matches!(
            Problem::new(0., 1., 100, -1.),
            Err(IntegrationError::UndefinedSingularity { .. })
        ));
    }

    #[test]
    fn test_singularity_outside_domain() {
        // C = e - 1 lies to the right of X = 0
        assert!(matches!(
            Problem::new(-1., 0., 100, 0.),
            Err(IntegrationError::SingularityOutsideDomain { .. })
        ));
        // Negative denominator puts C to the left of x0
        assert!(matches!(
            Problem::new(-5., 0., 100, -2.),
            Err(IntegrationError::SingularityOutsideDomain { .. })
        ));
    }

    #[test]
    fn test_display() {
        let problem = Problem::new(-5., 0., 100, 2.).unwrap();
        assert_eq!(format!("{}", problem), "x0: -5, X: 0, n: 100, y0: 2, h: 0.05");
    }
}
