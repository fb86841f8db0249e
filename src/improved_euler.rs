//! Improved Euler method with fixed step size.

use crate::fixed_shared::Scheme;
use crate::problem::formula;

/// Predictor-corrector update evaluating the slope once at the midpoint abscissa.
///
/// The predicted ordinate is `y + (h / 2) * y`, i.e. `y` itself stands in for the slope.
/// This differs from the textbook midpoint rule and the results depend on it.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImprovedEuler;

impl Scheme for ImprovedEuler {
    const NUM_EVAL: u32 = 1;

    fn advance(&self, x: f64, y: f64, h: f64) -> f64 {
        let half_step = h / 2.;
        let temp_x = x + half_step;
        let temp_y = y + half_step * y;
        let delta_y = h * formula(temp_x, temp_y);
        y + delta_y
    }
}

#[cfg(test)]
mod tests {
    use crate::fixed_shared::{Method, Scheme};
    use crate::improved_euler::ImprovedEuler;
    use crate::problem::{formula, Problem};
    use approx::assert_relative_eq;

    #[test]
    fn test_advance_uses_value_as_predictor_slope() {
        let (x, y, h) = (-2., 1.5, 0.05);
        let expected = y + h * formula(x + h / 2., y + h / 2. * y);
        assert_eq!(ImprovedEuler.advance(x, y, h), expected);

        let textbook = y + h * formula(x + h / 2., y + h / 2. * formula(x, y));
        assert!((ImprovedEuler.advance(x, y, h) - textbook).abs() > 1.0E-6);
    }

    #[test]
    fn test_integrate_default_problem() {
        let problem = Problem::new(-5., 0., 100, 2.).unwrap();
        let solution = Method::Improved
            .integrate(&problem, &problem.grid().unwrap())
            .unwrap();
        let y = &solution.trajectory;

        assert_eq!(y[0], 2.);
        assert!(y.iter().all(|v| v.is_finite()));
        assert_relative_eq!(y[1], 2.2090565659460815, max_relative = 1.0E-9);
        assert_relative_eq!(y[5], 3.7170314373158027, max_relative = 1.0E-9);
        assert_relative_eq!(y[8], 7.039387176483688, max_relative = 1.0E-9);
        assert_relative_eq!(y[10], -4.733985944139257, max_relative = 1.0E-9);
        assert_relative_eq!(y[50], -0.31642166673192906, max_relative = 1.0E-9);
        assert_relative_eq!(y[99], 0.8178285601010685, max_relative = 1.0E-9);
    }

    #[test]
    fn test_every_step_follows_update_rule() {
        let problem = Problem::new(-3., 0., 100, 1.).unwrap();
        let grid = problem.grid().unwrap();
        let solution = Method::Improved.integrate(&problem, &grid).unwrap();
        let x = &solution.grid;
        let y = &solution.trajectory;
        let h = grid.step_size();
        let breakpoint = grid.breakpoint().unwrap();

        for i in 1..y.len() {
            if i == breakpoint {
                assert_eq!(y[i], problem.exact_solution(x[i]));
            } else {
                let temp_y = y[i - 1] + h / 2. * y[i - 1];
                assert_relative_eq!(
                    y[i],
                    y[i - 1] + h * formula(x[i - 1] + h / 2., temp_y),
                    max_relative = 1.0E-12
                );
            }
        }
    }
}
