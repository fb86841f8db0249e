//! Explicit Euler method with fixed step size.

use crate::fixed_shared::Scheme;
use crate::problem::formula;

/// First-order update y + h f(x, y).
#[derive(Clone, Copy, Debug, Default)]
pub struct Euler;

impl Scheme for Euler {
    const NUM_EVAL: u32 = 1;

    fn advance(&self, x: f64, y: f64, h: f64) -> f64 {
        y + h * formula(x, y)
    }
}

#[cfg(test)]
mod tests {
    use crate::euler::Euler;
    use crate::fixed_shared::{Method, Stepper};
    use crate::problem::{formula, Problem};
    use approx::assert_relative_eq;

    #[test]
    fn test_integrate_default_problem() {
        let problem = Problem::new(-5., 0., 100, 2.).unwrap();
        let grid = problem.grid().unwrap();
        let mut stepper = Stepper::new(Euler, &problem, &grid);
        let stats = stepper.integrate().unwrap();
        let y_out = stepper.y_out();

        assert_eq!(y_out.len(), 100);
        assert_eq!(stats.num_eval, 98);
        assert!(y_out.iter().all(|y| y.is_finite()));
        assert!((y_out[1] - 2.198991577946625).abs() < 1.0E-9);
        assert!((y_out[5] - 3.5890523244639243).abs() < 1.0E-9);
        assert!((y_out[8] - 6.429188413784411).abs() < 1.0E-9);
        assert!((y_out[10] + 4.987130417100542).abs() < 1.0E-9);
        assert!((y_out[50] + 0.3382631486071333).abs() < 1.0E-9);
        assert!((y_out[99] - 0.7907387093366308).abs() < 1.0E-9);
    }

    #[test]
    fn test_every_step_follows_update_rule() {
        let problem = Problem::new(-4., 0., 100, 1.).unwrap();
        let grid = problem.grid().unwrap();
        let solution = Method::Euler.integrate(&problem, &grid).unwrap();
        let x = &solution.grid;
        let y = &solution.trajectory;
        let h = grid.step_size();
        let breakpoint = grid.breakpoint().unwrap();

        for i in 1..y.len() {
            if i == breakpoint {
                assert_eq!(y[i], problem.exact_solution(x[i]));
            } else {
                assert_relative_eq!(
                    y[i],
                    y[i - 1] + h * formula(x[i - 1], y[i - 1]),
                    max_relative = 1.0E-12
                );
            }
        }
    }

    #[test]
    fn test_diverges_on_coarse_grid() {
        let problem = Problem::new(-5., 0., 30, 2.).unwrap();
        let solution = Method::Euler.integrate(&problem, &problem.grid().unwrap()).unwrap();
        assert!(solution.stats.diverged_at.is_some());
    }
}
