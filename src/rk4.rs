//! Explicit Runge-Kutta method of order 4 with fixed step size.

use crate::fixed_shared::Scheme;
use crate::problem::formula;

/// Classical four-stage Runge-Kutta update.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rk4;

impl Scheme for Rk4 {
    const NUM_EVAL: u32 = 4;

    /// Performs one step of the Runge-Kutta 4 method.
    fn advance(&self, x: f64, y: f64, h: f64) -> f64 {
        let half_step = h / 2.;
        let k1 = formula(x, y);
        let k2 = formula(x + half_step, y + half_step * k1);
        let k3 = formula(x + half_step, y + half_step * k2);
        let k4 = formula(x + h, y + h * k3);
        y + (k1 + 2. * k2 + 2. * k3 + k4) * (h / 6.)
    }
}
