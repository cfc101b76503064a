//! Fixed-step explicit schemes for a scalar IVP  dy/dx = f(x, y),  y(x0) = y0
//!
//! All steppers share one contract: `(f, x0, y0, h, n) -> Trajectory` with exactly `n + 1`
//! samples, the first being the supplied `(x0, y0)`. Sample abscissae are `x0 + i*h`.
//! NaN/Inf produced by `f` are not trapped; they propagate into the trajectory.
//! Example
//! ```rust, ignore
//! use RustedStepper::numerical::fixed_step::{runge_kutta4, FixedStepMethod};
//! let f = |_x: f64, y: f64| y;
//! let rk = runge_kutta4(&f, 0.0, 1.0, 0.1, 10).unwrap();
//! println!("y(1) = {}", rk.last().1);
//! // or the same through the method enum
//! let euler = FixedStepMethod::Euler.integrate(&f, 0.0, 1.0, 0.1, 10).unwrap();
//! ```
use crate::numerical::grid::MAX_STEPS;
use crate::numerical::ivp_error::IVPError;
use crate::numerical::trajectory::Trajectory;
use strum_macros::{Display, EnumIter, EnumString};

/// the approximate schemes compared against the exact solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display)]
pub enum FixedStepMethod {
    #[strum(to_string = "Euler", serialize = "euler")]
    Euler,
    #[strum(to_string = "Improved Euler", serialize = "improved_euler", serialize = "heun")]
    ImprovedEuler,
    #[strum(to_string = "Runge-Kutta", serialize = "rk4", serialize = "runge_kutta")]
    RungeKutta4,
}

impl FixedStepMethod {
    /// order of the global error, O(h^order)
    pub fn order(&self) -> u32 {
        match self {
            FixedStepMethod::Euler => 1,
            FixedStepMethod::ImprovedEuler => 2,
            FixedStepMethod::RungeKutta4 => 4,
        }
    }

    pub fn integrate<F>(
        &self,
        f: &F,
        x0: f64,
        y0: f64,
        h: f64,
        n: usize,
    ) -> Result<Trajectory, IVPError>
    where
        F: Fn(f64, f64) -> f64,
    {
        match self {
            FixedStepMethod::Euler => euler(f, x0, y0, h, n),
            FixedStepMethod::ImprovedEuler => improved_euler(f, x0, y0, h, n),
            FixedStepMethod::RungeKutta4 => runge_kutta4(f, x0, y0, h, n),
        }
    }
}

fn check_step(h: f64, n: usize) -> Result<(), IVPError> {
    if n > 0 && (!h.is_finite() || h == 0.0) {
        return Err(IVPError::InvalidStepSize(h));
    }
    if n > MAX_STEPS {
        return Err(IVPError::InvalidInput(format!(
            "{} steps requested, at most {} allowed",
            n, MAX_STEPS
        )));
    }
    Ok(())
}

/// shared loop: `advance(x, y, x_next)` returns y at x_next = x + h
fn march<A>(x0: f64, y0: f64, h: f64, n: usize, mut advance: A) -> Result<Trajectory, IVPError>
where
    A: FnMut(f64, f64, f64) -> f64,
{
    check_step(h, n)?;
    let mut xs = Vec::with_capacity(n + 1);
    let mut ys = Vec::with_capacity(n + 1);
    xs.push(x0);
    ys.push(y0);
    let (mut x, mut y) = (x0, y0);
    for i in 1..=n {
        let x_next = x0 + i as f64 * h;
        y = advance(x, y, x_next);
        x = x_next;
        xs.push(x);
        ys.push(y);
    }
    Ok(Trajectory::from_buffers(xs, ys))
}

/// forward Euler: y <- y + h*f(x, y)
pub fn euler<F>(f: &F, x0: f64, y0: f64, h: f64, n: usize) -> Result<Trajectory, IVPError>
where
    F: Fn(f64, f64) -> f64,
{
    march(x0, y0, h, n, |x, y, _| y + h * f(x, y))
}

/// Improved Euler (Heun): predictor y + h*k, corrector averages the slopes at both ends
pub fn improved_euler<F>(
    f: &F,
    x0: f64,
    y0: f64,
    h: f64,
    n: usize,
) -> Result<Trajectory, IVPError>
where
    F: Fn(f64, f64) -> f64,
{
    march(x0, y0, h, n, |x, y, _| {
        let k = f(x, y);
        let y_pred = y + h * k;
        y + 0.5 * h * (k + f(x + h, y_pred))
    })
}

/// classic four-stage Runge-Kutta
pub fn runge_kutta4<F>(
    f: &F,
    x0: f64,
    y0: f64,
    h: f64,
    n: usize,
) -> Result<Trajectory, IVPError>
where
    F: Fn(f64, f64) -> f64,
{
    march(x0, y0, h, n, |x, y, _| {
        let k1 = f(x, y);
        let k2 = f(x + 0.5 * h, y + 0.5 * h * k1);
        let k3 = f(x + 0.5 * h, y + 0.5 * h * k2);
        let k4 = f(x + h, y + h * k3);
        y + h / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4)
    })
}

/// Samples the closed-form solution `exact(x)` on the same grid as the steppers.
///
/// The first sample is the caller's `y0`, NOT `exact(x0)`: the initial condition is trusted to
/// agree with the exact solution. Use [`initial_mismatch`] to check that assumption.
pub fn exact_solution<F>(
    exact: &F,
    x0: f64,
    y0: f64,
    h: f64,
    n: usize,
) -> Result<Trajectory, IVPError>
where
    F: Fn(f64) -> f64,
{
    march(x0, y0, h, n, |_, _, x_next| exact(x_next))
}

/// |exact(x0) - y0|
pub fn initial_mismatch<F>(exact: &F, x0: f64, y0: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    (exact(x0) - y0).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn growth(_x: f64, y: f64) -> f64 {
        y
    }

    #[test]
    fn test_length_and_initial_sample() {
        for n in [0usize, 1, 7, 40] {
            for method in FixedStepMethod::iter() {
                let t = method.integrate(&growth, 0.3, 2.0, 0.05, n).unwrap();
                assert_eq!(t.len(), n + 1);
                assert_eq!(t.first(), (0.3, 2.0));
            }
            let t = exact_solution(&|x: f64| x.exp(), 0.3, 2.0, 0.05, n).unwrap();
            assert_eq!(t.len(), n + 1);
            assert_eq!(t.first(), (0.3, 2.0));
        }
    }

    #[test]
    fn test_x_spacing_equals_h() {
        let h = 0.1;
        for method in FixedStepMethod::iter() {
            let t = method.integrate(&growth, -1.0, 1.0, h, 25).unwrap();
            assert!(t.is_strictly_monotonic());
            for i in 0..t.len() - 1 {
                assert_abs_diff_eq!(t.x()[i + 1] - t.x()[i], h, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_negative_step_marches_backwards() {
        let t = runge_kutta4(&growth, 1.0, 1.0_f64.exp(), -0.1, 10).unwrap();
        assert_abs_diff_eq!(t.last().0, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t.last().1, 1.0, epsilon = 1e-5);
        assert!(t.is_strictly_monotonic());
    }

    #[test]
    fn test_order_of_accuracy_separation() {
        // dy/dx = y, y(0) = 1, exact y(1) = e
        let e = 1.0_f64.exp();
        let rk = runge_kutta4(&growth, 0.0, 1.0, 0.1, 10).unwrap();
        let heun = improved_euler(&growth, 0.0, 1.0, 0.1, 10).unwrap();
        let eu = euler(&growth, 0.0, 1.0, 0.1, 10).unwrap();
        let err_rk = (rk.y()[10] - e).abs();
        let err_heun = (heun.y()[10] - e).abs();
        let err_eu = (eu.y()[10] - e).abs();
        assert!(err_rk < 1e-5);
        assert!(err_eu > 1e-2);
        assert!(err_rk < err_heun && err_heun < err_eu);
        // closed forms of one step applied ten times
        assert_relative_eq!(eu.y()[10], 1.1_f64.powi(10), epsilon = 1e-12);
        assert_relative_eq!(heun.y()[10], 1.105_f64.powi(10), epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_zero_steps_ignores_h() {
        for h in [0.0, f64::NAN, f64::INFINITY, 0.25] {
            for method in FixedStepMethod::iter() {
                let t = method.integrate(&growth, 1.5, -2.0, h, 0).unwrap();
                assert_eq!(t.len(), 1);
                assert_eq!(t.first(), (1.5, -2.0));
            }
        }
    }

    #[test]
    fn test_invalid_step_size_fails() {
        for h in [0.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            for method in FixedStepMethod::iter() {
                let res = method.integrate(&growth, 0.0, 1.0, h, 5);
                assert!(matches!(res, Err(IVPError::InvalidStepSize(_))));
            }
            assert!(exact_solution(&|x: f64| x, 0.0, 0.0, h, 3).is_err());
        }
    }

    #[test]
    fn test_oversized_step_count_fails() {
        let res = euler(&growth, 0.0, 1.0, 1e-3, usize::MAX);
        assert!(matches!(res, Err(IVPError::InvalidInput(_))));
        let res = exact_solution(&|x: f64| x, 0.0, 0.0, 1e-3, MAX_STEPS + 1);
        assert!(matches!(res, Err(IVPError::InvalidInput(_))));
    }

    #[test]
    fn test_divergence_propagates_silently() {
        // y' = y^2, y(0) = 1 blows up at x = 1
        let f = |_x: f64, y: f64| y * y;
        let t = euler(&f, 0.0, 1.0, 0.5, 14).unwrap();
        assert_eq!(t.len(), 15);
        assert!(t.y().iter().any(|y| !y.is_finite()));
    }

    #[test]
    fn test_exact_trusts_initial_value() {
        let exact = |x: f64| x * x;
        // deliberately inconsistent y0
        let t = exact_solution(&exact, 1.0, 5.0, 0.5, 2).unwrap();
        assert_eq!(t.y()[0], 5.0);
        assert_relative_eq!(t.y()[1], 2.25);
        assert_relative_eq!(t.y()[2], 4.0);
        assert_relative_eq!(initial_mismatch(&exact, 1.0, 5.0), 4.0);
        assert_eq!(initial_mismatch(&exact, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_method_names_and_orders() {
        let names: Vec<String> = FixedStepMethod::iter().map(|m| m.to_string()).collect();
        assert_eq!(names, vec!["Euler", "Improved Euler", "Runge-Kutta"]);
        let orders: Vec<u32> = FixedStepMethod::iter().map(|m| m.order()).collect();
        assert_eq!(orders, vec![1, 2, 4]);
        assert_eq!(
            FixedStepMethod::from_str("rk4").unwrap(),
            FixedStepMethod::RungeKutta4
        );
        assert_eq!(
            FixedStepMethod::from_str("heun").unwrap(),
            FixedStepMethod::ImprovedEuler
        );
        assert!(FixedStepMethod::from_str("bdf").is_err());
    }
}
