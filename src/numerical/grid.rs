//! Step count / step size reconciliation over a domain [x_start, x_end].
//!
//! The user fixes exactly one of (n, h); the other is derived:
//! h = (x_end - x_start)/n  or  n = (x_end - x_start)/h.
//! A step count derived from h is snapped to the nearest integer when it is within
//! `SNAP_TOLERANCE` of it (so 5.5/0.1 gives 55, not 54) and truncated toward zero otherwise.
use crate::numerical::ivp_error::IVPError;
use log::debug;

const SNAP_TOLERANCE: f64 = 1e-9;
/// upper bound on the number of steps of one run
pub const MAX_STEPS: usize = 100_000_000;

/// which grid parameter the user supplied
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridSpec {
    StepCount(usize),
    StepSize(f64),
}

/// reconciled grid: both parameters defined
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub h: f64,
    pub n: usize,
    /// (x_end - x_start)/h before rounding; equals n for a StepCount spec
    pub n_exact: f64,
}

impl GridSpec {
    /// Builds a spec from two optional inputs of which exactly one must be present.
    /// A fractional step count is truncated toward zero.
    pub fn from_options(n: Option<f64>, h: Option<f64>) -> Result<GridSpec, IVPError> {
        match (n, h) {
            (Some(n), None) => {
                if !n.is_finite() || n < 0.0 {
                    return Err(IVPError::InvalidGridSpecification(format!(
                        "step count must be a finite non-negative number (got {})",
                        n
                    )));
                }
                if n.trunc() > MAX_STEPS as f64 {
                    return Err(too_many_steps(n));
                }
                Ok(GridSpec::StepCount(n.trunc() as usize))
            }
            (None, Some(h)) => Ok(GridSpec::StepSize(h)),
            (Some(_), Some(_)) => Err(IVPError::InvalidGridSpecification(
                "both step count and step size given, expected exactly one".to_string(),
            )),
            (None, None) => Err(IVPError::InvalidGridSpecification(
                "neither step count nor step size given, expected exactly one".to_string(),
            )),
        }
    }
}

/// derive the missing grid parameter
pub fn reconcile(x_start: f64, x_end: f64, spec: GridSpec) -> Result<Grid, IVPError> {
    let span = x_end - x_start;
    if !span.is_finite() {
        return Err(IVPError::InvalidGridSpecification(format!(
            "domain [{}, {}] is not finite",
            x_start, x_end
        )));
    }
    let grid = match spec {
        GridSpec::StepCount(n) => {
            if n == 0 {
                return Err(IVPError::InvalidGridSpecification(
                    "step count must be positive to derive a step size".to_string(),
                ));
            }
            if n > MAX_STEPS {
                return Err(too_many_steps(n as f64));
            }
            if span == 0.0 {
                return Err(IVPError::InvalidGridSpecification(format!(
                    "zero-width domain at x = {} gives a zero step size",
                    x_start
                )));
            }
            Grid {
                h: span / n as f64,
                n,
                n_exact: n as f64,
            }
        }
        GridSpec::StepSize(h) => {
            if !h.is_finite() || h == 0.0 {
                return Err(IVPError::InvalidGridSpecification(format!(
                    "step size must be finite and nonzero (got {})",
                    h
                )));
            }
            let n_exact = span / h;
            if !n_exact.is_finite() || n_exact > MAX_STEPS as f64 {
                return Err(too_many_steps(n_exact));
            }
            if n_exact < 0.0 {
                return Err(IVPError::InvalidGridSpecification(format!(
                    "step size {} points away from x_end = {}",
                    h, x_end
                )));
            }
            Grid {
                h,
                n: steps_from_ratio(n_exact),
                n_exact,
            }
        }
    };
    debug!(
        "grid over [{}, {}]: h = {}, n = {} (exact ratio {})",
        x_start, x_end, grid.h, grid.n, grid.n_exact
    );
    Ok(grid)
}

/// `reconcile` for the two-optional-inputs form
pub fn reconcile_options(
    x_start: f64,
    x_end: f64,
    n: Option<f64>,
    h: Option<f64>,
) -> Result<Grid, IVPError> {
    reconcile(x_start, x_end, GridSpec::from_options(n, h)?)
}

fn too_many_steps(n: f64) -> IVPError {
    IVPError::InvalidGridSpecification(format!(
        "step count {} exceeds the limit of {} steps",
        n, MAX_STEPS
    ))
}

fn steps_from_ratio(n_exact: f64) -> usize {
    let nearest = n_exact.round();
    if (n_exact - nearest).abs() <= SNAP_TOLERANCE * nearest.max(1.0) {
        nearest as usize
    } else {
        n_exact.trunc() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_step_count_gives_step_size() {
        let grid = reconcile(0.0, 5.5, GridSpec::StepCount(11)).unwrap();
        assert_relative_eq!(grid.h, 0.5);
        assert_eq!(grid.n, 11);
        assert_relative_eq!(grid.h * grid.n as f64, 5.5, epsilon = 1e-12);
    }

    #[test]
    fn test_step_size_gives_step_count() {
        let grid = reconcile(0.0, 5.5, GridSpec::StepSize(0.1)).unwrap();
        assert_eq!(grid.n, 55);
        assert_relative_eq!(grid.n_exact, 55.0, epsilon = 1e-9);
        let grid = reconcile(-1.0, 1.0, GridSpec::StepSize(0.25)).unwrap();
        assert_eq!(grid.n, 8);
    }

    #[test]
    fn test_fractional_ratio_is_truncated() {
        let grid = reconcile(0.0, 1.0, GridSpec::StepSize(0.3)).unwrap();
        assert_eq!(grid.n, 3);
        assert_relative_eq!(grid.n_exact, 1.0 / 0.3);
        assert_eq!(
            GridSpec::from_options(Some(7.9), None).unwrap(),
            GridSpec::StepCount(7)
        );
    }

    #[test]
    fn test_backward_domain() {
        let grid = reconcile(2.0, 0.0, GridSpec::StepCount(4)).unwrap();
        assert_relative_eq!(grid.h, -0.5);
        let grid = reconcile(2.0, 0.0, GridSpec::StepSize(-0.5)).unwrap();
        assert_eq!(grid.n, 4);
        assert!(reconcile(2.0, 0.0, GridSpec::StepSize(0.5)).is_err());
    }

    #[test]
    fn test_both_or_neither_fails() {
        let both = reconcile_options(0.0, 1.0, Some(10.0), Some(0.1));
        assert!(matches!(both, Err(IVPError::InvalidGridSpecification(_))));
        let neither = reconcile_options(0.0, 1.0, None, None);
        assert!(matches!(neither, Err(IVPError::InvalidGridSpecification(_))));
        let ok = reconcile_options(0.0, 1.0, None, Some(0.1)).unwrap();
        assert_eq!(ok.n, 10);
    }

    #[test]
    fn test_degenerate_inputs_fail() {
        assert!(reconcile(0.0, 1.0, GridSpec::StepCount(0)).is_err());
        assert!(reconcile(1.0, 1.0, GridSpec::StepCount(5)).is_err());
        assert!(reconcile(0.0, 1.0, GridSpec::StepSize(0.0)).is_err());
        assert!(reconcile(0.0, 1.0, GridSpec::StepSize(f64::NAN)).is_err());
        assert!(reconcile(0.0, f64::INFINITY, GridSpec::StepSize(0.1)).is_err());
        assert!(GridSpec::from_options(Some(-3.0), None).is_err());
        assert!(GridSpec::from_options(Some(f64::NAN), None).is_err());
        // zero-width domain with a step size is a valid single-point grid
        let grid = reconcile(1.0, 1.0, GridSpec::StepSize(0.1)).unwrap();
        assert_eq!(grid.n, 0);
    }

    #[test]
    fn test_step_count_limit() {
        // ratio overflows to infinity
        let res = reconcile(0.0, 1e300, GridSpec::StepSize(1e-300));
        assert!(matches!(res, Err(IVPError::InvalidGridSpecification(_))));
        let res = reconcile(0.0, 1.0, GridSpec::StepSize(1e-320));
        assert!(matches!(res, Err(IVPError::InvalidGridSpecification(_))));
        assert!(reconcile(0.0, 1.0, GridSpec::StepSize(1e-9)).is_err());

        assert!(matches!(
            GridSpec::from_options(Some(1e30), None),
            Err(IVPError::InvalidGridSpecification(_))
        ));
        let res = reconcile(0.0, 1.0, GridSpec::StepCount(usize::MAX));
        assert!(matches!(res, Err(IVPError::InvalidGridSpecification(_))));
        assert!(reconcile(0.0, 1.0, GridSpec::StepCount(MAX_STEPS + 1)).is_err());

        let at_limit = reconcile(0.0, 1.0, GridSpec::StepCount(MAX_STEPS)).unwrap();
        assert_eq!(at_limit.n, MAX_STEPS);
        assert_eq!(
            GridSpec::from_options(Some(MAX_STEPS as f64), None).unwrap(),
            GridSpec::StepCount(MAX_STEPS)
        );
    }
}
