//! Pointwise global error |y_approx - y_exact| between an approximate and the exact trajectory.
use crate::numerical::ivp_error::IVPError;
use crate::numerical::trajectory::Trajectory;

/// Error trajectory indexed over `exact`, with the abscissae of `approx`.
/// Fails with `LengthMismatch` when `approx` has fewer samples than `exact`.
pub fn absolute_error(approx: &Trajectory, exact: &Trajectory) -> Result<Trajectory, IVPError> {
    let n = exact.len();
    if approx.len() < n {
        return Err(IVPError::LengthMismatch {
            approx: approx.len(),
            exact: n,
        });
    }
    let x: Vec<f64> = approx.x().iter().take(n).copied().collect();
    let y: Vec<f64> = approx
        .y()
        .iter()
        .zip(exact.y().iter())
        .map(|(a, e)| (a - e).abs())
        .collect();
    Ok(Trajectory::from_buffers(x, y))
}

/// largest finite error and the x where it occurs; NaN/Inf samples are ignored
pub fn max_abs_error(errors: &Trajectory) -> Option<(f64, f64)> {
    errors
        .iter()
        .filter(|(_, e)| e.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, (x, e)| match acc {
            Some((_, best)) if best >= e => acc,
            _ => Some((x, e)),
        })
}
