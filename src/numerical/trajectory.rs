//! Index-aligned (x, y) samples produced by one stepper call.
//!
//! A `Trajectory` is built once from owned buffers and never mutated afterwards; the error
//! calculator and the plotting code only borrow it.
use crate::numerical::ivp_error::IVPError;
use itertools::Itertools;
use nalgebra::DVector;

#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    x: DVector<f64>,
    y: DVector<f64>,
}

impl Trajectory {
    /// checked constructor for trajectories assembled outside the steppers
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Trajectory, IVPError> {
        if x.len() != y.len() {
            return Err(IVPError::InvalidInput(format!(
                "x has {} samples but y has {}",
                x.len(),
                y.len()
            )));
        }
        if x.is_empty() {
            return Err(IVPError::InvalidInput(
                "trajectory must hold at least the initial sample".to_string(),
            ));
        }
        Ok(Trajectory::from_buffers(x, y))
    }

    pub(crate) fn from_buffers(x: Vec<f64>, y: Vec<f64>) -> Trajectory {
        debug_assert_eq!(x.len(), y.len());
        Trajectory {
            x: DVector::from_vec(x),
            y: DVector::from_vec(y),
        }
    }

    pub fn x(&self) -> &DVector<f64> {
        &self.x
    }

    pub fn y(&self) -> &DVector<f64> {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<(f64, f64)> {
        if i < self.len() {
            Some((self.x[i], self.y[i]))
        } else {
            None
        }
    }

    /// initial sample (x0, y0)
    pub fn first(&self) -> (f64, f64) {
        (self.x[0], self.y[0])
    }

    pub fn last(&self) -> (f64, f64) {
        let i = self.len() - 1;
        (self.x[i], self.y[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// samples whose both coordinates are finite; divergent points near a pole are skipped
    pub fn finite_points(&self) -> Vec<(f64, f64)> {
        self.iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect()
    }

    /// true if x grows (or shrinks) strictly from sample to sample
    pub fn is_strictly_monotonic(&self) -> bool {
        let increasing = self.x.iter().tuple_windows().all(|(a, b)| b > a);
        let decreasing = self.x.iter().tuple_windows().all(|(a, b)| b < a);
        increasing || decreasing
    }
}
