/// Description of a scalar initial value problem together with its closed-form solution
/// and the analytically known singular points of that solution
use crate::numerical::grid::{Grid, GridSpec, reconcile};
use crate::numerical::ivp_error::IVPError;
use std::fmt;

pub struct IVPProblem {
    pub name: String,
    dydx: Box<dyn Fn(f64, f64) -> f64>,
    exact: Box<dyn Fn(f64) -> f64>,
    pub x0: f64,
    pub y0: f64,
    pub x_end: f64,
    pub grid: GridSpec,
    asymptote_candidates: Vec<f64>,
}

impl fmt::Display for IVPProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IVP {} {{ x0: {}, y0: {}, x_end: {}, grid: {:?} }}",
            self.name, self.x0, self.y0, self.x_end, self.grid
        )
    }
}

impl IVPProblem {
    pub fn new(
        name: &str,
        dydx: Box<dyn Fn(f64, f64) -> f64>,
        exact: Box<dyn Fn(f64) -> f64>,
        x0: f64,
        y0: f64,
        x_end: f64,
        grid: GridSpec,
    ) -> IVPProblem {
        IVPProblem {
            name: name.to_string(),
            dydx,
            exact,
            x0,
            y0,
            x_end,
            grid,
            asymptote_candidates: Vec::new(),
        }
    }

    /// candidate x-values where the exact solution diverges; NaN candidates are allowed and dropped later
    pub fn with_asymptote_candidates(mut self, candidates: Vec<f64>) -> IVPProblem {
        self.asymptote_candidates = candidates;
        self
    }

    pub fn dydx(&self) -> &dyn Fn(f64, f64) -> f64 {
        self.dydx.as_ref()
    }

    pub fn exact(&self) -> &dyn Fn(f64) -> f64 {
        self.exact.as_ref()
    }

    pub fn reconcile_grid(&self) -> Result<Grid, IVPError> {
        reconcile(self.x0, self.x_end, self.grid)
    }

    /// non-NaN candidates, ascending
    pub fn detected_asymptotes(&self) -> Vec<f64> {
        let mut found: Vec<f64> = self
            .asymptote_candidates
            .iter()
            .copied()
            .filter(|x| !x.is_nan())
            .collect();
        found.sort_by(|a, b| a.total_cmp(b));
        found
    }

    /// detected asymptotes lying inside the integration domain (ends included)
    pub fn asymptotes_in_domain(&self) -> Vec<f64> {
        let lo = self.x0.min(self.x_end);
        let hi = self.x0.max(self.x_end);
        self.detected_asymptotes()
            .into_iter()
            .filter(|x| lo <= *x && *x <= hi)
            .collect()
    }
}
