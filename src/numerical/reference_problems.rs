/// a collection of scalar IVPs with known exact solutions for comparing fixed-step schemes
use crate::numerical::IVP_problem::IVPProblem;
use crate::numerical::grid::GridSpec;
use strum_macros::{Display, EnumIter, EnumString};

/*
Bernoulli equation:
 dy/dx = 3xy + xy^2
 substitution u = 1/y gives u' = -3xu - x, so
 y(x) = 3/(exp(C - 1.5x^2) - 1),   C = ln(1 + 3/y0) + 1.5*x0^2
 the solution diverges where exp(C - 1.5x^2) = 1, i.e. x = ±sqrt(C/1.5) (none when C < 0)

Exponential growth:
 dy/dx = y,  y(x) = y0*exp(x - x0)

Gaussian decay:
 dy/dx = -2xy,  y(x) = y0*exp(x0^2 - x^2)
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display)]
pub enum ReferenceProblem {
    #[strum(to_string = "Bernoulli", serialize = "bernoulli")]
    Bernoulli,
    #[strum(to_string = "ExponentialGrowth", serialize = "exponential_growth")]
    ExponentialGrowth,
    #[strum(to_string = "GaussianDecay", serialize = "gaussian_decay")]
    GaussianDecay,
}

/// integration constant of the Bernoulli problem fixed by (x0, y0)
pub fn bernoulli_constant(x0: f64, y0: f64) -> f64 {
    (1.0 + 3.0 / y0).ln() + 1.5 * x0 * x0
}

/// ±sqrt(C/1.5); both are NaN for C < 0
pub fn bernoulli_asymptote_candidates(c: f64) -> Vec<f64> {
    let a = (c / 1.5).sqrt();
    vec![-a, a]
}

impl ReferenceProblem {
    /// (x0, y0, x_end) used when the task leaves them out
    pub fn defaults(&self) -> (f64, f64, f64) {
        match self {
            ReferenceProblem::Bernoulli => (0.0, 3.0, 5.5),
            ReferenceProblem::ExponentialGrowth => (0.0, 1.0, 1.0),
            ReferenceProblem::GaussianDecay => (0.0, 1.0, 2.0),
        }
    }

    pub fn setup(&self, x0: f64, y0: f64, x_end: f64, grid: GridSpec) -> IVPProblem {
        let name = self.to_string();
        match self {
            ReferenceProblem::Bernoulli => {
                let c = bernoulli_constant(x0, y0);
                IVPProblem::new(
                    &name,
                    Box::new(|x: f64, y: f64| 3.0 * x * y + x * y * y),
                    Box::new(move |x: f64| 3.0 / ((-1.5 * x * x + c).exp() - 1.0)),
                    x0,
                    y0,
                    x_end,
                    grid,
                )
                .with_asymptote_candidates(bernoulli_asymptote_candidates(c))
            }
            ReferenceProblem::ExponentialGrowth => IVPProblem::new(
                &name,
                Box::new(|_x: f64, y: f64| y),
                Box::new(move |x: f64| y0 * (x - x0).exp()),
                x0,
                y0,
                x_end,
                grid,
            ),
            ReferenceProblem::GaussianDecay => IVPProblem::new(
                &name,
                Box::new(|x: f64, y: f64| -2.0 * x * y),
                Box::new(move |x: f64| y0 * (x0 * x0 - x * x).exp()),
                x0,
                y0,
                x_end,
                grid,
            ),
        }
    }

    pub fn setup_default(&self, grid: GridSpec) -> IVPProblem {
        let (x0, y0, x_end) = self.defaults();
        self.setup(x0, y0, x_end, grid)
    }
}
