//! One comparison run: reconcile the grid, march the three approximate schemes and the exact
//! evaluator over the same (x0, y0, h, n), then score each scheme against the exact samples.
//!
//! A run is all-or-nothing: the first error aborts it and nothing partial is returned.
//! `ComparisonSession` keeps the last successful run, a failed run leaves it in place.
//! ```rust, ignore
//! use RustedStepper::numerical::comparison::ComparisonSession;
//! use RustedStepper::numerical::reference_problems::ReferenceProblem;
//! use RustedStepper::numerical::grid::GridSpec;
//! let problem = ReferenceProblem::Bernoulli.setup_default(GridSpec::StepSize(0.1));
//! let mut session = ComparisonSession::new();
//! let result = session.run(&problem).unwrap();
//! println!("{}", result.summary_table());
//! ```
use crate::numerical::IVP_problem::IVPProblem;
use crate::numerical::abs_error::{absolute_error, max_abs_error};
use crate::numerical::fixed_step::{FixedStepMethod, exact_solution, initial_mismatch};
use crate::numerical::grid::Grid;
use crate::numerical::ivp_error::IVPError;
use crate::numerical::trajectory::Trajectory;
use log::{debug, error, info, warn};
use std::time::{Duration, Instant};
use strum::IntoEnumIterator;
use tabled::{builder::Builder, settings::Style};

const INITIAL_MISMATCH_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct MethodResult {
    pub method: FixedStepMethod,
    pub trajectory: Trajectory,
    pub abs_error: Trajectory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub problem_name: String,
    pub grid: Grid,
    pub exact: Trajectory,
    pub methods: Vec<MethodResult>,
}

impl ComparisonResult {
    pub fn get(&self, method: FixedStepMethod) -> Option<&MethodResult> {
        self.methods.iter().find(|m| m.method == method)
    }

    /// one row per scheme: order, value at x_end, error at x_end, largest finite error
    pub fn summary_table(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(vec![
            "method".to_string(),
            "order".to_string(),
            "x_end".to_string(),
            "y(x_end)".to_string(),
            "|error| at x_end".to_string(),
            "max |error| (at x)".to_string(),
        ]);
        for m in &self.methods {
            let (x_last, y_last) = m.trajectory.last();
            let (_, e_last) = m.abs_error.last();
            let max_err = match max_abs_error(&m.abs_error) {
                Some((x, e)) => format!("{:.6e} ({:.4})", e, x),
                None => "-".to_string(),
            };
            builder.push_record(vec![
                m.method.to_string(),
                m.method.order().to_string(),
                format!("{:.4}", x_last),
                format!("{:.6e}", y_last),
                format!("{:.6e}", e_last),
                max_err,
            ]);
        }
        let (x_last, y_last) = self.exact.last();
        builder.push_record(vec![
            "Exact".to_string(),
            "-".to_string(),
            format!("{:.4}", x_last),
            format!("{:.6e}", y_last),
            "-".to_string(),
            "-".to_string(),
        ]);
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.to_string()
    }

    pub fn log_summary(&self) {
        info!(
            "\n \n {}: h = {}, n = {} \n{}",
            self.problem_name,
            self.grid.h,
            self.grid.n,
            self.summary_table()
        );
    }
}

/// run every scheme against the exact solution of `problem`
pub fn compare_methods(problem: &IVPProblem) -> Result<ComparisonResult, IVPError> {
    let start = Instant::now();
    info!("comparing fixed-step methods on {}", problem);
    let grid = problem.reconcile_grid()?;
    let (x0, y0, h, n) = (problem.x0, problem.y0, grid.h, grid.n);

    let mismatch = initial_mismatch(&problem.exact(), x0, y0);
    if !(mismatch <= INITIAL_MISMATCH_TOLERANCE * y0.abs().max(1.0)) {
        warn!(
            "exact solution at x0 = {} differs from y0 = {} by {}; the exact trajectory starts from y0 anyway",
            x0, y0, mismatch
        );
    }

    let exact = exact_solution(&problem.exact(), x0, y0, h, n)?;
    let mut methods = Vec::new();
    for method in FixedStepMethod::iter() {
        let trajectory = method.integrate(&problem.dydx(), x0, y0, h, n)?;
        let abs_error = absolute_error(&trajectory, &exact)?;
        let diverged = trajectory.y().iter().filter(|y| !y.is_finite()).count();
        if diverged > 0 {
            warn!("{}: {} non-finite samples", method, diverged);
        }
        debug!("{} finished, y(x_end) = {}", method, trajectory.last().1);
        methods.push(MethodResult {
            method,
            trajectory,
            abs_error,
        });
    }
    let (unit, amount) = elapsed_time(start.elapsed());
    info!("comparison finished in {}{}", amount, unit);
    Ok(ComparisonResult {
        problem_name: problem.name.clone(),
        grid,
        exact,
        methods,
    })
}

/// (unit, amount) in the coarsest unit that keeps the amount above one
pub fn elapsed_time(elapsed: Duration) -> (String, f64) {
    let time = elapsed.as_millis();
    if time < 1000 {
        (" ms".to_string(), time as f64)
    } else if time < 60_000 {
        (" s".to_string(), elapsed.as_secs_f64())
    } else if time < 3_600_000 {
        (" min".to_string(), elapsed.as_secs_f64() / 60.0)
    } else {
        (" h".to_string(), elapsed.as_secs_f64() / 3600.0)
    }
}

/// holds the last successful run; a failing run never replaces it
#[derive(Debug, Default)]
pub struct ComparisonSession {
    last: Option<ComparisonResult>,
    runs: usize,
    failures: usize,
}

impl ComparisonSession {
    pub fn new() -> ComparisonSession {
        ComparisonSession::default()
    }

    pub fn run(&mut self, problem: &IVPProblem) -> Result<&ComparisonResult, IVPError> {
        self.runs += 1;
        match compare_methods(problem) {
            Ok(result) => Ok(self.last.insert(result)),
            Err(e) => {
                self.failures += 1;
                error!("run {} failed: {}; keeping the previous result", self.runs, e);
                Err(e)
            }
        }
    }

    pub fn get_result(&self) -> Option<&ComparisonResult> {
        self.last.as_ref()
    }

    /// (runs, failed runs)
    pub fn statistics(&self) -> (usize, usize) {
        (self.runs, self.failures)
    }
}
