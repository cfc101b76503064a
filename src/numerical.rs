//! Fixed-step integrators for scalar initial value problems and the machinery to compare them
//! against a closed-form solution.
/// Example#1
/// ```
/// use RustedStepper::numerical::comparison::compare_methods;
/// use RustedStepper::numerical::fixed_step::FixedStepMethod;
/// use RustedStepper::numerical::grid::GridSpec;
/// use RustedStepper::numerical::reference_problems::ReferenceProblem;
/// // y' = 3xy + xy^2, y(0) = 3 on [0, 5.5] with h = 0.1
/// let problem = ReferenceProblem::Bernoulli.setup_default(GridSpec::StepSize(0.1));
/// let result = compare_methods(&problem).unwrap();
/// assert_eq!(result.grid.n, 55);
/// let rk = result.get(FixedStepMethod::RungeKutta4).unwrap();
/// println!("{}", result.summary_table());
/// println!("RK4 error at x_end = {}", rk.abs_error.last().1);
/// ```
/// Example#2
/// ```
/// // single stepper on a user-defined right-hand side
/// use RustedStepper::numerical::fixed_step::runge_kutta4;
/// let f = |x: f64, y: f64| -> f64 { x * y };
/// let trajectory = runge_kutta4(&f, 0.0, 1.0, 0.1, 10).unwrap();
/// assert_eq!(trajectory.len(), 11);
/// assert!((trajectory.last().1 - 0.5_f64.exp()).abs() < 1e-4);
/// ```
pub mod fixed_step;
/// index-aligned (x, y) samples
pub mod trajectory;
/// step count / step size reconciliation
pub mod grid;
/// pointwise absolute error between an approximation and the exact samples
pub mod abs_error;
pub mod ivp_error;
/// problem definition: right-hand side, exact solution, domain and grid
pub mod IVP_problem;
/// built-in problems with known closed-form solutions
pub mod reference_problems;
/// runs all schemes on one problem and keeps the last good result
pub mod comparison;
/// building a comparison task from a task document or a TOML file
pub mod task_config;
