/// Comparison task assembled from a parsed task document
///
/// Recognised sections and keys (all optional):
/// ```text
/// problem            name: Bernoulli | ExponentialGrowth | GaussianDecay
/// initial_conditions x0: <f64>  y0: <f64>  x_end: <f64>
/// grid               n_steps: <count>   or   step: <f64>   (exactly one)
/// output             plot: <bool>  dir: <path>  loglevel: <level>  log_to_file: <bool>
/// ```
/// Missing initial conditions fall back to the problem defaults; a missing grid section means
/// 50 steps.
use crate::Utils::task_parser::{
    TaskDocument, Value, parse_task_document, parse_task_file, parse_toml_document,
};
use crate::numerical::IVP_problem::IVPProblem;
use crate::numerical::grid::GridSpec;
use crate::numerical::ivp_error::IVPError;
use crate::numerical::reference_problems::ReferenceProblem;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const DEFAULT_STEPS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct OutputOptions {
    pub plot: bool,
    pub dir: PathBuf,
    pub loglevel: Option<String>,
    pub log_to_file: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        OutputOptions {
            plot: false,
            dir: PathBuf::from("."),
            loglevel: None,
            log_to_file: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IVPTask {
    pub problem: ReferenceProblem,
    pub x0: f64,
    pub y0: f64,
    pub x_end: f64,
    pub grid: GridSpec,
    pub output: OutputOptions,
}

impl Default for IVPTask {
    fn default() -> Self {
        let problem = ReferenceProblem::Bernoulli;
        let (x0, y0, x_end) = problem.defaults();
        IVPTask {
            problem,
            x0,
            y0,
            x_end,
            grid: GridSpec::StepCount(DEFAULT_STEPS),
            output: OutputOptions::default(),
        }
    }
}

fn single<'a>(doc: &'a TaskDocument, section: &str, key: &str) -> Result<Option<&'a Value>, IVPError> {
    let Some(values) = doc.get(section).and_then(|s| s.get(key)) else {
        return Ok(None);
    };
    match values.as_slice() {
        [value] => Ok(Some(value)),
        _ => Err(IVPError::Config(format!(
            "{}.{} expects exactly one value, got {}",
            section,
            key,
            values.len()
        ))),
    }
}

fn number(doc: &TaskDocument, section: &str, key: &str) -> Result<Option<f64>, IVPError> {
    match single(doc, section, key)? {
        None => Ok(None),
        Some(value) => value.as_f64().map(Some).ok_or_else(|| {
            IVPError::Config(format!("{}.{} must be a number, got '{}'", section, key, value))
        }),
    }
}

fn flag(doc: &TaskDocument, section: &str, key: &str) -> Result<Option<bool>, IVPError> {
    match single(doc, section, key)? {
        None => Ok(None),
        Some(value) => value.as_bool().map(Some).ok_or_else(|| {
            IVPError::Config(format!("{}.{} must be true or false, got '{}'", section, key, value))
        }),
    }
}

fn text(doc: &TaskDocument, section: &str, key: &str) -> Result<Option<String>, IVPError> {
    Ok(single(doc, section, key)?.map(|v| v.to_string()))
}

impl IVPTask {
    pub fn from_document(doc: &TaskDocument) -> Result<IVPTask, IVPError> {
        let problem = match text(doc, "problem", "name")? {
            Some(name) => ReferenceProblem::from_str(&name)
                .map_err(|_| IVPError::Config(format!("unknown problem '{}'", name)))?,
            None => ReferenceProblem::Bernoulli,
        };
        let (x0_default, y0_default, x_end_default) = problem.defaults();
        let x0 = number(doc, "initial_conditions", "x0")?.unwrap_or(x0_default);
        let y0 = number(doc, "initial_conditions", "y0")?.unwrap_or(y0_default);
        let x_end = number(doc, "initial_conditions", "x_end")?.unwrap_or(x_end_default);

        let n_steps = number(doc, "grid", "n_steps")?;
        let step = number(doc, "grid", "step")?;
        let grid = if n_steps.is_none() && step.is_none() {
            GridSpec::StepCount(DEFAULT_STEPS)
        } else {
            GridSpec::from_options(n_steps, step)?
        };

        let defaults = OutputOptions::default();
        let output = OutputOptions {
            plot: flag(doc, "output", "plot")?.unwrap_or(defaults.plot),
            dir: text(doc, "output", "dir")?
                .map(PathBuf::from)
                .unwrap_or(defaults.dir),
            loglevel: text(doc, "output", "loglevel")?,
            log_to_file: flag(doc, "output", "log_to_file")?.unwrap_or(defaults.log_to_file),
        };
        Ok(IVPTask {
            problem,
            x0,
            y0,
            x_end,
            grid,
            output,
        })
    }

    /// section format, or TOML when the text contains a `[section]` header line
    pub fn from_str_auto(input: &str) -> Result<IVPTask, IVPError> {
        let is_toml = input
            .lines()
            .any(|line| line.trim_start().starts_with('[') && line.trim_end().ends_with(']'));
        let parsed = if is_toml {
            parse_toml_document(input)
        } else {
            parse_task_document(input)
        };
        let doc = parsed.map_err(IVPError::Config)?;
        IVPTask::from_document(&doc)
    }

    pub fn from_file(path: &Path) -> Result<IVPTask, IVPError> {
        let doc = parse_task_file(path).map_err(IVPError::Config)?;
        IVPTask::from_document(&doc)
    }

    pub fn build_problem(&self) -> IVPProblem {
        self.problem.setup(self.x0, self.y0, self.x_end, self.grid)
    }
}
