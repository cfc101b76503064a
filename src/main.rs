#![allow(non_snake_case)]
use RustedStepper::Utils::logger::{default_log_file_name, init_logger};
use RustedStepper::Utils::plots::plot_comparison;
use RustedStepper::numerical::comparison::ComparisonSession;
use RustedStepper::numerical::task_config::IVPTask;
use log::info;
use std::error::Error;
use std::path::{Path, PathBuf};

/// usage: RustedStepper [task_file]
/// without a task file the Bernoulli problem runs on [0, 5.5] with 50 steps
fn main() -> Result<(), Box<dyn Error>> {
    let task_file = std::env::args().nth(1);
    let task = match &task_file {
        Some(path) => IVPTask::from_file(Path::new(path))?,
        None => IVPTask::default(),
    };
    let log_file: Option<PathBuf> = if task.output.log_to_file {
        Some(task.output.dir.join(default_log_file_name()))
    } else {
        None
    };
    if log_file.is_some() {
        std::fs::create_dir_all(&task.output.dir)?;
    }
    init_logger(task.output.loglevel.as_deref(), log_file.as_deref())?;
    match &task_file {
        Some(path) => info!("task loaded from {}: {:?}", path, task),
        None => info!("no task file given, running defaults: {:?}", task),
    }

    let problem = task.build_problem();
    let mut session = ComparisonSession::new();
    let result = session.run(&problem)?;
    result.log_summary();
    println!("{}", result.summary_table());

    if task.output.plot {
        let (values, errors) = plot_comparison(result, &problem, &task.output.dir, None)?;
        println!("plots: {} {}", values.display(), errors.display());
    }
    let (runs, failures) = session.statistics();
    info!("runs: {}, failed: {}", runs, failures);
    Ok(())
}
