//! PNG charts of a comparison run: the three approximations with the exact solution, and the
//! pointwise absolute errors, on a shared x range. Vertical asymptotes inside the domain are
//! drawn as labelled vertical lines.
use crate::numerical::IVP_problem::IVPProblem;
use crate::numerical::comparison::ComparisonResult;
use crate::numerical::fixed_step::FixedStepMethod;
use crate::numerical::ivp_error::IVPError;
use crate::numerical::trajectory::Trajectory;
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct PlotLayout {
    pub x_range: (f64, f64),
    pub value_y_range: (f64, f64),
    pub error_y_range: (f64, f64),
    pub size: (u32, u32),
}

impl PlotLayout {
    pub fn for_result(result: &ComparisonResult, problem: &IVPProblem) -> PlotLayout {
        PlotLayout {
            x_range: x_axis_range(
                problem.x0,
                problem.x_end,
                result.grid.h,
                &problem.detected_asymptotes(),
            ),
            value_y_range: (-12.0, 20.0),
            error_y_range: (-5.0, 20.0),
            size: (1000, 600),
        }
    }
}

/// domain widened to every detected asymptote, then padded by min(0.5, |h|) on both sides
pub fn x_axis_range(x_start: f64, x_end: f64, h: f64, asymptotes: &[f64]) -> (f64, f64) {
    let pad = 0.5_f64.min(h.abs());
    let finite = asymptotes.iter().copied().filter(|a| a.is_finite());
    let lo = finite.clone().fold(x_start.min(x_end), f64::min);
    let hi = finite.fold(x_start.max(x_end), f64::max);
    (lo - pad, hi + pad)
}

/// Splits a trajectory into runs of consecutive samples that are finite and inside `y_range`,
/// so lines are not drawn across a pole.
pub fn visible_segments(trajectory: &Trajectory, y_range: (f64, f64)) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    for (x, y) in trajectory.iter() {
        if x.is_finite() && y.is_finite() && y >= y_range.0 && y <= y_range.1 {
            current.push((x, y));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn method_color(method: FixedStepMethod) -> RGBColor {
    match method {
        FixedStepMethod::Euler => BLUE,
        FixedStepMethod::ImprovedEuler => MAGENTA,
        FixedStepMethod::RungeKutta4 => RED,
    }
}

type DrawResult = Result<(), Box<dyn Error>>;

fn draw_markers<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<plotters::coord::types::RangedCoordf64, plotters::coord::types::RangedCoordf64>>,
    method: Option<FixedStepMethod>,
    points: &[(f64, f64)],
) -> DrawResult
where
    DB::ErrorType: 'static,
{
    match method {
        Some(FixedStepMethod::Euler) => {
            let color = method_color(FixedStepMethod::Euler);
            chart.draw_series(points.iter().map(|&p| Cross::new(p, 4, color)))?;
        }
        Some(FixedStepMethod::ImprovedEuler) => {
            let color = method_color(FixedStepMethod::ImprovedEuler);
            chart.draw_series(points.iter().map(|&p| {
                EmptyElement::at(p) + Rectangle::new([(-3, -3), (3, 3)], color.stroke_width(1))
            }))?;
        }
        Some(FixedStepMethod::RungeKutta4) => {
            let color = method_color(FixedStepMethod::RungeKutta4);
            chart.draw_series(points.iter().map(|&p| Circle::new(p, 3, color.filled())))?;
        }
        None => {
            chart.draw_series(points.iter().map(|&p| TriangleMarker::new(p, 3, GREEN.mix(0.7))))?;
        }
    }
    Ok(())
}

fn draw_values<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    result: &ComparisonResult,
    problem: &IVPProblem,
    layout: &PlotLayout,
) -> DrawResult
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let (x_lo, x_hi) = layout.x_range;
    let (y_lo, y_hi) = layout.value_y_range;
    let mut chart = ChartBuilder::on(root)
        .caption(
            "Approximate Solutions at various x using Numerical Methods",
            ("sans-serif", 28),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;
    chart.configure_mesh().x_desc("X-axis").y_desc("Y-axis").draw()?;

    for m in &result.methods {
        let color = method_color(m.method);
        let segments = visible_segments(&m.trajectory, layout.value_y_range);
        for (i, segment) in segments.iter().enumerate() {
            let series = chart.draw_series(LineSeries::new(segment.clone(), color))?;
            if i == 0 {
                series
                    .label(format!("{} Approximations", m.method))
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            }
            draw_markers(&mut chart, Some(m.method), segment)?;
        }
    }
    for (i, segment) in visible_segments(&result.exact, layout.value_y_range)
        .iter()
        .enumerate()
    {
        let series = chart.draw_series(LineSeries::new(segment.clone(), GREEN))?;
        if i == 0 {
            series
                .label("Exact Solutions")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));
        }
        draw_markers(&mut chart, None, segment)?;
    }
    for a in problem.asymptotes_in_domain() {
        chart
            .draw_series(LineSeries::new(
                vec![(a, y_lo), (a, y_hi)],
                BLACK.stroke_width(1),
            ))?
            .label(format!("Vertical Asymptote at x = {:.4}", a))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));
    }
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

fn draw_errors<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    result: &ComparisonResult,
    layout: &PlotLayout,
) -> DrawResult
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let (x_lo, x_hi) = layout.x_range;
    let (y_lo, y_hi) = layout.error_y_range;
    let mut chart = ChartBuilder::on(root)
        .caption(
            "Approximation Error at various x using Numerical Methods",
            ("sans-serif", 28),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;
    chart
        .configure_mesh()
        .x_desc("x values")
        .y_desc("(Global) Absolute Error")
        .draw()?;
    for m in &result.methods {
        let color = method_color(m.method);
        let points: Vec<(f64, f64)> = visible_segments(&m.abs_error, layout.error_y_range)
            .into_iter()
            .flatten()
            .collect();
        draw_markers(&mut chart, Some(m.method), &points)?;
        // invisible anchor carrying the legend entry
        chart
            .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())?
            .label(format!("{} Approximation Error", m.method))
            .legend(move |(x, y)| Circle::new((x + 10, y), 3, color.filled()));
    }
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Writes `<name>_solutions.png` and `<name>_errors.png` into `dir` (created if missing).
pub fn plot_comparison(
    result: &ComparisonResult,
    problem: &IVPProblem,
    dir: &Path,
    layout: Option<PlotLayout>,
) -> Result<(PathBuf, PathBuf), IVPError> {
    let layout = layout.unwrap_or_else(|| PlotLayout::for_result(result, problem));
    fs::create_dir_all(dir)
        .map_err(|e| IVPError::Plot(format!("cannot create {}: {}", dir.display(), e)))?;
    let values_path = dir.join(format!("{}_solutions.png", result.problem_name));
    let errors_path = dir.join(format!("{}_errors.png", result.problem_name));

    // each backend borrows its path until dropped at the end of its block
    {
        let root = BitMapBackend::new(&values_path, layout.size).into_drawing_area();
        draw_values(&root, result, problem, &layout)
            .map_err(|e| IVPError::Plot(e.to_string()))?;
    }
    {
        let root = BitMapBackend::new(&errors_path, layout.size).into_drawing_area();
        draw_errors(&root, result, &layout).map_err(|e| IVPError::Plot(e.to_string()))?;
    }

    info!(
        "result plotted to {} and {}",
        values_path.display(),
        errors_path.display()
    );
    Ok((values_path, errors_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::comparison::compare_methods;
    use crate::numerical::grid::GridSpec;
    use crate::numerical::reference_problems::ReferenceProblem;
    use approx::assert_relative_eq;

    #[test]
    fn test_x_range_without_asymptotes() {
        let (lo, hi) = x_axis_range(0.0, 5.5, 0.1, &[]);
        assert_relative_eq!(lo, -0.1, epsilon = 1e-12);
        assert_relative_eq!(hi, 5.6, epsilon = 1e-12);
        // padding is capped at 0.5
        let (lo, hi) = x_axis_range(0.0, 5.5, 1.1, &[]);
        assert_relative_eq!(lo, -0.5, epsilon = 1e-12);
        assert_relative_eq!(hi, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_x_range_widened_by_asymptotes() {
        let (lo, hi) = x_axis_range(0.0, 1.0, 0.25, &[-2.0, 3.0, f64::NAN]);
        assert_relative_eq!(lo, -2.25, epsilon = 1e-12);
        assert_relative_eq!(hi, 3.25, epsilon = 1e-12);
        // backward domain and negative step
        let (lo, hi) = x_axis_range(1.0, 0.0, -0.25, &[]);
        assert_relative_eq!(lo, -0.25, epsilon = 1e-12);
        assert_relative_eq!(hi, 1.25, epsilon = 1e-12);
    }

    #[test]
    fn test_layout_for_bernoulli() {
        let problem = ReferenceProblem::Bernoulli.setup_default(GridSpec::StepSize(0.1));
        let result = compare_methods(&problem).unwrap();
        let layout = PlotLayout::for_result(&result, &problem);
        let a = (2.0_f64.ln() / 1.5).sqrt();
        assert_relative_eq!(layout.x_range.0, -a - 0.1, epsilon = 1e-12);
        assert_relative_eq!(layout.x_range.1, 5.6, epsilon = 1e-12);
        assert_eq!(layout.value_y_range, (-12.0, 20.0));
    }

    #[test]
    fn test_plot_bernoulli_writes_both_charts() {
        let problem = ReferenceProblem::Bernoulli.setup_default(GridSpec::StepSize(0.1));
        assert_eq!(problem.asymptotes_in_domain().len(), 1);
        let result = compare_methods(&problem).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("charts");
        let (values, errors) = plot_comparison(&result, &problem, &out, None).unwrap();
        assert_eq!(values, out.join("Bernoulli_solutions.png"));
        assert_eq!(errors, out.join("Bernoulli_errors.png"));
        for path in [&values, &errors] {
            let meta = std::fs::metadata(path).unwrap();
            assert!(meta.len() > 0);
        }
    }

    #[test]
    fn test_visible_segments_split_at_pole() {
        let t = Trajectory::new(
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            vec![1.0, 2.0, 1e9, f64::INFINITY, -3.0, -4.0],
        )
        .unwrap();
        let segments = visible_segments(&t, (-12.0, 20.0));
        assert_eq!(
            segments,
            vec![vec![(0.0, 1.0), (1.0, 2.0)], vec![(4.0, -3.0), (5.0, -4.0)]]
        );
        let none = visible_segments(&t, (100.0, 200.0));
        assert!(none.is_empty());
    }
}
