//! Built-in chart kinds, drawn as SVG with plotters

use plotters::coord::Shift;
use plotters::prelude::*;

use super::series::{best_value, solver_series, solver_times, Series, EPS};
use super::{ChartError, ChartResult, Figure};
use crate::grouping::Group;

const SIZE: (u32, u32) = (800, 500);
const CAPTION_FONT_SIZE: u32 = 22;
const LABEL_FONT_SIZE: u32 = 15;
const HISTOGRAM_BINS: usize = 20;

fn draw_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Draw(e.to_string())
}

fn color(idx: usize) -> RGBAColor {
    Palette99::pick(idx).to_rgba()
}

fn caption(group: &Group<'_>, what: &str) -> String {
    format!("{what}: {} / {}", group.dataset, group.objective)
}

/// Widen a degenerate range so plotters can build an axis from it
fn span(lo: f64, hi: f64) -> (f64, f64) {
    if (hi - lo).abs() < f64::EPSILON {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
        (lo - pad, hi + pad)
    } else {
        (lo, hi)
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Render into an SVG string and wrap it as a figure
fn render<F>(draw: F) -> ChartResult<Figure>
where
    F: FnOnce(&DrawingArea<SVGBackend<'_>, Shift>) -> ChartResult<()>,
{
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;
        draw(&root)?;
        root.present().map_err(draw_err)?;
    }
    Ok(Figure::from_svg(svg))
}

/// Line per solver of `(time, y)`; `log_y` requires strictly positive y
fn curves(title: &str, y_desc: &str, series: &[Series], log_y: bool) -> ChartResult<Figure> {
    let (x_lo, x_hi) = bounds(series.iter().flat_map(|s| s.points.iter().map(|p| p.0)))
        .ok_or(ChartError::NoData)?;
    let (y_lo, y_hi) = bounds(series.iter().flat_map(|s| s.points.iter().map(|p| p.1)))
        .ok_or(ChartError::NoData)?;
    let (x_lo, x_hi) = span(x_lo, x_hi);

    render(|root| {
        let mut builder = ChartBuilder::on(root);
        builder
            .caption(title, ("sans-serif", CAPTION_FONT_SIZE))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70);

        macro_rules! draw_lines {
            ($chart:expr) => {{
                let mut chart = $chart;
                chart
                    .configure_mesh()
                    .x_desc("Time (s)")
                    .y_desc(y_desc)
                    .label_style(("sans-serif", LABEL_FONT_SIZE))
                    .draw()
                    .map_err(draw_err)?;
                for (idx, s) in series.iter().enumerate() {
                    let c = color(idx);
                    chart
                        .draw_series(LineSeries::new(s.points.iter().copied(), c.stroke_width(2)))
                        .map_err(draw_err)?
                        .label(s.solver.as_str())
                        .legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], c.stroke_width(2))
                        });
                }
                chart
                    .configure_series_labels()
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK)
                    .draw()
                    .map_err(draw_err)?;
            }};
        }

        if log_y {
            let (y_lo, y_hi) = (y_lo.max(EPS), y_hi.max(EPS) * 10.0);
            draw_lines!(builder
                .build_cartesian_2d(x_lo..x_hi, (y_lo..y_hi).log_scale())
                .map_err(draw_err)?);
        } else {
            let (y_lo, y_hi) = span(y_lo, y_hi);
            draw_lines!(builder
                .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
                .map_err(draw_err)?);
        }
        Ok(())
    })
}

/// Objective value against time, one line per solver
pub fn objective_curve(group: &Group<'_>) -> ChartResult<Figure> {
    let series = solver_series(group)?;
    curves(&caption(group, "Objective"), "Objective value", &series, false)
}

/// `f - f* + eps` against time on a log scale
pub fn suboptimality_curve(group: &Group<'_>) -> ChartResult<Figure> {
    let mut series = solver_series(group)?;
    let best = best_value(&series).ok_or(ChartError::NoData)?;
    for s in &mut series {
        for p in &mut s.points {
            p.1 = p.1 - best + EPS;
        }
    }
    curves(&caption(group, "Suboptimality"), "F(x) - F(x*)", &series, true)
}

/// `(f - f*) / (f0 - f*)` against time on a log scale, `f0` the worst initial value
pub fn relative_suboptimality_curve(group: &Group<'_>) -> ChartResult<Figure> {
    let mut series = solver_series(group)?;
    let best = best_value(&series).ok_or(ChartError::NoData)?;
    let initial = series
        .iter()
        .filter_map(Series::initial_value)
        .fold(best, f64::max);
    let scale = if initial - best > 0.0 { initial - best } else { 1.0 };
    for s in &mut series {
        for p in &mut s.points {
            p.1 = (p.1 - best) / scale + EPS;
        }
    }
    curves(
        &caption(group, "Relative suboptimality"),
        "(F(x) - F(x*)) / (F(x0) - F(x*))",
        &series,
        true,
    )
}

/// Median time for each solver to reach its final objective value
pub fn bar_chart(group: &Group<'_>) -> ChartResult<Figure> {
    let series = solver_series(group)?;
    let bars: Vec<(String, f64)> = series
        .iter()
        .filter_map(|s| s.final_time().map(|t| (s.solver.clone(), t)))
        .collect();
    let top = bars
        .iter()
        .map(|b| b.1)
        .fold(0.0_f64, f64::max)
        .max(f64::EPSILON)
        * 1.1;
    let n = bars.len();
    let title = caption(group, "Time to final objective");

    render(|root| {
        let mut chart = ChartBuilder::on(root)
            .caption(title.as_str(), ("sans-serif", CAPTION_FONT_SIZE))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..top)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n.max(1))
            .x_label_formatter(&|x| {
                let idx = x.round();
                if idx >= 0.0 && (x - idx).abs() < 0.3 {
                    bars.get(idx as usize)
                        .map(|b| b.0.clone())
                        .unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .y_desc("Time (s)")
            .label_style(("sans-serif", LABEL_FONT_SIZE))
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(bars.iter().enumerate().map(|(idx, (_, time))| {
                let x = idx as f64;
                Rectangle::new([(x - 0.35, 0.0), (x + 0.35, *time)], color(idx).filled())
            }))
            .map_err(draw_err)?;
        Ok(())
    })
}

/// Distribution of measured times, one translucent histogram per solver
pub fn histogram(group: &Group<'_>) -> ChartResult<Figure> {
    let solvers = solver_times(group)?;
    let (lo, hi) = bounds(solvers.iter().flat_map(|s| s.1.iter().copied()))
        .ok_or(ChartError::NoData)?;
    let (lo, hi) = span(lo, hi);
    let width = (hi - lo) / HISTOGRAM_BINS as f64;

    let counts: Vec<(String, Vec<usize>)> = solvers
        .iter()
        .map(|(solver, times)| {
            let mut bins = vec![0usize; HISTOGRAM_BINS];
            for t in times.iter().filter(|t| t.is_finite()) {
                let idx = (((t - lo) / width) as usize).min(HISTOGRAM_BINS - 1);
                bins[idx] += 1;
            }
            (solver.clone(), bins)
        })
        .collect();
    let top = counts
        .iter()
        .flat_map(|c| c.1.iter().copied())
        .max()
        .unwrap_or(1)
        .max(1) as f64
        * 1.1;
    let title = caption(group, "Time distribution");

    render(|root| {
        let mut chart = ChartBuilder::on(root)
            .caption(title.as_str(), ("sans-serif", CAPTION_FONT_SIZE))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(lo..hi, 0.0..top)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc("Time (s)")
            .y_desc("Runs")
            .label_style(("sans-serif", LABEL_FONT_SIZE))
            .draw()
            .map_err(draw_err)?;

        for (idx, (solver, bins)) in counts.iter().enumerate() {
            let c = color(idx);
            chart
                .draw_series(bins.iter().enumerate().filter(|b| *b.1 > 0).map(|(i, n)| {
                    let x0 = lo + i as f64 * width;
                    Rectangle::new([(x0, 0.0), (x0 + width, *n as f64)], c.mix(0.5).filled())
                }))
                .map_err(draw_err)?
                .label(solver.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], c.filled()));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(draw_err)?;
        Ok(())
    })
}
