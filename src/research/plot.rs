//! Convergence plots.
use std::path::Path;

use plotters::prelude::*;

use crate::error::{FwError, Result};

const CANVAS: (u32, u32) = (960, 640);
const FLOOR: f64 = 1e-12;

/// A named sequence of objective values `f(x₀), f(x₁), ...`.
#[derive(Debug, Clone)]
pub struct Curve {
    pub label: String,
    pub values: Vec<f64>,
}

impl Curve {
    pub fn new<S: Into<String>>(label: S, values: Vec<f64>) -> Self {
        Self { label: label.into(), values, }
    }
}

/// How the y-axis is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// `f(xₖ)` itself.
    Objective,
    /// `f(xₖ) - f*` where `f*` is the smallest value over all curves.
    Suboptimality,
}

/// Draws `curves` as an SVG line chart with a log-scale y-axis.
pub fn loss_curves<P: AsRef<Path>>(
    path: P,
    title: &str,
    curves: &[Curve],
    scale: Scale,
) -> Result<()>
{
    if curves.iter().all(|c| c.values.is_empty()) {
        return Err(FwError::Plot("nothing to plot".into()));
    }

    let curves = transform(curves, scale);
    let n_iter = curves.iter()
        .map(|c| c.values.len())
        .max()
        .unwrap_or(1);
    let (y_min, y_max) = y_range(&curves);

    let root = SVGBackend::new(path.as_ref(), CANVAS)
        .into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let y_desc = match scale {
        Scale::Objective => "f(x)",
        Scale::Suboptimality => "f(x) - f*",
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0..n_iter, (y_min..y_max).log_scale())
        .map_err(plot_error)?;

    chart.configure_mesh()
        .x_desc("Iteration")
        .y_desc(y_desc)
        .draw()
        .map_err(plot_error)?;

    for (i, curve) in curves.iter().enumerate() {
        let style = Palette99::pick(i).to_rgba().stroke_width(2);
        let points = curve.values.iter()
            .copied()
            .enumerate()
            .filter(|(_, y)| y.is_finite());
        chart.draw_series(LineSeries::new(points, style))
            .map_err(plot_error)?
            .label(curve.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], style)
            });
    }

    chart.configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    Ok(())
}

/// Shifts the values for `Scale::Suboptimality`
/// and clamps everything to a positive floor for the log axis.
fn transform(curves: &[Curve], scale: Scale) -> Vec<Curve> {
    let shift = match scale {
        Scale::Objective => 0f64,
        Scale::Suboptimality => curves.iter()
            .flat_map(|c| c.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold(f64::INFINITY, f64::min),
    };
    curves.iter()
        .map(|c| {
            let values = c.values.iter()
                .map(|v| (v - shift).max(FLOOR))
                .collect();
            Curve::new(c.label.clone(), values)
        })
        .collect()
}

fn y_range(curves: &[Curve]) -> (f64, f64) {
    let (lo, hi) = curves.iter()
        .flat_map(|c| c.values.iter().copied())
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return (FLOOR, 1f64);
    }
    let hi = if hi > lo { hi } else { lo * 10f64 };
    (lo, hi * 1.1)
}

fn plot_error<E: std::fmt::Display>(error: E) -> FwError {
    FwError::Plot(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suboptimality_is_shifted_and_positive() {
        let curves = vec![
            Curve::new("a", vec![3.0, 2.0, 1.5]),
            Curve::new("b", vec![3.0, 1.0, 1.0]),
        ];
        let shifted = transform(&curves, Scale::Suboptimality);
        assert_eq!(shifted[0].values, vec![2.0, 1.0, 0.5]);
        assert_eq!(shifted[1].values, vec![2.0, FLOOR, FLOOR]);

        let (lo, hi) = y_range(&shifted);
        assert_eq!(lo, FLOOR);
        assert!(hi > 2.0);
    }

    #[test]
    fn flat_curve_gets_a_nonempty_range() {
        let curves = vec![Curve::new("flat", vec![0.5, 0.5])];
        let (lo, hi) = y_range(&transform(&curves, Scale::Objective));
        assert!(lo < hi);
    }

    #[test]
    fn empty_curves_are_rejected() {
        let dir = std::env::temp_dir().join("hbfw-empty-plot.svg");
        let res = loss_curves(&dir, "empty", &[Curve::new("x", vec![])], Scale::Objective);
        assert!(res.is_err());
    }
}
