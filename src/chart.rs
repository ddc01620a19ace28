use crate::dataset::ColumnSeries;
use crate::regression::LinearFit;
use plotters::element::ErrorBar;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

const BACKGROUND: RGBColor = RGBColor(18, 18, 18);
const POINT_COLOR: RGBColor = RGBColor(255, 87, 51);
const LINE_COLOR: RGBColor = RGBColor(30, 144, 255);
const POINT_SIZE: i32 = 5;
const ERROR_BAR_WIDTH: u32 = 6;

fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in values {
        min = min.min(value);
        max = max.max(value);
    }
    if min == max {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

fn error_or_zero(errors: &[Option<f64>], idx: usize) -> f64 {
    errors.get(idx).copied().flatten().unwrap_or(0.0)
}

/// Draws the sample points, their error bars where present, and the
/// fitted line to a PNG file on a dark layout.
pub fn render_fit_chart<P: AsRef<Path>>(
    x: &ColumnSeries,
    y: &ColumnSeries,
    fit: &LinearFit,
    path: P,
) -> Result<(), Box<dyn Error>> {
    let points: Vec<(f64, f64)> = x
        .values
        .iter()
        .copied()
        .zip(y.values.iter().copied())
        .collect();

    let x_min = x.values.iter().copied().fold(f64::INFINITY, f64::min);
    let x_max = x.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let line = fit.line_points(x_min, x_max);

    let (x_lo, x_hi) = padded_range(points.iter().enumerate().flat_map(|(idx, &(px, _))| {
        let e = error_or_zero(&x.errors, idx);
        [px - e, px + e]
    }));
    let (y_lo, y_hi) = padded_range(
        points
            .iter()
            .enumerate()
            .flat_map(|(idx, &(_, py))| {
                let e = error_or_zero(&y.errors, idx);
                [py - e, py + e]
            })
            .chain(line.iter().map(|&(_, ly)| ly)),
    );

    let root = BitMapBackend::new(path.as_ref(), (900, 600)).into_drawing_area();
    root.fill(&BACKGROUND)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Linear fit", ("sans-serif", 28).into_font().color(&WHITE))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .axis_style(&WHITE)
        .bold_line_style(&WHITE.mix(0.2))
        .label_style(("sans-serif", 14).into_font().color(&WHITE))
        .x_desc(x.name.as_str())
        .y_desc(y.name.as_str())
        .draw()?;

    chart
        .draw_series(
            points
                .iter()
                .map(|&(px, py)| Circle::new((px, py), POINT_SIZE, POINT_COLOR.filled())),
        )?
        .label("Data")
        .legend(|(lx, ly)| Circle::new((lx + 10, ly), POINT_SIZE, POINT_COLOR.filled()));

    chart.draw_series(points.iter().zip(&y.errors).filter_map(|(&(px, py), err)| {
        err.map(|e| {
            ErrorBar::new_vertical(px, py - e, py, py + e, POINT_COLOR.filled(), ERROR_BAR_WIDTH)
        })
    }))?;
    chart.draw_series(points.iter().zip(&x.errors).filter_map(|(&(px, py), err)| {
        err.map(|e| {
            ErrorBar::new_horizontal(py, px - e, px, px + e, POINT_COLOR.filled(), ERROR_BAR_WIDTH)
        })
    }))?;

    chart
        .draw_series(LineSeries::new(line, LINE_COLOR.stroke_width(2)))?
        .label("Fit")
        .legend(|(lx, ly)| {
            PathElement::new(vec![(lx, ly), (lx + 20, ly)], LINE_COLOR.stroke_width(2))
        });

    chart
        .configure_series_labels()
        .border_style(&WHITE)
        .background_style(&BACKGROUND.mix(0.8))
        .label_font(("sans-serif", 14).into_font().color(&WHITE))
        .draw()?;

    root.present()?;
    Ok(())
}
