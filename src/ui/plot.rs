use std::ops::RangeInclusive;

use eframe::egui::Ui;
use egui_plot::{GridInput, GridMark, Line, MarkerShape, Plot, PlotBounds, PlotPoints, Points};

use crate::color::cycle_color;
use crate::figure::{Axis, Figure, FigureKind, Scale};

/// Points-to-pixels at the default 96 dpi.
const PT_TO_PX: f32 = 96.0 / 72.0;

// ---------------------------------------------------------------------------
// Figure plot (central panel)
// ---------------------------------------------------------------------------

/// Render one figure in the central panel.
///
/// Log axes are drawn by plotting `log10(v)` and labelling ticks with the
/// data value; fixed bounds disable pan and zoom.
pub fn figure_plot(ui: &mut Ui, figure: &Figure) {
    let color = cycle_color(figure.color_index);
    let bounds = plot_bounds(&figure.x_axis, &figure.y_axis);
    let interactive = bounds.is_none();

    let mut plot = Plot::new(("figure", figure.title.as_str()))
        .x_axis_label(figure.x_axis.label)
        .y_axis_label(figure.y_axis.label)
        .allow_boxed_zoom(interactive)
        .allow_drag(interactive)
        .allow_scroll(interactive)
        .allow_zoom(interactive)
        .allow_double_click_reset(interactive);

    if figure.x_axis.scale == Scale::Log {
        plot = plot
            .x_grid_spacer(log_grid_spacer)
            .x_axis_formatter(log_tick_label);
    }
    if figure.y_axis.scale == Scale::Log {
        plot = plot
            .y_grid_spacer(log_grid_spacer)
            .y_axis_formatter(log_tick_label);
    }

    plot.show(ui, |plot_ui| {
        if let Some(bounds) = bounds {
            plot_ui.set_plot_bounds(bounds);
        }

        match &figure.kind {
            FigureKind::StepHistogram(hist) => {
                let outline = PlotPoints::from(hist.step_outline());
                plot_ui.line(Line::new(outline).color(color).width(1.5));
            }
            FigureKind::Scatter {
                points,
                marker_size,
            } => {
                let projected: PlotPoints = points
                    .iter()
                    .filter_map(|&[x, y]| {
                        Some([
                            to_plot_space(&figure.x_axis, x)?,
                            to_plot_space(&figure.y_axis, y)?,
                        ])
                    })
                    .collect();
                plot_ui.points(
                    Points::new(projected)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(marker_radius(*marker_size))
                        .color(color),
                );
            }
        }
    });
}

// -- helpers --

/// Fixed plot window, only when both axes carry bounds.
fn plot_bounds(x: &Axis, y: &Axis) -> Option<PlotBounds> {
    let (x0, x1) = x.bounds?;
    let (y0, y1) = y.bounds?;
    Some(PlotBounds::from_min_max(
        [to_plot_space(x, x0)?, to_plot_space(y, y0)?],
        [to_plot_space(x, x1)?, to_plot_space(y, y1)?],
    ))
}

/// Map a data value onto the plot's coordinate. Non-positive values have no
/// place on a log axis.
fn to_plot_space(axis: &Axis, value: f64) -> Option<f64> {
    match axis.scale {
        Scale::Linear => Some(value),
        Scale::Log if value > 0.0 => Some(value.log10()),
        Scale::Log => None,
    }
}

/// Marker area in pt² → radius in pixels.
fn marker_radius(size: f32) -> f32 {
    size.max(0.0).sqrt() * 0.5 * PT_TO_PX
}

/// Step size given to decade marks; minor marks get a tenth of it.
const DECADE_STEP: f64 = 1.0;

fn log_grid_spacer(input: GridInput) -> Vec<GridMark> {
    log_grid_marks(input.bounds)
}

/// Marks at `m * 10^k` (m = 1..9) inside `bounds`, which are in log10 units.
fn log_grid_marks((lo, hi): (f64, f64)) -> Vec<GridMark> {
    if !(lo.is_finite() && hi.is_finite()) || lo > hi {
        return Vec::new();
    }

    let mut marks = Vec::new();
    for k in (lo.floor() as i32)..=(hi.ceil() as i32) {
        for m in 1..=9 {
            let value = if m == 1 {
                f64::from(k)
            } else {
                (f64::from(m) * 10f64.powi(k)).log10()
            };
            if value >= lo && value <= hi {
                let step_size = if m == 1 { DECADE_STEP } else { DECADE_STEP / 10.0 };
                marks.push(GridMark { value, step_size });
            }
        }
    }
    marks
}

/// Only decades are labelled, as on a matplotlib log axis.
fn log_tick_label(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    if mark.step_size < DECADE_STEP {
        return String::new();
    }
    format_linear_value(10f64.powf(mark.value))
}

fn format_linear_value(v: f64) -> String {
    if v >= 100.0 {
        format!("{v:.0}")
    } else if v >= 1.0 {
        format!("{v:.1}")
    } else {
        format!("{v:.3}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_axis_drops_non_positive_values() {
        let axis = Axis {
            label: "p",
            scale: Scale::Log,
            bounds: None,
        };
        assert_eq!(to_plot_space(&axis, 100.0), Some(2.0));
        assert_eq!(to_plot_space(&axis, 0.0), None);
        assert_eq!(to_plot_space(&axis, -3.0), None);
    }

    #[test]
    fn bounds_are_projected_onto_log_axis() {
        let x = Axis {
            label: "p",
            scale: Scale::Log,
            bounds: Some((3.0, 400.0)),
        };
        let y = Axis {
            label: "e",
            scale: Scale::Linear,
            bounds: Some((0.0, 1.0)),
        };
        let bounds = plot_bounds(&x, &y).unwrap();
        assert!((bounds.min()[0] - 3f64.log10()).abs() < 1e-12);
        assert!((bounds.max()[0] - 400f64.log10()).abs() < 1e-12);
        assert_eq!(bounds.min()[1], 0.0);
        assert_eq!(bounds.max()[1], 1.0);
    }

    #[test]
    fn auto_axes_have_no_fixed_bounds() {
        assert!(plot_bounds(&Axis::auto("w"), &Axis::auto("count")).is_none());
    }

    #[test]
    fn tick_labels_show_linear_values() {
        assert_eq!(format_linear_value(10f64.powf(2.0)), "100");
        assert_eq!(format_linear_value(3.0), "3.0");
        assert_eq!(format_linear_value(0.5), "0.500");
    }

    #[test]
    fn log_marks_fall_on_decade_multiples() {
        let marks = log_grid_marks((3f64.log10(), 400f64.log10()));
        let values: Vec<f64> = marks.iter().map(|m| 10f64.powf(m.value)).collect();
        // 3..9, 10..90, 100..400
        assert_eq!(marks.len(), 20);
        for (v, expected) in values.iter().zip(
            [3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 20.0, 30.0]
                .into_iter()
                .chain([40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 200.0, 300.0, 400.0]),
        ) {
            assert!((v - expected).abs() / expected < 1e-9, "{v} vs {expected}");
        }

        let decades: Vec<f64> = marks
            .iter()
            .filter(|m| m.step_size == DECADE_STEP)
            .map(|m| m.value)
            .collect();
        assert_eq!(decades, vec![1.0, 2.0]);
    }

    #[test]
    fn only_decades_are_labelled() {
        let range = 0.0..=3.0;
        let decade = GridMark {
            value: 2.0,
            step_size: DECADE_STEP,
        };
        let minor = GridMark {
            value: 50f64.log10(),
            step_size: DECADE_STEP / 10.0,
        };
        assert_eq!(log_tick_label(decade, &range), "100");
        assert_eq!(log_tick_label(minor, &range), "");
    }

    #[test]
    fn degenerate_bounds_give_no_marks() {
        assert!(log_grid_marks((f64::NAN, 1.0)).is_empty());
        assert!(log_grid_marks((2.0, 1.0)).is_empty());
    }

    #[test]
    fn unit_marker_is_sub_pixel_sized() {
        let r = marker_radius(1.0);
        assert!(r > 0.5 && r < 1.0);
    }
}
