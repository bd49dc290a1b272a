//! Drawing primitives for the 2D-canvas charts. Each entry point renders a
//! complete chart; missing contexts are skipped so a bad canvas never takes
//! the page down.

use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

use crate::chart::layout::{self, PlotArea, ValueRange};
use crate::chart::palette::Palette;

const FONT: &str = "13px sans-serif";
const POINT_RADIUS: f64 = 3.0;
const ONSET_POINT_RADIUS: f64 = 7.0;
const MAX_X_LABELS: usize = 6;

pub struct Dataset<'a> {
    pub label: &'a str,
    pub color: &'a str,
    pub values: &'a [f64],
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    let ctx = canvas.get_context("2d").ok().flatten()?;
    ctx.dyn_into().ok()
}

/// Match the canvas bitmap to its container width at a fixed height, the way
/// the page sizes every chart before drawing.
pub fn size_to_container(canvas: &HtmlCanvasElement, height: u32) {
    let width = canvas
        .parent_element()
        .and_then(|p| p.dyn_into::<HtmlElement>().ok())
        .map(|p| p.offset_width())
        .filter(|w| *w > 0)
        .unwrap_or(600);
    canvas.set_width(width as u32);
    canvas.set_height(height);
}

fn clear(ctx: &CanvasRenderingContext2d, canvas: &HtmlCanvasElement) {
    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
}

fn text_width(ctx: &CanvasRenderingContext2d, text: &str) -> f64 {
    ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0)
}

fn draw_value_axis(
    ctx: &CanvasRenderingContext2d,
    area: &PlotArea,
    range: &ValueRange,
    palette: &Palette,
) {
    ctx.set_font(FONT);
    ctx.set_text_align("right");
    ctx.set_text_baseline("middle");
    ctx.set_line_width(1.0);
    for tick in layout::ticks(range, 5) {
        let y = layout::y_for_value(area, range, tick);
        ctx.set_stroke_style_str(palette.grid);
        ctx.begin_path();
        ctx.move_to(area.left, y);
        ctx.line_to(area.right(), y);
        ctx.stroke();

        ctx.set_fill_style_str(palette.text);
        let label = if tick.fract() == 0.0 {
            format!("{}", tick as i64)
        } else {
            format!("{tick:.1}")
        };
        let _ = ctx.fill_text(&label, area.left - 6.0, y);
    }
}

fn draw_category_labels(
    ctx: &CanvasRenderingContext2d,
    area: &PlotArea,
    labels: &[String],
    palette: &Palette,
) {
    if labels.is_empty() {
        return;
    }
    ctx.set_font(FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("top");
    ctx.set_fill_style_str(palette.text);

    // Sample at most MAX_X_LABELS so long histories stay readable.
    let stride = labels.len().div_ceil(MAX_X_LABELS).max(1);
    for (i, label) in labels.iter().enumerate() {
        if i % stride != 0 && i != labels.len() - 1 {
            continue;
        }
        let x = layout::x_for_index(area, i, labels.len());
        let _ = ctx.fill_text(label, x, area.bottom() + 6.0);
    }
}

fn draw_legend(
    ctx: &CanvasRenderingContext2d,
    area: &PlotArea,
    entries: &[(&str, &str)],
    palette: &Palette,
) {
    ctx.set_font(FONT);
    ctx.set_text_align("left");
    ctx.set_text_baseline("middle");
    let mut x = area.left;
    let y = area.top - 14.0;
    for (label, color) in entries {
        ctx.set_fill_style_str(color);
        ctx.fill_rect(x, y - 4.0, 9.0, 9.0);
        x += 13.0;
        ctx.set_fill_style_str(palette.text);
        let _ = ctx.fill_text(label, x, y);
        x += text_width(ctx, label) + 16.0;
    }
}

fn draw_point(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, color: &str) {
    ctx.set_fill_style_str(color);
    ctx.begin_path();
    if ctx.arc(x, y, radius, 0.0, 2.0 * PI).is_ok() {
        ctx.fill();
    }
}

/// Multi-series line chart with point markers and a legend.
pub fn draw_line_chart(
    canvas: &HtmlCanvasElement,
    labels: &[String],
    datasets: &[Dataset<'_>],
    range: ValueRange,
    palette: &Palette,
) {
    let Some(ctx) = context_2d(canvas) else {
        log::warn!("Line chart skipped: no 2d context");
        return;
    };
    clear(&ctx, canvas);
    if labels.is_empty() {
        return;
    }
    let area = layout::plot_area(canvas.width() as f64, canvas.height() as f64);
    draw_value_axis(&ctx, &area, &range, palette);
    draw_category_labels(&ctx, &area, labels, palette);

    for dataset in datasets {
        ctx.set_stroke_style_str(dataset.color);
        ctx.set_line_width(2.0);
        ctx.begin_path();
        let n = dataset.values.len();
        for (i, value) in dataset.values.iter().enumerate() {
            let x = layout::x_for_index(&area, i, n);
            let y = layout::y_for_value(&area, &range, *value);
            if i == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
        ctx.stroke();
        for (i, value) in dataset.values.iter().enumerate() {
            let x = layout::x_for_index(&area, i, n);
            let y = layout::y_for_value(&area, &range, *value);
            draw_point(&ctx, x, y, POINT_RADIUS, dataset.color);
        }
    }

    let legend: Vec<(&str, &str)> = datasets.iter().map(|d| (d.label, d.color)).collect();
    draw_legend(&ctx, &area, &legend, palette);
}

/// Vertical bar chart, one color per bar (cycled when fewer colors than bars).
pub fn draw_bar_chart(
    canvas: &HtmlCanvasElement,
    labels: &[String],
    values: &[f64],
    colors: &[String],
    palette: &Palette,
) {
    let Some(ctx) = context_2d(canvas) else {
        log::warn!("Bar chart skipped: no 2d context");
        return;
    };
    clear(&ctx, canvas);
    if values.is_empty() || colors.is_empty() {
        return;
    }
    let area = layout::plot_area(canvas.width() as f64, canvas.height() as f64);
    let top = ValueRange::of(values.iter().copied())
        .map(|r| r.max)
        .filter(|max| *max > 0.0)
        .unwrap_or(1.0);
    let range = ValueRange::new(0.0, top * 1.05);

    draw_value_axis(&ctx, &area, &range, palette);

    let n = values.len();
    for (i, value) in values.iter().enumerate() {
        let (x, w) = layout::bar_slot(&area, i, n, 0.7);
        let y = layout::y_for_value(&area, &range, *value);
        ctx.set_fill_style_str(&colors[i % colors.len()]);
        ctx.fill_rect(x, y, w, area.bottom() - y);
    }

    ctx.set_font(FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("top");
    ctx.set_fill_style_str(palette.text);
    for (i, label) in labels.iter().enumerate().take(n) {
        let (x, w) = layout::bar_slot(&area, i, n, 0.7);
        let _ = ctx.fill_text(label, x + w / 2.0, area.bottom() + 6.0);
    }
}

/// Pie chart with a legend row above; slices start at 12 o'clock.
pub fn draw_pie_chart(
    canvas: &HtmlCanvasElement,
    labels: &[String],
    values: &[f64],
    colors: &[String],
    palette: &Palette,
) {
    let Some(ctx) = context_2d(canvas) else {
        log::warn!("Pie chart skipped: no 2d context");
        return;
    };
    clear(&ctx, canvas);
    let total: f64 = values.iter().filter(|v| v.is_finite() && **v > 0.0).sum();
    if total <= 0.0 || colors.is_empty() {
        return;
    }
    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let area = layout::plot_area(width, height);
    let cx = width / 2.0;
    let cy = area.top + area.height / 2.0;
    let radius = (area.height / 2.0).min(width / 2.0 - 10.0).max(10.0);

    let mut angle = -PI / 2.0;
    for (i, value) in values.iter().enumerate() {
        if !value.is_finite() || *value <= 0.0 {
            continue;
        }
        let sweep = value / total * 2.0 * PI;
        ctx.set_fill_style_str(&colors[i % colors.len()]);
        ctx.begin_path();
        ctx.move_to(cx, cy);
        if ctx.arc(cx, cy, radius, angle, angle + sweep).is_ok() {
            ctx.close_path();
            ctx.fill();
        }
        angle += sweep;
    }

    let legend: Vec<(&str, &str)> = labels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), colors[i % colors.len()].as_str()))
        .collect();
    draw_legend(&ctx, &area, &legend, palette);
}

/// Timing comparison: reference onsets on the lower row, user onsets on the
/// upper row, shared time axis in seconds.
pub fn draw_onset_chart(
    canvas: &HtmlCanvasElement,
    ref_onsets: &[f64],
    user_onsets: &[f64],
    palette: &Palette,
) {
    let Some(ctx) = context_2d(canvas) else {
        log::warn!("Onset chart skipped: no 2d context");
        return;
    };
    clear(&ctx, canvas);
    let Some(time_range) =
        ValueRange::of(ref_onsets.iter().chain(user_onsets.iter()).copied())
    else {
        return;
    };
    let time_range = time_range.padded(0.05);
    let area = layout::plot_area(canvas.width() as f64, canvas.height() as f64);

    let row_y = |row: f64| area.bottom() - area.height * (0.25 + row * 0.5);

    ctx.set_line_width(1.0);
    ctx.set_font(FONT);
    ctx.set_text_baseline("middle");
    for (row, label) in [(0.0, "مرجع"), (1.0, "شما")] {
        let y = row_y(row);
        ctx.set_stroke_style_str(palette.grid);
        ctx.begin_path();
        ctx.move_to(area.left, y);
        ctx.line_to(area.right(), y);
        ctx.stroke();
        ctx.set_fill_style_str(palette.text);
        ctx.set_text_align("right");
        let _ = ctx.fill_text(label, area.left - 6.0, y);
    }

    for &onset in ref_onsets {
        let x = layout::x_for_value(&area, &time_range, onset);
        draw_point(&ctx, x, row_y(0.0), ONSET_POINT_RADIUS, palette.ref_onsets);
    }
    for &onset in user_onsets {
        let x = layout::x_for_value(&area, &time_range, onset);
        draw_point(&ctx, x, row_y(1.0), ONSET_POINT_RADIUS, palette.user_onsets);
    }

    ctx.set_text_align("center");
    ctx.set_text_baseline("top");
    ctx.set_fill_style_str(palette.text);
    for tick in layout::ticks(&time_range, 6) {
        let x = layout::x_for_value(&area, &time_range, tick);
        let _ = ctx.fill_text(&format!("{tick:.1}"), x, area.bottom() + 6.0);
    }
    draw_legend(
        &ctx,
        &area,
        &[("Onsets مرجع", palette.ref_onsets), ("Onsets شما", palette.user_onsets)],
        palette,
    );
}

/// XY scatter with numeric axes (dimension vs price on the estimator page).
pub fn draw_xy_scatter(
    canvas: &HtmlCanvasElement,
    points: &[(f64, f64)],
    palette: &Palette,
) {
    let Some(ctx) = context_2d(canvas) else {
        log::warn!("Scatter chart skipped: no 2d context");
        return;
    };
    clear(&ctx, canvas);
    let Some(x_range) = ValueRange::of(points.iter().map(|p| p.0)) else {
        return;
    };
    let Some(y_range) = ValueRange::of(points.iter().map(|p| p.1)) else {
        return;
    };
    let x_range = x_range.padded(0.1);
    let y_range = ValueRange::new(0.0, y_range.padded(0.1).max);
    let area = layout::plot_area(canvas.width() as f64, canvas.height() as f64);

    draw_value_axis(&ctx, &area, &y_range, palette);
    ctx.set_text_align("center");
    ctx.set_text_baseline("top");
    ctx.set_fill_style_str(palette.text);
    for tick in layout::ticks(&x_range, 6) {
        let x = layout::x_for_value(&area, &x_range, tick);
        let _ = ctx.fill_text(&format!("{}", tick as i64), x, area.bottom() + 6.0);
    }

    for (x_value, y_value) in points {
        let x = layout::x_for_value(&area, &x_range, *x_value);
        let y = layout::y_for_value(&area, &y_range, *y_value);
        draw_point(&ctx, x, y, POINT_RADIUS + 2.0, palette.scatter);
    }
}
