//! Score-chart registry: one chart instance per canvas, created on first
//! update and mutated in place afterwards. A mutation observer on the root
//! theme attribute recolors every bound chart after a short debounce so the
//! CSS transition settles first.

use std::cell::RefCell;
use std::collections::HashMap;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MutationObserver, MutationObserverInit};

use crate::chart::draw::{self, Dataset};
use crate::chart::layout::ValueRange;
use crate::chart::palette::{self, SCORE_LABELS};
use crate::theme;
use crate::types::ScoreSeries;

pub const SCORE_CHART_HEIGHT: u32 = 220;
const RECOLOR_DEBOUNCE_MS: i32 = 300;

struct ScoreChart {
    canvas: HtmlCanvasElement,
    series: ScoreSeries,
}

type ObserverSlot = Option<(MutationObserver, Closure<dyn FnMut(js_sys::Array, MutationObserver)>)>;

thread_local! {
    static CHARTS: RefCell<HashMap<String, ScoreChart>> = RefCell::new(HashMap::new());
    static THEME_OBSERVER: RefCell<ObserverSlot> = RefCell::new(None);
    static RECOLOR_TIMER: RefCell<Option<i32>> = RefCell::new(None);
}

fn redraw(chart: &ScoreChart) {
    let pal = palette::palette(theme::current());
    draw::size_to_container(&chart.canvas, SCORE_CHART_HEIGHT);
    let series = &chart.series;
    let datasets = [
        Dataset { label: SCORE_LABELS[0], color: pal.score_series[0], values: &series.pitch },
        Dataset { label: SCORE_LABELS[1], color: pal.score_series[1], values: &series.tempo },
        Dataset { label: SCORE_LABELS[2], color: pal.score_series[2], values: &series.energy },
        Dataset { label: SCORE_LABELS[3], color: pal.score_series[3], values: &series.overall },
    ];
    draw::draw_line_chart(
        &chart.canvas,
        &series.labels,
        &datasets,
        ValueRange::new(0.0, 100.0),
        pal,
    );
}

/// Bind the canvas on first use, then replace its series wholesale and
/// redraw. An empty series clears the chart to a blank plot.
pub fn update(canvas: &HtmlCanvasElement, series: ScoreSeries) {
    let key = canvas.id();
    if key.is_empty() {
        log::warn!("Score chart canvas has no id; skipping update");
        return;
    }
    CHARTS.with(|charts| {
        let mut charts = charts.borrow_mut();
        let chart = charts.entry(key).or_insert_with(|| ScoreChart {
            canvas: canvas.clone(),
            series: ScoreSeries::default(),
        });
        chart.series = series;
        redraw(chart);
    });
}

/// Drop the chart bound to `canvas_id`. Called when its page unmounts.
pub fn release(canvas_id: &str) {
    CHARTS.with(|charts| {
        charts.borrow_mut().remove(canvas_id);
    });
}

/// Recolor every bound chart with the current theme palette. Data is kept;
/// only the redraw happens. Charts whose canvas left the DOM are dropped.
pub fn recolor_all() {
    CHARTS.with(|charts| {
        let mut charts = charts.borrow_mut();
        charts.retain(|_, chart| chart.canvas.is_connected());
        for chart in charts.values() {
            redraw(chart);
        }
    });
}

fn schedule_recolor() {
    let Some(window) = web_sys::window() else {
        return;
    };
    RECOLOR_TIMER.with(|timer| {
        if let Some(handle) = timer.borrow_mut().take() {
            window.clear_timeout_with_handle(handle);
        }
    });
    let callback = Closure::once_into_js(move || {
        RECOLOR_TIMER.with(|timer| *timer.borrow_mut() = None);
        recolor_all();
    });
    match window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        RECOLOR_DEBOUNCE_MS,
    ) {
        Ok(handle) => RECOLOR_TIMER.with(|timer| *timer.borrow_mut() = Some(handle)),
        Err(e) => log::warn!("Could not schedule chart recolor: {e:?}"),
    }
}

/// Install the root-attribute observer once. Subsequent calls are no-ops.
pub fn watch_theme_changes() {
    THEME_OBSERVER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        else {
            return;
        };

        let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
            move |_mutations, _observer| schedule_recolor(),
        );
        let observer = match MutationObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => observer,
            Err(e) => {
                log::warn!("MutationObserver unavailable: {e:?}");
                return;
            }
        };

        let init = MutationObserverInit::new();
        init.set_attributes(true);
        let filter = js_sys::Array::of1(&JsValue::from_str(theme::ROOT_ATTR));
        init.set_attribute_filter(&filter);
        if let Err(e) = observer.observe_with_options(&root, &init) {
            log::warn!("Theme observer failed to attach: {e:?}");
            return;
        }
        *slot.borrow_mut() = Some((observer, callback));
    });
}
