use leptos::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::chart::{draw, palette};
use crate::components::smooth_scroll_to;
use crate::format;
use crate::pricing::{self, MARKET};
use crate::state::AppState;

const CHART_HEIGHT: u32 = 220;

#[component]
pub fn EstimatorPage() -> impl IntoView {
    let state = expect_context::<AppState>();

    let brand = RwSignal::new(pricing::BRANDS[0].to_string());
    let model = RwSignal::new(String::new());
    let dimension = RwSignal::new(String::new());
    let material = RwSignal::new(pricing::MATERIALS[0].to_string());
    let estimated: RwSignal<Option<u64>> = RwSignal::new(None);

    let brand_canvas = NodeRef::<leptos::html::Canvas>::new();
    let material_canvas = NodeRef::<leptos::html::Canvas>::new();
    let dimension_canvas = NodeRef::<leptos::html::Canvas>::new();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let dim = dimension
            .get_untracked()
            .trim()
            .parse::<f64>()
            .unwrap_or(f64::NAN);
        let price = pricing::estimate_price(
            &brand.get_untracked(),
            &model.get_untracked(),
            dim,
            &material.get_untracked(),
        );
        estimated.set(Some(price));
        smooth_scroll_to("estimator-result");
    };

    // Market charts render once the result section mounts and re-render on
    // theme change.
    Effect::new(move || {
        if estimated.get().is_none() {
            return;
        }
        let pal = palette::palette(state.theme.get());
        let (Some(brand_el), Some(material_el), Some(dimension_el)) = (
            brand_canvas.get(),
            material_canvas.get(),
            dimension_canvas.get(),
        ) else {
            return;
        };

        let colors: Vec<String> = pal.categorical.iter().map(|c| c.to_string()).collect();

        let canvas: &HtmlCanvasElement = brand_el.as_ref();
        draw::size_to_container(canvas, CHART_HEIGHT);
        let labels: Vec<String> = MARKET.brand_prices.iter().map(|(b, _)| b.to_string()).collect();
        let values: Vec<f64> = MARKET.brand_prices.iter().map(|(_, p)| *p as f64).collect();
        draw::draw_bar_chart(canvas, &labels, &values, &colors, pal);

        let canvas: &HtmlCanvasElement = material_el.as_ref();
        draw::size_to_container(canvas, CHART_HEIGHT);
        let labels: Vec<String> = MARKET
            .material_averages
            .iter()
            .map(|(m, _)| m.to_string())
            .collect();
        let values: Vec<f64> = MARKET
            .material_averages
            .iter()
            .map(|(_, p)| *p as f64)
            .collect();
        draw::draw_pie_chart(canvas, &labels, &values, &colors, pal);

        let canvas: &HtmlCanvasElement = dimension_el.as_ref();
        draw::size_to_container(canvas, CHART_HEIGHT);
        draw::draw_xy_scatter(canvas, MARKET.dimension_vs_price, pal);
    });

    view! {
        <section class="estimator">
            <h1>"تخمین قیمت پیانو"</h1>
            <form id="piano-form" on:submit=on_submit>
                <label for="brand">"برند"</label>
                <select
                    id="brand"
                    on:change=move |ev| brand.set(event_target_value(&ev))
                >
                    {pricing::BRANDS
                        .iter()
                        .map(|b| view! { <option value=*b>{*b}</option> })
                        .collect::<Vec<_>>()}
                    <option value="Other">"سایر"</option>
                </select>

                <label for="model">"مدل"</label>
                <input
                    id="model"
                    type="text"
                    placeholder="مثلاً U3"
                    prop:value=model
                    on:input=move |ev| model.set(event_target_value(&ev))
                />

                <label for="dimension">"طول (سانتی‌متر)"</label>
                <input
                    id="dimension"
                    type="number"
                    placeholder="۱۵۰ تا ۳۰۰"
                    prop:value=dimension
                    on:input=move |ev| dimension.set(event_target_value(&ev))
                />

                <label for="material">"جنس بدنه"</label>
                <select
                    id="material"
                    on:change=move |ev| material.set(event_target_value(&ev))
                >
                    {pricing::MATERIALS
                        .iter()
                        .map(|m| view! { <option value=*m>{*m}</option> })
                        .collect::<Vec<_>>()}
                    <option value="Other">"سایر"</option>
                </select>

                <button type="submit" class="cta">"تخمین بزن"</button>
            </form>

            {move || {
                estimated.get().map(|price| {
                    view! {
                        <div id="estimator-result" class="estimator-result">
                            <h2>"قیمت تخمینی"</h2>
                            <p id="estimated-price" class="estimated-price">
                                {format::format_toman(price)}
                            </p>
                        </div>
                        <div class="charts-section">
                            <figure>
                                <figcaption>"گران‌ترین برندها (تومان)"</figcaption>
                                <canvas id="brandBarChart" node_ref=brand_canvas></canvas>
                            </figure>
                            <figure>
                                <figcaption>"میانگین قیمت بر اساس جنس"</figcaption>
                                <canvas id="materialPieChart" node_ref=material_canvas></canvas>
                            </figure>
                            <figure>
                                <figcaption>"ابعاد در مقابل قیمت"</figcaption>
                                <canvas id="dimensionScatterChart" node_ref=dimension_canvas></canvas>
                            </figure>
                        </div>
                    }
                })
            }}
        </section>
    }
}
