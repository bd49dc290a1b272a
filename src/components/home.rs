use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::components::smooth_scroll_to;
use crate::format;
use crate::state::{AppState, Page};

/// Site statistics shown on the landing page. The server renders the live
/// figures into the page; these stand in for them.
const STATS: [(&str, u64); 3] = [
    ("قطعه نت", 1250),
    ("هنرجوی فعال", 3400),
    ("دیدگاه", 7800),
];

const FAQ: [(&str, &str); 4] = [
    (
        "پیانوت چطور اجرای من را ارزیابی می‌کند؟",
        "ضبط تمرین شما روی سرور با قطعه مرجع مقایسه می‌شود و امتیاز نت، ریتم و انرژی به همراه امتیاز نهایی باز می‌گردد.",
    ),
    (
        "چه فرمت‌هایی برای بارگذاری پشتیبانی می‌شوند؟",
        "هر فایل صوتی مرورگرتان؛ فرمت‌های wav و mp3 توصیه می‌شوند.",
    ),
    (
        "آیا تخمین قیمت پیانو دقیق است؟",
        "تخمین فعلی یک فرمول نمایشی است و صرفاً برای آشنایی با بازه قیمت کاربرد دارد.",
    ),
    (
        "آیا استفاده از پیانوت رایگان است؟",
        "ثبت‌نام و امکانات پایه رایگان است؛ امکانات ویژه برای کاربران اشتراکی فعال می‌شود.",
    ),
];

#[component]
pub fn HomePage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let open_faq: RwSignal<Option<usize>> = RwSignal::new(None);

    view! {
        <section class="hero" id="hero">
            <h1>"پیانوت؛ همراه تمرین پیانوی شما"</h1>
            <p>"ضبط تمرین خود را بارگذاری کنید، با قطعه مرجع مقایسه کنید و پیشرفت‌تان را دنبال کنید."</p>
            <div class="hero-actions">
                <button class="cta" on:click=move |_| state.page.set(Page::Exercise)>
                    "شروع تمرین"
                </button>
                <a
                    href="#stats"
                    on:click=move |ev| {
                        ev.prevent_default();
                        smooth_scroll_to("stats");
                    }
                >
                    "درباره پیانوت"
                </a>
            </div>
        </section>

        <section class="stats" id="stats">
            {STATS
                .into_iter()
                .map(|(label, target)| view! { <CounterCard label target /> })
                .collect::<Vec<_>>()}
        </section>

        <section class="faq" id="faq">
            <h2>"پرسش‌های پرتکرار"</h2>
            <div class="accordion">
                {FAQ
                    .into_iter()
                    .enumerate()
                    .map(|(i, (question, answer))| {
                        let button_class = move || {
                            if open_faq.get() == Some(i) {
                                "accordion-button"
                            } else {
                                "accordion-button collapsed"
                            }
                        };
                        view! {
                            <div class="accordion-item">
                                <button
                                    class=button_class
                                    on:click=move |_| {
                                        open_faq.update(|open| {
                                            *open = if *open == Some(i) { None } else { Some(i) };
                                        });
                                    }
                                >
                                    {question}
                                </button>
                                <div
                                    class="accordion-body"
                                    style:display=move || {
                                        if open_faq.get() == Some(i) { "block" } else { "none" }
                                    }
                                >
                                    {answer}
                                </div>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        </section>
    }
}

/// A statistic that counts up from zero the first time it scrolls into view.
#[component]
fn CounterCard(label: &'static str, target: u64) -> impl IntoView {
    let shown = RwSignal::new(0u64);
    let node_ref = NodeRef::<leptos::html::Div>::new();
    let observed = RwSignal::new(false);

    Effect::new(move || {
        let Some(el) = node_ref.get() else { return };
        if observed.get_untracked() {
            return;
        }
        observed.set(true);

        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        animate_counter(shown, target);
                        observer.disconnect();
                        break;
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(0.5));
        match IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &options,
        ) {
            Ok(observer) => {
                let element: &web_sys::Element = el.as_ref();
                observer.observe(element);
                callback.forget();
            }
            Err(e) => {
                log::warn!("IntersectionObserver unavailable: {e:?}");
                // No observer, no animation: show the figure outright.
                shown.set(target);
            }
        }
    });

    view! {
        <div class="counter-card" node_ref=node_ref>
            <span class="counter">{move || format::persian_count(shown.get())}</span>
            <span class="counter-label">{label}</span>
        </div>
    }
}

const COUNTER_STEPS: u32 = 50;
const COUNTER_TICK_MS: i32 = 40;

/// Ease the displayed value toward the target over ~2 seconds.
fn animate_counter(shown: RwSignal<u64>, target: u64) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let step = Rc::new(Cell::new(0u32));
    let handle: Rc<Cell<i32>> = Rc::new(Cell::new(0));

    let callback = {
        let step = step.clone();
        let handle = handle.clone();
        Closure::<dyn FnMut()>::new(move || {
            let k = step.get() + 1;
            step.set(k);
            let t = k as f64 / COUNTER_STEPS as f64;
            let eased = 1.0 - (1.0 - t) * (1.0 - t);
            shown.set((target as f64 * eased).round() as u64);
            if k >= COUNTER_STEPS {
                shown.set(target);
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(handle.get());
                }
            }
        })
    };

    match window.set_interval_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        COUNTER_TICK_MS,
    ) {
        Ok(h) => {
            handle.set(h);
            callback.forget();
        }
        Err(e) => {
            log::warn!("Counter animation failed to start: {e:?}");
            shown.set(target);
        }
    }
}
