use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::state::{AppState, Page};

const SCROLL_THRESHOLD: f64 = 50.0;

#[component]
pub fn Navbar() -> impl IntoView {
    let state = expect_context::<AppState>();
    let scrolled = RwSignal::new(false);

    // The navbar gains a compact style once the page scrolls.
    if let Some(window) = web_sys::window() {
        let on_scroll = Closure::<dyn FnMut()>::new(move || {
            let y = web_sys::window()
                .and_then(|w| w.scroll_y().ok())
                .unwrap_or(0.0);
            scrolled.set(y > SCROLL_THRESHOLD);
        });
        let _ = window
            .add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
        on_scroll.forget();
    }

    let nav_class = move || {
        if scrolled.get() {
            "navbar sticky-top scrolled"
        } else {
            "navbar sticky-top"
        }
    };

    view! {
        <nav class=nav_class>
            <a class="navbar-brand" href="/" on:click=move |ev| {
                ev.prevent_default();
                state.page.set(Page::Home);
            }>
                <img src=move || state.theme.get().logo_src() alt="پیانوت" />
            </a>

            <div class="navbar-links">
                {[Page::Home, Page::Estimator, Page::Exercise, Page::Contact]
                    .into_iter()
                    .map(|page| {
                        let class = move || {
                            if state.page.get() == page {
                                "navbar-link active"
                            } else {
                                "navbar-link"
                            }
                        };
                        view! {
                            <button class=class on:click=move |_| state.page.set(page)>
                                {page.title()}
                            </button>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>

            <div class="navbar-actions">
                <button
                    class="theme-toggle"
                    title="تغییر پوسته"
                    on:click=move |_| state.toggle_theme()
                >
                    <i class=move || state.theme.get().toggle_icon()></i>
                </button>
                <button
                    class="profile-icon"
                    title="حساب کاربری"
                    on:click=move |_| state.auth_open.set(true)
                >
                    <i class="bi bi-person-circle"></i>
                </button>
            </div>
        </nav>
    }
}
