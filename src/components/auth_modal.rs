use std::collections::HashMap;

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{FormData, HtmlFormElement};

use crate::net;
use crate::state::{AppState, AuthTab};
use crate::types::AuthOutcome;

const SIGNUP_URL: &str = "/signup/";
const SIGNIN_URL: &str = "/signin/";
/// Matches the modal's CSS fade-out duration.
const MODAL_HIDE_DELAY_MS: i32 = 400;
const SIGNIN_FALLBACK_ERROR: &str = "رمز ورود یا نام کاربری اشتباه است!";

const SIGNUP_FIELDS: [(&str, &str, &str); 7] = [
    ("username", "نام کاربری", "text"),
    ("password", "رمز عبور", "password"),
    ("rePassword", "تکرار رمز عبور", "password"),
    ("email", "ایمیل", "email"),
    ("firstName", "نام", "text"),
    ("lastName", "نام خانوادگی", "text"),
    ("phoneNumber", "شماره تماس", "text"),
];

#[component]
pub fn AuthModal() -> impl IntoView {
    let state = expect_context::<AppState>();
    let visible = RwSignal::new(false);
    let field_errors: RwSignal<HashMap<String, String>> = RwSignal::new(HashMap::new());
    let general_error = RwSignal::new(String::new());

    // The modal keeps its element visible through the fade-out, then drops
    // visibility after the transition delay.
    Effect::new(move || {
        if state.auth_open.get() {
            visible.set(true);
            return;
        }
        let Some(window) = web_sys::window() else { return };
        let callback = Closure::once_into_js(move || {
            if !state.auth_open.get_untracked() {
                visible.set(false);
            }
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            MODAL_HIDE_DELAY_MS,
        );
    });

    Effect::new(move || {
        let open = state.auth_open.get();
        let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body())
        else {
            return;
        };
        let result = if open {
            body.class_list().add_1("modal-open")
        } else {
            body.class_list().remove_1("modal-open")
        };
        if result.is_err() {
            log::warn!("Could not toggle body modal class");
        }
    });

    let close = move || state.auth_open.set(false);

    let modal_class = move || {
        if state.auth_open.get() {
            "auth-modal show"
        } else {
            "auth-modal"
        }
    };

    let on_signup = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(target) = ev.target() else { return };
        let form: HtmlFormElement = target.unchecked_into();
        let Ok(data) = FormData::new_with_form(&form) else {
            log::error!("Could not serialize signup form");
            return;
        };
        spawn_local(async move {
            submit_signup(state, form, data, field_errors, general_error).await;
        });
    };

    let on_signin = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(target) = ev.target() else { return };
        let form: HtmlFormElement = target.unchecked_into();
        let Ok(data) = FormData::new_with_form(&form) else {
            log::error!("Could not serialize signin form");
            return;
        };
        spawn_local(async move {
            submit_signin(state, form, data).await;
        });
    };

    let tab_class = move |tab: AuthTab| {
        move || {
            if state.auth_tab.get() == tab {
                "tab-btn active"
            } else {
                "tab-btn"
            }
        }
    };
    let form_style = move |tab: AuthTab| {
        move || {
            if state.auth_tab.get() == tab {
                "display:block"
            } else {
                "display:none"
            }
        }
    };

    let csrf_value = net::csrf_token().unwrap_or_default();
    let csrf_signin = csrf_value.clone();

    view! {
        <div
            id="authModal"
            class=modal_class
            style:visibility=move || if visible.get() { "visible" } else { "hidden" }
            on:click=move |_| close()
        >
            <div class="auth-dialog" on:click=move |ev: web_sys::MouseEvent| ev.stop_propagation()>
                <button class="close-modal" on:click=move |_| close()>"×"</button>

                <div class="auth-tabs">
                    <button
                        class=tab_class(AuthTab::Signup)
                        on:click=move |_| state.auth_tab.set(AuthTab::Signup)
                    >
                        "ثبت نام"
                    </button>
                    <button
                        class=tab_class(AuthTab::Signin)
                        on:click=move |_| state.auth_tab.set(AuthTab::Signin)
                    >
                        "ورود"
                    </button>
                </div>

                <form
                    id="signupForm"
                    class="auth-form"
                    action=SIGNUP_URL
                    style=form_style(AuthTab::Signup)
                    on:submit=on_signup
                >
                    <input type="hidden" name="csrfmiddlewaretoken" value=csrf_value />
                    <div id="form-error" class="error-text">
                        {move || general_error.get()}
                    </div>
                    {SIGNUP_FIELDS
                        .into_iter()
                        .map(|(name, placeholder, kind)| {
                            view! {
                                <div class="form-field">
                                    <input
                                        type=kind
                                        name=name
                                        placeholder=placeholder
                                        class="form-control"
                                        required=true
                                    />
                                    <div class="error-text">
                                        {move || {
                                            field_errors.get().get(name).cloned().unwrap_or_default()
                                        }}
                                    </div>
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()}
                    <button type="submit" class="cta">"ثبت نام"</button>
                </form>

                <form
                    id="signinForm"
                    class="auth-form"
                    action=SIGNIN_URL
                    style=form_style(AuthTab::Signin)
                    on:submit=on_signin
                >
                    <input type="hidden" name="csrfmiddlewaretoken" value=csrf_signin />
                    <div class="form-field">
                        <input
                            type="text"
                            name="username"
                            placeholder="نام کاربری"
                            class="form-control"
                            required=true
                        />
                    </div>
                    <div class="form-field">
                        <input
                            type="password"
                            name="password"
                            placeholder="رمز عبور"
                            class="form-control"
                            required=true
                        />
                    </div>
                    <button type="submit" class="cta">"ورود"</button>
                </form>
            </div>
        </div>
    }
}

fn apply_form_errors(
    field_errors: RwSignal<HashMap<String, String>>,
    general_error: RwSignal<String>,
    errors: Option<&HashMap<String, Vec<String>>>,
) {
    field_errors.set(HashMap::new());
    general_error.set(String::new());
    let Some(errors) = errors else { return };
    for (field, messages) in errors {
        let joined = messages.join("، ");
        if field == "__all__" {
            general_error.set(joined);
        } else {
            field_errors.update(|map| {
                map.insert(field.clone(), joined.clone());
            });
        }
    }
}

async fn submit_signup(
    state: AppState,
    form: HtmlFormElement,
    data: FormData,
    field_errors: RwSignal<HashMap<String, String>>,
    general_error: RwSignal<String>,
) {
    match net::post_form(SIGNUP_URL, &data, false).await {
        Ok(reply) => match serde_json::from_str::<AuthOutcome>(&reply.body) {
            Ok(outcome) if reply.ok && outcome.success => {
                state.show_success_toast("موفقیت", "ثبت نام با موفقیت انجام شد!");
                form.reset();
                apply_form_errors(field_errors, general_error, None);
            }
            Ok(outcome) => {
                state.show_error_toast("خطا", "ثبت نام ناموفق. لطفاً خطاها را بررسی کنید.");
                apply_form_errors(field_errors, general_error, outcome.errors.as_ref());
            }
            Err(e) => {
                log::warn!("Signup response unparseable: {e}");
                state.show_error_toast("خطا", "مشکلی در درخواست ثبت نام وجود داشت.");
            }
        },
        Err(e) => {
            log::error!("Signup request failed: {e}");
            state.show_error_toast("خطا", "مشکلی در درخواست ثبت نام وجود داشت.");
        }
    }
}

async fn submit_signin(state: AppState, form: HtmlFormElement, data: FormData) {
    match net::post_form(SIGNIN_URL, &data, false).await {
        Ok(reply) => match serde_json::from_str::<AuthOutcome>(&reply.body) {
            Ok(outcome) if reply.ok && outcome.success => {
                state.show_success_toast("موفقیت", "ورود با موفقیت انجام شد!");
                form.reset();
                if outcome.reload {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().reload();
                    }
                }
            }
            Ok(outcome) => {
                let message = outcome
                    .error_text()
                    .unwrap_or_else(|| SIGNIN_FALLBACK_ERROR.to_string());
                state.show_error_toast("خطا!", format!("ورود ناموفق: {message}"));
            }
            Err(e) => {
                log::warn!("Signin response unparseable: {e}");
                state.show_error_toast("خطا", "مشکلی در درخواست ورود وجود داشت.");
            }
        },
        Err(e) => {
            log::error!("Signin request failed: {e}");
            state.show_error_toast("خطا", "مشکلی در درخواست ورود وجود داشت.");
        }
    }
}
