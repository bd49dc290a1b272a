use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::map;

const MAP_CONTAINER_ID: &str = "map";
const ALERT_DISMISS_MS: i32 = 3000;
/// The contact endpoint is not wired up yet; submission is simulated.
const SIMULATED_SUBMIT_MS: i32 = 1000;

#[derive(Clone, Debug, PartialEq)]
struct ContactForm {
    name: String,
    email: String,
    subject: String,
    message: String,
}

/// Client-side validation, first failure wins.
fn validate(form: &ContactForm) -> Result<(), &'static str> {
    if form.name.trim().is_empty() {
        return Err("لطفاً نام خود را وارد کنید");
    }
    if !is_valid_email(&form.email) {
        return Err("لطفاً یک ایمیل معتبر وارد کنید");
    }
    if form.subject.trim().is_empty() {
        return Err("لطفاً موضوع پیام را وارد کنید");
    }
    if form.message.trim().is_empty() {
        return Err("لطفاً پیام خود را وارد کنید");
    }
    Ok(())
}

/// local@domain.tld shape, no whitespace.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[derive(Clone, Copy, PartialEq)]
enum AlertKind {
    Success,
    Error,
}

#[component]
pub fn ContactPage() -> impl IntoView {
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let subject = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());
    let sending = RwSignal::new(false);
    let alert: RwSignal<Option<(u32, AlertKind, String)>> = RwSignal::new(None);
    let alert_seq = RwSignal::new(0u32);

    let map_ready = RwSignal::new(false);
    Effect::new(move || {
        if map_ready.get_untracked() {
            return;
        }
        map_ready.set(true);
        map::init_contact_map(MAP_CONTAINER_ID);
    });

    let show_alert = move |kind: AlertKind, text: String| {
        let id = alert_seq.get_untracked().wrapping_add(1);
        alert_seq.set(id);
        alert.set(Some((id, kind, text)));
        if let Some(window) = web_sys::window() {
            let callback = Closure::once_into_js(move || {
                alert.update(|current| {
                    if current.as_ref().map(|(i, _, _)| *i) == Some(id) {
                        *current = None;
                    }
                });
            });
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                ALERT_DISMISS_MS,
            );
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = ContactForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            subject: subject.get_untracked(),
            message: message.get_untracked(),
        };
        if let Err(text) = validate(&form) {
            show_alert(AlertKind::Error, text.to_string());
            return;
        }
        sending.set(true);
        spawn_local(async move {
            sleep_ms(SIMULATED_SUBMIT_MS).await;
            sending.set(false);
            show_alert(AlertKind::Success, "پیام شما با موفقیت ارسال شد".to_string());
            name.set(String::new());
            email.set(String::new());
            subject.set(String::new());
            message.set(String::new());
        });
    };

    view! {
        <section class="contact">
            <h1>"درباره ما"</h1>

            <div id=MAP_CONTAINER_ID class="contact-map"></div>

            <form id="contactForm" on:submit=on_submit>
                {move || {
                    alert.get().map(|(_, kind, text)| {
                        let class = match kind {
                            AlertKind::Success => "alert alert-success mt-3",
                            AlertKind::Error => "alert alert-danger mt-3",
                        };
                        view! { <div class=class>{text}</div> }
                    })
                }}

                <input
                    id="name"
                    type="text"
                    placeholder="نام"
                    prop:value=name
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <input
                    id="email"
                    type="text"
                    placeholder="ایمیل"
                    prop:value=email
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    id="subject"
                    type="text"
                    placeholder="موضوع"
                    prop:value=subject
                    on:input=move |ev| subject.set(event_target_value(&ev))
                />
                <textarea
                    id="message"
                    placeholder="پیام شما"
                    prop:value=message
                    on:input=move |ev| message.set(event_target_value(&ev))
                ></textarea>

                <button type="submit" class="cta" disabled=move || sending.get()>
                    {move || if sending.get() { "در حال ارسال…" } else { "ارسال پیام" }}
                </button>
            </form>
        </section>
    }
}

async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        if let Some(window) = web_sys::window() {
            let _ = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    let _ = JsFuture::from(promise).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "سارا".into(),
            email: "sara@example.com".into(),
            subject: "پشتیبانی".into(),
            message: "سلام".into(),
        }
    }

    #[test]
    fn complete_form_validates() {
        assert!(validate(&form()).is_ok());
    }

    #[test]
    fn blank_fields_are_rejected_in_order() {
        let mut f = form();
        f.name = "  ".into();
        assert!(validate(&f).is_err());

        let mut f = form();
        f.subject = String::new();
        assert!(validate(&f).is_err());

        let mut f = form();
        f.message = String::new();
        assert!(validate(&f).is_err());
    }

    #[test]
    fn email_shape_check() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("user.name@mail.example.org"));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("@missing-local.com"));
        assert!(!is_valid_email("no-domain@"));
        assert!(!is_valid_email("no-tld@host"));
        assert!(!is_valid_email("sp ace@host.com"));
        assert!(!is_valid_email("two@@host.com"));
    }
}
