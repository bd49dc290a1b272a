use leptos::prelude::*;

use crate::state::{AppState, ToastKind};

#[component]
pub fn ToastHost() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <div class="toast-stack">
            {move || {
                state
                    .toasts
                    .get()
                    .into_iter()
                    .map(|toast| {
                        let class = match toast.kind {
                            ToastKind::Success => "toast text-bg-success show",
                            ToastKind::Error => "toast text-bg-danger show",
                        };
                        let id = toast.id;
                        view! {
                            <div class=class role="alert">
                                <strong class="toast-title">{toast.title.clone()}</strong>
                                <span class="toast-message">{toast.message.clone()}</span>
                                <button
                                    class="toast-close"
                                    on:click=move |_| state.dismiss_toast(id)
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
