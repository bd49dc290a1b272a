use leptos::prelude::*;

use crate::chart::manager;
use crate::components::auth_modal::AuthModal;
use crate::components::contact::ContactPage;
use crate::components::estimator::EstimatorPage;
use crate::components::exercise::ExercisePage;
use crate::components::home::HomePage;
use crate::components::navbar::Navbar;
use crate::components::toast::ToastHost;
use crate::state::{AppState, Page};

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    provide_context(state);

    // Charts recolor themselves off the root attribute, not per-component.
    manager::watch_theme_changes();

    view! {
        <div class="app">
            <Navbar />
            <main class="page">
                {move || match state.page.get() {
                    Page::Home => view! { <HomePage /> }.into_any(),
                    Page::Estimator => view! { <EstimatorPage /> }.into_any(),
                    Page::Exercise => view! { <ExercisePage /> }.into_any(),
                    Page::Contact => view! { <ContactPage /> }.into_any(),
                }}
            </main>
            <AuthModal />
            <ToastHost />
        </div>
    }
}
