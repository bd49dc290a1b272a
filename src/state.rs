use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::theme::{self, Theme};
use crate::types::{ScoreSeries, SongRef};
use crate::upload::PracticeTake;

/// Top-level pages of the site.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Home,
    Estimator,
    Exercise,
    Contact,
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "خانه",
            Self::Estimator => "تخمین قیمت",
            Self::Exercise => "تمرین",
            Self::Contact => "درباره ما",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthTab {
    #[default]
    Signup,
    Signin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub id: u32,
    pub title: String,
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Clone, Copy)]
pub struct AppState {
    pub page: RwSignal<Page>,
    pub theme: RwSignal<Theme>,

    pub auth_open: RwSignal<bool>,
    pub auth_tab: RwSignal<AuthTab>,

    /// Selectable reference pieces on the exercise page.
    pub songs: RwSignal<Vec<SongRef>>,
    /// Reference id of the selected card; `None` means nothing selected.
    pub selected_reference: RwSignal<Option<String>>,
    /// Locally picked practice recording (object URL + name).
    pub practice_take: RwSignal<Option<PracticeTake>>,
    /// Score chart series for the selected exercise.
    pub series: RwSignal<ScoreSeries>,
    pub metrics_loading: RwSignal<bool>,

    pub toasts: RwSignal<Vec<Toast>>,
    toast_seq: RwSignal<u32>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            page: RwSignal::new(Page::default()),
            theme: RwSignal::new(theme::load()),
            auth_open: RwSignal::new(false),
            auth_tab: RwSignal::new(AuthTab::default()),
            songs: RwSignal::new(Vec::new()),
            selected_reference: RwSignal::new(None),
            practice_take: RwSignal::new(None),
            series: RwSignal::new(ScoreSeries::default()),
            metrics_loading: RwSignal::new(false),
            toasts: RwSignal::new(Vec::new()),
            toast_seq: RwSignal::new(0),
        }
    }

    pub fn toggle_theme(&self) {
        let next = self.theme.get_untracked().toggled();
        theme::store(next);
        theme::apply(next);
        self.theme.set(next);
    }

    fn push_toast(&self, title: &str, message: impl Into<String>, kind: ToastKind) -> u32 {
        let id = self.toast_seq.get_untracked().wrapping_add(1);
        self.toast_seq.set(id);
        self.toasts.update(|toasts| {
            toasts.push(Toast {
                id,
                title: title.to_string(),
                message: message.into(),
                kind,
            });
        });
        schedule_toast_dismiss(*self, id);
        id
    }

    pub fn show_success_toast(&self, title: &str, message: impl Into<String>) -> u32 {
        self.push_toast(title, message, ToastKind::Success)
    }

    pub fn show_error_toast(&self, title: &str, message: impl Into<String>) -> u32 {
        self.push_toast(title, message, ToastKind::Error)
    }

    pub fn dismiss_toast(&self, id: u32) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }
}

const TOAST_DISMISS_MS: i32 = 4000;

fn schedule_toast_dismiss(state: AppState, id: u32) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(move || state.dismiss_toast(id));
    if window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            TOAST_DISMISS_MS,
        )
        .is_err()
    {
        log::warn!("Toast auto-dismiss timer failed");
    }
}
