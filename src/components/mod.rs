pub mod app;
pub mod auth_modal;
pub mod contact;
pub mod estimator;
pub mod exercise;
pub mod home;
pub mod navbar;
pub mod toast;

use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

/// Smooth-scroll to an element by id; missing targets are ignored.
pub(crate) fn smooth_scroll_to(target_id: &str) {
    let Some(el) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(target_id))
    else {
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    el.scroll_into_view_with_scroll_into_view_options(&options);
}
