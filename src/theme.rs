//! Light/dark theme state: persisted in localStorage, applied as a
//! `data-theme` attribute on the document root. Light is the absence of the
//! attribute, matching the stylesheet's selectors.

pub const STORAGE_KEY: &str = "theme";
pub const ROOT_ATTR: &str = "data-theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Unknown or missing values fall back to light.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Navbar logo asset for this theme.
    pub fn logo_src(self) -> &'static str {
        match self {
            Self::Light => "/static/users/logo.svg",
            Self::Dark => "/static/users/logo-dark.svg",
        }
    }

    /// Icon class on the toggle button (shows the theme you would switch to).
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Self::Light => "bi bi-moon-fill",
            Self::Dark => "bi bi-sun-fill",
        }
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Saved preference, defaulting to light when storage is unavailable.
pub fn load() -> Theme {
    let saved = local_storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
    Theme::parse(saved.as_deref())
}

pub fn store(theme: Theme) {
    if let Some(storage) = local_storage() {
        if storage.set_item(STORAGE_KEY, theme.as_str()).is_err() {
            log::warn!("Could not persist theme preference");
        }
    }
}

/// Reflect the theme onto the document root. Chart recoloring hangs off a
/// mutation observer watching this attribute (see `chart::manager`).
pub fn apply(theme: Theme) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    let result = match theme {
        Theme::Dark => root.set_attribute(ROOT_ATTR, "dark"),
        Theme::Light => root.remove_attribute(ROOT_ATTR),
    };
    if result.is_err() {
        log::warn!("Could not apply theme attribute");
    }
}

/// Startup hook: re-apply whatever the last visit chose.
pub fn apply_saved_theme() {
    apply(load());
}

/// Current theme as the document reports it.
pub fn current() -> Theme {
    let attr = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .and_then(|root| root.get_attribute(ROOT_ATTR));
    Theme::parse(attr.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recognizes_dark_only() {
        assert_eq!(Theme::parse(Some("dark")), Theme::Dark);
        assert_eq!(Theme::parse(Some("light")), Theme::Light);
        assert_eq!(Theme::parse(Some("solarized")), Theme::Light);
        assert_eq!(Theme::parse(None), Theme::Light);
    }

    #[test]
    fn toggle_flips_both_ways() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn as_str_matches_storage_values() {
        assert_eq!(Theme::parse(Some(Theme::Dark.as_str())), Theme::Dark);
        assert_eq!(Theme::parse(Some(Theme::Light.as_str())), Theme::Light);
    }

    #[test]
    fn dark_logo_differs_from_light() {
        assert_ne!(Theme::Light.logo_src(), Theme::Dark.logo_src());
    }
}
