use crate::controller::view::{Element, View};
use crate::core::theme_store::{Theme, ThemeStore};
use anyhow::Error;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

const LIGHT_SHEET_MARKER: &str = "light-mode";
const NIGHT_SHEET_MARKER: &str = "night-mode";

pub fn toggle_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "Switch to Night Mode",
        Theme::Night => "Switch to Light Mode",
    }
}

pub struct ThemeToggle<S, V> {
    store: S,
    view: Arc<V>,
    current: Mutex<Theme>,
}

impl<S: ThemeStore, V: View> ThemeToggle<S, V> {
    /// Read the stored preference once (light when absent) and apply it.
    pub fn start(store: S, view: Arc<V>) -> Self {
        let theme = store.load().unwrap_or_default();
        debug!("starting with {} theme", theme.as_str());
        let toggle = Self {
            store,
            view,
            current: Mutex::new(theme),
        };
        toggle.apply(theme);
        toggle
    }

    pub fn current(&self) -> Theme {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn toggle(&self) -> Result<Theme, Error> {
        let next = {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            *current = current.toggled();
            *current
        };
        self.apply(next);
        if let Err(e) = self.store.save(next) {
            warn!("failed to persist theme preference: {}", e);
            return Err(e);
        }
        Ok(next)
    }

    fn apply(&self, theme: Theme) {
        self.view.set_text(Element::ThemeToggle, toggle_label(theme));

        let Some(href) = self.view.href(Element::ThemeStylesheet) else {
            return;
        };
        let swapped = match theme {
            Theme::Night => href.replace(LIGHT_SHEET_MARKER, NIGHT_SHEET_MARKER),
            Theme::Light => href.replace(NIGHT_SHEET_MARKER, LIGHT_SHEET_MARKER),
        };
        if swapped != href {
            self.view.set_href(Element::ThemeStylesheet, &swapped);
        }
    }
}
