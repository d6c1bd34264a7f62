use anyhow::Error;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::warn;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Night,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Night,
            Theme::Night => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Night => "night",
        }
    }
}

/// Single persisted preference key.
pub trait ThemeStore: Send + Sync {
    fn load(&self) -> Option<Theme>;
    fn save(&self, theme: Theme) -> Result<(), Error>;
}

impl<T: ThemeStore + ?Sized> ThemeStore for Arc<T> {
    fn load(&self) -> Option<Theme> {
        (**self).load()
    }

    fn save(&self, theme: Theme) -> Result<(), Error> {
        (**self).save(theme)
    }
}

#[derive(Serialize, Deserialize)]
struct StoredPreference {
    theme: Theme,
}

pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Option<Theme> {
        let raw = std::fs::read(&self.path).ok()?;
        match serde_json::from_slice::<StoredPreference>(&raw) {
            Ok(stored) => Some(stored.theme),
            Err(e) => {
                warn!("ignoring unreadable theme preference {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn save(&self, theme: Theme) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let body = serde_json::to_vec(&StoredPreference { theme })?;
        std::fs::write(&self.path, body)?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryThemeStore {
    slot: Mutex<Option<Theme>>,
}

impl MemoryThemeStore {
    pub fn with(theme: Theme) -> Self {
        Self {
            slot: Mutex::new(Some(theme)),
        }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Option<Theme> {
        *self.slot.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn save(&self, theme: Theme) -> Result<(), Error> {
        *self.slot.lock().unwrap_or_else(|p| p.into_inner()) = Some(theme);
        Ok(())
    }
}
