//! Persisted user preferences.
//!
//! Only the colour theme outlives a session. It lives in a small JSON
//! key-value file inside the data directory and is written with a temp file
//! plus rename so a crash never leaves a half-written file behind.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::fields::Theme;

pub const PREFERENCES_FILE: &str = "preferences.json";

/// Somewhere the theme choice can be read from and written to.
pub trait PreferenceStore: Send {
    /// The saved theme, if any.
    fn load_theme(&self) -> Option<Theme>;

    /// Remember `theme` for the next start.
    fn save_theme(&self, theme: Theme) -> std::io::Result<()>;
}

/// On-disk layout of the preferences file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Option<Theme>,
}

impl Preferences {
    /// Load preferences from JSON, falling back to defaults if the file is
    /// missing or unreadable.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Preferences::default();
        }
        let mut buf = String::new();
        match File::open(path).and_then(|mut f| f.read_to_string(&mut buf)) {
            Ok(_) => match serde_json::from_str(&buf) {
                Ok(prefs) => prefs,
                Err(e) => {
                    warn!(path = %path.display(), "Error parsing preferences, using defaults: {e}");
                    Preferences::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), "Error reading preferences, using defaults: {e}");
                Preferences::default()
            }
        }
    }

    /// Save preferences to JSON using an atomic write (temp file + rename).
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        let data = serde_json::to_string_pretty(self)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, path)?;
        Ok(())
    }
}

/// Preferences kept in `<data dir>/preferences.json`.
#[derive(Debug, Clone)]
pub struct JsonPreferences {
    path: PathBuf,
}

impl JsonPreferences {
    pub fn new(data_dir: &Path) -> Self {
        JsonPreferences {
            path: data_dir.join(PREFERENCES_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for JsonPreferences {
    fn load_theme(&self) -> Option<Theme> {
        Preferences::load(&self.path).theme
    }

    fn save_theme(&self, theme: Theme) -> std::io::Result<()> {
        let mut prefs = Preferences::load(&self.path);
        prefs.theme = Some(theme);
        prefs.save(&self.path)?;
        debug!(path = %self.path.display(), ?theme, "Saved theme preference");
        Ok(())
    }
}

/// Preferences that only live as long as the process. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    theme: Arc<Mutex<Option<Theme>>>,
}

impl MemoryPreferences {
    pub fn with_theme(theme: Theme) -> Self {
        MemoryPreferences {
            theme: Arc::new(Mutex::new(Some(theme))),
        }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load_theme(&self) -> Option<Theme> {
        self.theme.lock().ok().and_then(|t| *t)
    }

    fn save_theme(&self, theme: Theme) -> std::io::Result<()> {
        if let Ok(mut saved) = self.theme.lock() {
            *saved = Some(theme);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_has_no_theme() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = JsonPreferences::new(dir.path());
        assert_eq!(prefs.load_theme(), None);
    }

    #[test]
    fn test_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = JsonPreferences::new(&dir.path().join("nested"));
        prefs.save_theme(Theme::Light).unwrap();

        let reopened = JsonPreferences::new(&dir.path().join("nested"));
        assert_eq!(reopened.load_theme(), Some(Theme::Light));
        let raw = fs::read_to_string(reopened.path()).unwrap();
        assert!(raw.contains("\"light\""));
        assert!(!reopened.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = JsonPreferences::new(dir.path());
        fs::write(prefs.path(), "{not json").unwrap();
        assert_eq!(prefs.load_theme(), None);

        prefs.save_theme(Theme::Dark).unwrap();
        assert_eq!(prefs.load_theme(), Some(Theme::Dark));
    }

    #[test]
    fn test_memory_clones_share_state() {
        let prefs = MemoryPreferences::default();
        let handle = prefs.clone();
        prefs.save_theme(Theme::Light).unwrap();
        assert_eq!(handle.load_theme(), Some(Theme::Light));
    }
}
