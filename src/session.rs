//! Session state store: the last-used selection and window position,
//! persisted across runs as a small TOML file.
//!
//! The contract is deliberately narrow — load once at startup, save once at
//! shutdown, always overwriting wholesale. Anything wrong with the file
//! (missing, unreadable, unparseable, or naming locations the catalog no
//! longer knows) falls back to the documented default selection rather than
//! failing startup.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logging;
use crate::model::{Selection, WindowPos};
use crate::regions;

/// What gets persisted between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub region: String,
    pub province: String,
    pub window: Option<WindowPos>,
}

impl SessionConfig {
    pub fn selection(&self) -> Selection {
        Selection::new(self.region.clone(), self.province.clone())
    }

    fn from_selection(selection: &Selection, window: Option<WindowPos>) -> Self {
        SessionConfig {
            region: selection.region.clone(),
            province: selection.province.clone(),
            window,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig::from_selection(&regions::default_selection(), None)
    }
}

/// Loads the session file, falling back to the default selection when the
/// file is absent, malformed, or names locations not in the catalog.
pub fn load(path: &Path) -> SessionConfig {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(_) => return SessionConfig::default(),
    };

    let config: SessionConfig = match toml::from_str(&text) {
        Ok(config) => config,
        Err(e) => {
            logging::warn(
                logging::Source::Config,
                None,
                &format!("session file unreadable, using defaults: {}", e),
            );
            return SessionConfig::default();
        }
    };

    // A stale selection (catalog changed, file edited by hand) must not
    // drive the source client to a nonsense URL.
    if !regions::validate_selection(&config.selection()) {
        logging::warn(
            logging::Source::Config,
            None,
            &format!(
                "saved selection '{} / {}' not in catalog, using defaults",
                config.region, config.province
            ),
        );
        return SessionConfig {
            window: config.window,
            ..SessionConfig::default()
        };
    }

    config
}

/// Saves the selection and window position, overwriting any prior state.
pub fn save(
    path: &Path,
    selection: &Selection,
    window: Option<WindowPos>,
) -> std::io::Result<()> {
    let config = SessionConfig::from_selection(selection, window);
    let text = toml::to_string(&config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    fs::write(path, text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(format!("covmon_session_{}_{}.toml", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_yields_default_selection() {
        let config = load(Path::new("/nonexistent/covmon.toml"));
        assert_eq!(config.selection(), regions::default_selection());
        assert_eq!(config.window, None);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let path = temp_path("round_trip");
        let selection = Selection::new("Veneto", "Padova");
        let window = Some(WindowPos { x: 120, y: 80 });
        save(&path, &selection, window).expect("save should succeed");

        let config = load(&path);
        assert_eq!(config.selection(), selection);
        assert_eq!(config.window, window);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let path = temp_path("overwrite");
        save(&path, &Selection::new("Veneto", "Padova"), Some(WindowPos { x: 1, y: 2 }))
            .unwrap();
        // Second save carries no window position; nothing merges through.
        save(&path, &Selection::new("Lazio", "Roma"), None).unwrap();

        let config = load(&path);
        assert_eq!(config.selection(), Selection::new("Lazio", "Roma"));
        assert_eq!(config.window, None);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_garbage_file_yields_default_selection() {
        let path = temp_path("garbage");
        fs::write(&path, "not = [valid toml").unwrap();
        let config = load(&path);
        assert_eq!(config.selection(), regions::default_selection());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unknown_location_falls_back_but_keeps_window() {
        let path = temp_path("unknown_location");
        fs::write(
            &path,
            "region = \"Padania\"\nprovince = \"Gotham\"\n\n[window]\nx = 10\ny = 20\n",
        )
        .unwrap();
        let config = load(&path);
        assert_eq!(config.selection(), regions::default_selection());
        assert_eq!(config.window, Some(WindowPos { x: 10, y: 20 }));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_whole_country_selection_persists() {
        let path = temp_path("whole_country");
        save(&path, &Selection::new("Italia", ""), None).unwrap();
        let config = load(&path);
        assert_eq!(config.selection(), Selection::new("Italia", ""));
        let _ = fs::remove_file(&path);
    }
}
