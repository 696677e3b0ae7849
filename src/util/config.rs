//! Settings file handling and on-disk paths.
//!
//! Swapsea keeps everything under `~/.config/swapsea/`: a TOML settings
//! file, the persisted bearer token, and the log directory. Settings are
//! read once at startup and merged with CLI overrides.

use std::fs;
use std::path::PathBuf;

use crate::state::SortKey;

/// API base URL used when neither settings nor CLI provide one.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Page size used when the settings file does not set one.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// What: Resolve (and create) the Swapsea configuration directory.
///
/// Output:
/// - `$XDG_CONFIG_HOME/swapsea` or `$HOME/.config/swapsea`; falls back to
///   the current directory when neither variable is set.
#[must_use]
pub fn config_dir() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME").map_or_else(
        || {
            std::env::var_os("HOME").map_or_else(|| PathBuf::from("."), |h| {
                let mut p = PathBuf::from(h);
                p.push(".config");
                p
            })
        },
        PathBuf::from,
    );
    let mut dir = base;
    dir.push("swapsea");
    let _ = fs::create_dir_all(&dir);
    dir
}

/// What: Resolve (and create) the log directory.
#[must_use]
pub fn logs_dir() -> PathBuf {
    let mut dir = config_dir();
    dir.push("logs");
    let _ = fs::create_dir_all(&dir);
    dir
}

/// Path of the persisted bearer token.
#[must_use]
pub fn token_path() -> PathBuf {
    let mut p = config_dir();
    p.push("token");
    p
}

/// What: Load the persisted bearer token, if one exists.
///
/// Output: The trimmed token, or `None` when absent or empty.
#[must_use]
pub fn load_token(path: &std::path::Path) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    let t = raw.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

/// What: Persist the bearer token for the next session.
pub fn save_token(path: &std::path::Path, token: &str) {
    if let Err(e) = fs::write(path, token) {
        tracing::warn!(error = %e, path = %path.display(), "failed to persist token");
    }
}

/// What: Forget the persisted token (logout).
pub fn forget_token(path: &std::path::Path) {
    let _ = fs::remove_file(path);
}

/// User-tunable settings read from `settings.toml`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Remote API base URL.
    pub api_url: String,
    /// Listings per page in the Browse view.
    pub page_size: usize,
    /// Default sort key (settings string form).
    pub sort: String,
    /// Default status filter; empty shows every status.
    pub status_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            sort: SortKey::Newest.as_config_key().to_string(),
            status_filter: "available".to_string(),
        }
    }
}

impl Settings {
    /// What: Load settings from the config dir, tolerating absence.
    ///
    /// Output:
    /// - Parsed settings, or defaults when the file is missing or invalid
    ///   (a malformed file is reported via tracing, never a crash).
    #[must_use]
    pub fn load() -> Self {
        let mut path = config_dir();
        path.push("settings.toml");
        Self::load_from(&path)
    }

    /// Load settings from an explicit path; used directly by tests.
    #[must_use]
    pub fn load_from(path: &std::path::Path) -> Self {
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<Self>(&raw) {
                Ok(s) => s,
                Err(e) => {
                    tracing::warn!(error = %e, "settings.toml is invalid; using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Sort key in its typed form.
    #[must_use]
    pub fn sort_key(&self) -> SortKey {
        SortKey::from_config_key(&self.sort)
    }
}
