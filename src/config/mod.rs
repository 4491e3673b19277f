//! User configuration: the viewer's settings file and its defaults.
//!
//! Settings live in an INI file with three sections (`content`, `presenter`,
//! `cache`).  Loading never fails because the file is missing: the store is
//! created with all three sections and every recognized key gets its built-in
//! default unless the file already sets it.  Anything else in the file is
//! kept and written back on save.

pub mod path;
pub mod store;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use path::{path_to_config, ConfigEnv};
pub use store::{SettingsStore, StoreError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the home directory")]
    NoHomeDir,

    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but is not valid INI.  Defaults are not substituted.
    #[error("malformed config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

// ───────────────────────────────────────── defaults ──────────

/// Sections that always exist after loading.
pub const SECTIONS: [&str; 3] = ["content", "presenter", "cache"];

/// `(section, key, default)` for every recognized setting.
pub const DEFAULTS: &[(&str, &str, &str)] = &[
    ("cache", "maxpages", "200"),
    ("content", "xalign", "0.50"),
    ("content", "yalign", "0.50"),
    ("content", "monitor", "0"),
    ("content", "start_blanked", "off"),
    ("content", "start_fullscreen", "on"),
    ("presenter", "slide_ratio", "0.75"),
    ("presenter", "monitor", "1"),
    ("presenter", "start_fullscreen", "off"),
];

fn base_store() -> SettingsStore {
    let mut store = SettingsStore::new();
    for name in SECTIONS {
        store.ensure_section(name);
    }
    store
}

/// Fill in every recognized key the store does not already have.
fn inject_defaults(store: &mut SettingsStore) -> Result<(), StoreError> {
    for &(section, key, value) in DEFAULTS {
        if !store.has_option(section, key) {
            store.set(section, key, value)?;
        }
    }
    Ok(())
}

// ───────────────────────────────────────── typed views ───────

/// Settings for the audience-facing content window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentOptions {
    /// Horizontal alignment of the slide, 0.0 (left) to 1.0 (right).
    pub xalign: f64,
    /// Vertical alignment of the slide, 0.0 (top) to 1.0 (bottom).
    pub yalign: f64,
    pub monitor: usize,
    pub start_blanked: bool,
    pub start_fullscreen: bool,
}

/// Settings for the presenter window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresenterOptions {
    /// Fraction of the window width given to the current slide.
    pub slide_ratio: f64,
    pub monitor: usize,
    pub start_fullscreen: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    /// Maximum number of rendered pages kept in memory.
    pub maxpages: usize,
}

fn get_count(store: &SettingsStore, section: &str, key: &str) -> Result<usize, StoreError> {
    let n = store.get_int(section, key)?;
    usize::try_from(n).map_err(|_| StoreError::InvalidValue {
        section: section.to_string(),
        option: key.to_string(),
        value: n.to_string(),
        expected: "non-negative integer",
    })
}

// ───────────────────────────────────────── config ────────────

/// The loaded settings together with the file they belong to.
///
/// Constructed once at startup and passed by reference to whatever needs
/// it; there is no global instance.
#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    store: SettingsStore,
}

impl Config {
    /// A config bound to `path` holding only the built-in defaults.
    pub fn with_defaults(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let mut store = base_store();
        inject_defaults(&mut store)?;
        Ok(Self {
            path: path.into(),
            store,
        })
    }

    /// Read `path` (a missing file is fine) and fill in defaults.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let mut store = base_store();

        match fs::read_to_string(&path) {
            Ok(text) => {
                store.read_str(&text).map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?;
                tracing::debug!("loaded config from {}", path.display());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        }

        inject_defaults(&mut store)?;
        Ok(Self { path, store })
    }

    /// Write the store to `path`, replacing its contents.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source: io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        // The handle is dropped on every return path, including a failed write.
        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        self.store.write_to(&mut writer).map_err(io_err)?;
        writer.flush().map_err(io_err)?;

        tracing::debug!("saved config to {}", path.display());
        Ok(())
    }

    /// Write back to the file this config was loaded from.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SettingsStore {
        &mut self.store
    }

    pub fn get(&self, section: &str, key: &str) -> Result<String, ConfigError> {
        Ok(self.store.get(section, key)?)
    }

    pub fn get_raw(&self, section: &str, key: &str) -> Result<&str, ConfigError> {
        Ok(self.store.get_raw(section, key)?)
    }

    /// Set a value, creating the section if it does not exist yet.
    pub fn set(&mut self, section: &str, key: &str, value: &str) -> Result<(), ConfigError> {
        self.store.ensure_section(section);
        self.store.set(section, key, value)?;
        Ok(())
    }

    /// Remove a value.  A recognized key comes back as its default on the
    /// next load.
    pub fn unset(&mut self, section: &str, key: &str) -> Result<bool, ConfigError> {
        Ok(self.store.remove_option(section, key)?)
    }

    pub fn content(&self) -> Result<ContentOptions, ConfigError> {
        let s = &self.store;
        Ok(ContentOptions {
            xalign: s.get_float("content", "xalign")?,
            yalign: s.get_float("content", "yalign")?,
            monitor: get_count(s, "content", "monitor")?,
            start_blanked: s.get_bool("content", "start_blanked")?,
            start_fullscreen: s.get_bool("content", "start_fullscreen")?,
        })
    }

    pub fn presenter(&self) -> Result<PresenterOptions, ConfigError> {
        let s = &self.store;
        Ok(PresenterOptions {
            slide_ratio: s.get_float("presenter", "slide_ratio")?,
            monitor: get_count(s, "presenter", "monitor")?,
            start_fullscreen: s.get_bool("presenter", "start_fullscreen")?,
        })
    }

    pub fn cache(&self) -> Result<CacheOptions, ConfigError> {
        Ok(CacheOptions {
            maxpages: get_count(&self.store, "cache", "maxpages")?,
        })
    }
}

// ───────────────────────────────────────── persistence ───────

/// Resolve the settings path for `env` and load it.
pub fn load_config(env: &ConfigEnv) -> Result<Config, ConfigError> {
    Config::load_from(path_to_config(env)?)
}

/// Save `config` back to the file it was loaded from.
pub fn save_config(config: &Config) -> Result<(), ConfigError> {
    config.save()
}
