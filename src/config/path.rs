//! Where the settings file lives.
//!
//! POSIX keeps two historical locations, `~/.config/pympress` and the older
//! `~/.pympress`.  Whichever already exists wins so that upgrading never
//! silently starts a second file.  Windows uses `%APPDATA%\pympress.ini`.

use std::path::PathBuf;

use super::ConfigError;

/// Which family of path rules applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Posix,
    Windows,
}

impl OsFamily {
    pub fn current() -> Self {
        if cfg!(windows) {
            OsFamily::Windows
        } else {
            OsFamily::Posix
        }
    }
}

/// Inputs to path resolution, captured once from the process environment.
#[derive(Debug, Clone)]
pub struct ConfigEnv {
    pub family: OsFamily,
    pub home: Option<PathBuf>,
    pub appdata: Option<PathBuf>,
}

impl ConfigEnv {
    pub fn from_process() -> Self {
        Self {
            family: OsFamily::current(),
            home: std::env::var_os("HOME").map(PathBuf::from),
            appdata: std::env::var_os("APPDATA").map(PathBuf::from),
        }
    }

    /// POSIX rules rooted at `home`.
    pub fn posix(home: impl Into<PathBuf>) -> Self {
        Self {
            family: OsFamily::Posix,
            home: Some(home.into()),
            appdata: None,
        }
    }

    /// Windows rules rooted at `appdata`.
    pub fn windows(appdata: impl Into<PathBuf>) -> Self {
        Self {
            family: OsFamily::Windows,
            home: None,
            appdata: Some(appdata.into()),
        }
    }
}

/// Resolve the settings file path.
///
/// On POSIX the precedence is:
/// 1. `~/.config/pympress` if that file exists,
/// 2. `~/.pympress` if that file exists,
/// 3. `~/.config/pympress` if `~/.config` is a directory,
/// 4. `~/.pympress`.
pub fn path_to_config(env: &ConfigEnv) -> Result<PathBuf, ConfigError> {
    match env.family {
        OsFamily::Posix => {
            let home = env.home.as_ref().ok_or(ConfigError::NoHomeDir)?;
            let conf_dir = home.join(".config");
            let in_dir = conf_dir.join("pympress");
            let legacy = home.join(".pympress");

            let chosen = if in_dir.is_file() {
                in_dir
            } else if legacy.is_file() {
                legacy
            } else if conf_dir.is_dir() {
                in_dir
            } else {
                legacy
            };
            tracing::debug!("config path: {}", chosen.display());
            Ok(chosen)
        }
        OsFamily::Windows => {
            let appdata = env
                .appdata
                .as_ref()
                .ok_or(ConfigError::MissingEnv("APPDATA"))?;
            Ok(appdata.join("pympress.ini"))
        }
    }
}
