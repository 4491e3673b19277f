//! Stylesheet lookup.

use std::path::PathBuf;

use super::{Platform, ResourceError, ResourceLocator};

pub const DEFAULT_STYLESHEET: &str = "default.css";
pub const MACOS_STYLESHEET: &str = "macos.css";

/// A loaded stylesheet and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    pub path: PathBuf,
    pub css: String,
}

impl Platform {
    pub fn stylesheet_name(self) -> &'static str {
        match self {
            Platform::MacOs => MACOS_STYLESHEET,
            Platform::Other => DEFAULT_STYLESHEET,
        }
    }
}

impl ResourceLocator {
    pub fn stylesheet_path(&self) -> PathBuf {
        self.css_dir().join(self.platform().stylesheet_name())
    }

    /// Load the platform's stylesheet.  A missing sheet is an error; there is
    /// no fallback to the other variant.
    pub fn stylesheet(&self) -> Result<Stylesheet, ResourceError> {
        let path = self.stylesheet_path();
        let css = std::fs::read_to_string(&path).map_err(|e| ResourceError::io(&path, e))?;
        Ok(Stylesheet { path, css })
    }
}
