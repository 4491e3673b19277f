//! Bundled assets: stylesheets and icon pixmaps.
//!
//! Assets live in a `share/` tree (`share/css`, `share/pixmaps`).  Where that
//! tree is depends on how the program was shipped, which is decided once at
//! startup into a [`ResourceLocator`]; nothing else branches on it.

pub mod icons;
pub mod style;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("resource not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl ResourceError {
    fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            ResourceError::NotFound(path.to_path_buf())
        } else {
            ResourceError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

// ───────────────────────────────────────── platform ──────────

/// Host OS as far as asset selection cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Other
        }
    }
}

// ───────────────────────────────────────── asset root ────────

/// Directory that contains `share/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetRoot {
    /// Installed package: assets under the install prefix.
    Installed(PathBuf),
    /// Packaged standalone build: assets next to the executable.
    Frozen(PathBuf),
}

impl AssetRoot {
    /// A `share/` directory beside the running executable means a packaged
    /// build; otherwise use the install prefix.
    pub fn detect() -> Self {
        if let Some(dir) = exe_dir() {
            if dir.join("share").is_dir() {
                return AssetRoot::Frozen(dir);
            }
        }
        AssetRoot::Installed(install_prefix())
    }

    pub fn base(&self) -> &Path {
        match self {
            AssetRoot::Installed(p) | AssetRoot::Frozen(p) => p,
        }
    }
}

/// `PYMPRESS_PREFIX` at build time, else the source tree (which ships `share/`).
fn install_prefix() -> PathBuf {
    option_env!("PYMPRESS_PREFIX")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")))
}

fn exe_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.parent().map(Path::to_path_buf)
}

// ───────────────────────────────────────── locator ───────────

/// Resolves asset paths for one asset root and platform.
#[derive(Debug, Clone)]
pub struct ResourceLocator {
    root: AssetRoot,
    platform: Platform,
}

impl ResourceLocator {
    pub fn new(root: AssetRoot, platform: Platform) -> Self {
        Self { root, platform }
    }

    pub fn detect() -> Self {
        let locator = Self::new(AssetRoot::detect(), Platform::current());
        tracing::debug!("asset root: {:?}", locator.root);
        locator
    }

    pub fn root(&self) -> &AssetRoot {
        &self.root
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn share_dir(&self) -> PathBuf {
        self.root.base().join("share")
    }

    pub fn css_dir(&self) -> PathBuf {
        self.share_dir().join("css")
    }

    pub fn pixmaps_dir(&self) -> PathBuf {
        self.share_dir().join("pixmaps")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_hang_off_the_root() {
        let locator = ResourceLocator::new(AssetRoot::Frozen("/opt/pympress".into()), Platform::Other);
        assert_eq!(locator.share_dir(), Path::new("/opt/pympress/share"));
        assert_eq!(locator.css_dir(), Path::new("/opt/pympress/share/css"));
        assert_eq!(locator.pixmaps_dir(), Path::new("/opt/pympress/share/pixmaps"));
    }

    #[test]
    fn detect_finds_an_asset_root_with_share() {
        // Test binaries run from target/, so this resolves to the install prefix.
        let root = AssetRoot::detect();
        assert!(root.base().join("share").is_dir(), "{root:?}");
    }

    #[test]
    fn not_found_io_errors_become_not_found() {
        let err = ResourceError::io(Path::new("x"), io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, ResourceError::NotFound(_)));
        let err = ResourceError::io(Path::new("x"), io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, ResourceError::Io { .. }));
    }
}
