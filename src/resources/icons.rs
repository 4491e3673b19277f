//! Application icons from `share/pixmaps`.

use std::path::{Path, PathBuf};

use image::{ImageReader, RgbaImage};
use walkdir::WalkDir;

use super::{ResourceError, ResourceLocator};

/// Every bundled icon file name starts with this.
pub const ICON_PREFIX: &str = "pympress-";

/// A decoded icon.
#[derive(Debug, Clone)]
pub struct Icon {
    pub name: String,
    pub image: RgbaImage,
}

/// `pympress-*.png`, extension compared case-insensitively.
pub fn is_icon_name(name: &str) -> bool {
    name.starts_with(ICON_PREFIX)
        && Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

impl ResourceLocator {
    pub fn icon_path(&self, name: &str) -> PathBuf {
        self.pixmaps_dir().join(name)
    }

    /// Icon file names in the pixmaps directory, sorted.
    pub fn list_icons(&self) -> Result<Vec<String>, ResourceError> {
        let dir = self.pixmaps_dir();
        if !dir.is_dir() {
            return Err(ResourceError::NotFound(dir));
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| ResourceError::io(&dir, e.into()))?;
            if entry.file_type().is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str().filter(|n| is_icon_name(n)) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Decode one icon.  The format is sniffed from the file contents.
    pub fn load_icon(&self, name: &str) -> Result<Icon, ResourceError> {
        let path = self.icon_path(name);
        let reader = ImageReader::open(&path)
            .and_then(|r| r.with_guessed_format())
            .map_err(|e| ResourceError::io(&path, e))?;
        let image = reader
            .decode()
            .map_err(|source| ResourceError::Image {
                path: path.clone(),
                source,
            })?
            .to_rgba8();
        Ok(Icon {
            name: name.to_string(),
            image,
        })
    }

    /// Load every listed icon.  Icons that fail to load are logged and left
    /// out; only a failure to list the directory is returned.
    pub fn load_icons(&self) -> Result<Vec<Icon>, ResourceError> {
        let mut icons = Vec::new();
        for name in self.list_icons()? {
            match self.load_icon(&name) {
                Ok(icon) => icons.push(icon),
                Err(e) => tracing::warn!("error loading icon {name}: {e}"),
            }
        }
        Ok(icons)
    }
}
