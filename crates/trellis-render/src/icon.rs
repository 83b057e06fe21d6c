//! Icon resources.
//!
//! An [`IconResource`] names an icon and says where its pixels come from.
//! Decoding and rasterisation belong to the rendering backend; widgets only
//! carry the resource and decide how large to draw it.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

// ============================================================================
// Icon Sources
// ============================================================================

/// Where the image data for an icon lives.
#[derive(Clone, PartialEq, Eq)]
pub enum IconSource {
    /// An icon from the backend's built-in theme set, looked up by name.
    Themed,
    /// An image file loaded by the backend on first draw.
    Path(PathBuf),
    /// Encoded image bytes held in memory.
    Bytes(Arc<[u8]>),
}

impl fmt::Debug for IconSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Themed => write!(f, "Themed"),
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
        }
    }
}

// ============================================================================
// Icon Resource
// ============================================================================

/// A named, cheaply clonable icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconResource {
    name: Arc<str>,
    source: IconSource,
}

impl IconResource {
    /// An icon from the backend's theme set.
    pub fn themed(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            source: IconSource::Themed,
        }
    }

    /// An icon loaded from a file. The file name doubles as the icon name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name: Arc<str> = path
            .file_stem()
            .map(|s| s.to_string_lossy().into())
            .unwrap_or_else(|| Arc::from(""));
        Self {
            name,
            source: IconSource::Path(path),
        }
    }

    /// An icon from encoded bytes already in memory.
    pub fn from_bytes(name: impl Into<Arc<str>>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            source: IconSource::Bytes(bytes.into()),
        }
    }

    /// The icon's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the icon's pixels come from.
    pub fn source(&self) -> &IconSource {
        &self.source
    }
}

/// Names of the themed icons the built-in widgets use.
pub mod names {
    /// Drop-down affordance of a select entry.
    pub const MENU_DROP_DOWN: &str = "menu-drop-down";
    pub const DOCUMENT_SAVE: &str = "document-save";
    pub const DOCUMENT_OPEN: &str = "document-open";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_icon_name() {
        let icon = IconResource::from_path("icons/save.png");
        assert_eq!(icon.name(), "save");
        assert!(matches!(icon.source(), IconSource::Path(_)));
    }

    #[test]
    fn test_bytes_debug_is_short() {
        let icon = IconResource::from_bytes("dot", vec![0u8; 64]);
        assert_eq!(format!("{:?}", icon.source()), "Bytes(64 bytes)");
    }
}
