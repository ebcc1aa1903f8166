//! Attachment path resolution and classification.
//!
//! Paths are resolved against a root directory but never checked for
//! existence here; a missing file fails at send time in the transport.

use std::path::{Path, PathBuf};

/// Subdirectory of the root where bare attachment filenames live.
pub const ASSETS_DIR: &str = "assets";

/// Caller-supplied attachment hints. At most one is used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentSpec {
    pub image_path: Option<String>,
    pub pdf_path: Option<String>,
}

impl AttachmentSpec {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn image(path: impl Into<String>) -> Self {
        Self {
            image_path: Some(path.into()),
            pdf_path: None,
        }
    }

    pub fn pdf(path: impl Into<String>) -> Self {
        Self {
            image_path: None,
            pdf_path: Some(path.into()),
        }
    }
}

/// The single media classification that accompanies a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentResolution {
    Image(PathBuf),
    Pdf(PathBuf),
    None,
}

impl AttachmentResolution {
    /// Resolved file path, if any media is attached.
    pub fn path(&self) -> Option<&Path> {
        match self {
            AttachmentResolution::Image(p) | AttachmentResolution::Pdf(p) => Some(p),
            AttachmentResolution::None => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AttachmentResolution::Image(_) => "image",
            AttachmentResolution::Pdf(_) => "pdf",
            AttachmentResolution::None => "none",
        }
    }
}

/// Resolves attachment hints against a working-directory root.
#[derive(Debug, Clone)]
pub struct AttachmentResolver {
    root: PathBuf,
}

impl AttachmentResolver {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Resolver rooted at the process working directory (falls back to `.`).
    pub fn from_current_dir() -> Self {
        Self::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Image hint wins over pdf hint; empty hints count as absent.
    pub fn resolve(&self, spec: &AttachmentSpec) -> AttachmentResolution {
        if let Some(image) = non_empty(&spec.image_path) {
            return AttachmentResolution::Image(self.resolve_path(image));
        }
        if let Some(pdf) = non_empty(&spec.pdf_path) {
            return AttachmentResolution::Pdf(self.resolve_path(pdf));
        }
        AttachmentResolution::None
    }

    /// Absolute paths pass through; paths with a separator are root-relative;
    /// bare filenames go under `assets/`.
    pub fn resolve_path(&self, hint: &str) -> PathBuf {
        let path = Path::new(hint);
        if path.is_absolute() {
            return path.to_path_buf();
        }
        if hint.contains('/') || hint.contains('\\') {
            return self.root.join(hint);
        }
        self.root.join(ASSETS_DIR).join(hint)
    }
}

fn non_empty(hint: &Option<String>) -> Option<&str> {
    hint.as_deref().filter(|s| !s.is_empty())
}
