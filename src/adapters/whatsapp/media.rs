//! Load an attachment from disk into the bridge's media payload.
//!
//! This is where a missing attachment file is first noticed.

use crate::domain::DomainError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::Path;

/// Base64 media body, shaped like whatsapp-web.js `MessageMedia`.
#[derive(Debug, Clone, Serialize)]
pub struct MediaPayload {
    pub mimetype: String,
    pub data: String,
    pub filename: String,
}

impl MediaPayload {
    pub async fn from_file(path: &Path) -> Result<Self, DomainError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DomainError::Transport(format!(
                    "file not found: {}",
                    path.display()
                )));
            }
            Err(e) => {
                return Err(DomainError::Transport(format!(
                    "read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            mimetype: mime_for_path(path).to_string(),
            data: STANDARD.encode(bytes),
            filename,
        })
    }
}

/// Mimetype from the file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}
