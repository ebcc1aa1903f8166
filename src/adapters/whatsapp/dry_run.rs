//! Dry-run gateway for running without a WhatsApp bridge.
//!
//! Logs what would be sent and succeeds. Media files are still loaded so a
//! missing attachment fails the same way it would in production.

use crate::adapters::whatsapp::media::MediaPayload;
use crate::domain::{Address, DomainError};
use crate::ports::{MessagingGateway, SessionPort};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Dry-run gateway. Never contacts a network.
#[derive(Debug, Default)]
pub struct DryRunGateway;

impl DryRunGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl MessagingGateway for DryRunGateway {
    async fn send_text(&self, address: &Address, text: &str) -> Result<(), DomainError> {
        info!(to = %address, text, "[DRY RUN] text message");
        Ok(())
    }

    async fn send_media(
        &self,
        address: &Address,
        path: &Path,
        caption: &str,
    ) -> Result<(), DomainError> {
        let media = MediaPayload::from_file(path).await?;
        info!(
            to = %address,
            path = %path.display(),
            mimetype = %media.mimetype,
            caption,
            "[DRY RUN] media message"
        );
        Ok(())
    }
}

#[async_trait::async_trait]
impl SessionPort for DryRunGateway {
    async fn wait_until_ready(&self, _timeout: Duration) -> Result<(), DomainError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
