//! Single-recipient dispatch: exactly one transport call per invocation.
//!
//! No retry and no timeout here; both belong to the transport.

use crate::domain::{Address, AttachmentResolution, DispatchOutcome, DomainError};
use crate::ports::MessagingGateway;
use std::sync::Arc;
use tracing::{debug, warn};

/// Dispatcher. Picks media or text send based on the attachment classification.
pub struct Dispatcher {
    gateway: Arc<dyn MessagingGateway>,
}

impl Dispatcher {
    pub fn new(gateway: Arc<dyn MessagingGateway>) -> Self {
        Self { gateway }
    }

    /// Send `text` (as caption when media is attached) to `address`.
    pub async fn dispatch(
        &self,
        address: &Address,
        text: &str,
        attachment: &AttachmentResolution,
    ) -> DispatchOutcome {
        let result = match attachment.path() {
            Some(path) => self.gateway.send_media(address, path, text).await,
            None => self.gateway.send_text(address, text).await,
        };

        match result {
            Ok(()) => {
                debug!(address = %address, attachment = attachment.kind(), "dispatched");
                DispatchOutcome::success(address.clone())
            }
            Err(e) => {
                let reason = failure_reason(e);
                warn!(address = %address, error = %reason, "dispatch failed");
                DispatchOutcome::failed(address.clone(), reason)
            }
        }
    }
}

/// The collaborator's own message text, without our wrapping prefix.
fn failure_reason(error: DomainError) -> String {
    match error {
        DomainError::Transport(msg) | DomainError::DispatchFailed(msg) => msg,
        other => other.to_string(),
    }
}
