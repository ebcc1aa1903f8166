//! Broadcast fan-out: one message, many recipients, failures isolated per recipient.
//!
//! - Content is rendered once and the attachment resolved once for the whole batch
//! - Recipients are attempted strictly in order, one dispatch in flight at a time
//! - A failing recipient is recorded and iteration continues

use crate::domain::{
    AttachmentResolver, AttachmentSpec, BroadcastResult, ContentSource, normalize,
    resolve_address,
};
use crate::usecases::dispatcher::Dispatcher;
use std::sync::Arc;
use tracing::{info, warn};

/// Broadcast coordinator. Drives the dispatcher over a recipient list.
pub struct BroadcastService {
    dispatcher: Arc<Dispatcher>,
    resolver: AttachmentResolver,
}

impl BroadcastService {
    pub fn new(dispatcher: Arc<Dispatcher>, resolver: AttachmentResolver) -> Self {
        Self {
            dispatcher,
            resolver,
        }
    }

    /// Attempt every recipient and return the tally. Never fails once started.
    pub async fn broadcast(
        &self,
        recipients: &[String],
        content: &ContentSource,
        attachment: &AttachmentSpec,
    ) -> BroadcastResult {
        let text = content.render();
        let attachment = self.resolver.resolve(attachment);
        let mut result = BroadcastResult::default();

        for (position, recipient) in recipients.iter().enumerate() {
            let address = match normalize(recipient) {
                Ok(number) => resolve_address(&number),
                Err(e) => {
                    warn!(recipient = %recipient, error = %e, "skipping recipient");
                    result.record_failure(position, recipient.as_str(), &e);
                    continue;
                }
            };

            match self
                .dispatcher
                .dispatch(&address, &text, &attachment)
                .await
                .into_result()
            {
                Ok(_) => result.record_sent(),
                Err(e) => {
                    warn!(recipient = %recipient, error = %e, "failed to send");
                    result.record_failure(position, recipient.as_str(), &e);
                }
            }
        }

        info!(
            sent = result.sent_count,
            failed = result.failed_count,
            attachment = attachment.kind(),
            "broadcast complete"
        );
        result
    }
}
