//! Greeting auto-reply for inbound messages forwarded by the transport.

use crate::domain::{Address, AttachmentResolution, DomainError};
use crate::usecases::dispatcher::Dispatcher;
use std::sync::Arc;
use tracing::{debug, info};

/// Replies with a fixed text when an inbound message equals the trigger word.
pub struct AutoReplyService {
    dispatcher: Arc<Dispatcher>,
    trigger: String,
    /// `None` disables auto-reply.
    reply: Option<String>,
}

impl AutoReplyService {
    pub fn new(dispatcher: Arc<Dispatcher>, trigger: &str, reply: Option<String>) -> Self {
        Self {
            dispatcher,
            trigger: trigger.trim().to_lowercase(),
            reply,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.reply.is_some()
    }

    /// Returns true if a reply was sent.
    ///
    /// # Errors
    ///
    /// `InvalidIdentifier` if `from` is not a one-to-one chat id, `DispatchFailed` if the reply send fails.
    pub async fn handle_inbound(&self, from: &str, body: &str) -> Result<bool, DomainError> {
        let Some(reply) = self.reply.as_deref() else {
            return Ok(false);
        };
        if body.trim().to_lowercase() != self.trigger {
            debug!(from, "inbound message ignored");
            return Ok(false);
        }

        let address = Address::from_chat_id(from)?;
        let to = self
            .dispatcher
            .dispatch(&address, reply, &AttachmentResolution::None)
            .await
            .into_result()?;
        info!(to = %to, "auto-reply sent");
        Ok(true)
    }
}
