//! Send and Broadcast use cases. Implements the inbound `MessagingPort`.
//!
//! Composes: normalize -> resolve address -> render + resolve attachment -> dispatch.

use crate::domain::{
    AttachmentResolver, BroadcastRequest, BroadcastResult, DomainError, SendRequest, normalize,
    resolve_address,
};
use crate::ports::MessagingPort;
use crate::usecases::auto_reply::AutoReplyService;
use crate::usecases::broadcast_service::BroadcastService;
use crate::usecases::dispatcher::Dispatcher;
use std::sync::Arc;
use tracing::{error, info};

/// Message service. Entry point for the HTTP adapter.
pub struct MessageService {
    dispatcher: Arc<Dispatcher>,
    broadcast: BroadcastService,
    resolver: AttachmentResolver,
    auto_reply: AutoReplyService,
}

impl MessageService {
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        resolver: AttachmentResolver,
        auto_reply: AutoReplyService,
    ) -> Self {
        Self {
            broadcast: BroadcastService::new(Arc::clone(&dispatcher), resolver.clone()),
            dispatcher,
            resolver,
            auto_reply,
        }
    }
}

#[async_trait::async_trait]
impl MessagingPort for MessageService {
    async fn send(&self, request: SendRequest) -> Result<(), DomainError> {
        let address = resolve_address(&normalize(&request.recipient)?);
        let text = request.content.render();
        let attachment = self.resolver.resolve(&request.attachment);

        match self
            .dispatcher
            .dispatch(&address, &text, &attachment)
            .await
            .into_result()
        {
            Ok(to) => {
                info!(
                    to = %to,
                    attachment = attachment.kind(),
                    chars = text.chars().count(),
                    "message sent"
                );
                Ok(())
            }
            Err(e) => {
                error!(to = %address, error = %e, "send failed");
                Err(e)
            }
        }
    }

    async fn broadcast(&self, request: BroadcastRequest) -> BroadcastResult {
        info!(recipients = request.recipients.len(), "broadcast started");
        self.broadcast
            .broadcast(&request.recipients, &request.content, &request.attachment)
            .await
    }

    async fn handle_inbound(&self, from: &str, body: &str) -> Result<bool, DomainError> {
        self.auto_reply.handle_inbound(from, body).await
    }
}
