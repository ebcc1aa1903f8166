//! Inbound port. The HTTP adapter calls into the application.

use crate::domain::{BroadcastRequest, BroadcastResult, DomainError, SendRequest};

/// Input port: Send and Broadcast operations.
#[async_trait::async_trait]
pub trait MessagingPort: Send + Sync {
    /// Send to one recipient. The first error aborts and is returned.
    async fn send(&self, request: SendRequest) -> Result<(), DomainError>;

    /// Send to every recipient in order. Per-recipient failures are recorded, never returned.
    async fn broadcast(&self, request: BroadcastRequest) -> BroadcastResult;

    /// Handle an inbound message forwarded by the transport. Returns true if a reply was sent.
    async fn handle_inbound(&self, from: &str, body: &str) -> Result<bool, DomainError>;
}
