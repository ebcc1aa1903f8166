//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{Address, DomainError};
use std::path::Path;
use std::time::Duration;

/// Messaging network session. One instance is shared by every dispatch in the process.
///
/// Implementations must not be driven by overlapping calls from a single
/// broadcast; the coordinator awaits each send before starting the next.
#[async_trait::async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Send a plain text message to the chat.
    async fn send_text(&self, address: &Address, text: &str) -> Result<(), DomainError>;

    /// Send the file at `path` with `caption`. Fails if the file cannot be read.
    async fn send_media(
        &self,
        address: &Address,
        path: &Path,
        caption: &str,
    ) -> Result<(), DomainError>;
}

/// Lifecycle of the transport session: initialize once at startup, tear down on shutdown.
#[async_trait::async_trait]
pub trait SessionPort: Send + Sync {
    /// Resolve once the session can send, or fail after `timeout`.
    /// A timeout too large to represent means wait indefinitely.
    async fn wait_until_ready(&self, timeout: Duration) -> Result<(), DomainError>;

    /// Release the session. Best-effort; called once on shutdown.
    async fn close(&self) -> Result<(), DomainError>;
}
