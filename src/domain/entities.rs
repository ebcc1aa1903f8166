//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP or transport types here. Adapters map into these.

use super::address::Address;
use super::attachment::AttachmentSpec;
use super::errors::DomainError;
use super::template::ContentSource;

/// One message to one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    /// Raw recipient as supplied by the caller.
    pub recipient: String,
    pub content: ContentSource,
    pub attachment: AttachmentSpec,
}

/// One message fanned out to many recipients, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastRequest {
    pub recipients: Vec<String>,
    pub content: ContentSource,
    pub attachment: AttachmentSpec,
}

/// Result of a single dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub address: Address,
    /// Transport failure reason; `None` on success.
    pub error: Option<String>,
}

impl DispatchOutcome {
    pub fn success(address: Address) -> Self {
        Self {
            address,
            error: None,
        }
    }

    pub fn failed(address: Address, reason: impl Into<String>) -> Self {
        Self {
            address,
            error: Some(reason.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Surface the failure as `DispatchFailed`, or return the address on success.
    pub fn into_result(self) -> Result<Address, DomainError> {
        match self.error {
            None => Ok(self.address),
            Some(reason) => Err(DomainError::DispatchFailed(reason)),
        }
    }
}

/// A recipient that could not be reached, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastFailure {
    /// Index of the recipient in the request list.
    pub position: usize,
    pub recipient: String,
    pub error: String,
}

/// Tally of a broadcast. `sent_count + failed_count` equals recipients attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastResult {
    pub sent_count: usize,
    pub failed_count: usize,
    pub failures: Vec<BroadcastFailure>,
}

impl BroadcastResult {
    pub fn record_sent(&mut self) {
        self.sent_count += 1;
    }

    pub fn record_failure(
        &mut self,
        position: usize,
        recipient: impl Into<String>,
        error: &DomainError,
    ) {
        self.failed_count += 1;
        self.failures.push(BroadcastFailure {
            position,
            recipient: recipient.into(),
            error: error.to_string(),
        });
    }

    pub fn attempted(&self) -> usize {
        self.sent_count + self.failed_count
    }
}
