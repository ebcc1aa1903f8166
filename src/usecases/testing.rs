//! Test doubles for the outbound ports.

use crate::domain::{Address, DomainError};
use crate::ports::MessagingGateway;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentMessage {
    Text {
        to: String,
        text: String,
    },
    Media {
        to: String,
        path: PathBuf,
        caption: String,
    },
}

/// Records every send; fails for configured addresses. Tracks overlapping calls.
#[derive(Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<SentMessage>>,
    failures: HashMap<String, String>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(address: &str, reason: &str) -> Self {
        let mut gateway = Self::default();
        gateway
            .failures
            .insert(address.to_string(), reason.to_string());
        gateway
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn record(&self, to: &Address, message: SentMessage) -> Result<(), DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(reason) = self.failures.get(to.as_str()) {
            return Err(DomainError::Transport(reason.clone()));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

#[async_trait::async_trait]
impl MessagingGateway for RecordingGateway {
    async fn send_text(&self, address: &Address, text: &str) -> Result<(), DomainError> {
        let message = SentMessage::Text {
            to: address.to_string(),
            text: text.to_string(),
        };
        self.record(address, message).await
    }

    async fn send_media(
        &self,
        address: &Address,
        path: &Path,
        caption: &str,
    ) -> Result<(), DomainError> {
        let message = SentMessage::Media {
            to: address.to_string(),
            path: path.to_path_buf(),
            caption: caption.to_string(),
        };
        self.record(address, message).await
    }
}
