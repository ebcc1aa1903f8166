//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod address;
pub mod attachment;
pub mod entities;
pub mod errors;
pub mod template;

pub use address::{Address, LocalNumber, normalize, resolve_address};
pub use attachment::{AttachmentResolution, AttachmentResolver, AttachmentSpec};
pub use entities::{
    BroadcastFailure, BroadcastRequest, BroadcastResult, DispatchOutcome, SendRequest,
};
pub use errors::DomainError;
pub use template::{ContentSource, TemplateContext, render_template};
