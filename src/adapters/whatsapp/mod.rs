//! WhatsApp transport. Bridge client, dry-run gateway, media loading.

pub mod bridge_client;
pub mod dry_run;
pub mod media;

pub use bridge_client::WhatsAppBridge;
pub use dry_run::DryRunGateway;
