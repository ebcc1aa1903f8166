//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by the HTTP adapter into the application
//! - Outbound: Called by the application into the messaging transport

pub mod inbound;
pub mod outbound;

pub use inbound::MessagingPort;
pub use outbound::{MessagingGateway, SessionPort};
