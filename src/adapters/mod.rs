//! Infrastructure adapters. Implement and call the ports.
//!
//! WhatsApp bridge transport and the HTTP API. Map errors to DomainError.

pub mod http;
pub mod whatsapp;
