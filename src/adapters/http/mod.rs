//! HTTP boundary (axum). Routes, shared-secret gate, DTOs, error mapping.

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;

pub use router::{AppState, build_router};
