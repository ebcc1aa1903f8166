//! wa-dispatch: WhatsApp message sender for local numbers with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
