//! Application use cases. Orchestrate domain logic via ports.

pub mod auto_reply;
pub mod broadcast_service;
pub mod dispatcher;
pub mod message_service;

#[cfg(test)]
pub(crate) mod testing;

pub use auto_reply::AutoReplyService;
pub use broadcast_service::BroadcastService;
pub use dispatcher::Dispatcher;
pub use message_service::MessageService;
