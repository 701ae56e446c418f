//! # Command System
//!
//! Keyword intent dispatch for spoken or typed commands.
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Ordered keyword intents with first-match-wins dispatch
//! - 2.1.0: Add modular handler infrastructure (handler trait, context, registry)
//! - 1.0.0: Initial reorganization with modular command structure

pub mod context;
pub mod handler;
pub mod handlers;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

pub use context::CommandContext;
pub use handler::IntentHandler;
pub use handlers::{create_all_handlers, default_registry};
pub use registry::{IntentRegistry, HANDLER_FAILURE_REPLY};
