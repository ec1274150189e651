//! Shared types for the outlet ordering engine
//!
//! Data models, the client-held cart, and the wire-level error reply
//! consumed by both the engine crate and the route handlers in front of it.

pub mod cart;
pub mod error;
pub mod models;

// Re-exports
pub use cart::{Cart, CartLine};
pub use error::{ErrorCode, ErrorReply};
pub use serde::{Deserialize, Serialize};
