//! Shared types for the inventory client
//!
//! Wire-level models, response-envelope reconciliation, and small display
//! helpers used by both the client core and the terminal frontend.

pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
