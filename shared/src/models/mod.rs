//! Data models
//!
//! Wire-format types for the inventory API. Field names match the JSON
//! the backend produces. The backend is loose about scalar types: ids and
//! prices may arrive as numbers or numeric strings.

pub mod product;

// Re-exports
pub use product::*;
