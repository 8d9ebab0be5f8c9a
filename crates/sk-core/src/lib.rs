//! stackit/crates/sk-core/src/lib.rs
//!
//! The central domain logic and interface definitions for StackIt.

pub mod error;
pub mod forms;
pub mod models;
pub mod password;
pub mod session;
pub mod sorting;
pub mod tags;
pub mod toast;
pub mod traits;
pub mod views;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;
