//! # wayfare-std
//!
//! Standard implementations for the Wayfare navigation coordinator.
//!
//! This crate provides:
//! - **Hook bus**: [`EventBus`], [`Channel`]
//! - **Path templates**: [`PathPattern`], [`PatternOptions`]
//! - **Locations**: [`Location`]
//! - **History sinks**: [`MemoryHistory`]
//! - **Standard hooks**: [`LoggingHook`]
//! - **Testing utilities**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use wayfare_core;

// Modules
pub mod bus;
pub mod history;
pub mod hooks;
pub mod location;
pub mod pattern;
pub mod testing;

pub use bus::{Channel, EventBus, SharedHook};
pub use history::MemoryHistory;
pub use hooks::LoggingHook;
pub use location::Location;
pub use pattern::{PathPattern, PatternOptions};
