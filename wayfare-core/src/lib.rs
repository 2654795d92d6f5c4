//! # wayfare-core
//!
//! Core traits for the Wayfare navigation coordinator.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! history adapters and hook libraries that don't need the full router.
//!
//! # Building Blocks
//!
//! - [`Hook`] / [`DynHook`]: async lifecycle hooks returning a [`HookOutcome`]
//! - [`IntoOutcome`]: lets plain closures return `()`, `bool` or `Result`
//! - [`History`]: the history sink a router writes committed locations to
//! - [`Phase`], [`NavigationMethod`], [`Params`], [`Query`]: navigation vocabulary
//!
//! # Error Types
//!
//! - [`WayfareError`] - Top-level error type
//! - [`NavigationError`] - Failures of a navigation
//! - [`RegistrationError`] - Malformed registrations
//! - [`RouteError`] - Path pattern and location errors
//! - [`HookError`] - Channel publish failures

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod history;
mod hook;
mod message;
mod navigation;
mod response;

// Re-exports
pub use error::{
    BoxError, HookError, NavigationError, RegistrationError, RouteError, WayfareError,
};
pub use history::History;
pub use hook::{DynHook, Hook, HookOutcome};
pub use message::Message;
pub use navigation::{NavigationMethod, Params, Phase, Query};
pub use response::IntoOutcome;
