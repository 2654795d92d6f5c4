//! Error types for Wayfare.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`WayfareError`] - Top-level error type
//! - [`HookError`] - Outcome of a failed channel publish
//! - [`RouteError`] - Pattern compilation, path generation and location parsing
//! - [`RegistrationError`] - Malformed route or transition registrations
//! - [`NavigationError`] - Failures of a `resolve`/`navigate` call

use crate::Phase;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Wayfare operations.
#[derive(Error, Debug)]
pub enum WayfareError {
    /// A navigation failed.
    #[error("navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// A route or transition could not be registered.
    #[error("registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// A path could not be compiled, generated or parsed.
    #[error("route error: {0}")]
    Route(#[from] RouteError),
}

/// Why publishing to a channel did not succeed.
#[derive(Error, Debug)]
pub enum HookError {
    /// A hook returned [`HookOutcome::Cancel`](crate::HookOutcome::Cancel).
    #[error("hook cancelled the event")]
    Cancelled,

    /// A hook failed.
    #[error(transparent)]
    Failed(BoxError),
}

impl From<BoxError> for HookError {
    fn from(err: BoxError) -> Self {
        HookError::Failed(err)
    }
}

/// Errors raised by path patterns and locations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The path template could not be compiled.
    #[error("invalid path pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// The offending template.
        pattern: String,
        /// What went wrong.
        reason: String,
    },

    /// A parameter required by the template was not supplied.
    #[error("missing parameter `{name}` for path pattern `{pattern}`")]
    MissingParam {
        /// The template being generated.
        pattern: String,
        /// The missing parameter.
        name: String,
    },

    /// A supplied parameter does not satisfy the template.
    #[error("parameter `{name}` = `{value}` does not match `{expected}`")]
    InvalidParam {
        /// The parameter name.
        name: String,
        /// The value that was rejected.
        value: String,
        /// The pattern the value had to match.
        expected: String,
    },

    /// A location string could not be parsed.
    #[error("invalid location `{location}`: {reason}")]
    InvalidLocation {
        /// The rejected location.
        location: String,
        /// What went wrong.
        reason: String,
    },
}

/// Errors raised synchronously by `add_route`/`add_transition`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The route specification is malformed.
    #[error("invalid route: {0}")]
    InvalidRoute(String),

    /// A transition has no destination route.
    #[error("transition has no destination route")]
    MissingTarget,

    /// The route path failed to compile.
    #[error(transparent)]
    Pattern(#[from] RouteError),
}

/// Errors surfaced by a navigation.
#[derive(Error, Debug)]
pub enum NavigationError {
    /// A hook vetoed the navigation.
    #[error("navigation cancelled during {phase}")]
    Cancelled {
        /// The phase that was vetoed.
        phase: Phase,
    },

    /// A hook failed.
    #[error("handler failed during {phase}")]
    HandlerFailure {
        /// The phase whose hook failed.
        phase: Phase,
        /// The hook's error.
        #[source]
        source: BoxError,
    },

    /// A `notFound` hook cancelled or failed.
    #[error("not-found handler failed")]
    NotFoundHandler(#[source] HookError),

    /// The target path could not be generated or parsed.
    #[error(transparent)]
    Route(#[from] RouteError),
}

impl NavigationError {
    /// Attribute a channel failure to the phase it happened in.
    pub fn at_phase(phase: Phase, err: HookError) -> Self {
        match err {
            HookError::Cancelled => NavigationError::Cancelled { phase },
            HookError::Failed(source) => NavigationError::HandlerFailure { phase, source },
        }
    }

    /// Whether a hook vetoed the navigation (as opposed to failing).
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            NavigationError::Cancelled { .. }
                | NavigationError::NotFoundHandler(HookError::Cancelled)
        )
    }
}
