//! Navigation state and the payloads published to hooks.

use crate::route::Route;
use std::sync::Arc;
use wayfare_core::{Params, Query};

/// Where the router is (or is going).
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    /// The route, `None` before the first successful navigation.
    pub route: Option<Arc<Route>>,
    /// Parameters captured from the path.
    pub params: Params,
    /// Query parameters.
    pub query: Query,
}

impl NavigationState {
    /// Whether `route` is the state's route (pointer identity).
    pub fn is_at(&self, route: &Arc<Route>) -> bool {
        self.route.as_ref().is_some_and(|r| Arc::ptr_eq(r, route))
    }

    /// The route's name, if any.
    pub fn route_name(&self) -> Option<&str> {
        self.route.as_deref().and_then(Route::name)
    }
}

/// Payload of every lifecycle hook.
///
/// Both states are snapshots taken when the navigation started; they are
/// not updated if another navigation commits in the meantime.
#[derive(Debug, Clone)]
pub struct Navigation {
    /// The location being resolved, as passed to `resolve`.
    pub path: String,
    /// State before the navigation.
    pub prev: NavigationState,
    /// State after the navigation.
    pub next: NavigationState,
}

/// Payload of `notFound` hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFound {
    /// The location that matched no route.
    pub path: String,
    /// Its query parameters.
    pub query: Query,
}

/// What a `resolve`/`navigate` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// `matches` routes matched and every navigation completed.
    Resolved {
        /// Number of matching routes.
        matches: usize,
    },
    /// No route matched; `notFound` hooks ran.
    NotFound,
    /// The target is already the current location; nothing ran.
    Unchanged,
}
