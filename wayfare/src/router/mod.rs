//! The navigation coordinator.
//!
//! A [`Router`] owns the route and transition registries, the current
//! [`NavigationState`] and a history sink. Navigations are driven by
//! [`Router::resolve`]; every matching route gets its own task that runs
//! the lifecycle
//!
//! ```text
//! start -> leave -> beforeEnter -> (commit) -> enter -> complete
//! ```
//!
//! where each phase publishes the router's channel, the transition's
//! channel and (for `leave`, `beforeEnter`, `enter`) the route's channel
//! together. A phase moves on once all of them proceed and stops the task
//! as soon as one of them cancels or fails.
//!
//! # Example
//!
//! ```rust,ignore
//! let history = Arc::new(MemoryHistory::new("/"));
//! let router = Router::builder(Arc::clone(&history))
//!     .on_not_found(|missing: NotFound| async move { eprintln!("404 {}", missing.path) })
//!     .build();
//!
//! router.add_route(RouteSpec::new("/").name("index"))?;
//! router.add_route(RouteSpec::new("/article/:id").name("article"))?;
//!
//! router.start().await?;
//! router
//!     .navigate("article", NavigateOptions::new().param("id", 1))
//!     .await?;
//! ```

mod navigate;
mod registry;
mod resolve;

pub use navigate::{NavigateOptions, NavigateTarget};

use crate::state::{Navigation, NavigationState, NotFound};
use parking_lot::RwLock;
use std::{fmt, sync::Arc};
use wayfare_core::{Hook, History, Params, Phase, Query};
use wayfare_std::{Channel, EventBus, SharedHook};

use crate::{route::Route, transition::Transition};

/// Coordinates navigations between registered routes.
pub struct Router {
    routes: RwLock<Vec<Arc<Route>>>,
    transitions: RwLock<Vec<Arc<Transition>>>,
    state: RwLock<NavigationState>,
    hooks: EventBus<Phase, Navigation>,
    not_found: Channel<NotFound>,
    history: Arc<dyn History>,
}

impl Router {
    /// Create a router writing to `history`, with no hooks.
    pub fn new<H: History>(history: H) -> Self {
        RouterBuilder::new(history).build()
    }

    /// Start building a router with hooks attached up front.
    pub fn builder<H: History>(history: H) -> RouterBuilder {
        RouterBuilder::new(history)
    }

    /// The router-wide lifecycle channels.
    pub fn hooks(&self) -> &EventBus<Phase, Navigation> {
        &self.hooks
    }

    /// The `notFound` channel.
    pub fn not_found(&self) -> &Channel<NotFound> {
        &self.not_found
    }

    /// The history sink.
    pub fn history(&self) -> &Arc<dyn History> {
        &self.history
    }

    /// A snapshot of the current navigation state.
    pub fn current(&self) -> NavigationState {
        self.state.read().clone()
    }

    /// The current route, `None` before the first navigation.
    pub fn current_route(&self) -> Option<Arc<Route>> {
        self.state.read().route.clone()
    }

    /// Parameters of the current route.
    pub fn current_params(&self) -> Params {
        self.state.read().params.clone()
    }

    /// Query of the current location.
    pub fn current_query(&self) -> Query {
        self.state.read().query.clone()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes.read().len())
            .field("transitions", &self.transitions.read().len())
            .field("current", &self.state.read().route)
            .field("hooks", &self.hooks)
            .field("not_found", &self.not_found)
            .finish_non_exhaustive()
    }
}

/// Builder for a [`Router`] with router-wide hooks.
///
/// # Example
///
/// ```rust,ignore
/// let router = Router::builder(MemoryHistory::default())
///     .on_before_enter(|nav: Navigation| async move { is_authorised(&nav) })
///     .on_enter(LoggingHook::named("router.enter"))
///     .build();
/// ```
pub struct RouterBuilder {
    history: Arc<dyn History>,
    hooks: Vec<(Phase, SharedHook<Navigation>)>,
    not_found: Vec<SharedHook<NotFound>>,
}

impl RouterBuilder {
    /// A builder writing to `history`.
    pub fn new<H: History>(history: H) -> Self {
        Self {
            history: Arc::new(history),
            hooks: Vec::new(),
            not_found: Vec::new(),
        }
    }

    /// Add a router-wide hook for `phase`.
    pub fn on<H: Hook<Navigation>>(mut self, phase: Phase, hook: H) -> Self {
        let hook: SharedHook<Navigation> = Arc::new(hook);
        self.hooks.push((phase, hook));
        self
    }

    /// Add a `start` hook.
    pub fn on_start<H: Hook<Navigation>>(self, hook: H) -> Self {
        self.on(Phase::Start, hook)
    }

    /// Add a `leave` hook.
    pub fn on_leave<H: Hook<Navigation>>(self, hook: H) -> Self {
        self.on(Phase::Leave, hook)
    }

    /// Add a `beforeEnter` hook.
    pub fn on_before_enter<H: Hook<Navigation>>(self, hook: H) -> Self {
        self.on(Phase::BeforeEnter, hook)
    }

    /// Add an `enter` hook.
    pub fn on_enter<H: Hook<Navigation>>(self, hook: H) -> Self {
        self.on(Phase::Enter, hook)
    }

    /// Add a `complete` hook.
    pub fn on_complete<H: Hook<Navigation>>(self, hook: H) -> Self {
        self.on(Phase::Complete, hook)
    }

    /// Add a `notFound` hook.
    pub fn on_not_found<H: Hook<NotFound>>(mut self, hook: H) -> Self {
        let hook: SharedHook<NotFound> = Arc::new(hook);
        self.not_found.push(hook);
        self
    }

    /// Build the router.
    pub fn build(self) -> Router {
        let router = Router {
            routes: RwLock::new(Vec::new()),
            transitions: RwLock::new(Vec::new()),
            state: RwLock::new(NavigationState::default()),
            hooks: EventBus::new(),
            not_found: Channel::new(),
            history: self.history,
        };
        for (phase, hook) in self.hooks {
            router.hooks.subscribe_shared(phase, hook);
        }
        for hook in self.not_found {
            router.not_found.subscribe_shared(hook);
        }
        router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfare_std::testing::{RecordingHistory, RecordingHook};

    #[test]
    fn test_builder_attaches_hooks() {
        let router = Router::builder(RecordingHistory::new("/"))
            .on_start(RecordingHook::<Navigation>::new())
            .on_leave(RecordingHook::<Navigation>::new())
            .on_before_enter(RecordingHook::<Navigation>::new())
            .on_enter(RecordingHook::<Navigation>::new())
            .on_enter(RecordingHook::<Navigation>::new())
            .on_complete(RecordingHook::<Navigation>::new())
            .on_not_found(RecordingHook::<NotFound>::new())
            .build();

        assert_eq!(router.hooks().handler_count(Phase::Start), 1);
        assert_eq!(router.hooks().handler_count(Phase::Enter), 2);
        assert_eq!(router.not_found().len(), 1);
    }

    #[test]
    fn test_initial_state_is_empty() {
        let router = Router::new(RecordingHistory::new("/"));
        let state = router.current();

        assert!(state.route.is_none());
        assert!(state.params.is_empty());
        assert!(state.query.is_empty());
        assert!(router.current_route().is_none());
        assert!(router.routes().is_empty());
        assert!(Phase::ALL
            .iter()
            .all(|phase| router.hooks().handler_count(*phase) == 0));
        assert!(router.not_found().is_empty());
    }
}
