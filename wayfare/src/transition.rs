//! Transitions: hooks bound to one edge between two routes.

use crate::{route::Route, state::Navigation};
use std::{fmt, sync::Arc};
use wayfare_core::{Hook, Phase};
use wayfare_std::{EventBus, SharedHook};

/// Hooks that only run when navigating from one route to another.
///
/// `from == None` is the edge taken when there is no current route yet,
/// i.e. the very first navigation.
pub struct Transition {
    from: Option<Arc<Route>>,
    to: Arc<Route>,
    hooks: Arc<EventBus<Phase, Navigation>>,
}

impl Transition {
    /// Create a transition between two routes.
    pub fn new(from: Option<Arc<Route>>, to: Arc<Route>) -> Self {
        Self {
            from,
            to,
            hooks: Arc::new(EventBus::new()),
        }
    }

    /// The same edge between `from` and `to`, sharing this transition's
    /// hooks.
    pub(crate) fn rebind(&self, from: Option<Arc<Route>>, to: Arc<Route>) -> Self {
        Self {
            from,
            to,
            hooks: Arc::clone(&self.hooks),
        }
    }

    /// The source route, `None` for the initial navigation.
    pub fn from(&self) -> Option<&Arc<Route>> {
        self.from.as_ref()
    }

    /// The destination route.
    pub fn to(&self) -> &Arc<Route> {
        &self.to
    }

    /// The transition's hook channels.
    pub fn hooks(&self) -> &EventBus<Phase, Navigation> {
        &self.hooks
    }

    /// Add a hook for `phase`.
    pub fn on<H: Hook<Navigation>>(&self, phase: Phase, hook: H) -> &Self {
        self.hooks.subscribe(phase, hook);
        self
    }

    /// Whether this transition is the edge `from → to`, comparing routes
    /// with [`Route::is_same`].
    pub fn connects(&self, from: Option<&Route>, to: &Route) -> bool {
        let from_matches = match (self.from.as_deref(), from) {
            (None, None) => true,
            (Some(own), Some(other)) => own.is_same(other),
            _ => false,
        };
        from_matches && self.to.is_same(to)
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from.as_deref().map(Route::path))
            .field("to", &self.to.path())
            .finish_non_exhaustive()
    }
}

/// One end of a [`TransitionSpec`].
#[derive(Debug, Clone)]
pub enum Endpoint {
    /// No current route (the initial navigation).
    Initial,
    /// A route object.
    Route(Arc<Route>),
    /// A route name, or a path when no route has that name.
    Key(String),
}

impl From<&str> for Endpoint {
    fn from(key: &str) -> Self {
        Endpoint::Key(key.to_string())
    }
}

impl From<String> for Endpoint {
    fn from(key: String) -> Self {
        Endpoint::Key(key)
    }
}

impl From<Arc<Route>> for Endpoint {
    fn from(route: Arc<Route>) -> Self {
        Endpoint::Route(route)
    }
}

impl From<&Arc<Route>> for Endpoint {
    fn from(route: &Arc<Route>) -> Self {
        Endpoint::Route(Arc::clone(route))
    }
}

impl<T: Into<Endpoint>> From<Option<T>> for Endpoint {
    fn from(endpoint: Option<T>) -> Self {
        endpoint.map_or(Endpoint::Initial, Into::into)
    }
}

/// Specification accepted by [`Router::add_transition`](crate::Router::add_transition).
pub struct TransitionSpec {
    pub(crate) from: Endpoint,
    pub(crate) to: Endpoint,
    pub(crate) hooks: Vec<(Phase, SharedHook<Navigation>)>,
}

impl TransitionSpec {
    /// A specification for the edge `from → to`.
    pub fn new(from: impl Into<Endpoint>, to: impl Into<Endpoint>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            hooks: Vec::new(),
        }
    }

    /// Add a hook for `phase`.
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
}

/// Anything `add_transition` accepts.
pub enum TransitionSource {
    /// A transition built by the caller.
    Transition(Arc<Transition>),
    /// A specification to build the transition from.
    Spec(TransitionSpec),
}

impl From<Arc<Transition>> for TransitionSource {
    fn from(transition: Arc<Transition>) -> Self {
        TransitionSource::Transition(transition)
    }
}

impl From<&Arc<Transition>> for TransitionSource {
    fn from(transition: &Arc<Transition>) -> Self {
        TransitionSource::Transition(Arc::clone(transition))
    }
}

impl From<TransitionSpec> for TransitionSource {
    fn from(spec: TransitionSpec) -> Self {
        TransitionSource::Spec(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfare_std::testing::RecordingHook;

    #[test]
    fn test_spec_collects_hooks() {
        let spec = TransitionSpec::new("index", "/about")
            .on_start(RecordingHook::<Navigation>::new())
            .on_leave(RecordingHook::<Navigation>::new())
            .on_before_enter(RecordingHook::<Navigation>::new())
            .on_enter(RecordingHook::<Navigation>::new())
            .on_complete(RecordingHook::<Navigation>::new());

        let phases: Vec<Phase> = spec.hooks.iter().map(|(phase, _)| *phase).collect();
        assert_eq!(phases, Phase::ALL.to_vec());
        assert!(matches!(spec.from, Endpoint::Key(ref k) if k == "index"));
    }

    #[test]
    fn test_initial_endpoint_from_none() {
        let spec = TransitionSpec::new(None::<&str>, "/");
        assert!(matches!(spec.from, Endpoint::Initial));
    }

    #[test]
    fn test_connects() {
        let index = Arc::new(Route::named("/", "index").unwrap());
        let about = Arc::new(Route::named("/about", "about").unwrap());
        let transition = Transition::new(Some(Arc::clone(&index)), Arc::clone(&about));

        assert!(transition.connects(Some(&*index), &about));
        assert!(!transition.connects(Some(&*about), &index));
        assert!(!transition.connects(None, &about));

        let initial = Transition::new(None, Arc::clone(&index));
        assert!(initial.connects(None, &index));
        assert!(!initial.connects(Some(&*about), &index));
    }
}
