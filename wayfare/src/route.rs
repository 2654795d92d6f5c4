//! Routes: a path template with an optional name and its own hooks.

use crate::state::Navigation;
use std::{fmt, sync::Arc};
use wayfare_core::{Hook, Params, Phase, Query, RegistrationError, RouteError};
use wayfare_std::{EventBus, Location, PathPattern, PatternOptions, SharedHook};

/// Arguments for [`Route::generate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathArgs {
    /// Template parameters.
    pub params: Params,
    /// Query parameters appended as `?k=v`.
    pub query: Query,
    /// Fragment appended as `#fragment`; the `#` is optional.
    pub fragment: Option<String>,
}

impl PathArgs {
    /// Empty arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.insert(name.into(), value.to_string());
        self
    }

    /// Set the fragment.
    pub fn fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }
}

/// A registered path template.
///
/// Routes carry hooks for [`Phase::Leave`] (published while navigating away
/// from the route), [`Phase::BeforeEnter`] and [`Phase::Enter`] (published
/// while navigating to it).
pub struct Route {
    path: String,
    name: Option<String>,
    pattern: PathPattern,
    hooks: EventBus<Phase, Navigation>,
}

impl Route {
    /// Create an unnamed route with default options.
    pub fn new(path: impl Into<String>) -> Result<Self, RegistrationError> {
        Self::with_options(path, None::<String>, PatternOptions::default())
    }

    /// Create a named route with default options.
    pub fn named(
        path: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, RegistrationError> {
        Self::with_options(path, Some(name), PatternOptions::default())
    }

    /// Create a route. An empty name is the same as no name.
    pub fn with_options(
        path: impl Into<String>,
        name: Option<impl Into<String>>,
        options: PatternOptions,
    ) -> Result<Self, RegistrationError> {
        let path = path.into();
        if path.trim().is_empty() {
            return Err(RegistrationError::InvalidRoute(
                "route path must not be empty".into(),
            ));
        }

        let pattern = PathPattern::with_options(&path, options)?;
        Ok(Self {
            name: name.map(Into::into).filter(|n: &String| !n.is_empty()),
            path,
            pattern,
            hooks: EventBus::new(),
        })
    }

    /// Build a route from a specification, attaching its hooks.
    pub fn from_spec(spec: RouteSpec) -> Result<Self, RegistrationError> {
        let route = Self::with_options(spec.path, spec.name, spec.options)?;
        for hook in spec.on_before_enter {
            route.hooks.subscribe_shared(Phase::BeforeEnter, hook);
        }
        for hook in spec.on_enter {
            route.hooks.subscribe_shared(Phase::Enter, hook);
        }
        for hook in spec.on_leave {
            route.hooks.subscribe_shared(Phase::Leave, hook);
        }
        Ok(route)
    }

    /// The path template.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The route name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The compiled template.
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// The route's hook channels.
    pub fn hooks(&self) -> &EventBus<Phase, Navigation> {
        &self.hooks
    }

    /// Add a `beforeEnter` hook.
    pub fn on_before_enter<H: Hook<Navigation>>(&self, hook: H) -> &Self {
        self.hooks.subscribe(Phase::BeforeEnter, hook);
        self
    }

    /// Add an `enter` hook.
    pub fn on_enter<H: Hook<Navigation>>(&self, hook: H) -> &Self {
        self.hooks.subscribe(Phase::Enter, hook);
        self
    }

    /// Add a `leave` hook.
    pub fn on_leave<H: Hook<Navigation>>(&self, hook: H) -> &Self {
        self.hooks.subscribe(Phase::Leave, hook);
        self
    }

    /// Match a pathname, returning the captured parameters.
    pub fn matches(&self, pathname: &str) -> Option<Params> {
        self.pattern.matches(pathname)
    }

    /// Build a location from parameters, query and fragment.
    pub fn generate(&self, args: &PathArgs) -> Result<String, RouteError> {
        let pathname = self.pattern.generate(&args.params)?;
        Ok(Location::new(pathname)
            .with_query(&args.query)
            .with_fragment(args.fragment.as_deref())
            .href())
    }

    /// Whether `other` is the same registered entity: the same object, the
    /// same path, or the same name.
    pub fn is_same(&self, other: &Route) -> bool {
        std::ptr::eq(self, other)
            || self.path == other.path
            || (self.name.is_some() && self.name == other.name)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Specification accepted by [`Router::add_route`](crate::Router::add_route).
pub struct RouteSpec {
    pub(crate) path: String,
    pub(crate) name: Option<String>,
    pub(crate) options: PatternOptions,
    pub(crate) on_before_enter: Vec<SharedHook<Navigation>>,
    pub(crate) on_enter: Vec<SharedHook<Navigation>>,
    pub(crate) on_leave: Vec<SharedHook<Navigation>>,
}

impl RouteSpec {
    /// A specification for `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            options: PatternOptions::default(),
            on_before_enter: Vec::new(),
            on_enter: Vec::new(),
            on_leave: Vec::new(),
        }
    }

    /// Name the route.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the pattern options.
    pub fn options(mut self, options: PatternOptions) -> Self {
        self.options = options;
        self
    }

    /// Shortcut for `options(PatternOptions::default().sensitive(sensitive))`.
    pub fn sensitive(mut self, sensitive: bool) -> Self {
        self.options = self.options.sensitive(sensitive);
        self
    }

    /// Add a `beforeEnter` hook.
    pub fn on_before_enter<H: Hook<Navigation>>(mut self, hook: H) -> Self {
        self.on_before_enter.push(Arc::new(hook));
        self
    }

    /// Add an `enter` hook.
    pub fn on_enter<H: Hook<Navigation>>(mut self, hook: H) -> Self {
        self.on_enter.push(Arc::new(hook));
        self
    }

    /// Add a `leave` hook.
    pub fn on_leave<H: Hook<Navigation>>(mut self, hook: H) -> Self {
        self.on_leave.push(Arc::new(hook));
        self
    }
}

/// Anything `add_route` accepts.
pub enum RouteSource {
    /// A route built by the caller.
    Route(Arc<Route>),
    /// A specification to build the route from.
    Spec(RouteSpec),
}

impl From<Arc<Route>> for RouteSource {
    fn from(route: Arc<Route>) -> Self {
        RouteSource::Route(route)
    }
}

impl From<&Arc<Route>> for RouteSource {
    fn from(route: &Arc<Route>) -> Self {
        RouteSource::Route(Arc::clone(route))
    }
}

impl From<Route> for RouteSource {
    fn from(route: Route) -> Self {
        RouteSource::Route(Arc::new(route))
    }
}

impl From<RouteSpec> for RouteSource {
    fn from(spec: RouteSpec) -> Self {
        RouteSource::Spec(spec)
    }
}

impl From<&str> for RouteSource {
    fn from(path: &str) -> Self {
        RouteSource::Spec(RouteSpec::new(path))
    }
}
