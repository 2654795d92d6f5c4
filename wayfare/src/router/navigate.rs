//! Programmatic navigation, link following and external history events.

use super::Router;
use crate::{
    route::{PathArgs, Route},
    state::Resolution,
};
use futures::{Stream, StreamExt};
use std::sync::Arc;
use tracing::{debug, warn};
use wayfare_core::{NavigationError, NavigationMethod, Params, Query};
use wayfare_std::Location;

/// What [`Router::navigate`] goes to.
#[derive(Debug, Clone)]
pub enum NavigateTarget {
    /// A route object.
    Route(Arc<Route>),
    /// A route name, or a literal location when no route has that name.
    Key(String),
}

impl From<Arc<Route>> for NavigateTarget {
    fn from(route: Arc<Route>) -> Self {
        NavigateTarget::Route(route)
    }
}

impl From<&Arc<Route>> for NavigateTarget {
    fn from(route: &Arc<Route>) -> Self {
        NavigateTarget::Route(Arc::clone(route))
    }
}

impl From<&str> for NavigateTarget {
    fn from(key: &str) -> Self {
        NavigateTarget::Key(key.to_string())
    }
}

impl From<String> for NavigateTarget {
    fn from(key: String) -> Self {
        NavigateTarget::Key(key)
    }
}

/// Options for [`Router::navigate`].
#[derive(Debug, Clone, Default)]
pub struct NavigateOptions {
    /// Template parameters.
    pub params: Params,
    /// Query parameters.
    pub query: Query,
    /// Fragment, with or without the leading `#`.
    pub fragment: Option<String>,
    /// How the history sink is updated.
    pub method: NavigationMethod,
}

impl NavigateOptions {
    /// Default options: no arguments, [`NavigationMethod::Push`].
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

    /// Set the history method.
    pub fn method(mut self, method: NavigationMethod) -> Self {
        self.method = method;
        self
    }

    fn path_args(&self) -> PathArgs {
        PathArgs {
            params: self.params.clone(),
            query: self.query.clone(),
            fragment: self.fragment.clone(),
        }
    }
}

impl Router {
    /// Navigate to a route (or location) unless it is already current.
    ///
    /// A string target is looked up as a route name first; otherwise it is
    /// taken as a location, with `options.query` and `options.fragment`
    /// merged into it. When the resulting location equals the history
    /// sink's current location nothing runs and
    /// [`Resolution::Unchanged`] is returned.
    pub async fn navigate(
        &self,
        target: impl Into<NavigateTarget>,
        options: NavigateOptions,
    ) -> Result<Resolution, NavigationError> {
        let href = self.href(target.into(), &options)?;
        if href == self.history.current_location() {
            debug!(%href, "already at location");
            return Ok(Resolution::Unchanged);
        }
        self.resolve(&href, options.method).await
    }

    fn href(
        &self,
        target: NavigateTarget,
        options: &NavigateOptions,
    ) -> Result<String, NavigationError> {
        let route = match target {
            NavigateTarget::Route(route) => route,
            NavigateTarget::Key(key) => match self.route_by_name(&key) {
                Some(route) => route,
                None => {
                    return Ok(Location::parse(&key)?
                        .with_query(&options.query)
                        .with_fragment(options.fragment.as_deref())
                        .href());
                }
            },
        };
        Ok(route.generate(&options.path_args())?)
    }

    /// Follow a link to `href` with a history push.
    pub async fn follow_link(&self, href: &str) -> Result<Resolution, NavigationError> {
        self.navigate(href, NavigateOptions::default()).await
    }

    /// Resolve a location reached outside the router (back/forward)
    /// without writing it to history again.
    pub async fn handle_external_navigation(
        &self,
        path: &str,
    ) -> Result<Resolution, NavigationError> {
        self.resolve(path, NavigationMethod::None).await
    }

    /// Resolve the history sink's current location.
    pub async fn start(&self) -> Result<Resolution, NavigationError> {
        let location = self.history.current_location();
        self.resolve(&location, NavigationMethod::Push).await
    }

    /// Resolve every location reported by `locations` until it ends.
    ///
    /// Each location starts its own navigation as soon as it arrives, so a
    /// hung hook only stalls the navigation it belongs to. Failed
    /// navigations are logged and do not stop the listener. Returns once
    /// the stream has ended and every navigation it started has settled.
    pub async fn listen<S>(&self, locations: S)
    where
        S: Stream<Item = String>,
    {
        locations
            .for_each_concurrent(None, |location| async move {
                if let Err(err) = self.handle_external_navigation(&location).await {
                    warn!(%location, error = %err, "external navigation failed");
                }
            })
            .await;
    }
}
