//! Route and transition registration and lookups.

use super::Router;
use crate::{
    route::{Route, RouteSource, RouteSpec},
    transition::{Endpoint, Transition, TransitionSource},
};
use std::sync::Arc;
use tracing::debug;
use wayfare_core::RegistrationError;

impl Router {
    /// Register a route.
    ///
    /// If a route with the same path or name is already registered, that
    /// route is returned and the new one (with its hooks) is discarded.
    pub fn add_route(
        &self,
        route: impl Into<RouteSource>,
    ) -> Result<Arc<Route>, RegistrationError> {
        let route = match route.into() {
            RouteSource::Route(route) => route,
            RouteSource::Spec(spec) => Arc::new(Route::from_spec(spec)?),
        };

        let mut routes = self.routes.write();
        if let Some(existing) = routes.iter().find(|r| r.is_same(&route)) {
            debug!(
                path = route.path(),
                existing = existing.path(),
                "route already registered"
            );
            return Ok(Arc::clone(existing));
        }

        debug!(path = route.path(), name = ?route.name(), "route registered");
        routes.push(Arc::clone(&route));
        Ok(route)
    }

    /// Register a transition.
    ///
    /// Endpoints given as keys are looked up by name, then by path; a key
    /// matching neither registers a new route for that path. Routes given
    /// directly go through [`Router::add_route`]. A pre-built transition
    /// whose routes were already registered under other objects is bound to
    /// the registered routes; the returned transition shares its hooks. If
    /// a transition between the same routes exists, it is returned instead.
    pub fn add_transition(
        &self,
        transition: impl Into<TransitionSource>,
    ) -> Result<Arc<Transition>, RegistrationError> {
        let transition = match transition.into() {
            TransitionSource::Transition(transition) => {
                let from = transition
                    .from()
                    .map(|from| self.add_route(from))
                    .transpose()?;
                let to = self.add_route(transition.to())?;

                let bound = from
                    .as_ref()
                    .zip(transition.from())
                    .is_none_or(|(registered, own)| Arc::ptr_eq(registered, own))
                    && Arc::ptr_eq(&to, transition.to());
                if bound {
                    transition
                } else {
                    debug!(?transition, "transition rebound to registered routes");
                    Arc::new(transition.rebind(from, to))
                }
            }
            TransitionSource::Spec(spec) => {
                let from = self.endpoint(spec.from)?;
                let to = self
                    .endpoint(spec.to)?
                    .ok_or(RegistrationError::MissingTarget)?;

                let transition = Transition::new(from, to);
                for (phase, hook) in spec.hooks {
                    transition.hooks().subscribe_shared(phase, hook);
                }
                Arc::new(transition)
            }
        };

        let mut transitions = self.transitions.write();
        if let Some(existing) = transitions.iter().find(|t| {
            Arc::ptr_eq(t, &transition)
                || t.connects(transition.from().map(|r| &**r), transition.to())
        }) {
            debug!(?transition, "transition already registered");
            return Ok(Arc::clone(existing));
        }

        debug!(?transition, "transition registered");
        transitions.push(Arc::clone(&transition));
        Ok(transition)
    }

    fn endpoint(&self, endpoint: Endpoint) -> Result<Option<Arc<Route>>, RegistrationError> {
        match endpoint {
            Endpoint::Initial => Ok(None),
            Endpoint::Route(route) => self.add_route(route).map(Some),
            Endpoint::Key(key) => match self
                .route_by_name(&key)
                .or_else(|| self.route_by_path(&key))
            {
                Some(route) => Ok(Some(route)),
                None => self.add_route(RouteSpec::new(key)).map(Some),
            },
        }
    }

    /// The route registered for the template `path`.
    pub fn route_by_path(&self, path: &str) -> Option<Arc<Route>> {
        self.routes.read().iter().find(|r| r.path() == path).cloned()
    }

    /// The route registered under `name`. Empty names never match.
    pub fn route_by_name(&self, name: &str) -> Option<Arc<Route>> {
        if name.is_empty() {
            return None;
        }
        self.routes
            .read()
            .iter()
            .find(|r| r.name() == Some(name))
            .cloned()
    }

    /// The transition for the edge `from → to`; `from == None` is the
    /// initial navigation.
    pub fn transition_between(
        &self,
        from: Option<&Arc<Route>>,
        to: &Arc<Route>,
    ) -> Option<Arc<Transition>> {
        self.transitions
            .read()
            .iter()
            .find(|t| t.connects(from.map(|r| &**r), to))
            .cloned()
    }

    /// The transition between the routes registered for two templates.
    pub fn transition_by_paths(&self, from: Option<&str>, to: &str) -> Option<Arc<Transition>> {
        self.transitions
            .read()
            .iter()
            .find(|t| {
                let from_matches = match (t.from(), from) {
                    (None, None) => true,
                    (Some(route), Some(path)) => route.path() == path,
                    _ => false,
                };
                from_matches && t.to().path() == to
            })
            .cloned()
    }

    /// The transition between the routes registered under two names.
    pub fn transition_by_names(&self, from: Option<&str>, to: &str) -> Option<Arc<Transition>> {
        self.transitions
            .read()
            .iter()
            .find(|t| {
                let from_matches = match (t.from(), from) {
                    (None, None) => true,
                    (Some(route), Some(name)) => route.name() == Some(name),
                    _ => false,
                };
                from_matches && t.to().name() == Some(to)
            })
            .cloned()
    }

    /// Registered routes, in registration order.
    pub fn routes(&self) -> Vec<Arc<Route>> {
        self.routes.read().clone()
    }

    /// Registered transitions, in registration order.
    pub fn transitions(&self) -> Vec<Arc<Transition>> {
        self.transitions.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Route, RouteSpec, Router, TransitionSpec};
    use std::sync::Arc;
    use wayfare_core::RegistrationError;
    use wayfare_std::testing::RecordingHistory;

    fn router() -> Router {
        Router::new(RecordingHistory::new("/"))
    }

    #[test]
    fn test_add_route_dedupes() {
        let router = router();
        let index = router.add_route(RouteSpec::new("/").name("index")).unwrap();

        let by_path = router.add_route(RouteSpec::new("/")).unwrap();
        let by_name = router
            .add_route(RouteSpec::new("/home").name("index"))
            .unwrap();
        let by_pointer = router.add_route(&index).unwrap();

        assert!(Arc::ptr_eq(&index, &by_path));
        assert!(Arc::ptr_eq(&index, &by_name));
        assert!(Arc::ptr_eq(&index, &by_pointer));
        assert_eq!(router.routes().len(), 1);
    }

    #[test]
    fn test_add_route_rejects_empty_path() {
        assert!(matches!(
            router().add_route(""),
            Err(RegistrationError::InvalidRoute(_))
        ));
    }

    #[test]
    fn test_lookups() {
        let router = router();
        let index = router.add_route(RouteSpec::new("/").name("index")).unwrap();
        router.add_route("/about").unwrap();

        assert!(Arc::ptr_eq(&router.route_by_path("/").unwrap(), &index));
        assert!(Arc::ptr_eq(&router.route_by_name("index").unwrap(), &index));
        assert!(router.route_by_name("").is_none());
        assert!(router.route_by_path("/missing").is_none());
    }

    #[test]
    fn test_add_transition_resolves_keys() {
        let router = router();
        let index = router.add_route(RouteSpec::new("/").name("index")).unwrap();

        let transition = router
            .add_transition(TransitionSpec::new("index", "/about"))
            .unwrap();

        assert!(Arc::ptr_eq(transition.from().unwrap(), &index));
        assert_eq!(transition.to().path(), "/about");
        // "/about" was registered implicitly.
        assert_eq!(router.routes().len(), 2);
        assert!(router.transition_by_paths(Some("/"), "/about").is_some());
        assert!(router.transition_by_names(Some("index"), "index").is_none());
    }

    #[test]
    fn test_add_transition_dedupes() {
        let router = router();
        let first = router
            .add_transition(TransitionSpec::new("/", "/about"))
            .unwrap();
        let second = router
            .add_transition(TransitionSpec::new("/", "/about"))
            .unwrap();
        let initial = router
            .add_transition(TransitionSpec::new(None::<&str>, "/"))
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &initial));
        assert!(initial.from().is_none());
        assert_eq!(router.transitions().len(), 2);
    }

    #[test]
    fn test_add_prebuilt_transition_registers_routes() {
        let router = router();
        let from = Arc::new(Route::new("/a").unwrap());
        let to = Arc::new(Route::new("/b").unwrap());
        let transition = Arc::new(crate::Transition::new(Some(from), to));

        let registered = router.add_transition(&transition).unwrap();
        assert!(Arc::ptr_eq(&registered, &transition));
        assert_eq!(router.routes().len(), 2);
        assert!(router.add_transition(&transition).is_ok());
        assert_eq!(router.transitions().len(), 1);
    }

    #[test]
    fn test_transition_requires_target() {
        assert_eq!(
            router()
                .add_transition(TransitionSpec::new("/", None::<&str>))
                .unwrap_err(),
            RegistrationError::MissingTarget
        );
    }

    #[test]
    fn test_transition_between() {
        let router = router();
        let index = router.add_route("/").unwrap();
        let about = router.add_route("/about").unwrap();
        router
            .add_transition(TransitionSpec::new(&index, &about))
            .unwrap();

        assert!(router.transition_between(Some(&index), &about).is_some());
        assert!(router.transition_between(Some(&about), &index).is_none());
        assert!(router.transition_between(None, &about).is_none());
        assert!(router.transition_by_paths(None, "/about").is_none());
    }
}
