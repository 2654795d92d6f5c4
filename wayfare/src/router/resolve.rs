//! The resolution protocol.

use super::Router;
use crate::{
    route::Route,
    state::{Navigation, NavigationState, NotFound, Resolution},
    transition::Transition,
};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};
use wayfare_core::{HookError, NavigationError, NavigationMethod, Params, Phase};
use wayfare_std::{EventBus, Location};

impl Router {
    /// Resolve `path` against the registered routes and run the lifecycle.
    ///
    /// Every matching route gets its own navigation task; the tasks run
    /// concurrently and the call returns once all of them settle. When no
    /// route matches, the `notFound` channel is published instead and the
    /// state and history are left alone.
    ///
    /// The first failing task (in registration order) determines the
    /// error. A task stops at the first phase that is cancelled or fails;
    /// if that phase is `beforeEnter` or earlier, nothing is committed.
    pub async fn resolve(
        &self,
        path: &str,
        method: NavigationMethod,
    ) -> Result<Resolution, NavigationError> {
        let location = Location::parse(path)?;
        let prev = self.current();

        let matched: Vec<(Arc<Route>, Params)> = self
            .routes
            .read()
            .iter()
            .filter_map(|route| {
                route
                    .matches(&location.pathname)
                    .map(|params| (Arc::clone(route), params))
            })
            .collect();

        if matched.is_empty() {
            info!(path, "no route matched");
            let event = NotFound {
                path: path.to_string(),
                query: location.query,
            };
            self.not_found
                .publish(&event)
                .await
                .map_err(NavigationError::NotFoundHandler)?;
            return Ok(Resolution::NotFound);
        }

        debug!(path, ?method, matches = matched.len(), "resolving");
        let tasks: Vec<_> = matched
            .into_iter()
            .map(|(route, params)| {
                let transition = self.transition_between(prev.route.as_ref(), &route);
                let navigation = Navigation {
                    path: path.to_string(),
                    prev: prev.clone(),
                    next: NavigationState {
                        route: Some(Arc::clone(&route)),
                        params,
                        query: location.query.clone(),
                    },
                };
                self.navigation_task(navigation, route, transition, method)
            })
            .collect();

        let matches = tasks.len();
        for result in join_all(tasks).await {
            result?;
        }
        Ok(Resolution::Resolved { matches })
    }

    async fn navigation_task(
        &self,
        navigation: Navigation,
        route: Arc<Route>,
        transition: Option<Arc<Transition>>,
        method: NavigationMethod,
    ) -> Result<(), NavigationError> {
        let transition = transition.as_deref();
        let outgoing = navigation.prev.route.as_deref();

        for phase in Phase::ALL {
            if phase == Phase::Enter {
                self.commit(&navigation, method);
            }
            let subject = match phase {
                Phase::Leave => outgoing,
                _ => Some(&*route),
            };
            self.phase(phase, &navigation, transition, subject).await?;
        }

        info!(path = %navigation.path, route = route.path(), "navigation complete");
        Ok(())
    }

    /// Publish `phase` on the router, the transition and the route together.
    ///
    /// `route` is skipped for phases routes carry no hooks for. The first
    /// channel to cancel or fail settles the phase; the other publishes are
    /// dropped.
    async fn phase(
        &self,
        phase: Phase,
        navigation: &Navigation,
        transition: Option<&Transition>,
        route: Option<&Route>,
    ) -> Result<(), NavigationError> {
        let route = route.filter(|_| phase.has_route_hooks());
        futures::try_join!(
            self.hooks.publish(phase, navigation),
            publish(transition.map(Transition::hooks), phase, navigation),
            publish(route.map(Route::hooks), phase, navigation),
        )
        .map(drop)
        .map_err(|err| {
            match &err {
                HookError::Cancelled => {
                    info!(path = %navigation.path, %phase, "navigation cancelled")
                }
                HookError::Failed(source) => {
                    warn!(path = %navigation.path, %phase, error = %source, "navigation hook failed")
                }
            }
            NavigationError::at_phase(phase, err)
        })
    }

    fn commit(&self, navigation: &Navigation, method: NavigationMethod) {
        *self.state.write() = navigation.next.clone();

        let path = navigation.path.as_str();
        match method {
            NavigationMethod::Push if self.history.current_location() != path => {
                debug!(path, "history push");
                self.history.push(path);
            }
            NavigationMethod::Replace => {
                debug!(path, "history replace");
                self.history.replace(path);
            }
            NavigationMethod::Push | NavigationMethod::None => {}
        }
    }
}

async fn publish(
    hooks: Option<&EventBus<Phase, Navigation>>,
    phase: Phase,
    navigation: &Navigation,
) -> Result<(), HookError> {
    match hooks {
        Some(hooks) => hooks.publish(phase, navigation).await,
        None => Ok(()),
    }
}
