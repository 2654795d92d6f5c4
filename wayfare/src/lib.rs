//! # wayfare - Async Client-Side Navigation Coordinator
//!
//! `wayfare` resolves locations against registered routes and drives an
//! ordered, asynchronous and cancellable lifecycle of hooks from the current
//! route to the next one, keeping a history sink in sync.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wayfare::prelude::*;
//!
//! let router = Router::new(MemoryHistory::new("/"));
//! router.add_route(RouteSpec::new("/").name("index"))?;
//! router.add_route(
//!     RouteSpec::new("/article/:id")
//!         .name("article")
//!         .on_enter(|nav: Navigation| async move {
//!             println!("article {}", nav.next.params["id"]);
//!         }),
//! )?;
//!
//! router.start().await?;
//! router
//!     .navigate("article", NavigateOptions::new().param("id", 1))
//!     .await?;
//! ```
//!
//! ## Lifecycle
//!
//! Each phase publishes the router's, the transition's and the route's
//! hooks together and waits for all of them:
//!
//! | Phase | Router | Transition | Route |
//! |---|---|---|---|
//! | `start` | yes | yes | |
//! | `leave` | yes | yes | outgoing |
//! | `beforeEnter` | yes | yes | incoming |
//! | *commit* | | | |
//! | `enter` | yes | yes | incoming |
//! | `complete` | yes | yes | |
//!
//! A hook returning [`HookOutcome::Cancel`] (or `false`) or an error stops
//! the navigation at that phase; nothing is committed before `enter`.
//!
//! ## Crates
//!
//! - `wayfare-core`: hook traits, history trait, errors
//! - `wayfare-std`: hook bus, path patterns, locations, in-memory history,
//!   testing utilities

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub mod route;
pub mod router;
pub mod state;
pub mod transition;

pub use route::{PathArgs, Route, RouteSource, RouteSpec};
pub use router::{NavigateOptions, NavigateTarget, Router, RouterBuilder};
pub use state::{Navigation, NavigationState, NotFound, Resolution};
pub use transition::{Endpoint, Transition, TransitionSource, TransitionSpec};

pub use wayfare_core::{
    BoxError, DynHook, History, Hook, HookError, HookOutcome, IntoOutcome, Message,
    NavigationError, NavigationMethod, Params, Phase, Query, RegistrationError, RouteError,
    WayfareError,
};
pub use wayfare_std::{
    Channel, EventBus, Location, LoggingHook, MemoryHistory, PathPattern, PatternOptions,
    SharedHook, testing,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        History, Hook, HookOutcome, MemoryHistory, NavigateOptions, Navigation,
        NavigationError, NavigationMethod, NotFound, Phase, Resolution, Route, RouteSpec,
        Router, TransitionSpec,
    };
}
