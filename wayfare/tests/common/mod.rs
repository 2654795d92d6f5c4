#![allow(dead_code)]

use std::sync::{Arc, Once};
use tracing_subscriber::EnvFilter;
use wayfare::{
    Route, RouteSpec, Router,
    testing::{Journal, RecordingHistory},
};

// ============================================================================
// Logging
// ============================================================================

pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Fixture
// ============================================================================

/// A router over `/` (`index`) and `/article/:id` (`article`) whose router
/// and route hooks all write to one journal, as does the history sink.
pub struct Fixture {
    pub router: Router,
    pub history: Arc<RecordingHistory>,
    pub journal: Journal,
    pub index: Arc<Route>,
    pub article: Arc<Route>,
}

pub fn fixture() -> Fixture {
    init_tracing();

    let journal = Journal::new();
    let history = Arc::new(RecordingHistory::new("/").with_journal(&journal));
    let router = Router::builder(Arc::clone(&history))
        .on_start(journal.hook("router.start"))
        .on_leave(journal.hook("router.leave"))
        .on_before_enter(journal.hook("router.beforeEnter"))
        .on_enter(journal.hook("router.enter"))
        .on_complete(journal.hook("router.complete"))
        .build();

    let index = router
        .add_route(route_spec(&journal, "/", "index"))
        .expect("index route");
    let article = router
        .add_route(route_spec(&journal, "/article/:id", "article"))
        .expect("article route");

    Fixture {
        router,
        history,
        journal,
        index,
        article,
    }
}

pub fn route_spec(journal: &Journal, path: &str, name: &str) -> RouteSpec {
    RouteSpec::new(path)
        .name(name)
        .on_before_enter(journal.hook(format!("{name}.beforeEnter")))
        .on_enter(journal.hook(format!("{name}.enter")))
        .on_leave(journal.hook(format!("{name}.leave")))
}

impl Fixture {
    /// Land on `index` and forget everything that was journaled.
    pub async fn at_index(self) -> Self {
        self.router
            .resolve("/", wayfare::NavigationMethod::Push)
            .await
            .expect("initial navigation");
        self.journal.clear();
        self
    }
}
