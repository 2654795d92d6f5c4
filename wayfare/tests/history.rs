//! Starting a router and following back/forward with `MemoryHistory`.

mod common;

use common::init_tracing;
use futures::{StreamExt, future, stream};
use std::{sync::Arc, time::Duration};
use wayfare::{
    History, MemoryHistory, NavigateOptions, Navigation, Resolution, RouteSpec, Router,
};

fn router(history: &Arc<MemoryHistory>) -> Router {
    init_tracing();
    let router = Router::new(Arc::clone(history));
    router.add_route(RouteSpec::new("/").name("index")).unwrap();
    router
        .add_route(RouteSpec::new("/article/:id").name("article"))
        .unwrap();
    router
}

#[tokio::test]
async fn test_start_resolves_current_location() {
    let history = Arc::new(MemoryHistory::new("/article/7"));
    let router = router(&history);

    let resolution = router.start().await.unwrap();

    assert_eq!(resolution, Resolution::Resolved { matches: 1 });
    assert_eq!(router.current().route_name(), Some("article"));
    assert_eq!(router.current_params()["id"], "7");
    assert_eq!(history.entries(), vec!["/article/7"]);
}

#[tokio::test]
async fn test_navigate_pushes_entries() {
    let history = Arc::new(MemoryHistory::new("/"));
    let router = router(&history);
    router.start().await.unwrap();

    for id in 1..=2 {
        router
            .navigate("article", NavigateOptions::new().param("id", id))
            .await
            .unwrap();
    }

    assert_eq!(history.entries(), vec!["/", "/article/1", "/article/2"]);
    assert_eq!(history.current_location(), "/article/2");
}

#[tokio::test]
async fn test_listen_follows_back_without_writing() {
    let history = Arc::new(MemoryHistory::new("/"));
    let router = router(&history);
    router.start().await.unwrap();
    router.follow_link("/article/1").await.unwrap();

    let external = history.subscribe();
    assert_eq!(history.back().as_deref(), Some("/"));
    router.listen(external.take(1)).await;

    assert_eq!(router.current().route_name(), Some("index"));
    assert_eq!(history.entries(), vec!["/", "/article/1"]);
    assert_eq!(history.current_location(), "/");
}

#[tokio::test]
async fn test_listen_survives_failed_navigation() {
    let history = Arc::new(MemoryHistory::new("/"));
    let router = router(&history);
    router
        .add_route(RouteSpec::new("/locked").on_before_enter(|_nav: Navigation| async { false }))
        .unwrap();

    let locations = stream::iter(["/locked", "/missing", "/article/4"].map(String::from));
    router.listen(locations).await;

    assert_eq!(router.current_params()["id"], "4");
    assert_eq!(history.entries(), vec!["/"]);
}

#[tokio::test]
async fn test_listen_does_not_queue_behind_hung_navigation() {
    let history = Arc::new(MemoryHistory::new("/"));
    let router = router(&history);
    router
        .add_route(RouteSpec::new("/slow").on_enter(|_nav: Navigation| future::pending::<()>()))
        .unwrap();

    let locations = stream::iter(["/slow", "/article/1"].map(String::from));
    let listened = tokio::time::timeout(Duration::from_millis(200), router.listen(locations)).await;

    // `/slow` never finishes entering, so the listener itself never settles.
    assert!(listened.is_err());
    assert_eq!(router.current().route_name(), Some("article"));
    assert_eq!(router.current_params()["id"], "1");
    assert_eq!(history.entries(), vec!["/"]);
}

#[tokio::test]
async fn test_handle_external_navigation_never_writes() {
    let history = Arc::new(MemoryHistory::new("/"));
    let router = router(&history);

    router
        .handle_external_navigation("/article/5")
        .await
        .unwrap();

    assert_eq!(router.current().route_name(), Some("article"));
    assert_eq!(history.entries(), vec!["/"]);
}
