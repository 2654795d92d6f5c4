//! The history sink boundary.

/// Persists and reads the application's current location.
///
/// In a browser this is `window.history` plus `window.location`; tests and
/// headless hosts use an in-memory implementation. Back/forward
/// notifications are not part of this trait: hosts feed them to the router
/// as a stream of locations.
pub trait History: Send + Sync + 'static {
    /// The presently recorded location (`pathname` + `?query` + `#fragment`).
    fn current_location(&self) -> String;

    /// Record a new location as a new entry.
    fn push(&self, path: &str);

    /// Overwrite the current entry with `path`.
    fn replace(&self, path: &str);
}

impl<H: History + ?Sized> History for std::sync::Arc<H> {
    fn current_location(&self) -> String {
        (**self).current_location()
    }

    fn push(&self, path: &str) {
        (**self).push(path)
    }

    fn replace(&self, path: &str) {
        (**self).replace(path)
    }
}
