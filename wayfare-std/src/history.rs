//! In-memory history sink.
//!
//! [`MemoryHistory`] keeps a stack of entries with a cursor, like a browser
//! tab. `push` drops every entry after the cursor; `back`/`forward` move the
//! cursor and report the new location to every subscriber, which is how a
//! router learns about navigations it did not initiate.
//!
//! ```rust,ignore
//! let history = Arc::new(MemoryHistory::new("/"));
//! let router = Router::new(Arc::clone(&history));
//! tokio::spawn(async move { router.listen(history.subscribe()).await });
//! ```

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use parking_lot::Mutex;
use wayfare_core::History;

struct Entries {
    stack: Vec<String>,
    cursor: usize,
}

/// A history sink that lives in memory.
pub struct MemoryHistory {
    entries: Mutex<Entries>,
    listeners: Mutex<Vec<UnboundedSender<String>>>,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MemoryHistory {
    /// Create a history whose only entry is `initial`.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: Mutex::new(Entries {
                stack: vec![initial.into()],
                cursor: 0,
            }),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Locations reached through [`back`](Self::back), [`forward`](Self::forward)
    /// or [`go`](Self::go).
    pub fn subscribe(&self) -> UnboundedReceiver<String> {
        let (tx, rx) = unbounded();
        self.listeners.lock().push(tx);
        rx
    }

    /// Move one entry back.
    pub fn back(&self) -> Option<String> {
        self.go(-1)
    }

    /// Move one entry forward.
    pub fn forward(&self) -> Option<String> {
        self.go(1)
    }

    /// Move the cursor by `delta` entries and notify subscribers.
    ///
    /// Returns `None` and stays put when the target is out of range.
    pub fn go(&self, delta: isize) -> Option<String> {
        let location = {
            let mut entries = self.entries.lock();
            let target = entries.cursor.checked_add_signed(delta)?;
            let location = entries.stack.get(target)?.clone();
            entries.cursor = target;
            location
        };

        // Closed receivers are dropped from the list.
        self.listeners
            .lock()
            .retain(|tx| tx.unbounded_send(location.clone()).is_ok());
        Some(location)
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().stack.clone()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.lock().stack.len()
    }

    /// Always `false`: a history has at least its initial entry.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl History for MemoryHistory {
    fn current_location(&self) -> String {
        let entries = self.entries.lock();
        entries.stack[entries.cursor].clone()
    }

    fn push(&self, path: &str) {
        let mut entries = self.entries.lock();
        let next = entries.cursor + 1;
        entries.stack.truncate(next);
        entries.stack.push(path.to_string());
        entries.cursor = next;
    }

    fn replace(&self, path: &str) {
        let mut entries = self.entries.lock();
        let cursor = entries.cursor;
        entries.stack[cursor] = path.to_string();
    }
}
