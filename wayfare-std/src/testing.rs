//! Testing utilities for Wayfare.
//!
//! This module provides utilities to make testing hooks and routers easier.
//!
//! # Features
//!
//! - [`RecordingHook`]: A hook that records all events it receives
//! - [`Journal`]: An ordered log shared by several hooks and a history sink,
//!   for asserting the exact order of a navigation
//! - [`FailingHook`]: A hook that always fails
//! - [`RecordingHistory`]: A history sink that records every write

use parking_lot::Mutex;
use std::sync::Arc;
use wayfare_core::{BoxError, History, Hook, HookOutcome, Message};

// ============================================================================
// Recording Hook
// ============================================================================

/// A hook that records all events it receives.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHook::<Navigation>::new();
/// router.hooks().subscribe(Phase::Enter, recorder.clone());
///
/// router.resolve("/", NavigationMethod::Push).await?;
/// assert_eq!(recorder.count(), 1);
/// ```
pub struct RecordingHook<E> {
    events: Arc<Mutex<Vec<E>>>,
    outcome: HookOutcome,
}

impl<E> RecordingHook<E> {
    /// Create a new recording hook that proceeds.
    pub fn new() -> Self {
        Self::with_outcome(HookOutcome::Proceed)
    }

    /// Create a recording hook that returns a specific outcome.
    pub fn with_outcome(outcome: HookOutcome) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            outcome,
        }
    }

    /// Create a recording hook that vetoes every event.
    pub fn cancelling() -> Self {
        Self::with_outcome(HookOutcome::Cancel)
    }

    /// Get the number of recorded events.
    pub fn count(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether no event was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Clear all recorded events.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl<E: Clone> RecordingHook<E> {
    /// Get a clone of the recorded events.
    pub fn events(&self) -> Vec<E> {
        self.events.lock().clone()
    }

    /// The most recent event.
    pub fn last(&self) -> Option<E> {
        self.events.lock().last().cloned()
    }
}

impl<E> Default for RecordingHook<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for RecordingHook<E> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
            outcome: self.outcome,
        }
    }
}

impl<E: Message> Hook<E> for RecordingHook<E> {
    async fn on_event(&self, event: &E) -> Result<HookOutcome, BoxError> {
        self.events.lock().push(event.clone());
        Ok(self.outcome)
    }
}

// ============================================================================
// Journal
// ============================================================================

/// An ordered, shared log of labelled calls.
///
/// Hooks created with [`Journal::hook`] and a [`RecordingHistory`] built with
/// [`RecordingHistory::with_journal`] write to the same log, so one assertion
/// covers the relative order of hooks from every source and the history write.
#[derive(Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn record(&self, entry: impl Into<String>) {
        self.entries.lock().push(entry.into());
    }

    /// A snapshot of all entries.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// How many times `entry` was recorded.
    pub fn count(&self, entry: &str) -> usize {
        self.entries.lock().iter().filter(|e| *e == entry).count()
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// A hook that records `label` and proceeds.
    pub fn hook(&self, label: impl Into<String>) -> JournalHook {
        self.hook_with(label, HookOutcome::Proceed)
    }

    /// A hook that records `label` and returns `outcome`.
    pub fn hook_with(&self, label: impl Into<String>, outcome: HookOutcome) -> JournalHook {
        JournalHook {
            journal: self.clone(),
            label: label.into(),
            outcome,
        }
    }
}

/// A hook writing its label to a [`Journal`].
#[derive(Clone)]
pub struct JournalHook {
    journal: Journal,
    label: String,
    outcome: HookOutcome,
}

impl<E: Message> Hook<E> for JournalHook {
    async fn on_event(&self, _event: &E) -> Result<HookOutcome, BoxError> {
        self.journal.record(self.label.clone());
        Ok(self.outcome)
    }
}

// ============================================================================
// Failing Hook
// ============================================================================

/// A hook that always fails with `message`.
#[derive(Clone)]
pub struct FailingHook {
    message: &'static str,
}

impl FailingHook {
    /// Create a hook failing with `message`.
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl<E: Message> Hook<E> for FailingHook {
    async fn on_event(&self, _event: &E) -> Result<HookOutcome, BoxError> {
        Err(self.message.into())
    }
}

// ============================================================================
// Recording History
// ============================================================================

/// A history sink that records writes.
///
/// `push`/`replace` update the current location, so comparisons against it
/// behave like a real sink.
pub struct RecordingHistory {
    location: Mutex<String>,
    pushes: Mutex<Vec<String>>,
    replaces: Mutex<Vec<String>>,
    journal: Option<Journal>,
}

impl RecordingHistory {
    /// Create a sink whose current location is `location`.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: Mutex::new(location.into()),
            pushes: Mutex::new(Vec::new()),
            replaces: Mutex::new(Vec::new()),
            journal: None,
        }
    }

    /// Also log `history.push:<path>` / `history.replace:<path>` to `journal`.
    pub fn with_journal(mut self, journal: &Journal) -> Self {
        self.journal = Some(journal.clone());
        self
    }

    /// Set the current location without recording a write.
    pub fn set_location(&self, location: impl Into<String>) {
        *self.location.lock() = location.into();
    }

    /// Paths passed to `push`.
    pub fn pushes(&self) -> Vec<String> {
        self.pushes.lock().clone()
    }

    /// Paths passed to `replace`.
    pub fn replaces(&self) -> Vec<String> {
        self.replaces.lock().clone()
    }

    /// Total number of writes.
    pub fn writes(&self) -> usize {
        self.pushes.lock().len() + self.replaces.lock().len()
    }
}

impl History for RecordingHistory {
    fn current_location(&self) -> String {
        self.location.lock().clone()
    }

    fn push(&self, path: &str) {
        self.pushes.lock().push(path.to_string());
        self.set_location(path);
        if let Some(journal) = &self.journal {
            journal.record(format!("history.push:{path}"));
        }
    }

    fn replace(&self, path: &str) {
        self.replaces.lock().push(path.to_string());
        self.set_location(path);
        if let Some(journal) = &self.journal {
            journal.record(format!("history.replace:{path}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_hook_records() {
        let hook = RecordingHook::<u32>::new();
        let probe = hook.clone();

        assert_eq!(hook.on_event(&3).await.unwrap(), HookOutcome::Proceed);
        assert_eq!(probe.events(), vec![3]);
        assert_eq!(probe.last(), Some(3));
    }

    #[tokio::test]
    async fn test_journal_orders_hooks_and_history() {
        let journal = Journal::new();
        let history = RecordingHistory::new("/").with_journal(&journal);

        Hook::<u32>::on_event(&journal.hook("first"), &0).await.unwrap();
        history.push("/next");
        Hook::<u32>::on_event(&journal.hook("last"), &0).await.unwrap();

        assert_eq!(
            journal.entries(),
            vec!["first", "history.push:/next", "last"]
        );
        assert_eq!(history.current_location(), "/next");
    }

    #[tokio::test]
    async fn test_failing_hook() {
        let err = Hook::<u32>::on_event(&FailingHook::new("nope"), &0)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }
}
