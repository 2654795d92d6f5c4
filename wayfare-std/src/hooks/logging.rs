//! Logging hook for lifecycle observation.

use std::fmt::Debug;
use wayfare_core::{BoxError, Hook, HookOutcome, Message};

/// A hook that logs every event it sees and never vetoes.
///
/// # Example
///
/// ```rust,ignore
/// router.hooks().subscribe(Phase::Enter, LoggingHook::named("router.enter"));
/// ```
pub struct LoggingHook {
    name: &'static str,
}

impl LoggingHook {
    /// Create a `LoggingHook` with the default name.
    pub const fn new() -> Self {
        Self { name: "navigation" }
    }

    /// Create a `LoggingHook` whose log lines carry `name`.
    pub const fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The name used in log lines.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LoggingHook {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Message + Debug> Hook<E> for LoggingHook {
    async fn on_event(&self, event: &E) -> Result<HookOutcome, BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(hook = %self.name, ?event, "lifecycle event");
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = event;
        }
        Ok(HookOutcome::Proceed)
    }
}
