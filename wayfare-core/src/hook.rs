//! # Hooks
//!
//! The unit of work attached to a channel. A hook receives an event and
//! decides whether the lifecycle may go on ([`HookOutcome::Proceed`]) or
//! must be vetoed ([`HookOutcome::Cancel`]). Returning an error is a
//! failure and aborts the lifecycle the same way a veto does.
//!
//! Any `Fn(E) -> impl Future` closure is a hook as long as its output
//! implements [`IntoOutcome`]:
//!
//! ```rust,ignore
//! router.hooks().subscribe(Phase::BeforeEnter, |nav: Navigation| async move {
//!     nav.next.params.contains_key("id")
//! });
//! ```
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Hook`] uses native `async fn` in traits. Channels store hooks as
//! [`DynHook`] trait objects; every `Hook` is a `DynHook` through a blanket
//! implementation.

use crate::{error::BoxError, message::Message, response::IntoOutcome};
use std::{future::Future, pin::Pin};

/// Typed result of a hook: go on, or veto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookOutcome {
    /// Let the lifecycle continue.
    #[default]
    Proceed,
    /// Veto the lifecycle.
    Cancel,
}

impl HookOutcome {
    /// Returns `true` for [`HookOutcome::Cancel`].
    pub const fn is_cancel(self) -> bool {
        matches!(self, HookOutcome::Cancel)
    }
}

/// A lifecycle hook for events of type `E`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Hook<{E}>`",
    label = "missing `Hook` implementation",
    note = "Hooks must implement `on_event` for the event type `{E}`, or be a closure `Fn({E}) -> impl Future`."
)]
pub trait Hook<E: Message>: Send + Sync + 'static {
    /// Called when the channel the hook is subscribed to is published.
    fn on_event(
        &self,
        event: &E,
    ) -> impl Future<Output = Result<HookOutcome, BoxError>> + Send;
}

/// Dynamic object-safe version of [`Hook`].
pub trait DynHook<E: Message>: Send + Sync + 'static {
    /// Called when the channel is published (dynamic dispatch version).
    fn on_event_dyn<'a>(
        &'a self,
        event: &'a E,
    ) -> Pin<Box<dyn Future<Output = Result<HookOutcome, BoxError>> + Send + 'a>>;
}

impl<E: Message, T: Hook<E>> DynHook<E> for T {
    fn on_event_dyn<'a>(
        &'a self,
        event: &'a E,
    ) -> Pin<Box<dyn Future<Output = Result<HookOutcome, BoxError>> + Send + 'a>> {
        Box::pin(self.on_event(event))
    }
}

// Blanket impl for closures. The event is cloned so the returned future
// does not borrow from the publisher.
impl<E, F, Fut, R> Hook<E> for F
where
    E: Message,
    F: Fn(E) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send,
    R: IntoOutcome,
{
    fn on_event(
        &self,
        event: &E,
    ) -> impl Future<Output = Result<HookOutcome, BoxError>> + Send {
        let pending = (self)(event.clone());
        async move { pending.await.into_outcome() }
    }
}
