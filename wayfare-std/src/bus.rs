//! Named-channel hook bus.
//!
//! A [`Channel`] is an ordered list of hooks; an [`EventBus`] maps channel
//! keys to channels. Publishing runs every hook of a channel concurrently,
//! succeeds only if all of them proceed and fails as soon as one does not.
//!
//! # Example
//!
//! ```rust,ignore
//! let bus = EventBus::<Phase, Navigation>::new();
//! bus.subscribe(Phase::Enter, |nav: Navigation| async move { render(&nav) })
//!     .subscribe(Phase::Enter, LoggingHook);
//!
//! bus.publish(Phase::Enter, &navigation).await?;
//! ```

use futures::future::try_join_all;
use parking_lot::RwLock;
use std::{collections::HashMap, fmt, hash::Hash, sync::Arc};
use wayfare_core::{DynHook, Hook, HookError, HookOutcome, Message};

/// A hook shared between a channel and whoever may want to unsubscribe it.
pub type SharedHook<E> = Arc<dyn DynHook<E>>;

/// An ordered list of hooks for one event type.
pub struct Channel<E: Message> {
    hooks: RwLock<Vec<SharedHook<E>>>,
}

impl<E: Message> Default for Channel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Message> Channel<E> {
    /// Create an empty channel.
    pub fn new() -> Self {
        Self {
            hooks: RwLock::new(Vec::new()),
        }
    }

    /// Append a hook. The same hook may be subscribed more than once.
    pub fn subscribe<H: Hook<E>>(&self, hook: H) -> &Self {
        self.subscribe_shared(Arc::new(hook))
    }

    /// Append an already shared hook, keeping the handle usable for
    /// [`Channel::unsubscribe`].
    pub fn subscribe_shared(&self, hook: SharedHook<E>) -> &Self {
        self.hooks.write().push(hook);
        self
    }

    /// Remove the first occurrence of `hook`, or every hook when `None`.
    pub fn unsubscribe(&self, hook: Option<&SharedHook<E>>) -> &Self {
        let mut hooks = self.hooks.write();
        match hook {
            Some(hook) => {
                if let Some(index) = hooks.iter().position(|h| Arc::ptr_eq(h, hook)) {
                    hooks.remove(index);
                }
            }
            None => hooks.clear(),
        }
        self
    }

    /// Whether `hook` is currently subscribed.
    pub fn contains(&self, hook: &SharedHook<E>) -> bool {
        self.hooks.read().iter().any(|h| Arc::ptr_eq(h, hook))
    }

    /// Number of subscribed hooks.
    pub fn len(&self) -> usize {
        self.hooks.read().len()
    }

    /// Whether no hook is subscribed.
    pub fn is_empty(&self) -> bool {
        self.hooks.read().is_empty()
    }

    /// Run every hook with `event`.
    ///
    /// Hooks are started in subscription order. The first hook to cancel
    /// or fail settles the publish with that error; siblings still pending
    /// at that point are dropped without being polled again.
    pub async fn publish(&self, event: &E) -> Result<(), HookError> {
        // Snapshot so hooks may (un)subscribe while the channel is running.
        let hooks: Vec<SharedHook<E>> = self.hooks.read().clone();
        if hooks.is_empty() {
            return Ok(());
        }

        try_join_all(hooks.iter().map(|hook| async move {
            match hook.on_event_dyn(event).await {
                Ok(HookOutcome::Proceed) => Ok(()),
                Ok(HookOutcome::Cancel) => Err(HookError::Cancelled),
                Err(err) => Err(HookError::Failed(err)),
            }
        }))
        .await
        .map(drop)
    }
}

impl<E: Message> fmt::Debug for Channel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel").field("hooks", &self.len()).finish()
    }
}

/// A set of named channels sharing one event type.
pub struct EventBus<K, E: Message> {
    channels: RwLock<HashMap<K, Arc<Channel<E>>>>,
}

impl<K, E> Default for EventBus<K, E>
where
    K: Copy + Eq + Hash + Send + Sync + 'static,
    E: Message,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, E> EventBus<K, E>
where
    K: Copy + Eq + Hash + Send + Sync + 'static,
    E: Message,
{
    /// Create a bus with no channels.
    pub fn new() -> Self {
        Self {
            channels: RwLock::new(HashMap::new()),
        }
    }

    /// The channel for `key`, created on first use.
    pub fn channel(&self, key: K) -> Arc<Channel<E>> {
        if let Some(channel) = self.channels.read().get(&key) {
            return Arc::clone(channel);
        }
        Arc::clone(self.channels.write().entry(key).or_default())
    }

    /// Append `hook` to the `key` channel.
    pub fn subscribe<H: Hook<E>>(&self, key: K, hook: H) -> &Self {
        self.channel(key).subscribe(hook);
        self
    }

    /// Append an already shared hook to the `key` channel.
    pub fn subscribe_shared(&self, key: K, hook: SharedHook<E>) -> &Self {
        self.channel(key).subscribe_shared(hook);
        self
    }

    /// Remove the first occurrence of `hook` from `key`, or clear `key`.
    pub fn unsubscribe(&self, key: K, hook: Option<&SharedHook<E>>) -> &Self {
        if let Some(channel) = self.channels.read().get(&key) {
            channel.unsubscribe(hook);
        }
        self
    }

    /// Number of hooks on `key`.
    pub fn handler_count(&self, key: K) -> usize {
        self.channels.read().get(&key).map_or(0, |c| c.len())
    }

    /// Whether `hook` is subscribed to `key`.
    pub fn contains(&self, key: K, hook: &SharedHook<E>) -> bool {
        self.channels
            .read()
            .get(&key)
            .is_some_and(|c| c.contains(hook))
    }

    /// Publish `event` on `key`. Unknown channels succeed immediately.
    pub async fn publish(&self, key: K, event: &E) -> Result<(), HookError> {
        let channel = self.channels.read().get(&key).cloned();
        match channel {
            Some(channel) => channel.publish(event).await,
            None => Ok(()),
        }
    }
}

impl<K: fmt::Debug, E: Message> fmt::Debug for EventBus<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channels = self.channels.read();
        let mut map = f.debug_map();
        for (key, channel) in channels.iter() {
            map.entry(key, &channel.len());
        }
        map.finish()
    }
}
