//! Message trait for event payloads.

/// A marker trait for the payloads published on channels.
///
/// Messages are cloned into closure hooks, so they must be `Clone` as well
/// as `Send + Sync + 'static`. Every such type is a message.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Clone + Send + Sync + 'static`",
    note = "Event payloads in Wayfare are cloned into hooks and shared across tasks."
)]
pub trait Message: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Message for T {}
