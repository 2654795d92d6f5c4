//! Vocabulary shared by every navigation: phases, methods and parameter maps.

use std::{collections::BTreeMap, fmt};

/// Route parameters captured from (or fed into) a path template.
pub type Params = BTreeMap<String, String>;

/// Query string parameters.
pub type Query = BTreeMap<String, String>;

/// The hook-bearing phases of a navigation, in execution order.
///
/// The commit step between [`Phase::BeforeEnter`] and [`Phase::Enter`] has
/// no hooks and therefore no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// Router and transition hooks only.
    Start,
    /// Router, transition and the outgoing route.
    Leave,
    /// Router, transition and the incoming route. Last chance to veto.
    BeforeEnter,
    /// Router, transition and the incoming route, after the commit.
    Enter,
    /// Router and transition hooks only.
    Complete,
}

impl Phase {
    /// All phases in the order a navigation runs them.
    pub const ALL: [Phase; 5] = [
        Phase::Start,
        Phase::Leave,
        Phase::BeforeEnter,
        Phase::Enter,
        Phase::Complete,
    ];

    /// Whether routes carry hooks for this phase.
    pub const fn has_route_hooks(self) -> bool {
        matches!(self, Phase::Leave | Phase::BeforeEnter | Phase::Enter)
    }

    /// The channel name used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::Leave => "leave",
            Phase::BeforeEnter => "beforeEnter",
            Phase::Enter => "enter",
            Phase::Complete => "complete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a successful navigation is written to the history sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationMethod {
    /// Push a new entry unless the location is already current.
    #[default]
    Push,
    /// Always replace the current entry.
    Replace,
    /// Never touch the history sink.
    None,
}
