use serde::{Deserialize, Serialize};

use crate::core::{ElementId, TimerHandle};

/// Host events routed by the engine to mounted widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SiteEvent {
    /// A scheduled callback fired.
    TimerFired(TimerHandle),
    /// A subscribed element was clicked.
    Click(ElementId),
    /// A subscribed element's visible area changed; `ratio` is in `0..=1`.
    Visibility { target: ElementId, ratio: f64 },
}

/// Result of routing one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Dispatch {
    /// A widget consumed the event.
    Handled,
    /// No widget recognized the event; stale timer handles land here.
    #[default]
    Ignored,
}

impl Dispatch {
    #[must_use]
    pub const fn from_handled(handled: bool) -> Self {
        if handled { Self::Handled } else { Self::Ignored }
    }

    #[must_use]
    pub const fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }
}
