use crate::{ActiveTabRef, CaptureConfig};

/// Inbound trigger and lifecycle events, consumed once by [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A tab became active. `tab` is resolved by the host at event time
    /// and is `None` when the tab vanished before the lookup finished.
    TabActivated { tab: Option<ActiveTabRef> },
    /// The periodic capture timer fired.
    TimerFired,
    /// The bound capture command was invoked on the focused tab.
    CommandInvoked { tab: Option<ActiveTabRef> },
    /// Configuration (re)read from the store on startup, install, or
    /// toggle, together with the tab active at that moment.
    ConfigLoaded {
        config: CaptureConfig,
        active_tab: Option<ActiveTabRef>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
