use courier_core::{ActiveTabRef, IndicatorView, TabId};

/// Thin wrapper over the host surface, implemented by the embedding
/// integration. Tab lookups happen at trigger time so every cycle sees a
/// fresh view of the focused tab.
pub trait BrowserHost: Send + Sync {
    /// The currently focused tab, when one exists.
    fn active_tab(&self) -> Option<ActiveTabRef>;

    /// A specific tab by id; `None` when it no longer exists.
    fn tab(&self, id: TabId) -> Option<ActiveTabRef>;

    /// Reflect the on/off indicator (icon path and tooltip).
    fn set_indicator(&self, view: &IndicatorView);
}
