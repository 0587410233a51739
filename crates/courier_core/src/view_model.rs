use crate::MonitorState;

/// Fixed icon/tooltip pair reflected on the host indicator surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorView {
    pub icon_path: &'static str,
    pub title: &'static str,
}

const INDICATOR_ON: IndicatorView = IndicatorView {
    icon_path: "icons/courier-on.png",
    title: "Page Courier is on",
};

const INDICATOR_OFF: IndicatorView = IndicatorView {
    icon_path: "icons/courier-off.png",
    title: "Page Courier is off",
};

/// Indicator state for the given enabled flag.
pub fn indicator_for(enabled: bool) -> IndicatorView {
    if enabled {
        INDICATOR_ON
    } else {
        INDICATOR_OFF
    }
}

/// Snapshot of agent state for observability surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentView {
    pub enabled: bool,
    pub monitor: MonitorState,
}
