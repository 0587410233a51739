use crate::view_model::AgentView;
use crate::CaptureConfig;

/// Host tab identifier.
pub type TabId = u64;

/// Snapshot of the focused tab at the instant a trigger fired. Resolved
/// anew for every trigger; never cached across invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTabRef {
    pub id: TabId,
    pub url: String,
}

/// Ownership of the single periodic timer, tracked explicitly instead of
/// being derived from the host timer registry.
///
/// Invariant: `armed` iff a watched tab is the active tab and the feature
/// is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonitorState {
    pub armed: bool,
    pub target_tab: Option<TabId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentState {
    config: CaptureConfig,
    monitor: MonitorState,
}

impl Default for AgentState {
    fn default() -> Self {
        // Inert until the first reconciliation supplies real config.
        Self {
            config: CaptureConfig {
                enabled: false,
                ..CaptureConfig::default()
            },
            monitor: MonitorState::default(),
        }
    }
}

impl AgentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AgentView {
        AgentView {
            enabled: self.enabled(),
            monitor: self.monitor,
        }
    }

    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn monitor(&self) -> MonitorState {
        self.monitor
    }

    pub(crate) fn apply_config(&mut self, config: CaptureConfig) {
        self.config = config;
    }

    pub(crate) fn arm(&mut self, target: TabId) {
        self.monitor = MonitorState {
            armed: true,
            target_tab: Some(target),
        };
    }

    pub(crate) fn disarm(&mut self) {
        self.monitor = MonitorState::default();
    }
}
