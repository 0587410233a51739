use crate::view_model::IndicatorView;
use crate::ActiveTabRef;

/// Commands returned by [`crate::update`] for the platform layer to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start forwarding tab-activation and command events.
    RegisterTriggers,
    /// Stop forwarding tab-activation and command events.
    DeregisterTriggers,
    /// Arm the named periodic timer; a no-op when one already exists.
    ArmTimer,
    /// Cancel the named periodic timer.
    CancelTimer,
    /// Run one capture cycle against the given target.
    RunPipeline { target: RunTarget },
    /// Reflect the on/off state on the host indicator surface.
    SetIndicator(IndicatorView),
}

/// Which tab a pipeline run should capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunTarget {
    /// Resolve the focused tab at run time.
    ActiveTab,
    /// Capture the tab the trigger was delivered for.
    Tab(ActiveTabRef),
}
