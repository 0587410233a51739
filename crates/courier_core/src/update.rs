use crate::config::{match_tab_url, TabMatch};
use crate::view_model::indicator_for;
use crate::{ActiveTabRef, AgentState, CaptureConfig, Effect, Msg, RunTarget};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AgentState, msg: Msg) -> (AgentState, Vec<Effect>) {
    let effects = match msg {
        Msg::ConfigLoaded { config, active_tab } => reconcile(&mut state, config, active_tab),
        Msg::TabActivated { tab } => {
            if state.enabled() {
                evaluate_activation(&mut state, tab)
            } else {
                Vec::new()
            }
        }
        Msg::TimerFired => {
            if state.enabled() && state.monitor().armed {
                vec![Effect::RunPipeline {
                    target: RunTarget::ActiveTab,
                }]
            } else {
                // A fire that was already queued when the timer was
                // cancelled; dropped here.
                Vec::new()
            }
        }
        Msg::CommandInvoked { tab } => match tab {
            Some(tab) if state.enabled() => vec![Effect::RunPipeline {
                target: RunTarget::Tab(tab),
            }],
            _ => Vec::new(),
        },
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Re-derives indicator, listener, and timer state from a fresh config
/// read. Runs on startup, install, and after every toggle.
fn reconcile(
    state: &mut AgentState,
    config: CaptureConfig,
    active_tab: Option<ActiveTabRef>,
) -> Vec<Effect> {
    state.apply_config(config);
    let mut effects = vec![Effect::SetIndicator(indicator_for(state.enabled()))];
    if state.enabled() {
        effects.push(Effect::RegisterTriggers);
        // The feature may be switched on while a watched tab is already
        // focused; that tab will never produce an activation event.
        effects.extend(evaluate_activation(state, active_tab));
    } else {
        effects.push(Effect::DeregisterTriggers);
        if state.monitor().armed {
            state.disarm();
            effects.push(Effect::CancelTimer);
        }
    }
    effects
}

fn evaluate_activation(state: &mut AgentState, tab: Option<ActiveTabRef>) -> Vec<Effect> {
    // The tab can close between the activation event and the lookup.
    let tab = match tab {
        Some(tab) => tab,
        None => return Vec::new(),
    };

    match match_tab_url(&tab.url, &state.config().watch_suffixes) {
        TabMatch::NoHost => Vec::new(),
        TabMatch::Watched => {
            let newly_armed = !state.monitor().armed;
            state.arm(tab.id);
            if newly_armed {
                vec![Effect::ArmTimer]
            } else {
                Vec::new()
            }
        }
        TabMatch::Unwatched => {
            if state.monitor().armed {
                state.disarm();
                vec![Effect::CancelTimer]
            } else {
                Vec::new()
            }
        }
    }
}
