//! Courier core: pure trigger/lifecycle state machine and view-model helpers.
mod config;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use config::{
    match_tab_url, CaptureConfig, TabMatch, CAPTURE_PERIOD, CAPTURE_TIMER_NAME,
    DEFAULT_ENDPOINT_URL,
};
pub use effect::{Effect, RunTarget};
pub use msg::Msg;
pub use state::{ActiveTabRef, AgentState, MonitorState, TabId};
pub use update::update;
pub use view_model::{indicator_for, AgentView, IndicatorView};
