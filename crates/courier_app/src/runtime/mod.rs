//! Runtime wiring: config store, timers, effect execution, dispatch.
pub mod agent;
pub mod effects;
pub mod host;
pub mod logging;
pub mod settings;
pub mod store;
pub mod timers;

pub use agent::{spawn_agent, AgentHandle, AgentOptions};
pub use host::BrowserHost;
pub use store::StatusStore;
pub use timers::TimerRegistry;
