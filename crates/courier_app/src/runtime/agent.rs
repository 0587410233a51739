use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use courier_core::{
    update, AgentState, Msg, TabId, CAPTURE_PERIOD, CAPTURE_TIMER_NAME, DEFAULT_ENDPOINT_URL,
};
use courier_engine::{CapturePipeline, EngineHandle, PipelineConfig, SnapshotSource};
use url::Url;

use super::effects::EffectRunner;
use super::host::BrowserHost;
use super::store::StatusStore;
use super::timers::TimerRegistry;

/// Embedder-supplied knobs for a running agent.
pub struct AgentOptions {
    pub data_dir: PathBuf,
    /// Host suffixes whose tabs are monitored automatically.
    pub watch_suffixes: Vec<String>,
    pub capture_period: Duration,
}

impl AgentOptions {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            watch_suffixes: Vec::new(),
            capture_period: CAPTURE_PERIOD,
        }
    }
}

/// Inbound side of the agent: the host integration calls these from its
/// event callbacks. Tab resolution happens here, on the caller's thread,
/// so every trigger carries a fresh snapshot of the focused tab.
#[derive(Clone)]
pub struct AgentHandle {
    store: Arc<StatusStore>,
    host: Arc<dyn BrowserHost>,
    listening: Arc<AtomicBool>,
    msg_tx: mpsc::Sender<Msg>,
    watch_suffixes: Arc<Vec<String>>,
    timers: TimerRegistry,
}

impl AgentHandle {
    /// Startup/install reconciliation.
    pub fn startup(&self) {
        self.send_reconcile();
    }

    /// Flips the enabled flag and reconciles.
    pub fn toggle(&self) {
        let enabled = !self.store.status();
        self.store.set_status(enabled);
        self.send_reconcile();
    }

    /// Host callback: a tab became active.
    pub fn tab_activated(&self, tab_id: TabId) {
        if !self.listening.load(Ordering::SeqCst) {
            return;
        }
        let tab = self.host.tab(tab_id);
        let _ = self.msg_tx.send(Msg::TabActivated { tab });
    }

    /// Host callback: the bound capture command fired on the focused tab.
    pub fn command_invoked(&self, tab_id: TabId) {
        if !self.listening.load(Ordering::SeqCst) {
            return;
        }
        let tab = self.host.tab(tab_id);
        let _ = self.msg_tx.send(Msg::CommandInvoked { tab });
    }

    /// Whether the periodic capture timer is currently armed.
    pub fn timer_armed(&self) -> bool {
        self.timers.contains(CAPTURE_TIMER_NAME)
    }

    fn send_reconcile(&self) {
        let config = self.store.capture_config(&self.watch_suffixes);
        let active_tab = self.host.active_tab();
        let _ = self.msg_tx.send(Msg::ConfigLoaded { config, active_tab });
    }
}

/// Wires store, engine, timers, and the dispatch loop, returning the
/// handle the host integration drives.
pub fn spawn_agent(
    options: AgentOptions,
    host: Arc<dyn BrowserHost>,
    snapshots: Arc<dyn SnapshotSource>,
) -> AgentHandle {
    let store = Arc::new(StatusStore::new(options.data_dir));
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();

    let pipeline_store = store.clone();
    let pipeline = CapturePipeline::over_http(
        PipelineConfig {
            default_endpoint: Url::parse(DEFAULT_ENDPOINT_URL).expect("built-in endpoint parses"),
            endpoint_override: Arc::new(move || pipeline_store.server_url()),
        },
        snapshots,
    );
    let (engine, engine_events) = EngineHandle::new(pipeline);

    let timers = TimerRegistry::new();
    let listening = Arc::new(AtomicBool::new(false));
    let runner = EffectRunner::new(
        host.clone(),
        engine,
        engine_events,
        timers.clone(),
        listening.clone(),
        msg_tx.clone(),
        options.capture_period,
    );

    spawn_dispatch_loop(msg_rx, runner);

    AgentHandle {
        store,
        host,
        listening,
        msg_tx,
        watch_suffixes: Arc::new(options.watch_suffixes),
        timers,
    }
}

fn spawn_dispatch_loop(msg_rx: mpsc::Receiver<Msg>, runner: EffectRunner) {
    thread::spawn(move || {
        let mut state = AgentState::new();
        while let Ok(msg) = msg_rx.recv() {
            let (next_state, effects) = update(state, msg);
            state = next_state;
            runner.run(effects);
        }
    });
}
