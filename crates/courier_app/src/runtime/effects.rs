use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use courier_core::{Effect, Msg, RunTarget, CAPTURE_TIMER_NAME};
use courier_engine::{CaptureRequest, EngineEvent, EngineHandle, PipelineResult, SkipReason};
use courier_logging::{courier_debug, courier_info, courier_warn};

use super::host::BrowserHost;
use super::timers::TimerRegistry;

/// Executes the effects produced by the core update function against the
/// host surface, the timer registry, and the capture engine.
pub struct EffectRunner {
    host: Arc<dyn BrowserHost>,
    engine: EngineHandle,
    timers: TimerRegistry,
    listening: Arc<AtomicBool>,
    msg_tx: Sender<Msg>,
    capture_period: Duration,
}

impl EffectRunner {
    pub fn new(
        host: Arc<dyn BrowserHost>,
        engine: EngineHandle,
        engine_events: Receiver<EngineEvent>,
        timers: TimerRegistry,
        listening: Arc<AtomicBool>,
        msg_tx: Sender<Msg>,
        capture_period: Duration,
    ) -> Self {
        spawn_event_loop(engine_events);
        Self {
            host,
            engine,
            timers,
            listening,
            msg_tx,
            capture_period,
        }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RegisterTriggers => self.listening.store(true, Ordering::SeqCst),
                Effect::DeregisterTriggers => self.listening.store(false, Ordering::SeqCst),
                Effect::ArmTimer => {
                    self.timers
                        .arm(CAPTURE_TIMER_NAME, self.capture_period, self.msg_tx.clone());
                }
                Effect::CancelTimer => {
                    self.timers.cancel(CAPTURE_TIMER_NAME);
                }
                Effect::SetIndicator(view) => {
                    courier_info!("indicator: {}", view.title);
                    self.host.set_indicator(&view);
                }
                Effect::RunPipeline { target } => self.run_pipeline(target),
            }
        }
    }

    fn run_pipeline(&self, target: RunTarget) {
        let resolved = match target {
            RunTarget::ActiveTab => match self.host.active_tab() {
                Some(tab) => tab,
                None => {
                    courier_debug!(
                        "cycle {}",
                        PipelineResult::Skipped {
                            reason: SkipReason::NoActiveTab,
                        }
                    );
                    return;
                }
            },
            RunTarget::Tab(tab) => tab,
        };

        self.engine.run_cycle(CaptureRequest {
            tab_id: resolved.id,
            page_url: resolved.url,
        });
    }
}

fn spawn_event_loop(events: Receiver<EngineEvent>) {
    thread::spawn(move || {
        while let Ok(event) = events.recv() {
            match event {
                EngineEvent::CycleFinished { request, result } => match result {
                    PipelineResult::Success => {
                        courier_info!("cycle for {}: {result}", request.page_url);
                    }
                    PipelineResult::NotReady | PipelineResult::Skipped { .. } => {
                        courier_debug!("cycle for {}: {result}", request.page_url);
                    }
                    _ => courier_warn!("cycle for {}: {result}", request.page_url),
                },
            }
        }
    });
}
