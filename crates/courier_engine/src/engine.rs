use std::sync::{mpsc, Arc};
use std::thread;

use crate::{CapturePipeline, CaptureRequest, PipelineResult};

enum EngineCommand {
    RunCycle { request: CaptureRequest },
}

/// Events reported back to the embedder's event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    CycleFinished {
        request: CaptureRequest,
        result: PipelineResult,
    },
}

/// Handle to the engine thread. Cycles run concurrently on a dedicated
/// tokio runtime; overlapping runs are allowed and throttled by the
/// backend's own readiness gate.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(pipeline: CapturePipeline) -> (Self, mpsc::Receiver<EngineEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let pipeline = Arc::new(pipeline);

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let pipeline = pipeline.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(pipeline.as_ref(), command, event_tx).await;
                });
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    /// Queues one capture cycle and returns immediately.
    pub fn run_cycle(&self, request: CaptureRequest) {
        let _ = self.cmd_tx.send(EngineCommand::RunCycle { request });
    }
}

async fn handle_command(
    pipeline: &CapturePipeline,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::RunCycle { request } => {
            let result = pipeline.run(&request).await;
            let _ = event_tx.send(EngineEvent::CycleFinished { request, result });
        }
    }
}
