use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use courier_core::Msg;

// Cancellation is checked between short sleep slices so a cancelled
// timer stops firing promptly without joining its thread.
const SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Named periodic timers with at most one live timer per name.
///
/// The arm/cancel pair mirrors a host alarm registry; each fire is
/// delivered as [`Msg::TimerFired`] on the agent channel, starting with
/// an immediate first fire.
#[derive(Clone, Default)]
pub struct TimerRegistry {
    inner: Arc<Mutex<HashMap<String, Arc<AtomicBool>>>>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms `name`. A no-op returning false when a timer with the same
    /// name is already armed.
    pub fn arm(&self, name: &str, period: Duration, tx: Sender<Msg>) -> bool {
        let mut timers = self.inner.lock().expect("timer registry lock");
        if timers.contains_key(name) {
            return false;
        }

        let cancelled = Arc::new(AtomicBool::new(false));
        timers.insert(name.to_string(), cancelled.clone());

        let registry = self.clone();
        let name = name.to_string();
        thread::spawn(move || loop {
            if cancelled.load(Ordering::SeqCst) {
                break;
            }
            if tx.send(Msg::TimerFired).is_err() {
                // Receiver gone; drop the registration on the way out.
                registry.remove_if_same(&name, &cancelled);
                break;
            }
            let mut slept = Duration::ZERO;
            while slept < period {
                if cancelled.load(Ordering::SeqCst) {
                    return;
                }
                thread::sleep(SLEEP_SLICE);
                slept += SLEEP_SLICE;
            }
        });
        true
    }

    /// Cancels and removes `name`; false when no such timer exists.
    pub fn cancel(&self, name: &str) -> bool {
        let mut timers = self.inner.lock().expect("timer registry lock");
        match timers.remove(name) {
            Some(cancelled) => {
                cancelled.store(true, Ordering::SeqCst);
                true
            }
            None => false,
        }
    }

    /// Whether a timer with this name is currently armed.
    pub fn contains(&self, name: &str) -> bool {
        self.inner
            .lock()
            .expect("timer registry lock")
            .contains_key(name)
    }

    fn remove_if_same(&self, name: &str, flag: &Arc<AtomicBool>) {
        let mut timers = self.inner.lock().expect("timer registry lock");
        if let Some(current) = timers.get(name) {
            if Arc::ptr_eq(current, flag) {
                timers.remove(name);
            }
        }
    }
}
