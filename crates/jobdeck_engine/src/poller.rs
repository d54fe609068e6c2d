use std::time::Duration;

use deck_logging::{deck_debug, deck_warn};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, JobBoardApi};

#[derive(Debug, Clone)]
pub struct PollSettings {
    /// Delay between successful fetches.
    pub interval: Duration,
    /// Delay before retrying a failed fetch.
    pub retry_delay: Duration,
    /// Consecutive failed fetches tolerated before the poll stalls.
    pub max_attempts: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(2000),
            retry_delay: Duration::from_millis(1000),
            max_attempts: 3,
        }
    }
}

/// Where the poller (and the engine) deliver their events.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Polls one task until terminal, emitting a `TaskSnapshot` per fetch.
///
/// Fetches are strictly sequential; the next one is scheduled only after the
/// previous resolves, so snapshots are observed in non-decreasing progress
/// order for the task. Stopping is permanent: the first `done == true`
/// snapshot ends the poll, and `max_attempts` consecutive fetch failures end
/// it with a `TaskStalled` event; the task's true outcome is then unknown and
/// callers must not infer success or failure. Cancelling the token detaches
/// at the next await point without emitting anything further.
pub async fn poll_task(
    api: &dyn JobBoardApi,
    task_id: &str,
    settings: &PollSettings,
    sink: &dyn ProgressSink,
    cancel: &CancellationToken,
) {
    let mut consecutive_failures = 0u32;
    loop {
        let fetched = tokio::select! {
            _ = cancel.cancelled() => return,
            result = api.task_progress(task_id) => result,
        };

        match fetched {
            Ok(snapshot) => {
                consecutive_failures = 0;
                let done = snapshot.done;
                sink.emit(EngineEvent::TaskSnapshot { snapshot });
                if done {
                    deck_debug!("Task {} reported done; polling stops", task_id);
                    return;
                }
                tokio::select! {
                    _ = cancel.cancelled() => return,
                    _ = tokio::time::sleep(settings.interval) => {}
                }
            }
            Err(err) => {
                consecutive_failures += 1;
                deck_warn!(
                    "Poll attempt {}/{} for task {} failed: {}",
                    consecutive_failures,
                    settings.max_attempts,
                    task_id,
                    err
                );
                if consecutive_failures >= settings.max_attempts {
                    sink.emit(EngineEvent::TaskStalled {
                        task_id: task_id.to_string(),
                    });
                    return;
                }
                tokio::select! {
                    _ = cancel.cancelled() => return,
                    _ = tokio::time::sleep(settings.retry_delay) => {}
                }
            }
        }
    }
}
