use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use deck_logging::deck_info;
use jobdeck_core::{Effect, Msg, SEARCH_SETTLE_MS};
use jobdeck_engine::{EngineCommands, EngineEvent, EngineHandle};

/// Maps core effects onto engine commands and engine events back onto msgs.
pub struct EffectRunner {
    commands: EngineCommands,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>) -> Self {
        let commands = engine.commands();
        spawn_event_loop(engine, msg_tx.clone());
        Self { commands, msg_tx }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchJobs { query } => {
                    self.commands.fetch_jobs(query);
                }
                Effect::ScheduleSearchSettle { generation } => {
                    let tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(Duration::from_millis(SEARCH_SETTLE_MS));
                        let _ = tx.send(Msg::SearchSettled { generation });
                    });
                }
                Effect::SubmitBatch { job_ids } => {
                    deck_info!("Submitting mass apply for {} jobs", job_ids.len());
                    self.commands.submit_batch(job_ids);
                }
                Effect::WatchTask { task_id } => {
                    deck_info!("Watching task {}", task_id);
                    self.commands.watch_task(task_id);
                }
                Effect::DetachPoll => {
                    self.commands.detach_poll();
                }
                Effect::FetchPipeline => {
                    self.commands.fetch_pipeline();
                }
                Effect::CreateApplication { request } => {
                    self.commands.create_application(request);
                }
                Effect::UpdateApplication {
                    application_id,
                    patch,
                } => {
                    self.commands.update_application(application_id, patch);
                }
            }
        }
    }
}

fn spawn_event_loop(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || loop {
        if let Some(event) = engine.try_recv() {
            if msg_tx.send(map_event(event)).is_err() {
                break;
            }
        } else {
            thread::sleep(Duration::from_millis(20));
        }
    });
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::JobsFetched { page } => Msg::JobsLoaded { page },
        EngineEvent::JobsFetchFailed { message } => Msg::JobsLoadFailed { message },
        EngineEvent::BatchSubmitted { task_id, total } => {
            Msg::BatchSubmitSucceeded { task_id, total }
        }
        EngineEvent::BatchSubmitFailed { message } => Msg::BatchSubmitFailed { message },
        EngineEvent::TaskSnapshot { snapshot } => Msg::SnapshotReceived { snapshot },
        EngineEvent::TaskStalled { task_id } => Msg::PollStalled { task_id },
        EngineEvent::PipelineFetched { records } => Msg::PipelineLoaded { records },
        EngineEvent::PipelineFetchFailed { message } => Msg::PipelineLoadFailed { message },
        EngineEvent::ApplicationCreated { .. } => Msg::ApplyCompleted,
        EngineEvent::ApplicationCreateFailed { message } => Msg::ApplyFailed { message },
        EngineEvent::ApplicationUpdated { .. } => Msg::ApplicationUpdated,
        EngineEvent::ApplicationUpdateFailed { message } => Msg::ApplicationUpdateFailed { message },
    }
}
