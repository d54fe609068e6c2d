use std::sync::{mpsc, Arc};
use std::thread;

use deck_logging::deck_debug;
use tokio_util::sync::CancellationToken;

use jobdeck_core::{ApplicationPatch, JobId, NewApplication};

use crate::poller::{poll_task, ChannelProgressSink, PollSettings};
use crate::{ApiError, ApiSettings, EngineEvent, HttpApi, JobBoardApi};

enum EngineCommand {
    FetchJobs {
        query: Vec<(String, String)>,
    },
    SubmitBatch {
        job_ids: Vec<JobId>,
    },
    WatchTask {
        task_id: String,
    },
    DetachPoll,
    FetchPipeline,
    CreateApplication {
        request: NewApplication,
    },
    UpdateApplication {
        application_id: String,
        patch: ApplicationPatch,
    },
}

/// Cloneable command side of the engine.
#[derive(Clone)]
pub struct EngineCommands {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineCommands {
    pub fn fetch_jobs(&self, query: Vec<(String, String)>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchJobs { query });
    }

    pub fn submit_batch(&self, job_ids: Vec<JobId>) {
        let _ = self.cmd_tx.send(EngineCommand::SubmitBatch { job_ids });
    }

    /// Attaches the poller to a task. Any previous watch is detached first:
    /// one task is observed at a time, each with a fresh retry budget.
    pub fn watch_task(&self, task_id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::WatchTask {
            task_id: task_id.into(),
        });
    }

    /// Stops client-side observation. The server-side task is unaffected.
    pub fn detach_poll(&self) {
        let _ = self.cmd_tx.send(EngineCommand::DetachPoll);
    }

    pub fn fetch_pipeline(&self) {
        let _ = self.cmd_tx.send(EngineCommand::FetchPipeline);
    }

    pub fn create_application(&self, request: NewApplication) {
        let _ = self.cmd_tx.send(EngineCommand::CreateApplication { request });
    }

    pub fn update_application(&self, application_id: impl Into<String>, patch: ApplicationPatch) {
        let _ = self.cmd_tx.send(EngineCommand::UpdateApplication {
            application_id: application_id.into(),
            patch,
        });
    }
}

/// IO runtime for the dashboard: commands go in over a channel, events come
/// back over another. A dedicated thread owns the tokio runtime so callers
/// never need one of their own.
pub struct EngineHandle {
    commands: EngineCommands,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(api_settings: &ApiSettings, poll_settings: PollSettings) -> Result<Self, ApiError> {
        let api: Arc<dyn JobBoardApi> = Arc::new(HttpApi::new(api_settings)?);
        Ok(Self::with_api(api, poll_settings))
    }

    /// Build the engine over any transport; the seam used by tests.
    pub fn with_api(api: Arc<dyn JobBoardApi>, poll_settings: PollSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            // At most one watched task at a time.
            let mut watch: Option<CancellationToken> = None;

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::WatchTask { task_id } => {
                        if let Some(previous) = watch.take() {
                            previous.cancel();
                        }
                        let token = CancellationToken::new();
                        watch = Some(token.clone());

                        let api = api.clone();
                        let event_tx = event_tx.clone();
                        let settings = poll_settings.clone();
                        runtime.spawn(async move {
                            let sink = ChannelProgressSink::new(event_tx);
                            poll_task(api.as_ref(), &task_id, &settings, &sink, &token).await;
                        });
                    }
                    EngineCommand::DetachPoll => {
                        if let Some(previous) = watch.take() {
                            deck_debug!("Detaching poll");
                            previous.cancel();
                        }
                    }
                    other => {
                        let api = api.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            handle_command(api.as_ref(), other, &event_tx).await;
                        });
                    }
                }
            }
        });

        Self {
            commands: EngineCommands { cmd_tx },
            event_rx,
        }
    }

    pub fn commands(&self) -> EngineCommands {
        self.commands.clone()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    api: &dyn JobBoardApi,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::FetchJobs { query } => match api.list_jobs(&query).await {
            Ok(page) => EngineEvent::JobsFetched { page },
            Err(err) => EngineEvent::JobsFetchFailed {
                message: err.to_string(),
            },
        },
        EngineCommand::SubmitBatch { job_ids } => match api.submit_mass_apply(&job_ids).await {
            Ok(started) => EngineEvent::BatchSubmitted {
                task_id: started.task_id,
                total: started.total,
            },
            Err(err) => EngineEvent::BatchSubmitFailed {
                message: err.to_string(),
            },
        },
        EngineCommand::FetchPipeline => match api.pipeline().await {
            Ok(records) => EngineEvent::PipelineFetched { records },
            Err(err) => EngineEvent::PipelineFetchFailed {
                message: err.to_string(),
            },
        },
        EngineCommand::CreateApplication { request } => {
            match api.create_application(&request).await {
                Ok(record) => EngineEvent::ApplicationCreated { record },
                Err(err) => EngineEvent::ApplicationCreateFailed {
                    message: err.to_string(),
                },
            }
        }
        EngineCommand::UpdateApplication {
            application_id,
            patch,
        } => match api.update_application(&application_id, &patch).await {
            Ok(record) => EngineEvent::ApplicationUpdated { record },
            Err(err) => EngineEvent::ApplicationUpdateFailed {
                message: err.to_string(),
            },
        },
        // Handled by the command loop itself.
        EngineCommand::WatchTask { .. } | EngineCommand::DetachPoll => return,
    };
    let _ = event_tx.send(event);
}
