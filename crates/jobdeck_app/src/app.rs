//! Event loop wiring: msgs in, update, effects out, text rendering.

use std::sync::mpsc;
use std::time::Duration;

use anyhow::{bail, Context};

use jobdeck_core::{
    update, AppState, AppViewModel, ApplicationStatus, BatchView, Effect, Msg, NewApplication,
    PAGE_SIZE,
};
use jobdeck_engine::EngineHandle;

use crate::config::AppConfig;
use crate::effects::EffectRunner;
use crate::ui;

const EVENT_TIMEOUT: Duration = Duration::from_secs(120);

/// Structured filters passed on the `jobs` command line.
#[derive(Debug, Clone, Default)]
pub struct JobQueryArgs {
    pub search: Option<String>,
    pub status: Option<String>,
    pub source: Option<String>,
    pub min_score: Option<u32>,
    pub min_salary: Option<u64>,
    pub page: Option<u32>,
}

struct App {
    state: AppState,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    pending_fetches: usize,
}

impl App {
    fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let (msg_tx, msg_rx) = mpsc::channel();
        let engine = EngineHandle::new(&config.api_settings(), config.poll_settings())
            .context("failed to construct the API client")?;
        let runner = EffectRunner::new(engine, msg_tx);
        Ok(Self {
            state: AppState::new(),
            runner,
            msg_rx,
            pending_fetches: 0,
        })
    }

    /// Applies one message and runs its effects; returns the fresh view when
    /// the state changed.
    fn dispatch(&mut self, msg: Msg) -> Option<AppViewModel> {
        if matches!(msg, Msg::JobsLoaded { .. } | Msg::JobsLoadFailed { .. }) {
            self.pending_fetches = self.pending_fetches.saturating_sub(1);
        }

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.track_fetches(&effects);
        self.runner.run(effects);

        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;
        if was_dirty {
            Some(view)
        } else {
            None
        }
    }

    /// Driver-initiated IO outside any state transition.
    fn request(&mut self, effect: Effect) {
        let effects = vec![effect];
        self.track_fetches(&effects);
        self.runner.run(effects);
    }

    fn track_fetches(&mut self, effects: &[Effect]) {
        self.pending_fetches += effects
            .iter()
            .filter(|effect| matches!(effect, Effect::FetchJobs { .. }))
            .count();
    }

    fn view(&self) -> AppViewModel {
        self.state.view()
    }

    fn recv(&self) -> anyhow::Result<Msg> {
        self.msg_rx
            .recv_timeout(EVENT_TIMEOUT)
            .context("timed out waiting for the backend")
    }
}

pub fn run_jobs(config: &AppConfig, args: JobQueryArgs) -> anyhow::Result<()> {
    let mut app = App::new(config)?;

    let wanted_search = args.search.filter(|search| !search.is_empty());
    if let Some(status) = args.status {
        app.dispatch(Msg::StatusFilterSet(status));
    }
    if let Some(source) = args.source {
        app.dispatch(Msg::SourceFilterSet(source));
    }
    if let Some(min_score) = args.min_score {
        app.dispatch(Msg::MinScoreSet(Some(min_score)));
    }
    if let Some(min_salary) = args.min_salary {
        app.dispatch(Msg::MinSalarySet(Some(min_salary)));
    }
    if let Some(search) = wanted_search.clone() {
        app.dispatch(Msg::SearchEdited(search));
    }
    if let Some(page) = args.page {
        app.dispatch(Msg::PageRequested {
            skip: page * PAGE_SIZE,
        });
    }
    if app.pending_fetches == 0 && wanted_search.is_none() {
        let query = app.state.filters().query_pairs();
        app.request(Effect::FetchJobs { query });
    }

    let mut loaded = false;
    loop {
        let msg = app.recv()?;
        if matches!(msg, Msg::JobsLoaded { .. } | Msg::JobsLoadFailed { .. }) {
            loaded = true;
        }
        app.dispatch(msg);

        // Render once the last in-flight fetch has landed and the debounced
        // search (if any) has been applied.
        let search_applied = wanted_search
            .as_deref()
            .map_or(true, |wanted| app.state.filters().search == wanted);
        if loaded && app.pending_fetches == 0 && search_applied {
            let view = app.view();
            print_lines(&ui::render_jobs(&view));
            if view.jobs_error.is_some() {
                bail!("job list fetch failed");
            }
            return Ok(());
        }
    }
}

pub fn run_apply(config: &AppConfig, job_ids: Vec<String>) -> anyhow::Result<()> {
    let mut app = App::new(config)?;

    for id in job_ids {
        app.dispatch(Msg::JobToggled(id));
    }
    app.dispatch(Msg::BatchOpened);
    if let Some(view) = app.dispatch(Msg::BatchStartClicked) {
        print_lines(&ui::render_batch(&view));
    }

    loop {
        let msg = app.recv()?;
        let Some(view) = app.dispatch(msg) else {
            continue;
        };
        print_lines(&ui::render_batch(&view));

        match &view.batch {
            BatchView::Summary { .. } => {
                // Closing from the summary clears the selection and kicks off
                // the dependent-data refresh; a one-shot run does not wait
                // for the refresh to land.
                app.dispatch(Msg::BatchClosed);
                return Ok(());
            }
            BatchView::Processing { stalled: true, .. } => {
                bail!("mass apply progress is unknown; check the dashboard later");
            }
            BatchView::Confirm {
                submitting: false,
                error: Some(message),
                ..
            } => {
                bail!("mass apply failed to start: {message}");
            }
            _ => {}
        }
    }
}

pub fn run_apply_one(
    config: &AppConfig,
    job_id: String,
    cover_letter: Option<String>,
    resume_version: Option<String>,
) -> anyhow::Result<()> {
    let mut app = App::new(config)?;
    app.dispatch(Msg::ApplyRequested {
        request: NewApplication {
            job_id: job_id.clone(),
            cover_letter,
            resume_version,
        },
    });

    loop {
        let msg = app.recv()?;
        match &msg {
            Msg::ApplyCompleted => {
                app.dispatch(msg);
                println!("Applied to job {job_id}.");
                return Ok(());
            }
            Msg::ApplyFailed { message } => {
                bail!("apply failed: {message}");
            }
            _ => {
                app.dispatch(msg);
            }
        }
    }
}

pub fn run_move(config: &AppConfig, application_id: String, status: String) -> anyhow::Result<()> {
    let Some(status) = ApplicationStatus::from_key(&status) else {
        bail!(
            "unknown status {status:?}; expected one of: {}",
            ApplicationStatus::ALL
                .map(|known| known.key())
                .join(", ")
        );
    };

    let mut app = App::new(config)?;
    app.dispatch(Msg::StatusChangeRequested {
        application_id: application_id.clone(),
        status,
    });

    loop {
        let msg = app.recv()?;
        match &msg {
            Msg::ApplicationUpdated => {
                println!("Application {application_id} moved to {status}.");
                // The update triggers a pipeline refresh; render the fresh
                // board before exiting.
                app.dispatch(msg);
            }
            Msg::ApplicationUpdateFailed { message } => {
                bail!("update failed: {message}");
            }
            Msg::PipelineLoaded { .. } | Msg::PipelineLoadFailed { .. } => {
                app.dispatch(msg);
                print_lines(&ui::render_board(&app.view(), chrono::Utc::now()));
                return Ok(());
            }
            _ => {
                app.dispatch(msg);
            }
        }
    }
}

pub fn run_pipeline(config: &AppConfig) -> anyhow::Result<()> {
    let mut app = App::new(config)?;
    app.request(Effect::FetchPipeline);

    loop {
        let msg = app.recv()?;
        let done = matches!(
            msg,
            Msg::PipelineLoaded { .. } | Msg::PipelineLoadFailed { .. }
        );
        app.dispatch(msg);

        if done {
            let view = app.view();
            print_lines(&ui::render_board(&view, chrono::Utc::now()));
            if view.pipeline_error.is_some() {
                bail!("pipeline fetch failed");
            }
            return Ok(());
        }
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
