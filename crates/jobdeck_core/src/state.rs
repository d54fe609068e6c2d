use crate::view_model::{self, AppViewModel};
use crate::{
    BatchSnapshot, JobFilters, JobPage, JobSummary, PipelineBoard, SelectionSet,
};

/// The mass-apply workflow phase, with the data each phase owns.
///
/// `Idle` is reachable from every other phase via close; the forward path is
/// `Confirm → Processing → Summary`, driven one transition per received
/// message.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum BatchState {
    #[default]
    Idle,
    Confirm {
        jobs: Vec<JobSummary>,
        submitting: bool,
        error: Option<String>,
    },
    Processing {
        task_id: String,
        expected_total: u32,
        snapshot: Option<BatchSnapshot>,
        stalled: bool,
    },
    Summary {
        snapshot: BatchSnapshot,
    },
}

/// Application state: one instance owns the selection set, the batch
/// workflow, the filter state and the fetched list/aggregate data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub(crate) selection: SelectionSet,
    pub(crate) batch: BatchState,
    pub(crate) filters: JobFilters,
    pub(crate) search_input: String,
    pub(crate) search_generation: u64,
    pub(crate) jobs: JobPage,
    pub(crate) jobs_error: Option<String>,
    pub(crate) board: PipelineBoard,
    pub(crate) pipeline_error: Option<String>,
    pub(crate) dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        view_model::project(self)
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn batch(&self) -> &BatchState {
        &self.batch
    }

    pub fn filters(&self) -> &JobFilters {
        &self.filters
    }

    /// Returns whether the state changed since the last call, clearing the
    /// flag. Drivers use this to coalesce rendering.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Confirm-phase rows for the current selection. Ids with a loaded
    /// listing keep the page's relative order; ids selected on other pages
    /// follow, id-labelled, in sorted order so the view is deterministic.
    pub(crate) fn selected_job_summaries(&self) -> Vec<JobSummary> {
        let mut rows: Vec<JobSummary> = self
            .jobs
            .items
            .iter()
            .filter(|job| self.selection.is_selected(&job.id))
            .map(|job| JobSummary {
                id: job.id.clone(),
                title: job.title.clone(),
                company: job.company.clone(),
                match_score: job.match_score,
            })
            .collect();

        let mut off_page: Vec<String> = self
            .selection
            .ids()
            .into_iter()
            .filter(|id| !self.jobs.items.iter().any(|job| &job.id == id))
            .collect();
        off_page.sort();
        rows.extend(off_page.into_iter().map(|id| JobSummary {
            title: id.clone(),
            company: String::new(),
            match_score: None,
            id,
        }));
        rows
    }
}
