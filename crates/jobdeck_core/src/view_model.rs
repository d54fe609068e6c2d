use crate::{
    AppState, ApplicationStatus, BatchItemResult, BatchItemStatus, BatchState, JobFilters,
    JobSummary, PipelineRecord, PIPELINE_COLUMNS,
};

/// The batch workflow as the driver renders it.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchView {
    Idle,
    Confirm {
        rows: Vec<JobSummary>,
        submitting: bool,
        error: Option<String>,
    },
    Processing {
        processed: u32,
        total: u32,
        percent: u8,
        current_job: Option<String>,
        results: Vec<BatchItemResult>,
        /// Polling halted with the task outcome unknown; progress shown so
        /// far is the last word the client has.
        stalled: bool,
    },
    Summary {
        applied: usize,
        failed: u32,
        skipped: usize,
        results: Vec<BatchItemResult>,
    },
}

/// One job row of the list view.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRowView {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub source: Option<String>,
    pub match_score: Option<f32>,
    pub status: String,
    pub selected: bool,
}

/// One pipeline column with its bucketed records.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView {
    pub key: ApplicationStatus,
    pub label: &'static str,
    pub rows: Vec<PipelineRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub selection_count: usize,
    pub page_fully_selected: bool,
    pub jobs: Vec<JobRowView>,
    pub jobs_total: u32,
    pub filters: JobFilters,
    pub jobs_error: Option<String>,
    pub batch: BatchView,
    pub columns: Vec<ColumnView>,
    pub unrecognized_statuses: usize,
    pub pipeline_error: Option<String>,
}

pub(crate) fn project(state: &AppState) -> AppViewModel {
    let page_ids: Vec<String> = state.jobs.items.iter().map(|job| job.id.clone()).collect();

    AppViewModel {
        selection_count: state.selection.count(),
        page_fully_selected: state.selection.page_fully_selected(&page_ids),
        jobs: state
            .jobs
            .items
            .iter()
            .map(|job| JobRowView {
                id: job.id.clone(),
                title: job.title.clone(),
                company: job.company.clone(),
                location: job.location.clone(),
                source: job.source.clone(),
                match_score: job.match_score,
                status: job.status.clone(),
                selected: state.selection.is_selected(&job.id),
            })
            .collect(),
        jobs_total: state.jobs.total,
        filters: state.filters.clone(),
        jobs_error: state.jobs_error.clone(),
        batch: project_batch(&state.batch),
        columns: PIPELINE_COLUMNS
            .iter()
            .map(|column| ColumnView {
                key: column.key,
                label: column.label,
                rows: state.board.column(column.key).to_vec(),
            })
            .collect(),
        unrecognized_statuses: state.board.unrecognized,
        pipeline_error: state.pipeline_error.clone(),
    }
}

fn project_batch(batch: &BatchState) -> BatchView {
    match batch {
        BatchState::Idle => BatchView::Idle,
        BatchState::Confirm {
            jobs,
            submitting,
            error,
        } => BatchView::Confirm {
            rows: jobs.clone(),
            submitting: *submitting,
            error: error.clone(),
        },
        BatchState::Processing {
            expected_total,
            snapshot,
            stalled,
            ..
        } => {
            let processed = snapshot.as_ref().map_or(0, |snap| snap.processed());
            let total = snapshot.as_ref().map_or(*expected_total, |snap| snap.total);
            BatchView::Processing {
                processed,
                total,
                percent: percent_of(processed, total),
                current_job: snapshot.as_ref().and_then(|snap| snap.current_job.clone()),
                results: snapshot
                    .as_ref()
                    .map(|snap| snap.results.clone())
                    .unwrap_or_default(),
                stalled: *stalled,
            }
        }
        BatchState::Summary { snapshot } => BatchView::Summary {
            applied: snapshot.count_with_status(BatchItemStatus::Done),
            failed: snapshot.failed,
            skipped: snapshot.count_with_status(BatchItemStatus::Skipped),
            results: snapshot.results.clone(),
        },
    }
}

fn percent_of(processed: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    ((processed as f64 / total as f64) * 100.0).round() as u8
}
