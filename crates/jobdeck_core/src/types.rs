use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque backend-issued job identifier.
pub type JobId = String;

/// Response of a mass-apply submission: the server-assigned task handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStarted {
    pub task_id: String,
    pub total: u32,
}

/// Terminal per-item outcome inside a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchItemStatus {
    Done,
    Failed,
    Skipped,
}

/// One job's result within a mass-apply batch.
///
/// `error` is only populated for `Failed` items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItemResult {
    pub job_id: JobId,
    pub job_title: String,
    pub status: BatchItemStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One observed progress state of a mass-apply task.
///
/// The client always replaces its copy wholesale with the newest snapshot;
/// `results` is append-only from the server's side. `completed` counts items
/// that finished as `done` or `skipped`; the split is recovered from
/// `results`. Once `done` is true no further progress will be reported for
/// this `task_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSnapshot {
    pub task_id: String,
    pub total: u32,
    pub completed: u32,
    pub failed: u32,
    #[serde(default)]
    pub current_job: Option<String>,
    #[serde(default)]
    pub results: Vec<BatchItemResult>,
    pub done: bool,
}

impl BatchSnapshot {
    /// Items with a terminal outcome so far.
    pub fn processed(&self) -> u32 {
        self.completed + self.failed
    }

    pub fn count_with_status(&self, status: BatchItemStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}

/// Fixed application stages, in pipeline display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    Responded,
    Interviewing,
    TechnicalTest,
    Offer,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 6] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Responded,
        ApplicationStatus::Interviewing,
        ApplicationStatus::TechnicalTest,
        ApplicationStatus::Offer,
        ApplicationStatus::Rejected,
    ];

    /// The wire key for this status, as stored by the backend.
    pub fn key(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Responded => "responded",
            ApplicationStatus::Interviewing => "interviewing",
            ApplicationStatus::TechnicalTest => "technical_test",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.key() == key)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// An application joined with its job, as served by the pipeline endpoint.
///
/// `status` is carried as the raw wire key: the aggregator must be able to
/// represent values outside the known enumeration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRecord {
    pub id: String,
    pub job_id: JobId,
    pub job_title: String,
    pub job_company: String,
    pub job_url: String,
    #[serde(default)]
    pub job_score: Option<f32>,
    pub applied_at: String,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub resume_version: Option<String>,
    pub status: String,
    #[serde(default)]
    pub follow_up_date: Option<String>,
    #[serde(default)]
    pub interview_notes: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: String,
}

/// A persisted application, as returned by create and update operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: String,
    pub job_id: JobId,
    pub applied_at: String,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub resume_version: Option<String>,
    pub status: String,
    #[serde(default)]
    pub follow_up_date: Option<String>,
    #[serde(default)]
    pub interview_notes: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: String,
}

/// Request body for creating one application outside the batch flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplication {
    pub job_id: JobId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_version: Option<String>,
}

/// Partial update of an application; only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<String>,
}

impl ApplicationPatch {
    pub fn status(status: ApplicationStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// One job posting row in the paged list feeding the selection view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    pub id: JobId,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub salary_min: Option<u64>,
    #[serde(default)]
    pub salary_max: Option<u64>,
    #[serde(default)]
    pub is_remote: bool,
    #[serde(default)]
    pub match_score: Option<f32>,
    pub status: String,
}

/// One page of the job list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPage {
    pub items: Vec<JobListing>,
    pub total: u32,
    pub skip: u32,
    pub limit: u32,
}

/// Display row for a job in the batch confirm phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: JobId,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub match_score: Option<f32>,
}
