//! Text rendering of the view model for the terminal driver.

use chrono::{DateTime, Utc};
use jobdeck_core::{AppViewModel, BatchItemResult, BatchItemStatus, BatchView, JobRowView};

const PROGRESS_WIDTH: usize = 20;

pub fn render_jobs(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(error) = &view.jobs_error {
        lines.push(format!("Failed to load jobs: {error}"));
        return lines;
    }

    lines.push(format!(
        "{} jobs ({} shown, offset {}) | {} selected",
        view.jobs_total,
        view.jobs.len(),
        view.filters.skip,
        view.selection_count
    ));
    for job in &view.jobs {
        lines.push(render_job_row(job));
    }
    lines
}

fn render_job_row(job: &JobRowView) -> String {
    let marker = if job.selected { "[x]" } else { "[ ]" };
    let score = job
        .match_score
        .map(|score| format!("{score:>3.0}"))
        .unwrap_or_else(|| "  -".to_string());
    let location = job.location.as_deref().unwrap_or("unknown location");
    format!(
        "{marker} {score}  {} at {} ({location}) [{}]",
        job.title, job.company, job.status
    )
}

pub fn render_batch(view: &AppViewModel) -> Vec<String> {
    match &view.batch {
        BatchView::Idle => Vec::new(),
        BatchView::Confirm {
            rows,
            submitting,
            error,
        } => {
            let mut lines = vec![format!(
                "Apply to {} job{} with generated cover letters:",
                rows.len(),
                if rows.len() == 1 { "" } else { "s" }
            )];
            for row in rows {
                let score = row
                    .match_score
                    .map(|score| format!("{score:>3.0}"))
                    .unwrap_or_else(|| "  -".to_string());
                if row.company.is_empty() {
                    lines.push(format!("  {score}  {}", row.title));
                } else {
                    lines.push(format!("  {score}  {} at {}", row.title, row.company));
                }
            }
            if let Some(error) = error {
                lines.push(format!("Could not start: {error}"));
            }
            if *submitting {
                lines.push("Submitting...".to_string());
            }
            lines
        }
        BatchView::Processing {
            processed,
            total,
            percent,
            current_job,
            results,
            stalled,
        } => {
            let mut lines = vec![format!(
                "[{}] {processed}/{total} ({percent}%)",
                progress_bar(*percent)
            )];
            if let Some(current) = current_job {
                lines.push(format!("  working on: {current}"));
            }
            for result in results {
                lines.push(render_result_row(result));
            }
            if *stalled {
                lines.push(
                    "Progress unknown: status checks keep failing. The batch continues \
                     server-side; re-open the flow later to see the outcome."
                        .to_string(),
                );
            }
            lines
        }
        BatchView::Summary {
            applied,
            failed,
            skipped,
            results,
        } => {
            let mut lines = vec![format!(
                "Applied: {applied} | Failed: {failed} | Skipped: {skipped}"
            )];
            for result in results {
                lines.push(render_result_row(result));
            }
            lines
        }
    }
}

fn render_result_row(result: &BatchItemResult) -> String {
    let marker = match result.status {
        BatchItemStatus::Done => '+',
        BatchItemStatus::Failed => 'x',
        BatchItemStatus::Skipped => '>',
    };
    match &result.error {
        Some(error) => format!("  {marker} {} ({error})", result.job_title),
        None => format!("  {marker} {}", result.job_title),
    }
}

fn progress_bar(percent: u8) -> String {
    let filled = (usize::from(percent.min(100)) * PROGRESS_WIDTH) / 100;
    let mut bar = String::with_capacity(PROGRESS_WIDTH);
    for position in 0..PROGRESS_WIDTH {
        bar.push(if position < filled { '#' } else { '-' });
    }
    bar
}

pub fn render_board(view: &AppViewModel, now: DateTime<Utc>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(error) = &view.pipeline_error {
        lines.push(format!("Failed to load applications: {error}"));
        return lines;
    }

    for column in &view.columns {
        lines.push(format!("{} ({})", column.label, column.rows.len()));
        for row in &column.rows {
            lines.push(format!(
                "  {} at {} (applied {})",
                row.job_title,
                row.job_company,
                relative_time(&row.applied_at, now)
            ));
        }
    }
    if view.unrecognized_statuses > 0 {
        lines.push(format!(
            "Warning: {} application(s) with an unrecognized status are shown under Applied.",
            view.unrecognized_statuses
        ));
    }
    lines
}

/// Compact relative timestamp; falls back to the raw value when it does not
/// parse as RFC 3339.
pub fn relative_time(timestamp: &str, now: DateTime<Utc>) -> String {
    let parsed = match DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => parsed.with_timezone(&Utc),
        Err(_) => return timestamp.to_string(),
    };
    let delta = now.signed_duration_since(parsed);
    if delta.num_minutes() < 1 {
        "just now".to_string()
    } else if delta.num_minutes() < 60 {
        format!("{}m ago", delta.num_minutes())
    } else if delta.num_hours() < 24 {
        format!("{}h ago", delta.num_hours())
    } else {
        format!("{}d ago", delta.num_days())
    }
}
