use crate::{group_applications, AppState, BatchState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// Each transition of the batch workflow is applied exactly once, on the
/// message that carries it; re-delivering the same event to a state that has
/// already moved on is a no-op.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::JobToggled(id) => {
            state.selection.toggle(id);
            state.dirty = true;
            Vec::new()
        }
        Msg::PageToggled { page_ids } => {
            state.selection.toggle_page(&page_ids);
            state.dirty = true;
            Vec::new()
        }
        Msg::SelectionCleared => {
            state.selection.clear_all();
            state.dirty = true;
            Vec::new()
        }
        Msg::JobsLoaded { page } => {
            state.jobs = page;
            state.jobs_error = None;
            state.dirty = true;
            Vec::new()
        }
        Msg::JobsLoadFailed { message } => {
            state.jobs_error = Some(message);
            state.dirty = true;
            Vec::new()
        }

        Msg::SearchEdited(text) => {
            state.search_input = text;
            state.search_generation += 1;
            state.dirty = true;
            vec![Effect::ScheduleSearchSettle {
                generation: state.search_generation,
            }]
        }
        Msg::SearchSettled { generation } => {
            // A stale generation means the user kept typing; a settle that
            // would not change the applied search fires no fetch.
            if generation != state.search_generation
                || state.search_input == state.filters.search
            {
                Vec::new()
            } else {
                let search = state.search_input.clone();
                state.filters.apply_search(search);
                state.dirty = true;
                vec![Effect::FetchJobs {
                    query: state.filters.query_pairs(),
                }]
            }
        }
        Msg::StatusFilterSet(status) => {
            if status == state.filters.status {
                Vec::new()
            } else {
                state.filters.set_status(status);
                state.dirty = true;
                vec![Effect::FetchJobs {
                    query: state.filters.query_pairs(),
                }]
            }
        }
        Msg::SourceFilterSet(source) => {
            if source == state.filters.source {
                Vec::new()
            } else {
                state.filters.set_source(source);
                state.dirty = true;
                vec![Effect::FetchJobs {
                    query: state.filters.query_pairs(),
                }]
            }
        }
        Msg::MinScoreSet(min_score) => {
            if min_score == state.filters.min_score {
                Vec::new()
            } else {
                state.filters.set_min_score(min_score);
                state.dirty = true;
                vec![Effect::FetchJobs {
                    query: state.filters.query_pairs(),
                }]
            }
        }
        Msg::MinSalarySet(min_salary) => {
            if min_salary == state.filters.min_salary {
                Vec::new()
            } else {
                state.filters.set_min_salary(min_salary);
                state.dirty = true;
                vec![Effect::FetchJobs {
                    query: state.filters.query_pairs(),
                }]
            }
        }
        Msg::PageRequested { skip } => {
            if skip == state.filters.skip {
                Vec::new()
            } else {
                state.filters.set_skip(skip);
                state.dirty = true;
                vec![Effect::FetchJobs {
                    query: state.filters.query_pairs(),
                }]
            }
        }

        Msg::BatchOpened => {
            if matches!(state.batch, BatchState::Idle) && !state.selection.is_empty() {
                state.batch = BatchState::Confirm {
                    jobs: state.selected_job_summaries(),
                    submitting: false,
                    error: None,
                };
                state.dirty = true;
            }
            Vec::new()
        }
        Msg::BatchStartClicked => match &mut state.batch {
            BatchState::Confirm {
                jobs,
                submitting,
                error,
            } if !*submitting && !jobs.is_empty() => {
                *submitting = true;
                *error = None;
                let job_ids = jobs.iter().map(|job| job.id.clone()).collect();
                state.dirty = true;
                vec![Effect::SubmitBatch { job_ids }]
            }
            _ => Vec::new(),
        },
        Msg::BatchSubmitSucceeded { task_id, total } => {
            let submitting = matches!(
                state.batch,
                BatchState::Confirm {
                    submitting: true,
                    ..
                }
            );
            if submitting {
                state.batch = BatchState::Processing {
                    task_id: task_id.clone(),
                    expected_total: total,
                    snapshot: None,
                    stalled: false,
                };
                state.dirty = true;
                vec![Effect::WatchTask { task_id }]
            } else {
                Vec::new()
            }
        }
        Msg::BatchSubmitFailed { message } => match &mut state.batch {
            BatchState::Confirm {
                submitting, error, ..
            } if *submitting => {
                *submitting = false;
                *error = Some(message);
                state.dirty = true;
                Vec::new()
            }
            _ => Vec::new(),
        },
        Msg::SnapshotReceived { snapshot } => {
            // Snapshots for other tasks, or re-delivered after the phase
            // already moved to Summary, change nothing.
            let watching = matches!(
                &state.batch,
                BatchState::Processing { task_id, .. } if *task_id == snapshot.task_id
            );
            if watching {
                if snapshot.done {
                    state.batch = BatchState::Summary { snapshot };
                } else if let BatchState::Processing {
                    snapshot: latest, ..
                } = &mut state.batch
                {
                    *latest = Some(snapshot);
                }
                state.dirty = true;
            }
            Vec::new()
        }
        Msg::PollStalled { task_id } => match &mut state.batch {
            BatchState::Processing {
                task_id: current,
                stalled,
                ..
            } if *current == task_id => {
                *stalled = true;
                state.dirty = true;
                Vec::new()
            }
            _ => Vec::new(),
        },
        Msg::BatchClosed => match std::mem::take(&mut state.batch) {
            BatchState::Idle => Vec::new(),
            BatchState::Confirm { .. } => {
                state.dirty = true;
                Vec::new()
            }
            BatchState::Processing { .. } => {
                // Fire-and-forget: stop observing, never cancel server-side.
                state.dirty = true;
                vec![Effect::DetachPoll]
            }
            BatchState::Summary { .. } => {
                state.selection.clear_all();
                state.dirty = true;
                vec![
                    Effect::FetchJobs {
                        query: state.filters.query_pairs(),
                    },
                    Effect::FetchPipeline,
                ]
            }
        },

        Msg::ApplyRequested { request } => {
            vec![Effect::CreateApplication { request }]
        }
        Msg::ApplyCompleted => {
            vec![
                Effect::FetchJobs {
                    query: state.filters.query_pairs(),
                },
                Effect::FetchPipeline,
            ]
        }
        Msg::ApplyFailed { message } => {
            state.jobs_error = Some(message);
            state.dirty = true;
            Vec::new()
        }

        Msg::PipelineLoaded { records } => {
            state.board = group_applications(records);
            state.pipeline_error = None;
            state.dirty = true;
            Vec::new()
        }
        Msg::PipelineLoadFailed { message } => {
            state.pipeline_error = Some(message);
            state.dirty = true;
            Vec::new()
        }
        Msg::StatusChangeRequested {
            application_id,
            status,
        } => {
            vec![Effect::UpdateApplication {
                application_id,
                patch: crate::ApplicationPatch::status(status),
            }]
        }
        Msg::ApplicationEditRequested {
            application_id,
            patch,
        } => {
            vec![Effect::UpdateApplication {
                application_id,
                patch,
            }]
        }
        Msg::ApplicationUpdated => vec![Effect::FetchPipeline],
        Msg::ApplicationUpdateFailed { message } => {
            state.pipeline_error = Some(message);
            state.dirty = true;
            Vec::new()
        }
    };

    (state, effects)
}
