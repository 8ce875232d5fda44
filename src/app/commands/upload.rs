//! `upload`: import an archive and optionally wait for the import task to finish.

use std::path::Path;
use std::time::Duration;

use crate::domain::{AppError, PollPolicy, TaskState};
use crate::ports::ImportClient;

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Accepted; the import continues server-side.
    Submitted { task_id: String },
    /// The import task reported `Succeeded`.
    Completed { task_id: String, attempts: u32 },
}

impl UploadOutcome {
    pub fn task_id(&self) -> &str {
        match self {
            UploadOutcome::Submitted { task_id } | UploadOutcome::Completed { task_id, .. } => task_id,
        }
    }
}

/// Post `archive`; with `wait`, poll the task until it succeeds, fails, or the policy runs out.
pub fn execute<C, S>(
    client: &C,
    archive: &Path,
    wait: bool,
    policy: &PollPolicy,
    sleep: S,
) -> Result<UploadOutcome, AppError>
where
    C: ImportClient,
    S: FnMut(Duration),
{
    let task_id = client.upload(archive)?;
    if !wait {
        return Ok(UploadOutcome::Submitted { task_id });
    }

    let attempts = wait_for_task(client, &task_id, archive, policy, sleep)?;
    Ok(UploadOutcome::Completed { task_id, attempts })
}

/// Poll until a terminal state. Returns the number of status checks made.
pub fn wait_for_task<C, S>(
    client: &C,
    task_id: &str,
    archive: &Path,
    policy: &PollPolicy,
    mut sleep: S,
) -> Result<u32, AppError>
where
    C: ImportClient,
    S: FnMut(Duration),
{
    for attempt in 1..=policy.max_attempts {
        let state = client.fetch_state(task_id, archive)?;
        tracing::info!(task_id, attempt, state = state.as_str(), "import task status");

        match state {
            TaskState::Succeeded => return Ok(attempt),
            TaskState::Failed => {
                return Err(AppError::UploadFailed {
                    course_id: client.course_id().to_string(),
                    archive: archive.display().to_string(),
                });
            }
            TaskState::Pending(_) if attempt < policy.max_attempts => sleep(policy.delay_after(attempt)),
            TaskState::Pending(_) => {}
        }
    }

    Err(AppError::UploadTimedOut {
        course_id: client.course_id().to_string(),
        archive: archive.display().to_string(),
        attempts: policy.max_attempts,
    })
}
