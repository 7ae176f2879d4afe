use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Opaque job identifier (UUID v4 under the hood).
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct JobId(String);

impl JobId {
    /// Mint a fresh random id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the id as a path-safe string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Job lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Owning task is still working.
    Processing,
    /// Finished; `output_path` is set.
    Completed,
    /// Aborted; `error` carries the human-readable message.
    Failed,
}

/// Mutable state of one generation job.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Job {
    /// Job id.
    pub id: JobId,
    /// Lifecycle state.
    pub status: JobStatus,
    /// Progress percent, 0..=100.
    pub progress: u8,
    /// Last checkpoint message.
    pub message: Option<String>,
    /// Final output, once completed.
    pub output_path: Option<PathBuf>,
    /// Failure message, once failed. A job never silently vanishes: every
    /// abort path records an error here before the task exits.
    pub error: Option<String>,
}

/// Process-wide job-state map behind a narrow keyed interface.
///
/// Each entry is created at request start, written only by its owning task
/// at defined checkpoints, read by independent status polls, and removed
/// only by explicit cleanup. Single-writer-per-key is an orchestration-layer
/// contract, not enforced here. There is no automatic expiry: entries
/// accumulate until cleanup or process restart (documented limitation).
#[derive(Clone, Debug, Default)]
pub struct JobRegistry {
    jobs: Arc<Mutex<HashMap<JobId, Job>>>,
}

impl JobRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new job in `processing` state at 0% and return its id.
    pub fn create(&self) -> JobId {
        let id = JobId::new();
        let job = Job {
            id: id.clone(),
            status: JobStatus::Processing,
            progress: 0,
            message: None,
            output_path: None,
            error: None,
        };
        self.jobs.lock().expect("job registry poisoned").insert(id.clone(), job);
        id
    }

    /// Snapshot a job's current state.
    pub fn get(&self, id: &JobId) -> Option<Job> {
        self.jobs.lock().expect("job registry poisoned").get(id).cloned()
    }

    /// Record a progress checkpoint for a processing job.
    pub fn checkpoint(&self, id: &JobId, progress: u8, message: impl Into<String>) {
        let mut jobs = self.jobs.lock().expect("job registry poisoned");
        if let Some(job) = jobs.get_mut(id) {
            job.progress = progress.min(100);
            job.message = Some(message.into());
        }
    }

    /// Mark a job completed with its output path.
    pub fn complete(&self, id: &JobId, output_path: PathBuf) {
        let mut jobs = self.jobs.lock().expect("job registry poisoned");
        if let Some(job) = jobs.get_mut(id) {
            job.status = JobStatus::Completed;
            job.progress = 100;
            job.output_path = Some(output_path);
        }
    }

    /// Mark a job failed with a human-readable message.
    pub fn fail(&self, id: &JobId, error: impl Into<String>) {
        let mut jobs = self.jobs.lock().expect("job registry poisoned");
        if let Some(job) = jobs.get_mut(id) {
            job.status = JobStatus::Failed;
            job.error = Some(error.into());
        }
    }

    /// Explicit cleanup: remove a job's state entirely.
    pub fn remove(&self, id: &JobId) -> Option<Job> {
        self.jobs.lock().expect("job registry poisoned").remove(id)
    }

    /// Number of tracked jobs.
    pub fn len(&self) -> usize {
        self.jobs.lock().expect("job registry poisoned").len()
    }

    /// Return `true` when no jobs are tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/job/registry.rs"]
mod tests;
