//! Background synchronization jobs addressed by trace id.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use travel_sync_core::Search;
use uuid::Uuid;

use crate::loader::{LoadReport, LoadStage, LoadState, Loader};

/// Finished jobs beyond this count are forgotten, oldest first.
pub const MAX_TRACKED_JOBS: usize = 1024;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running { state: LoadState },
    Succeeded { report: LoadReport },
    Failed { stage: LoadStage, error: String },
}

impl JobStatus {
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRecord {
    pub trace_id: String,
    pub search: Search,
    #[serde(flatten)]
    pub status: JobStatus,
    pub submitted_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// Runs loads in the background and remembers their outcome.
pub struct JobService {
    loader: Arc<Loader>,
    jobs: RwLock<HashMap<String, JobRecord>>,
}

impl JobService {
    #[must_use]
    pub fn new(loader: Arc<Loader>) -> Self {
        Self { loader, jobs: RwLock::new(HashMap::new()) }
    }

    /// Start a load for `search` and return its trace id immediately.
    pub async fn submit(self: &Arc<Self>, search: Search) -> String {
        let trace_id = Uuid::new_v4().to_string();
        let record = JobRecord {
            trace_id: trace_id.clone(),
            search: search.clone(),
            status: JobStatus::Pending,
            submitted_at: Utc::now(),
            finished_at: None,
        };
        {
            let mut jobs = self.jobs.write().await;
            prune(&mut jobs);
            jobs.insert(trace_id.clone(), record);
        }

        let service = Arc::clone(self);
        let id = trace_id.clone();
        tokio::spawn(async move {
            service.run(&id, &search).await;
        });
        trace_id
    }

    /// Snapshot of a job, `None` if unknown or already forgotten.
    pub async fn status(&self, trace_id: &str) -> Option<JobRecord> {
        self.jobs.read().await.get(trace_id).cloned()
    }

    async fn run(&self, trace_id: &str, search: &Search) {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let load = self.loader.update_data_observed(trace_id, search, move |state| {
            let _ = tx.send(state);
        });
        tokio::pin!(load);

        let result = loop {
            tokio::select! {
                result = &mut load => break result,
                Some(state) = rx.recv() => self.set_status(trace_id, JobStatus::Running { state }).await,
            }
        };

        let status = match result {
            Ok(report) => JobStatus::Succeeded { report },
            Err(e) => JobStatus::Failed { stage: e.stage, error: e.to_string() },
        };
        let mut jobs = self.jobs.write().await;
        if let Some(record) = jobs.get_mut(trace_id) {
            record.status = status;
            record.finished_at = Some(Utc::now());
        }
    }

    async fn set_status(&self, trace_id: &str, status: JobStatus) {
        if let Some(record) = self.jobs.write().await.get_mut(trace_id) {
            record.status = status;
        }
    }
}

fn prune(jobs: &mut HashMap<String, JobRecord>) {
    if jobs.len() < MAX_TRACKED_JOBS {
        return;
    }
    let mut finished: Vec<_> = jobs
        .values()
        .filter(|r| r.status.is_finished())
        .map(|r| (r.submitted_at, r.trace_id.clone()))
        .collect();
    finished.sort();
    let excess = jobs.len() + 1 - MAX_TRACKED_JOBS;
    for (_, trace_id) in finished.into_iter().take(excess) {
        jobs.remove(&trace_id);
    }
}
