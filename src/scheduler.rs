//! Named background jobs driven by a single tick loop, per §4.8.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

pub type JobId = String;

/// A single tracked job: identity, cadence, and run counters (§4.8).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledJob {
    pub id: JobId,
    pub name: String,
    pub interval_minutes: i64,
    pub enabled: bool,
    pub last_run: Option<DateTime<Utc>>,
    pub next_run: DateTime<Utc>,
    pub retry_count: u32,
    pub max_retries: u32,
    pub total_runs: u64,
    pub successful_runs: u64,
    pub failed_runs: u64,
    pub last_error: Option<String>,
}

impl ScheduledJob {
    pub fn new(id: impl Into<String>, name: impl Into<String>, interval_minutes: i64, max_retries: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            interval_minutes,
            enabled: true,
            last_run: None,
            next_run: Utc::now(),
            retry_count: 0,
            max_retries,
            total_runs: 0,
            successful_runs: 0,
            failed_runs: 0,
            last_error: None,
        }
    }
}

/// Persisted shape for the scheduler jobs file (§6.2).
#[derive(Debug, Serialize, Deserialize)]
pub struct SchedulerJobsFile {
    pub check_interval: u64,
    pub jobs: HashMap<JobId, ScheduledJob>,
}

/// A runnable unit of work dispatched by the scheduler. Job bodies are boxed async closures
/// producing a `Result`; the scheduler only cares whether the run succeeded.
pub type JobFn = Arc<dyn Fn() -> futures::future::BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

struct RegisteredJob {
    job: ScheduledJob,
    run: JobFn,
}

/// Maintains a set of named jobs and drives them from a single background tick loop, per §4.8.
/// The job map is guarded against concurrent add/remove/enable/disable via the scan loop
/// (`Arc<RwLock<HashMap<JobId, ScheduledJob>>>`, §5).
pub struct Scheduler {
    jobs: Arc<RwLock<HashMap<JobId, RegisteredJob>>>,
    tick_interval_secs: u64,
    stop: Arc<tokio::sync::Notify>,
}

impl Scheduler {
    pub fn new(tick_interval_secs: u64) -> Self {
        Self {
            jobs: Arc::new(RwLock::new(HashMap::new())),
            tick_interval_secs,
            stop: Arc::new(tokio::sync::Notify::new()),
        }
    }

    pub async fn add(&self, job: ScheduledJob, run: JobFn) {
        let id = job.id.clone();
        self.jobs.write().await.insert(id, RegisteredJob { job, run });
    }

    pub async fn remove(&self, id: &str) {
        self.jobs.write().await.remove(id);
    }

    pub async fn enable(&self, id: &str) {
        if let Some(entry) = self.jobs.write().await.get_mut(id) {
            entry.job.enabled = true;
        }
    }

    pub async fn disable(&self, id: &str) {
        if let Some(entry) = self.jobs.write().await.get_mut(id) {
            entry.job.enabled = false;
        }
    }

    pub async fn set_interval(&self, id: &str, minutes: i64) {
        if let Some(entry) = self.jobs.write().await.get_mut(id) {
            entry.job.interval_minutes = minutes;
        }
    }

    pub async fn jobs_snapshot(&self) -> Vec<ScheduledJob> {
        self.jobs.read().await.values().map(|e| e.job.clone()).collect()
    }

    fn record_success(job: &mut ScheduledJob, now: DateTime<Utc>) {
        job.last_run = Some(now);
        job.next_run = now + Duration::minutes(job.interval_minutes);
        job.successful_runs += 1;
        job.retry_count = 0;
        job.last_error = None;
    }

    fn record_failure(job: &mut ScheduledJob, now: DateTime<Utc>, message: String) {
        job.failed_runs += 1;
        job.retry_count += 1;
        job.last_error = Some(message);
        if job.retry_count < job.max_retries {
            job.next_run = now + Duration::minutes(5);
        } else {
            job.retry_count = 0;
            job.next_run = now + Duration::minutes(job.interval_minutes);
        }
    }

    /// Runs one tick: dispatches every enabled job whose `next_run <= now` concurrently, each on
    /// its own task so a slow job never blocks the loop (§4.8).
    pub async fn tick(&self) {
        let now = Utc::now();
        let due: Vec<(JobId, JobFn)> = {
            let guard = self.jobs.read().await;
            guard
                .values()
                .filter(|e| e.job.enabled && e.job.next_run <= now)
                .map(|e| (e.job.id.clone(), e.run.clone()))
                .collect()
        };

        if due.is_empty() {
            return;
        }

        let mut handles = Vec::new();
        for (id, run) in due {
            let jobs = self.jobs.clone();
            handles.push(tokio::spawn(async move {
                info!(job_id = %id, "dispatching job");
                let result = run().await;
                let now = Utc::now();
                let mut guard = jobs.write().await;
                if let Some(entry) = guard.get_mut(&id) {
                    entry.job.total_runs += 1;
                    match result {
                        Ok(()) => {
                            Scheduler::record_success(&mut entry.job, now);
                            info!(job_id = %id, "job completed successfully");
                        }
                        Err(e) => {
                            Scheduler::record_failure(&mut entry.job, now, e.to_string());
                            error!(job_id = %id, error = %e, "job failed");
                        }
                    }
                }
            }));
        }
        for handle in handles {
            let _ = handle.await;
        }
    }

    /// Runs the background tick loop until `shutdown` is signaled.
    pub async fn run(self: Arc<Self>) {
        loop {
            tokio::select! {
                _ = tokio::time::sleep(tokio::time::Duration::from_secs(self.tick_interval_secs)) => {
                    self.tick().await;
                }
                _ = self.stop.notified() => {
                    info!("scheduler loop observed stop signal");
                    break;
                }
            }
        }
    }

    /// Signals the loop to stop; waits up to `grace` for it to observe the signal.
    pub async fn shutdown(&self, grace: std::time::Duration) {
        self.stop.notify_one();
        tokio::time::sleep(grace.min(std::time::Duration::from_secs(10))).await;
    }

    pub async fn to_persisted_file(&self) -> SchedulerJobsFile {
        let jobs = self
            .jobs
            .read()
            .await
            .values()
            .map(|e| (e.job.id.clone(), e.job.clone()))
            .collect();
        SchedulerJobsFile {
            check_interval: self.tick_interval_secs,
            jobs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counting_job(counter: Arc<AtomicU32>, fail: bool) -> JobFn {
        Arc::new(move || {
            let counter = counter.clone();
            Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
                if fail {
                    Err(anyhow::anyhow!("boom"))
                } else {
                    Ok(())
                }
            })
        })
    }

    #[tokio::test]
    async fn successful_job_advances_next_run_and_resets_retry() {
        let scheduler = Scheduler::new(60);
        let counter = Arc::new(AtomicU32::new(0));
        let mut job = ScheduledJob::new("job1", "Job One", 30, 3);
        job.next_run = Utc::now() - Duration::seconds(1);
        scheduler.add(job, counting_job(counter.clone(), false)).await;

        scheduler.tick().await;

        let jobs = scheduler.jobs_snapshot().await;
        let j = jobs.iter().find(|j| j.id == "job1").unwrap();
        assert_eq!(j.successful_runs, 1);
        assert_eq!(j.retry_count, 0);
        assert!(j.next_run > Utc::now());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_job_retries_before_falling_back_to_full_interval() {
        let scheduler = Scheduler::new(60);
        let counter = Arc::new(AtomicU32::new(0));
        let mut job = ScheduledJob::new("job2", "Job Two", 30, 2);
        job.next_run = Utc::now() - Duration::seconds(1);
        scheduler.add(job, counting_job(counter.clone(), true)).await;

        scheduler.tick().await;
        let jobs = scheduler.jobs_snapshot().await;
        let j = jobs.iter().find(|j| j.id == "job2").unwrap();
        assert_eq!(j.retry_count, 1);
        assert_eq!(j.failed_runs, 1);
        assert!(j.last_error.is_some());
        // retry_count (1) < max_retries (2): short 5-minute retry window.
        assert!(j.next_run < Utc::now() + Duration::minutes(6));
    }

    #[tokio::test]
    async fn disabled_job_is_not_dispatched() {
        let scheduler = Scheduler::new(60);
        let counter = Arc::new(AtomicU32::new(0));
        let mut job = ScheduledJob::new("job3", "Job Three", 30, 3);
        job.next_run = Utc::now() - Duration::seconds(1);
        job.enabled = false;
        scheduler.add(job, counting_job(counter.clone(), false)).await;

        scheduler.tick().await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
