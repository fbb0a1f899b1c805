mod scheduler_jobs;
mod tick_guard;

pub(crate) use self::tick_guard::TickGuard;

use crate::{
    api::Api,
    network::{EmailTransport, EmailTransportError},
    scheduler::scheduler_jobs::RemindersDispatchJob,
};
use std::sync::Arc;
use tokio_cron_scheduler::JobScheduler;
use tracing::{debug, info};

/// Runs the reminders dispatch job on a fixed cadence.
pub struct Scheduler {
    inner_scheduler: JobScheduler,
    tick_guard: Arc<TickGuard>,
}

impl Scheduler {
    /// Starts the scheduler. The first tick happens one tick period after the start.
    pub async fn start<ET: EmailTransport>(api: Arc<Api<ET>>) -> anyhow::Result<Self>
    where
        ET::Error: EmailTransportError,
    {
        let tick_period = api.config.scheduler.tick_period;
        let inner_scheduler = JobScheduler::new().await?;
        let tick_guard = Arc::new(TickGuard::default());

        let job_id = inner_scheduler
            .add(RemindersDispatchJob::create(api, tick_guard.clone())?)
            .await?;
        inner_scheduler.start().await?;

        info!(
            scheduler.job_id = %job_id,
            "Reminders dispatch scheduler started (tick period {}).",
            humantime::format_duration(tick_period)
        );

        Ok(Self {
            inner_scheduler,
            tick_guard,
        })
    }

    /// Stops scheduling new ticks and waits for the tick in progress (if any) to complete.
    pub async fn shutdown(mut self) -> anyhow::Result<()> {
        self.tick_guard.stop();
        self.inner_scheduler.shutdown().await?;

        debug!("Waiting for the dispatch tick in progress to complete.");
        self.tick_guard.wait_idle().await;

        info!("Reminders dispatch scheduler stopped.");

        Ok(())
    }
}
