use crate::{
    api::Api,
    database::Database,
    network::{EmailTransport, EmailTransportError},
    reminders::DispatchReport,
    scheduler::TickGuard,
};
use std::{sync::Arc, time::Instant};
use tokio_cron_scheduler::Job;
use tracing::{debug, error, info, trace};

/// The job run on a fixed interval to send emails for the reminders that are due.
pub(crate) struct RemindersDispatchJob;
impl RemindersDispatchJob {
    /// Creates a new `RemindersDispatchJob` job.
    pub fn create<ET: EmailTransport>(
        api: Arc<Api<ET>>,
        tick_guard: Arc<TickGuard>,
    ) -> anyhow::Result<Job>
    where
        ET::Error: EmailTransportError,
    {
        let tick_period = api.config.scheduler.tick_period;
        Ok(Job::new_repeated_async(tick_period, move |_, _| {
            let api = api.clone();
            let tick_guard = tick_guard.clone();
            Box::pin(async move {
                Self::execute(api, &tick_guard).await;
            })
        })?)
    }

    /// Executes a single dispatch tick. Returns `None` if the tick was skipped or failed.
    pub async fn execute<ET: EmailTransport>(
        api: Arc<Api<ET>>,
        tick_guard: &TickGuard,
    ) -> Option<DispatchReport>
    where
        ET::Error: EmailTransportError,
    {
        let Some(_tick) = tick_guard.try_begin() else {
            debug!("Previous dispatch tick is still in progress or scheduler is stopping, skipping.");
            return None;
        };

        let execute_start = Instant::now();
        match api
            .reminders()
            .dispatch_due_reminders(Database::utc_now())
            .await
        {
            Ok(report) if report.due > 0 => {
                info!(
                    reminders.due = report.due,
                    reminders.sent = report.sent,
                    reminders.send_failures = report.send_failures,
                    reminders.store_failures = report.store_failures,
                    "Dispatched {} of {} due reminders ({} elapsed).",
                    report.sent,
                    report.due,
                    humantime::format_duration(execute_start.elapsed())
                );
                Some(report)
            }
            Ok(report) => {
                trace!(
                    "No due reminders to dispatch ({} elapsed).",
                    humantime::format_duration(execute_start.elapsed())
                );
                Some(report)
            }
            Err(err) => {
                error!(
                    "Failed to retrieve due reminders, tick is aborted ({} elapsed): {err:?}",
                    humantime::format_duration(execute_start.elapsed())
                );
                None
            }
        }
    }
}
