mod database_config;
mod raw_config;
mod reminders_config;
mod scheduler_config;
mod smtp_config;
mod store_config;

use crate::reminders::TimeNormalizer;
use anyhow::{bail, Context};

pub use self::{
    database_config::DatabaseConfig, raw_config::RawConfig, reminders_config::RemindersConfig,
    scheduler_config::SchedulerConfig, smtp_config::SmtpConfig, store_config::StoreConfig,
};

/// Main service config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Defines where reminders are persisted.
    pub store: StoreConfig,
    /// Configuration for the SMTP functionality.
    pub smtp: Option<SmtpConfig>,
    /// Configuration for the dispatch scheduler.
    pub scheduler: SchedulerConfig,
    /// Configuration for the reminders intake and delivery.
    pub reminders: RemindersConfig,
}

impl TryFrom<RawConfig> for Config {
    type Error = anyhow::Error;

    fn try_from(raw_config: RawConfig) -> Result<Self, Self::Error> {
        TimeNormalizer::resolve_zone(&raw_config.reminders.default_zone)
            .context("Invalid `reminders.default_zone` configuration.")?;

        // Repeated jobs are scheduled with a whole-second resolution.
        let tick_period = raw_config.scheduler.tick_period;
        if tick_period.as_secs() == 0 || tick_period.subsec_nanos() != 0 {
            bail!(
                "Scheduler `tick_period` should be a whole number of seconds and at least 1 second, \
                 but got {}ms.",
                tick_period.as_millis()
            );
        }

        if raw_config.scheduler.dispatch_concurrency == 0 {
            bail!("Scheduler `dispatch_concurrency` should be at least 1.");
        }

        Ok(Self {
            store: raw_config.store,
            smtp: raw_config.smtp,
            scheduler: raw_config.scheduler,
            reminders: raw_config.reminders,
        })
    }
}
