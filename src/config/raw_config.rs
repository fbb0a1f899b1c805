use crate::config::{RemindersConfig, SchedulerConfig, SmtpConfig, StoreConfig};
use figment::{providers, providers::Format, Figment};
use serde::{Deserialize, Serialize};

/// Raw configuration structure that is used to read the configuration from the file.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct RawConfig {
    /// Defines where reminders are persisted.
    pub store: StoreConfig,
    /// Configuration for the dispatch scheduler.
    pub scheduler: SchedulerConfig,
    /// Configuration for the reminders intake and delivery.
    pub reminders: RemindersConfig,
    /// Configuration for the SMTP functionality.
    pub smtp: Option<SmtpConfig>,
}

impl RawConfig {
    /// Reads the configuration from the file (TOML) and merges it with the default values.
    pub fn read_from_file(path: &str) -> anyhow::Result<Self> {
        Ok(
            Figment::from(providers::Serialized::defaults(Self::default()))
                .merge(providers::Toml::file(path))
                .merge(providers::Env::prefixed("REMINDMAIL_").split("__"))
                .extract()?,
        )
    }
}
