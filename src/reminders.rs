mod api_ext;
mod database_ext;
mod local_date_time;
mod memory_store;
mod reminder;
mod reminder_create_params;
mod reminder_status;
mod reminder_store;
mod time_normalizer;

pub use self::{
    api_ext::DispatchReport,
    local_date_time::LocalDateTime,
    memory_store::MemoryReminderStore,
    reminder::{Reminder, ReminderId},
    reminder_create_params::ReminderCreateParams,
    reminder_status::ReminderStatus,
    reminder_store::{ReminderStore, StoreError},
    time_normalizer::{InvalidTimeInput, TimeNormalizer},
};

use crate::{config::StoreConfig, database::Database};
use std::sync::Arc;

/// Opens the reminder store described by the config.
pub async fn open_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn ReminderStore>> {
    Ok(match config {
        StoreConfig::Postgres(db_config) => Arc::new(Database::connect(db_config).await?),
        StoreConfig::Memory => Arc::new(MemoryReminderStore::new()),
    })
}
