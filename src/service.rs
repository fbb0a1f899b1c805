use crate::{
    api::Api,
    config::{Config, RawConfig, StoreConfig},
    network::Network,
    reminders::open_store,
    scheduler::Scheduler,
};
use anyhow::{bail, Context};
use lettre::{
    message::Mailbox, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    Tokio1Executor,
};
use std::{str::FromStr, sync::Arc};
use tracing::{info, warn};

/// Type alias for the email transport used outside of tests.
pub type SmtpTransport = AsyncSmtpTransport<Tokio1Executor>;

/// Builds the APIs collection out of the raw configuration: validates it, opens the reminder
/// store and configures the SMTP transport.
pub async fn create_api(raw_config: RawConfig) -> anyhow::Result<Api<SmtpTransport>> {
    let config = Config::try_from(raw_config)?;
    let store = open_store(&config.store).await?;

    let email_transport = if let Some(ref smtp_config) = config.smtp {
        if let Some(ref catch_all_config) = smtp_config.catch_all {
            Mailbox::from_str(catch_all_config.recipient.as_str())
                .context("Cannot parse SMTP catch-all recipient.")?;
        }

        SmtpTransport::relay(&smtp_config.address)?
            .credentials(Credentials::new(
                smtp_config.username.clone(),
                smtp_config.password.clone(),
            ))
            .build()
    } else {
        SmtpTransport::unencrypted_localhost()
    };

    Ok(Api::new(config, store, Network::new(email_transport)))
}

/// Ensures that the store outlives the process, so that changes made by a management command
/// are visible to the dispatch loop.
pub fn ensure_persistent_store(config: &StoreConfig) -> anyhow::Result<()> {
    if matches!(config, StoreConfig::Memory) {
        bail!(
            "The `memory` store only lives as long as a single process, use the `postgres` store \
             to manage reminders."
        );
    }

    Ok(())
}

/// Runs the dispatch loop until the process receives Ctrl-C.
pub async fn run(raw_config: RawConfig) -> anyhow::Result<()> {
    let api = Arc::new(create_api(raw_config).await?);
    if !api.config.scheduler.enabled {
        warn!("Reminders dispatch scheduler is disabled, nothing to run.");
        return Ok(());
    }

    if matches!(api.config.store, StoreConfig::Memory) {
        warn!(
            "Reminders are kept in process memory, reminders added by other processes won't be \
             dispatched."
        );
    }

    let scheduler = Scheduler::start(api).await?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for the shutdown signal.")?;
    info!("Shutdown signal received, stopping reminders dispatch scheduler.");

    scheduler.shutdown().await
}
