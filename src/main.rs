mod api;
mod config;
mod database;
mod network;
mod notifications;
mod reminders;
mod scheduler;
mod service;

use crate::{
    config::RawConfig,
    reminders::{ReminderCreateParams, ReminderId},
    service::SmtpTransport,
};
use anyhow::anyhow;
use clap::{
    crate_authors, crate_description, crate_version, value_parser, Arg, ArgMatches, Command,
};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("RemindMail")
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .subcommand_required(true)
        .arg(
            Arg::new("CONFIG")
                .env("REMINDMAIL_CONFIG")
                .short('c')
                .long("config")
                .global(true)
                .default_value("remindmail.toml")
                .help("Path to the RemindMail configuration file."),
        )
        .subcommand(Command::new("run").about("Runs the reminders dispatch loop until Ctrl-C."))
        .subcommand(
            Command::new("add")
                .about("Creates a new reminder.")
                .arg(
                    Arg::new("RECIPIENT")
                        .long("to")
                        .required(true)
                        .help("Email address to deliver the reminder to."),
                )
                .arg(
                    Arg::new("TASK")
                        .long("task")
                        .required(true)
                        .help("Description of the task to remind about."),
                )
                .arg(
                    Arg::new("DATE")
                        .long("date")
                        .required(true)
                        .help("Local date in YYYY-MM-DD format."),
                )
                .arg(
                    Arg::new("TIME")
                        .long("time")
                        .required(true)
                        .help("Local time in HH:MM format."),
                )
                .arg(
                    Arg::new("ZONE")
                        .long("zone")
                        .help("Time zone name, e.g. Asia/Kolkata (configured default if omitted)."),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("Lists all reminders.")
                .arg(
                    Arg::new("ZONE")
                        .long("zone")
                        .help("Time zone to display scheduled time in."),
                ),
        )
        .subcommand(
            Command::new("cancel").about("Cancels pending reminder.").arg(
                Arg::new("ID")
                    .required(true)
                    .value_parser(value_parser!(ReminderId)),
            ),
        )
        .subcommand(
            Command::new("remove").about("Removes reminder.").arg(
                Arg::new("ID")
                    .required(true)
                    .value_parser(value_parser!(ReminderId)),
            ),
        )
}

fn create_params(matches: &ArgMatches) -> anyhow::Result<ReminderCreateParams> {
    let get_arg = |name: &str| {
        matches
            .get_one::<String>(name)
            .cloned()
            .ok_or_else(|| anyhow!("<{name}> argument is not provided."))
    };

    Ok(ReminderCreateParams {
        recipient: get_arg("RECIPIENT")?,
        task_description: get_arg("TASK")?,
        local_date: get_arg("DATE")?,
        local_time: get_arg("TIME")?,
        zone_name: matches.get_one::<String>("ZONE").cloned(),
    })
}

fn reminder_id(matches: &ArgMatches) -> anyhow::Result<ReminderId> {
    matches
        .get_one::<ReminderId>("ID")
        .copied()
        .ok_or_else(|| anyhow!("<ID> argument is not provided."))
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    if env::var("RUST_LOG_FORMAT").is_ok_and(|format| format == "json") {
        tracing_subscriber::fmt()
            .json()
            .flatten_event(true)
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        tracing_subscriber::fmt::init();
    }

    // Install default crypto provider.
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Failed to install default RusTLS crypto provider."))?;

    let matches = cli().get_matches();
    let raw_config = RawConfig::read_from_file(
        matches
            .get_one::<String>("CONFIG")
            .ok_or_else(|| anyhow!("<CONFIG> argument is not provided."))?,
    )?;

    info!(config = ?raw_config, "RemindMail raw configuration.");

    let (command, command_matches) = matches
        .subcommand()
        .ok_or_else(|| anyhow!("Command is not provided."))?;
    if command == "run" {
        return service::run(raw_config).await;
    }

    service::ensure_persistent_store(&raw_config.store)?;
    let api = service::create_api(raw_config).await?;
    match command {
        "add" => add_reminder(&api, command_matches).await,
        "list" => list_reminders(&api, command_matches).await,
        "cancel" => {
            let id = reminder_id(command_matches)?;
            api.reminders().cancel_reminder(id).await?;
            println!("Reminder {id} is cancelled.");
            Ok(())
        }
        "remove" => {
            let id = reminder_id(command_matches)?;
            api.reminders().remove_reminder(id).await?;
            println!("Reminder {id} is removed.");
            Ok(())
        }
        _ => Err(anyhow!("Unknown command `{command}`.")),
    }
}

async fn add_reminder(api: &api::Api<SmtpTransport>, matches: &ArgMatches) -> anyhow::Result<()> {
    let reminder = api
        .reminders()
        .create_reminder(create_params(matches)?)
        .await?;
    println!(
        "Reminder {} is scheduled at {}.",
        reminder.id, reminder.scheduled_at
    );

    Ok(())
}

async fn list_reminders(
    api: &api::Api<SmtpTransport>,
    matches: &ArgMatches,
) -> anyhow::Result<()> {
    let zone_name = matches
        .get_one::<String>("ZONE")
        .map(String::as_str)
        .unwrap_or(&api.config.reminders.default_zone);

    let reminders_api = api.reminders();
    for reminder in reminders_api.list_reminders().await? {
        let local = reminders_api.local_time(&reminder, Some(zone_name))?;
        println!(
            "{}\t{}\t{local} ({zone_name})\t{}\t{}",
            reminder.id, reminder.status, reminder.recipient, reminder.task_description
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{
        api::Api,
        config::{Config, RemindersConfig, SchedulerConfig, StoreConfig},
        network::{EmailTransport, Network},
        reminders::{
            MemoryReminderStore, Reminder, ReminderCreateParams, ReminderStatus, ReminderStore,
        },
    };
    use std::sync::Arc;
    use time::{macros::datetime, OffsetDateTime};
    use uuid::Uuid;

    pub use crate::network::tests::*;

    pub fn mock_config() -> Config {
        Config {
            store: StoreConfig::Memory,
            smtp: None,
            scheduler: SchedulerConfig::default(),
            reminders: RemindersConfig {
                default_zone: "Asia/Kolkata".to_string(),
                sender: "reminders@remindmail.dev".to_string(),
            },
        }
    }

    pub fn mock_api() -> Api<MockEmailTransport> {
        mock_api_with_transport(mock_config(), MockEmailTransport::new())
    }

    pub fn mock_api_with_transport<ET: EmailTransport>(config: Config, transport: ET) -> Api<ET> {
        mock_api_with_store(config, Arc::new(MemoryReminderStore::new()), transport)
    }

    pub fn mock_api_with_store<ET: EmailTransport>(
        config: Config,
        store: Arc<dyn ReminderStore>,
        transport: ET,
    ) -> Api<ET> {
        Api::new(config, store, Network::new(transport))
    }

    pub fn mock_reminder(n: u128, scheduled_at: OffsetDateTime) -> Reminder {
        Reminder {
            id: Uuid::from_u128(n),
            recipient: format!("user{n}@remindmail.dev"),
            task_description: format!("Task #{n}"),
            scheduled_at,
            status: ReminderStatus::Pending,
            created_at: datetime!(2025-10-01 00:00 UTC),
        }
    }

    pub fn mock_create_params(
        recipient: &str,
        local_date: &str,
        local_time: &str,
        zone_name: Option<&str>,
    ) -> ReminderCreateParams {
        ReminderCreateParams {
            recipient: recipient.to_string(),
            task_description: "Water the plants".to_string(),
            local_date: local_date.to_string(),
            local_time: local_time.to_string(),
            zone_name: zone_name.map(str::to_string),
        }
    }

    mod cli {
        use crate::{cli, create_params, reminder_id};
        use insta::assert_debug_snapshot;

        #[test]
        fn cli_is_valid() {
            cli().debug_assert();
        }

        #[test]
        fn parses_add_command() -> anyhow::Result<()> {
            let matches = cli().try_get_matches_from([
                "remindmail",
                "add",
                "--to",
                "dev@remindmail.dev",
                "--task",
                "Water the plants",
                "--date",
                "2025-10-25",
                "--time",
                "10:30",
            ])?;
            let (command, matches) = matches.subcommand().unwrap();
            assert_eq!(command, "add");
            assert_debug_snapshot!(create_params(matches)?, @r###"
            ReminderCreateParams {
                recipient: "dev@remindmail.dev",
                task_description: "Water the plants",
                local_date: "2025-10-25",
                local_time: "10:30",
                zone_name: None,
            }
            "###);

            Ok(())
        }

        #[test]
        fn parses_reminder_id() -> anyhow::Result<()> {
            let matches = cli().try_get_matches_from([
                "remindmail",
                "cancel",
                "00000000-0000-0000-0000-000000000001",
            ])?;
            let (_, matches) = matches.subcommand().unwrap();
            assert_eq!(reminder_id(matches)?.as_u128(), 1);

            assert!(cli()
                .try_get_matches_from(["remindmail", "remove", "not-an-id"])
                .is_err());

            Ok(())
        }
    }
}
