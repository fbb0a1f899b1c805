use crate::config::DatabaseConfig;
use serde::{Deserialize, Serialize};

/// Defines where reminders are persisted.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Reminders are stored in Postgres.
    Postgres(DatabaseConfig),
    /// Reminders are kept in process memory and lost on exit. Only reminders created within the
    /// same process are visible, so management commands cannot use it.
    Memory,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::Postgres(DatabaseConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{DatabaseConfig, StoreConfig};
    use insta::assert_toml_snapshot;

    #[test]
    fn serialization_and_default() {
        assert_toml_snapshot!(StoreConfig::default(), @r###"
        type = 'postgres'
        name = 'remindmail'
        host = 'localhost'
        port = 5432
        username = 'postgres'
        max_connections = 100
        "###);
    }

    #[test]
    fn deserialization() {
        let config: StoreConfig = toml::from_str("type = 'memory'").unwrap();
        assert_eq!(config, StoreConfig::Memory);

        let config: StoreConfig = toml::from_str(
            r#"
        type = 'postgres'
        name = 'reminders'
        host = 'localhost'
        port = 5432
        username = 'postgres'
        max_connections = 5
    "#,
        )
        .unwrap();
        assert_eq!(
            config,
            StoreConfig::Postgres(DatabaseConfig {
                name: "reminders".to_string(),
                max_connections: 5,
                ..Default::default()
            })
        );
    }
}
