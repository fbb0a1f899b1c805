use serde::{Deserialize, Serialize};

/// Configuration for the reminders intake and delivery.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct RemindersConfig {
    /// Named time zone used to interpret local date and time of the reminders that don't specify
    /// a zone explicitly.
    pub default_zone: String,
    /// Sender address used when SMTP isn't configured.
    pub sender: String,
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            default_zone: "Asia/Kolkata".to_string(),
            sender: "reminders@localhost".to_string(),
        }
    }
}
