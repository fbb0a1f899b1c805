use std::{fmt, str::FromStr};

/// Lifecycle state of the reminder.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum ReminderStatus {
    /// Reminder is waiting to be dispatched.
    Pending,
    /// Reminder email has been accepted by the provider.
    Sent,
    /// Reminder has been cancelled by the user before it was dispatched.
    Cancelled,
}

impl ReminderStatus {
    /// Indicates whether the reminder can move from the current status to the `next` one. Staying
    /// in the same status isn't a transition.
    pub fn can_transition_to(self, next: ReminderStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Sent) | (Self::Pending, Self::Cancelled)
        )
    }

    /// Returns the name used to persist the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderStatus {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "sent" => Ok(Self::Sent),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(anyhow::anyhow!("Unknown reminder status: {value}")),
        }
    }
}
