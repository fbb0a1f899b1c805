use crate::network::EmailTransportError;
use std::fmt;

/// Class of the email send failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SendFailureKind {
    /// Email message couldn't be built (e.g. malformed address).
    InvalidMessage,
    /// Provider rejected the email, but the same email may be accepted later.
    Transient,
    /// Provider rejected the email permanently.
    Permanent,
    /// Provider couldn't be reached or responded with something unexpected.
    Transport,
}

impl fmt::Display for SendFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InvalidMessage => "invalid message",
            Self::Transient => "transient",
            Self::Permanent => "permanent",
            Self::Transport => "transport",
        })
    }
}

/// Describes why the email wasn't accepted. Only used for the logs, it never changes the reminder
/// status.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub struct SendFailure {
    pub kind: SendFailureKind,
    /// Provider response code, if available.
    pub response_code: Option<u16>,
    pub reason: String,
}

impl fmt::Display for SendFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.response_code {
            Some(code) => write!(
                f,
                "Failed to send email ({}, code {code}): {}",
                self.kind, self.reason
            ),
            None => write!(f, "Failed to send email ({}): {}", self.kind, self.reason),
        }
    }
}

impl SendFailure {
    /// Creates a failure for an email that couldn't be built.
    pub fn invalid_message(reason: impl Into<String>) -> Self {
        Self {
            kind: SendFailureKind::InvalidMessage,
            response_code: None,
            reason: reason.into(),
        }
    }

    /// Creates a failure out of the email transport error.
    pub fn from_transport_error<E: EmailTransportError>(err: &E) -> Self {
        Self {
            kind: err.failure_kind(),
            response_code: err.response_code(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SendFailure, SendFailureKind};
    use crate::network::tests::MockEmailTransportError;
    use insta::assert_snapshot;

    #[test]
    fn formats_failure() {
        assert_snapshot!(
            SendFailure::invalid_message("Cannot parse TO address: nobody").to_string(),
            @"Failed to send email (invalid message): Cannot parse TO address: nobody"
        );

        let failure = SendFailure::from_transport_error(&MockEmailTransportError(
            "dev@remindmail.dev".to_string(),
        ));
        assert_eq!(failure.kind, SendFailureKind::Permanent);
        assert_eq!(failure.response_code, Some(550));
        assert_snapshot!(
            failure.to_string(),
            @"Failed to send email (permanent, code 550): Mailbox unavailable: dev@remindmail.dev"
        );
    }
}
