use crate::notifications::SendFailureKind;
use lettre::{
    transport::{smtp, stub},
    AsyncTransport,
};

/// Transport used to deliver emails (SMTP in production, stubs in tests).
pub trait EmailTransport: AsyncTransport + Send + Sync + 'static {}
impl<ET: AsyncTransport + Send + Sync + 'static> EmailTransport for ET {}

/// Error returned by the email transport, classified for the logs.
pub trait EmailTransportError: std::error::Error + Send + Sync + 'static {
    /// Returns the class of the failure.
    fn failure_kind(&self) -> SendFailureKind {
        SendFailureKind::Transport
    }

    /// Returns the provider response code, if the provider responded at all.
    fn response_code(&self) -> Option<u16> {
        None
    }
}

impl EmailTransportError for smtp::Error {
    fn failure_kind(&self) -> SendFailureKind {
        if self.is_permanent() {
            SendFailureKind::Permanent
        } else if self.is_transient() {
            SendFailureKind::Transient
        } else {
            SendFailureKind::Transport
        }
    }

    fn response_code(&self) -> Option<u16> {
        self.status()
            .and_then(|code| code.to_string().parse::<u16>().ok())
    }
}

impl EmailTransportError for stub::Error {}
