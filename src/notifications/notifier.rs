use crate::{
    api::Api,
    network::{EmailTransport, EmailTransportError},
    notifications::SendFailure,
};
use lettre::{message::Mailbox, Message};
use tracing::debug;

/// Sends a single plain-text email. Doesn't retry or throttle: retries happen through the
/// dispatch loop re-selecting reminders that are still pending.
pub struct Notifier<'a, ET: EmailTransport> {
    api: &'a Api<ET>,
}

impl<'a, ET: EmailTransport> Notifier<'a, ET>
where
    ET::Error: EmailTransportError,
{
    /// Creates Notifier API.
    pub fn new(api: &'a Api<ET>) -> Self {
        Self { api }
    }

    /// Sends email to the recipient. Success means the provider accepted the email.
    pub async fn send(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), SendFailure> {
        let message = self.build_message(recipient, subject, body)?;
        self.api
            .network
            .email_transport
            .send(message)
            .await
            .map_err(|err| SendFailure::from_transport_error(&err))?;

        debug!(email.subject = subject, "Email has been accepted by the provider.");

        Ok(())
    }

    fn build_message(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<Message, SendFailure> {
        let sender = match self.api.config.smtp {
            Some(ref smtp) => smtp.username.as_str(),
            None => self.api.config.reminders.sender.as_str(),
        };
        let sender = sender.parse::<Mailbox>().map_err(|err| {
            SendFailure::invalid_message(format!("Cannot parse FROM address: {err}"))
        })?;

        // Checks if the email text matches the regular expression specified in `text_matcher`.
        let catch_all_recipient = self.api.config.smtp.as_ref().and_then(|smtp| {
            smtp.catch_all.as_ref().and_then(|catch_all| {
                if catch_all.text_matcher.is_match(body) {
                    Some(catch_all.recipient.as_str())
                } else {
                    None
                }
            })
        });
        let to = catch_all_recipient.unwrap_or(recipient);
        let to = to.parse::<Mailbox>().map_err(|err| {
            SendFailure::invalid_message(format!("Cannot parse TO address `{to}`: {err}"))
        })?;

        Message::builder()
            .from(sender.clone())
            .reply_to(sender)
            .to(to)
            .subject(subject)
            .date_now()
            .body(body.to_string())
            .map_err(|err| SendFailure::invalid_message(format!("Cannot build email: {err}")))
    }
}

impl<ET: EmailTransport> Api<ET>
where
    ET::Error: EmailTransportError,
{
    /// Returns an API to send emails.
    pub fn notifier(&self) -> Notifier<ET> {
        Notifier::new(self)
    }
}
