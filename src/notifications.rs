mod notifier;
mod reminder_email;
mod send_failure;

pub use self::{
    reminder_email::ReminderEmail,
    send_failure::{SendFailure, SendFailureKind},
};
