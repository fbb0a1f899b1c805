mod reminders_dispatch_job;

pub(crate) use reminders_dispatch_job::RemindersDispatchJob;
