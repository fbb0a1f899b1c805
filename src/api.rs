use crate::{
    config::Config,
    network::{EmailTransport, Network},
    reminders::ReminderStore,
};
use std::sync::Arc;

pub struct Api<ET: EmailTransport> {
    pub config: Config,
    pub store: Arc<dyn ReminderStore>,
    pub network: Network<ET>,
}

impl<ET: EmailTransport> Api<ET> {
    /// Instantiates APIs collection with the specified config, reminder store and network.
    pub fn new(config: Config, store: Arc<dyn ReminderStore>, network: Network<ET>) -> Self {
        Self {
            config,
            store,
            network,
        }
    }
}
