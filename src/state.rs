use std::sync::Arc;

use crate::{
    config::Config,
    mailer::{Mailer, ResendMailer},
};

pub struct AppState {
    pub config: Config,
    /// Absent when no provider credential is configured; every submission
    /// then fails with a configuration error instead of a panic.
    pub mailer: Option<Arc<dyn Mailer>>,
}

impl AppState {
    pub fn new() -> Arc<Self> {
        let config = Config::load();

        let mailer = config
            .resend_api_key
            .clone()
            .map(|key| Arc::new(ResendMailer::new(key)) as Arc<dyn Mailer>);

        Arc::new(Self { config, mailer })
    }
}
