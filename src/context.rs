use crate::config::Config;
use crate::platform::{self, Platform};

/// Everything a command needs, built once at startup.
pub struct Context {
    pub config: Config,
    pub platform: Box<dyn Platform>,
}

impl Context {
    pub fn new(config: Config, platform: Box<dyn Platform>) -> Self {
        Self { config, platform }
    }

    pub fn connect(config: Config) -> Self {
        let platform = platform::create_platform(&config);
        log::debug!("Using {} at {}", platform.name(), config.org_url);
        Self::new(config, platform)
    }
}
