use std::time::Duration;

use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://akil-backend.onrender.com/";

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub service_name: String,
    pub listen_port: String,
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub render_wait_ms: u64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .set_default("service_name", "jobboard")?
            .set_default("listen_port", "3000")?
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("request_timeout_secs", 30)?
            .set_default("render_wait_ms", 10_000)?
            .add_source(Environment::default())
            .build()?;
        conf.try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn render_wait(&self) -> Duration {
        Duration::from_millis(self.render_wait_ms)
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}
