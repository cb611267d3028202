use std::sync::Arc;
use std::time::Duration;

use crate::{
    conf::settings,
    pkg::internal::{adaptors::jobs::selectors::JobSelector, api::JobsApi, store::Store},
    prelude::Result,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub api: JobsApi,
    /// How long a page waits on a pending query before showing the loading state.
    pub render_wait: Duration,
}

impl AppState {
    pub fn new() -> Result<AppState> {
        AppState::from_parts(
            &settings.base_url,
            settings.request_timeout(),
            settings.render_wait(),
        )
    }

    pub fn from_parts(
        base_url: &str,
        request_timeout: Duration,
        render_wait: Duration,
    ) -> Result<AppState> {
        let store = Arc::new(Store::new());
        let selector = JobSelector::new(base_url, request_timeout)?;
        tracing::debug!("jobs service at {}", selector.base_url());
        Ok(AppState {
            api: JobsApi::new(selector, &store),
            store,
            render_wait,
        })
    }
}
