use std::future::Future;
use std::time::Duration;

use axum::extract::{Path, State};

use crate::{
    pkg::{
        internal::store::QueryStatus,
        server::{
            state::AppState,
            views::{detail_page, list_page, Page, ViewState},
        },
    },
    prelude::Result,
};

pub async fn list(State(state): State<AppState>) -> Result<Page> {
    let status = settle(state.render_wait, state.api.list_jobs()).await;
    list_page(ViewState::from(status))
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> Result<Page> {
    let status = settle(state.render_wait, state.api.get_job_by_id(&id)).await;
    detail_page(ViewState::from(status))
}

/// Waits up to `wait` for the query; a query still in flight after that keeps
/// running in the background and the page shows the loading state.
async fn settle<T>(wait: Duration, query: impl Future<Output = QueryStatus<T>>) -> QueryStatus<T> {
    tokio::time::timeout(wait, query)
        .await
        .unwrap_or_else(|_| {
            tracing::debug!("query still pending after {:?}", wait);
            QueryStatus::Pending
        })
}
