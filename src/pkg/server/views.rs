use std::sync::Arc;

use askama::Template;
use axum::{http::StatusCode, response::Html};
use standard_error::{Interpolate, StandardError, Status};

use crate::pkg::internal::adaptors::jobs::{error::FetchError, spec::Job};
use crate::pkg::internal::store::QueryStatus;
use crate::pkg::server::uispec::{
    DetailError, JobCard, JobDetail, JobDetailPage, JobList, ListError, Loading, NotFound,
};
use crate::prelude::Result;

pub const LOADING_REFRESH_SECS: u64 = 2;

pub type Page = (StatusCode, Html<String>);

/// What a screen shows for the query it depends on.
#[derive(Debug)]
pub enum ViewState<T> {
    Loading,
    Error(FetchError),
    Success(Arc<T>),
}

impl<T> From<QueryStatus<T>> for ViewState<T> {
    fn from(status: QueryStatus<T>) -> Self {
        match status {
            QueryStatus::Uninitialized | QueryStatus::Pending => ViewState::Loading,
            QueryStatus::Fulfilled(data) => ViewState::Success(data),
            QueryStatus::Rejected(err) => ViewState::Error(err),
        }
    }
}

pub fn list_page(state: ViewState<Vec<Job>>) -> Result<Page> {
    match state {
        ViewState::Loading => loading_page(),
        ViewState::Error(err) => {
            let template = ListError {
                message: err.user_message(),
            };
            Ok((StatusCode::BAD_GATEWAY, Html(render(&template)?)))
        }
        ViewState::Success(jobs) => {
            let template = JobList {
                cards: jobs.iter().map(JobCard::from).collect(),
            };
            Ok((StatusCode::OK, Html(render(&template)?)))
        }
    }
}

pub fn detail_page(state: ViewState<Option<Job>>) -> Result<Page> {
    match state {
        ViewState::Loading => loading_page(),
        ViewState::Error(err) => {
            tracing::error!("error fetching job details: {}", err);
            let template = DetailError {
                message: err.user_message(),
            };
            Ok((StatusCode::BAD_GATEWAY, Html(render(&template)?)))
        }
        ViewState::Success(job) => match &*job {
            Some(job) => {
                let template = JobDetailPage {
                    job: JobDetail::from(job),
                };
                Ok((StatusCode::OK, Html(render(&template)?)))
            }
            None => Ok((StatusCode::NOT_FOUND, Html(render(&NotFound {})?))),
        },
    }
}

fn loading_page() -> Result<Page> {
    let template = Loading {
        refresh_secs: LOADING_REFRESH_SECS,
    };
    Ok((StatusCode::OK, Html(render(&template)?)))
}

fn render<T: Template>(template: &T) -> Result<String> {
    template.render().map_err(|e| {
        StandardError::new("ERR-UI-001")
            .code(StatusCode::INTERNAL_SERVER_ERROR)
            .interpolate_err(e.to_string())
    })
}
