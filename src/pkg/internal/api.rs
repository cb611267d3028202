use std::sync::Arc;

use crate::pkg::internal::adaptors::jobs::{selectors::JobSelector, spec::Job};
use crate::pkg::internal::store::{QueryCache, QueryKey, QueryStatus, Store};

/// The two cached read operations the views are built on.
#[derive(Clone)]
pub struct JobsApi {
    selector: JobSelector,
    jobs: Arc<QueryCache<Vec<Job>>>,
    job_by_id: Arc<QueryCache<Option<Job>>>,
}

impl JobsApi {
    pub fn new(selector: JobSelector, store: &Store) -> Self {
        JobsApi {
            selector,
            jobs: store.cache(),
            job_by_id: store.cache(),
        }
    }

    pub async fn list_jobs(&self) -> QueryStatus<Vec<Job>> {
        let selector = self.selector.clone();
        self.jobs
            .query(QueryKey::list_jobs(), move || async move {
                selector.get_all().await
            })
            .await
    }

    /// `Fulfilled(None)` means the service had no job under `id`.
    pub async fn get_job_by_id(&self, id: &str) -> QueryStatus<Option<Job>> {
        let selector = self.selector.clone();
        let owned_id = id.to_string();
        self.job_by_id
            .query(QueryKey::get_job_by_id(id), move || async move {
                selector.get_by_id(&owned_id).await
            })
            .await
    }

    pub fn list_jobs_status(&self) -> QueryStatus<Vec<Job>> {
        self.jobs.status(&QueryKey::list_jobs())
    }

    pub fn job_status(&self, id: &str) -> QueryStatus<Option<Job>> {
        self.job_by_id.status(&QueryKey::get_job_by_id(id))
    }
}
