//! Process-wide query cache with change notification.
//!
//! Every distinct (operation, argument) pair gets one entry that moves through
//! `Uninitialized -> Pending -> Fulfilled | Rejected`. Fulfilled entries are
//! kept for the lifetime of the process. A rejected entry is fetched again on
//! the next query for its key.
//!
//! At most one request per key is in flight: callers that find the entry
//! pending wait on it instead of starting another fetch. The fetch itself runs
//! in its own task, so a caller giving up early does not cancel it and the
//! result still lands in the cache.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{broadcast, watch};

use crate::pkg::internal::adaptors::jobs::error::{FetchError, FetchResult};

const EVENT_BUFFER_SIZE: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListJobs,
    GetJobById,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListJobs => "list_jobs",
            Operation::GetJobById => "get_job_by_id",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub operation: Operation,
    pub arg: Option<String>,
}

impl QueryKey {
    pub fn list_jobs() -> Self {
        QueryKey {
            operation: Operation::ListJobs,
            arg: None,
        }
    }

    pub fn get_job_by_id(id: &str) -> Self {
        QueryKey {
            operation: Operation::GetJobById,
            arg: Some(id.to_string()),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({})",
            self.operation.name(),
            self.arg.as_deref().unwrap_or_default()
        )
    }
}

/// Status of a cache entry without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Uninitialized,
    Pending,
    Fulfilled,
    Rejected,
}

#[derive(Debug)]
pub enum QueryStatus<T> {
    Uninitialized,
    Pending,
    Fulfilled(Arc<T>),
    Rejected(FetchError),
}

impl<T> QueryStatus<T> {
    pub fn kind(&self) -> StatusKind {
        match self {
            QueryStatus::Uninitialized => StatusKind::Uninitialized,
            QueryStatus::Pending => StatusKind::Pending,
            QueryStatus::Fulfilled(_) => StatusKind::Fulfilled,
            QueryStatus::Rejected(_) => StatusKind::Rejected,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, QueryStatus::Fulfilled(_) | QueryStatus::Rejected(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryStatus::Fulfilled(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            QueryStatus::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> Clone for QueryStatus<T> {
    fn clone(&self) -> Self {
        match self {
            QueryStatus::Uninitialized => QueryStatus::Uninitialized,
            QueryStatus::Pending => QueryStatus::Pending,
            QueryStatus::Fulfilled(data) => QueryStatus::Fulfilled(Arc::clone(data)),
            QueryStatus::Rejected(err) => QueryStatus::Rejected(err.clone()),
        }
    }
}

/// Published after every entry transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    pub key: QueryKey,
    pub status: StatusKind,
}

/// The shared notification hub. Caches for individual result types are created
/// from it and publish their transitions here.
#[derive(Debug)]
pub struct Store {
    event_tx: broadcast::Sender<StoreEvent>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_BUFFER_SIZE);
        Store { event_tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_tx.subscribe()
    }

    pub fn cache<T>(&self) -> Arc<QueryCache<T>> {
        Arc::new(QueryCache {
            entries: Mutex::new(HashMap::new()),
            event_tx: self.event_tx.clone(),
        })
    }
}

/// Entries for queries that resolve to `T`.
pub struct QueryCache<T> {
    entries: Mutex<HashMap<QueryKey, watch::Sender<QueryStatus<T>>>>,
    event_tx: broadcast::Sender<StoreEvent>,
}

impl<T> QueryCache<T>
where
    T: Send + Sync + 'static,
{
    pub fn status(&self, key: &QueryKey) -> QueryStatus<T> {
        self.lock()
            .get(key)
            .map(|tx| tx.borrow().clone())
            .unwrap_or(QueryStatus::Uninitialized)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Resolve `key`, calling `fetch` only when there is neither cached data
    /// nor a request already in flight for it.
    pub async fn query<F, Fut>(self: &Arc<Self>, key: QueryKey, fetch: F) -> QueryStatus<T>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = FetchResult<T>> + Send + 'static,
    {
        let mut rx = {
            let mut entries = self.lock();
            let tx = entries
                .entry(key.clone())
                .or_insert_with(|| watch::channel(QueryStatus::Uninitialized).0);
            let current = tx.borrow().clone();
            match current {
                QueryStatus::Fulfilled(_) => {
                    tracing::trace!("cache hit for {}", key);
                    return current;
                }
                QueryStatus::Pending => {
                    tracing::debug!("joining in-flight request for {}", key);
                    tx.subscribe()
                }
                QueryStatus::Uninitialized | QueryStatus::Rejected(_) => {
                    tx.send_replace(QueryStatus::Pending);
                    // Published under the lock so it cannot trail the settle event.
                    self.notify(&key, StatusKind::Pending);
                    let rx = tx.subscribe();
                    let cache = Arc::clone(self);
                    let task_key = key.clone();
                    let fut = fetch();
                    tokio::spawn(async move {
                        let status = match tokio::spawn(fut).await {
                            Ok(Ok(data)) => QueryStatus::Fulfilled(Arc::new(data)),
                            Ok(Err(err)) => QueryStatus::Rejected(err),
                            Err(err) => {
                                tracing::error!("fetch for {} aborted: {}", task_key, err);
                                QueryStatus::Rejected(FetchError::Network(err.to_string()))
                            }
                        };
                        cache.settle(&task_key, status);
                    });
                    rx
                }
            }
        };

        let settled = match rx.wait_for(QueryStatus::is_settled).await {
            Ok(status) => status.clone(),
            Err(_) => self.status(&key),
        };
        settled
    }

    fn settle(&self, key: &QueryKey, status: QueryStatus<T>) {
        let kind = status.kind();
        if let QueryStatus::Rejected(err) = &status {
            tracing::warn!("{} rejected: {}", key, err);
        }
        let entries = self.lock();
        if let Some(tx) = entries.get(key) {
            tx.send_replace(status);
        }
        self.notify(key, kind);
    }

    fn notify(&self, key: &QueryKey, status: StatusKind) {
        // No subscribers is not an error.
        let _ = self.event_tx.send(StoreEvent {
            key: key.clone(),
            status,
        });
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, watch::Sender<QueryStatus<T>>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
