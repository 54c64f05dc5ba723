//! Exchange profiler for debug builds.
//!
//! Records every exchange that passes through it into a shared, bounded
//! [`ProfileStore`] so it can be inspected after the fact, and reports the
//! same data through the `metrics` facade.
//!
//! Registered last, it sits right above the transport and therefore records
//! the request exactly as the other interceptors left it.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use bytes::Bytes;
use chrono::{DateTime, Local};
use tower::{Layer, Service};

use crate::trace::duration_millis;
use crate::{Error, Headers, Method, Request, Response, Result};

const METRIC_EXCHANGES_TOTAL: &str = "apigate_profiler_exchanges_total";
const METRIC_EXCHANGE_DURATION: &str = "apigate_profiler_exchange_duration_seconds";

/// Number of exchanges kept by [`ProfileStore::default`].
pub const DEFAULT_PROFILE_CAPACITY: usize = 100;

/// How a profiled exchange ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileOutcome {
    /// A response arrived.
    Response {
        /// HTTP status code.
        status: u16,
        /// Body size in bytes.
        body_len: usize,
    },
    /// The exchange failed, with the error message.
    Failed(String),
}

/// One recorded exchange.
#[derive(Debug, Clone)]
pub struct ProfileEntry {
    /// Sequence number, starting at 1 for each store.
    pub id: u64,
    /// Wall clock time the request was dispatched.
    pub started_at: DateTime<Local>,
    /// HTTP method.
    pub method: Method,
    /// Request URL.
    pub url: url::Url,
    /// Request headers as they left the interceptor chain.
    pub request_headers: Headers,
    /// Outcome of the exchange.
    pub outcome: ProfileOutcome,
    /// Time spent below the profiler.
    pub elapsed: Duration,
}

impl ProfileEntry {
    /// One-line summary, e.g. `#3 GET http://host/path -> 200 (12ms, 48 B)`.
    #[must_use]
    pub fn summary(&self) -> String {
        let ms = duration_millis(self.elapsed);
        match &self.outcome {
            ProfileOutcome::Response { status, body_len } => format!(
                "#{} {} {} -> {status} ({ms}ms, {body_len} B)",
                self.id, self.method, self.url
            ),
            ProfileOutcome::Failed(message) => format!(
                "#{} {} {} -> failed after {ms}ms: {message}",
                self.id, self.method, self.url
            ),
        }
    }
}

#[derive(Debug)]
struct StoreInner {
    capacity: usize,
    next_id: AtomicU64,
    entries: Mutex<VecDeque<ProfileEntry>>,
}

/// Shared, bounded store of profiled exchanges.
///
/// Cloning is cheap; clones share the same entries. When full, the oldest
/// entry is dropped.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    inner: Arc<StoreInner>,
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_PROFILE_CAPACITY)
    }
}

impl ProfileStore {
    /// Create a store keeping at most `capacity` exchanges (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(StoreInner {
                capacity,
                next_id: AtomicU64::new(1),
                entries: Mutex::new(VecDeque::with_capacity(capacity)),
            }),
        }
    }

    /// Maximum number of kept exchanges.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    fn next_id(&self) -> u64 {
        self.inner.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn record(&self, entry: ProfileEntry) {
        let mut entries = self
            .inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if entries.len() == self.inner.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Snapshot of the kept exchanges, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<ProfileEntry> {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Number of kept exchanges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing was recorded (or everything was cleared).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every kept exchange.
    pub fn clear(&self) {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Summary lines of the kept exchanges, oldest first.
    #[must_use]
    pub fn report(&self) -> String {
        self.entries()
            .iter()
            .map(|entry| format!("{}\n", entry.summary()))
            .collect()
    }
}

/// Layer that records exchanges into a [`ProfileStore`].
#[derive(Debug, Clone, Default)]
pub struct ProfilerLayer {
    store: ProfileStore,
}

impl ProfilerLayer {
    /// Create a layer recording into `store`.
    #[must_use]
    pub fn new(store: ProfileStore) -> Self {
        Self { store }
    }

    /// The store exchanges are recorded into.
    #[must_use]
    pub fn store(&self) -> &ProfileStore {
        &self.store
    }
}

impl<S> Layer<S> for ProfilerLayer {
    type Service = Profiler<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Profiler {
            inner,
            store: self.store.clone(),
        }
    }
}

/// Service that records exchanges.
#[derive(Debug, Clone)]
pub struct Profiler<S> {
    inner: S,
    store: ProfileStore,
}

impl<S> Service<Request<Bytes>> for Profiler<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let head = request.head();
        let store = self.store.clone();
        let id = store.next_id();
        let started_at = Local::now();
        let start = Instant::now();

        let mut inner = self.inner.clone();
        Box::pin(async move {
            let result = inner.call(request).await;
            let elapsed = start.elapsed();

            let outcome = match &result {
                Ok(response) => ProfileOutcome::Response {
                    status: response.status(),
                    body_len: response.body().len(),
                },
                Err(err) => ProfileOutcome::Failed(err.to_string()),
            };

            let label = match &outcome {
                ProfileOutcome::Response { status, .. } => status.to_string(),
                ProfileOutcome::Failed(_) => "error".to_string(),
            };
            let method = head.method.to_string();
            metrics::histogram!(METRIC_EXCHANGE_DURATION, "method" => method.clone())
                .record(elapsed.as_secs_f64());
            metrics::counter!(METRIC_EXCHANGES_TOTAL, "method" => method, "status" => label)
                .increment(1);

            store.record(ProfileEntry {
                id,
                started_at,
                method: head.method,
                url: head.url,
                request_headers: head.headers,
                outcome,
                elapsed,
            });

            result
        })
    }
}
