use super::cache::{resolve_with_placeholder, DehydratedState, QueryCache, QueryState, Resolved};
use crate::api::{ApiError, ApiResult};
use crate::util::now_ms;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

pub(crate) type QueryFuture<V> = Pin<Box<dyn Future<Output = ApiResult<V>>>>;
pub(crate) type QueryFn<K, V> = Arc<dyn Fn(K) -> QueryFuture<V> + Send + Sync>;

/// Unobserved entries older than this are dropped.
const GC_MS: i64 = 5 * 60 * 1000;

/// Reactive handle around a [`QueryCache`].
///
/// Every cache mutation bumps `revision`, which is what views track.
pub(crate) struct QueryClient<K, V> {
    cache: Arc<Mutex<QueryCache<K, V, ApiError>>>,
    query_fn: QueryFn<K, V>,
    revision: RwSignal<u64>,
}

impl<K, V> Clone for QueryClient<K, V> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            query_fn: self.query_fn.clone(),
            revision: self.revision,
        }
    }
}

impl<K, V> QueryClient<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(stale_ms: i64, query_fn: QueryFn<K, V>) -> Self {
        Self {
            cache: Arc::new(Mutex::new(QueryCache::new(stale_ms))),
            query_fn,
            revision: RwSignal::new(0),
        }
    }

    fn bump(&self) {
        self.revision.update(|r| *r = r.wrapping_add(1));
    }

    /// Subscribes the calling reactive scope to cache changes.
    pub fn track(&self) {
        self.revision.track();
    }

    pub fn state(&self, key: &K) -> QueryState<V, ApiError> {
        self.cache
            .lock()
            .map(|c| c.state(key))
            .unwrap_or_default()
    }

    /// Starts a fetch for `key` unless one is running or the data is fresh.
    pub fn ensure(&self, key: K) {
        let ticket = match self.cache.lock() {
            Ok(mut c) => c.begin_fetch(&key, now_ms()),
            Err(_) => return,
        };
        let Some(ticket) = ticket else {
            return;
        };
        self.bump();

        let fut = (self.query_fn)(key);
        let client = self.clone();
        spawn_local(async move {
            let result = fut.await;
            if let Err(e) = &result {
                tracing::warn!(key = ?ticket.key, error = %e, "query failed");
            }

            let key = ticket.key.clone();
            let refetch = match client.cache.lock() {
                Ok(mut c) => {
                    let now = now_ms();
                    let invalidated = c.invalidated_during(&ticket);
                    c.complete(ticket, result, now);
                    let dropped = c.collect_garbage(now, GC_MS);
                    if dropped > 0 {
                        tracing::debug!(dropped, remaining = c.len(), "query cache gc");
                    }
                    invalidated && c.needs_fetch(&key, now)
                }
                Err(_) => false,
            };
            client.bump();

            if refetch {
                client.ensure(key);
            }
        });
    }

    /// Same as [`ensure`](Self::ensure); named for call sites that warm the
    /// cache before any view observes the key.
    pub fn prefetch(&self, key: K) {
        self.ensure(key);
    }

    pub fn observe(&self, key: &K) {
        if let Ok(mut c) = self.cache.lock() {
            c.observe(key, now_ms());
        }
    }

    pub fn unobserve(&self, key: &K) {
        if let Ok(mut c) = self.cache.lock() {
            c.unobserve(key, now_ms());
        }
    }

    /// Marks matching queries stale and refetches the observed ones.
    pub fn invalidate(&self, matches: impl Fn(&K) -> bool) {
        let refetch = match self.cache.lock() {
            Ok(mut c) => c.invalidate(matches),
            Err(_) => return,
        };
        self.bump();
        for key in refetch {
            self.ensure(key);
        }
    }

    pub fn hydrate(&self, state: DehydratedState<K, V>) -> usize {
        self.hydrate_at(state, now_ms())
    }

    pub fn hydrate_at(&self, state: DehydratedState<K, V>, now_ms: i64) -> usize {
        let applied = match self.cache.lock() {
            Ok(mut c) => c.hydrate(state, now_ms),
            Err(_) => 0,
        };
        if applied > 0 {
            tracing::debug!(applied, "hydrated query cache from snapshot");
            self.bump();
        }
        applied
    }

    pub fn dehydrate(&self) -> Option<DehydratedState<K, V>> {
        self.cache.lock().ok().map(|c| c.dehydrate())
    }
}

/// Reactive view of one query whose key follows `key`.
pub(crate) struct QueryHandle<V: Send + Sync + 'static> {
    /// Current data, or the previous key's data while the new key loads.
    pub data: Memo<Option<Resolved<V>>>,
    pub is_fetching: Memo<bool>,
    pub error: Memo<Option<ApiError>>,
}

impl<V: Send + Sync + 'static> Clone for QueryHandle<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: Send + Sync + 'static> Copy for QueryHandle<V> {}

pub(crate) fn use_query<K, V>(client: QueryClient<K, V>, key: Signal<K>) -> QueryHandle<V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Clone + PartialEq + Send + Sync + 'static,
{
    let current: StoredValue<Option<K>> = StoredValue::new(None);

    {
        let client = client.clone();
        Effect::new(move |_| {
            let k = key.get();
            if let Some(prev) = current.get_value() {
                if prev == k {
                    return;
                }
                client.unobserve(&prev);
            }
            client.observe(&k);
            current.set_value(Some(k.clone()));
            client.ensure(k);
        });
    }

    {
        let client = client.clone();
        on_cleanup(move || {
            if let Some(prev) = current.try_get_value().flatten() {
                client.unobserve(&prev);
            }
        });
    }

    let state = Memo::new(move |_| {
        client.track();
        client.state(&key.get())
    });

    let data = Memo::new(move |prev: Option<&Option<Resolved<V>>>| {
        resolve_with_placeholder(&state.get(), prev.and_then(|p| p.as_ref()))
    });
    let is_fetching = Memo::new(move |_| state.with(|s| s.is_fetching));
    let error = Memo::new(move |_| state.with(|s| s.error.clone()));

    QueryHandle {
        data,
        is_fetching,
        error,
    }
}
