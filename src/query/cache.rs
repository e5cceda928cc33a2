use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Point-in-time view of one cache entry.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct QueryState<V, E> {
    pub data: Option<V>,
    /// Bumped every time new data is stored for any key; 0 means "never".
    pub data_version: u64,
    pub is_fetching: bool,
    pub error: Option<E>,
}

impl<V, E> Default for QueryState<V, E> {
    fn default() -> Self {
        Self {
            data: None,
            data_version: 0,
            is_fetching: false,
            error: None,
        }
    }
}

/// Data as shown to a view, possibly carried over from a previous key.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Resolved<V> {
    pub data: V,
    pub data_version: u64,
    pub is_placeholder: bool,
}

/// Picks the data to display: the current key's data if any, otherwise the
/// previously displayed data marked as placeholder.
pub(crate) fn resolve_with_placeholder<V: Clone, E>(
    current: &QueryState<V, E>,
    previous: Option<&Resolved<V>>,
) -> Option<Resolved<V>> {
    match &current.data {
        Some(d) => Some(Resolved {
            data: d.clone(),
            data_version: current.data_version,
            is_placeholder: false,
        }),
        None => previous.map(|p| Resolved {
            data: p.data.clone(),
            data_version: p.data_version,
            is_placeholder: true,
        }),
    }
}

/// Handed out by [`QueryCache::begin_fetch`]; must be passed back to
/// [`QueryCache::complete`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FetchTicket<K> {
    pub key: K,
    generation: u64,
}

struct QueryEntry<V, E> {
    data: Option<V>,
    data_version: u64,
    updated_ms: i64,
    error: Option<E>,
    fetching: bool,
    generation: u64,
    invalidated: bool,
    /// Fetches with a generation at or below this started before the last
    /// invalidation and leave the entry stale.
    invalidated_generation: u64,
    observers: usize,
    last_touched_ms: i64,
}

impl<V, E> QueryEntry<V, E> {
    fn new(now_ms: i64) -> Self {
        Self {
            data: None,
            data_version: 0,
            updated_ms: 0,
            error: None,
            fetching: false,
            generation: 0,
            invalidated: false,
            invalidated_generation: 0,
            observers: 0,
            last_touched_ms: now_ms,
        }
    }

    fn is_stale(&self, now_ms: i64, stale_ms: i64) -> bool {
        self.data.is_none() || self.invalidated || now_ms - self.updated_ms >= stale_ms
    }
}

/// Keyed request cache with in-flight deduplication.
///
/// Single-threaded by contract: callers serialize access (the browser event
/// loop does). Each key owns its data; a response for one key never touches
/// another key's entry.
pub(crate) struct QueryCache<K, V, E> {
    entries: HashMap<K, QueryEntry<V, E>>,
    stale_ms: i64,
    next_version: u64,
}

impl<K, V, E> QueryCache<K, V, E>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
    E: Clone,
{
    pub fn new(stale_ms: i64) -> Self {
        Self {
            entries: HashMap::new(),
            stale_ms,
            next_version: 0,
        }
    }

    fn bump_version(&mut self) -> u64 {
        self.next_version = self.next_version.saturating_add(1);
        self.next_version
    }

    pub fn state(&self, key: &K) -> QueryState<V, E> {
        self.entries
            .get(key)
            .map(|e| QueryState {
                data: e.data.clone(),
                data_version: e.data_version,
                is_fetching: e.fetching,
                error: e.error.clone(),
            })
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key).and_then(|e| e.data.as_ref())
    }

    #[cfg(test)]
    pub fn is_fetching(&self, key: &K) -> bool {
        self.entries.get(key).map(|e| e.fetching).unwrap_or(false)
    }

    pub fn needs_fetch(&self, key: &K, now_ms: i64) -> bool {
        match self.entries.get(key) {
            None => true,
            Some(e) => !e.fetching && e.is_stale(now_ms, self.stale_ms),
        }
    }

    /// Marks `key` as in flight. Returns `None` when a request for the key
    /// is already running or the cached data is still fresh.
    pub fn begin_fetch(&mut self, key: &K, now_ms: i64) -> Option<FetchTicket<K>> {
        let stale_ms = self.stale_ms;
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| QueryEntry::new(now_ms));
        entry.last_touched_ms = now_ms;

        if entry.fetching {
            tracing::debug!(?key, "query already in flight; sharing request");
            return None;
        }
        if !entry.is_stale(now_ms, stale_ms) {
            return None;
        }

        entry.fetching = true;
        entry.generation = entry.generation.saturating_add(1);
        Some(FetchTicket {
            key: key.clone(),
            generation: entry.generation,
        })
    }

    /// Whether `key` was invalidated while `ticket`'s fetch was running and
    /// someone still observes it.
    pub fn invalidated_during(&self, ticket: &FetchTicket<K>) -> bool {
        self.entries.get(&ticket.key).is_some_and(|e| {
            e.invalidated && e.invalidated_generation >= ticket.generation && e.observers > 0
        })
    }

    /// Stores the outcome of a fetch. Returns `true` when the result was
    /// applied to the entry.
    pub fn complete(&mut self, ticket: FetchTicket<K>, result: Result<V, E>, now_ms: i64) -> bool {
        let version = match &result {
            Ok(_) => self.bump_version(),
            Err(_) => 0,
        };

        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            tracing::debug!(key = ?ticket.key, "dropping response for evicted query");
            return false;
        };
        if entry.generation != ticket.generation {
            tracing::debug!(key = ?ticket.key, "dropping superseded response");
            return false;
        }

        entry.fetching = false;
        entry.last_touched_ms = now_ms;
        match result {
            Ok(data) => {
                entry.data = Some(data);
                entry.data_version = version;
                entry.updated_ms = now_ms;
                entry.error = None;
                if ticket.generation > entry.invalidated_generation {
                    entry.invalidated = false;
                }
            }
            Err(e) => {
                // Previous data stays visible.
                entry.error = Some(e);
            }
        }
        true
    }

    /// Registers interest in a key so invalidation refetches it.
    pub fn observe(&mut self, key: &K, now_ms: i64) {
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| QueryEntry::new(now_ms));
        entry.observers += 1;
        entry.last_touched_ms = now_ms;
    }

    pub fn unobserve(&mut self, key: &K, now_ms: i64) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.observers = entry.observers.saturating_sub(1);
            entry.last_touched_ms = now_ms;
        }
    }

    /// Marks every matching entry stale and returns the observed ones, which
    /// the caller should refetch right away.
    pub fn invalidate(&mut self, matches: impl Fn(&K) -> bool) -> Vec<K> {
        let mut observed = Vec::new();
        for (key, entry) in self.entries.iter_mut().filter(|(k, _)| matches(k)) {
            entry.invalidated = true;
            entry.invalidated_generation = entry.generation;
            if entry.observers > 0 {
                observed.push(key.clone());
            }
        }
        observed
    }

    /// Drops unobserved, idle entries untouched for at least `gc_ms`.
    pub fn collect_garbage(&mut self, now_ms: i64, gc_ms: i64) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, e| e.observers > 0 || e.fetching || now_ms - e.last_touched_ms < gc_ms);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Successful entries, for replay in another cache instance.
    pub fn dehydrate(&self) -> DehydratedState<K, V> {
        let mut queries: Vec<DehydratedQuery<K, V>> = self
            .entries
            .iter()
            .filter_map(|(k, e)| {
                e.data.as_ref().map(|d| DehydratedQuery {
                    key: k.clone(),
                    data: d.clone(),
                    updated_ms: e.updated_ms,
                })
            })
            .collect();
        queries.sort_by_key(|q| q.updated_ms);
        DehydratedState { queries }
    }

    /// Loads a snapshot. Entries already holding newer data are kept.
    pub fn hydrate(&mut self, state: DehydratedState<K, V>, now_ms: i64) -> usize {
        let mut applied = 0;
        for q in state.queries {
            let is_newer = self
                .entries
                .get(&q.key)
                .map(|e| e.data.is_none() || e.updated_ms < q.updated_ms)
                .unwrap_or(true);
            if !is_newer {
                continue;
            }

            let version = self.bump_version();
            let entry = self
                .entries
                .entry(q.key)
                .or_insert_with(|| QueryEntry::new(now_ms));
            entry.data = Some(q.data);
            entry.data_version = version;
            entry.updated_ms = q.updated_ms;
            entry.error = None;
            entry.last_touched_ms = now_ms;
            applied += 1;
        }
        applied
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DehydratedQuery<K, V> {
    pub key: K,
    pub data: V,
    pub updated_ms: i64,
}

/// Serializable cache snapshot.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct DehydratedState<K, V> {
    pub queries: Vec<DehydratedQuery<K, V>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    type Cache = QueryCache<u32, String, String>;

    const STALE: i64 = 1_000;

    #[test]
    fn test_identical_keys_share_one_fetch() {
        let mut c = Cache::new(STALE);
        let t1 = c.begin_fetch(&1, 0);
        assert!(t1.is_some());
        assert!(c.begin_fetch(&1, 5).is_none());
        assert!(c.is_fetching(&1));

        assert!(c.complete(t1.expect("ticket"), Ok("a".to_string()), 10));
        assert_eq!(c.get(&1).map(String::as_str), Some("a"));
        assert!(!c.is_fetching(&1));
    }

    #[test]
    fn test_fresh_data_is_not_refetched_until_stale() {
        let mut c = Cache::new(STALE);
        let t = c.begin_fetch(&1, 0).expect("ticket");
        c.complete(t, Ok("a".to_string()), 0);

        assert!(c.begin_fetch(&1, STALE - 1).is_none());
        assert!(c.needs_fetch(&1, STALE));
        assert!(c.begin_fetch(&1, STALE).is_some());
    }

    #[test]
    fn test_late_response_only_touches_its_own_key() {
        let mut c = Cache::new(STALE);
        let old = c.begin_fetch(&1, 0).expect("ticket");
        let new = c.begin_fetch(&2, 1).expect("ticket");

        c.complete(new, Ok("page2".to_string()), 2);
        c.complete(old, Ok("page1".to_string()), 3);

        assert_eq!(c.get(&2).map(String::as_str), Some("page2"));
        assert_eq!(c.get(&1).map(String::as_str), Some("page1"));
        assert!(c.state(&1).data_version > c.state(&2).data_version);
    }

    #[test]
    fn test_error_keeps_previous_data() {
        let mut c = Cache::new(0);
        let t = c.begin_fetch(&1, 0).expect("ticket");
        c.complete(t, Ok("a".to_string()), 0);
        let version = c.state(&1).data_version;

        let t = c.begin_fetch(&1, 1).expect("ticket");
        c.complete(t, Err("boom".to_string()), 2);

        let s = c.state(&1);
        assert_eq!(s.data.as_deref(), Some("a"));
        assert_eq!(s.data_version, version);
        assert_eq!(s.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_invalidate_returns_observed_keys_only() {
        let mut c = Cache::new(STALE);
        for k in [1, 2] {
            let t = c.begin_fetch(&k, 0).expect("ticket");
            c.complete(t, Ok(k.to_string()), 0);
        }
        c.observe(&2, 0);

        let refetch = c.invalidate(|_| true);
        assert_eq!(refetch, vec![2]);
        assert!(c.needs_fetch(&1, 1));
        assert!(c.needs_fetch(&2, 1));
    }

    #[test]
    fn test_response_in_flight_during_invalidation_stays_stale() {
        let mut c = Cache::new(STALE);
        let t = c.begin_fetch(&1, 0).expect("ticket");
        c.invalidate(|_| true);
        c.complete(t, Ok("old".to_string()), 1);

        assert_eq!(c.get(&1).map(String::as_str), Some("old"));
        assert!(c.needs_fetch(&1, 2));

        let t = c.begin_fetch(&1, 2).expect("ticket");
        c.complete(t, Ok("new".to_string()), 3);
        assert!(!c.needs_fetch(&1, 4));
    }

    #[test]
    fn test_only_observed_invalidated_flights_are_refetched() {
        let mut c = Cache::new(STALE);
        c.observe(&1, 0);
        let t = c.begin_fetch(&1, 0).expect("ticket");
        assert!(!c.invalidated_during(&t));
        c.invalidate(|_| true);
        assert!(c.invalidated_during(&t));
        c.complete(t, Err("boom".to_string()), 1);

        // A failed retry does not ask for another one.
        let t = c.begin_fetch(&1, 2).expect("ticket");
        c.complete(t.clone(), Err("boom".to_string()), 3);
        assert!(!c.invalidated_during(&t));

        let t = c.begin_fetch(&2, 4).expect("ticket");
        c.invalidate(|k| *k == 2);
        assert!(!c.invalidated_during(&t));
    }

    #[test]
    fn test_placeholder_carries_previous_data() {
        let prev = Resolved {
            data: "page1".to_string(),
            data_version: 3,
            is_placeholder: false,
        };
        let pending: QueryState<String, String> = QueryState {
            is_fetching: true,
            ..Default::default()
        };

        let shown = resolve_with_placeholder(&pending, Some(&prev)).expect("placeholder");
        assert_eq!(shown.data, "page1");
        assert!(shown.is_placeholder);

        let ready: QueryState<String, String> = QueryState {
            data: Some("page2".to_string()),
            data_version: 4,
            ..Default::default()
        };
        let shown = resolve_with_placeholder(&ready, Some(&prev)).expect("data");
        assert_eq!(shown.data, "page2");
        assert!(!shown.is_placeholder);

        assert!(resolve_with_placeholder(&pending, None).is_none());
    }

    #[test]
    fn test_dehydrate_then_hydrate_skips_duplicate_fetch() {
        let mut server = Cache::new(STALE);
        let t = server.begin_fetch(&1, 100).expect("ticket");
        server.complete(t, Ok("first".to_string()), 100);
        let failed = server.begin_fetch(&2, 100).expect("ticket");
        server.complete(failed, Err("x".to_string()), 100);

        let snapshot = server.dehydrate();
        assert_eq!(snapshot.queries.len(), 1);

        let mut client = Cache::new(STALE);
        assert_eq!(client.hydrate(snapshot, 150), 1);
        assert_eq!(client.get(&1).map(String::as_str), Some("first"));
        assert!(client.begin_fetch(&1, 200).is_none());
    }

    #[test]
    fn test_hydrate_keeps_newer_local_data() {
        let mut c = Cache::new(STALE);
        let t = c.begin_fetch(&1, 500).expect("ticket");
        c.complete(t, Ok("local".to_string()), 500);

        let snapshot = DehydratedState {
            queries: vec![DehydratedQuery {
                key: 1,
                data: "snapshot".to_string(),
                updated_ms: 100,
            }],
        };
        assert_eq!(c.hydrate(snapshot, 600), 0);
        assert_eq!(c.get(&1).map(String::as_str), Some("local"));
    }

    #[test]
    fn test_garbage_collection_spares_observed_entries() {
        let mut c = Cache::new(STALE);
        for k in [1, 2] {
            let t = c.begin_fetch(&k, 0).expect("ticket");
            c.complete(t, Ok(k.to_string()), 0);
        }
        c.observe(&1, 0);

        assert_eq!(c.collect_garbage(10_000, 5_000), 1);
        assert_eq!(c.len(), 1);
        assert!(c.get(&1).is_some());
    }
}
