//! Cache-or-fetch policy shared by every cached resource.
//!
//! A resource batch for a location is served from the store while it is
//! younger than the resource's TTL. Once stale, the whole batch is deleted and
//! the provider is asked again. Provider failures surface unchanged; there is
//! no retry and no fallback to stale rows.

use anyhow::Result;
use async_trait::async_trait;
use std::future::Future;
use tracing::{debug, info};

use crate::domain::{LocationId, ResourceKind, Ttl};
use crate::models::Timestamped;
use crate::services::resource_service::ResourceError;

/// Per-resource table access, keyed by location.
#[async_trait]
pub trait RecordStore<R: Send + Sync>: Send + Sync {
    /// Rows for a location in insertion order.
    async fn find_for_location(&self, location_id: LocationId) -> Result<Vec<R>>;

    /// Removes every row for a location, returning how many went.
    async fn delete_for_location(&self, location_id: LocationId) -> Result<u64>;

    async fn insert_batch(&self, records: &[R]) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Fresh rows served from the store.
    Hit,
    /// Nothing stored; fetched from the provider.
    Miss,
    /// Stale rows deleted, then fetched from the provider.
    Expired,
}

impl CacheOutcome {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
            Self::Expired => "expired",
        }
    }
}

#[derive(Debug)]
pub struct Lookup<R> {
    pub records: Vec<R>,
    pub outcome: CacheOutcome,
}

/// What to look up and how long a stored batch stays valid.
#[derive(Debug, Clone, Copy)]
pub struct LookupKey {
    pub kind: ResourceKind,
    pub location_id: LocationId,
    pub ttl: Ttl,
}

/// Serves `key` from `store` when fresh, otherwise fetches, normalizes and
/// persists a new batch.
///
/// `normalize` receives each provider item with the location id and the
/// batch timestamp, so every record of one batch shares a `created_at`.
pub async fn lookup_or_fetch<R, S, T, F, Fut, N>(
    store: &S,
    key: LookupKey,
    fetch: F,
    normalize: N,
) -> Result<Lookup<R>, ResourceError>
where
    R: Timestamped + Send + Sync,
    S: RecordStore<R> + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
    N: Fn(T, LocationId, i64) -> R,
{
    let now = chrono::Utc::now().timestamp_millis();
    lookup_or_fetch_at(store, key, now, fetch, normalize).await
}

/// [`lookup_or_fetch`] against an explicit clock reading (unix milliseconds).
pub async fn lookup_or_fetch_at<R, S, T, F, Fut, N>(
    store: &S,
    key: LookupKey,
    now: i64,
    fetch: F,
    normalize: N,
) -> Result<Lookup<R>, ResourceError>
where
    R: Timestamped + Send + Sync,
    S: RecordStore<R> + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
    N: Fn(T, LocationId, i64) -> R,
{
    let LookupKey {
        kind,
        location_id,
        ttl,
    } = key;

    let existing = store
        .find_for_location(location_id)
        .await
        .map_err(ResourceError::database)?;

    let outcome = match existing.first() {
        None => CacheOutcome::Miss,
        Some(first) if !ttl.is_expired(first.created_at(), now) => {
            debug!(
                resource = %kind,
                location_id = %location_id,
                rows = existing.len(),
                "Cache hit"
            );
            record_outcome(kind, CacheOutcome::Hit);
            return Ok(Lookup {
                records: existing,
                outcome: CacheOutcome::Hit,
            });
        }
        Some(first) => {
            let removed = store
                .delete_for_location(location_id)
                .await
                .map_err(ResourceError::database)?;
            debug!(
                resource = %kind,
                location_id = %location_id,
                age_ms = now.saturating_sub(first.created_at()),
                removed,
                "Cache expired"
            );
            CacheOutcome::Expired
        }
    };

    record_outcome(kind, outcome);

    let items = fetch()
        .await
        .map_err(|e| ResourceError::external(kind.provider(), &e))?;

    let records: Vec<R> = items
        .into_iter()
        .map(|item| normalize(item, location_id, now))
        .collect();

    store
        .insert_batch(&records)
        .await
        .map_err(ResourceError::database)?;

    info!(
        resource = %kind,
        location_id = %location_id,
        rows = records.len(),
        outcome = outcome.as_str(),
        "Fetched from {}",
        kind.provider()
    );

    Ok(Lookup { records, outcome })
}

fn record_outcome(kind: ResourceKind, outcome: CacheOutcome) {
    metrics::counter!(
        "resource_cache_lookups_total",
        "resource" => kind.as_str(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Row {
        label: String,
        created_at: i64,
        location_id: LocationId,
    }

    impl Timestamped for Row {
        fn created_at(&self) -> i64 {
            self.created_at
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        rows: Mutex<Vec<Row>>,
        inserts: AtomicUsize,
        deletes: AtomicUsize,
    }

    impl MemoryStore {
        fn seeded(rows: Vec<Row>) -> Self {
            Self {
                rows: Mutex::new(rows),
                ..Default::default()
            }
        }

        fn rows_for(&self, id: LocationId) -> Vec<Row> {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.location_id == id)
                .cloned()
                .collect()
        }
    }

    #[async_trait]
    impl RecordStore<Row> for MemoryStore {
        async fn find_for_location(&self, location_id: LocationId) -> Result<Vec<Row>> {
            Ok(self.rows_for(location_id))
        }

        async fn delete_for_location(&self, location_id: LocationId) -> Result<u64> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| r.location_id != location_id);
            Ok((before - rows.len()) as u64)
        }

        async fn insert_batch(&self, records: &[Row]) -> Result<()> {
            self.inserts.fetch_add(records.len(), Ordering::SeqCst);
            self.rows.lock().unwrap().extend_from_slice(records);
            Ok(())
        }
    }

    const NOW: i64 = 1_791_979_200_000;

    fn key(id: i32) -> LookupKey {
        LookupKey {
            kind: ResourceKind::Events,
            location_id: LocationId::new(id),
            ttl: Ttl::from_millis(15_000),
        }
    }

    fn row(label: &str, created_at: i64, id: i32) -> Row {
        Row {
            label: label.to_string(),
            created_at,
            location_id: LocationId::new(id),
        }
    }

    fn normalize(label: &'static str, location_id: LocationId, created_at: i64) -> Row {
        Row {
            label: label.to_string(),
            created_at,
            location_id,
        }
    }

    #[tokio::test]
    async fn miss_fetches_once_and_persists_every_item() {
        let store = MemoryStore::default();
        let calls = AtomicUsize::new(0);

        let lookup = lookup_or_fetch_at(
            &store,
            key(42),
            NOW,
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec!["a", "b", "c"])
            },
            normalize,
        )
        .await
        .unwrap();

        assert_eq!(lookup.outcome, CacheOutcome::Miss);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(lookup.records.len(), 3);
        assert_eq!(store.inserts.load(Ordering::SeqCst), 3);
        assert!(lookup.records.iter().all(|r| r.created_at == NOW));
        assert_eq!(store.rows_for(LocationId::new(42)), lookup.records);
    }

    #[tokio::test]
    async fn fresh_rows_skip_the_provider() {
        let seeded = vec![row("old-a", NOW - 5_000, 42), row("old-b", NOW - 5_000, 42)];
        let store = MemoryStore::seeded(seeded.clone());
        let calls = AtomicUsize::new(0);

        let lookup = lookup_or_fetch_at(
            &store,
            key(42),
            NOW,
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec!["new"])
            },
            normalize,
        )
        .await
        .unwrap();

        assert_eq!(lookup.outcome, CacheOutcome::Hit);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(lookup.records, seeded);
        assert_eq!(store.deletes.load(Ordering::SeqCst), 0);
        assert_eq!(store.inserts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn stale_rows_are_deleted_and_refetched() {
        let store = MemoryStore::seeded(vec![
            row("stale", NOW - 20_000, 42),
            row("other-location", NOW - 20_000, 7),
        ]);
        let calls = AtomicUsize::new(0);

        let lookup = lookup_or_fetch_at(
            &store,
            key(42),
            NOW,
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec!["fresh"])
            },
            normalize,
        )
        .await
        .unwrap();

        assert_eq!(lookup.outcome, CacheOutcome::Expired);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.deletes.load(Ordering::SeqCst), 1);

        let stored = store.rows_for(LocationId::new(42));
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].label, "fresh");
        assert_eq!(stored[0].created_at, NOW);

        // Other locations are untouched.
        assert_eq!(store.rows_for(LocationId::new(7)).len(), 1);
    }

    #[tokio::test]
    async fn age_equal_to_ttl_is_still_fresh() {
        let store = MemoryStore::seeded(vec![row("edge", NOW - 15_000, 1)]);

        let lookup = lookup_or_fetch_at(
            &store,
            key(1),
            NOW,
            || async { Ok(vec!["unused"]) },
            normalize,
        )
        .await
        .unwrap();

        assert_eq!(lookup.outcome, CacheOutcome::Hit);
        assert_eq!(lookup.records[0].label, "edge");
    }

    #[tokio::test]
    async fn provider_failure_propagates_after_expiry_delete() {
        let store = MemoryStore::seeded(vec![row("stale", NOW - 60_000, 3)]);

        let err = lookup_or_fetch_at(
            &store,
            key(3),
            NOW,
            || async { Err::<Vec<&'static str>, _>(anyhow::anyhow!("connection reset")) },
            normalize,
        )
        .await
        .unwrap_err();

        match err {
            ResourceError::ExternalApi { service, message } => {
                assert_eq!(service, "Eventbrite");
                assert!(message.contains("connection reset"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(store.rows_for(LocationId::new(3)).is_empty());
        assert_eq!(store.inserts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_provider_result_persists_nothing() {
        let store = MemoryStore::default();

        let lookup = lookup_or_fetch_at(
            &store,
            key(9),
            NOW,
            || async { Ok(Vec::<&'static str>::new()) },
            normalize,
        )
        .await
        .unwrap();

        assert_eq!(lookup.outcome, CacheOutcome::Miss);
        assert!(lookup.records.is_empty());
        assert!(store.rows_for(LocationId::new(9)).is_empty());
    }
}
