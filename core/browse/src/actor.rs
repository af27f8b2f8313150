mod handle;
mod messages;
mod runner;

pub use handle::BrowseHandle;
pub use messages::BrowseMessage;
use runner::BrowseActor;

use std::sync::Arc;
use std::time::Duration;

use catalog::MediaSearch;
use tokio::sync::{mpsc, watch};

use crate::{BrowseSnapshot, QueryCache, SearchSettings};

/// Message queue depth between handles and the actor
const CHANNEL_CAPACITY: usize = 64;

/// Create a browse session actor
///
/// # Arguments
/// * `search` - Aggregated search backend
/// * `settings` - Debounce delay and cache bound
///
/// # Returns
/// `BrowseHandle` used to drive the session and observe its snapshots
///
/// Must be called from within a tokio runtime.
pub fn create_browse_actor(search: Arc<dyn MediaSearch>, settings: &SearchSettings) -> BrowseHandle {
    create_browse_actor_with_cache(
        search,
        Arc::new(QueryCache::new(settings.cache_capacity)),
        settings.debounce(),
    )
}

/// Create a browse session actor over an existing cache
pub fn create_browse_actor_with_cache(
    search: Arc<dyn MediaSearch>,
    cache: Arc<QueryCache>,
    debounce: Duration,
) -> BrowseHandle {
    let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
    let (snapshot_sender, snapshot_receiver) = watch::channel(BrowseSnapshot::default());

    let actor = BrowseActor::new(search, cache, receiver, snapshot_sender, debounce);

    tokio::spawn(actor.run());

    BrowseHandle::new(sender, snapshot_receiver)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use catalog::{MediaType, NormalizedRecord, SearchEnvelope, SearchQuery, Source};

    use super::*;
    use crate::{BrowseMode, CacheKey, Phase};

    const DEBOUNCE: Duration = Duration::from_millis(500);

    /// 57 results over pages of 20; odd positions are movies. "cat" is slow.
    #[derive(Default)]
    struct ScriptedSearch {
        calls: AtomicUsize,
    }

    impl ScriptedSearch {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MediaSearch for ScriptedSearch {
        async fn search(&self, query: &SearchQuery) -> SearchEnvelope {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let delay = if query.keyword == "cat" {
                Duration::from_secs(5)
            } else {
                Duration::from_millis(100)
            };
            tokio::time::sleep(delay).await;

            let count = match query.page {
                1 | 2 => 20,
                3 => 17,
                _ => 0,
            };
            SearchEnvelope {
                results: (0..count)
                    .map(|i| NormalizedRecord {
                        id: format!("{}-{}-{}", query.keyword, query.page, i),
                        title: query.keyword.clone(),
                        creators: vec![],
                        year: String::new(),
                        cover: String::new(),
                        media_type: if i % 2 == 0 { MediaType::Book } else { MediaType::Movie },
                        source: Source::GoogleBooks,
                        code: query.keyword.clone(),
                    })
                    .collect(),
                has_more: query.page < 3,
                total_results: Some(57),
                page_size: 20,
            }
        }
    }

    fn start() -> (BrowseHandle, Arc<ScriptedSearch>, Arc<QueryCache>) {
        let search = Arc::new(ScriptedSearch::default());
        let cache = Arc::new(QueryCache::new(64));
        let handle = create_browse_actor_with_cache(search.clone(), cache.clone(), DEBOUNCE);
        (handle, search, cache)
    }

    async fn wait_until(
        handle: &BrowseHandle,
        mut predicate: impl FnMut(&BrowseSnapshot) -> bool,
    ) -> BrowseSnapshot {
        let mut snapshots = handle.subscribe();
        let snapshot = tokio::time::timeout(
            Duration::from_secs(60),
            snapshots.wait_for(|s| predicate(s)),
        )
        .await
        .expect("timed out waiting for snapshot")
        .expect("browse actor stopped")
        .clone();
        snapshot
    }

    fn ready_for<'a>(query: &'a str) -> impl FnMut(&BrowseSnapshot) -> bool + 'a {
        move |s| s.query == query && s.phase == Phase::Ready
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_searches_only_final_text() {
        let (handle, search, _) = start();

        handle.set_query("d").await.unwrap();
        handle.set_query("du").await.unwrap();
        handle.set_query("dune").await.unwrap();

        let snapshot = wait_until(&handle, ready_for("dune")).await;

        assert_eq!(search.calls(), 1);
        assert_eq!(snapshot.loaded, 20);
        assert_eq!(snapshot.page, 1);
        assert!(snapshot.has_more);
        assert!(snapshot.show_sentinel);
        assert_eq!(snapshot.total_pages, Some(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_infinite_scroll_appends_until_exhausted() {
        let (handle, search, _) = start();
        handle.set_query("dune").await.unwrap();
        wait_until(&handle, ready_for("dune")).await;

        handle.sentinel_visible().await.unwrap();
        let second = wait_until(&handle, |s| s.loaded == 40 && !s.loading).await;
        assert_eq!(second.page, 2);
        assert_eq!(second.results[20].id, "dune-2-0");

        handle.sentinel_visible().await.unwrap();
        let last = wait_until(&handle, |s| s.loaded == 57 && !s.loading).await;
        assert!(!last.has_more);
        assert!(!last.show_sentinel);

        handle.sentinel_visible().await.unwrap();
        let after = handle.snapshot().await.unwrap();
        assert_eq!(after.loaded, 57);
        assert_eq!(search.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_paged_navigation_replaces_and_reuses_cache() {
        let (handle, search, _) = start();
        handle.set_mode(BrowseMode::Paged).await.unwrap();
        handle.set_query("dune").await.unwrap();

        let first = wait_until(&handle, ready_for("dune")).await;
        assert_eq!(first.current_page, 1);
        assert!(first.can_go_next);
        assert!(!first.can_go_prev);
        assert!(!first.show_sentinel);

        handle.next_page().await.unwrap();
        let second = wait_until(&handle, |s| s.current_page == 2 && s.phase == Phase::Ready).await;
        assert_eq!(second.loaded, 20);
        assert_eq!(second.results[0].id, "dune-2-0");
        assert!(second.can_go_prev);

        handle.prev_page().await.unwrap();
        let back = wait_until(&handle, |s| s.current_page == 1 && s.phase == Phase::Ready).await;
        assert_eq!(back.results[0].id, "dune-1-0");
        assert_eq!(search.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_does_not_overwrite_newer_query() {
        let (handle, _, cache) = start();

        handle.set_query("cat").await.unwrap();
        wait_until(&handle, |s| s.query == "cat" && s.loading).await;

        handle.set_query("dog").await.unwrap();
        let dog = wait_until(&handle, ready_for("dog")).await;
        assert!(dog.results.iter().all(|r| r.id.starts_with("dog-")));

        // Let the slow "cat" fetch land.
        tokio::time::sleep(Duration::from_secs(10)).await;

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.query, "dog");
        assert_eq!(snapshot.loaded, 20);
        assert!(snapshot.results.iter().all(|r| r.id.starts_with("dog-")));
        assert!(cache.get(&CacheKey::new("cat", BrowseMode::Infinite, 1)).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mode_toggle_resets_with_separate_cache_slots() {
        let (handle, search, _) = start();
        handle.set_query("dune").await.unwrap();
        wait_until(&handle, ready_for("dune")).await;

        handle.toggle_mode().await.unwrap();
        let cleared = handle.snapshot().await.unwrap();
        assert_eq!(cleared.mode, BrowseMode::Paged);
        assert_eq!(cleared.loaded, 0);

        wait_until(&handle, |s| s.mode == BrowseMode::Paged && s.phase == Phase::Ready).await;
        assert_eq!(search.calls(), 2);

        handle.toggle_mode().await.unwrap();
        let back = wait_until(&handle, |s| {
            s.mode == BrowseMode::Infinite && s.phase == Phase::Ready
        })
        .await;
        assert_eq!(back.loaded, 20);
        assert_eq!(search.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_filters_apply_without_refetch() {
        let (handle, search, _) = start();
        handle.set_query("dune").await.unwrap();
        wait_until(&handle, ready_for("dune")).await;

        handle.set_media_filter(Some(MediaType::Movie)).await.unwrap();
        let movies = handle.snapshot().await.unwrap();
        assert_eq!(movies.loaded, 20);
        assert_eq!(movies.results.len(), 10);
        assert!(movies.results.iter().all(|r| r.media_type == MediaType::Movie));

        handle.set_source_filter(Some(Source::Omdb)).await.unwrap();
        assert!(handle.snapshot().await.unwrap().results.is_empty());

        handle.clear_filters().await.unwrap();
        assert_eq!(handle.snapshot().await.unwrap().results.len(), 20);
        assert_eq!(search.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_query_does_not_search() {
        let (handle, search, _) = start();
        handle.set_query("   ").await.unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.phase, Phase::Idle);
        assert_eq!(search.calls(), 0);

        handle.sentinel_visible().await.unwrap();
        handle.next_page().await.unwrap();
        assert_eq!(handle.snapshot().await.unwrap().phase, Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_clears_session_cache() {
        let (handle, _, cache) = start();
        handle.set_query("dune").await.unwrap();
        wait_until(&handle, ready_for("dune")).await;
        assert!(!cache.is_empty());

        handle.reset().await.unwrap();
        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.query, "");
        assert_eq!(snapshot.phase, Phase::Idle);
        assert_eq!(snapshot.loaded, 0);
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_during_fetch_leaves_cache_empty() {
        let (handle, _, cache) = start();
        handle.set_query("cat").await.unwrap();
        wait_until(&handle, |s| s.query == "cat" && s.loading).await;

        handle.reset().await.unwrap();
        assert!(cache.is_empty());

        // Let the slow "cat" fetch land after the reset.
        tokio::time::sleep(Duration::from_secs(10)).await;

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.query, "");
        assert_eq!(snapshot.phase, Phase::Idle);
        assert_eq!(snapshot.loaded, 0);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_shutdown_stops_actor() {
        let (handle, _, _) = start();
        handle.shutdown().await;

        assert!(handle.snapshot().await.is_err());
        assert!(!handle.is_running());
    }
}
