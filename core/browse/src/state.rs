//! Paging state machine
//!
//! Pure and synchronous: the actor decides *when* transitions happen, this
//! module decides *what* they do. Every fetch is described by a
//! [`FetchTicket`]; only the ticket currently pending may be applied, so
//! completions from a superseded query, mode or page are rejected.

use catalog::{NormalizedRecord, SearchEnvelope, SearchQuery, DEFAULT_PAGE_SIZE};

use crate::{BrowseMode, BrowseSnapshot, CacheKey, Phase, ResultFilter};

/// Identity of one issued fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Bumped on every reset; tickets from older generations are stale
    pub generation: u64,
    pub query: String,
    pub mode: BrowseMode,
    pub page: u32,
    /// Concatenate onto the loaded list instead of replacing it
    pub append: bool,
}

impl FetchTicket {
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(self.query.clone(), self.mode, self.page)
    }

    pub fn search_query(&self) -> SearchQuery {
        SearchQuery::new(self.query.clone()).with_page(self.page)
    }
}

#[derive(Debug, Clone)]
pub struct BrowseState {
    query: String,
    mode: BrowseMode,
    generation: u64,
    phase: Phase,
    page: u32,
    current_page: u32,
    results: Vec<NormalizedRecord>,
    has_more: bool,
    total_results: Option<u64>,
    page_size: u32,
    filter: ResultFilter,
    pending: Option<FetchTicket>,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self::new(BrowseMode::default())
    }
}

impl BrowseState {
    pub fn new(mode: BrowseMode) -> Self {
        Self {
            query: String::new(),
            mode,
            generation: 0,
            phase: Phase::Idle,
            page: 1,
            current_page: 1,
            results: Vec::new(),
            has_more: false,
            total_results: None,
            page_size: DEFAULT_PAGE_SIZE,
            filter: ResultFilter::default(),
            pending: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn mode(&self) -> BrowseMode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn results(&self) -> &[NormalizedRecord] {
        &self.results
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn total_results(&self) -> Option<u64> {
        self.total_results
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn filter(&self) -> ResultFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: ResultFilter) {
        self.filter = filter;
    }

    /// Drop everything loaded and start a new lineage.
    fn clear(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.phase = Phase::Idle;
        self.page = 1;
        self.current_page = 1;
        self.results.clear();
        self.has_more = false;
        self.total_results = None;
        self.page_size = DEFAULT_PAGE_SIZE;
    }

    /// Switch browsing model; results are cleared until the next restart.
    pub fn switch_mode(&mut self, mode: BrowseMode) {
        self.clear();
        self.mode = mode;
    }

    /// Reset for a (possibly unchanged) query and request its first page.
    ///
    /// A blank query leaves the machine idle and requests nothing.
    pub fn restart(&mut self, query: impl Into<String>) -> Option<FetchTicket> {
        self.clear();
        self.query = query.into();
        if self.query.trim().is_empty() {
            return None;
        }
        Some(self.issue(1, false))
    }

    /// Next infinite-scroll chunk, if more exist and nothing is in flight.
    pub fn load_more(&mut self) -> Option<FetchTicket> {
        if self.mode != BrowseMode::Infinite || !self.has_more || !self.can_fetch() {
            return None;
        }
        Some(self.issue(self.page + 1, true))
    }

    /// Replace the list with `target` (clamped to 1) in paged mode.
    pub fn go_to_page(&mut self, target: u32) -> Option<FetchTicket> {
        if self.mode != BrowseMode::Paged || !self.can_fetch() {
            return None;
        }
        let target = target.max(1);
        self.current_page = target;
        self.results.clear();
        self.has_more = false;
        Some(self.issue(target, false))
    }

    pub fn next_page(&mut self) -> Option<FetchTicket> {
        if !self.can_go_next() {
            return None;
        }
        self.go_to_page(self.current_page + 1)
    }

    pub fn prev_page(&mut self) -> Option<FetchTicket> {
        if !self.can_go_prev() {
            return None;
        }
        self.go_to_page(self.current_page - 1)
    }

    fn can_fetch(&self) -> bool {
        self.pending.is_none() && !self.query.trim().is_empty()
    }

    fn issue(&mut self, page: u32, append: bool) -> FetchTicket {
        let ticket = FetchTicket {
            generation: self.generation,
            query: self.query.clone(),
            mode: self.mode,
            page,
            append,
        };
        self.pending = Some(ticket.clone());
        self.phase = Phase::Loading;
        ticket
    }

    /// Apply a completed fetch. Returns `false` and changes nothing if the
    /// ticket is not the one currently pending.
    pub fn apply(&mut self, ticket: &FetchTicket, envelope: &SearchEnvelope) -> bool {
        if self.pending.as_ref() != Some(ticket) {
            return false;
        }
        self.pending = None;

        if ticket.append {
            self.results.extend(envelope.results.iter().cloned());
        } else {
            self.results = envelope.results.clone();
        }
        self.page = ticket.page;
        self.current_page = ticket.page;
        self.has_more = envelope.has_more;
        self.total_results = envelope.total_results;
        self.page_size = envelope.page_size;
        self.phase = Phase::Ready;
        true
    }

    /// `ceil(total / page_size)`, at least 1, when the total is known.
    pub fn total_pages(&self) -> Option<u32> {
        let page_size = u64::from(self.page_size.max(1));
        self.total_results
            .map(|total| total.div_ceil(page_size).clamp(1, u64::from(u32::MAX)) as u32)
    }

    pub fn can_go_prev(&self) -> bool {
        self.mode == BrowseMode::Paged && !self.is_loading() && self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        if self.mode != BrowseMode::Paged || self.is_loading() {
            return false;
        }
        match self.total_pages() {
            Some(total_pages) => self.current_page < total_pages,
            None => self.has_more,
        }
    }

    /// Results after the active filters.
    pub fn displayed(&self) -> Vec<NormalizedRecord> {
        self.filter.apply(&self.results)
    }

    pub fn snapshot(&self) -> BrowseSnapshot {
        BrowseSnapshot {
            query: self.query.clone(),
            mode: self.mode,
            phase: self.phase,
            page: self.page,
            current_page: self.current_page,
            results: self.displayed(),
            loaded: self.results.len(),
            has_more: self.has_more,
            loading: self.is_loading(),
            total_results: self.total_results,
            page_size: self.page_size,
            total_pages: self.total_pages(),
            can_go_prev: self.can_go_prev(),
            can_go_next: self.can_go_next(),
            show_sentinel: self.mode == BrowseMode::Infinite && self.has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use catalog::{MediaType, Source};

    use super::*;

    fn envelope(page: u32, count: usize, has_more: bool, total: Option<u64>) -> SearchEnvelope {
        SearchEnvelope {
            results: (0..count)
                .map(|i| NormalizedRecord {
                    id: format!("{}-{}", page, i),
                    title: format!("Result {}", i),
                    creators: vec![],
                    year: String::new(),
                    cover: String::new(),
                    media_type: if i % 2 == 0 { MediaType::Book } else { MediaType::Movie },
                    source: Source::GoogleBooks,
                    code: "q".to_string(),
                })
                .collect(),
            has_more,
            total_results: total,
            page_size: 20,
        }
    }

    #[test]
    fn test_restart_requests_first_page() {
        let mut state = BrowseState::new(BrowseMode::Infinite);
        let ticket = state.restart("dune").unwrap();

        assert_eq!(ticket.page, 1);
        assert!(!ticket.append);
        assert_eq!(ticket.cache_key(), CacheKey::new("dune", BrowseMode::Infinite, 1));
        assert_eq!(state.phase(), Phase::Loading);
        assert!(state.is_loading());
    }

    #[test]
    fn test_blank_query_stays_idle() {
        let mut state = BrowseState::default();
        assert!(state.restart("   ").is_none());
        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.is_loading());
        assert!(state.load_more().is_none());
    }

    #[test]
    fn test_infinite_mode_accumulates() {
        let mut state = BrowseState::new(BrowseMode::Infinite);
        let first = state.restart("dune").unwrap();
        assert!(state.apply(&first, &envelope(1, 20, true, Some(57))));

        let second = state.load_more().unwrap();
        assert_eq!(second.page, 2);
        assert!(second.append);
        assert!(state.apply(&second, &envelope(2, 17, false, Some(57))));

        assert_eq!(state.results().len(), 37);
        assert_eq!(state.page(), 2);
        assert!(!state.has_more());
        assert!(state.load_more().is_none());
        assert_eq!(state.phase(), Phase::Ready);
    }

    #[test]
    fn test_load_more_is_blocked_while_loading() {
        let mut state = BrowseState::new(BrowseMode::Infinite);
        let first = state.restart("dune").unwrap();
        state.apply(&first, &envelope(1, 20, true, None));

        assert!(state.load_more().is_some());
        assert!(state.load_more().is_none());
    }

    #[test]
    fn test_paged_mode_replaces() {
        let mut state = BrowseState::new(BrowseMode::Paged);
        let first = state.restart("dune").unwrap();
        state.apply(&first, &envelope(1, 20, true, Some(57)));

        let second = state.next_page().unwrap();
        assert_eq!(second.page, 2);
        assert!(!second.append);
        assert!(state.results().is_empty());
        assert_eq!(state.current_page(), 2);

        state.apply(&second, &envelope(2, 20, true, Some(57)));
        assert_eq!(state.results().len(), 20);
        assert_eq!(state.results()[0].id, "2-0");
    }

    #[test]
    fn test_go_to_page_clamps_to_one() {
        let mut state = BrowseState::new(BrowseMode::Paged);
        let first = state.restart("dune").unwrap();
        state.apply(&first, &envelope(1, 20, true, None));

        let ticket = state.go_to_page(0).unwrap();
        assert_eq!(ticket.page, 1);
    }

    #[test]
    fn test_page_navigation_ignored_in_infinite_mode() {
        let mut state = BrowseState::new(BrowseMode::Infinite);
        let first = state.restart("dune").unwrap();
        state.apply(&first, &envelope(1, 20, true, Some(57)));

        assert!(state.go_to_page(2).is_none());
        assert!(!state.can_go_next());
        assert!(!state.can_go_prev());
    }

    #[test]
    fn test_navigation_enablement_with_known_total() {
        let mut state = BrowseState::new(BrowseMode::Paged);
        let first = state.restart("dune").unwrap();
        assert!(!state.can_go_next());

        state.apply(&first, &envelope(1, 20, true, Some(57)));
        assert_eq!(state.total_pages(), Some(3));
        assert!(state.can_go_next());
        assert!(!state.can_go_prev());

        let third = state.go_to_page(3).unwrap();
        state.apply(&third, &envelope(3, 17, false, Some(57)));
        assert!(!state.can_go_next());
        assert!(state.can_go_prev());
    }

    #[test]
    fn test_navigation_enablement_with_unknown_total() {
        let mut state = BrowseState::new(BrowseMode::Paged);
        let first = state.restart("dune").unwrap();
        state.apply(&first, &envelope(1, 20, true, None));
        assert_eq!(state.total_pages(), None);
        assert!(state.can_go_next());

        let second = state.next_page().unwrap();
        state.apply(&second, &envelope(2, 3, false, None));
        assert!(!state.can_go_next());
    }

    #[test]
    fn test_total_pages_uses_latest_page_size() {
        let mut state = BrowseState::new(BrowseMode::Paged);
        let first = state.restart("dune").unwrap();
        let mut secondary = envelope(1, 10, true, Some(25));
        secondary.page_size = 10;
        state.apply(&first, &secondary);
        assert_eq!(state.total_pages(), Some(3));

        let empty = state.restart("zzzz").unwrap();
        state.apply(&empty, &SearchEnvelope::none_found());
        assert_eq!(state.total_pages(), Some(1));
        assert!(!state.can_go_next());
    }

    #[test]
    fn test_stale_completion_is_rejected() {
        let mut state = BrowseState::new(BrowseMode::Infinite);
        let cat = state.restart("cat").unwrap();
        let dog = state.restart("dog").unwrap();

        assert!(!state.apply(&cat, &envelope(1, 20, true, None)));
        assert!(state.results().is_empty());
        assert!(state.is_loading());

        assert!(state.apply(&dog, &envelope(1, 5, false, None)));
        assert_eq!(state.query(), "dog");
        assert_eq!(state.results().len(), 5);

        // A late duplicate of an applied ticket is rejected too.
        assert!(!state.apply(&dog, &envelope(1, 9, false, None)));
        assert_eq!(state.results().len(), 5);
    }

    #[test]
    fn test_same_query_restart_invalidates_earlier_ticket() {
        let mut state = BrowseState::new(BrowseMode::Infinite);
        let old = state.restart("dune").unwrap();
        let new = state.restart("dune").unwrap();

        assert_ne!(old, new);
        assert!(!state.apply(&old, &envelope(1, 1, false, None)));
        assert!(state.apply(&new, &envelope(1, 2, false, None)));
    }

    #[test]
    fn test_mode_switch_discards_in_flight_fetch() {
        let mut state = BrowseState::new(BrowseMode::Infinite);
        let first = state.restart("dune").unwrap();
        state.apply(&first, &envelope(1, 20, true, None));
        let more = state.load_more().unwrap();

        state.switch_mode(BrowseMode::Paged);
        assert!(state.results().is_empty());
        assert!(!state.apply(&more, &envelope(2, 20, true, None)));

        let paged = state.restart("dune").unwrap();
        assert_eq!(paged.cache_key(), CacheKey::new("dune", BrowseMode::Paged, 1));
    }

    #[test]
    fn test_snapshot_reflects_filter_without_refetch() {
        let mut state = BrowseState::new(BrowseMode::Infinite);
        let first = state.restart("dune").unwrap();
        state.apply(&first, &envelope(1, 4, true, None));

        state.set_filter(ResultFilter::default().with_media_type(Some(MediaType::Movie)));
        let snapshot = state.snapshot();

        assert_eq!(snapshot.loaded, 4);
        assert_eq!(snapshot.results.len(), 2);
        assert!(snapshot.show_sentinel);
        assert!(!snapshot.loading);
        assert_eq!(snapshot.phase, Phase::Ready);
    }
}
