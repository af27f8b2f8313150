use std::sync::Arc;
use std::time::Duration;

use catalog::MediaSearch;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

use super::messages::{BrowseMessage, FetchCompletion};
use crate::state::{BrowseState, FetchTicket};
use crate::{BrowseMode, BrowseSnapshot, QueryCache, ResultFilter};

/// Browse session actor
///
/// Single writer of the session state. Edits and mode switches arm a
/// debounce deadline; fetches run in spawned tasks and report back through
/// an internal channel, where stale completions are dropped.
pub struct BrowseActor {
    state: BrowseState,
    search: Arc<dyn MediaSearch>,
    cache: Arc<QueryCache>,
    receiver: mpsc::Receiver<BrowseMessage>,
    completion_sender: mpsc::UnboundedSender<FetchCompletion>,
    completion_receiver: mpsc::UnboundedReceiver<FetchCompletion>,
    snapshot_sender: watch::Sender<BrowseSnapshot>,
    debounce: Duration,
    /// Latest edited text, committed when the debounce deadline passes
    pending_query: String,
    debounce_deadline: Option<Instant>,
}

impl BrowseActor {
    pub fn new(
        search: Arc<dyn MediaSearch>,
        cache: Arc<QueryCache>,
        receiver: mpsc::Receiver<BrowseMessage>,
        snapshot_sender: watch::Sender<BrowseSnapshot>,
        debounce: Duration,
    ) -> Self {
        let (completion_sender, completion_receiver) = mpsc::unbounded_channel();

        Self {
            state: BrowseState::default(),
            search,
            cache,
            receiver,
            completion_sender,
            completion_receiver,
            snapshot_sender,
            debounce,
            pending_query: String::new(),
            debounce_deadline: None,
        }
    }

    /// Run the actor main loop
    pub async fn run(mut self) {
        tracing::info!("Browse actor started");
        self.publish();

        loop {
            tokio::select! {
                msg = self.receiver.recv() => {
                    match msg {
                        Some(msg) => {
                            if !self.handle_message(msg) {
                                break;
                            }
                        }
                        None => break,
                    }
                }

                Some(completion) = self.completion_receiver.recv() => {
                    self.handle_completion(completion);
                }

                _ = debounce_elapsed(self.debounce_deadline), if self.debounce_deadline.is_some() => {
                    self.debounce_deadline = None;
                    self.commit_query();
                }
            }
        }

        tracing::info!("Browse actor stopped");
    }

    /// Handle one message
    ///
    /// Returns `true` to keep running, `false` to stop the actor.
    fn handle_message(&mut self, msg: BrowseMessage) -> bool {
        match msg {
            BrowseMessage::SetQuery { query } => {
                self.pending_query = query;
                self.arm_debounce();
            }
            BrowseMessage::SetMode { mode } => self.switch_mode(mode),
            BrowseMessage::ToggleMode => self.switch_mode(self.state.mode().toggled()),
            BrowseMessage::SentinelVisible => {
                let ticket = self.state.load_more();
                self.dispatch(ticket);
            }
            BrowseMessage::NextPage => {
                let ticket = self.state.next_page();
                self.dispatch(ticket);
            }
            BrowseMessage::PrevPage => {
                let ticket = self.state.prev_page();
                self.dispatch(ticket);
            }
            BrowseMessage::GoToPage { page } => {
                let ticket = self.state.go_to_page(page);
                self.dispatch(ticket);
            }
            BrowseMessage::SetMediaFilter { media_type } => {
                let filter = self.state.filter().with_media_type(media_type);
                self.update_filter(filter);
            }
            BrowseMessage::SetSourceFilter { source } => {
                let filter = self.state.filter().with_source(source);
                self.update_filter(filter);
            }
            BrowseMessage::ClearFilters => self.update_filter(ResultFilter::default()),
            BrowseMessage::Reset => {
                tracing::debug!("Resetting browse session");
                self.cache.clear();
                self.pending_query.clear();
                self.debounce_deadline = None;
                self.state.restart(String::new());
                self.publish();
            }
            BrowseMessage::GetSnapshot { reply } => {
                let _ = reply.send(self.state.snapshot());
            }
            BrowseMessage::Shutdown => {
                tracing::info!("Browse actor received shutdown signal");
                return false;
            }
        }
        true
    }

    fn arm_debounce(&mut self) {
        self.debounce_deadline = Some(Instant::now() + self.debounce);
    }

    fn switch_mode(&mut self, mode: BrowseMode) {
        if mode == self.state.mode() {
            return;
        }
        tracing::debug!(mode = %mode, "Switching browse mode");
        self.state.switch_mode(mode);
        self.publish();
        self.arm_debounce();
    }

    fn commit_query(&mut self) {
        let ticket = self.state.restart(self.pending_query.clone());
        if ticket.is_none() {
            self.publish();
        }
        self.dispatch(ticket);
    }

    fn update_filter(&mut self, filter: ResultFilter) {
        if filter != self.state.filter() {
            self.state.set_filter(filter);
            self.publish();
        }
    }

    /// Serve a ticket from cache, or spawn its fetch.
    fn dispatch(&mut self, ticket: Option<FetchTicket>) {
        let Some(ticket) = ticket else {
            return;
        };

        let key = ticket.cache_key();
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!("Serving '{}' from cache", key);
            self.state.apply(&ticket, &cached);
            self.publish();
            return;
        }

        self.publish();

        let search = Arc::clone(&self.search);
        let cache = Arc::clone(&self.cache);
        let completion_sender = self.completion_sender.clone();
        tokio::spawn(async move {
            let query = ticket.search_query();
            let envelope = cache
                .get_or_fetch(key, || async move { search.search(&query).await })
                .await;
            let _ = completion_sender.send(FetchCompletion { ticket, envelope });
        });
    }

    fn handle_completion(&mut self, completion: FetchCompletion) {
        let FetchCompletion { ticket, envelope } = completion;
        if self.state.apply(&ticket, &envelope) {
            self.publish();
        } else {
            tracing::debug!(
                query = %ticket.query,
                mode = %ticket.mode,
                page = ticket.page,
                "Discarding stale search response"
            );
        }
    }

    fn publish(&self) {
        self.snapshot_sender.send_replace(self.state.snapshot());
    }
}

async fn debounce_elapsed(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
