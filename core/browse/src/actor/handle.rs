use catalog::{MediaType, Source};
use tokio::sync::{mpsc, oneshot, watch};

use super::messages::BrowseMessage;
use crate::{BrowseError, BrowseMode, BrowseSnapshot};

/// Handle to a browse session actor
///
/// Cloneable; messages from one handle are processed in the order sent.
#[derive(Clone)]
pub struct BrowseHandle {
    sender: mpsc::Sender<BrowseMessage>,
    snapshots: watch::Receiver<BrowseSnapshot>,
}

impl BrowseHandle {
    pub fn new(
        sender: mpsc::Sender<BrowseMessage>,
        snapshots: watch::Receiver<BrowseSnapshot>,
    ) -> Self {
        Self { sender, snapshots }
    }

    async fn send(&self, message: BrowseMessage) -> Result<(), BrowseError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| BrowseError::ActorStopped)
    }

    /// Update the search text. The search runs once edits pause for the
    /// debounce delay.
    pub async fn set_query(&self, query: impl Into<String>) -> Result<(), BrowseError> {
        self.send(BrowseMessage::SetQuery {
            query: query.into(),
        })
        .await
    }

    pub async fn set_mode(&self, mode: BrowseMode) -> Result<(), BrowseError> {
        self.send(BrowseMessage::SetMode { mode }).await
    }

    pub async fn toggle_mode(&self) -> Result<(), BrowseError> {
        self.send(BrowseMessage::ToggleMode).await
    }

    /// Report that the infinite-scroll sentinel became visible.
    pub async fn sentinel_visible(&self) -> Result<(), BrowseError> {
        self.send(BrowseMessage::SentinelVisible).await
    }

    pub async fn next_page(&self) -> Result<(), BrowseError> {
        self.send(BrowseMessage::NextPage).await
    }

    pub async fn prev_page(&self) -> Result<(), BrowseError> {
        self.send(BrowseMessage::PrevPage).await
    }

    pub async fn go_to_page(&self, page: u32) -> Result<(), BrowseError> {
        self.send(BrowseMessage::GoToPage { page }).await
    }

    pub async fn set_media_filter(&self, media_type: Option<MediaType>) -> Result<(), BrowseError> {
        self.send(BrowseMessage::SetMediaFilter { media_type }).await
    }

    pub async fn set_source_filter(&self, source: Option<Source>) -> Result<(), BrowseError> {
        self.send(BrowseMessage::SetSourceFilter { source }).await
    }

    pub async fn clear_filters(&self) -> Result<(), BrowseError> {
        self.send(BrowseMessage::ClearFilters).await
    }

    /// Clear the query, loaded results and the session cache.
    pub async fn reset(&self) -> Result<(), BrowseError> {
        self.send(BrowseMessage::Reset).await
    }

    /// Current state, after every message sent before this call is handled.
    pub async fn snapshot(&self) -> Result<BrowseSnapshot, BrowseError> {
        let (reply, receiver) = oneshot::channel();
        self.send(BrowseMessage::GetSnapshot { reply }).await?;
        receiver.await.map_err(|_| BrowseError::ActorStopped)
    }

    /// Watch every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<BrowseSnapshot> {
        self.snapshots.clone()
    }

    /// Stop the actor. In-flight fetches are left to finish and are ignored.
    pub async fn shutdown(&self) {
        tracing::info!("Sending shutdown signal to browse actor");
        if let Err(e) = self.sender.send(BrowseMessage::Shutdown).await {
            tracing::warn!("Failed to send shutdown signal: {}", e);
        }
    }

    /// Whether the actor is still accepting messages.
    pub fn is_running(&self) -> bool {
        !self.sender.is_closed()
    }
}
