use catalog::NormalizedRecord;
use serde::{Deserialize, Serialize};

/// How successive pages are presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BrowseMode {
    /// Pages append to one growing list, driven by scrolling
    #[default]
    Infinite,
    /// Each page replaces the list, driven by explicit navigation
    Paged,
}

impl BrowseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Infinite => "INFINITE",
            Self::Paged => "PAGED",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Infinite => Self::Paged,
            Self::Paged => Self::Infinite,
        }
    }
}

impl std::fmt::Display for BrowseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
}

/// Read-only view of a browse session, published after every transition
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseSnapshot {
    pub query: String,
    pub mode: BrowseMode,
    pub phase: Phase,
    /// Last page fetched in infinite mode
    pub page: u32,
    /// Page shown in paged mode
    pub current_page: u32,
    /// Loaded results after the active filters
    pub results: Vec<NormalizedRecord>,
    /// Loaded results before filtering
    pub loaded: usize,
    pub has_more: bool,
    pub loading: bool,
    pub total_results: Option<u64>,
    pub page_size: u32,
    pub total_pages: Option<u32>,
    pub can_go_prev: bool,
    pub can_go_next: bool,
    /// Whether the infinite-scroll trigger element should be rendered
    pub show_sentinel: bool,
}
