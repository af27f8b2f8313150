//! Client-side result filters
//!
//! Filters only look at results that have already been fetched. In infinite
//! mode a filtered view can therefore be shorter than a page even when more
//! matches exist further on; filtering never fetches to fill the gap.

use catalog::{MediaType, NormalizedRecord, Source};
use serde::{Deserialize, Serialize};

/// Independent predicates combined with AND; `None` means no restriction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultFilter {
    pub media_type: Option<MediaType>,
    pub source: Option<Source>,
}

impl ResultFilter {
    pub fn with_media_type(mut self, media_type: Option<MediaType>) -> Self {
        self.media_type = media_type;
        self
    }

    pub fn with_source(mut self, source: Option<Source>) -> Self {
        self.source = source;
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.media_type.is_none() && self.source.is_none()
    }

    pub fn matches(&self, record: &NormalizedRecord) -> bool {
        self.media_type.map_or(true, |m| record.media_type == m)
            && self.source.map_or(true, |s| record.source == s)
    }

    /// Derive the displayed list, preserving order.
    pub fn apply(&self, records: &[NormalizedRecord]) -> Vec<NormalizedRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}
