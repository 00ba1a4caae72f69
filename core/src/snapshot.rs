//! Snapshot serialization: the session's rendered view state as JSON.
//!
//! A snapshot captures everything a front end needs to draw the
//! subscriber table: the current page of rows with their badges and
//! rates, paging controls, and the bulk-selection bar.

use crate::{
    filter::FilterCriteria,
    metrics::RecordMetrics,
    paginator::PageWindow,
    roster::RosterOrigin,
    subscriber::Subscriber,
    types::{SessionId, SubscriberId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriberRow {
    pub subscriber:   Subscriber,
    pub display_name: String,
    pub selected:     bool,
    pub metrics:      RecordMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id:          SessionId,
    pub roster_origin:       RosterOrigin,
    pub roster_size:         usize,
    pub criteria:            FilterCriteria,
    pub filtered_count:      usize,
    pub page_size:           usize,
    pub current_page:        usize,
    pub total_pages:         usize,
    /// None when the current page is empty.
    pub window:              Option<PageWindow>,
    pub rows:                Vec<SubscriberRow>,
    /// Header checkbox: every row on this page is selected.
    pub page_fully_selected: bool,
    /// Ascending. May include ids not on this page or not in the roster.
    pub selected_ids:        Vec<SubscriberId>,
}
