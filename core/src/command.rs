use crate::{
    filter::{StatusFilter, TierFilter},
    types::SubscriberId,
};
use serde::{Deserialize, Serialize};

/// Every user interaction the desk responds to.
/// Variants may be added, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DeskCommand {
    // ── Criteria (each resets the page to 1) ──────
    SetSearch       { term: String },
    SetStatusFilter { status: StatusFilter },
    SetTierFilter   { tier: TierFilter },
    ResetFilters,

    // ── Pagination ────────────────────────────────
    NextPage,
    PreviousPage,
    GoToPage { page: usize },

    // ── Selection ─────────────────────────────────
    ToggleSelection { id: SubscriberId },
    SelectAllVisible,
    ClearSelection,
}

impl DeskCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetSearch { .. }       => "set_search",
            Self::SetStatusFilter { .. } => "set_status_filter",
            Self::SetTierFilter { .. }   => "set_tier_filter",
            Self::ResetFilters           => "reset_filters",
            Self::NextPage               => "next_page",
            Self::PreviousPage           => "previous_page",
            Self::GoToPage { .. }        => "go_to_page",
            Self::ToggleSelection { .. } => "toggle_selection",
            Self::SelectAllVisible       => "select_all_visible",
            Self::ClearSelection         => "clear_selection",
        }
    }
}
