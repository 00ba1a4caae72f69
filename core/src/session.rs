//! The desk session: single owner of all subscriber-table state.
//!
//! DATA FLOW (fixed):
//!   roster → filter (criteria) → filtered positions → page slice → rows
//!
//! RULES:
//!   - Every mutation goes through a method on DeskSession. Each method
//!     documents which dependent state it resets.
//!   - recompute() runs synchronously after any change to the roster or
//!     the criteria. It rebuilds the filtered view and resets the page
//!     to 1. It never touches the selection.
//!   - Page navigation does not re-filter; the page slice is derived on read.
//!   - Nothing here fails. Empty views and stale pages degrade to empty slices.

use crate::{
    command::DeskCommand,
    config::DeskConfig,
    filter::{matching_positions, FilterCriteria, StatusFilter, TierFilter},
    metrics::RecordMetrics,
    paginator::PaginationState,
    roster::Roster,
    selection::{SelectAllOutcome, Selection},
    snapshot::{SessionSnapshot, SubscriberRow},
    subscriber::Subscriber,
    types::{SessionId, SubscriberId},
};

pub struct DeskSession {
    pub session_id: SessionId,
    roster:         Roster,
    criteria:       FilterCriteria,
    /// Positions into `roster`, ascending.
    filtered:       Vec<usize>,
    pagination:     PaginationState,
    selection:      Selection,
}

impl DeskSession {
    /// A session over `roster` with no filters, page 1, nothing selected.
    pub fn new(roster: Roster, page_size: usize) -> Self {
        let mut session = Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            roster,
            criteria:   FilterCriteria::all(),
            filtered:   Vec::new(),
            pagination: PaginationState::new(page_size),
            selection:  Selection::new(),
        };
        session.recompute();
        session
    }

    pub fn with_config(roster: Roster, config: &DeskConfig) -> Self {
        Self::new(roster, config.page_size)
    }

    // ── Recompute ──────────────────────────────────────────────

    /// Rebuild the filtered view from roster + criteria.
    /// Resets: current page → 1. Keeps: selection.
    pub fn recompute(&mut self) {
        self.filtered = matching_positions(self.roster.as_slice(), &self.criteria);
        self.pagination.reset();
        log::debug!(
            "session={} recompute: {}/{} match, {} pages",
            self.session_id,
            self.filtered.len(),
            self.roster.len(),
            self.total_pages()
        );
    }

    // ── Roster ─────────────────────────────────────────────────

    /// Swap in a newly arrived roster (e.g. a late fetch replacing fallback data).
    /// Resets: current page → 1. Keeps: criteria, selection.
    ///
    /// Selected ids are carried over as-is, even ids the new roster lacks.
    pub fn replace_roster(&mut self, roster: Roster) {
        let stale = self.selection.iter().filter(|id| !roster.contains(*id)).count();
        if stale > 0 {
            log::warn!(
                "session={} replace_roster: {stale} selected ids are not in the new roster",
                self.session_id
            );
        }
        self.roster = roster;
        self.recompute();
    }

    // ── Criteria ───────────────────────────────────────────────

    /// Resets: current page → 1 (only if the term changed). Keeps: selection.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.criteria.search_term {
            self.criteria.search_term = term;
            self.recompute();
        }
    }

    /// Resets: current page → 1 (only if the filter changed). Keeps: selection.
    pub fn set_status_filter(&mut self, status: StatusFilter) {
        if status != self.criteria.status {
            self.criteria.status = status;
            self.recompute();
        }
    }

    /// Resets: current page → 1 (only if the filter changed). Keeps: selection.
    pub fn set_tier_filter(&mut self, tier: TierFilter) {
        if tier != self.criteria.tier {
            self.criteria.tier = tier;
            self.recompute();
        }
    }

    /// Replace all three criteria at once.
    /// Resets: current page → 1 (only if anything changed). Keeps: selection.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        if criteria != self.criteria {
            self.criteria = criteria;
            self.recompute();
        }
    }

    // ── Pagination ─────────────────────────────────────────────

    /// No-op on the last page. Resets nothing.
    pub fn next_page(&mut self) -> bool {
        self.pagination.next(self.filtered.len())
    }

    /// No-op on page 1. Resets nothing.
    pub fn previous_page(&mut self) -> bool {
        self.pagination.previous()
    }

    /// Clamped into [1, max(total_pages, 1)]. Resets nothing.
    pub fn go_to_page(&mut self, page: usize) {
        self.pagination.go_to(page, self.filtered.len());
    }

    // ── Selection ──────────────────────────────────────────────

    /// Returns whether `id` is now selected. Resets nothing.
    /// Any id is accepted, visible or not.
    pub fn toggle_selection(&mut self, id: SubscriberId) -> bool {
        self.selection.toggle(id)
    }

    /// Page-scoped select-all over the current page. Resets nothing.
    pub fn select_all_visible(&mut self) -> SelectAllOutcome {
        let visible = self.visible_ids();
        self.selection.select_all_visible(&visible)
    }

    /// Resets: selection → empty. Keeps everything else.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ── Commands ───────────────────────────────────────────────

    pub fn apply(&mut self, command: DeskCommand) {
        log::debug!("session={} apply {}", self.session_id, command.name());
        match command {
            DeskCommand::SetSearch { term }          => self.set_search_term(term),
            DeskCommand::SetStatusFilter { status }  => self.set_status_filter(status),
            DeskCommand::SetTierFilter { tier }      => self.set_tier_filter(tier),
            DeskCommand::ResetFilters                => self.set_criteria(FilterCriteria::all()),
            DeskCommand::NextPage                    => { self.next_page(); }
            DeskCommand::PreviousPage                => { self.previous_page(); }
            DeskCommand::GoToPage { page }           => self.go_to_page(page),
            DeskCommand::ToggleSelection { id }      => { self.toggle_selection(id); }
            DeskCommand::SelectAllVisible            => { self.select_all_visible(); }
            DeskCommand::ClearSelection              => self.clear_selection(),
        }
    }

    // ── Views ──────────────────────────────────────────────────

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.filtered.len())
    }

    /// The whole filtered view, roster order.
    pub fn filtered(&self) -> Vec<&Subscriber> {
        self.resolve(&self.filtered)
    }

    /// The current page of the filtered view.
    pub fn visible(&self) -> Vec<&Subscriber> {
        self.resolve(self.pagination.slice(&self.filtered))
    }

    pub fn visible_ids(&self) -> Vec<SubscriberId> {
        self.visible().iter().map(|s| s.id).collect()
    }

    pub fn page_fully_selected(&self) -> bool {
        self.selection.page_fully_selected(&self.visible_ids())
    }

    /// Selected records that exist in the roster, roster order.
    pub fn selected_subscribers(&self) -> Vec<&Subscriber> {
        self.roster
            .iter()
            .filter(|s| self.selection.contains(s.id))
            .collect()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let rows = self
            .visible()
            .into_iter()
            .map(|s| SubscriberRow {
                display_name: s.display_name(),
                selected:     self.selection.contains(s.id),
                metrics:      RecordMetrics::for_subscriber(s),
                subscriber:   s.clone(),
            })
            .collect();

        SessionSnapshot {
            session_id:          self.session_id.clone(),
            roster_origin:       self.roster.origin().clone(),
            roster_size:         self.roster.len(),
            criteria:            self.criteria.clone(),
            filtered_count:      self.filtered.len(),
            page_size:           self.pagination.page_size,
            current_page:        self.pagination.current_page,
            total_pages:         self.total_pages(),
            window:              self.pagination.window(self.filtered.len()),
            rows,
            page_fully_selected: self.page_fully_selected(),
            selected_ids:        self.selection.to_vec(),
        }
    }

    fn resolve(&self, positions: &[usize]) -> Vec<&Subscriber> {
        let all = self.roster.as_slice();
        positions.iter().filter_map(|&i| all.get(i)).collect()
    }
}
