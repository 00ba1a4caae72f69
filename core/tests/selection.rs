mod common;

use common::{numbered, roster_of};
use desk_core::{
    filter::TierFilter,
    selection::{SelectAllOutcome, Selection},
    session::DeskSession,
    subscriber::SubscriptionTier,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn session_of(n: i64) -> DeskSession {
    DeskSession::new(roster_of(numbered(n)), 10)
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Select-all on page 1 adds to ids already picked on page 2.
#[test]
fn select_all_keeps_ids_from_other_pages() {
    let mut session = session_of(25);
    session.go_to_page(2);
    for id in [11, 12, 13, 14] {
        assert!(session.toggle_selection(id));
    }

    session.go_to_page(1);
    let outcome = session.select_all_visible();
    assert_eq!(outcome, SelectAllOutcome::Selected { added: 10 });
    assert_eq!(session.selection().len(), 14);
    assert!(session.page_fully_selected());
}

/// With nothing visible selected beforehand, select-all twice restores the selection.
#[test]
fn select_all_twice_round_trips() {
    let mut session = session_of(25);
    session.toggle_selection(22);
    let before = session.selection().clone();

    session.select_all_visible();
    let outcome = session.select_all_visible();
    assert_eq!(outcome, SelectAllOutcome::Deselected { removed: 10 });
    assert_eq!(session.selection(), &before);
}

/// A partly selected page is completed, not cleared.
#[test]
fn partially_selected_page_is_completed() {
    let mut session = session_of(5);
    session.toggle_selection(3);
    assert!(!session.page_fully_selected());

    let outcome = session.select_all_visible();
    assert_eq!(outcome, SelectAllOutcome::Selected { added: 4 });
    assert_eq!(session.selection().to_vec(), vec![1, 2, 3, 4, 5]);
}

/// Selected ids survive being filtered out and come back selected.
#[test]
fn selection_survives_filter_changes() {
    let mut session = session_of(25);
    session.toggle_selection(3);
    session.toggle_selection(17);

    session.set_search_term("user17@");
    assert_eq!(session.visible_ids(), vec![17]);
    assert!(session.page_fully_selected());
    assert_eq!(session.selection().to_vec(), vec![3, 17]);

    session.set_search_term("");
    assert_eq!(session.selection().to_vec(), vec![3, 17]);
    let snapshot = session.snapshot();
    let selected_rows: Vec<i64> = snapshot
        .rows
        .iter()
        .filter(|r| r.selected)
        .map(|r| r.subscriber.id)
        .collect();
    assert_eq!(selected_rows, vec![3]);
}

/// An id picked on page 2 stays selected when a filter change sends
/// the view back to page 1, both while visible and while hidden.
#[test]
fn page_two_selection_survives_tier_filter() {
    let mut records = numbered(25);
    for s in records.iter_mut().filter(|s| s.id % 2 == 0) {
        s.subscription_tier = SubscriptionTier::Premium;
    }
    let mut session = DeskSession::new(roster_of(records), 10);

    session.go_to_page(2);
    assert_eq!(session.current_page(), 2);
    assert!(session.visible_ids().contains(&14));
    assert!(session.toggle_selection(14));

    session.set_tier_filter(TierFilter::Premium);
    assert_eq!(session.current_page(), 1);
    assert_eq!(session.selection().to_vec(), vec![14]);
    assert!(session.snapshot().rows.iter().any(|r| r.subscriber.id == 14 && r.selected));

    session.set_tier_filter(TierFilter::Basic);
    assert_eq!(session.current_page(), 1);
    assert!(!session.visible_ids().contains(&14));
    assert!(session.selection().contains(14));
}

/// Select-all on an empty page changes nothing.
#[test]
fn select_all_on_empty_page_is_a_no_op() {
    let mut session = session_of(5);
    session.toggle_selection(2);
    session.set_search_term("zzz");
    assert_eq!(session.select_all_visible(), SelectAllOutcome::Unchanged);
    assert_eq!(session.selection().to_vec(), vec![2]);
    assert!(!session.page_fully_selected());
}

/// Clearing empties the set without moving the page or criteria.
#[test]
fn clear_selection_empties_set_only() {
    let mut session = session_of(25);
    session.next_page();
    session.select_all_visible();
    session.clear_selection();
    assert!(session.selection().is_empty());
    assert_eq!(session.current_page(), 2);
}

/// Toggling an id that is not on screen is allowed.
#[test]
fn toggle_accepts_ids_off_screen() {
    let mut sel = Selection::new();
    assert!(sel.toggle(999));
    assert!(!sel.page_fully_selected(&[1, 2]));
    assert_eq!(sel.select_all_visible(&[1, 2]), SelectAllOutcome::Selected { added: 2 });
    assert_eq!(sel.to_vec(), vec![1, 2, 999]);
}
