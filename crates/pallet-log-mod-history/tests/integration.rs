// Integration tests for the snapshot history.
//
// These drive the public API with a nested document type to check the
// structural-equality and truncation rules end to end.

use std::collections::BTreeMap;

use pallet_log_mod_history::{HistoryError, SnapshotHistory, Update, INITIAL_DESCRIPTION};

#[derive(Debug, Clone, PartialEq)]
struct Board {
    title: String,
    columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq)]
struct Column {
    name: String,
    cards: BTreeMap<u32, String>,
}

fn board() -> Board {
    Board {
        title: "deliveries".to_string(),
        columns: vec![Column {
            name: "monday".to_string(),
            cards: BTreeMap::from([(1, "spark".to_string())]),
        }],
    }
}

fn add_card(board: &Board, key: u32, label: &str) -> Board {
    let mut next = board.clone();
    next.columns[0].cards.insert(key, label.to_string());
    next
}

// ── Construction ───────────────────────────────────────────────────────

#[test]
fn test_fresh_history_exposes_initial_snapshot() {
    let history = SnapshotHistory::new(board());
    assert_eq!(history.current(), &board());
    assert_eq!(history.len(), 1);
    assert_eq!(history.pointer(), 0);
    assert_eq!(history.list_history()[0].description(), INITIAL_DESCRIPTION);
}

// ── Structural Equality ────────────────────────────────────────────────

#[test]
fn test_rebuilt_equal_document_is_noop() {
    let mut history = SnapshotHistory::new(board());

    // Built from scratch, shares no allocation with the current state.
    let rebuilt = Board {
        title: String::from("deliveries"),
        columns: vec![Column {
            name: String::from("monday"),
            cards: [(1, String::from("spark"))].into_iter().collect(),
        }],
    };

    assert!(!history.replace(rebuilt, "noop"));
    assert_eq!(history.len(), 1);
    assert_eq!(history.pointer(), 0);
}

#[test]
fn test_nested_change_is_recorded() {
    let mut history = SnapshotHistory::new(board());
    assert!(history.apply(|b| add_card(b, 2, "velvet"), "add velvet"));
    assert_eq!(history.len(), 2);
    assert_eq!(history.current().columns[0].cards.len(), 2);
}

#[test]
fn test_map_insertion_order_does_not_matter() {
    let mut history = SnapshotHistory::new(board());
    history.apply(|b| add_card(&add_card(b, 2, "x"), 3, "y"), "two cards");

    let reordered = add_card(&add_card(&board(), 3, "y"), 2, "x");
    assert!(!history.replace(reordered, "same cards, other order"));
    assert_eq!(history.len(), 2);
}

// ── Revert Workflow ────────────────────────────────────────────────────

#[test]
fn test_revert_then_mutate_loses_abandoned_future() {
    let mut history = SnapshotHistory::new(0u32);
    history.replace(1, "A");
    history.replace(2, "B");
    history.replace(3, "C");
    assert_eq!(history.pointer(), 3);
    assert_eq!(history.len(), 4);

    history.revert(1).unwrap();
    assert_eq!(*history.current(), 1);
    assert_eq!(history.len(), 2);

    history.mutate(Update::apply(|_: &u32| 4), "D");
    let states: Vec<u32> = history.list_history().iter().map(|s| *s.state()).collect();
    assert_eq!(states, vec![0, 1, 4]);
    let labels: Vec<&str> = history
        .list_history()
        .iter()
        .map(|s| s.description())
        .collect();
    assert_eq!(labels, vec![INITIAL_DESCRIPTION, "A", "D"]);
    assert_eq!(history.pointer(), 2);
}

#[test]
fn test_out_of_range_revert_reports_and_preserves() {
    let mut history = SnapshotHistory::new(0u32);
    history.replace(1, "A");

    let len = history.len();
    let before: Vec<u32> = history.list_history().iter().map(|s| *s.state()).collect();

    assert_eq!(
        history.revert(len),
        Err(HistoryError::OutOfRange { index: len, len })
    );

    // A caller computing `pointer - 1` from zero ends up far out of range.
    let wrapped = 0usize.wrapping_sub(1);
    assert!(history.revert(wrapped).is_err());

    let after: Vec<u32> = history.list_history().iter().map(|s| *s.state()).collect();
    assert_eq!(before, after);
    assert_eq!(history.pointer(), 1);
}

#[test]
fn test_display_index_mapping_reverts_to_state_before_action() {
    // Display lists actions newest first without the initial snapshot;
    // row k maps to full-log index len - 2 - k.
    let mut history = SnapshotHistory::new(Vec::<u32>::new());
    for n in 1..=4 {
        history.apply(move |s| [s.clone(), vec![n]].concat(), format!("add {n}"));
    }

    let display: Vec<&str> = history
        .list_history()
        .iter()
        .skip(1)
        .rev()
        .map(|s| s.description())
        .collect();
    assert_eq!(display, vec!["add 4", "add 3", "add 2", "add 1"]);

    // Undo "add 3" (display row 1).
    let target = history.len() - 2 - 1;
    history.revert(target).unwrap();
    assert_eq!(history.current(), &vec![1, 2]);
}

#[test]
fn test_many_mutations_keep_invariants() {
    let mut history = SnapshotHistory::new(0u64);
    for i in 1..=500 {
        history.replace(i, format!("set {i}"));
        assert_eq!(history.pointer(), history.len() - 1);
    }
    assert_eq!(history.len(), 501);

    history.revert(250).unwrap();
    assert_eq!(*history.current(), 250);
    assert_eq!(history.len(), 251);
    assert!(!history.can_redo());
}

#[test]
fn test_history_can_move_to_another_thread() {
    let mut history = SnapshotHistory::new(board());
    history.apply(|b| add_card(b, 2, "velvet"), "add velvet");

    let handle = std::thread::spawn(move || {
        history.undo_last().unwrap();
        history
    });
    let history = handle.join().unwrap();
    assert_eq!(*history.current(), board());
}
