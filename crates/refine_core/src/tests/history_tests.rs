use super::*;

use chrono::Duration;

fn history_of(contents: &[&str]) -> RefinementHistory {
    let mut history = RefinementHistory::new();
    for (idx, content) in contents.iter().enumerate() {
        let prompt = if idx == 0 { String::new() } else { format!("step {idx}") };
        history.add(*content, prompt);
    }
    history
}

#[test]
fn empty_history_has_no_current_entry() {
    let mut history = RefinementHistory::new();
    assert!(history.is_empty());
    assert_eq!(history.cursor(), None);
    assert!(history.current().is_none());
    assert!(history.revert_to_previous().is_none());
    assert!(history.advance_to_next().is_none());
    assert_eq!(history.cursor(), None);
}

#[test]
fn add_moves_cursor_to_tail() {
    let mut history = RefinementHistory::with_original("Post A");
    assert_eq!(history.cursor(), Some(0));
    assert!(history.current().expect("current").is_initial());

    let entry = history.add("Post B", "shorter").clone();
    assert_eq!(entry.content, "Post B");
    assert_eq!(entry.prompt, "shorter");
    assert_eq!(history.len(), 2);
    assert_eq!(history.cursor(), Some(1));
    assert_eq!(history.current(), Some(&entry));
}

#[test]
fn duplicate_content_is_not_deduplicated() {
    let mut history = RefinementHistory::with_original("same");
    history.add("same", "again");
    assert_eq!(history.len(), 2);
}

#[test]
fn revert_at_first_entry_is_a_noop() {
    let mut history = history_of(&["only"]);
    let before = history.clone();

    let current = history.revert_to_previous().cloned();

    assert_eq!(current.as_ref(), before.current());
    assert_eq!(history, before);
    assert_eq!(history.cursor(), Some(0));
}

#[test]
fn revert_steps_back_one_entry() {
    let mut history = history_of(&["v0", "v1", "v2"]);
    assert_eq!(history.cursor(), Some(2));

    let content = history.revert_to_previous().expect("entry").content.clone();
    assert_eq!(history.cursor(), Some(1));
    assert_eq!(content, history.entries()[1].content);
}

#[test]
fn two_reverts_from_three_entries_reach_the_original() {
    let mut history = history_of(&["v0", "v1", "v2"]);

    history.revert_to_previous();
    history.revert_to_previous();

    assert_eq!(history.cursor(), Some(0));
    assert_eq!(
        history.current().expect("current").content,
        history.entries()[0].content
    );
    assert_eq!(history.len(), 3);
}

#[test]
fn add_after_revert_drops_forward_entries() {
    let mut history = history_of(&["v0", "v1", "v2"]);
    history.revert_to_previous();
    history.revert_to_previous();

    history.add("branch", "different direction");

    let contents: Vec<_> = history.entries().iter().map(|e| e.content.as_str()).collect();
    assert_eq!(contents, ["v0", "branch"]);
    assert_eq!(history.cursor(), Some(1));
    assert!(!history.can_advance());
}

#[test]
fn advance_restores_reverted_entry_until_next_add() {
    let mut history = history_of(&["v0", "v1"]);
    history.revert_to_previous();
    assert!(history.can_advance());

    let content = history.advance_to_next().expect("entry").content.clone();
    assert_eq!(content, "v1");
    assert_eq!(history.cursor(), Some(1));

    let again = history.advance_to_next().expect("entry").content.clone();
    assert_eq!(again, "v1");
    assert_eq!(history.cursor(), Some(1));
}

#[test]
fn revert_to_jumps_to_any_existing_entry() {
    let mut history = history_of(&["v0", "v1", "v2", "v3"]);

    let content = history.revert_to(1).expect("in range").content.clone();
    assert_eq!(content, "v1");
    assert_eq!(history.cursor(), Some(1));
    assert_eq!(history.len(), 4);
}

#[test]
fn revert_to_out_of_range_leaves_state_unchanged() {
    let mut history = history_of(&["v0", "v1"]);
    let before = history.clone();

    let err = history.revert_to(5).expect_err("out of range");

    assert_eq!(err, HistoryError::OutOfRange { index: 5, len: 2 });
    assert_eq!(history, before);
}

#[test]
fn timestamps_never_go_backwards() {
    let mut history = RefinementHistory::new();
    let start = Utc::now();
    history.push_at("v0".into(), String::new(), start);
    history.push_at("v1".into(), "earlier clock".into(), start - Duration::seconds(30));
    history.push_at("v2".into(), "later clock".into(), start + Duration::seconds(5));

    let stamps: Vec<_> = history.entries().iter().map(|e| e.created_at).collect();
    assert_eq!(stamps[0], start);
    assert_eq!(stamps[1], start);
    assert_eq!(stamps[2], start + Duration::seconds(5));
    assert_eq!(history.entries()[1].content, "v1");
}

#[test]
fn history_serializes_entries_and_cursor() {
    let mut history = history_of(&["v0", "v1"]);
    history.revert_to_previous();

    let value = serde_json::to_value(&history).expect("json");
    assert_eq!(value["cursor"], 0);
    assert_eq!(value["entries"][1]["prompt"], "step 1");
}
