use agentledger::core::db;
use agentledger::core::ledger::{
    NO_HISTORY_SENTINEL, append_conversation_turn, append_journal, append_playlist,
    format_conversation_as_context, list_journals, list_journals_by_owner, list_playlists,
    recent_conversation, search_journals,
};
use agentledger::core::store::{Store, open_store};
use tempfile::{TempDir, tempdir};

fn test_store() -> (TempDir, Store) {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path()).unwrap();
    (tmp, store)
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn list_by_owner_filters_and_orders_newest_first() {
    let (_tmp, store) = test_store();
    for i in 0..4 {
        append_journal(&store, "A", &format!("a{i}"), None).unwrap();
        if i < 3 {
            append_journal(&store, "B", &format!("b{i}"), None).unwrap();
        }
    }

    let rows = list_journals_by_owner(&store, "A", 7).unwrap();
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r.owner == "A"));
    assert!(rows.windows(2).all(|w| w[0].id > w[1].id));
    assert_eq!(rows[0].text, "a3");
}

#[test]
fn list_journals_is_bounded_and_newest_first() {
    let (_tmp, store) = test_store();
    for i in 0..5 {
        append_journal(&store, "A", &format!("entry {i}"), None).unwrap();
    }
    let rows = list_journals(&store, 2).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].text, "entry 4");
    assert_eq!(rows[1].text, "entry 3");
    assert!(list_journals(&store, 0).unwrap().is_empty());
}

#[test]
fn journal_tags_round_trip_including_absent() {
    let (_tmp, store) = test_store();
    append_journal(&store, "A", "tagged", Some(&tags(&["x", "y"]))).unwrap();
    append_journal(&store, "A", "untagged", None).unwrap();

    let rows = list_journals(&store, 10).unwrap();
    assert_eq!(rows[0].tags, None);
    assert_eq!(rows[1].tags, Some(tags(&["x", "y"])));
    assert!(!rows[1].created_at.is_empty());
}

#[test]
fn append_returns_increasing_row_ids() {
    let (_tmp, store) = test_store();
    let first = append_journal(&store, "A", "one", None).unwrap();
    let second = append_journal(&store, "B", "two", None).unwrap();
    assert_eq!(first.status, "ok");
    assert!(second.row_id > first.row_id);
}

#[test]
fn search_is_case_sensitive_substring_over_text_and_tags() {
    let (_tmp, store) = test_store();
    append_journal(&store, "A", "Learned about Borrowing", None).unwrap();
    append_journal(&store, "A", "plain note", Some(&tags(&["borrowck"]))).unwrap();
    append_journal(&store, "B", "nothing here", None).unwrap();

    let upper = search_journals(&store, "Borrow", 10).unwrap();
    assert_eq!(upper.len(), 1);
    assert_eq!(upper[0].text, "Learned about Borrowing");

    let lower = search_journals(&store, "borrow", 10).unwrap();
    assert_eq!(lower.len(), 1);
    assert_eq!(lower[0].text, "plain note");

    assert!(search_journals(&store, "absent", 10).unwrap().is_empty());
}

#[test]
fn search_treats_like_wildcards_literally() {
    let (_tmp, store) = test_store();
    append_journal(&store, "A", "progress 50% done", None).unwrap();
    append_journal(&store, "A", "progress 50 done", None).unwrap();

    let rows = search_journals(&store, "50%", 10).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text, "progress 50% done");
}

#[test]
fn search_results_are_newest_first() {
    let (_tmp, store) = test_store();
    append_journal(&store, "A", "match one", None).unwrap();
    append_journal(&store, "A", "skip", None).unwrap();
    append_journal(&store, "B", "match two", None).unwrap();

    let rows = search_journals(&store, "match", 10).unwrap();
    assert_eq!(
        rows.iter().map(|r| r.text.as_str()).collect::<Vec<_>>(),
        vec!["match two", "match one"]
    );
}

#[test]
fn playlist_round_trip_preserves_items() {
    let (_tmp, store) = test_store();
    append_playlist(&store, "old", &tags(&["z"])).unwrap();
    append_playlist(&store, "X", &tags(&["a", "b", "c"])).unwrap();

    let latest = list_playlists(&store, 1).unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].name, "X");
    assert_eq!(latest[0].items, tags(&["a", "b", "c"]));
}

#[test]
fn recent_conversation_returns_last_turns_chronologically() {
    let (_tmp, store) = test_store();
    for i in 1..=5 {
        append_conversation_turn(&store, "agent", &format!("q{i}"), &format!("r{i}"), None)
            .unwrap();
    }
    append_conversation_turn(&store, "other", "q", "r", Some("s1")).unwrap();

    let turns = recent_conversation(&store, "agent", 3).unwrap();
    let messages: Vec<&str> = turns.iter().map(|t| t.user_message.as_str()).collect();
    assert_eq!(messages, vec!["q3", "q4", "q5"]);
    assert!(turns.windows(2).all(|w| w[0].id < w[1].id));
}

#[test]
fn recent_conversation_clamps_limit() {
    let (_tmp, store) = test_store();
    for i in 1..=12 {
        append_conversation_turn(&store, "agent", &format!("q{i}"), "r", None).unwrap();
    }

    let many = recent_conversation(&store, "agent", 999).unwrap();
    assert_eq!(many.len(), 10);
    assert_eq!(many[0].user_message, "q3");

    let zero = recent_conversation(&store, "agent", 0).unwrap();
    assert_eq!(zero.len(), 1);
    assert_eq!(zero[0].user_message, "q12");

    assert_eq!(recent_conversation(&store, "agent", -7).unwrap().len(), 1);
}

#[test]
fn session_id_is_optional() {
    let (_tmp, store) = test_store();
    append_conversation_turn(&store, "agent", "q1", "r1", Some("demo_session")).unwrap();
    append_conversation_turn(&store, "agent", "q2", "r2", None).unwrap();

    let turns = recent_conversation(&store, "agent", 5).unwrap();
    assert_eq!(turns[0].session_id.as_deref(), Some("demo_session"));
    assert_eq!(turns[1].session_id, None);
}

#[test]
fn context_for_unknown_owner_is_sentinel() {
    let (_tmp, store) = test_store();
    let text = format_conversation_as_context(&store, "nobody", 5).unwrap();
    assert_eq!(text, NO_HISTORY_SENTINEL);
}

#[test]
fn context_renders_user_and_agent_lines() {
    let (_tmp, store) = test_store();
    append_conversation_turn(&store, "agent", "make a caption", "[CASUAL] hi", None).unwrap();
    append_conversation_turn(&store, "agent", "more formal", "[PRO] hello", None).unwrap();

    let text = format_conversation_as_context(&store, "agent", 5).unwrap();
    assert_eq!(
        text,
        "Recent conversation history:\n\
         User: make a caption\nYou: [CASUAL] hi\n---\n\
         User: more formal\nYou: [PRO] hello\n---"
    );
}

#[test]
fn ensure_schema_twice_keeps_data() {
    let (_tmp, store) = test_store();
    append_journal(&store, "A", "before", None).unwrap();

    db::ensure_schema(&store).unwrap();
    db::ensure_schema(&store).unwrap();

    append_journal(&store, "A", "after", None).unwrap();
    let rows = list_journals(&store, 10).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].text, "after");
    assert_eq!(rows[1].text, "before");
}
