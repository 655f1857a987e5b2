use agentledger::core::ledger::{list_journals, list_playlists};
use agentledger::core::store::{Store, open_store};
use agentledger::plugins::content_creator::{generate_caption, make_playlist};
use agentledger::plugins::learning_coach;
use serde_json::json;
use tempfile::{TempDir, tempdir};

fn test_store() -> (TempDir, Store) {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path()).unwrap();
    (tmp, store)
}

#[test]
fn make_playlist_persists_generated_items() {
    let (_tmp, store) = test_store();
    let out = make_playlist(&store, "jazz,lo-fi", 4);
    assert_eq!(out["status"], "success");
    assert_eq!(
        out["playlist"],
        json!(["Jazz Song 1", "Jazz Song 1", "Lo-Fi Song 2", "Lo-Fi Song 2"])
    );

    let saved = list_playlists(&store, 5).unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].name, "Playlist (jazz,lo-fi)");
    assert_eq!(json!(saved[0].items), out["playlist"]);
}

#[test]
fn make_playlist_clamps_length() {
    let (_tmp, store) = test_store();
    assert_eq!(
        make_playlist(&store, "ambient", 0)["playlist"]
            .as_array()
            .unwrap()
            .len(),
        1
    );
    assert_eq!(
        make_playlist(&store, "ambient", 5000)["playlist"]
            .as_array()
            .unwrap()
            .len(),
        100
    );
    assert_eq!(list_playlists(&store, 10).unwrap().len(), 2);
}

#[test]
fn caption_does_not_touch_the_ledger() {
    let (_tmp, store) = test_store();
    let out = generate_caption("Launch day", "hype");
    assert_eq!(out["caption"], "[HYPE] Launch day");
    assert!(list_journals(&store, 5).unwrap().is_empty());
    assert!(list_playlists(&store, 5).unwrap().is_empty());
}

#[test]
fn learning_journal_stores_optional_tags() {
    let (_tmp, store) = test_store();
    let tagged = learning_coach::journal(&store, "Learned lifetimes", "rust,lifetimes");
    assert_eq!(tagged["status"], "saved");
    assert_eq!(tagged["entry"], "Learned lifetimes");
    learning_coach::journal(&store, "No tags today", "");

    let rows = list_journals(&store, 5).unwrap();
    assert_eq!(rows[0].owner, learning_coach::JOURNAL_OWNER);
    assert_eq!(rows[0].tags, None);
    assert_eq!(
        rows[1].tags,
        Some(vec!["rust".to_string(), "lifetimes".to_string()])
    );
}
