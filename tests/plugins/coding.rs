use agentledger::core::entry::JournalKind;
use agentledger::core::ledger::{append_journal, list_journals};
use agentledger::core::store::{Store, open_store};
use agentledger::plugins::coding::{
    JOURNAL_OWNER, debug_python_code, generate_django_model, generate_test_cases,
    get_coding_history, save_code_snippet,
};
use tempfile::{TempDir, tempdir};

fn test_store() -> (TempDir, Store) {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path()).unwrap();
    (tmp, store)
}

#[test]
fn save_code_snippet_stores_structured_entry() {
    let (_tmp, store) = test_store();
    let out = save_code_snippet(&store, "retry", "for _ in range(3): pass", "python", "loops");
    assert_eq!(out["status"], "saved");
    assert_eq!(out["title"], "retry");

    let rows = list_journals(&store, 1).unwrap();
    assert_eq!(rows[0].owner, JOURNAL_OWNER);
    assert_eq!(
        rows[0].text,
        "TITLE: retry\nLANGUAGE: python\nCODE:\nfor _ in range(3): pass"
    );
    assert_eq!(rows[0].kind(), JournalKind::Snippet);
    assert_eq!(
        rows[0].tags,
        Some(vec![
            "loops".to_string(),
            "snippet".to_string(),
            "python".to_string()
        ])
    );
}

#[test]
fn generators_log_one_entry_each() {
    let (_tmp, store) = test_store();
    let model = generate_django_model(&store, "Post", "title:CharField", "blog post");
    assert_eq!(model["status"], "success");
    assert!(
        model["model_code"]
            .as_str()
            .unwrap()
            .contains("title = models.CharField(max_length=200)")
    );

    let debug = debug_python_code(&store, "x[5]", "IndexError: out of range");
    assert_eq!(debug["suggestions"].as_array().unwrap().len(), 6);

    let tests = generate_test_cases(&store, "add", "adds numbers", 50);
    assert_eq!(tests["test_count"], 10);

    let texts: Vec<String> = list_journals(&store, 10)
        .unwrap()
        .into_iter()
        .map(|e| e.text)
        .collect();
    assert_eq!(
        texts,
        vec![
            "Generated test cases for: add",
            "Debug session: IndexError: out of range",
            "Generated Django model: Post",
        ]
    );
}

#[test]
fn history_only_returns_coding_entries() {
    let (_tmp, store) = test_store();
    save_code_snippet(&store, "a", "1", "rust", "");
    for i in 0..5 {
        append_journal(&store, "learning_coach", &format!("note {i}"), None).unwrap();
    }
    save_code_snippet(&store, "b", "2", "rust", "");

    let out = get_coding_history(&store, 2);
    assert_eq!(out["status"], "success");
    assert_eq!(out["count"], 2);
    let history = out["history"].as_array().unwrap();
    assert!(history[0]["entry"].as_str().unwrap().starts_with("TITLE: b"));
    assert!(history[1]["entry"].as_str().unwrap().starts_with("TITLE: a"));
    assert!(history[0]["tags"].is_array());
}

#[test]
fn history_limit_is_clamped() {
    let (_tmp, store) = test_store();
    for i in 0..3 {
        save_code_snippet(&store, &format!("s{i}"), "x", "python", "");
    }
    assert_eq!(get_coding_history(&store, 0)["count"], 1);
    assert_eq!(get_coding_history(&store, -3)["count"], 1);
    assert_eq!(get_coding_history(&store, 500)["count"], 3);
}
