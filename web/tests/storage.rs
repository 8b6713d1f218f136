#![cfg(target_arch = "wasm32")]

use gloo::storage::{LocalStorage, Storage};
use minigames_core::{GameKind, LeaderboardStore, Nickname, ScoreEntry};
use minigames_web::BrowserStorage;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn corrupt_board_reads_empty() {
    let config = GameKind::Rocket.leaderboard();
    LocalStorage::raw().set_item(config.key, "{not json").unwrap();

    let store = LeaderboardStore::new(BrowserStorage);
    assert!(store.read(&config).is_empty());
}

#[wasm_bindgen_test]
fn submit_persists_to_local_storage() {
    let config = GameKind::Clicker.leaderboard();
    LocalStorage::delete(config.key);

    let mut store = LeaderboardStore::new(BrowserStorage);
    let ann = Nickname::parse("Ann").unwrap();
    let bob = Nickname::parse("Bob").unwrap();
    store.submit(&config, ScoreEntry::new(&ann, 7));
    let submission = store.submit(&config, ScoreEntry::new(&bob, 12));
    assert_eq!(submission.rank, Some(1));

    let raw = LocalStorage::raw().get_item(config.key).unwrap().unwrap();
    assert_eq!(raw, r#"[{"name":"Bob","score":12},{"name":"Ann","score":7}]"#);

    let reopened = LeaderboardStore::new(BrowserStorage);
    let names: Vec<_> = reopened.read(&config).entries().iter().map(|e| e.name().to_string()).collect();
    assert_eq!(names, ["Bob", "Ann"]);
}
