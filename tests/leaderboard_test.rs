//! Leaderboard ranking and persistence

use std::fs;

use match3::core::Leaderboard;
use match3::highscores;
use match3::types::{GameModeKind, LEADERBOARD_SIZE};

#[test]
fn classic_keeps_fastest_times_first() {
    let mut board = Leaderboard::new();
    for value in [40_000, 25_000, 90_000, 31_000, 60_000] {
        board.add_score(GameModeKind::Classic, value);
    }
    assert_eq!(
        board.scores(GameModeKind::Classic),
        &[25_000, 31_000, 40_000, 60_000, 90_000]
    );

    // Better than the worst entry: ranked, worst dropped.
    assert_eq!(board.add_score(GameModeKind::Classic, 30_000), Some(1));
    assert_eq!(board.scores(GameModeKind::Classic).len(), LEADERBOARD_SIZE);
    assert_eq!(board.scores(GameModeKind::Classic)[4], 60_000);

    // Worse than every entry of a full board: not ranked.
    assert_eq!(board.add_score(GameModeKind::Classic, 95_000), None);
    assert!(board.scores(GameModeKind::QuickDeath).is_empty());
}

#[test]
fn quick_death_keeps_longest_survival_first() {
    let mut board = Leaderboard::new();
    assert_eq!(board.add_score(GameModeKind::QuickDeath, 15_000), Some(0));
    assert_eq!(board.add_score(GameModeKind::QuickDeath, 42_000), Some(0));
    assert_eq!(board.add_score(GameModeKind::QuickDeath, 20_000), Some(1));
    assert_eq!(board.scores(GameModeKind::QuickDeath), &[42_000, 20_000, 15_000]);
}

#[test]
fn loading_sorts_and_truncates_hand_edited_files() {
    let path = std::env::temp_dir().join(format!("match3-lb-{}.json", std::process::id()));
    fs::write(
        &path,
        r#"{"classic":[9,3,7,1,5,2],"quickDeath":[1,3]}"#,
    )
    .unwrap();

    let board = highscores::load(&path);
    let _ = fs::remove_file(&path);

    assert_eq!(board.scores(GameModeKind::Classic), &[1, 2, 3, 5, 7]);
    assert_eq!(board.scores(GameModeKind::QuickDeath), &[3, 1]);
}

#[test]
fn missing_mode_defaults_to_empty() {
    let board: Leaderboard = serde_json::from_str(r#"{"classic":[12]}"#).unwrap();
    assert_eq!(board.scores(GameModeKind::Classic), &[12]);
    assert!(board.scores(GameModeKind::QuickDeath).is_empty());
}
