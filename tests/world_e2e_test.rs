//! End-to-end cascade on a full-size board

use std::cell::RefCell;
use std::rc::Rc;

use match3::core::{
    find_matches, AnimationPayload, Board, GameMode, NullAudio, RecordingAudio, SwitchOutcome,
    World, WorldConfig, WorldEvent,
};
use match3::types::{CellState, GameModeKind, SoundEffect, Vec2, TILE_SIZE};

/// 8x8, kinds `(x + 2y) % 5` with two tweaks: kind 0 at (1, 0) and (2, 1),
/// so moving (2, 1) up completes a row of three at the top left.
fn scripted_board() -> Board {
    let mut rows: Vec<Vec<u8>> = (0..8)
        .map(|y| (0..8).map(|x| ((x + 2 * y) % 5) as u8).collect())
        .collect();
    rows[0][1] = 0;
    rows[1][2] = 0;
    Board::from_kinds(&rows)
}

fn classic_world(board: Board) -> World {
    let mut world = World::new(WorldConfig {
        seed: 2024,
        ..WorldConfig::default()
    })
    .unwrap();
    world.activate(GameMode::new(GameModeKind::Classic));
    world.load_board(board).unwrap();
    world
}

fn classic_score(world: &World) -> u32 {
    match world.mode() {
        Some(GameMode::Classic(mode)) => mode.score(),
        other => panic!("expected a classic session, got {other:?}"),
    }
}

fn settle(world: &mut World) {
    for _ in 0..1_000 {
        if world.is_interaction_enabled() {
            return;
        }
        world.tick(16, &mut NullAudio);
    }
    panic!("cascade did not settle");
}

#[test]
fn scripted_board_starts_without_matches() {
    assert!(find_matches(&scripted_board()).is_empty());
}

#[test]
fn swap_into_row_of_three_scores_and_refills() {
    let mut world = classic_world(scripted_board());
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    world.subscribe(move |event: &WorldEvent| sink.borrow_mut().push(event.clone()));

    let outcome = world.try_switch_cells(Vec2::new(2, 1), Vec2::new(2, 0), false);
    assert_eq!(outcome, SwitchOutcome::Committed);
    assert!(!world.is_interaction_enabled());

    // Swap finishes; the row is detected and scored straight away.
    let mut audio = RecordingAudio::default();
    world.tick(201, &mut audio);
    assert_eq!(classic_score(&world), 60);
    let row = [Vec2::new(0, 0), Vec2::new(1, 0), Vec2::new(2, 0)];
    for at in row {
        assert_eq!(world.board().at(at).state, CellState::Destroyed);
    }
    match events.borrow().first() {
        Some(WorldEvent::CellsDestroyed(result)) => {
            assert_eq!(result.cells, row.to_vec());
            assert_eq!(result.max_row_streak, 3);
        }
        other => panic!("unexpected first event {other:?}"),
    }

    // The effect plays on the destroy animation's first tick, once.
    assert!(audio.played.is_empty());
    world.tick(1, &mut audio);
    assert_eq!(audio.played, vec![SoundEffect::TileDisappear]);
    world.tick(200, &mut audio);
    assert_eq!(audio.played.len(), 1);

    // Destruction ends; three new cells fall into the top row.
    world.tick(200, &mut audio);
    let Some(animation) = world.animation() else {
        panic!("fall animation expected");
    };
    let AnimationPayload::Move(records) = animation.payload() else {
        panic!("fall animation expected");
    };
    let mut targets: Vec<_> = records.iter().map(|r| r.target).collect();
    targets.sort();
    assert_eq!(targets, row.to_vec());
    assert!(records.iter().all(|r| r.start_px.y == -TILE_SIZE));
    assert_eq!(animation.elapsed_ms(), 0);

    settle(&mut world);
    assert!(world.board().cells().iter().all(|c| c.state == CellState::Normal));
    assert!(find_matches(world.board()).is_empty());
    assert!(classic_score(&world) >= 60);
    assert!(matches!(
        events.borrow().last(),
        Some(WorldEvent::CascadeSettled { passes }) if *passes >= 1
    ));
}

#[test]
fn random_play_always_settles() {
    let mut world = World::new(WorldConfig {
        seed: 99,
        ..WorldConfig::default()
    })
    .unwrap();
    world.activate(GameMode::new(GameModeKind::QuickDeath));

    for y in 0..8 {
        for x in 0..7 {
            let outcome = world.try_switch_cells(Vec2::new(x, y), Vec2::new(x + 1, y), false);
            if outcome == SwitchOutcome::Committed {
                settle(&mut world);
                assert!(find_matches(world.board()).is_empty());
            } else {
                assert_eq!(outcome, SwitchOutcome::Rejected);
            }
        }
    }
    assert!(world.is_interaction_enabled());
}

#[test]
fn snapshot_tracks_the_cascade() {
    let mut world = classic_world(scripted_board());
    world.try_switch_cells(Vec2::new(2, 1), Vec2::new(2, 0), false);

    let snap = world.snapshot();
    assert!(!snap.interaction_enabled);
    assert_eq!(snap.cells.len(), 64);
    assert!(snap.animation.is_some());
    assert_eq!(snap.mode, Some(GameModeKind::Classic));
    assert_eq!(snap.ui_text[1], "0");

    // Halfway through the 200 ms swap: ease-in cubic gives 0.5^3.
    world.tick(100, &mut NullAudio);
    let anim = world.snapshot().animation.expect("swap still running");
    assert_eq!(anim.elapsed_ms, 100);
    assert!((anim.progress - 0.125).abs() < 1e-9, "progress {}", anim.progress);
    match &anim.payload {
        AnimationPayload::Move(records) => {
            let up = records
                .iter()
                .find(|r| r.target == Vec2::new(2, 0))
                .expect("record for the cell moving up");
            assert_eq!(up.start_px, Vec2::new(2 * TILE_SIZE, TILE_SIZE));
            assert_eq!(up.end_px, Vec2::new(2 * TILE_SIZE, 0));
            let y = up.position(anim.progress).y;
            assert!(y < TILE_SIZE && y > 0, "mid-swap y {y}");
        }
        other => panic!("expected a swap, got {other:?}"),
    }

    world.tick(101, &mut NullAudio);
    let snap = world.snapshot();
    assert_eq!(snap.ui_text[1], "60");
    // Destroyed and animating cells are not part of the settled view.
    assert_eq!(snap.settled_cells().count(), 61);
}
