//! World module - owns the board and runs the cascade
//!
//! The world is driven from outside: player calls ([`World::try_switch_cells`],
//! [`World::set_active_cell`]) start animations, and [`World::tick`] advances
//! them. When an animation finishes its [`Continuation`] decides the next step:
//!
//! ```text
//! swap ─► ResolveMatches ─► destroy ─► Gravity ─► fall ─► ResolveMatches ─► ...
//!                │
//!                └─ no match ─► idle (CascadeSettled)
//! ```
//!
//! At most one animation is live; starting another one while it runs is a bug
//! in the caller and panics.

use std::f64::consts::PI;

use tracing::{debug, info, warn};

use crate::animation::{
    Animation, AnimationPayload, Continuation, DestroyRecord, Easing, MoveRecord, Step,
};
use crate::board::Board;
use crate::error::ConfigError;
use crate::events::{EventHandle, EventRegistry};
use crate::matcher::{find_matches, DestructionResult};
use crate::ports::{AudioSink, Canvas};
use crate::rng::SimpleRng;
use crate::scoring::GameMode;
use crate::snapshot::{AnimationSnapshot, SelectionSnapshot, WorldSnapshot};
use crate::types::{
    CellState, GameModeKind, Rect, SoundEffect, TileKind, Vec2, DEFAULT_COLS, DEFAULT_ROWS,
    DEFAULT_TILE_KINDS, DESTROY_ANIMATION_MS, FALL_ANIMATION_MS, MAX_BOARD_SIDE, MIN_BOARD_SIDE, MIN_TILE_KINDS,
    SELECTION_PULSE_PERIOD_MS, SWAP_ANIMATION_MS, TILE_SIZE,
};

/// Cascade length that gets logged as suspicious; the cascade still runs
const LONG_CASCADE_PASSES: u32 = 32;

/// Side panel layout (pixels)
const PANEL_SPACING: i32 = 50;
const PANEL_TEXT_WIDTH: i32 = 240;
const PANEL_TEXT_HEIGHT: i32 = 40;

/// Runtime configuration for a [`World`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldConfig {
    pub cols: u16,
    pub rows: u16,
    pub tile_kinds: TileKind,
    pub tile_size: i32,
    pub seed: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            tile_kinds: DEFAULT_TILE_KINDS,
            tile_size: TILE_SIZE,
            seed: 1,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols < MIN_BOARD_SIDE || self.rows < MIN_BOARD_SIDE {
            return Err(ConfigError::BoardTooSmall {
                cols: self.cols,
                rows: self.rows,
            });
        }
        if self.cols > MAX_BOARD_SIDE || self.rows > MAX_BOARD_SIDE {
            return Err(ConfigError::BoardTooLarge {
                cols: self.cols,
                rows: self.rows,
            });
        }
        if self.tile_kinds < MIN_TILE_KINDS {
            return Err(ConfigError::TooFewTileKinds(self.tile_kinds));
        }
        if self.tile_size <= 0 {
            return Err(ConfigError::InvalidTileSize(self.tile_size));
        }
        Ok(())
    }

    /// Per-axis drag distance that attempts a swap: 80% of a tile
    pub fn drag_swap_threshold(&self) -> i32 {
        self.tile_size * 4 / 5
    }
}

/// Cell the player has selected or is dragging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSelection {
    pub index: Vec2,
    pub offset: Vec2,
    /// Drives the selection pulse
    pub elapsed_ms: u64,
}

/// Result of [`World::try_switch_cells`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Off-board, not adjacent, or no match and nothing selected
    Rejected,
    /// No match; the dragged cell at `source` snaps back
    Reverted { source: Vec2 },
    /// The swap produces a match and is animating
    Committed,
}

/// Notifications delivered to [`World::subscribe`] handlers
#[derive(Debug, Clone, PartialEq)]
pub enum WorldEvent {
    SessionStarted(GameModeKind),
    /// One destruction pass; the mode has already been scored
    CellsDestroyed(DestructionResult),
    /// The cascade ran out of matches
    CascadeSettled { passes: u32 },
}

/// Scale factor of the pulsing selected cell: `1 + 0.1 * sin(2πt / period)`
pub fn selection_scale(elapsed_ms: u64) -> f64 {
    let phase = elapsed_ms as f64 / SELECTION_PULSE_PERIOD_MS as f64;
    1.0 + (phase * 2.0 * PI).sin() * 0.1
}

#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    board: Board,
    rng: SimpleRng,
    animation: Option<Animation>,
    selection: Option<ActiveSelection>,
    mode: Option<GameMode>,
    active: bool,
    cascade_passes: u32,
    listeners: EventRegistry<WorldEvent>,
}

impl World {
    /// Validate `config` and fill a board from its seed
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = SimpleRng::new(config.seed);
        let mut board = Board::new(config.cols as usize, config.rows as usize);
        board.fill(&mut rng, config.tile_kinds);

        Ok(Self {
            config,
            board,
            rng,
            animation: None,
            selection: None,
            mode: None,
            active: false,
            cascade_passes: 0,
            listeners: EventRegistry::new(),
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replace the board, keeping the session.
    ///
    /// Clears any animation and selection. The board's dimensions become the
    /// configured ones; every kind must be below the configured tile kinds.
    pub fn load_board(&mut self, board: Board) -> Result<(), ConfigError> {
        let config = WorldConfig {
            cols: u16::try_from(board.cols()).unwrap_or(u16::MAX),
            rows: u16::try_from(board.rows()).unwrap_or(u16::MAX),
            ..self.config
        };
        config.validate()?;

        let kinds = config.tile_kinds;
        let cols = board.cols();
        if let Some((i, cell)) = board.cells().iter().enumerate().find(|(_, c)| c.kind >= kinds) {
            return Err(ConfigError::TileKindOutOfRange {
                index: Vec2::new((i % cols) as i32, (i / cols) as i32),
                kind: cell.kind,
                kinds,
            });
        }

        self.config = config;
        self.board = board;
        self.animation = None;
        self.selection = None;
        self.cascade_passes = 0;
        Ok(())
    }

    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    pub fn selection(&self) -> Option<&ActiveSelection> {
        self.selection.as_ref()
    }

    pub fn mode(&self) -> Option<&GameMode> {
        self.mode.as_ref()
    }

    /// End the session, handing its mode back
    pub fn take_mode(&mut self) -> Option<GameMode> {
        self.active = false;
        self.mode.take()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start a fresh session: new board, no animation, no selection
    pub fn activate(&mut self, mode: GameMode) {
        let kind = mode.kind();

        self.mode = Some(mode);
        self.active = true;
        self.animation = None;
        self.selection = None;
        self.cascade_passes = 0;
        self.board.fill(&mut self.rng, self.config.tile_kinds);

        info!(mode = kind.as_str(), "session started");
        self.listeners.invoke(&WorldEvent::SessionStarted(kind));
    }

    /// Continue a paused session. Returns false when there is none.
    pub fn resume(&mut self) -> bool {
        if self.mode.is_some() {
            self.active = true;
        }
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn is_interaction_enabled(&self) -> bool {
        self.active && self.animation.is_none()
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&WorldEvent) + 'static) -> EventHandle {
        self.listeners.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, handle: EventHandle) -> bool {
        self.listeners.unsubscribe(handle)
    }

    /// Board index under a board-relative pixel position
    pub fn tile_at_point(&self, pixel: Vec2) -> Option<Vec2> {
        let index = pixel / self.config.tile_size;
        self.board.contains(index).then_some(index)
    }

    fn slot_px(&self, index: Vec2) -> Vec2 {
        index * self.config.tile_size
    }

    /// Advance the session clock and the live animation by `dt_ms`.
    ///
    /// At most one animation completes per tick. An animation started by a
    /// continuation first advances on the next tick.
    pub fn tick(&mut self, dt_ms: u64, audio: &mut dyn AudioSink) {
        if !self.active {
            return;
        }

        if let Some(mode) = self.mode.as_mut() {
            mode.tick(dt_ms);
        }

        if let Some(animation) = self.animation.as_mut() {
            match animation.advance(dt_ms) {
                Step::Running => {}
                Step::EffectFired(effect) => audio.play_sound_effect(effect),
                Step::Finished => self.finish_animation(),
            }
        }

        if let Some(selection) = self.selection.as_mut() {
            selection.elapsed_ms += dt_ms;
        }
    }

    fn finish_animation(&mut self) {
        let Some(animation) = self.animation.take() else {
            return;
        };

        self.board
            .transition_all(CellState::WaitingForAnimation, animation.final_state());

        match animation.completion() {
            Continuation::Idle => {}
            Continuation::ResolveMatches => self.resolve_matches(),
            Continuation::Gravity => self.apply_gravity(),
        }
    }

    /// Try to swap two adjacent cells.
    ///
    /// The swap is only kept if it creates a match. `dragged` means `a` is the
    /// selected cell and starts from its current drag position.
    pub fn try_switch_cells(&mut self, a: Vec2, b: Vec2, dragged: bool) -> SwitchOutcome {
        if !self.board.contains(a) || !self.board.contains(b) || a.distance_squared(b) != 1 {
            return SwitchOutcome::Rejected;
        }

        self.board.swap(a, b);
        let result = find_matches(&self.board);
        self.board.swap(a, b);

        if !result.is_empty() {
            let drag_start = self
                .selection
                .filter(|_| dragged)
                .map(|s| self.slot_px(s.index) + s.offset);

            let records = vec![
                MoveRecord {
                    target: b,
                    start_px: drag_start.unwrap_or_else(|| self.slot_px(a)),
                    end_px: self.slot_px(b),
                    kind: self.board.kind(a),
                },
                MoveRecord {
                    target: a,
                    start_px: self.slot_px(b),
                    end_px: self.slot_px(a),
                    kind: self.board.kind(b),
                },
            ];

            debug!(?a, ?b, matched = result.len(), "swap committed");
            self.cascade_passes = 0;
            self.start_move(
                records,
                SWAP_ANIMATION_MS,
                Easing::EaseInCubic,
                Continuation::ResolveMatches,
            );
            return SwitchOutcome::Committed;
        }

        match self.selection {
            Some(selection) => {
                self.snap_back(selection);
                SwitchOutcome::Reverted {
                    source: selection.index,
                }
            }
            None => SwitchOutcome::Rejected,
        }
    }

    /// Select, drag, or release a cell.
    ///
    /// With `Some(index)` the cell becomes the selection at drag `offset`.
    /// Once either axis of the offset passes the drag threshold a swap toward
    /// that direction is attempted; the returned index then marks the drag as
    /// complete and the caller should release the selection.
    ///
    /// With `None` the selection is released; a non-zero `offset` animates
    /// the cell back into its slot.
    pub fn set_active_cell(&mut self, index: Option<Vec2>, offset: Vec2) -> Option<Vec2> {
        let Some(index) = index else {
            self.release_selection(offset);
            return None;
        };
        if !self.board.contains(index) {
            return None;
        }

        let threshold = self.config.drag_swap_threshold();
        if offset.x.abs() > threshold {
            return self.drag_toward(index, index + Vec2::new(offset.x.signum(), 0));
        }
        if offset.y.abs() > threshold {
            return self.drag_toward(index, index + Vec2::new(0, offset.y.signum()));
        }

        if let Some(selection) = self.selection.as_mut().filter(|s| s.index == index) {
            selection.offset = offset;
            return None;
        }

        if let Some(previous) = self.selection.take() {
            let cell = self.board.at_mut(previous.index);
            if cell.state == CellState::Active {
                cell.state = CellState::Normal;
            }
        }
        self.selection = Some(ActiveSelection {
            index,
            offset,
            elapsed_ms: 0,
        });
        self.board.at_mut(index).state = CellState::Active;
        None
    }

    fn drag_toward(&mut self, index: Vec2, neighbour: Vec2) -> Option<Vec2> {
        if !self.board.contains(neighbour) {
            return None;
        }
        match self.try_switch_cells(index, neighbour, true) {
            SwitchOutcome::Committed => Some(index),
            SwitchOutcome::Reverted { source } => Some(source),
            SwitchOutcome::Rejected => None,
        }
    }

    fn release_selection(&mut self, offset: Vec2) {
        let Some(selection) = self.selection.take() else {
            return;
        };

        let cell = self.board.at_mut(selection.index);
        if cell.state != CellState::Active {
            return;
        }
        cell.state = CellState::Normal;

        if offset != Vec2::ZERO && self.animation.is_none() {
            self.snap_back(selection);
        }
    }

    fn snap_back(&mut self, selection: ActiveSelection) {
        let record = MoveRecord {
            target: selection.index,
            start_px: self.slot_px(selection.index) + selection.offset,
            end_px: self.slot_px(selection.index),
            kind: self.board.kind(selection.index),
        };
        self.start_move(
            vec![record],
            SWAP_ANIMATION_MS,
            Easing::EaseInCubic,
            Continuation::Idle,
        );
    }

    /// Start a move animation; each target cell takes the record's kind now
    /// and is hidden until the animation ends.
    fn start_move(
        &mut self,
        records: Vec<MoveRecord>,
        duration_ms: u32,
        easing: Easing,
        completion: Continuation,
    ) {
        assert!(
            self.animation.is_none(),
            "an animation is already in flight"
        );

        for record in &records {
            let cell = self.board.at_mut(record.target);
            cell.kind = record.kind;
            cell.state = CellState::WaitingForAnimation;
        }

        self.animation = Some(Animation::moving(records, duration_ms, easing, completion));
    }

    fn resolve_matches(&mut self) {
        let result = find_matches(&self.board);

        if result.is_empty() {
            debug!(passes = self.cascade_passes, "cascade settled");
            let passes = std::mem::take(&mut self.cascade_passes);
            self.listeners.invoke(&WorldEvent::CascadeSettled { passes });
            return;
        }

        self.cascade_passes += 1;
        if self.cascade_passes == LONG_CASCADE_PASSES {
            warn!(
                passes = self.cascade_passes,
                kinds = self.config.tile_kinds,
                "cascade is unusually long"
            );
        }
        debug!(
            pass = self.cascade_passes,
            cells = result.len(),
            row_streak = result.max_row_streak,
            col_streak = result.max_col_streak,
            "destroying matches"
        );

        let records: Vec<DestroyRecord> = result
            .cells
            .iter()
            .map(|&index| DestroyRecord {
                index,
                kind: self.board.kind(index),
            })
            .collect();
        for &index in &result.cells {
            self.board.at_mut(index).destroy();
        }

        if let Some(mode) = self.mode.as_mut() {
            mode.update_score(&result);
        }
        self.listeners.invoke(&WorldEvent::CellsDestroyed(result));

        assert!(
            self.animation.is_none(),
            "an animation is already in flight"
        );
        self.animation = Some(Animation::destroying(
            records,
            DESTROY_ANIMATION_MS,
            SoundEffect::TileDisappear,
            Continuation::Gravity,
        ));
    }

    fn apply_gravity(&mut self) {
        let kinds = self.config.tile_kinds;
        let rng = &mut self.rng;
        let falls = self.board.gravity_plan(|| rng.next_kind(kinds));

        debug!(falls = falls.len(), "cells falling");

        let tile = self.config.tile_size;
        let records = falls
            .into_iter()
            .map(|fall| MoveRecord {
                target: fall.to,
                start_px: fall.from * tile,
                end_px: fall.to * tile,
                kind: fall.kind,
            })
            .collect();

        self.start_move(
            records,
            FALL_ANIMATION_MS,
            Easing::EaseOutBounce,
            Continuation::ResolveMatches,
        );
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            cols: self.board.cols(),
            rows: self.board.rows(),
            tile_size: self.config.tile_size,
            cells: self.board.cells().to_vec(),
            selection: self.selection.map(|s| SelectionSnapshot {
                index: s.index,
                offset: s.offset,
                elapsed_ms: s.elapsed_ms,
            }),
            animation: self.animation.as_ref().map(|a| AnimationSnapshot {
                payload: a.payload().clone(),
                progress: a.progress(),
                easing: a.easing(),
                elapsed_ms: a.elapsed_ms(),
                duration_ms: a.duration_ms(),
            }),
            active: self.active,
            interaction_enabled: self.is_interaction_enabled(),
            mode: self.mode.as_ref().map(GameMode::kind),
            ui_text: self.mode.as_ref().map(GameMode::ui_text).unwrap_or_default(),
        }
    }

    /// Draw settled cells, the pulsing selection, the live animation, then
    /// the mode's text panel to the right of the board.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let tile = self.config.tile_size;

        for at in self.board.coords() {
            let cell = self.board.at(at);
            if cell.state == CellState::Normal {
                canvas.draw_cell(at * tile, cell.kind, tile, tile);
            }
        }

        if let Some(selection) = &self.selection {
            let size = tile as f64 * selection_scale(selection.elapsed_ms);
            let half = ((size - tile as f64) / 2.0) as i32;
            canvas.draw_cell(
                selection.index * tile - Vec2::new(half, half) + selection.offset,
                self.board.kind(selection.index),
                tile,
                size as i32,
            );
        }

        if let Some(animation) = &self.animation {
            let progress = animation.progress();
            match animation.payload() {
                AnimationPayload::Move(records) => {
                    for record in records {
                        canvas.draw_cell(record.position(progress), record.kind, tile, tile);
                    }
                }
                AnimationPayload::Destroy(records) => {
                    let size = (1.0 - progress) * tile as f64;
                    let half = ((tile as f64 - size) / 2.0) as i32;
                    for record in records {
                        let origin = record.index * tile;
                        canvas.draw_cell(origin + Vec2::new(half, half), record.kind, tile, size as i32);
                        canvas.draw_destroy_effect(origin, tile, progress);
                    }
                }
            }
        }

        if let Some(mode) = &self.mode {
            self.draw_panel(canvas, &mode.ui_text());
        }
    }

    fn draw_panel(&self, canvas: &mut dyn Canvas, lines: &[String]) {
        let board_width = self.board.cols() as i32 * self.config.tile_size;
        let mut text_rect = Rect::new(
            board_width + 2 * PANEL_SPACING,
            PANEL_SPACING,
            PANEL_TEXT_WIDTH,
            PANEL_TEXT_HEIGHT,
        );

        canvas.draw_background(Rect::new(
            text_rect.x - PANEL_SPACING,
            text_rect.y - PANEL_SPACING,
            text_rect.w + 2 * PANEL_SPACING,
            (lines.len() as i32 + 2) * PANEL_SPACING,
        ));

        for line in lines {
            canvas.draw_text(line, text_rect, true);
            text_rect.y += PANEL_SPACING;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{NullAudio, RecordingAudio};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// 4x4, kind 0 completes the top row when (2, 1) moves up.
    fn row_setup() -> Board {
        Board::from_kinds(&[[0, 0, 1, 2], [3, 4, 0, 1], [1, 2, 4, 3], [2, 3, 1, 4]])
    }

    fn world_with(board: Board) -> World {
        let mut world = World::new(WorldConfig {
            cols: 4,
            rows: 4,
            ..WorldConfig::default()
        })
        .unwrap();
        world.activate(GameMode::new(GameModeKind::Classic));
        world.load_board(board).unwrap();
        world
    }

    #[test]
    fn test_config_validation() {
        assert!(WorldConfig::default().validate().is_ok());
        assert_eq!(
            WorldConfig { cols: 2, ..WorldConfig::default() }.validate(),
            Err(ConfigError::BoardTooSmall { cols: 2, rows: 8 })
        );
        assert_eq!(
            WorldConfig { tile_kinds: 2, ..WorldConfig::default() }.validate(),
            Err(ConfigError::TooFewTileKinds(2))
        );
        assert_eq!(
            WorldConfig { tile_size: 0, ..WorldConfig::default() }.validate(),
            Err(ConfigError::InvalidTileSize(0))
        );
        assert!(World::new(WorldConfig { rows: 1, ..WorldConfig::default() }).is_err());
        assert_eq!(
            WorldConfig { cols: 20_000, rows: 3, ..WorldConfig::default() }.validate(),
            Err(ConfigError::BoardTooLarge { cols: 20_000, rows: 3 })
        );
        assert_eq!(
            WorldConfig { rows: MAX_BOARD_SIDE + 1, ..WorldConfig::default() }.validate(),
            Err(ConfigError::BoardTooLarge { cols: 8, rows: MAX_BOARD_SIDE + 1 })
        );
        assert!(WorldConfig { cols: MAX_BOARD_SIDE, rows: MAX_BOARD_SIDE, ..WorldConfig::default() }
            .validate()
            .is_ok());
    }

    #[test]
    fn test_long_cascade_keeps_resolving() {
        let mut world = world_with(row_setup());
        world.board.swap(Vec2::new(2, 1), Vec2::new(2, 0));
        world.cascade_passes = LONG_CASCADE_PASSES - 1;

        world.resolve_matches();

        assert_eq!(world.cascade_passes, LONG_CASCADE_PASSES);
        assert!(matches!(
            world.animation().map(|a| a.payload()),
            Some(AnimationPayload::Destroy(records)) if records.len() == 3
        ));
    }

    #[test]
    fn test_load_board_rejects_unknown_kinds() {
        let mut world = World::new(WorldConfig { cols: 3, rows: 3, tile_kinds: 3, ..WorldConfig::default() }).unwrap();
        let before = world.board().clone();

        let err = world
            .load_board(Board::from_kinds(&[[0, 1, 2], [1, 2, 0], [2, 0, 7]]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::TileKindOutOfRange { index: Vec2::new(2, 2), kind: 7, kinds: 3 }
        );
        assert_eq!(world.board(), &before);
        assert!(world.load_board(Board::from_kinds(&[[0, 1, 2], [1, 2, 0], [2, 0, 1]])).is_ok());
    }

    #[test]
    fn test_new_world_has_no_matches() {
        let world = World::new(WorldConfig::default()).unwrap();
        assert!(find_matches(world.board()).is_empty());
        assert!(!world.is_interaction_enabled());
    }

    #[test]
    fn test_rejects_non_adjacent_and_off_board() {
        let mut world = world_with(row_setup());
        let before = world.board().clone();

        assert_eq!(world.try_switch_cells(Vec2::new(0, 0), Vec2::new(1, 1), false), SwitchOutcome::Rejected);
        assert_eq!(world.try_switch_cells(Vec2::new(0, 0), Vec2::new(2, 0), false), SwitchOutcome::Rejected);
        assert_eq!(world.try_switch_cells(Vec2::new(3, 0), Vec2::new(4, 0), false), SwitchOutcome::Rejected);
        assert_eq!(world.try_switch_cells(Vec2::new(0, 0), Vec2::new(0, 0), false), SwitchOutcome::Rejected);
        assert_eq!(world.board(), &before);
        assert!(world.animation().is_none());
    }

    #[test]
    fn test_non_matching_swap_is_rejected_without_selection() {
        let mut world = world_with(row_setup());
        let before = world.board().clone();
        assert_eq!(
            world.try_switch_cells(Vec2::new(0, 0), Vec2::new(0, 1), false),
            SwitchOutcome::Rejected
        );
        assert_eq!(world.board(), &before);
    }

    #[test]
    fn test_committed_swap_writes_targets() {
        let mut world = world_with(row_setup());
        let outcome = world.try_switch_cells(Vec2::new(2, 1), Vec2::new(2, 0), false);
        assert_eq!(outcome, SwitchOutcome::Committed);
        assert!(!world.is_interaction_enabled());

        let top = world.board().at(Vec2::new(2, 0));
        assert_eq!(top.kind, 0);
        assert_eq!(top.state, CellState::WaitingForAnimation);
        assert_eq!(world.board().kind(Vec2::new(2, 1)), 1);

        match world.animation().map(Animation::payload) {
            Some(AnimationPayload::Move(records)) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[0].start_px, Vec2::new(140, 70));
                assert_eq!(records[0].end_px, Vec2::new(140, 0));
            }
            other => panic!("expected a move animation, got {:?}", other),
        }
    }

    #[test]
    #[should_panic(expected = "already in flight")]
    fn test_second_animation_panics() {
        let mut world = world_with(row_setup());
        world.try_switch_cells(Vec2::new(2, 1), Vec2::new(2, 0), false);
        // The pending top-row run still counts, so this swap also commits.
        world.try_switch_cells(Vec2::new(0, 2), Vec2::new(0, 3), false);
    }

    #[test]
    fn test_cascade_scores_and_settles() {
        let mut world = world_with(row_setup());
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        world.subscribe(move |e: &WorldEvent| sink.borrow_mut().push(e.clone()));

        world.try_switch_cells(Vec2::new(2, 1), Vec2::new(2, 0), false);

        let mut audio = RecordingAudio::default();
        for _ in 0..1000 {
            world.tick(16, &mut audio);
            if world.is_interaction_enabled() {
                break;
            }
        }

        assert!(world.is_interaction_enabled());
        assert!(audio.played.len() >= 1);
        assert!(find_matches(world.board()).is_empty());
        assert!(world.board().cells().iter().all(|c| c.state == CellState::Normal));

        let events = events.borrow();
        match &events[0] {
            WorldEvent::CellsDestroyed(result) => {
                assert_eq!(
                    result.cells,
                    vec![Vec2::new(0, 0), Vec2::new(1, 0), Vec2::new(2, 0)]
                );
            }
            other => panic!("unexpected first event {:?}", other),
        }
        let destroyed = events
            .iter()
            .filter(|e| matches!(e, WorldEvent::CellsDestroyed(_)))
            .count() as u32;
        assert_eq!(events.last(), Some(&WorldEvent::CascadeSettled { passes: destroyed }));
        assert_eq!(audio.played.len() as u32, destroyed);
    }

    #[test]
    fn test_chained_animation_waits_for_next_tick() {
        let mut world = world_with(row_setup());
        world.try_switch_cells(Vec2::new(2, 1), Vec2::new(2, 0), false);

        // One long tick finishes the swap and starts the destruction.
        world.tick(300, &mut NullAudio);
        let anim = world.animation().unwrap();
        assert!(matches!(anim.payload(), AnimationPayload::Destroy(_)));
        assert_eq!(anim.elapsed_ms(), 0);
        assert!(anim.has_pending_effect());

        let mut audio = RecordingAudio::default();
        world.tick(16, &mut audio);
        assert_eq!(audio.played, vec![SoundEffect::TileDisappear]);
        world.tick(16, &mut audio);
        assert_eq!(audio.played.len(), 1);
    }

    #[test]
    fn test_destroy_completion_starts_fall() {
        let mut world = world_with(row_setup());
        world.try_switch_cells(Vec2::new(2, 1), Vec2::new(2, 0), false);
        world.tick(300, &mut NullAudio); // swap done
        world.tick(16, &mut NullAudio); // effect
        world.tick(500, &mut NullAudio); // destroy done, gravity planned

        match world.animation().map(Animation::payload) {
            Some(AnimationPayload::Move(records)) => {
                // Only the three cleared top-row slots are refilled from above.
                assert_eq!(records.len(), 3);
                assert!(records.iter().all(|r| r.start_px.y == -70 && r.end_px.y == 0));
            }
            other => panic!("expected a fall, got {:?}", other),
        }
        assert_eq!(world.animation().unwrap().easing(), Easing::EaseOutBounce);
    }

    #[test]
    fn test_classic_score_after_first_pass() {
        let mut world = world_with(row_setup());
        world.try_switch_cells(Vec2::new(2, 1), Vec2::new(2, 0), false);
        world.tick(300, &mut NullAudio);
        match world.mode() {
            Some(GameMode::Classic(mode)) => assert_eq!(mode.score(), 60),
            other => panic!("unexpected mode {:?}", other),
        }
    }

    #[test]
    fn test_selection_and_release_without_offset() {
        let mut world = world_with(row_setup());
        assert_eq!(world.set_active_cell(Some(Vec2::new(1, 1)), Vec2::ZERO), None);
        assert_eq!(world.board().at(Vec2::new(1, 1)).state, CellState::Active);

        world.set_active_cell(Some(Vec2::new(2, 2)), Vec2::ZERO);
        assert_eq!(world.board().at(Vec2::new(1, 1)).state, CellState::Normal);
        assert_eq!(world.selection().map(|s| s.index), Some(Vec2::new(2, 2)));

        world.set_active_cell(None, Vec2::ZERO);
        assert!(world.selection().is_none());
        assert!(world.animation().is_none());
        assert_eq!(world.board().at(Vec2::new(2, 2)).state, CellState::Normal);
    }

    #[test]
    fn test_release_with_offset_snaps_back() {
        let mut world = world_with(row_setup());
        world.set_active_cell(Some(Vec2::new(1, 1)), Vec2::ZERO);
        world.set_active_cell(Some(Vec2::new(1, 1)), Vec2::new(20, 0));
        world.set_active_cell(None, Vec2::new(20, 0));

        match world.animation().map(Animation::payload) {
            Some(AnimationPayload::Move(records)) => {
                assert_eq!(records[0].start_px, Vec2::new(90, 70));
                assert_eq!(records[0].end_px, Vec2::new(70, 70));
            }
            other => panic!("expected snap back, got {:?}", other),
        }
        world.tick(250, &mut NullAudio);
        world.tick(16, &mut NullAudio);
        assert!(world.is_interaction_enabled());
        assert_eq!(world.board().at(Vec2::new(1, 1)).state, CellState::Normal);
    }

    #[test]
    fn test_drag_past_threshold_commits_swap() {
        let mut world = world_with(row_setup());
        let source = Vec2::new(2, 1);
        world.set_active_cell(Some(source), Vec2::ZERO);
        world.set_active_cell(Some(source), Vec2::new(0, -30));

        assert_eq!(world.set_active_cell(Some(source), Vec2::new(0, -57)), Some(source));
        match world.animation().map(Animation::payload) {
            Some(AnimationPayload::Move(records)) => {
                assert_eq!(records[0].start_px, Vec2::new(140, 40));
            }
            other => panic!("expected swap, got {:?}", other),
        }

        // Releasing after completion leaves the swapped cells alone.
        world.set_active_cell(None, Vec2::new(0, -57));
        assert!(world.selection().is_none());
        assert_eq!(world.board().kind(Vec2::new(2, 0)), 0);
    }

    #[test]
    fn test_drag_without_match_reverts() {
        let mut world = world_with(row_setup());
        let source = Vec2::new(0, 1);
        world.set_active_cell(Some(source), Vec2::new(0, 10));
        let done = world.set_active_cell(Some(source), Vec2::new(0, 60));
        assert_eq!(done, Some(source));
        assert_eq!(world.board().kind(source), 3);
        assert!(world.animation().is_some());
    }

    #[test]
    fn test_drag_off_board_does_nothing() {
        let mut world = world_with(row_setup());
        let source = Vec2::new(0, 0);
        world.set_active_cell(Some(source), Vec2::ZERO);
        assert_eq!(world.set_active_cell(Some(source), Vec2::new(-60, 0)), None);
        assert!(world.animation().is_none());
    }

    #[test]
    fn test_tile_at_point() {
        let world = world_with(row_setup());
        assert_eq!(world.tile_at_point(Vec2::new(0, 0)), Some(Vec2::new(0, 0)));
        assert_eq!(world.tile_at_point(Vec2::new(139, 210)), Some(Vec2::new(1, 3)));
        assert_eq!(world.tile_at_point(Vec2::new(280, 0)), None);
        assert_eq!(world.tile_at_point(Vec2::new(-1, 0)), None);
    }

    #[test]
    fn test_inactive_world_does_not_tick() {
        let mut world = world_with(row_setup());
        world.try_switch_cells(Vec2::new(2, 1), Vec2::new(2, 0), false);
        world.deactivate();
        world.tick(1000, &mut NullAudio);
        assert_eq!(world.animation().unwrap().elapsed_ms(), 0);
        assert_eq!(world.mode().unwrap().elapsed_ms(), 0);

        assert!(world.resume());
        world.tick(16, &mut NullAudio);
        assert_eq!(world.mode().unwrap().elapsed_ms(), 16);
    }

    #[test]
    fn test_take_mode_ends_session() {
        let mut world = world_with(row_setup());
        assert_eq!(world.take_mode().map(|m| m.kind()), Some(GameModeKind::Classic));
        assert!(!world.is_active());
        assert!(!world.resume());
    }

    #[test]
    fn test_selection_scale_pulses() {
        assert!((selection_scale(0) - 1.0).abs() < 1e-9);
        assert!((selection_scale(250) - 1.1).abs() < 1e-9);
        assert!((selection_scale(750) - 0.9).abs() < 1e-9);
    }
}
