//! Terminal application state: menu, running session and audio.
//!
//! `App` owns the world and everything around it. The binary only feeds it
//! crossterm events and elapsed time and flushes what it renders.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tracing::{info, warn};

use crate::core::{
    ConfigError, GameMode, Leaderboard, MusicScheduler, SimpleRng, World, WorldConfig,
    WorldEvent,
};
use crate::highscores;
use crate::input::{
    handle_key_event, handle_mouse_event, should_quit, BoardMapping, Command, Player,
    PointerEvent, PointerTracker,
};
use crate::term::{
    BoardLayout, FrameBuffer, GameStatus, GameView, Menu, MenuItem, MenuStatus, MenuView,
    SilentMusic, TerminalBell, Viewport, TRACKS,
};
use crate::types::{GameModeKind, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
}

/// Startup options, filled from the command line
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub world: WorldConfig,
    /// Start this mode right away instead of showing the menu
    pub start_mode: Option<GameModeKind>,
    /// Quit once the first game ends
    pub exit_after_game: bool,
    pub scores_path: Option<PathBuf>,
    pub music: bool,
    pub bell: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            start_mode: None,
            exit_after_game: false,
            scores_path: None,
            music: true,
            bell: true,
        }
    }
}

/// Cascade statistics for the running session, fed by world events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub cells_destroyed: usize,
    pub cascades: u32,
    pub longest_cascade: u32,
}

impl SessionStats {
    fn record(&mut self, event: &WorldEvent) {
        match event {
            WorldEvent::SessionStarted(_) => *self = SessionStats::default(),
            WorldEvent::CellsDestroyed(result) => self.cells_destroyed += result.len(),
            WorldEvent::CascadeSettled { passes } if *passes > 0 => {
                self.cascades += 1;
                self.longest_cascade = self.longest_cascade.max(*passes);
            }
            WorldEvent::CascadeSettled { .. } => {}
        }
    }
}

pub struct App {
    world: World,
    player: Player,
    pointer: PointerTracker,
    screen: Screen,
    menu: Menu,
    cursor: Vec2,
    leaderboard: Leaderboard,
    scores_path: Option<PathBuf>,
    exit_after_game: bool,
    stats: Rc<RefCell<SessionStats>>,
    music: MusicScheduler,
    music_player: SilentMusic,
    music_rng: SimpleRng,
    bell: TerminalBell,
    /// Last rendered geometry, for mouse hit tests
    viewport: Viewport,
    layout: Option<BoardLayout>,
    quit: bool,
}

impl App {
    pub fn new(options: AppOptions) -> Result<Self, ConfigError> {
        let mut world = World::new(options.world)?;

        let stats = Rc::new(RefCell::new(SessionStats::default()));
        let sink = Rc::clone(&stats);
        world.subscribe(move |event| sink.borrow_mut().record(event));

        let leaderboard = options
            .scores_path
            .as_deref()
            .map(highscores::load)
            .unwrap_or_default();

        let mut music = MusicScheduler::new(TRACKS.len());
        let mut music_player = SilentMusic::new();
        if !options.music {
            music.toggle(&mut music_player);
        }

        let mut app = Self {
            world,
            player: Player::new(),
            pointer: PointerTracker::new(),
            screen: Screen::Menu,
            menu: Menu::new(),
            cursor: Vec2::ZERO,
            leaderboard,
            scores_path: options.scores_path,
            exit_after_game: options.exit_after_game,
            stats,
            music,
            music_player,
            music_rng: SimpleRng::new(options.world.seed.wrapping_add(1)),
            bell: TerminalBell::new(!options.bell),
            viewport: Viewport::new(80, 24),
            layout: None,
            quit: false,
        };
        if let Some(kind) = options.start_mode {
            app.start_game(kind);
        }
        Ok(app)
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for scripted setups
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn stats(&self) -> SessionStats {
        *self.stats.borrow()
    }

    pub fn music_enabled(&self) -> bool {
        self.music.is_enabled()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Bell rings requested since the last call
    pub fn take_bell(&mut self) -> u32 {
        self.bell.take_pending()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if should_quit(key) {
            self.quit = true;
            return;
        }
        let Some(command) = handle_key_event(key) else {
            return;
        };

        if command == Command::ToggleMusic {
            let on = self.music.toggle(&mut self.music_player);
            info!(on, "music toggled");
            return;
        }

        match self.screen {
            Screen::Menu => self.menu_command(command),
            Screen::Playing => self.board_command(command),
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        match self.screen {
            Screen::Menu => {
                if event.kind != MouseEventKind::Down(MouseButton::Left) {
                    return;
                }
                let hit = MenuView.item_at(&self.menu, self.viewport, event.column, event.row);
                if let Some(index) = hit {
                    self.menu.set_cursor(index);
                    self.activate_item(self.menu.selected());
                }
            }
            Screen::Playing => {
                let Some(layout) = self.layout else {
                    return;
                };
                let mapping = BoardMapping::new(
                    layout.origin.0,
                    layout.origin.1,
                    self.world.config().tile_size,
                );
                let Some(input) = handle_mouse_event(event, &mapping) else {
                    return;
                };
                if let Some(pointer_event) = self.pointer.handle(input) {
                    if let Some(index) = self.world.tile_at_point(pointer_event.position()) {
                        self.cursor = index;
                    }
                    self.player.handle(pointer_event, &mut self.world);
                }
            }
        }
    }

    /// Advance the session and the music by `dt_ms`.
    pub fn tick(&mut self, dt_ms: u64) {
        if self.screen == Screen::Playing {
            self.world.tick(dt_ms, &mut self.bell);
            if self.world.mode().is_some_and(GameMode::is_complete) {
                self.finish_game();
            }
        }

        self.music_player.advance(dt_ms);
        self.music.update(&mut self.music_player, &mut self.music_rng);
    }

    pub fn render_into(&mut self, viewport: Viewport, fb: &mut FrameBuffer) {
        self.viewport = viewport;
        let music_on = self.music.is_enabled();
        let now_playing = self.music_player.now_playing();

        match self.screen {
            Screen::Menu => {
                self.layout = None;
                let status = MenuStatus {
                    music_on,
                    now_playing,
                };
                MenuView.render_into(&self.menu, &self.leaderboard, status, viewport, fb);
            }
            Screen::Playing => {
                let status = GameStatus {
                    cursor: Some(self.cursor),
                    music_on,
                    now_playing,
                };
                self.layout = Some(GameView.render_into(&self.world, status, viewport, fb));
            }
        }
    }

    pub fn start_game(&mut self, kind: GameModeKind) {
        self.player.reset(&mut self.world);
        self.pointer = PointerTracker::new();
        self.world.activate(GameMode::new(kind));
        self.cursor = Vec2::ZERO;
        self.screen = Screen::Playing;
    }

    pub fn pause(&mut self) {
        self.player.reset(&mut self.world);
        self.pointer = PointerTracker::new();
        self.world.deactivate();
        self.menu.activate(true, Vec::new());
        self.screen = Screen::Menu;
        info!("paused");
    }

    pub fn resume(&mut self) {
        if self.world.resume() {
            self.screen = Screen::Playing;
            info!("resumed");
        }
    }

    fn finish_game(&mut self) {
        self.player.reset(&mut self.world);
        let Some(mode) = self.world.take_mode() else {
            return;
        };
        let kind = mode.kind();
        let value = mode.raw_score_value();
        let stats = self.stats();
        info!(
            mode = kind.as_str(),
            value,
            cells = stats.cells_destroyed,
            longest_cascade = stats.longest_cascade,
            "game over"
        );

        let mut message = mode.summary_text();
        if let Some(rank) = self.leaderboard.add_score(kind, value) {
            message.push(format!("New {} record: #{}", kind.title(), rank + 1));
            if let Some(path) = &self.scores_path {
                if let Err(e) = highscores::save(path, &self.leaderboard) {
                    warn!("could not save high scores: {e:#}");
                }
            }
        }

        self.menu.activate(false, message);
        self.screen = Screen::Menu;
        if self.exit_after_game {
            self.quit = true;
        }
    }

    fn menu_command(&mut self, command: Command) {
        match command {
            Command::Up | Command::Left => self.menu.move_cursor(-1),
            Command::Down | Command::Right => self.menu.move_cursor(1),
            Command::Confirm => self.activate_item(self.menu.selected()),
            Command::TogglePause if self.menu.is_showing_leaderboard() => {
                self.menu.hide_leaderboard()
            }
            Command::TogglePause if self.menu.is_resumable() => self.resume(),
            Command::TogglePause | Command::ToggleMusic => {}
        }
    }

    fn board_command(&mut self, command: Command) {
        let rows = self.world.board().rows() as i32;
        let cols = self.world.board().cols() as i32;
        let step = match command {
            Command::Up => Vec2::new(0, -1),
            Command::Down => Vec2::new(0, 1),
            Command::Left => Vec2::new(-1, 0),
            Command::Right => Vec2::new(1, 0),
            Command::Confirm => {
                let tile = self.world.config().tile_size;
                let centre = self.cursor * tile + Vec2::new(tile / 2, tile / 2);
                self.player.handle(PointerEvent::Clicked(centre), &mut self.world);
                return;
            }
            Command::TogglePause => {
                self.pause();
                return;
            }
            Command::ToggleMusic => return,
        };
        let next = self.cursor + step;
        self.cursor = Vec2::new(next.x.clamp(0, cols - 1), next.y.clamp(0, rows - 1));
    }

    fn activate_item(&mut self, item: MenuItem) {
        match item {
            MenuItem::Resume => self.resume(),
            MenuItem::Classic => self.start_game(GameModeKind::Classic),
            MenuItem::QuickDeath => self.start_game(GameModeKind::QuickDeath),
            MenuItem::Leaderboard => self.menu.show_leaderboard(),
            MenuItem::Back => self.menu.hide_leaderboard(),
            MenuItem::ToggleMusic => {
                self.music.toggle(&mut self.music_player);
            }
            MenuItem::Quit => self.quit = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn quiet() -> AppOptions {
        AppOptions {
            music: false,
            bell: false,
            ..AppOptions::default()
        }
    }

    #[test]
    fn test_starts_on_menu_unless_mode_given() {
        let app = App::new(quiet()).unwrap();
        assert_eq!(app.screen(), Screen::Menu);

        let app = App::new(AppOptions {
            start_mode: Some(GameModeKind::QuickDeath),
            ..quiet()
        })
        .unwrap();
        assert_eq!(app.screen(), Screen::Playing);
        assert_eq!(app.world().mode().map(GameMode::kind), Some(GameModeKind::QuickDeath));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let options = AppOptions {
            world: WorldConfig {
                tile_kinds: 1,
                ..WorldConfig::default()
            },
            ..quiet()
        };
        assert!(App::new(options).is_err());
    }

    #[test]
    fn test_escape_pauses_and_resumes() {
        let mut app = App::new(AppOptions {
            start_mode: Some(GameModeKind::Classic),
            ..quiet()
        })
        .unwrap();

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.screen(), Screen::Menu);
        assert!(!app.world().is_active());
        assert_eq!(app.menu().selected(), MenuItem::Resume);

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.screen(), Screen::Playing);
        assert!(app.world().is_active());
    }

    #[test]
    fn test_cursor_stays_on_board() {
        let mut app = App::new(AppOptions {
            start_mode: Some(GameModeKind::Classic),
            ..quiet()
        })
        .unwrap();
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.cursor(), Vec2::ZERO);
        for _ in 0..20 {
            app.handle_key(key(KeyCode::Right));
        }
        assert_eq!(app.cursor(), Vec2::new(7, 0));
    }

    #[test]
    fn test_confirm_selects_cursor_tile() {
        let mut app = App::new(AppOptions {
            start_mode: Some(GameModeKind::Classic),
            ..quiet()
        })
        .unwrap();
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.world().selection().map(|s| s.index), Some(Vec2::new(0, 1)));
    }

    #[test]
    fn test_quick_death_timeout_records_score() {
        let mut app = App::new(AppOptions {
            start_mode: Some(GameModeKind::QuickDeath),
            ..quiet()
        })
        .unwrap();

        for _ in 0..15 {
            app.tick(1_000);
        }
        assert_eq!(app.screen(), Screen::Menu);
        assert_eq!(app.leaderboard().scores(GameModeKind::QuickDeath), &[15_000]);
        assert!(app.menu().message()[0].contains("15.00"));
        assert!(!app.menu().is_resumable());
        assert!(!app.should_quit());
    }

    #[test]
    fn test_exit_after_game() {
        let mut app = App::new(AppOptions {
            start_mode: Some(GameModeKind::QuickDeath),
            exit_after_game: true,
            ..quiet()
        })
        .unwrap();
        app.tick(15_000);
        assert!(app.should_quit());
    }

    #[test]
    fn test_menu_mouse_click_starts_game() {
        let mut app = App::new(quiet()).unwrap();
        let viewport = Viewport::new(60, 24);
        let mut fb = FrameBuffer::new(60, 24);
        app.render_into(viewport, &mut fb);

        let row = fb
            .lines()
            .iter()
            .position(|l| l.contains("Play Classic"))
            .unwrap();
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 30,
            row: row as u16,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(app.screen(), Screen::Playing);
    }

    #[test]
    fn test_music_toggle_and_quit_keys() {
        let mut app = App::new(quiet()).unwrap();
        assert!(!app.music_enabled());
        app.handle_key(key(KeyCode::Char('m')));
        assert!(app.music_enabled());
        app.tick(16);

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }
}
