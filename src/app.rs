//! Application state machine: the attract-mode menu and the playing screen.
//!
//! Owns the game, the menu bot, input timing, effects and the sound sink.
//! Terminal I/O stays in `main`; everything here runs on explicit
//! millisecond ticks so it can be driven from tests.

use crossterm::event::{KeyCode, KeyEvent};
use tracing::{info, warn};

use crate::audio::{NullSound, SoundSink};
use crate::bot::AttractBot;
use crate::core::{GameConfig, GameEvent, GameState, SimpleRng};
use crate::input::{handle_key_event, handle_menu_key, should_quit, InputHandler, MenuCommand};
use crate::settings::Settings;
use crate::term::{Effects, FrameBuffer, GameView, MenuView, Viewport};
use crate::types::{GameAction, Mix, SoundEvent};

pub const MENU_ENTRIES: [&str; 2] = ["Play", "Quit"];
const MENU_PLAY: usize = 0;
const MENU_QUIT: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    /// A game is running or over; game over is a phase of the game itself.
    Playing,
}

/// A seed from the wall clock, for runs without a configured seed.
pub fn clock_seed() -> u32 {
    let now = chrono::Utc::now();
    (now.timestamp() as u32) ^ now.timestamp_subsec_nanos()
}

pub struct App<S: SoundSink = Box<dyn SoundSink>> {
    settings: Settings,
    screen: Screen,
    menu_index: usize,
    game: GameState,
    attract: AttractBot,
    seeds: SimpleRng,
    input: InputHandler,
    effects: Effects,
    game_view: GameView,
    menu_view: MenuView,
    sound: S,
    sound_failures: u32,
    quit: bool,
}

impl App<NullSound> {
    /// Silent app with no log, for tests and tools.
    pub fn headless(settings: Settings) -> Self {
        Self::new(settings, NullSound)
    }
}

impl<S: SoundSink> App<S> {
    /// `settings.game.seed` seeds every game and the menu bot; unset means the clock.
    pub fn new(settings: Settings, sound: S) -> Self {
        let seed = settings.game.seed.unwrap_or_else(clock_seed);
        let mut seeds = SimpleRng::new(seed);
        let (cols, rows) = MenuView::new().board_size(Viewport::new(80, 24));
        let attract =
            AttractBot::new(cols, rows, seeds.next_u32()).with_step_ms(settings.attract_step_ms);
        let game = GameState::new(settings.game.clone());
        let input = InputHandler::from_config(&settings.input);

        info!(
            target: "app",
            "startup seed={} das={}ms arr={}ms audio={}",
            seed, settings.input.das_ms, settings.input.arr_ms, settings.audio
        );

        Self {
            settings,
            screen: Screen::Menu,
            menu_index: MENU_PLAY,
            game,
            attract,
            seeds,
            input,
            effects: Effects::new(),
            game_view: GameView::new(),
            menu_view: MenuView::new(),
            sound,
            sound_failures: 0,
            quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn menu_index(&self) -> usize {
        self.menu_index
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn attract(&self) -> &AttractBot {
        &self.attract
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Sound cues that failed to play so far.
    pub fn sound_failures(&self) -> u32 {
        self.sound_failures
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Terminals that report releases don't need the auto-release timeout.
    pub fn set_key_release_timeout_ms(&mut self, timeout_ms: u32) {
        self.settings.input.release_timeout_ms = timeout_ms;
        self.input = InputHandler::from_config(&self.settings.input);
    }

    pub fn handle_key_press(&mut self, key: KeyEvent) {
        if should_quit(key) {
            self.quit = true;
            return;
        }
        match self.screen {
            Screen::Menu => self.handle_menu_key(key),
            Screen::Playing => self.handle_game_key(key),
        }
        self.pump_events();
    }

    pub fn handle_key_release(&mut self, key: KeyEvent) {
        if self.screen == Screen::Playing {
            self.input.handle_key_release(key.code);
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        let Some(command) = handle_menu_key(key) else {
            return;
        };
        let len = MENU_ENTRIES.len();
        match command {
            MenuCommand::Previous => {
                self.menu_index = (self.menu_index + len - 1) % len;
                self.play(SoundEvent::UiHover, Mix::Game);
            }
            MenuCommand::Next => {
                self.menu_index = (self.menu_index + 1) % len;
                self.play(SoundEvent::UiHover, Mix::Game);
            }
            MenuCommand::Confirm => {
                self.play(SoundEvent::UiClick, Mix::Game);
                match self.menu_index {
                    MENU_QUIT => self.quit = true,
                    _ => self.start_game(),
                }
            }
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) {
        // Horizontal moves go through DAS/ARR.
        if let Some(action) = self.input.handle_key_press(key.code) {
            self.game.apply_action(action);
        }
        let Some(action) = handle_key_event(key) else {
            return;
        };
        match action {
            GameAction::MoveLeft | GameAction::MoveRight => {}
            GameAction::ReturnToMenu => self.enter_menu(),
            GameAction::Restart => {
                self.play(SoundEvent::UiClick, Mix::Game);
                self.start_game();
            }
            _ => {
                self.game.apply_action(action);
            }
        }
    }

    /// Start a fresh game on the next seed.
    pub fn start_game(&mut self) {
        let config = GameConfig {
            seed: Some(self.seeds.next_u32()),
            ..self.settings.game.clone()
        };
        self.game = GameState::new(config);
        self.game.start();
        self.input.reset();
        self.effects.clear();
        self.screen = Screen::Playing;
        info!(target: "app", "new game seed={}", self.game.seed());
        self.pump_events();
    }

    /// Abandon the current game and show the menu.
    pub fn enter_menu(&mut self) {
        if self.screen == Screen::Playing && !self.game.game_over() {
            info!(
                target: "app",
                "game abandoned score={} lines={}",
                self.game.score(),
                self.game.lines()
            );
        }
        self.screen = Screen::Menu;
        self.input.reset();
        self.effects.clear();
    }

    /// Advance timers by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u32) {
        match self.screen {
            Screen::Menu => {
                if let Some(step) = self.attract.tick(elapsed_ms) {
                    for sound in step.sounds() {
                        self.play(sound, Mix::Menu);
                    }
                }
            }
            Screen::Playing => {
                for action in self.input.update(elapsed_ms) {
                    self.game.apply_action(action);
                }
                self.game.tick(elapsed_ms);
                self.pump_events();
            }
        }
    }

    /// Draw the current screen into `fb`, resizing it to `viewport`.
    ///
    /// Each call is one rendered frame and ages the effects.
    pub fn render_into(&mut self, viewport: Viewport, fb: &mut FrameBuffer) {
        match self.screen {
            Screen::Menu => {
                let (cols, rows) = self.menu_view.board_size(viewport);
                self.attract.resize(cols, rows);
                self.menu_view
                    .render_into(&self.attract, &MENU_ENTRIES, self.menu_index, viewport, fb);
            }
            Screen::Playing => {
                self.game_view
                    .render_into(&self.game, &self.effects, viewport, fb);
                self.effects.advance_frame();
            }
        }
    }

    /// Turn queued game events into sounds, effects and log lines.
    fn pump_events(&mut self) {
        let events: Vec<GameEvent> = self.game.drain_events().collect();
        for event in events {
            match event {
                GameEvent::HardDropped { piece } => self.effects.push_flash(piece),
                GameEvent::GameOver => {
                    let (score, lines, level) =
                        (self.game.score(), self.game.lines(), self.game.level());
                    info!(
                        target: "game",
                        "game over score={score} lines={lines} level={level} pieces={}",
                        self.game.pieces_spawned()
                    );
                }
                _ => {}
            }
            for sound in event.sounds() {
                self.play(sound, Mix::Game);
            }
        }
    }

    fn play(&mut self, event: SoundEvent, mix: Mix) {
        if let Err(err) = self.sound.trigger(event, mix) {
            self.sound_failures = self.sound_failures.saturating_add(1);
            warn!(target: "audio", failures = self.sound_failures, "{err}");
        }
    }
}

/// Key code for a plain press, for tests and scripted input.
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::from(code)
}
