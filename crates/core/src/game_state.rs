//! Game state module - manages the complete game state
//!
//! This module ties together the board, pieces, piece queue and scoring rules.
//! It drives the piece lifecycle:
//!
//! `Spawning -> Active -> (lock) -> Resolving -> Spawning`, terminal `GameOver`.
//!
//! Locking writes the piece into the board and enters `Resolving`, where the
//! board alternates gravity sweeps and row clears until a full pass changes
//! nothing. Each step that changed the board may hold the phase for a short
//! pause so the frontend can show it; with zero pauses the whole resolve runs
//! inside the lock call. No active piece exists while resolving, so player
//! commands are rejected until the next spawn.

use crate::board::Board;
use crate::config::GameConfig;
use crate::events::GameEvent;
use crate::piece::{spawn_x, Piece};
use crate::rng::PieceQueue;
use crate::scoring::{level_for_lines, line_clear_points};
use crate::shape::Shape;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, PieceKind, Turn};

/// Next step of the resolve loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStep {
    Settle,
    Clear,
}

/// Progress of an in-flight resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolve {
    pub next: ResolveStep,
    /// Remaining pause before `next` runs.
    pub wait_ms: u32,
    /// Whether the current pass has changed the board so far.
    pub pass_changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not started yet.
    Spawning,
    Active,
    Resolving(Resolve),
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Spawning => "spawning",
            Phase::Active => "active",
            Phase::Resolving(_) => "resolving",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: Option<Piece>,
    /// Held kind and the shape it comes back with.
    hold: Option<(PieceKind, Shape)>,
    can_hold: bool,
    piece_queue: PieceQueue,
    phase: Phase,
    events: Vec<GameEvent>,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Number of pieces spawned from the queue this episode.
    pieces_spawned: u32,
    score: u32,
    lines: u32,
    level: u32,
    drop_timer_ms: u32,
}

impl GameState {
    /// Create a new game. An unset seed falls back to 1.
    pub fn new(config: GameConfig) -> Self {
        let board = Board::with_hidden_rows(config.cols, config.visible_rows, config.hidden_rows);
        Self::with_board(config, board)
    }

    /// Create a game with the default rules and the given seed.
    pub fn with_seed(seed: u32) -> Self {
        Self::new(GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        })
    }

    /// Create a game on a prepared board. The board's dimensions win over the config's.
    pub fn with_board(config: GameConfig, board: Board) -> Self {
        let seed = config.seed.unwrap_or(1);
        let piece_queue = PieceQueue::new(seed, config.next_queue_len);
        Self {
            config,
            board,
            active: None,
            hold: None,
            can_hold: true,
            piece_queue,
            phase: Phase::Spawning,
            events: Vec::new(),
            episode_id: 0,
            pieces_spawned: 0,
            score: 0,
            lines: 0,
            level: level_for_lines(0),
            drop_timer_ms: 0,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.phase != Phase::Spawning {
            return;
        }
        self.spawn_piece();
    }

    pub fn started(&self) -> bool {
        self.phase != Phase::Spawning
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn is_resolving(&self) -> bool {
        matches!(self.phase, Phase::Resolving(_))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold.map(|(kind, _)| kind)
    }

    /// Upcoming pieces, next first.
    pub fn next_queue(&self) -> impl ExactSizeIterator<Item = PieceKind> + '_ {
        self.piece_queue.upcoming()
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn seed(&self) -> u32 {
        self.piece_queue.seed()
    }

    /// Get current drop interval based on level
    pub fn drop_interval_ms(&self) -> u32 {
        self.config.drop_interval_ms(self.level)
    }

    /// Take all events queued since the last call, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Spawn the next piece from the queue, or end the game if it collides.
    fn spawn_piece(&mut self) -> bool {
        let kind = self.piece_queue.draw();
        let piece = Piece::spawn(kind, self.board.cols());
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        self.can_hold = true;
        self.drop_timer_ms = 0;

        if !piece.fits(&self.board) {
            self.enter_game_over();
            return false;
        }

        self.active = Some(piece);
        self.phase = Phase::Active;
        true
    }

    fn enter_game_over(&mut self) {
        if self.phase == Phase::GameOver {
            return;
        }
        self.active = None;
        self.phase = Phase::GameOver;
        self.events.push(GameEvent::GameOver);
    }

    /// Active piece, only while the game accepts commands.
    fn controllable(&self) -> Option<Piece> {
        match self.phase {
            Phase::Active => self.active,
            _ => None,
        }
    }

    /// Try to move the active piece
    pub(crate) fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let Some(active) = self.controllable() else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if !moved.fits(&self.board) {
            return false;
        }
        self.active = Some(moved);
        if dy == 0 {
            self.events.push(GameEvent::Moved);
        }
        true
    }

    /// Try to rotate the active piece with wall kicks
    pub(crate) fn try_rotate(&mut self, turn: Turn) -> bool {
        let Some(active) = self.controllable() else {
            return false;
        };

        match active.rotated(turn, &self.board) {
            Some(rotated) => {
                self.active = Some(rotated);
                self.events.push(GameEvent::Rotated);
                true
            }
            None => false,
        }
    }

    /// Move down one row, locking if the piece is resting on something.
    pub(crate) fn soft_drop(&mut self) -> bool {
        let Some(active) = self.controllable() else {
            return false;
        };

        let moved = active.shifted(0, 1);
        if moved.fits(&self.board) {
            self.active = Some(moved);
        } else {
            self.lock_piece();
        }
        self.drop_timer_ms = 0;
        self.events.push(GameEvent::SoftDropped);
        true
    }

    /// Hard drop the active piece to the bottom
    pub(crate) fn hard_drop(&mut self) -> bool {
        let Some(active) = self.controllable() else {
            return false;
        };

        let landed = active.dropped(&self.board);
        self.active = Some(landed);
        self.events.push(GameEvent::HardDropped { piece: landed });
        self.lock_piece();
        true
    }

    /// Replace the active piece with `piece` and hard drop it.
    ///
    /// `piece` must be of the active kind and fit the board where given.
    /// Used by automated players that compute a final placement up front.
    pub fn place_piece(&mut self, piece: Piece) -> bool {
        let Some(active) = self.controllable() else {
            return false;
        };
        if piece.kind != active.kind || !piece.fits(&self.board) {
            return false;
        }
        self.active = Some(piece);
        self.hard_drop()
    }

    /// Swap active piece with hold piece
    ///
    /// The first hold keeps the piece's current orientation. A piece swapped
    /// out for a held one is stored in spawn orientation.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(active) = self.controllable() else {
            return false;
        };

        self.events.push(GameEvent::Held);
        match self.hold.take() {
            Some((held, shape)) => {
                self.hold = Some((active.kind, Shape::spawn(active.kind)));
                let piece = Piece {
                    kind: held,
                    shape,
                    x: spawn_x(self.board.cols(), shape.width()),
                    y: 0,
                };
                if piece.fits(&self.board) {
                    self.active = Some(piece);
                } else {
                    self.enter_game_over();
                }
            }
            None => {
                self.hold = Some((active.kind, active.shape));
                self.active = None;
                self.spawn_piece();
            }
        }

        self.can_hold = false;
        true
    }

    /// Lock the active piece onto the board and start resolving
    pub fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board
            .lock(&active.shape, active.x, active.y, active.kind);
        self.events.push(GameEvent::Locked);

        self.phase = Phase::Resolving(Resolve {
            next: ResolveStep::Settle,
            wait_ms: 0,
            pass_changed: false,
        });
        self.advance_resolve(0);
    }

    /// Run resolve steps whose pause has elapsed.
    ///
    /// Returns true while the phase is (or just stopped being) `Resolving`.
    fn advance_resolve(&mut self, elapsed_ms: u32) -> bool {
        let Phase::Resolving(mut resolve) = self.phase else {
            return false;
        };
        resolve.wait_ms = resolve.wait_ms.saturating_sub(elapsed_ms);

        while resolve.wait_ms == 0 {
            match resolve.next {
                ResolveStep::Settle => {
                    let fell = self.board.apply_gravity_step();
                    if fell {
                        self.events.push(GameEvent::BlocksFell);
                        resolve.wait_ms = self.config.settle_pause_ms;
                    }
                    resolve.pass_changed = fell;
                    resolve.next = ResolveStep::Clear;
                }
                ResolveStep::Clear => {
                    let rows = self.board.clear_full_rows();
                    if rows > 0 {
                        self.lines += rows as u32;
                        self.score += line_clear_points(rows);
                        self.events.push(GameEvent::LinesCleared { rows });
                        resolve.wait_ms = self.config.clear_pause_ms;
                        resolve.pass_changed = true;
                    }
                    if !resolve.pass_changed {
                        self.finish_resolve();
                        return true;
                    }
                    resolve.next = ResolveStep::Settle;
                    resolve.pass_changed = false;
                }
            }
        }

        self.phase = Phase::Resolving(resolve);
        true
    }

    fn finish_resolve(&mut self) {
        self.level = level_for_lines(self.lines);
        self.spawn_piece();
    }

    /// Calculate the ghost piece Y position (where piece would land)
    pub fn ghost_y(&self) -> Option<i32> {
        self.active.map(|piece| piece.drop_y(&self.board))
    }

    /// Main game tick - advance gravity or the resolve loop.
    ///
    /// Returns true if the board or the active piece changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        match self.phase {
            Phase::Active => {
                self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
                if self.drop_timer_ms < self.drop_interval_ms() {
                    return false;
                }
                self.drop_timer_ms = 0;
                if !self.try_move(0, 1) {
                    self.lock_piece();
                }
                true
            }
            Phase::Resolving(_) => self.advance_resolve(elapsed_ms),
            Phase::Spawning | Phase::GameOver => false,
        }
    }

    /// Apply a game action. Returns false if it was rejected.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.try_rotate(Turn::Cw),
            GameAction::RotateCcw => self.try_rotate(Turn::Ccw),
            GameAction::Hold => self.hold(),
            GameAction::Restart => {
                self.restart();
                true
            }
            // Screen navigation belongs to the frontend.
            GameAction::ReturnToMenu => false,
        }
    }

    /// Start over with the same seed on an empty board. Pending resolve work is dropped.
    pub fn restart(&mut self) {
        let next_episode = self.episode_id.wrapping_add(1);
        let mut board = self.board.clone();
        board.clear();
        *self = Self::with_board(self.config.clone(), board);
        self.episode_id = next_episode;
        self.start();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            cols: self.board.cols(),
            rows: self.board.rows(),
            hidden_rows: self.board.hidden_rows(),
            board: self.board.to_ids(),
            active: self.active.map(ActiveSnapshot::from),
            ghost_y: self.ghost_y(),
            hold: self.hold_piece().map(|k| k.as_str().to_string()),
            next_queue: self.next_queue().map(|k| k.as_str().to_string()).collect(),
            can_hold: self.can_hold,
            phase: self.phase.as_str().to_string(),
            game_over: self.game_over(),
            episode_id: self.episode_id,
            seed: self.seed(),
            pieces_spawned: self.pieces_spawned,
            score: self.score,
            lines: self.lines,
            level: self.level,
            drop_interval_ms: self.drop_interval_ms(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_seed(1)
    }
}
