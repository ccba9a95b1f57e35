//! Core types shared across the workspace.
//! This crate contains pure data types with no external dependencies.

/// Playfield dimensions
pub const BOARD_COLS: usize = 10;
pub const VISIBLE_ROWS: usize = 20;
/// Spawn buffer above the visible playfield. Rendering offsets by this amount.
pub const HIDDEN_ROWS: usize = 4;
pub const TOTAL_ROWS: usize = VISIBLE_ROWS + HIDDEN_ROWS;

/// Number of upcoming pieces kept in the lookahead queue.
pub const NEXT_QUEUE_LEN: usize = 5;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
pub const BASE_DROP_MS: u32 = 1000;
pub const DROP_STEP_MS: u32 = 50;
pub const MIN_DROP_MS: u32 = 100;
/// Minimum visible duration after a gravity sweep moved cells.
pub const SETTLE_PAUSE_MS: u32 = 50;
/// Minimum visible duration after rows were cleared.
pub const CLEAR_PAUSE_MS: u32 = 150;

/// DAS/ARR timing (milliseconds)
pub const DEFAULT_DAS_MS: u32 = 160;
pub const DEFAULT_ARR_MS: u32 = 50;

/// Attract-mode bot places one piece per interval.
pub const ATTRACT_STEP_MS: u32 = 100;

/// Scoring
pub const POINTS_PER_LINE: u32 = 10;
pub const LINES_PER_LEVEL: u32 = 10;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Numeric type identifier (1-7) as stored in board snapshots.
    pub fn id(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::id`]. Returns None for 0 and unknown ids.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::J),
            7 => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to uppercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Rotation direction. `Cw` is +1, `Ccw` is -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Cw,
    Ccw,
}

/// Game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Hold,
    ReturnToMenu,
    Restart,
}

/// Symbolic sound cues. Playback is fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEvent {
    Move,
    Rotate,
    SoftDrop,
    HardDrop,
    Lock,
    BlockFall,
    LineClear,
    /// Second, higher chime layered on a four-row clear.
    LineClearQuad,
    GameOver,
    UiHover,
    UiClick,
}

impl SoundEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEvent::Move => "move",
            SoundEvent::Rotate => "rotate",
            SoundEvent::SoftDrop => "softDrop",
            SoundEvent::HardDrop => "hardDrop",
            SoundEvent::Lock => "lock",
            SoundEvent::BlockFall => "blockFall",
            SoundEvent::LineClear => "lineClear",
            SoundEvent::LineClearQuad => "lineClearQuad",
            SoundEvent::GameOver => "gameOver",
            SoundEvent::UiHover => "uiHover",
            SoundEvent::UiClick => "uiClick",
        }
    }
}

/// Which mix a sound belongs to. The menu plays quieter than gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mix {
    #[default]
    Game,
    Menu,
}
