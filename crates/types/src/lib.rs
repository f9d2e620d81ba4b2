//! Core types module - shared data structures, constants and rule tables
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are pure data with no required dependencies, so they can be used by
//! the simulation core, the match layer and any outward-facing serializer alike.
//! Enabling the `serde` feature derives `Serialize`/`Deserialize` on every type.
//!
//! # Board Dimensions
//!
//! The grid is 10 columns by 24 rows. The top 4 rows are a hidden buffer used for
//! spawning and for growth when garbage is inserted; the remaining 20 rows are the
//! visible playfield.
//!
//! ```text
//! row 0  ┌──────────┐  ─┐
//!        │          │   │ buffer (BUFFER_ROWS)
//! row 3  │          │  ─┘
//! row 4  │          │  ─┐
//!        │   ....   │   │ visible (VISIBLE_HEIGHT)
//! row 23 └──────────┘  ─┘
//! ```
//!
//! # Rule Tables
//!
//! | Table | Values |
//! |-------|--------|
//! | `LINE_SCORES` | 1: 100, 2: 300, 3: 500, 4: 800 |
//! | `TSPIN_SCORES` | 0: 400, 1: 800, 2: 1200, 3: 1600 |
//! | `TSPIN_MINI_SCORES` | 0: 100, 1: 200, 2: 400 |
//! | `GARBAGE_TABLE` | 1: 0, 2: 1, 3: 2, 4: 4 |
//!
//! All score values are multiplied by the current level (starting at 1).
//!
//! # Examples
//!
//! ```
//! use stack_battle_types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.color_id(), 6);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 24);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Number of visible rows (20)
pub const VISIBLE_HEIGHT: u8 = 20;

/// Hidden rows above the visible playfield (4)
pub const BUFFER_ROWS: u8 = 4;

/// Total grid height including the buffer (24 rows)
pub const BOARD_HEIGHT: u8 = VISIBLE_HEIGHT + BUFFER_ROWS;

/// Spawn anchor for new pieces (x, y): centered, top of the buffer
pub const SPAWN_POSITION: (i8, i8) = (3, 0);

/// Number of upcoming pieces exposed in snapshots
pub const NEXT_PREVIEW_LEN: usize = 5;

/// Cell id of an empty cell
pub const EMPTY_CELL_ID: u8 = 0;

/// Cell id used for garbage rows
pub const GARBAGE_CELL_ID: u8 = 8;

/// Line clear base scores, indexed by lines cleared.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// T-spin base scores, indexed by lines cleared.
pub const TSPIN_SCORES: [u32; 4] = [400, 800, 1200, 1600];

/// T-spin mini base scores, indexed by lines cleared.
pub const TSPIN_MINI_SCORES: [u32; 3] = [100, 200, 400];

/// Combo scoring base value (50 points per combo step, times level)
pub const COMBO_BASE: u32 = 50;

/// Back-to-back bonus numerator (3/2 = 1.5x multiplier)
pub const B2B_NUMERATOR: u32 = 3;

/// Back-to-back bonus denominator
pub const B2B_DENOMINATOR: u32 = 2;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Garbage lines generated per clear, indexed by lines cleared.
pub const GARBAGE_TABLE: [u32; 5] = [0, 0, 1, 2, 4];

/// T-spin clears multiply their garbage by this factor.
pub const TSPIN_GARBAGE_MULTIPLIER: u32 = 2;

/// Extra garbage by combo count (clamped to the last entry).
pub const COMBO_GARBAGE: [u32; 12] = [0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 4, 5];

/// Extra garbage for a back-to-back tetris or T-spin.
pub const B2B_GARBAGE_BONUS: u32 = 1;

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color id:
/// - **I**: 1, horizontal bar
/// - **J**: 2
/// - **L**: 3 (mirror of J)
/// - **O**: 4, 2x2 square
/// - **S**: 5
/// - **T**: 6
/// - **Z**: 7 (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
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
    /// All seven kinds, in bag refill order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use stack_battle_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Color id written into the grid when this kind locks (1-7)
    ///
    /// ```
    /// use stack_battle_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.color_id(), 1);
    /// assert_eq!(PieceKind::Z.color_id(), 7);
    /// ```
    pub fn color_id(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::color_id`]
    pub fn from_color_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North**: Spawn orientation (state 0)
/// - **East**: Rotated 90° clockwise (state 1)
/// - **South**: Rotated 180° (state 2)
/// - **West**: Rotated 90° counter-clockwise (state 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use stack_battle_types::Rotation;
    ///
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// ```
    /// use stack_battle_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Rotation state index (0-3)
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation from a state index, taken mod 4
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Discrete player inputs accepted by a board.
///
/// Input layers (keyboard, touch, network) translate raw device events into
/// these actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (with soft drop scoring)
    SoftDrop,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Hold current piece (once per spawn)
    Hold,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// ```
    /// use stack_battle_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("pause"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
        }
    }
}

/// T-Spin classification of a lock
///
/// - **None**: Not a T-spin
/// - **Mini**: Only the two back corners of the pivot are filled
/// - **Full**: Three or more pivot corners are filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TSpinKind {
    #[default]
    None,
    Mini,
    Full,
}

impl TSpinKind {
    /// Returns `None` for `TSpinKind::None`, `Some("mini")` or `Some("full")` otherwise.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            TSpinKind::None => None,
            TSpinKind::Mini => Some("mini"),
            TSpinKind::Full => Some("full"),
        }
    }

    /// True for both full and mini T-spins
    pub fn is_any(&self) -> bool {
        !matches!(self, TSpinKind::None)
    }
}

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Block(PieceKind),
    Garbage,
}

impl Cell {
    /// Numeric cell id: 0 empty, 1-7 piece color, 8 garbage
    ///
    /// ```
    /// use stack_battle_types::{Cell, PieceKind};
    ///
    /// assert_eq!(Cell::Empty.id(), 0);
    /// assert_eq!(Cell::Block(PieceKind::T).id(), 6);
    /// assert_eq!(Cell::Garbage.id(), 8);
    /// ```
    pub fn id(&self) -> u8 {
        match self {
            Cell::Empty => EMPTY_CELL_ID,
            Cell::Block(kind) => kind.color_id(),
            Cell::Garbage => GARBAGE_CELL_ID,
        }
    }

    /// Parse a numeric cell id; unknown ids map to `None`
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            EMPTY_CELL_ID => Some(Cell::Empty),
            GARBAGE_CELL_ID => Some(Cell::Garbage),
            other => PieceKind::from_color_id(other).map(Cell::Block),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Identifier of a player within a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlayerId(pub u32);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{}", self.0)
    }
}
