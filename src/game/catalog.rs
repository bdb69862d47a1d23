//! Entity Catalog and Level Configuration
//!
//! Data-driven replacement for per-kind subclassing: every entity kind maps to
//! a capability record (static/pushable flags, size, z-order, animation table)
//! resolved once at construction. Level layout is a list of `(kind, x, y)`
//! placements, loadable from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::map::OutOfBoundsError;

/// One atlas coordinate pair `(column, row)`.
pub type Frame = (u8, u8);

/// Per-state lists of atlas frames.
///
/// The current frame is `frames[floor(speed * clock_ms / 100) % len]`.
#[derive(Clone, Copy, Debug)]
pub struct AnimationTable {
    /// Frames shown while idle.
    pub idle: &'static [Frame],
    /// Frames shown while running.
    pub run: &'static [Frame],
    /// Frames shown while airborne.
    pub falling: &'static [Frame],
    /// Frames shown during the death sequence.
    pub die: &'static [Frame],
}

impl AnimationTable {
    /// Table that shows the same frames in every state (props and decor).
    pub const fn fixed(frames: &'static [Frame]) -> Self {
        Self {
            idle: frames,
            run: frames,
            falling: frames,
            die: frames,
        }
    }
}

/// Capability record for an entity kind.
#[derive(Clone, Copy, Debug)]
pub struct Capabilities {
    /// Occupies the tile map and never moves.
    pub is_static: bool,
    /// Can receive a bump impulse from below (static kinds only).
    pub pushable: bool,
    /// Render layering; not used by physics.
    pub z_order: u8,
    /// Width in tile units.
    pub w: u32,
    /// Height in tile units.
    pub h: u32,
    /// Default animation playback speed.
    pub animation_speed: f32,
    /// Atlas frames per animation state.
    pub animations: AnimationTable,
}

/// Every entity kind the level format knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Player-controlled character.
    Hero,
    /// Autonomous patrolling enemy.
    Goomba,
    /// Breakable-looking block; bumps when hit from below.
    Bricks,
    /// Plain solid block.
    Block,
    /// Solid ground block.
    Stone,
    /// 2x2 pipe obstacle.
    Pipe,
    /// Animated coin block; bumps when hit from below.
    CoinsBlock,
    /// Decorative cloud (2x2).
    Clouds1,
    /// Decorative cloud (3x2).
    Clouds2,
    /// Decorative cloud (4x2).
    Clouds3,
    /// Decorative bush (2x1).
    Bush1,
    /// Decorative bush (4x1).
    Bush2,
    /// Decorative bush (3x1).
    Bush3,
    /// Decorative hill (3x1).
    Hill,
    /// Decorative hill (5x2).
    BigHill,
}

const HERO_ANIMATIONS: AnimationTable = AnimationTable {
    idle: &[(9, 4)],
    run: &[(12, 4), (13, 4), (14, 4)],
    falling: &[(15, 4)],
    die: &[(10, 4)],
};

const GOOMBA_ANIMATIONS: AnimationTable = AnimationTable {
    idle: &[(10, 12)],
    run: &[(10, 12), (11, 12)],
    falling: &[(10, 12), (11, 12)],
    die: &[(12, 12)],
};

const COINS_BLOCK_FRAMES: &[Frame] = &[(4, 0), (4, 1), (4, 2)];

const fn character(z_order: u8, animation_speed: f32, animations: AnimationTable) -> Capabilities {
    Capabilities {
        is_static: false,
        pushable: false,
        z_order,
        w: 1,
        h: 1,
        animation_speed,
        animations,
    }
}

const fn block(pushable: bool, w: u32, h: u32, frames: &'static [Frame]) -> Capabilities {
    Capabilities {
        is_static: true,
        pushable,
        z_order: 1,
        w,
        h,
        animation_speed: 1.0,
        animations: AnimationTable::fixed(frames),
    }
}

const fn decor(w: u32, h: u32, frames: &'static [Frame]) -> Capabilities {
    Capabilities {
        is_static: false,
        pushable: false,
        z_order: 2,
        w,
        h,
        animation_speed: 1.0,
        animations: AnimationTable::fixed(frames),
    }
}

const HERO_CAPS: Capabilities = character(4, 1.0, HERO_ANIMATIONS);
const GOOMBA_CAPS: Capabilities = character(3, 0.3, GOOMBA_ANIMATIONS);
const BRICKS_CAPS: Capabilities = block(true, 1, 1, &[(0, 0)]);
const BLOCK_CAPS: Capabilities = block(false, 1, 1, &[(1, 0)]);
const STONE_CAPS: Capabilities = block(false, 1, 1, &[(2, 0)]);
const PIPE_CAPS: Capabilities = block(false, 2, 2, &[(18, 3)]);
const COINS_BLOCK_CAPS: Capabilities = Capabilities {
    animation_speed: 0.3,
    ..block(true, 1, 1, COINS_BLOCK_FRAMES)
};
const CLOUDS1_CAPS: Capabilities = decor(2, 2, &[(7, 7)]);
const CLOUDS2_CAPS: Capabilities = decor(3, 2, &[(0, 7)]);
const CLOUDS3_CAPS: Capabilities = decor(4, 2, &[(3, 7)]);
const BUSH1_CAPS: Capabilities = decor(2, 1, &[(0, 11)]);
const BUSH2_CAPS: Capabilities = decor(4, 1, &[(2, 11)]);
const BUSH3_CAPS: Capabilities = decor(3, 1, &[(6, 11)]);
const HILL_CAPS: Capabilities = decor(3, 1, &[(0, 6)]);
const BIG_HILL_CAPS: Capabilities = decor(5, 2, &[(3, 5)]);

impl EntityKind {
    /// Capability record for this kind, resolved once at construction time.
    pub const fn capabilities(self) -> &'static Capabilities {
        match self {
            EntityKind::Hero => &HERO_CAPS,
            EntityKind::Goomba => &GOOMBA_CAPS,
            EntityKind::Bricks => &BRICKS_CAPS,
            EntityKind::Block => &BLOCK_CAPS,
            EntityKind::Stone => &STONE_CAPS,
            EntityKind::Pipe => &PIPE_CAPS,
            EntityKind::CoinsBlock => &COINS_BLOCK_CAPS,
            EntityKind::Clouds1 => &CLOUDS1_CAPS,
            EntityKind::Clouds2 => &CLOUDS2_CAPS,
            EntityKind::Clouds3 => &CLOUDS3_CAPS,
            EntityKind::Bush1 => &BUSH1_CAPS,
            EntityKind::Bush2 => &BUSH2_CAPS,
            EntityKind::Bush3 => &BUSH3_CAPS,
            EntityKind::Hill => &HILL_CAPS,
            EntityKind::BigHill => &BIG_HILL_CAPS,
        }
    }

    /// True for kinds simulated as mobile characters.
    #[inline]
    pub fn is_character(self) -> bool {
        matches!(self, EntityKind::Hero | EntityKind::Goomba)
    }
}

/// One entity placement in a level.
///
/// Coordinates are optional at the serde level so that missing fields fail
/// with [`LevelError::InvalidPosition`] instead of defaulting silently.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Placement {
    /// Entity kind to construct.
    pub kind: EntityKind,
    /// Initial column (sub-tile precision allowed).
    #[serde(default)]
    pub x: Option<f32>,
    /// Initial row (sub-tile precision allowed).
    #[serde(default)]
    pub y: Option<f32>,
}

impl Placement {
    /// Shorthand used by tests and the demo level.
    pub fn new(kind: EntityKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            x: Some(x),
            y: Some(y),
        }
    }

    /// Validated `(x, y)`, rejecting missing or non-finite coordinates.
    pub fn position(&self) -> Result<(f32, f32), LevelError> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Ok((x, y)),
            _ => Err(LevelError::InvalidPosition { kind: self.kind }),
        }
    }
}

/// Static description of a level: the entities to construct at load.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Placements in spawn order.
    pub entities: Vec<Placement>,
}

impl LevelConfig {
    /// Parse a level from JSON.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Errors rejecting bad level data at load time.
#[derive(Debug, Error)]
pub enum LevelError {
    /// A static entity rectangle does not fit inside the grid.
    #[error(transparent)]
    OutOfBounds(#[from] OutOfBoundsError),

    /// A placement is missing a numeric position.
    #[error("missing or non-numeric position for {kind:?}")]
    InvalidPosition {
        /// Kind of the rejected placement.
        kind: EntityKind,
    },

    /// The level JSON could not be parsed.
    #[error("level parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
