//! # Side-Scroller Simulation Core
//!
//! Deterministic simulation core of a 2D side-scrolling platform game: a
//! tile-occupancy map, a sub-step-bounded collision/movement resolver, and a
//! small entity state machine for a player-controlled hero and patrolling
//! enemies.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     SIMULATION CORE                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  game/                                                       │
//! │  ├── map.rs       - Tile occupancy grid (100 x 19 + death row)│
//! │  ├── state.rs     - Entities and the owning SimulationState  │
//! │  ├── movement.rs  - Displacement resolver (0.25-tile steps)  │
//! │  ├── character.rs - Gravity, stomp/bump/push, death, AI      │
//! │  ├── camera.rs    - Deadzone horizontal scrolling            │
//! │  ├── tick.rs      - Capped-delta clock, one pass per tick    │
//! │  ├── input.rs     - Logical key snapshot (left/right/jump/shift)│
//! │  ├── events.rs    - Fire-and-forget sound cues               │
//! │  └── catalog.rs   - Entity kinds, animations, level loading  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Boundaries
//!
//! Rendering, audio playback, and raw input capture are external
//! collaborators. The core exposes positions, z-orders, facing directions and
//! atlas frames for a renderer to poll, emits named [`SoundCue`]s for an
//! audio backend, and consumes an abstracted [`KeyState`] plus monotonic tick
//! timestamps. Given the same timestamps and key events, the simulation
//! produces identical results; a per-frame delta cap of 0.1 s keeps outcomes
//! stable across frame-rate hiccups.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod game;

// Re-export commonly used types
pub use game::{
    AnimState, Character, EntityId, EntityKind, Key, KeyState, LevelConfig, LevelError,
    MoveOutcome, Simulation, SimulationState, SoundCue, TickResult,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
