//! Game Simulation Module
//!
//! All simulation code. Single-threaded and deterministic under a fixed
//! sequence of tick timestamps and key events.
//!
//! ## Module Structure
//!
//! - `map`: tile occupancy grid for static scenery
//! - `state`: entity records and the owning `SimulationState`
//! - `movement`: sub-step-bounded displacement resolution
//! - `character`: gravity, interactions, death, hero/goomba controllers
//! - `camera`: deadzone horizontal scrolling
//! - `tick`: the clock that advances everything
//! - `input`: logical key-state snapshot
//! - `events`: sound cues for the audio collaborator
//! - `catalog`: entity-kind capability records and level configuration

pub mod camera;
pub mod catalog;
pub mod character;
pub mod events;
pub mod input;
pub mod map;
pub mod movement;
pub mod state;
pub mod tick;

// Re-export key types
pub use camera::CameraScroll;
pub use catalog::{Capabilities, EntityKind, LevelConfig, LevelError, Placement};
pub use events::SoundCue;
pub use input::{Key, KeyState};
pub use map::{OutOfBoundsError, TileMap};
pub use movement::{attempt_move, MoveOutcome, Obstacle};
pub use state::{AnimState, Character, EntityId, Prop, PropId, SimulationState};
pub use tick::{Simulation, TickResult};
