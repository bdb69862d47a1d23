//! Simulation State
//!
//! Entity records and the `SimulationState` struct that owns them. The state
//! replaces the original's ambient globals (`map`, `characters`, `timer`) with
//! one explicitly constructed owner: built at level load, dropped at scene
//! unload, and passed by reference to every component.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::game::camera::CameraScroll;
use crate::game::catalog::{EntityKind, Frame, LevelConfig, LevelError};
use crate::game::events::SoundCue;
use crate::game::map::TileMap;

/// Handle to a prop in [`SimulationState::props`]. Props are never removed,
/// so the handle stays valid for the life of the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PropId(pub u32);

/// Stable identifier for a mobile character, assigned in spawn order.
///
/// Characters are removed from the collection when their death sequence ends,
/// so indices are not stable but ids are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Animation state selected by the entity state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimState {
    /// Standing still (or blocked).
    #[default]
    Idle,
    /// Walking or patrolling.
    Run,
    /// Airborne.
    Falling,
    /// Death sequence.
    Die,
}

/// Decay rate of the push animation timer, per second.
const PUSH_DECAY_RATE: f32 = 5.0;

/// Amplitude of the push bounce, in tile units.
const PUSH_AMPLITUDE: f32 = 0.4;

/// A non-character entity: solid scenery registered in the tile map, or
/// purely decorative background (clouds, bushes, hills).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Prop {
    /// Kind this prop was constructed from.
    pub kind: EntityKind,
    /// Column position.
    pub x: f32,
    /// Row position.
    pub y: f32,
    /// Width in tile units.
    pub w: u32,
    /// Height in tile units.
    pub h: u32,
    /// Render layering.
    pub z_order: u8,
    /// Can receive a bump impulse from below.
    pub pushable: bool,
    /// Registered in the tile map; never moves.
    pub is_static: bool,
    /// Push animation timer, 1.0 at impact decaying to 0.
    pub push_t: f32,
    /// Animation playback speed.
    pub animation_speed: f32,
}

impl Prop {
    fn new(kind: EntityKind, x: f32, y: f32) -> Self {
        let caps = kind.capabilities();
        Self {
            kind,
            x,
            y,
            w: caps.w,
            h: caps.h,
            z_order: caps.z_order,
            pushable: caps.pushable,
            is_static: caps.is_static,
            push_t: 0.0,
            animation_speed: caps.animation_speed,
        }
    }

    /// Start the bump animation. Non-pushable props ignore the impulse.
    pub fn push(&mut self) {
        if self.pushable {
            self.push_t = 1.0;
        }
    }

    /// Decay the push timer.
    pub fn update(&mut self, dt: f32) {
        if self.push_t > 0.0 {
            self.push_t = (self.push_t - dt * PUSH_DECAY_RATE).max(0.0);
        }
    }

    /// Cosmetic vertical render offset from the push animation, in tile
    /// units. Negative is up; physics never sees this.
    pub fn render_offset_y(&self) -> f32 {
        if self.push_t > 0.0 {
            -PUSH_AMPLITUDE * (self.push_t * std::f32::consts::PI).sin()
        } else {
            0.0
        }
    }

    /// Current atlas frame.
    pub fn frame(&self, clock_ms: f64) -> Frame {
        frame_at(
            self.kind.capabilities().animations.idle,
            self.animation_speed,
            clock_ms,
        )
    }
}

/// A mobile character: subject to gravity, collision, and death.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Character {
    /// Stable identifier in spawn order.
    pub id: EntityId,
    /// Kind this character was constructed from (`Hero` or `Goomba`).
    pub kind: EntityKind,
    /// Column position (sub-tile precision).
    pub x: f32,
    /// Row position (sub-tile precision).
    pub y: f32,
    /// Width in tile units.
    pub w: u32,
    /// Height in tile units.
    pub h: u32,
    /// Render layering.
    pub z_order: u8,
    /// Facing direction for the renderer, +1 or -1.
    pub direction: i8,
    /// Patrol direction for autonomous characters, +1.0 or -1.0.
    pub walk_dir: f32,
    /// Accumulated fall acceleration; negative while moving up.
    pub fall_acceleration: f32,
    /// Airborne this frame.
    pub falling: bool,
    /// Death sequence in progress.
    pub dead: bool,
    /// Simulated seconds since death.
    pub death_timer: f32,
    /// Animation state selected by the state machine.
    pub anim_state: AnimState,
    /// Animation playback speed (hero: 1.0 or 2.0 with shift; goomba: 0.3).
    pub animation_speed: f32,
}

impl Character {
    fn new(id: EntityId, kind: EntityKind, x: f32, y: f32) -> Self {
        let caps = kind.capabilities();
        Self {
            id,
            kind,
            x,
            y,
            w: caps.w,
            h: caps.h,
            z_order: caps.z_order,
            direction: 1,
            walk_dir: 1.0,
            fall_acceleration: 0.0,
            falling: true,
            dead: false,
            death_timer: 0.0,
            anim_state: AnimState::Idle,
            animation_speed: caps.animation_speed,
        }
    }

    /// True for the player-controlled hero.
    #[inline]
    pub fn is_hero(&self) -> bool {
        self.kind == EntityKind::Hero
    }

    /// Current atlas frame for the render interface.
    pub fn frame(&self, clock_ms: f64) -> Frame {
        let animations = &self.kind.capabilities().animations;
        let frames = match self.anim_state {
            AnimState::Idle => animations.idle,
            AnimState::Run => animations.run,
            AnimState::Falling => animations.falling,
            AnimState::Die => animations.die,
        };
        frame_at(frames, self.animation_speed, clock_ms)
    }
}

fn frame_at(frames: &'static [Frame], speed: f32, clock_ms: f64) -> Frame {
    let step = (speed as f64 * clock_ms / 100.0).floor().max(0.0) as u64;
    frames[(step % frames.len() as u64) as usize]
}

/// Everything the simulation mutates: the tile map, all entities, the camera,
/// and the per-tick sound-cue queue.
#[derive(Clone, Debug)]
pub struct SimulationState {
    /// Static occupancy index over `props`.
    pub map: TileMap,
    /// Scenery and decor, never removed.
    pub props: Vec<Prop>,
    /// Mobile characters in spawn order; sole owner of their lifetime.
    pub characters: Vec<Character>,
    /// Horizontal scroll tracker.
    pub camera: CameraScroll,
    /// Latest external timestamp in milliseconds; drives frame selection.
    pub clock_ms: f64,
    next_entity_id: u32,
    pending_cues: Vec<SoundCue>,
}

impl SimulationState {
    /// Create an empty state (no entities). Mostly useful in tests; levels
    /// normally come from [`SimulationState::from_level`].
    pub fn new() -> Self {
        Self {
            map: TileMap::new(),
            props: Vec::new(),
            characters: Vec::new(),
            camera: CameraScroll::new(),
            clock_ms: 0.0,
            next_entity_id: 0,
            pending_cues: Vec::new(),
        }
    }

    /// Construct the full entity set from level configuration.
    ///
    /// Static props are registered into the tile map; registration failures
    /// and missing positions reject the level here, at load.
    pub fn from_level(level: &LevelConfig) -> Result<Self, LevelError> {
        let mut state = Self::new();
        for placement in &level.entities {
            let (x, y) = placement.position()?;
            if placement.kind.is_character() {
                state.spawn_character(placement.kind, x, y);
            } else {
                state.add_prop(placement.kind, x, y)?;
            }
        }
        info!(
            props = state.props.len(),
            characters = state.characters.len(),
            "level loaded"
        );
        Ok(state)
    }

    /// Add a prop, registering it in the tile map if its kind is static.
    pub fn add_prop(&mut self, kind: EntityKind, x: f32, y: f32) -> Result<PropId, LevelError> {
        let id = PropId(self.props.len() as u32);
        let prop = Prop::new(kind, x, y);
        if prop.is_static {
            self.map
                .register(id, x.floor() as i32, y.floor() as i32, prop.w, prop.h)?;
        }
        self.props.push(prop);
        Ok(id)
    }

    /// Append a mobile character. Insertion order is spawn order.
    pub fn spawn_character(&mut self, kind: EntityKind, x: f32, y: f32) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        self.characters.push(Character::new(id, kind, x, y));
        debug!(?id, ?kind, x, y, "spawned character");
        id
    }

    /// The hero, if still present.
    pub fn hero(&self) -> Option<&Character> {
        self.characters.iter().find(|c| c.is_hero())
    }

    /// Look up a character by stable id.
    pub fn character(&self, id: EntityId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Queue a sound cue for the audio collaborator.
    pub fn push_cue(&mut self, cue: SoundCue) {
        self.pending_cues.push(cue);
    }

    /// Drain the cues queued since the last tick.
    pub fn take_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.pending_cues)
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}
