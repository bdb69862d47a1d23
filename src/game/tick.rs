//! Simulation Clock
//!
//! The sole entry point that advances simulated time. An external tick source
//! supplies monotonically increasing timestamps; the clock converts them into
//! a capped per-frame delta, gated behind the begin signal, and runs one
//! update pass over the whole entity set.

use tracing::debug;

use crate::game::character::update_character;
use crate::game::events::SoundCue;
use crate::game::input::{Key, KeyState};
use crate::game::state::{EntityId, SimulationState};

/// Simulated seconds after which a dead character is removed.
const DEATH_REMOVAL_SECS: f32 = 2.0;

/// Upper bound on the per-frame delta, in seconds.
const MAX_FRAME_DELTA: f64 = 0.1;

/// Result of one tick: everything the external collaborators need.
#[derive(Clone, Debug, Default)]
pub struct TickResult {
    /// Sound cues emitted during the tick, in order.
    pub cues: Vec<SoundCue>,
    /// Characters whose death sequence completed and were removed.
    pub removed: Vec<EntityId>,
}

/// Owns the simulation state and drives it from external tick timestamps.
#[derive(Clone, Debug)]
pub struct Simulation {
    state: SimulationState,
    keys: KeyState,
    last_ms: f64,
    running: bool,
}

impl Simulation {
    /// Wrap a loaded level state. Time does not advance until
    /// [`Simulation::start`] is called.
    pub fn new(state: SimulationState) -> Self {
        Self {
            state,
            keys: KeyState::new(),
            last_ms: 0.0,
            running: false,
        }
    }

    /// Begin signal (e.g. first input): unlocks the clock and starts the
    /// music. Subsequent calls are no-ops.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.state.push_cue(SoundCue::MusicStart);
            debug!("simulation started");
        }
    }

    /// True once the begin signal has been received.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Record a logical key-down or key-up event.
    pub fn key_event(&mut self, key: Key, pressed: bool) {
        self.keys.set(key, pressed);
    }

    /// Focus-lost signal: all keys released.
    pub fn focus_lost(&mut self) {
        self.keys.clear();
    }

    /// Advance the simulation to external timestamp `now_ms` (milliseconds).
    ///
    /// The applied delta is `min((now - last) / 1000, 0.1)` seconds, and zero
    /// before the begin signal. One call runs exactly one update pass.
    pub fn tick(&mut self, now_ms: f64) -> TickResult {
        let dt = if self.running {
            ((now_ms - self.last_ms) / 1000.0).min(MAX_FRAME_DELTA) as f32
        } else {
            0.0
        };
        self.last_ms = now_ms;
        self.state.clock_ms = now_ms;
        step(&mut self.state, &self.keys, dt)
    }

    /// Read access for the render interface.
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Mutable access (tests, scripted scenarios).
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }
}

/// Run one update pass with a precomputed delta.
///
/// Removal of expired characters is deferred to a dedicated pass after the
/// update traversal; the collection is never mutated while it is iterated.
pub fn step(state: &mut SimulationState, keys: &KeyState, dt: f32) -> TickResult {
    // 1. Prop animations (push-timer decay)
    for prop in &mut state.props {
        prop.update(dt);
    }

    // 2. Characters: gravity, controllers, death sequencing
    for idx in 0..state.characters.len() {
        update_character(state, idx, keys, dt);
    }

    // 3. Deferred removal of completed death sequences
    let mut removed = Vec::new();
    state.characters.retain(|c| {
        if c.dead && c.death_timer > DEATH_REMOVAL_SECS {
            removed.push(c.id);
            false
        } else {
            true
        }
    });
    for id in &removed {
        debug!(?id, "character removed after death sequence");
    }

    // 4. Camera follows the hero's new position
    if let Some(hero_x) = state.hero().map(|h| h.x) {
        state.camera.update(hero_x);
    }

    TickResult {
        cues: state.take_cues(),
        removed,
    }
}
