//! Sound Cues
//!
//! Named audio triggers emitted by the simulation. The audio collaborator is
//! fire-and-forget: it restarts a cue from the beginning on every trigger and
//! never reports back.

use serde::{Deserialize, Serialize};

/// A named sound cue.
///
/// Cues are queued on the [`SimulationState`](crate::game::state::SimulationState)
/// during an update pass and drained once per tick into the
/// [`TickResult`](crate::game::tick::TickResult).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundCue {
    /// Hero left the ground under player control.
    Jump,
    /// A character hit an obstacle from below while moving upward.
    Bump,
    /// A non-hero character was killed.
    Stomp,
    /// The hero was killed.
    Die,
    /// Background music starts (first begin signal).
    MusicStart,
    /// Background music stops (hero death).
    MusicStop,
}
