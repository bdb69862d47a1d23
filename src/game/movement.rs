//! Movement Resolution
//!
//! Performs a requested displacement for one character against the tile map
//! and every other mobile character. The displacement is consumed as bounded
//! sub-steps so that no single check ever covers more than [`SUB_STEP`] tile
//! units per axis, which makes tunneling through single-tile obstacles
//! impossible regardless of requested velocity.

use crate::game::character::kill;
use crate::game::map::DEATH_ROW;
use crate::game::state::{EntityId, PropId, SimulationState};

/// Maximum displacement per atomic sub-step, in tile units.
pub const SUB_STEP: f32 = 0.25;

/// What a blocked move ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Obstacle {
    /// A static prop indexed in the tile map.
    Prop(PropId),
    /// Another live character.
    Character(EntityId),
}

/// Outcome of [`attempt_move`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveOutcome {
    /// Displacement fully applied.
    Moved,
    /// Crossed the left world boundary; position unchanged.
    BlockedByWorld,
    /// Reached the death row; the character was killed as a side effect and
    /// no further movement happens this call.
    FellOffBottom,
    /// Hit a static or mobile entity. Static hits snap position to the whole
    /// cell boundary on the moved axes; mobile hits leave it unchanged.
    BlockedByEntity(Obstacle),
}

impl MoveOutcome {
    /// True for any outcome other than a fully applied move.
    #[inline]
    pub fn is_blocked(&self) -> bool {
        !matches!(self, MoveOutcome::Moved)
    }
}

/// Attempt to displace `state.characters[idx]` by `(dx, dy)`.
///
/// The request is decomposed into sub-steps of at most [`SUB_STEP`] per axis,
/// `dx` first, then `dy`; the first blocking sub-step is propagated
/// immediately and stops the rest of the displacement. A dead character never
/// moves and reports [`MoveOutcome::BlockedByWorld`] without side effects.
///
/// Interaction rules fire inside the sub-steps: horizontal overlap with the
/// hero kills the hero, horizontal overlap of the hero with another character
/// kills the hero, and nothing else kills anything here.
pub fn attempt_move(state: &mut SimulationState, idx: usize, dx: f32, dy: f32) -> MoveOutcome {
    if state.characters[idx].dead {
        return MoveOutcome::BlockedByWorld;
    }

    let mut rem_x = dx;
    while rem_x.abs() > SUB_STEP {
        let step = SUB_STEP.copysign(rem_x);
        let outcome = sub_step(state, idx, step, 0.0);
        if outcome.is_blocked() {
            return outcome;
        }
        rem_x -= step;
    }

    let mut rem_y = dy;
    while rem_y.abs() > SUB_STEP {
        let step = SUB_STEP.copysign(rem_y);
        let outcome = sub_step(state, idx, rem_x, step);
        if outcome.is_blocked() {
            return outcome;
        }
        rem_x = 0.0;
        rem_y -= step;
    }

    sub_step(state, idx, rem_x, rem_y)
}

/// One atomic sub-step: world bound, death row, tile occupancy, then mobile
/// overlap, in that order.
fn sub_step(state: &mut SimulationState, idx: usize, dx: f32, dy: f32) -> MoveOutcome {
    let (nx, ny, w, h) = {
        let c = &state.characters[idx];
        (c.x + dx, c.y + dy, c.w, c.h)
    };

    // 1. Left world boundary
    if nx < 0.0 {
        return MoveOutcome::BlockedByWorld;
    }

    // 2. Death row
    if ny >= DEATH_ROW as f32 {
        kill(state, idx);
        return MoveOutcome::FellOffBottom;
    }

    // 3. Tile occupancy over the destination rectangle
    for cx in (nx.floor() as i32)..(nx.ceil() as i32 + w as i32) {
        for cy in (ny.floor() as i32)..(ny.ceil() as i32 + h as i32) {
            if let Some(prop) = state.map.occupant_at(cx, cy) {
                let c = &mut state.characters[idx];
                if dx != 0.0 {
                    c.x = (c.x + dx).round();
                }
                if dy != 0.0 {
                    c.y = (c.y + dy).round();
                }
                return MoveOutcome::BlockedByEntity(Obstacle::Prop(prop));
            }
        }
    }

    // 4. Bounding-box overlap with every other live character
    let (mover_is_hero, w_f, h_f) = {
        let c = &state.characters[idx];
        (c.is_hero(), c.w as f32, c.h as f32)
    };
    for other_idx in 0..state.characters.len() {
        if other_idx == idx {
            continue;
        }
        let other = &state.characters[other_idx];
        if other.dead {
            continue;
        }
        let (ox, oy) = (other.x, other.y);
        let (ow, oh) = (other.w as f32, other.h as f32);
        let x_hit = (nx >= ox && nx < ox + ow) || (nx + w_f >= ox && nx + w_f < ox + ow);
        let y_hit = (ny >= oy && ny < oy + oh) || (ny + h_f >= oy && ny + h_f < oy + oh);
        if x_hit && y_hit {
            let other_id = other.id;
            let other_is_hero = other.is_hero();
            if dx != 0.0 {
                // Side bump kills the hero, never a non-hero
                if other_is_hero {
                    kill(state, other_idx);
                } else if mover_is_hero {
                    kill(state, idx);
                }
            }
            return MoveOutcome::BlockedByEntity(Obstacle::Character(other_id));
        }
    }

    let c = &mut state.characters[idx];
    c.x = nx;
    c.y = ny;
    MoveOutcome::Moved
}
