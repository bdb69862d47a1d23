//! Character Behavior
//!
//! The per-entity state machine: gravity and fall state, stomp/bump/push
//! interaction handling, the death sequence, and the two controllers layered
//! on top (input-driven hero, autonomous goomba). All functions mutate the
//! shared [`SimulationState`] and address characters by index, since a
//! character's own move can kill a sibling.

use crate::game::catalog::EntityKind;
use crate::game::events::SoundCue;
use crate::game::input::KeyState;
use crate::game::movement::{attempt_move, MoveOutcome, Obstacle};
use crate::game::state::{AnimState, SimulationState};

/// Gravity accumulation, tile units per second squared.
pub const GRAVITY: f32 = 65.0;

/// Upward impulse applied on jump and on the hero's post-death arc.
pub const JUMP_IMPULSE: f32 = -25.0;

/// Hero walk speed in tile units per second (before the shift multiplier).
const HERO_WALK_SPEED: f32 = 6.0;

/// Delay before the hero's post-death arc starts, in simulated seconds.
const HERO_DEATH_ARC_DELAY: f32 = 0.5;

/// Kill a character: start its death sequence and play the matching cue.
///
/// Idempotent; a dead character stays exactly as it was. The hero gets a
/// distinct cue, stops the music, and receives the upward impulse for the
/// post-death arc.
pub fn kill(state: &mut SimulationState, idx: usize) {
    if state.characters[idx].dead {
        return;
    }
    let is_hero = state.characters[idx].is_hero();
    if is_hero {
        state.push_cue(SoundCue::MusicStop);
        state.push_cue(SoundCue::Die);
    } else {
        state.push_cue(SoundCue::Stomp);
    }
    let c = &mut state.characters[idx];
    c.death_timer = 0.0;
    c.anim_state = AnimState::Die;
    c.dead = true;
    if is_hero {
        c.fall_acceleration = JUMP_IMPULSE;
    }
}

/// Advance one character by `dt`: death sequencing for the dead, gravity and
/// controller behavior for the living.
pub fn update_character(state: &mut SimulationState, idx: usize, keys: &KeyState, dt: f32) {
    if state.characters[idx].dead {
        advance_death(state, idx, dt);
        return;
    }

    apply_gravity(state, idx, dt);
    // Gravity can kill (death row, side effects of the fall); the controller
    // only runs for the living.
    if state.characters[idx].dead {
        return;
    }

    match state.characters[idx].kind {
        EntityKind::Hero => update_hero(state, idx, keys, dt),
        EntityKind::Goomba => update_goomba(state, idx, dt),
        _ => {}
    }
}

/// Gravity step: attempt the downward move and react to the outcome.
fn apply_gravity(state: &mut SimulationState, idx: usize, dt: f32) {
    let acc = state.characters[idx].fall_acceleration;
    let outcome = attempt_move(state, idx, 0.0, (acc + 1.0) * dt);

    match outcome {
        MoveOutcome::Moved => {
            let c = &mut state.characters[idx];
            c.fall_acceleration += GRAVITY * dt;
            c.falling = true;
            c.anim_state = AnimState::Falling;
        }
        MoveOutcome::FellOffBottom => {
            // Already killed; no further reaction this call.
        }
        outcome if acc < 0.0 => {
            // Hit something from below while moving up
            state.push_cue(SoundCue::Bump);
            state.characters[idx].fall_acceleration = 0.0;
            if let MoveOutcome::BlockedByEntity(Obstacle::Prop(prop)) = outcome {
                state.props[prop.0 as usize].push();
            }
        }
        outcome => {
            // Landed
            let c = &mut state.characters[idx];
            c.fall_acceleration = 0.0;
            c.falling = false;
            c.anim_state = AnimState::Idle;
            if let MoveOutcome::BlockedByEntity(Obstacle::Character(id)) = outcome {
                if let Some(other_idx) = state.characters.iter().position(|c| c.id == id) {
                    kill(state, other_idx);
                }
            }
        }
    }
}

/// Death sequence: tick the timer; the hero additionally plays an
/// upward-then-falling arc after a short delay, bypassing collision.
fn advance_death(state: &mut SimulationState, idx: usize, dt: f32) {
    let is_hero = state.characters[idx].is_hero();
    let c = &mut state.characters[idx];
    c.anim_state = AnimState::Die;
    c.death_timer += dt;
    if is_hero && c.death_timer > HERO_DEATH_ARC_DELAY {
        c.y += c.fall_acceleration * dt;
        c.fall_acceleration += GRAVITY * dt;
    }
}

/// Hero controller: jump, shift run modifier, horizontal walking.
fn update_hero(state: &mut SimulationState, idx: usize, keys: &KeyState, dt: f32) {
    if keys.jump && !state.characters[idx].falling {
        state.characters[idx].fall_acceleration = JUMP_IMPULSE;
        state.push_cue(SoundCue::Jump);
    }

    let speed = if keys.shift { 2.0 } else { 1.0 };
    state.characters[idx].animation_speed = speed;

    if keys.left {
        state.characters[idx].direction = -1;
        let outcome = attempt_move(state, idx, -HERO_WALK_SPEED * speed * dt, 0.0);
        set_walk_state(state, idx, outcome);
    } else if keys.right {
        state.characters[idx].direction = 1;
        let outcome = attempt_move(state, idx, HERO_WALK_SPEED * speed * dt, 0.0);
        set_walk_state(state, idx, outcome);
    } else {
        state.characters[idx].anim_state = AnimState::Idle;
    }

    let c = &mut state.characters[idx];
    if c.falling {
        c.anim_state = AnimState::Falling;
    }
}

fn set_walk_state(state: &mut SimulationState, idx: usize, outcome: MoveOutcome) {
    state.characters[idx].anim_state = if outcome.is_blocked() {
        AnimState::Idle
    } else {
        AnimState::Run
    };
}

/// Goomba controller: fixed-speed patrol, reversing on any blockage.
fn update_goomba(state: &mut SimulationState, idx: usize, dt: f32) {
    state.characters[idx].anim_state = AnimState::Run;
    if state.characters[idx].falling {
        return;
    }
    let dir = state.characters[idx].walk_dir;
    if attempt_move(state, idx, dir * dt, 0.0).is_blocked() {
        state.characters[idx].walk_dir = -dir;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::EntityId;

    /// Ground row of stone across the given columns at row `y`.
    fn lay_ground(state: &mut SimulationState, y: f32, cols: std::ops::Range<u32>) {
        for x in cols {
            state.add_prop(EntityKind::Stone, x as f32, y).unwrap();
        }
    }

    fn settled_hero(x: f32, y: f32) -> SimulationState {
        let mut state = SimulationState::new();
        lay_ground(&mut state, y + 1.0, 0..40);
        state.spawn_character(EntityKind::Hero, x, y);
        // One update settles the fall state onto the ground
        update_character(&mut state, 0, &KeyState::new(), 0.016);
        state.take_cues();
        state
    }

    #[test]
    fn test_fall_accumulates_gravity() {
        let mut state = SimulationState::new();
        state.spawn_character(EntityKind::Goomba, 5.0, 5.0);

        let dt = 0.016;
        update_character(&mut state, 0, &KeyState::new(), dt);
        let c = &state.characters[0];
        assert!(c.falling);
        // Goomba overrides the airborne anim state with Run while alive
        assert_eq!(c.anim_state, AnimState::Run);
        assert!((c.fall_acceleration - GRAVITY * dt).abs() < 1e-4);
        assert!(c.y > 5.0);
    }

    #[test]
    fn test_landing_zeroes_acceleration() {
        let mut state = SimulationState::new();
        lay_ground(&mut state, 11.0, 0..20);
        state.spawn_character(EntityKind::Hero, 5.0, 10.0);

        update_character(&mut state, 0, &KeyState::new(), 0.016);
        let c = &state.characters[0];
        assert!(!c.falling);
        assert_eq!(c.fall_acceleration, 0.0);
        assert_eq!(c.anim_state, AnimState::Idle);
        assert_eq!(c.y, 10.0);
    }

    #[test]
    fn test_jump_and_bump_pushes_block() {
        let mut state = SimulationState::new();
        lay_ground(&mut state, 11.0, 0..20);
        // Bricks one tile above the hero's head
        state.add_prop(EntityKind::Bricks, 5.0, 8.0).unwrap();
        state.spawn_character(EntityKind::Hero, 5.0, 10.0);

        // Settle, then jump
        update_character(&mut state, 0, &KeyState::new(), 0.016);
        let jump_keys = KeyState {
            jump: true,
            ..KeyState::new()
        };
        update_character(&mut state, 0, &jump_keys, 0.016);
        assert_eq!(state.characters[0].fall_acceleration, JUMP_IMPULSE);
        assert!(state.take_cues().contains(&SoundCue::Jump));

        // Rise until the head hits the bricks
        let mut bumped = false;
        for _ in 0..40 {
            update_character(&mut state, 0, &KeyState::new(), 0.016);
            let cues = state.take_cues();
            if cues.contains(&SoundCue::Bump) {
                bumped = true;
                break;
            }
        }
        assert!(bumped, "rising hero should bump the bricks");
        assert_eq!(state.characters[0].fall_acceleration, 0.0);
        let bricks = state.props.iter().find(|p| p.kind == EntityKind::Bricks);
        assert!(bricks.unwrap().push_t > 0.0, "bricks should be pushed");
    }

    #[test]
    fn test_bump_on_plain_block_plays_cue_without_push() {
        let mut state = SimulationState::new();
        state.add_prop(EntityKind::Block, 5.0, 8.0).unwrap();
        state.spawn_character(EntityKind::Hero, 5.0, 9.05);
        state.characters[0].fall_acceleration = JUMP_IMPULSE;

        update_character(&mut state, 0, &KeyState::new(), 0.016);
        assert!(state.take_cues().contains(&SoundCue::Bump));
        assert_eq!(state.props[0].push_t, 0.0);
    }

    #[test]
    fn test_stomp_kills_goomba_not_hero() {
        let mut state = SimulationState::new();
        lay_ground(&mut state, 12.0, 0..20);
        state.spawn_character(EntityKind::Goomba, 5.0, 11.0);
        state.spawn_character(EntityKind::Hero, 5.0, 9.5);
        // Hero descending
        state.characters[1].fall_acceleration = 10.0;

        let mut stomped = false;
        for _ in 0..30 {
            update_character(&mut state, 1, &KeyState::new(), 0.016);
            if state.characters[0].dead {
                stomped = true;
                break;
            }
        }
        assert!(stomped, "falling hero should stomp the goomba");
        assert!(!state.characters[1].dead);
        assert!(state.take_cues().contains(&SoundCue::Stomp));
        // Hero landed on it
        assert!(!state.characters[1].falling);
        assert_eq!(state.characters[1].fall_acceleration, 0.0);
    }

    #[test]
    fn test_hero_walks_and_reports_run_state() {
        let mut state = settled_hero(5.0, 10.0);
        let keys = KeyState {
            right: true,
            ..KeyState::new()
        };
        update_character(&mut state, 0, &keys, 0.016);
        let c = &state.characters[0];
        assert_eq!(c.anim_state, AnimState::Run);
        assert_eq!(c.direction, 1);
        assert!(c.x > 5.0);
    }

    #[test]
    fn test_hero_blocked_walk_reports_idle() {
        let mut state = SimulationState::new();
        lay_ground(&mut state, 11.0, 0..20);
        state.add_prop(EntityKind::Block, 6.0, 10.0).unwrap();
        state.spawn_character(EntityKind::Hero, 5.0, 10.0);
        update_character(&mut state, 0, &KeyState::new(), 0.016);

        let keys = KeyState {
            right: true,
            ..KeyState::new()
        };
        update_character(&mut state, 0, &keys, 0.016);
        assert_eq!(state.characters[0].anim_state, AnimState::Idle);
        assert_eq!(state.characters[0].x, 5.0);
    }

    #[test]
    fn test_shift_doubles_speed_and_animation() {
        let mut walked = settled_hero(5.0, 10.0);
        let mut ran = settled_hero(5.0, 10.0);
        let dt = 0.016;

        let walk_keys = KeyState {
            right: true,
            ..KeyState::new()
        };
        let run_keys = KeyState {
            right: true,
            shift: true,
            ..KeyState::new()
        };
        update_character(&mut walked, 0, &walk_keys, dt);
        update_character(&mut ran, 0, &run_keys, dt);

        let slow = walked.characters[0].x - 5.0;
        let fast = ran.characters[0].x - 5.0;
        assert!((fast - 2.0 * slow).abs() < 1e-4);
        assert_eq!(ran.characters[0].animation_speed, 2.0);
    }

    #[test]
    fn test_hero_cannot_jump_midair() {
        let mut state = SimulationState::new();
        state.spawn_character(EntityKind::Hero, 5.0, 5.0);
        // Airborne after one update
        update_character(&mut state, 0, &KeyState::new(), 0.016);
        state.take_cues();

        let acc_before = state.characters[0].fall_acceleration;
        let keys = KeyState {
            jump: true,
            ..KeyState::new()
        };
        update_character(&mut state, 0, &keys, 0.016);
        assert!(state.characters[0].fall_acceleration > acc_before);
        assert!(!state.take_cues().contains(&SoundCue::Jump));
    }

    #[test]
    fn test_goomba_reverses_on_block() {
        let mut state = SimulationState::new();
        lay_ground(&mut state, 11.0, 0..20);
        state.add_prop(EntityKind::Block, 6.0, 10.0).unwrap();
        state.spawn_character(EntityKind::Goomba, 4.5, 10.0);
        // Settle
        update_character(&mut state, 0, &KeyState::new(), 0.016);
        assert_eq!(state.characters[0].walk_dir, 1.0);

        // Walk into the block and reverse
        for _ in 0..200 {
            update_character(&mut state, 0, &KeyState::new(), 0.016);
            if state.characters[0].walk_dir < 0.0 {
                break;
            }
        }
        assert_eq!(state.characters[0].walk_dir, -1.0);
        assert_eq!(state.characters[0].anim_state, AnimState::Run);
    }

    #[test]
    fn test_kill_is_idempotent() {
        let mut state = SimulationState::new();
        state.spawn_character(EntityKind::Goomba, 5.0, 5.0);

        kill(&mut state, 0);
        assert_eq!(state.take_cues(), vec![SoundCue::Stomp]);

        state.characters[0].death_timer = 1.5;
        kill(&mut state, 0);
        assert!(state.take_cues().is_empty());
        assert_eq!(state.characters[0].death_timer, 1.5);
    }

    #[test]
    fn test_hero_death_cues_and_arc() {
        let mut state = SimulationState::new();
        state.spawn_character(EntityKind::Hero, 5.0, 10.0);

        kill(&mut state, 0);
        assert_eq!(state.take_cues(), vec![SoundCue::MusicStop, SoundCue::Die]);
        assert_eq!(state.characters[0].fall_acceleration, JUMP_IMPULSE);

        // No arc during the initial delay
        update_character(&mut state, 0, &KeyState::new(), 0.3);
        assert_eq!(state.characters[0].y, 10.0);

        // Past the delay the hero rises, then gravity takes over
        update_character(&mut state, 0, &KeyState::new(), 0.3);
        assert!(state.characters[0].y < 10.0);

        let mut state2 = state.clone();
        for _ in 0..20 {
            update_character(&mut state2, 0, &KeyState::new(), 0.1);
        }
        assert!(
            state2.characters[0].y > state.characters[0].y,
            "arc falls back down"
        );
    }

    #[test]
    fn test_death_timer_advances_only_while_dead() {
        let mut state = SimulationState::new();
        state.spawn_character(EntityKind::Goomba, 5.0, 5.0);
        update_character(&mut state, 0, &KeyState::new(), 0.016);
        assert_eq!(state.characters[0].death_timer, 0.0);

        kill(&mut state, 0);
        update_character(&mut state, 0, &KeyState::new(), 0.5);
        update_character(&mut state, 0, &KeyState::new(), 0.5);
        let c = &state.characters[0];
        assert!((c.death_timer - 1.0).abs() < 1e-5);
        assert_eq!(c.anim_state, AnimState::Die);
        // Dead goombas do not patrol
        assert_eq!(c.x, 5.0);
    }

    #[test]
    fn test_stomped_character_lookup_by_id() {
        let mut state = SimulationState::new();
        state.spawn_character(EntityKind::Goomba, 5.0, 5.0);
        assert_eq!(state.characters[0].id, EntityId(0));
    }
}
