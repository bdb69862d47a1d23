//! Camera Scroll
//!
//! Deadzone-based horizontal scroll offset tracking the hero. The hero can
//! roam between 8 and 10 tile units from the left edge of the viewport before
//! the camera follows; the offset never goes below zero.

/// Far edge of the deadzone: scroll right once the hero is past it.
const DEADZONE_FAR: f32 = 10.0;

/// Near edge of the deadzone: scroll left once the hero is before it.
const DEADZONE_NEAR: f32 = 8.0;

/// Horizontal scroll position exposed to the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraScroll {
    left: f32,
}

impl CameraScroll {
    /// Camera at the level origin.
    pub const fn new() -> Self {
        Self { left: 0.0 }
    }

    /// Follow the hero's column position.
    pub fn update(&mut self, hero_x: f32) {
        let x = hero_x - self.left;
        if x > DEADZONE_FAR {
            self.left = hero_x - DEADZONE_FAR;
        }
        if x < DEADZONE_NEAR {
            self.left = (hero_x - DEADZONE_NEAR).max(0.0);
        }
    }

    /// Current scroll offset in tile units, never negative.
    #[inline]
    pub fn offset(&self) -> f32 {
        self.left
    }
}
