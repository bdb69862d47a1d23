//! Tile Occupancy Map
//!
//! Fixed-size grid recording which cell is covered by which static prop. The
//! map is a lookup index, not an owner: props live in
//! [`SimulationState`](crate::game::state::SimulationState) and never move
//! after registration.

use thiserror::Error;

use crate::game::state::PropId;

/// Grid width in columns.
pub const MAP_WIDTH: u32 = 100;

/// Usable rows. Row [`DEATH_ROW`] below them kills anything that reaches it.
pub const USABLE_ROWS: u32 = 19;

/// First row at which a falling character dies.
pub const DEATH_ROW: u32 = 19;

/// Total grid height (usable rows plus the death row).
pub const MAP_HEIGHT: u32 = USABLE_ROWS + 1;

/// Registration of a static prop outside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("static entity rectangle ({x},{y}) {w}x{h} exceeds the {MAP_WIDTH}x{MAP_HEIGHT} grid")]
pub struct OutOfBoundsError {
    /// Left column of the rejected rectangle.
    pub x: i32,
    /// Top row of the rejected rectangle.
    pub y: i32,
    /// Width in cells.
    pub w: u32,
    /// Height in cells.
    pub h: u32,
}

/// Grid of optional prop references, one per cell.
#[derive(Clone, Debug)]
pub struct TileMap {
    cells: Vec<Option<PropId>>,
}

impl TileMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            cells: vec![None; (MAP_WIDTH * MAP_HEIGHT) as usize],
        }
    }

    /// Mark every cell in the rectangle as occupied by `prop`.
    ///
    /// Fails if the rectangle does not fit inside the grid; level data is
    /// rejected at load, never at runtime.
    pub fn register(
        &mut self,
        prop: PropId,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
    ) -> Result<(), OutOfBoundsError> {
        if x < 0 || y < 0 || x as u32 + w > MAP_WIDTH || y as u32 + h > MAP_HEIGHT {
            return Err(OutOfBoundsError { x, y, w, h });
        }
        let (x, y) = (x as u32, y as u32);
        for cy in y..y + h {
            for cx in x..x + w {
                self.cells[(cy * MAP_WIDTH + cx) as usize] = Some(prop);
            }
        }
        Ok(())
    }

    /// Prop occupying cell `(x, y)`, if any. Cells outside the grid are vacant.
    #[inline]
    pub fn occupant_at(&self, x: i32, y: i32) -> Option<PropId> {
        if x < 0 || y < 0 || x >= MAP_WIDTH as i32 || y >= MAP_HEIGHT as i32 {
            return None;
        }
        self.cells[(y as u32 * MAP_WIDTH + x as u32) as usize]
    }
}

impl Default for TileMap {
    fn default() -> Self {
        Self::new()
    }
}
