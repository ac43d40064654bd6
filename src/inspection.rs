//! Whole-grid inspection: cell counts, pentagon enumeration and class
//! predicates.

use crate::base_cells::is_base_cell_pentagon;
use crate::constants::{MAX_RESOLUTION, NUM_BASE_CELLS, NUM_PENTAGONS};
use crate::error::GeoHexError;
use crate::hierarchy::cell_to_center_child;
use crate::index::{base_cell_to_cell, is_resolution_class_iii};
use crate::math::ipow;
use crate::types::HexIndex;

/// Number of unique cells at a resolution: `2 + 120 * 7^res`.
pub fn num_cells(res: i32) -> Result<i64, GeoHexError> {
  if !(0..=MAX_RESOLUTION).contains(&res) {
    return Err(GeoHexError::ResDomain);
  }
  Ok(2 + 120 * ipow(7, i64::from(res)))
}

/// Number of pentagons at every resolution.
#[must_use]
pub fn pentagon_count() -> i32 {
  NUM_PENTAGONS
}

/// Fills `out` with the 12 pentagon cells at the given resolution.
pub fn pentagons(res: i32, out: &mut [HexIndex; 12]) -> Result<(), GeoHexError> {
  if !(0..=MAX_RESOLUTION).contains(&res) {
    return Err(GeoHexError::ResDomain);
  }
  let mut count = 0;
  for base_cell in 0..NUM_BASE_CELLS {
    if is_base_cell_pentagon(base_cell) {
      out[count] = cell_to_center_child(base_cell_to_cell(base_cell), res)?;
      count += 1;
    }
  }
  debug_assert_eq!(count, 12);
  Ok(())
}

/// Fills `out` with the 122 resolution 0 cells.
pub fn res0_cells(out: &mut [HexIndex; NUM_BASE_CELLS as usize]) {
  for (base_cell, slot) in out.iter_mut().enumerate() {
    *slot = base_cell_to_cell(base_cell as i32);
  }
}

/// Whether a cell's resolution uses the Class III grid orientation.
#[must_use]
pub fn is_res_class_iii(h: HexIndex) -> bool {
  is_resolution_class_iii(h.resolution())
}
