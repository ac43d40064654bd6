//! Bit-pattern validation for the three index modes.

use crate::base_cells::is_base_cell_pentagon;
use crate::constants::{
  CELL_MODE, DIRECTED_EDGE_MODE, MAX_RESOLUTION, NUM_BASE_CELLS, PER_DIGIT_OFFSET, VERTEX_MODE,
};
use crate::types::{Direction, HexIndex};

/// Whether the index is a valid cell index.
///
/// Checks the reserved bit, mode, mode-dependent bits, base cell range,
/// digit ranges (in-range digits in 0..=6, digits past the resolution all
/// 7) and the pentagon deleted-subsequence rule: a pentagon cell may not
/// have the k-axes digit as its leading non-zero digit.
#[must_use]
pub fn is_valid_cell(h: HexIndex) -> bool {
  if h.high_bit() != 0 || h.mode() != CELL_MODE || h.mode_dependent() != 0 {
    return false;
  }

  let base_cell = h.base_cell();
  if !(0..NUM_BASE_CELLS).contains(&base_cell) {
    return false;
  }

  let res = h.resolution();

  for r in 1..=res {
    if h.digit(r) == Direction::Invalid {
      return false;
    }
  }
  if !digits_past_res_are_sentinel(h, res) {
    return false;
  }

  if is_base_cell_pentagon(base_cell) && h.leading_non_zero_digit() == Direction::KAxes {
    return false;
  }

  true
}

/// Whether all digits beyond `res` hold the sentinel value 7.
fn digits_past_res_are_sentinel(h: HexIndex, res: i32) -> bool {
  if res >= MAX_RESOLUTION {
    return true;
  }
  let unused_bits = ((MAX_RESOLUTION - res) as u64) * PER_DIGIT_OFFSET;
  let unused_mask = (1u64 << unused_bits) - 1;
  h.0 & unused_mask == unused_mask
}

/// Whether the index is a valid directed edge index: edge direction in
/// 1..=6, not the deleted direction of a pentagon origin, and a valid
/// origin cell underneath.
#[must_use]
pub fn is_valid_directed_edge(h: HexIndex) -> bool {
  if h.mode() != DIRECTED_EDGE_MODE {
    return false;
  }

  let direction = Direction::from_digit(h.mode_dependent());
  if direction == Direction::Center || direction == Direction::Invalid {
    return false;
  }

  let mut origin = h;
  origin.set_mode(CELL_MODE);
  origin.set_mode_dependent(0);
  if !is_valid_cell(origin) {
    return false;
  }

  !(crate::index::validity::cell_is_pentagon(origin) && direction == Direction::KAxes)
}

/// Whether the index is a valid vertex index: vertex number 0..=5 (0..=4
/// for a pentagon owner) over a valid owner cell.
#[must_use]
pub fn is_valid_vertex(h: HexIndex) -> bool {
  if h.mode() != VERTEX_MODE {
    return false;
  }

  let vertex_num = h.mode_dependent();
  if vertex_num > 5 {
    return false;
  }

  let mut owner = h;
  owner.set_mode(CELL_MODE);
  owner.set_mode_dependent(0);
  if !is_valid_cell(owner) {
    return false;
  }

  !(cell_is_pentagon(owner) && vertex_num > 4)
}

/// Whether a valid cell index addresses a pentagon: its base cell is a
/// pentagon and every digit is center.
#[must_use]
pub fn is_pentagon(h: HexIndex) -> bool {
  h.mode() == CELL_MODE
    && is_base_cell_pentagon(h.base_cell())
    && h.leading_non_zero_digit() == Direction::Center
}

/// Pentagon check without the mode guard, for internal callers that have
/// already stripped mode bits.
#[inline]
pub(crate) fn cell_is_pentagon(h: HexIndex) -> bool {
  is_base_cell_pentagon(h.base_cell()) && h.leading_non_zero_digit() == Direction::Center
}
