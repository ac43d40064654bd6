//! Parent/child hierarchy traversal.

use crate::constants::MAX_RESOLUTION;
use crate::error::GeoHexError;
use crate::index::validity::{is_pentagon, is_valid_cell};
use crate::math::ipow;
use crate::types::{Direction, HexIndex, NULL_INDEX};

/// Whether `child_res` is a valid child resolution for the cell (every
/// resolution is a child resolution of itself).
fn has_child_at_res(parent: HexIndex, child_res: i32) -> bool {
  (parent.resolution()..=MAX_RESOLUTION).contains(&child_res)
}

/// Parent of a cell at a coarser (or equal) resolution.
pub fn cell_to_parent(cell: HexIndex, parent_res: i32) -> Result<HexIndex, GeoHexError> {
  if !is_valid_cell(cell) {
    return Err(GeoHexError::CellInvalid);
  }
  let child_res = cell.resolution();
  if !(0..=child_res).contains(&parent_res) {
    return Err(GeoHexError::ResDomain);
  }
  if parent_res == child_res {
    return Ok(cell);
  }

  let mut parent = cell;
  parent.set_resolution(parent_res);
  for r in (parent_res + 1)..=child_res {
    parent.set_digit(r, Direction::Invalid);
  }
  Ok(parent)
}

/// Exact number of children of a cell at a finer resolution. Pentagons
/// have `1 + 5 * (7^n - 1) / 6` children instead of `7^n`.
pub fn cell_children_count(cell: HexIndex, child_res: i32) -> Result<i64, GeoHexError> {
  if !is_valid_cell(cell) {
    return Err(GeoHexError::CellInvalid);
  }
  if !has_child_at_res(cell, child_res) {
    return Err(GeoHexError::ResDomain);
  }

  let n = i64::from(child_res - cell.resolution());
  if is_pentagon(cell) {
    Ok(1 + 5 * (ipow(7, n) - 1) / 6)
  } else {
    Ok(ipow(7, n))
  }
}

/// The child at the parent's center at the given finer resolution.
pub fn cell_to_center_child(cell: HexIndex, child_res: i32) -> Result<HexIndex, GeoHexError> {
  if !is_valid_cell(cell) {
    return Err(GeoHexError::CellInvalid);
  }
  if !has_child_at_res(cell, child_res) {
    return Err(GeoHexError::ResDomain);
  }

  let parent_res = cell.resolution();
  let mut child = cell;
  child.set_resolution(child_res);
  for r in (parent_res + 1)..=child_res {
    child.set_digit(r, Direction::Center);
  }
  Ok(child)
}

/// Iterator over all children of a parent cell at a fixed resolution, in
/// index order. Skips the deleted k-axes subsequences under pentagons.
pub(crate) struct CellChildIter {
  h: HexIndex,
  parent_res: i32,
  // Resolution whose digit must skip the k-axes value, walking coarser as
  // the iteration progresses; -1 outside pentagon subtrees.
  skip_digit: i32,
}

impl CellChildIter {
  /// Creates the iterator. The caller validates `parent` and `child_res`.
  pub(crate) fn new(parent: HexIndex, child_res: i32) -> Self {
    let parent_res = parent.resolution();
    let mut h = parent;
    h.set_resolution(child_res);
    for r in (parent_res + 1)..=child_res {
      h.set_digit(r, Direction::Center);
    }

    let skip_digit = if is_pentagon(h) { child_res } else { -1 };
    Self { h, parent_res, skip_digit }
  }

  /// Adds one to the digit at `res`, letting the carry ripple into coarser
  /// digits.
  fn increment_digit(&mut self, res: i32) {
    self.h.0 += 1u64 << ((MAX_RESOLUTION - res) as u64 * 3);
  }

  fn step(&mut self) {
    let child_res = self.h.resolution();
    self.increment_digit(child_res);

    let mut res = child_res;
    loop {
      if res == self.parent_res {
        // The carry reached the parent digit: iteration complete.
        self.h = NULL_INDEX;
        return;
      }
      if res == self.skip_digit && self.h.digit(res) == Direction::KAxes {
        // Children of a pentagon never have a leading k-axes digit; skip
        // it. The incremented digit is valid, so the step is complete.
        self.increment_digit(res);
        self.skip_digit -= 1;
        return;
      }
      if self.h.digit(res) == Direction::Invalid {
        // Roll the sentinel over to zero, carrying into the next digit.
        self.increment_digit(res);
      } else {
        return;
      }
      res -= 1;
    }
  }
}

impl Iterator for CellChildIter {
  type Item = HexIndex;

  fn next(&mut self) -> Option<HexIndex> {
    if self.h == NULL_INDEX {
      return None;
    }
    let current = self.h;
    self.step();
    Some(current)
  }
}

/// Fills `children` with all children of `cell` at `child_res`, returning
/// the number written.
pub fn cell_to_children(
  cell: HexIndex,
  child_res: i32,
  children: &mut [HexIndex],
) -> Result<usize, GeoHexError> {
  let expected = cell_children_count(cell, child_res)? as usize;
  if children.len() < expected {
    return Err(GeoHexError::BufferTooSmall);
  }

  let mut count = 0;
  for child in CellChildIter::new(cell, child_res) {
    children[count] = child;
    count += 1;
  }
  debug_assert_eq!(count, expected);
  Ok(count)
}

/// Allocating form of [`cell_to_children`].
pub fn cell_to_children_vec(cell: HexIndex, child_res: i32) -> Result<Vec<HexIndex>, GeoHexError> {
  let expected = cell_children_count(cell, child_res)? as usize;
  let mut children = vec![NULL_INDEX; expected];
  let count = cell_to_children(cell, child_res, &mut children)?;
  children.truncate(count);
  Ok(children)
}

/// Position of a child within the ordered child list of its ancestor at
/// `parent_res`.
pub fn cell_to_child_pos(child: HexIndex, parent_res: i32) -> Result<i64, GeoHexError> {
  let child_res = child.resolution();
  let parent = cell_to_parent(child, parent_res)?;
  if child_res == parent_res {
    return Ok(0);
  }

  let mut pos: i64 = 0;
  for res in (parent_res + 1)..=child_res {
    // Whether the ancestor one level up from this digit is a pentagon.
    let ancestor = cell_to_parent(child, res - 1)?;
    let hex_child_count = ipow(7, i64::from(child_res - res));
    let digit = child.digit(res);

    if is_pentagon(ancestor) {
      match digit {
        Direction::Center => {}
        Direction::KAxes => return Err(GeoHexError::CellInvalid),
        _ => {
          // Skip the pentagon-sized center subtree, then the hexagon
          // subtrees of the digits before this one (digit 1 is absent).
          pos += 1 + 5 * (hex_child_count - 1) / 6;
          pos += (digit as i64 - 2) * hex_child_count;
        }
      }
    } else {
      pos += digit as i64 * hex_child_count;
    }
  }
  Ok(pos)
}

/// The child at a given position within the ordered child list of a
/// parent.
pub fn child_pos_to_cell(
  child_pos: i64,
  parent: HexIndex,
  child_res: i32,
) -> Result<HexIndex, GeoHexError> {
  if !(0..=MAX_RESOLUTION).contains(&child_res) {
    return Err(GeoHexError::ResDomain);
  }
  let parent_res = parent.resolution();
  if child_res < parent_res {
    return Err(GeoHexError::ResMismatch);
  }
  if !is_valid_cell(parent) {
    return Err(GeoHexError::CellInvalid);
  }
  let max_count = cell_children_count(parent, child_res)?;
  if !(0..max_count).contains(&child_pos) {
    return Err(GeoHexError::Domain);
  }

  let mut child = parent;
  child.set_resolution(child_res);

  let mut idx = child_pos;
  let mut within_pentagon = is_pentagon(parent);

  for res in (parent_res + 1)..=child_res {
    let hex_child_count = ipow(7, i64::from(child_res - res));
    if within_pentagon {
      let pent_child_count = 1 + 5 * (hex_child_count - 1) / 6;
      if idx < pent_child_count {
        child.set_digit(res, Direction::Center);
      } else {
        idx -= pent_child_count;
        within_pentagon = false;
        child.set_digit(res, Direction::from_digit((idx / hex_child_count + 2) as u8));
        idx %= hex_child_count;
      }
    } else {
      child.set_digit(res, Direction::from_digit((idx / hex_child_count) as u8));
      idx %= hex_child_count;
    }
  }
  Ok(child)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::index::make_cell_index;

  #[test]
  fn parent_of_known_cell() {
    let sf = crate::indexing::geo_to_cell(&crate::types::LatLng::from_degrees(37.779, -122.419), 10)
      .unwrap();
    let parent9 = cell_to_parent(sf, 9).unwrap();
    assert_eq!(parent9.resolution(), 9);
    let parent5 = cell_to_parent(sf, 5).unwrap();
    assert_eq!(parent5, HexIndex(0x85283083fffffff));

    assert_eq!(cell_to_parent(sf, 10), Ok(sf));
    assert_eq!(cell_to_parent(sf, 11), Err(GeoHexError::ResDomain));
    assert_eq!(cell_to_parent(sf, -1), Err(GeoHexError::ResDomain));
    assert_eq!(cell_to_parent(NULL_INDEX, 5), Err(GeoHexError::CellInvalid));
  }

  #[test]
  fn children_counts() {
    let hex = make_cell_index(5, 10, Direction::Center);
    assert_eq!(cell_children_count(hex, 5), Ok(1));
    assert_eq!(cell_children_count(hex, 6), Ok(7));
    assert_eq!(cell_children_count(hex, 7), Ok(49));
    assert_eq!(cell_children_count(hex, 4), Err(GeoHexError::ResDomain));

    let pent = make_cell_index(5, 4, Direction::Center);
    assert!(is_pentagon(pent));
    assert_eq!(cell_children_count(pent, 5), Ok(1));
    assert_eq!(cell_children_count(pent, 6), Ok(6));
    assert_eq!(cell_children_count(pent, 7), Ok(41));
  }

  #[test]
  fn center_child_digits() {
    let cell = make_cell_index(5, 10, Direction::IjAxes);
    let center6 = cell_to_center_child(cell, 6).unwrap();
    assert_eq!(center6.resolution(), 6);
    assert_eq!(center6.digit(6), Direction::Center);
    for r in 1..=5 {
      assert_eq!(center6.digit(r), cell.digit(r));
    }
    assert_eq!(cell_to_center_child(cell, 5), Ok(cell));
  }

  #[test]
  fn children_of_hexagon() {
    let parent = HexIndex(0x85283473fffffff);
    let children = cell_to_children_vec(parent, 7).unwrap();
    assert_eq!(children.len(), 49);
    for &child in &children {
      assert!(is_valid_cell(child));
      assert_eq!(cell_to_parent(child, 5), Ok(parent));
    }
    // Children are produced in strictly increasing index order.
    assert!(children.windows(2).all(|w| w[0] < w[1]));
    // The center child is present.
    assert!(children.contains(&cell_to_center_child(parent, 7).unwrap()));
  }

  #[test]
  fn children_of_pentagon() {
    let parent = HexIndex(0x8009fffffffffff);
    assert!(is_pentagon(parent));
    let children = cell_to_children_vec(parent, 2).unwrap();
    assert_eq!(children.len() as i64, cell_children_count(parent, 2).unwrap());
    for &child in &children {
      assert!(is_valid_cell(child), "pentagon child {child:x} is valid");
      assert_eq!(cell_to_parent(child, 0), Ok(parent));
    }
  }

  #[test]
  fn children_buffer_too_small() {
    let parent = HexIndex(0x85283473fffffff);
    let mut buf = [NULL_INDEX; 6];
    assert_eq!(cell_to_children(parent, 6, &mut buf), Err(GeoHexError::BufferTooSmall));
  }

  #[test]
  fn child_pos_round_trip_hexagon() {
    let parent = make_cell_index(2, 10, Direction::Center);
    let children = cell_to_children_vec(parent, 4).unwrap();
    for (expected_pos, &child) in children.iter().enumerate() {
      let pos = cell_to_child_pos(child, 2).unwrap();
      assert_eq!(pos, expected_pos as i64);
      assert_eq!(child_pos_to_cell(pos, parent, 4), Ok(child));
    }
  }

  #[test]
  fn child_pos_round_trip_pentagon() {
    let parent = make_cell_index(1, 4, Direction::Center);
    assert!(is_pentagon(parent));
    let children = cell_to_children_vec(parent, 3).unwrap();
    for (expected_pos, &child) in children.iter().enumerate() {
      let pos = cell_to_child_pos(child, 1).unwrap();
      assert_eq!(pos, expected_pos as i64, "pentagon child {child:x}");
      assert_eq!(child_pos_to_cell(pos, parent, 3), Ok(child));
    }
  }

  #[test]
  fn child_pos_domain_errors() {
    let parent = make_cell_index(5, 10, Direction::Center);
    assert_eq!(child_pos_to_cell(-1, parent, 6), Err(GeoHexError::Domain));
    assert_eq!(child_pos_to_cell(7, parent, 6), Err(GeoHexError::Domain));
    assert_eq!(child_pos_to_cell(0, parent, 4), Err(GeoHexError::ResMismatch));
    assert_eq!(child_pos_to_cell(0, parent, 16), Err(GeoHexError::ResDomain));
  }
}
