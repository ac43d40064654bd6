//! Compaction: replacing complete child sets by their parents, and the
//! inverse uncompaction.

use crate::error::GeoHexError;
use crate::hierarchy::{cell_children_count, cell_to_children, cell_to_parent};
use crate::index::validity::is_valid_cell;
use crate::types::{HexIndex, NULL_INDEX};

/// Exact number of cells produced by uncompacting `cells` to `res`.
///
/// Every input cell must be valid and at a resolution coarser than or
/// equal to `res`; [`NULL_INDEX`] entries are skipped.
pub fn uncompact_size(cells: &[HexIndex], res: i32) -> Result<i64, GeoHexError> {
  let mut count: i64 = 0;
  for &cell in cells {
    if cell == NULL_INDEX {
      continue;
    }
    if !is_valid_cell(cell) {
      return Err(GeoHexError::CellInvalid);
    }
    if cell.resolution() > res {
      return Err(GeoHexError::ResMismatch);
    }
    count = count.saturating_add(cell_children_count(cell, res)?);
  }
  Ok(count)
}

/// Expands each input cell to its children at `res`, writing them into
/// `out` and returning the number written.
pub fn uncompact(cells: &[HexIndex], res: i32, out: &mut [HexIndex]) -> Result<usize, GeoHexError> {
  let required = uncompact_size(cells, res)? as usize;
  if out.len() < required {
    return Err(GeoHexError::BufferTooSmall);
  }

  let mut write_pos = 0;
  for &cell in cells {
    if cell == NULL_INDEX {
      continue;
    }
    let count = cell_children_count(cell, res)? as usize;
    cell_to_children(cell, res, &mut out[write_pos..write_pos + count])?;
    write_pos += count;
  }
  Ok(write_pos)
}

/// Allocating form of [`uncompact`].
pub fn uncompact_vec(cells: &[HexIndex], res: i32) -> Result<Vec<HexIndex>, GeoHexError> {
  let required = uncompact_size(cells, res)? as usize;
  let mut out = vec![NULL_INDEX; required];
  let count = uncompact(cells, res, &mut out)?;
  out.truncate(count);
  Ok(out)
}

/// Compacts a cell set: wherever all children of a parent are present
/// they are replaced by the parent, repeatedly, up to resolution 0.
///
/// Operates entirely in the two caller-supplied buffers: `out` receives
/// the compacted set and must hold at least `cells.len()` entries;
/// `workspace` must be the same size. Returns the number of cells written
/// to `out`. Duplicate inputs are rejected.
pub fn compact(
  cells: &[HexIndex],
  out: &mut [HexIndex],
  workspace: &mut [HexIndex],
) -> Result<usize, GeoHexError> {
  if cells.is_empty() {
    return Ok(0);
  }
  if out.len() < cells.len() || workspace.len() < cells.len() {
    return Err(GeoHexError::BufferTooSmall);
  }

  let mut max_res = 0;
  for &cell in cells {
    if !is_valid_cell(cell) {
      return Err(GeoHexError::CellInvalid);
    }
    max_res = max_res.max(cell.resolution());
  }

  out[..cells.len()].copy_from_slice(cells);
  let mut len = cells.len();

  out[..len].sort_unstable();
  if out[..len].windows(2).any(|w| w[0] == w[1]) {
    return Err(GeoHexError::DuplicateInput);
  }

  // One pass per resolution, finest first. Sorting groups siblings into
  // contiguous runs, so a complete child set shows up as a run whose
  // length matches the parent's child count.
  for res in (1..=max_res).rev() {
    out[..len].sort_unstable();
    // Folding can surface a parent that was also in the input; such
    // hierarchical overlap is invalid.
    if out[..len].windows(2).any(|w| w[0] == w[1]) {
      return Err(GeoHexError::DuplicateInput);
    }

    let mut write_pos = 0;
    let mut read_pos = 0;
    while read_pos < len {
      let cell = out[read_pos];
      if cell.resolution() == res {
        let parent = cell_to_parent(cell, res - 1)?;
        let expected = cell_children_count(parent, res)? as usize;

        let mut run = 1;
        while read_pos + run < len
          && out[read_pos + run].resolution() == res
          && cell_to_parent(out[read_pos + run], res - 1)? == parent
        {
          run += 1;
        }

        if run == expected {
          workspace[write_pos] = parent;
          write_pos += 1;
        } else {
          workspace[write_pos..write_pos + run].copy_from_slice(&out[read_pos..read_pos + run]);
          write_pos += run;
        }
        read_pos += run;
      } else {
        workspace[write_pos] = cell;
        write_pos += 1;
        read_pos += 1;
      }
    }

    out[..write_pos].copy_from_slice(&workspace[..write_pos]);
    len = write_pos;
  }

  Ok(len)
}

/// Allocating form of [`compact`].
pub fn compact_vec(cells: &[HexIndex]) -> Result<Vec<HexIndex>, GeoHexError> {
  let mut out = vec![NULL_INDEX; cells.len()];
  let mut workspace = vec![NULL_INDEX; cells.len()];
  let count = compact(cells, &mut out, &mut workspace)?;
  out.truncate(count);
  Ok(out)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::hierarchy::cell_to_children_vec;
  use crate::index::validity::is_pentagon;

  #[test]
  fn uncompact_counts() {
    let cell = [HexIndex(0x85283473fffffff)];
    assert_eq!(uncompact_size(&cell, 5), Ok(1));
    assert_eq!(uncompact_size(&cell, 6), Ok(7));
    assert_eq!(uncompact_size(&cell, 7), Ok(49));
    assert_eq!(uncompact_size(&cell, 4), Err(GeoHexError::ResMismatch));
    assert_eq!(uncompact_size(&[NULL_INDEX], 5), Ok(0));

    let pentagon = [HexIndex(0x8009fffffffffff)];
    assert!(is_pentagon(pentagon[0]));
    assert_eq!(uncompact_size(&pentagon, 1), Ok(6));
    assert_eq!(uncompact_size(&pentagon, 2), Ok(41));
  }

  #[test]
  fn uncompact_matches_children() {
    let cell = HexIndex(0x85283473fffffff);
    let mut uncompacted = uncompact_vec(&[cell], 6).unwrap();
    let mut children = cell_to_children_vec(cell, 6).unwrap();
    uncompacted.sort_unstable();
    children.sort_unstable();
    assert_eq!(uncompacted, children);

    let mut too_small = [NULL_INDEX; 6];
    assert_eq!(uncompact(&[cell], 6, &mut too_small), Err(GeoHexError::BufferTooSmall));
  }

  #[test]
  fn compact_full_child_set() {
    let parent = HexIndex(0x85283473fffffff);
    let children = cell_to_children_vec(parent, 6).unwrap();
    assert_eq!(compact_vec(&children), Ok(vec![parent]));
  }

  #[test]
  fn compact_two_levels() {
    let parent = HexIndex(0x85283473fffffff);
    let grandchildren = cell_to_children_vec(parent, 7).unwrap();
    assert_eq!(compact_vec(&grandchildren), Ok(vec![parent]));
  }

  #[test]
  fn compact_partial_set_is_unchanged() {
    let parent = HexIndex(0x85283473fffffff);
    let mut children = cell_to_children_vec(parent, 6).unwrap();
    children.pop();
    let mut compacted = compact_vec(&children).unwrap();
    compacted.sort_unstable();
    children.sort_unstable();
    assert_eq!(compacted, children);
  }

  #[test]
  fn compact_pentagon_children() {
    let pentagon = HexIndex(0x8009fffffffffff);
    let children = cell_to_children_vec(pentagon, 1).unwrap();
    assert_eq!(children.len(), 6);
    assert_eq!(compact_vec(&children), Ok(vec![pentagon]));
  }

  #[test]
  fn compact_rejects_duplicates() {
    let cell = HexIndex(0x85283473fffffff);
    assert_eq!(compact_vec(&[cell, cell]), Err(GeoHexError::DuplicateInput));
  }

  #[test]
  fn compact_mixed_resolutions() {
    // A parent plus one of its own children compacts to nothing further
    // but is accepted as input.
    let parent = HexIndex(0x85283473fffffff);
    let child = cell_to_children_vec(parent, 6).unwrap()[0];
    let mut compacted = compact_vec(&[parent, child]).unwrap();
    compacted.sort_unstable();
    let mut expected = vec![parent, child];
    expected.sort_unstable();
    assert_eq!(compacted, expected);
  }

  #[test]
  fn compact_empty_input() {
    assert_eq!(compact_vec(&[]), Ok(vec![]));
  }
}
