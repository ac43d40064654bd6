//! The error type shared by every fallible operation in the crate.

use std::fmt;

/// Discriminated error value returned by every operation that can fail.
///
/// Success is represented by `Ok(..)`; the enum only carries failure kinds.
/// The discriminants are stable and part of the public contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
#[cfg_attr(feature = "serde", derive(serde_repr::Serialize_repr, serde_repr::Deserialize_repr))]
pub enum GeoHexError {
  /// The operation failed for an unspecified internal reason. Seeing this
  /// from a public entry point indicates a bug.
  Failed = 1,
  /// An argument was outside of its acceptable range.
  Domain = 2,
  /// A latitude or longitude argument was outside of its acceptable range.
  LatLngDomain = 3,
  /// A resolution argument was outside of 0..=15.
  ResDomain = 4,
  /// A cell index argument was not valid.
  CellInvalid = 5,
  /// A directed edge index argument was not valid.
  DirEdgeInvalid = 6,
  /// An undirected edge index argument was not valid.
  UndirEdgeInvalid = 7,
  /// A vertex index argument was not valid.
  VertexInvalid = 8,
  /// The operation attempted to traverse a pentagon's missing direction or
  /// encountered pentagon distortion it could not handle.
  Pentagon = 9,
  /// Duplicate input was encountered where inputs must be distinct.
  DuplicateInput = 10,
  /// The cell arguments were not neighbors.
  NotNeighbors = 11,
  /// The cell arguments had incompatible resolutions.
  ResMismatch = 12,
  /// A necessary memory allocation failed.
  MemoryAlloc = 13,
  /// Bounds of provided memory were not large enough.
  MemoryBounds = 14,
  /// A mode or flags argument was not valid.
  OptionInvalid = 15,
  /// The provided output buffer is too small for the result.
  BufferTooSmall = 16,
  /// The requested operation is not supported for this input.
  NotSupported = 17,
}

impl fmt::Display for GeoHexError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let msg = match self {
      Self::Failed => "operation failed",
      Self::Domain => "argument outside acceptable range",
      Self::LatLngDomain => "latitude or longitude outside acceptable range",
      Self::ResDomain => "resolution outside acceptable range",
      Self::CellInvalid => "invalid cell index",
      Self::DirEdgeInvalid => "invalid directed edge index",
      Self::UndirEdgeInvalid => "invalid undirected edge index",
      Self::VertexInvalid => "invalid vertex index",
      Self::Pentagon => "pentagon distortion encountered",
      Self::DuplicateInput => "duplicate input",
      Self::NotNeighbors => "cells are not neighbors",
      Self::ResMismatch => "incompatible resolutions",
      Self::MemoryAlloc => "memory allocation failed",
      Self::MemoryBounds => "provided memory too small",
      Self::OptionInvalid => "invalid mode or flags argument",
      Self::BufferTooSmall => "output buffer too small",
      Self::NotSupported => "operation not supported",
    };
    f.write_str(msg)
  }
}

impl std::error::Error for GeoHexError {}
