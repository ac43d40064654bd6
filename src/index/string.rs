//! The canonical string form of an index: lowercase hexadecimal, 1 to 16
//! characters, no prefix.

use crate::error::GeoHexError;
use crate::types::HexIndex;

/// Parses the canonical string form. Rejects empty strings, strings longer
/// than 16 characters and non-hexadecimal characters. No cell validation
/// is performed on the parsed value.
pub fn index_from_string(s: &str) -> Result<HexIndex, GeoHexError> {
  if s.is_empty() || s.len() > 16 {
    return Err(GeoHexError::Failed);
  }
  u64::from_str_radix(s, 16).map(HexIndex).map_err(|_| GeoHexError::Failed)
}

/// Formats an index in its canonical string form.
#[must_use]
pub fn index_to_string(h: HexIndex) -> String {
  format!("{:x}", h.0)
}

/// Writes the canonical string form into a caller-provided byte buffer,
/// returning the number of bytes written. A 16-byte buffer fits any index.
pub fn index_to_string_buf(h: HexIndex, buf: &mut [u8]) -> Result<usize, GeoHexError> {
  let s = index_to_string(h);
  let bytes = s.as_bytes();
  if buf.len() < bytes.len() {
    return Err(GeoHexError::BufferTooSmall);
  }
  buf[..bytes.len()].copy_from_slice(bytes);
  Ok(bytes.len())
}
