//! Region operations: polygon fill, compaction and uncompaction.

mod compact;
mod polyfill;

pub use compact::{compact, compact_vec, uncompact, uncompact_size, uncompact_vec};
pub use polyfill::{max_polyfill_size, point_inside_polygon, polyfill, polyfill_vec};
