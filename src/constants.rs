//! Grid-wide numeric constants and the bit layout of the 64-bit index.

use std::f64::consts;

/// 2 * pi.
pub const M_2PI: f64 = 2.0 * consts::PI;

/// General-purpose threshold for floating point comparisons.
pub const EPSILON: f64 = 1e-16;

/// Epsilon in degrees, roughly 0.1 mm on the Earth's surface.
pub const EPSILON_DEG: f64 = 1e-9;
/// [`EPSILON_DEG`] expressed in radians.
pub const EPSILON_RAD: f64 = EPSILON_DEG * consts::PI / 180.0;

/// sin(60 degrees), i.e. sqrt(3) / 2.
pub const M_SIN60: f64 = 0.866_025_403_784_438_6;
/// 1 / sin(60 degrees).
pub const M_RSIN60: f64 = 1.0 / M_SIN60;

/// Square root of 7, the grid aperture.
pub const M_SQRT7: f64 = 2.645_751_311_064_590_6;
/// 1 / sqrt(7).
pub const M_RSQRT7: f64 = 1.0 / M_SQRT7;

/// Rotation angle between Class II and Class III grid axes, asin(sqrt(3/28)).
pub const M_AP7_ROT_RADS: f64 = 0.333_473_172_251_832_1;

/// WGS84 authalic Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6_371.007_180_918_475;

/// Scaling factor from a resolution 0 unit hex-grid length (the distance
/// between adjacent cell centers on the face plane) to gnomonic unit length.
pub const RES0_U_GNOMONIC: f64 = 0.381_966_011_250_105;
/// 1 / [`RES0_U_GNOMONIC`].
pub const INV_RES0_U_GNOMONIC: f64 = 1.0 / RES0_U_GNOMONIC;

/// Finest resolution of the grid hierarchy.
pub const MAX_RESOLUTION: i32 = 15;
/// Number of faces on the icosahedron.
pub const NUM_ICOSA_FACES: i32 = 20;
/// Number of resolution 0 base cells.
pub const NUM_BASE_CELLS: i32 = 122;
/// Number of topological vertices of a hexagon cell.
pub const NUM_HEX_VERTS: usize = 6;
/// Number of topological vertices of a pentagon cell.
pub const NUM_PENT_VERTS: usize = 5;
/// Number of pentagons at every resolution.
pub const NUM_PENTAGONS: i32 = 12;

/// Worst-case number of cell boundary vertices: a Class III pentagon with a
/// distortion vertex on each of its five edges.
pub const MAX_CELL_BNDRY_VERTS: usize = 10;

/// Total number of cells at the finest resolution: 2 + 120 * 7^15.
pub const NUM_CELLS_MAX_RES: i64 = 569_707_381_193_162;

// 64-bit index bit layout, high to low:
//   1 reserved bit | 4 mode bits | 3 mode-dependent bits | 4 resolution bits
//   | 7 base cell bits | 15 * 3 digit bits

/// Bit offset of the mode field.
pub const MODE_OFFSET: u64 = 59;
/// Bit offset of the mode-dependent field (edge direction / vertex number).
pub const MODE_DEPENDENT_OFFSET: u64 = 56;
/// Bit offset of the resolution field.
pub const RES_OFFSET: u64 = 52;
/// Bit offset of the base cell field.
pub const BASE_CELL_OFFSET: u64 = 45;
/// Width in bits of a single resolution digit.
pub const PER_DIGIT_OFFSET: u64 = 3;

/// Mask covering the reserved high bit.
pub const HIGH_BIT_MASK: u64 = 1 << 63;
/// Mask covering the 4 mode bits.
pub const MODE_MASK: u64 = 0b1111 << MODE_OFFSET;
/// Mask covering the 3 mode-dependent bits.
pub const MODE_DEPENDENT_MASK: u64 = 0b111 << MODE_DEPENDENT_OFFSET;
/// Mask covering the 4 resolution bits.
pub const RES_MASK: u64 = 0b1111 << RES_OFFSET;
/// Mask covering the 7 base cell bits.
pub const BASE_CELL_MASK: u64 = 0b111_1111 << BASE_CELL_OFFSET;
/// Mask covering one digit, before shifting into place.
pub const DIGIT_MASK: u64 = 0b111;

/// Index mode for cells.
pub const CELL_MODE: u8 = 1;
/// Index mode for directed edges.
pub const DIRECTED_EDGE_MODE: u8 = 2;
/// Index mode for undirected edges. Reserved; no operation produces it.
pub const UNDIRECTED_EDGE_MODE: u8 = 3;
/// Index mode for cell vertices.
pub const VERTEX_MODE: u8 = 4;

/// Bit pattern used to start building a cell index: mode 0, resolution 0,
/// base cell 0 and every digit set to the out-of-range sentinel 7.
pub const INDEX_INIT: u64 = 0x0000_1fff_ffff_ffff;

/// Average hexagon area per resolution in km^2 (pentagons excluded).
#[rustfmt::skip]
pub const HEX_AREA_AVG_KM2: [f64; (MAX_RESOLUTION + 1) as usize] = [
  4.357_449_416_078_383e+06, 6.097_884_417_941_332e+05, 8.680_178_039_899_720e+04,
  1.239_343_465_508_816e+04, 1.770_347_654_491_307e+03, 2.529_038_581_819_449e+02,
  3.612_906_216_441_245e+01, 5.161_293_359_717_191e+00, 7.373_275_975_944_177e-01,
  1.053_325_134_272_067e-01, 1.504_750_190_766_435e-02, 2.149_643_129_451_879e-03,
  3.070_918_756_316_060e-04, 4.387_026_794_728_296e-05, 6.267_181_135_324_313e-06,
  8.953_115_907_605_790e-07,
];

/// Average hexagon area per resolution in m^2 (pentagons excluded).
#[rustfmt::skip]
pub const HEX_AREA_AVG_M2: [f64; (MAX_RESOLUTION + 1) as usize] = [
  4.357_449_416_078_390e+12, 6.097_884_417_941_339e+11, 8.680_178_039_899_731e+10,
  1.239_343_465_508_818e+10, 1.770_347_654_491_309e+09, 2.529_038_581_819_452e+08,
  3.612_906_216_441_250e+07, 5.161_293_359_717_198e+06, 7.373_275_975_944_188e+05,
  1.053_325_134_272_069e+05, 1.504_750_190_766_437e+04, 2.149_643_129_451_882e+03,
  3.070_918_756_316_063e+02, 4.387_026_794_728_301e+01, 6.267_181_135_324_322e+00,
  8.953_115_907_605_802e-01,
];

/// Average hexagon edge length per resolution in kilometers.
#[rustfmt::skip]
pub const HEX_EDGE_LENGTH_AVG_KM: [f64; (MAX_RESOLUTION + 1) as usize] = [
  1_281.256_011, 483.056_891_2, 182.512_956_5, 68.979_222_51, 26.071_759_93,
  9.854_090_990, 3.724_532_667, 1.406_475_763, 0.531_414_010_2, 0.200_786_147_7,
  0.075_863_782_87, 0.028_663_896_72, 0.010_830_187_84, 0.004_092_010_473,
  0.001_546_099_657, 0.000_584_168_630,
];

/// Average hexagon edge length per resolution in meters.
#[rustfmt::skip]
pub const HEX_EDGE_LENGTH_AVG_M: [f64; (MAX_RESOLUTION + 1) as usize] = [
  1_281_256.011, 483_056.891_2, 182_512.956_5, 68_979.222_51, 26_071.759_93,
  9_854.090_990, 3_724.532_667, 1_406.475_763, 531.414_010_2, 200.786_147_7,
  75.863_782_87, 28.663_896_72, 10.830_187_84, 4.092_010_473, 1.546_099_657,
  0.584_168_630,
];
