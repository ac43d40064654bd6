//! Face-centered IJK addresses, gnomonic projection and the face-crossing
//! ("overage") adjustment.
//!
//! Each of the 20 icosahedron faces carries its own hex grid. A point is
//! projected gnomonically onto the closest face's plane and quantized into
//! IJK coordinates there. When arithmetic pushes coordinates past a face's
//! bounded region, [`adjust_overage_class_ii`] transfers them into the
//! adjacent face's rotated coordinate system.

use crate::constants::{
  EPSILON, INV_RES0_U_GNOMONIC, MAX_CELL_BNDRY_VERTS, MAX_RESOLUTION, M_AP7_ROT_RADS, M_RSQRT7,
  M_SIN60, M_SQRT7, NUM_HEX_VERTS, NUM_ICOSA_FACES, NUM_PENT_VERTS, RES0_U_GNOMONIC,
};
use crate::geo::{geo_az_distance_rads, geo_azimuth_rads, pos_angle_rads};
use crate::index::is_resolution_class_iii;
use crate::coords::ijk::hex2d_to_coord_ijk;
use crate::math::vec2d::intersect;
use crate::types::{CellBoundary, CoordIJK, FaceIJK, LatLng, Vec2d, Vec3d};

/// Geographic centers of the icosahedron faces, in radians.
#[rustfmt::skip]
pub(crate) static FACE_CENTER_GEO: [LatLng; NUM_ICOSA_FACES as usize] = [
  LatLng::new(0.803_582_649_718_989_94,   1.248_397_419_617_396),     // face 0
  LatLng::new(1.307_747_883_455_638_2,    2.536_945_009_877_921),     // face 1
  LatLng::new(1.054_751_253_523_952,     -1.347_517_358_900_396_6),   // face 2
  LatLng::new(0.600_191_595_538_186_8,   -0.450_603_909_469_755_75),  // face 3
  LatLng::new(0.491_715_428_198_773_87,   0.401_988_202_911_306_94),  // face 4
  LatLng::new(0.172_745_327_415_618_7,    1.678_146_885_280_433_7),   // face 5
  LatLng::new(0.605_929_321_571_350_7,    2.953_923_329_812_411_6),   // face 6
  LatLng::new(0.427_370_518_328_979_64,  -1.888_876_200_336_285_4),   // face 7
  LatLng::new(-0.079_066_118_549_212_83, -0.733_429_513_380_867_74),  // face 8
  LatLng::new(-0.230_961_644_455_383_64,  0.506_495_587_332_349),     // face 9
  LatLng::new(0.079_066_118_549_212_83,   2.408_163_140_208_925_5),   // face 10
  LatLng::new(0.230_961_644_455_383_64,  -2.635_097_066_257_444),     // face 11
  LatLng::new(-0.172_745_327_415_618_7,  -1.463_445_768_309_359_5),   // face 12
  LatLng::new(-0.605_929_321_571_350_7,  -0.187_669_323_777_381_62),  // face 13
  LatLng::new(-0.427_370_518_328_979_64,  1.252_716_453_253_508),     // face 14
  LatLng::new(-0.600_191_595_538_186_8,   2.690_988_744_120_037_5),   // face 15
  LatLng::new(-0.491_715_428_198_773_87, -2.739_604_450_678_486_3),   // face 16
  LatLng::new(-0.803_582_649_718_989_94, -1.893_195_233_972_397),     // face 17
  LatLng::new(-1.307_747_883_455_638_2,  -0.604_647_643_711_872_1),   // face 18
  LatLng::new(-1.054_751_253_523_952,     1.794_075_294_689_396_6),   // face 19
];

/// Icosahedron face centers as points on the unit sphere.
#[rustfmt::skip]
static FACE_CENTER_POINT: [Vec3d; NUM_ICOSA_FACES as usize] = [
  Vec3d::new(0.219_930_779_140_460_6,    0.658_369_178_027_499_6,   0.719_847_537_892_618_2),    // face 0
  Vec3d::new(-0.213_923_483_450_142_1,   0.147_817_182_955_070_3,   0.965_601_793_521_420_5),    // face 1
  Vec3d::new(0.109_262_527_878_479_7,   -0.481_195_157_287_321,     0.869_777_512_128_725_3),    // face 2
  Vec3d::new(0.742_856_730_158_679_1,   -0.359_394_167_827_802_8,   0.564_800_593_651_703_3),    // face 3
  Vec3d::new(0.811_253_470_914_096_9,    0.344_895_323_763_938_4,   0.472_138_773_641_393),      // face 4
  Vec3d::new(-0.105_549_814_961_392_1,   0.979_445_729_641_141_3,   0.171_887_461_000_936_5),    // face 5
  Vec3d::new(-0.807_540_757_997_009_2,   0.153_355_248_589_881_8,   0.569_526_199_488_268_8),    // face 6
  Vec3d::new(-0.284_614_806_978_790_7,  -0.864_408_097_265_420_6,   0.414_479_255_247_354),      // face 7
  Vec3d::new(0.740_562_147_385_448_2,   -0.667_329_956_456_552_4,  -0.078_983_764_632_673_77),   // face 8
  Vec3d::new(0.851_230_398_647_429_3,    0.472_234_378_858_268_1,  -0.228_913_738_868_780_8),    // face 9
  Vec3d::new(-0.740_562_147_385_448_1,   0.667_329_956_456_552_4,   0.078_983_764_632_673_77),   // face 10
  Vec3d::new(-0.851_230_398_647_429_2,  -0.472_234_378_858_268_2,   0.228_913_738_868_780_8),    // face 11
  Vec3d::new(0.105_549_814_961_391_9,   -0.979_445_729_641_141_3,  -0.171_887_461_000_936_5),    // face 12
  Vec3d::new(0.807_540_757_997_009_2,   -0.153_355_248_589_881_9,  -0.569_526_199_488_268_8),    // face 13
  Vec3d::new(0.284_614_806_978_790_8,    0.864_408_097_265_420_4,  -0.414_479_255_247_354),      // face 14
  Vec3d::new(-0.742_856_730_158_679_1,   0.359_394_167_827_802_7,  -0.564_800_593_651_703_3),    // face 15
  Vec3d::new(-0.811_253_470_914_097_1,  -0.344_895_323_763_938_2,  -0.472_138_773_641_393),      // face 16
  Vec3d::new(-0.219_930_779_140_460_7,  -0.658_369_178_027_499_6,  -0.719_847_537_892_618_2),    // face 17
  Vec3d::new(0.213_923_483_450_142,     -0.147_817_182_955_070_4,  -0.965_601_793_521_420_5),    // face 18
  Vec3d::new(-0.109_262_527_878_479_6,   0.481_195_157_287_321,    -0.869_777_512_128_725_3),    // face 19
];

/// Azimuth in radians from each face center to its topological vertices
/// 0, 1 and 2 in the Class II orientation.
#[rustfmt::skip]
static FACE_AXES_AZ_RADS_CII: [[f64; 3]; NUM_ICOSA_FACES as usize] = [
  [5.619_958_268_523_94,     3.525_563_166_130_744_5,  1.431_168_063_737_548_7],  // face 0
  [5.760_339_081_714_187,    3.665_943_979_320_991_7,  1.571_548_876_927_796],    // face 1
  [0.780_213_654_393_430_1,  4.969_003_859_179_821,    2.874_608_756_786_625_7],  // face 2
  [0.430_469_363_979_999_9,  4.619_259_568_766_391,    2.524_864_466_373_195_5],  // face 3
  [6.130_269_123_335_111,    4.035_874_020_941_916,    1.941_478_918_548_720_3],  // face 4
  [2.692_877_706_530_643,    0.598_482_604_137_447_1,  4.787_272_808_923_838],    // face 5
  [2.982_963_003_477_244,    0.888_567_901_084_048_4,  5.077_358_105_870_44],     // face 6
  [3.532_912_002_790_141,    1.438_516_900_396_945_7,  5.627_307_105_183_337],    // face 7
  [3.494_305_004_259_568,    1.399_909_901_866_372_9,  5.588_700_106_652_764],    // face 8
  [3.003_214_169_499_538_4,  0.908_819_067_106_342_9,  5.097_609_271_892_734],    // face 9
  [5.930_472_956_509_811_6,  3.836_077_854_116_616,    1.741_682_751_723_420_4],  // face 10
  [0.138_378_484_090_254_85, 4.327_168_688_876_646,    2.232_773_586_483_45],     // face 11
  [0.448_714_947_059_150_36, 4.637_505_151_845_541_5,  2.543_110_049_452_346],    // face 12
  [0.158_629_650_112_549_36, 4.347_419_854_898_94,     2.253_024_752_505_745],    // face 13
  [5.891_865_957_979_238_5,  3.797_470_855_586_043,    1.703_075_753_192_847_6],  // face 14
  [2.711_123_289_609_793_3,  0.616_728_187_216_597_8,  4.805_518_392_002_988_7],  // face 15
  [3.294_508_837_434_268,    1.200_113_735_041_073,    5.388_903_939_827_464],    // face 16
  [3.804_819_692_245_44,     1.710_424_589_852_244_5,  5.899_214_794_638_635],    // face 17
  [3.664_438_879_055_192_4,  1.570_043_776_661_997,    5.758_833_981_448_388],    // face 18
  [2.361_378_999_196_363,    0.266_983_896_803_167_6,  4.455_774_101_589_558_6],  // face 19
];

/// Quadrant index of the i+j face edge in [`FACE_NEIGHBORS`].
pub(crate) const IJ_QUADRANT: usize = 1;
/// Quadrant index of the k+i face edge in [`FACE_NEIGHBORS`].
pub(crate) const KI_QUADRANT: usize = 2;
/// Quadrant index of the j+k face edge in [`FACE_NEIGHBORS`].
pub(crate) const JK_QUADRANT: usize = 3;

/// How to transform IJK coordinates into an adjacent face's system.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FaceOrientIJK {
  /// The adjacent face number.
  pub(crate) face: i32,
  /// Resolution 0 translation relative to the primary face.
  pub(crate) translate: CoordIJK,
  /// Number of 60 degree ccw rotations relative to the primary face.
  pub(crate) ccw_rot60: i32,
}

const fn orient(face: i32, i: i32, j: i32, k: i32, ccw_rot60: i32) -> FaceOrientIJK {
  FaceOrientIJK { face, translate: CoordIJK::new(i, j, k), ccw_rot60 }
}

/// Neighboring face transforms, indexed `[face][quadrant]` with quadrant 0
/// being the central face itself.
#[rustfmt::skip]
pub(crate) static FACE_NEIGHBORS: [[FaceOrientIJK; 4]; NUM_ICOSA_FACES as usize] = [
  [orient(0, 0, 0, 0, 0),  orient(4, 2, 0, 2, 1),  orient(1, 2, 2, 0, 5),  orient(5, 0, 2, 2, 3)],   // face 0
  [orient(1, 0, 0, 0, 0),  orient(0, 2, 0, 2, 1),  orient(2, 2, 2, 0, 5),  orient(6, 0, 2, 2, 3)],   // face 1
  [orient(2, 0, 0, 0, 0),  orient(1, 2, 0, 2, 1),  orient(3, 2, 2, 0, 5),  orient(7, 0, 2, 2, 3)],   // face 2
  [orient(3, 0, 0, 0, 0),  orient(2, 2, 0, 2, 1),  orient(4, 2, 2, 0, 5),  orient(8, 0, 2, 2, 3)],   // face 3
  [orient(4, 0, 0, 0, 0),  orient(3, 2, 0, 2, 1),  orient(0, 2, 2, 0, 5),  orient(9, 0, 2, 2, 3)],   // face 4
  [orient(5, 0, 0, 0, 0),  orient(10, 2, 2, 0, 3), orient(14, 2, 0, 2, 3), orient(0, 0, 2, 2, 3)],   // face 5
  [orient(6, 0, 0, 0, 0),  orient(11, 2, 2, 0, 3), orient(10, 2, 0, 2, 3), orient(1, 0, 2, 2, 3)],   // face 6
  [orient(7, 0, 0, 0, 0),  orient(12, 2, 2, 0, 3), orient(11, 2, 0, 2, 3), orient(2, 0, 2, 2, 3)],   // face 7
  [orient(8, 0, 0, 0, 0),  orient(13, 2, 2, 0, 3), orient(12, 2, 0, 2, 3), orient(3, 0, 2, 2, 3)],   // face 8
  [orient(9, 0, 0, 0, 0),  orient(14, 2, 2, 0, 3), orient(13, 2, 0, 2, 3), orient(4, 0, 2, 2, 3)],   // face 9
  [orient(10, 0, 0, 0, 0), orient(5, 2, 2, 0, 3),  orient(6, 2, 0, 2, 3),  orient(15, 0, 2, 2, 3)],  // face 10
  [orient(11, 0, 0, 0, 0), orient(6, 2, 2, 0, 3),  orient(7, 2, 0, 2, 3),  orient(16, 0, 2, 2, 3)],  // face 11
  [orient(12, 0, 0, 0, 0), orient(7, 2, 2, 0, 3),  orient(8, 2, 0, 2, 3),  orient(17, 0, 2, 2, 3)],  // face 12
  [orient(13, 0, 0, 0, 0), orient(8, 2, 2, 0, 3),  orient(9, 2, 0, 2, 3),  orient(18, 0, 2, 2, 3)],  // face 13
  [orient(14, 0, 0, 0, 0), orient(9, 2, 2, 0, 3),  orient(5, 2, 0, 2, 3),  orient(19, 0, 2, 2, 3)],  // face 14
  [orient(15, 0, 0, 0, 0), orient(16, 2, 0, 2, 1), orient(19, 2, 2, 0, 5), orient(10, 0, 2, 2, 3)],  // face 15
  [orient(16, 0, 0, 0, 0), orient(17, 2, 0, 2, 1), orient(15, 2, 2, 0, 5), orient(11, 0, 2, 2, 3)],  // face 16
  [orient(17, 0, 0, 0, 0), orient(18, 2, 0, 2, 1), orient(16, 2, 2, 0, 5), orient(12, 0, 2, 2, 3)],  // face 17
  [orient(18, 0, 0, 0, 0), orient(19, 2, 0, 2, 1), orient(17, 2, 2, 0, 5), orient(13, 0, 2, 2, 3)],  // face 18
  [orient(19, 0, 0, 0, 0), orient(15, 2, 0, 2, 1), orient(18, 2, 2, 0, 5), orient(14, 0, 2, 2, 3)],  // face 19
];

/// Quadrant index of the edge from `from_face` towards `to_face`, or -1 if
/// the faces are not adjacent. Derived from [`FACE_NEIGHBORS`], where each
/// neighboring face appears at its quadrant position.
pub(crate) fn adjacent_face_dir(from_face: i32, to_face: i32) -> i32 {
  if from_face == to_face {
    return 0;
  }
  for quadrant in IJ_QUADRANT..=JK_QUADRANT {
    if FACE_NEIGHBORS[from_face as usize][quadrant].face == to_face {
      return quadrant as i32;
    }
  }
  -1
}

/// Largest IJK component magnitude that stays on a face, indexed by
/// Class II resolution (odd entries are unused).
#[rustfmt::skip]
pub(crate) static MAX_DIM_BY_CII_RES: [i32; (MAX_RESOLUTION + 2) as usize] = [
  2, -1, 14, -1, 98, -1, 686, -1, 4_802, -1, 33_614, -1, 235_298, -1, 1_647_086, -1, 11_529_602,
];

/// Grid unit length per Class II resolution (odd entries are unused).
#[rustfmt::skip]
pub(crate) static UNIT_SCALE_BY_CII_RES: [i32; (MAX_RESOLUTION + 2) as usize] = [
  1, -1, 7, -1, 49, -1, 343, -1, 2_401, -1, 16_807, -1, 117_649, -1, 823_543, -1, 5_764_801,
];

/// Outcome of an overage check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Overage {
  /// The coordinates are on the original face.
  None,
  /// The coordinates lie exactly on a face edge (substrate grids only).
  FaceEdge,
  /// The coordinates were transferred onto a new face.
  NewFace,
}

/// Finds the icosahedron face whose center is closest to the point, along
/// with the squared chord distance to that center.
pub(crate) fn geo_to_closest_face(g: &LatLng) -> (i32, f64) {
  let v3d = Vec3d::from_geo(g);
  let mut face = 0;
  let mut sqd = 5.0;
  for (f, center) in FACE_CENTER_POINT.iter().enumerate() {
    let d = center.square_dist(&v3d);
    if d < sqd {
      face = f as i32;
      sqd = d;
    }
  }
  (face, sqd)
}

/// Projects a geographic point onto the closest face plane, returning the
/// face and the 2D hex-grid coordinates at the given resolution.
pub(crate) fn geo_to_hex2d(g: &LatLng, res: i32) -> (i32, Vec2d) {
  let (face, sqd) = geo_to_closest_face(g);

  // cos(r) = 1 - 2 sin^2(r/2) = 1 - sqd/2
  let r = (1.0 - sqd / 2.0).clamp(-1.0, 1.0).acos();
  if r < EPSILON {
    return (face, Vec2d::default());
  }

  // Angle ccw from the face's Class II i-axis.
  let mut theta = pos_angle_rads(
    FACE_AXES_AZ_RADS_CII[face as usize][0]
      - pos_angle_rads(geo_azimuth_rads(&FACE_CENTER_GEO[face as usize], g)),
  );
  if is_resolution_class_iii(res) {
    theta = pos_angle_rads(theta - M_AP7_ROT_RADS);
  }

  // Gnomonic scaling, then scale to the resolution's unit length.
  let mut r = r.tan() * INV_RES0_U_GNOMONIC;
  for _ in 0..res {
    r *= M_SQRT7;
  }

  (face, Vec2d::new(r * theta.cos(), r * theta.sin()))
}

/// Inverse of [`geo_to_hex2d`]: maps 2D hex-grid coordinates on a face back
/// to a geographic point. `substrate` marks coordinates in the aperture
/// 3-3r vertex grid.
pub(crate) fn hex2d_to_geo(v: &Vec2d, face: i32, res: i32, substrate: bool) -> LatLng {
  let mut r = v.mag();
  if r < EPSILON {
    return FACE_CENTER_POINT[face as usize].to_geo();
  }

  let mut theta = v.y.atan2(v.x);

  for _ in 0..res {
    r *= M_RSQRT7;
  }
  if substrate {
    r /= 3.0;
    if is_resolution_class_iii(res) {
      r *= M_RSQRT7;
    }
  }
  r = (r * RES0_U_GNOMONIC).atan();

  // A substrate grid is already adjusted for Class III.
  if !substrate && is_resolution_class_iii(res) {
    theta = pos_angle_rads(theta + M_AP7_ROT_RADS);
  }
  let az = pos_angle_rads(FACE_AXES_AZ_RADS_CII[face as usize][0] - theta);

  geo_az_distance_rads(&FACE_CENTER_GEO[face as usize], az, r)
}

/// Quantizes a geographic point into a face-centered IJK address at the
/// given resolution.
pub(crate) fn geo_to_face_ijk(g: &LatLng, res: i32) -> FaceIJK {
  let (face, v) = geo_to_hex2d(g, res);
  FaceIJK { face, coord: hex2d_to_coord_ijk(&v) }
}

/// Center point of a face-centered IJK address in geographic coordinates.
pub(crate) fn face_ijk_to_geo(h: &FaceIJK, res: i32) -> LatLng {
  hex2d_to_geo(&h.coord.to_hex2d(), h.face, res, false)
}

/// Checks the coordinates against the face's bounded region and, on
/// overage, transfers them into the adjacent face's system.
///
/// `res` must be a Class II resolution. `pent_leading_4` marks a pentagon
/// cell whose leading digit is the i-axis digit, which requires rotating
/// around the missing k-axis wedge first. `substrate` marks coordinates in
/// the vertex substrate grid.
pub(crate) fn adjust_overage_class_ii(
  fijk: &mut FaceIJK,
  res: i32,
  pent_leading_4: bool,
  substrate: bool,
) -> Overage {
  let ijk = &mut fijk.coord;

  let mut max_dim = MAX_DIM_BY_CII_RES[res as usize];
  if substrate {
    max_dim *= 3;
  }

  let sum = ijk.i + ijk.j + ijk.k;
  if substrate && sum == max_dim {
    return Overage::FaceEdge;
  }
  if sum <= max_dim {
    return Overage::None;
  }

  let face_orient = if ijk.k > 0 {
    if ijk.j > 0 {
      &FACE_NEIGHBORS[fijk.face as usize][JK_QUADRANT]
    } else {
      if pent_leading_4 {
        // Rotate out of the pentagon's missing k-axes wedge: translate the
        // origin to the pentagon center, rotate cw, translate back.
        let pent_center = CoordIJK::new(max_dim, 0, 0);
        let mut tmp = ijk.sub(&pent_center);
        tmp.rotate_60cw();
        *ijk = tmp.add(&pent_center);
      }
      &FACE_NEIGHBORS[fijk.face as usize][KI_QUADRANT]
    }
  } else {
    &FACE_NEIGHBORS[fijk.face as usize][IJ_QUADRANT]
  };

  fijk.face = face_orient.face;

  for _ in 0..face_orient.ccw_rot60 {
    ijk.rotate_60ccw();
  }

  let mut trans = face_orient.translate;
  let mut unit_scale = UNIT_SCALE_BY_CII_RES[res as usize];
  if substrate {
    unit_scale *= 3;
  }
  trans.scale(unit_scale);
  *ijk = ijk.add(&trans);
  ijk.normalize();

  // Overage points on pentagon boundaries can end up on an edge of the new
  // face.
  if substrate && ijk.i + ijk.j + ijk.k == max_dim {
    Overage::FaceEdge
  } else {
    Overage::NewFace
  }
}

/// Repeats the overage adjustment for a pentagon vertex until the
/// coordinates stop landing on new faces.
pub(crate) fn adjust_pent_vert_overage(fijk: &mut FaceIJK, res: i32) -> Overage {
  loop {
    let overage = adjust_overage_class_ii(fijk, res, false, true);
    if overage != Overage::NewFace {
      return overage;
    }
  }
}

/// Vertex offsets of an origin-centered cell in a Class II substrate grid
/// (aperture sequence 3-3r), listed ccw from the i-axis.
#[rustfmt::skip]
const VERTS_CII: [CoordIJK; NUM_HEX_VERTS] = [
  CoordIJK::new(2, 1, 0), CoordIJK::new(1, 2, 0), CoordIJK::new(0, 2, 1),
  CoordIJK::new(0, 1, 2), CoordIJK::new(1, 0, 2), CoordIJK::new(2, 0, 1),
];

/// Vertex offsets for Class III resolutions on the aperture 3-3r-7r
/// substrate grid.
#[rustfmt::skip]
const VERTS_CIII: [CoordIJK; NUM_HEX_VERTS] = [
  CoordIJK::new(5, 4, 0), CoordIJK::new(1, 5, 0), CoordIJK::new(0, 5, 4),
  CoordIJK::new(0, 1, 5), CoordIJK::new(4, 0, 5), CoordIJK::new(5, 0, 1),
];

/// Moves a cell center into the vertex substrate grid, returning the
/// adjusted Class II resolution. After the call `fijk` addresses the same
/// point in the substrate grid.
fn center_to_substrate(fijk: &mut FaceIJK, res: i32) -> i32 {
  fijk.coord.down_ap3();
  fijk.coord.down_ap3r();
  if is_resolution_class_iii(res) {
    fijk.coord.down_ap7r();
    res + 1
  } else {
    res
  }
}

/// Computes the substrate FaceIJK of every vertex of a hexagon cell.
/// Returns the substrate Class II resolution.
pub(crate) fn face_ijk_to_verts(
  fijk: &mut FaceIJK,
  res: i32,
  fijk_verts: &mut [FaceIJK; NUM_HEX_VERTS],
) -> i32 {
  let verts = if is_resolution_class_iii(res) { &VERTS_CIII } else { &VERTS_CII };
  let adj_res = center_to_substrate(fijk, res);

  for (vert, offset) in fijk_verts.iter_mut().zip(verts.iter()) {
    vert.face = fijk.face;
    vert.coord = fijk.coord.add(offset);
    vert.coord.normalize();
  }
  adj_res
}

/// Computes the substrate FaceIJK of every vertex of a pentagon cell.
/// Returns the substrate Class II resolution.
pub(crate) fn face_ijk_pent_to_verts(
  fijk: &mut FaceIJK,
  res: i32,
  fijk_verts: &mut [FaceIJK; NUM_PENT_VERTS],
) -> i32 {
  let verts = if is_resolution_class_iii(res) { &VERTS_CIII } else { &VERTS_CII };
  let adj_res = center_to_substrate(fijk, res);

  for (vert, offset) in fijk_verts.iter_mut().zip(verts.iter()) {
    vert.face = fijk.face;
    vert.coord = fijk.coord.add(offset);
    vert.coord.normalize();
  }
  adj_res
}

/// Corner points of the face triangle in substrate hex2d coordinates, used
/// to intersect cell edges with icosahedron edges.
fn face_edge_verts(adj_res: i32) -> [Vec2d; 3] {
  let max_dim = f64::from(MAX_DIM_BY_CII_RES[adj_res as usize]);
  [
    Vec2d::new(3.0 * max_dim, 0.0),
    Vec2d::new(-1.5 * max_dim, 3.0 * M_SIN60 * max_dim),
    Vec2d::new(-1.5 * max_dim, -3.0 * M_SIN60 * max_dim),
  ]
}

/// Selects the two face-triangle corners bounding the icosahedron edge in
/// the given quadrant.
fn edge_for_quadrant(verts: &[Vec2d; 3], quadrant: i32) -> (&Vec2d, &Vec2d) {
  match quadrant as usize {
    IJ_QUADRANT => (&verts[0], &verts[1]),
    JK_QUADRANT => (&verts[1], &verts[2]),
    _ => (&verts[2], &verts[0]), // KI
  }
}

/// Computes the boundary polygon of a hexagon cell in geographic
/// coordinates, clockwise. `start` and `length` select a contiguous run of
/// topological vertices; pass `0` and [`NUM_HEX_VERTS`] for the whole cell.
///
/// At Class III resolutions a cell edge may cross an icosahedron edge, in
/// which case an extra vertex is inserted at the crossing so each half can
/// be projected from its own face.
pub(crate) fn face_ijk_to_cell_boundary(
  h: &FaceIJK,
  res: i32,
  start: usize,
  length: usize,
  g: &mut CellBoundary,
) {
  let mut center = *h;
  let mut fijk_verts = [FaceIJK::default(); NUM_HEX_VERTS];
  let adj_res = face_ijk_to_verts(&mut center, res, &mut fijk_verts);

  // One extra iteration to catch a distortion vertex on the closing edge.
  let additional_iteration = usize::from(length == NUM_HEX_VERTS);

  g.num_verts = 0;
  let mut last_face = -1;
  let mut last_overage = Overage::None;

  for vert in start..(start + length + additional_iteration) {
    let v = vert % NUM_HEX_VERTS;

    let mut fijk = fijk_verts[v];
    let overage = adjust_overage_class_ii(&mut fijk, adj_res, false, true);

    // Class II cell edges have their vertices on face edges, so no edge
    // line intersections occur.
    if is_resolution_class_iii(res) && vert > start && fijk.face != last_face
      && last_overage != Overage::FaceEdge
    {
      let last_v = (v + 5) % NUM_HEX_VERTS;
      let orig2d0 = fijk_verts[last_v].coord.to_hex2d();
      let orig2d1 = fijk_verts[v].coord.to_hex2d();

      let edge_verts = face_edge_verts(adj_res);
      let face2 = if last_face == center.face { fijk.face } else { last_face };
      let (edge0, edge1) = edge_for_quadrant(&edge_verts, adjacent_face_dir(center.face, face2));

      // No extra vertex when the crossing coincides with a cell vertex.
      let inter = intersect(&orig2d0, &orig2d1, edge0, edge1);
      if !orig2d0.almost_equals(&inter) && !orig2d1.almost_equals(&inter) {
        g.verts[g.num_verts] = hex2d_to_geo(&inter, center.face, adj_res, true);
        g.num_verts += 1;
      }
    }

    if vert < start + length {
      g.verts[g.num_verts] = hex2d_to_geo(&fijk.coord.to_hex2d(), fijk.face, adj_res, true);
      g.num_verts += 1;
    }

    last_face = fijk.face;
    last_overage = overage;
  }

  debug_assert!(g.num_verts <= MAX_CELL_BNDRY_VERTS);
}

/// Pentagon variant of [`face_ijk_to_cell_boundary`]. Every Class III
/// pentagon edge crosses an icosahedron edge.
pub(crate) fn face_ijk_pent_to_cell_boundary(
  h: &FaceIJK,
  res: i32,
  start: usize,
  length: usize,
  g: &mut CellBoundary,
) {
  let mut center = *h;
  let mut fijk_verts = [FaceIJK::default(); NUM_PENT_VERTS];
  let adj_res = face_ijk_pent_to_verts(&mut center, res, &mut fijk_verts);

  let additional_iteration = usize::from(length == NUM_PENT_VERTS);

  g.num_verts = 0;
  let mut last_fijk = FaceIJK::default();

  for vert in start..(start + length + additional_iteration) {
    let v = vert % NUM_PENT_VERTS;

    let mut fijk = fijk_verts[v];
    adjust_pent_vert_overage(&mut fijk, adj_res);

    if is_resolution_class_iii(res) && vert > start {
      // Transform this vertex into the previous vertex's face plane, then
      // intersect the edge between them with the icosahedron edge there.
      let mut tmp = fijk;
      let orig2d0 = last_fijk.coord.to_hex2d();

      let current_to_last_dir = adjacent_face_dir(tmp.face, last_fijk.face);
      let face_orient = &FACE_NEIGHBORS[tmp.face as usize][current_to_last_dir as usize];

      tmp.face = face_orient.face;
      for _ in 0..face_orient.ccw_rot60 {
        tmp.coord.rotate_60ccw();
      }
      let mut trans = face_orient.translate;
      trans.scale(UNIT_SCALE_BY_CII_RES[adj_res as usize] * 3);
      tmp.coord = tmp.coord.add(&trans);
      tmp.coord.normalize();

      let orig2d1 = tmp.coord.to_hex2d();

      let edge_verts = face_edge_verts(adj_res);
      let (edge0, edge1) = edge_for_quadrant(&edge_verts, adjacent_face_dir(tmp.face, fijk.face));

      let inter = intersect(&orig2d0, &orig2d1, edge0, edge1);
      g.verts[g.num_verts] = hex2d_to_geo(&inter, tmp.face, adj_res, true);
      g.num_verts += 1;
    }

    if vert < start + length {
      g.verts[g.num_verts] = hex2d_to_geo(&fijk.coord.to_hex2d(), fijk.face, adj_res, true);
      g.num_verts += 1;
    }

    last_fijk = fijk;
  }

  debug_assert!(g.num_verts <= MAX_CELL_BNDRY_VERTS);
}
