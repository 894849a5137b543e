//! Grows an area outline outward by the agent radius, so that area volumes marked on the navmesh
//! still cover their source after the navmesh has been eroded by the same radius.
//!
//! Every edge is moved outward along its normal, and the new corners are the intersections of
//! neighbouring moved edges. Very sharp corners would shoot far out, so they are clamped.

use glam::Vec3;

use crate::math::{length_squared_2d, normalize_2d_or_zero, rotate_z_90, rotate_z_neg_90};

/// How far a clamped corner may move, as a multiple of the expansion distance. Approximately `√2`.
const CORNER_CLAMP_FACTOR: f32 = 1.4142;

/// Corners further than this multiple of the expansion distance from their source are clamped.
const CORNER_CLAMP_THRESHOLD: f32 = 2.0;

/// Lines whose directions have a smaller sine between them are treated as parallel.
const PARALLEL_TOLERANCE: f32 = 1e-6;

/// Offsets the polygon `verts` outward by `expand_by` on the horizontal (XY) plane.
///
/// The winding of the polygon is detected from its first non-collinear corner, not assumed.
///
/// The result has as many points as `verts`. Point `i` of the result is the grown corner of
/// `verts[(i + 1) % verts.len()]`, i.e. the result starts at the second corner.
///
/// Returns an empty `Vec` if there are fewer than three points or all points are collinear.
pub fn grow_convex_hull(expand_by: f32, verts: &[Vec3]) -> Vec<Vec3> {
    if verts.len() < 3 {
        return Vec::new();
    }

    // Wrap around so that the closing edge and the first corner are covered as well.
    let all_verts: Vec<Vec3> = verts.iter().chain(&verts[..2]).copied().collect();

    let Some(winding) = Winding::detect(&all_verts) else {
        return Vec::new();
    };
    let rotate: fn(Vec3) -> Vec3 = match winding {
        Winding::Clockwise => rotate_z_neg_90,
        Winding::CounterClockwise => rotate_z_90,
    };
    let move_dir = |from: Vec3, to: Vec3| {
        rotate((from - to).normalize_or_zero()).normalize_or_zero() * expand_by
    };

    let threshold = CORNER_CLAMP_THRESHOLD * expand_by;
    let threshold_sq = threshold * threshold;

    let mut result = Vec::with_capacity(verts.len());
    let mut previous_line: Option<Line> = None;
    for window in all_verts.windows(3) {
        let [v1, v2, v3] = [window[0], window[1], window[2]];

        let line1 = previous_line.unwrap_or_else(|| Line::new(v1, v2).moved(move_dir(v1, v2)));
        let move_dir2 = move_dir(v2, v3);
        let line2 = Line::new(v2, v3).moved(move_dir2);

        let new_point = match line1.intersection(&line2) {
            // Both lines are parallel, so just move the point by the expansion distance.
            None => v2 + move_dir2,
            Some(intersection) => {
                let to_intersection = intersection - v2;
                if length_squared_2d(to_intersection) > threshold_sq {
                    v2 + normalize_2d_or_zero(to_intersection) * expand_by * CORNER_CLAMP_FACTOR
                } else {
                    intersection
                }
            }
        };
        result.push(new_point);
        previous_line = Some(line2);
    }
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Winding {
    Clockwise,
    CounterClockwise,
}

impl Winding {
    /// Looks at consecutive corners until one of them turns.
    fn detect(verts: &[Vec3]) -> Option<Self> {
        verts.windows(3).find_map(|window| {
            let v01 = (window[0] - window[1]).normalize_or_zero();
            let v12 = (window[1] - window[2]).normalize_or_zero();
            let d = rotate_z_90(v01).dot(v12);
            if d < 0.0 {
                Some(Winding::Clockwise)
            } else if d > 0.0 {
                Some(Winding::CounterClockwise)
            } else {
                None
            }
        })
    }
}

/// An infinite line through two points, intersected on the horizontal plane.
#[derive(Debug, Clone, Copy)]
struct Line {
    p1: Vec3,
    p2: Vec3,
}

impl Line {
    fn new(p1: Vec3, p2: Vec3) -> Self {
        Self { p1, p2 }
    }

    fn moved(self, offset: Vec3) -> Self {
        Self {
            p1: self.p1 + offset,
            p2: self.p2 + offset,
        }
    }

    /// `None` if the lines are parallel or either one is degenerate.
    fn intersection(&self, other: &Line) -> Option<Vec3> {
        let a1 = self.p2.x - self.p1.x;
        let b1 = other.p1.x - other.p2.x;
        let c1 = other.p1.x - self.p1.x;

        let a2 = self.p2.y - self.p1.y;
        let b2 = other.p1.y - other.p2.y;
        let c2 = other.p1.y - self.p1.y;

        let denominator = a2 * b1 - a1 * b2;
        let scale = (a1 * a1 + a2 * a2).sqrt() * (b1 * b1 + b2 * b2).sqrt();
        if denominator.abs() <= PARALLEL_TOLERANCE * scale {
            return None;
        }
        let t = (b1 * c2 - b2 * c1) / denominator;
        Some(self.p1 + t * (self.p2 - self.p1))
    }
}
