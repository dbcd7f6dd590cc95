//! Pure geometry helpers: polygon collision tests, toroidal wrapping, angle
//! arithmetic. Everything here is side-effect free and works on world-space
//! coordinates.

use core::f64::consts::PI;

use crate::constants::{WORLD_HEIGHT, WORLD_WIDTH};

/// A world-space point.
pub type Point = (f64, f64);

/// Reduce a position onto the toroidal plane. True modulo, so negative
/// inputs land back in [0, W) x [0, H).
#[inline]
pub fn wrap_position(x: f64, y: f64) -> (f64, f64) {
    (x.rem_euclid(WORLD_WIDTH), y.rem_euclid(WORLD_HEIGHT))
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    (dx * dx + dy * dy).sqrt()
}

/// Shortest signed angular difference `to - from`, wrapped to [-PI, PI).
#[inline]
pub fn shortest_angle_diff(from: f64, to: f64) -> f64 {
    (to - from + PI).rem_euclid(2.0 * PI) - PI
}

/// Ray-casting parity test: does `(x, y)` lie inside the polygon given as an
/// ordered vertex sequence (closing edge implied)?
///
/// Horizontal edges (`p1y == p2y`) never satisfy the strict/inclusive span
/// check, so the intersection division below cannot divide by zero.
pub fn point_in_polygon(x: f64, y: f64, poly: &[Point]) -> bool {
    let n = poly.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let (mut p1x, mut p1y) = poly[0];
    for i in 1..=n {
        let (p2x, p2y) = poly[i % n];
        if y > p1y.min(p2y) && y <= p1y.max(p2y) && x <= p1x.max(p2x) && p1y != p2y {
            let xinters = (y - p1y) * (p2x - p1x) / (p2y - p1y) + p1x;
            if p1x == p2x || x <= xinters {
                inside = !inside;
            }
        }
        (p1x, p1y) = (p2x, p2y);
    }
    inside
}

/// Separating Axis Theorem over the edge normals of both polygons. Returns
/// false as soon as one axis separates the projections; true only when every
/// axis overlaps. Zero-length edges produce no usable normal and are skipped.
pub fn polygons_collide(poly1: &[Point], poly2: &[Point]) -> bool {
    if poly1.len() < 3 || poly2.len() < 3 {
        return false;
    }

    for poly in [poly1, poly2] {
        for i in 0..poly.len() {
            let (x1, y1) = poly[i];
            let (x2, y2) = poly[(i + 1) % poly.len()];
            let nx = -(y2 - y1);
            let ny = x2 - x1;
            let len = (nx * nx + ny * ny).sqrt();
            if len == 0.0 {
                continue;
            }
            let axis = (nx / len, ny / len);

            let (min1, max1) = project(poly1, axis);
            let (min2, max2) = project(poly2, axis);
            if max1 < min2 || max2 < min1 {
                return false;
            }
        }
    }
    true
}

fn project(poly: &[Point], axis: Point) -> (f64, f64) {
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for (px, py) in poly {
        let dot = px * axis.0 + py * axis.1;
        min = min.min(dot);
        max = max.max(dot);
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRng;

    fn square(cx: f64, cy: f64, half: f64) -> Vec<Point> {
        vec![
            (cx - half, cy - half),
            (cx + half, cy - half),
            (cx + half, cy + half),
            (cx - half, cy + half),
        ]
    }

    fn random_polygon(rng: &mut SeededRng, cx: f64, cy: f64, radius: f64) -> Vec<Point> {
        let points = 8;
        (0..points)
            .map(|i| {
                let angle = i as f64 * core::f64::consts::TAU / points as f64;
                let r = radius * rng.range_f64(0.5, 1.0);
                (cx + r * angle.cos(), cy + r * angle.sin())
            })
            .collect()
    }

    #[test]
    fn wrap_is_periodic_and_in_range() {
        let samples = [
            (0.0, 0.0),
            (123.4, 987.6),
            (-1.0, -1.0),
            (WORLD_WIDTH, WORLD_HEIGHT),
            (-543.2, 2000.0),
        ];
        for (x, y) in samples {
            let base = wrap_position(x, y);
            for k in -3i32..=3 {
                let shifted =
                    wrap_position(x + k as f64 * WORLD_WIDTH, y + k as f64 * WORLD_HEIGHT);
                assert!((shifted.0 - base.0).abs() < 1e-9);
                assert!((shifted.1 - base.1).abs() < 1e-9);
            }
            assert!((0.0..WORLD_WIDTH).contains(&base.0));
            assert!((0.0..WORLD_HEIGHT).contains(&base.1));
        }
    }

    #[test]
    fn point_in_polygon_inside_and_outside() {
        let mut rng = SeededRng::new(0xBEEF);
        for _ in 0..32 {
            let cx = rng.range_f64(200.0, 800.0);
            let cy = rng.range_f64(200.0, 800.0);
            let poly = random_polygon(&mut rng, cx, cy, 60.0);
            // Strictly inside the minimum generated radius in every direction.
            assert!(point_in_polygon(cx, cy, &poly));
            // Far beyond the maximum vertex radius.
            assert!(!point_in_polygon(cx + 200.0, cy, &poly));
            assert!(!point_in_polygon(cx, cy - 200.0, &poly));
        }
    }

    #[test]
    fn point_in_polygon_handles_horizontal_edges() {
        let poly = square(100.0, 100.0, 50.0);
        assert!(point_in_polygon(100.0, 100.0, &poly));
        assert!(point_in_polygon(60.0, 140.0, &poly));
        assert!(!point_in_polygon(200.0, 100.0, &poly));
    }

    #[test]
    fn degenerate_polygons_do_not_collide() {
        let poly = square(0.0, 0.0, 10.0);
        assert!(!polygons_collide(&poly, &[(0.0, 0.0), (1.0, 1.0)]));
        assert!(!point_in_polygon(0.0, 0.0, &[(0.0, 0.0), (1.0, 1.0)]));
    }

    #[test]
    fn sat_detects_overlap_and_separation() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(15.0, 0.0, 10.0);
        let c = square(50.0, 50.0, 10.0);
        assert!(polygons_collide(&a, &b));
        assert!(!polygons_collide(&a, &c));
    }

    #[test]
    fn sat_is_symmetric() {
        let mut rng = SeededRng::new(0xC0FFEE);
        for _ in 0..64 {
            let (ax, ay) = (rng.range_f64(0.0, 300.0), rng.range_f64(0.0, 300.0));
            let (bx, by) = (rng.range_f64(0.0, 300.0), rng.range_f64(0.0, 300.0));
            let a = random_polygon(&mut rng, ax, ay, 80.0);
            let b = random_polygon(&mut rng, bx, by, 80.0);
            assert_eq!(polygons_collide(&a, &b), polygons_collide(&b, &a));
        }
    }

    #[test]
    fn sat_skips_zero_length_edges() {
        // Duplicated vertex produces a zero-length edge; must not panic or
        // divide by zero.
        let mut a = square(0.0, 0.0, 10.0);
        a.push(a[3]);
        let b = square(5.0, 0.0, 10.0);
        assert!(polygons_collide(&a, &b));
    }

    #[test]
    fn angle_diff_wraps_to_half_turn() {
        assert!((shortest_angle_diff(0.0, PI / 2.0) - PI / 2.0).abs() < 1e-12);
        assert!((shortest_angle_diff(0.1, 0.1 + 2.0 * PI)).abs() < 1e-12);
        let diff = shortest_angle_diff(-3.0, 3.0);
        assert!(diff.abs() <= PI);
    }
}
