use serde::{Deserialize, Serialize};

/// Planar point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline(always)]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One polygon ring. Rings need not repeat their first vertex.
pub type Ring = Vec<Point>;

/// Axis-aligned bounding box in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2 {
    pub min: Point,
    pub max: Point,
}

impl Aabb2 {
    /// Tightest box around a non-empty point set.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut aabb = Self {
            min: *first,
            max: *first,
        };
        for p in &points[1..] {
            aabb.extend(*p);
        }
        Some(aabb)
    }

    #[inline(always)]
    pub fn extend(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    #[inline(always)]
    pub fn union(&mut self, other: &Aabb2) {
        self.extend(other.min);
        self.extend(other.max);
    }
}

/// Even-odd ray-casting containment test against one ring.
///
/// A ray is cast toward negative x; each crossed edge toggles parity.
/// Closed and unclosed rings give identical answers because the wrap-around
/// edge `(last, first)` is always considered.
pub fn point_in_ring(ring: &[Point], x: f64, y: f64) -> bool {
    let mut inside = false;
    let mut j = ring.len().wrapping_sub(1);
    for i in 0..ring.len() {
        let (pi, pj) = (ring[i], ring[j]);
        if (pi.y > y) != (pj.y > y) && x < (pj.x - pi.x) * (y - pi.y) / (pj.y - pi.y) + pi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
