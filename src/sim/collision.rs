//! Overlap tests between axis-aligned boxes and circles
//!
//! Only overlap is reported; there is no collision response in this game.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Circle hitbox
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Axis-aligned box hitbox, stored as center and half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Closest point inside the box to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }
}

/// Any hitbox shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle(Circle),
    Box(Aabb),
}

impl Shape {
    pub fn overlaps(&self, other: &Shape) -> bool {
        match (self, other) {
            (Shape::Circle(a), Shape::Circle(b)) => circle_circle(a, b),
            (Shape::Box(a), Shape::Box(b)) => aabb_aabb(a, b),
            (Shape::Circle(c), Shape::Box(b)) | (Shape::Box(b), Shape::Circle(c)) => {
                circle_aabb(c, b)
            }
        }
    }
}

/// Touching edges do not count as overlap
#[inline]
pub fn aabb_aabb(a: &Aabb, b: &Aabb) -> bool {
    let d = (a.center - b.center).abs();
    let reach = a.half_extents + b.half_extents;
    d.x < reach.x && d.y < reach.y
}

#[inline]
pub fn circle_circle(a: &Circle, b: &Circle) -> bool {
    let r = a.radius + b.radius;
    a.center.distance_squared(b.center) < r * r
}

#[inline]
pub fn circle_aabb(c: &Circle, b: &Aabb) -> bool {
    let closest = b.closest_point(c.center);
    closest.distance_squared(c.center) < c.radius * c.radius
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f32, y: f32, half: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::splat(half))
    }

    #[test]
    fn test_boxes() {
        assert!(aabb_aabb(&square(0.0, 0.0, 10.0), &square(15.0, 5.0, 10.0)));
        assert!(!aabb_aabb(&square(0.0, 0.0, 10.0), &square(20.0, 0.0, 10.0)));
        assert!(!aabb_aabb(&square(0.0, 0.0, 10.0), &square(0.0, 25.0, 10.0)));
    }

    #[test]
    fn test_circles() {
        let a = Circle::new(Vec2::ZERO, 5.0);
        assert!(circle_circle(&a, &Circle::new(Vec2::new(9.0, 0.0), 5.0)));
        assert!(!circle_circle(&a, &Circle::new(Vec2::new(10.0, 0.0), 5.0)));
    }

    #[test]
    fn test_circle_against_box_corner() {
        let b = square(0.0, 0.0, 10.0);
        // Diagonal from the corner (10, 10): distance ~4.24
        assert!(circle_aabb(&Circle::new(Vec2::new(13.0, 13.0), 5.0), &b));
        // Within the bounding square of the circle but outside the corner arc
        assert!(!circle_aabb(&Circle::new(Vec2::new(14.0, 14.0), 5.0), &b));
    }

    #[test]
    fn test_circle_inside_box() {
        let b = square(0.0, 0.0, 100.0);
        assert!(circle_aabb(&Circle::new(Vec2::new(3.0, -4.0), 1.0), &b));
    }

    #[test]
    fn test_shape_dispatch_is_symmetric() {
        let c = Shape::Circle(Circle::new(Vec2::new(12.0, 0.0), 3.0));
        let b = Shape::Box(square(0.0, 0.0, 10.0));
        assert!(c.overlaps(&b));
        assert!(b.overlaps(&c));
    }
}
