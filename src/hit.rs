//! Hit-testing against projected module boxes.
//!
//! Selection normally arrives as an id carried by the clicked box. [`pick`]
//! covers shells that only have a pointer position: it tests the screen-space
//! bounds of each box's projected corners and resolves overlaps by paint
//! order alone. There is no ray casting or occlusion test.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::Serialize;

use crate::camera::Point;
use crate::layout::ModuleId;
use crate::project::{ModuleBox, Scene};

/// Axis-aligned screen-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Smallest rectangle enclosing `points`, or `None` when empty.
    #[must_use]
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self { min: *first, max: *first };
        for p in rest {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Screen-space bounds of a projected module box.
#[must_use]
pub fn screen_bounds(module: &ModuleBox) -> Option<Bounds> {
    Bounds::enclosing(&module.corners)
}

/// The topmost module under `screen_pt`, relative to the room center.
///
/// Later modules paint over earlier ones, so the search runs back to front.
#[must_use]
pub fn pick(scene: &Scene, screen_pt: Point) -> Option<&ModuleId> {
    scene
        .modules
        .iter()
        .rev()
        .find(|m| screen_bounds(m).is_some_and(|b| b.contains(screen_pt)))
        .map(|m| &m.id)
}
