//! Viewport presets and the small affine toolkit the projection runs on.
//!
//! Coordinates follow the CSS 3D convention the preview composites with:
//! `x` grows to the right, `y` grows downward, `z` grows toward the viewer.
//! Angles are in degrees everywhere in the public API.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

use crate::consts::PERSPECTIVE_DISTANCE;

/// A point in 2D display space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point or direction in 3D display space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// Affine transform: a 3×3 linear part followed by a translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affine3 {
    /// Row-major linear part.
    pub linear: [[f64; 3]; 3],
    pub translation: Vec3,
}

impl Default for Affine3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine3 {
    pub const IDENTITY: Self = Self {
        linear: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        translation: Vec3 { x: 0.0, y: 0.0, z: 0.0 },
    };

    #[must_use]
    pub fn translate(offset: Vec3) -> Self {
        Self { translation: offset, ..Self::IDENTITY }
    }

    /// Rotation about the horizontal axis, CSS `rotateX`.
    #[must_use]
    pub fn rotate_x(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self::linear([[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]])
    }

    /// Rotation about the vertical axis, CSS `rotateY`.
    #[must_use]
    pub fn rotate_y(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self::linear([[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]])
    }

    /// Rotation about the view axis, CSS `rotateZ`.
    #[must_use]
    pub fn rotate_z(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self::linear([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    fn linear(linear: [[f64; 3]; 3]) -> Self {
        Self { linear, translation: Vec3::default() }
    }

    /// `self` applied after `inner`, i.e. the CSS list `self inner`.
    #[must_use]
    pub fn then(self, inner: Self) -> Self {
        let mut linear = [[0.0; 3]; 3];
        for (r, row) in linear.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.linear[r][k] * inner.linear[k][c]).sum();
            }
        }
        Self { linear, translation: self.apply_linear(inner.translation) + self.translation }
    }

    #[must_use]
    pub fn apply(&self, p: Vec3) -> Vec3 {
        self.apply_linear(p) + self.translation
    }

    fn apply_linear(&self, p: Vec3) -> Vec3 {
        let m = &self.linear;
        Vec3::new(
            m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z,
            m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z,
            m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z,
        )
    }
}

impl Mul for Affine3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.then(rhs)
    }
}

/// Named camera preset for the room preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ViewportMode {
    #[default]
    Perspective,
    Top,
    Front,
    Side,
    Engineer,
}

impl ViewportMode {
    /// Engineer mode swaps finishes for schematic colors and always shows callouts.
    #[must_use]
    pub fn is_engineer(self) -> bool {
        self == Self::Engineer
    }
}

/// Active tool in the designer toolbar. Only changes which UI affordances
/// are shown; projection ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ToolMode {
    #[default]
    Select,
    Move,
    Rotate,
    Ruler,
    Ambiente,
}

/// Backdrop drawn behind the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backdrop {
    /// Light drafting grid.
    Grid,
    /// Dark technical sheet.
    Technical,
}

/// The single root transform shared by floor, back wall and every module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomCamera {
    /// Tilt about the horizontal axis, in degrees.
    pub tilt: f64,
    /// Yaw about the vertical axis, in degrees.
    pub yaw: f64,
    /// Perspective distance, or `None` for orthographic.
    pub perspective: Option<f64>,
    pub backdrop: Backdrop,
}

impl RoomCamera {
    /// Camera preset for `mode`.
    #[must_use]
    pub fn for_mode(mode: ViewportMode) -> Self {
        let (tilt, yaw) = match mode {
            ViewportMode::Top => (90.0, 0.0),
            ViewportMode::Front => (0.0, 0.0),
            ViewportMode::Engineer => (-25.0, -45.0),
            ViewportMode::Perspective | ViewportMode::Side => (-15.0, -30.0),
        };
        let perspective =
            matches!(mode, ViewportMode::Perspective | ViewportMode::Engineer).then_some(PERSPECTIVE_DISTANCE);
        let backdrop = if mode.is_engineer() { Backdrop::Technical } else { Backdrop::Grid };
        Self { tilt, yaw, perspective, backdrop }
    }

    /// `rotateX(tilt) rotateY(yaw)` as one transform.
    #[must_use]
    pub fn transform(&self) -> Affine3 {
        Affine3::rotate_x(self.tilt) * Affine3::rotate_y(self.yaw)
    }

    /// Flatten a view-space point onto the screen, centered on the room origin.
    ///
    /// With a perspective distance `d`, points nearer the viewer (positive
    /// `z`) are magnified by `d / (d - z)`. Points at or behind the eye are
    /// left unscaled.
    #[must_use]
    pub fn project(&self, view: Vec3) -> Point {
        let factor = match self.perspective {
            Some(d) if d - view.z > f64::EPSILON => d / (d - view.z),
            _ => 1.0,
        };
        Point::new(view.x * factor, view.y * factor)
    }
}
