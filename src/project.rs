//! Projection: turns layout state plus a viewport mode into presentation
//! geometry for compositing.
//!
//! Everything here is a pure function of its inputs. The output describes
//! flat rectangles (faces, slats, callouts) positioned in each module's local
//! frame, the shared room camera, and each module's full local-to-view
//! transform `camera ∘ translate(anchor, z) ∘ rotateY(rotation)`.
//!
//! Module local frame, in display units: origin at the bottom-center of the
//! box on its mid-depth plane, `x` right, `y` down, `z` toward the viewer.
//! The box spans `x ∈ [-w/2, w/2]`, `y ∈ [-h, 0]`, `z ∈ [-d/2, d/2]`.

#[cfg(test)]
#[path = "project_test.rs"]
mod project_test;

use serde::Serialize;

use crate::camera::{Affine3, Point, RoomCamera, Vec3, ViewportMode};
use crate::catalog::{finish_color, shade_hex};
use crate::consts::{
    BOTTOM_BRIGHTNESS, CALLOUT_GAP, CALLOUT_LIFT, DEFAULT_SCALE, FRONT_BRIGHTNESS, KITCHEN_CATEGORY,
    LEFT_BRIGHTNESS, MAX_SLATS, RIGHT_BRIGHTNESS, SCHEMATIC_FILL, SCHEMATIC_OUTLINE, SLAT_PITCH_MM, TOP_BRIGHTNESS,
};
use crate::layout::{Layout, Module, ModuleId, Room};

/// Which side of the box a face covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceSide {
    Front,
    Left,
    Right,
    Top,
    Bottom,
}

impl FaceSide {
    pub const ALL: [Self; 5] = [Self::Front, Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// Fixed directional-shading multiplier.
    #[must_use]
    pub fn brightness(self) -> f64 {
        match self {
            Self::Front => FRONT_BRIGHTNESS,
            Self::Left => LEFT_BRIGHTNESS,
            Self::Right => RIGHT_BRIGHTNESS,
            Self::Top => TOP_BRIGHTNESS,
            Self::Bottom => BOTTOM_BRIGHTNESS,
        }
    }
}

/// One flat face of a module box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Face {
    pub side: FaceSide,
    pub width: f64,
    pub height: f64,
    /// Face center in the module's local frame.
    pub center: Vec3,
    pub brightness: f64,
    /// Base color before shading.
    pub color: String,
    /// Color after applying `brightness`.
    pub fill: String,
    /// Outline stroke, drawn only in the engineer viewport.
    pub outline: Option<&'static str>,
}

/// Which dimension a callout annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Width,
    Height,
}

/// A dimension label floating beside a module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Callout {
    pub dimension: Dimension,
    pub value_mm: f64,
    pub label: String,
    /// Label center in the module's local frame.
    pub position: Point,
    /// In-plane rotation of the label, in degrees.
    pub rotation: f64,
    /// Offset toward the viewer so the label floats in front of the faces.
    pub lift: f64,
}

/// One vertical strip of a slatted front face.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slat {
    /// Left edge in the module's local frame.
    pub x: f64,
    pub width: f64,
    pub fill: String,
}

/// Presentation record for one module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleBox {
    pub id: ModuleId,
    /// Bottom-center anchor relative to the room center. `y` is inverted so
    /// raising a module moves its anchor up the screen.
    pub anchor: Point,
    /// Translation along the view axis.
    pub depth_offset: f64,
    /// Rotation about the vertical axis, in degrees, as stored.
    pub rotation: f64,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub selected: bool,
    pub faces: Vec<Face>,
    pub callouts: Vec<Callout>,
    pub slats: Vec<Slat>,
    /// Kitchen modules show a door handle outside the engineer viewport.
    pub handle: bool,
    /// Type name stamped across the front face in the engineer viewport.
    pub watermark: Option<String>,
    /// Local frame to view space, camera included.
    pub transform: Affine3,
    /// The eight box corners projected to the screen.
    pub corners: Vec<Point>,
}

impl ModuleBox {
    #[must_use]
    pub fn face(&self, side: FaceSide) -> Option<&Face> {
        self.faces.iter().find(|f| f.side == side)
    }
}

/// Back wall of the room, behind the floor's far edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Wall {
    pub width: f64,
    pub height: f64,
    pub depth_offset: f64,
}

/// Presentation record for the room shell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomShell {
    pub floor_width: f64,
    pub floor_depth: f64,
    /// Floor plane transform: camera followed by laying the plane flat.
    pub floor_transform: Affine3,
    /// Hidden in the engineer viewport.
    pub wall: Option<Wall>,
    pub floor_grid: bool,
}

/// Everything the shell needs to composite one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub mode: ViewportMode,
    pub camera: RoomCamera,
    pub room: RoomShell,
    /// Module boxes in paint order.
    pub modules: Vec<ModuleBox>,
    /// The selection, if it names a module in this layout.
    pub selected: Option<ModuleId>,
    pub version: u64,
}

/// Projection parameters: the display scale and the finish palette.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    /// Millimeters-to-display-unit factor, shared by room and modules.
    pub scale: f64,
    pub palette: fn(&str) -> &'static str,
}

impl Default for Projector {
    fn default() -> Self {
        Self { scale: DEFAULT_SCALE, palette: finish_color }
    }
}

impl Projector {
    #[must_use]
    pub fn new(scale: f64) -> Self {
        Self { scale, ..Self::default() }
    }

    /// Project the whole layout.
    #[must_use]
    pub fn scene(&self, layout: &Layout, mode: ViewportMode, selected: Option<&ModuleId>) -> Scene {
        let camera = RoomCamera::for_mode(mode);
        let selected = selected.filter(|id| layout.contains(id)).cloned();
        Scene {
            mode,
            camera,
            room: self.room(layout.room(), mode),
            modules: layout
                .modules()
                .iter()
                .map(|m| self.module(m, mode, selected.as_ref()))
                .collect(),
            selected,
            version: layout.version(),
        }
    }

    /// Project the floor and back wall.
    #[must_use]
    pub fn room(&self, room: Room, mode: ViewportMode) -> RoomShell {
        let camera = RoomCamera::for_mode(mode);
        let floor_width = room.floor_width * self.scale;
        let floor_depth = room.floor_depth * self.scale;
        let wall = (!mode.is_engineer()).then(|| Wall {
            width: floor_width,
            height: room.wall_height * self.scale,
            depth_offset: -floor_depth / 2.0,
        });
        RoomShell {
            floor_width,
            floor_depth,
            floor_transform: camera.transform() * Affine3::rotate_x(90.0),
            wall,
            floor_grid: !mode.is_engineer(),
        }
    }

    /// Project one module.
    #[must_use]
    pub fn module(&self, module: &Module, mode: ViewportMode, selected: Option<&ModuleId>) -> ModuleBox {
        let engineer = mode.is_engineer();
        let is_selected = selected == Some(&module.id);
        let s = self.scale;
        let (w, h, d) = (module.width * s, module.height * s, module.depth * s);

        let anchor = Point::new(module.x * s, -module.y * s);
        let depth_offset = module.z * s;
        let camera = RoomCamera::for_mode(mode);
        let transform = camera.transform()
            * Affine3::translate(Vec3::new(anchor.x, anchor.y, depth_offset))
            * Affine3::rotate_y(module.rotation);

        let color = if engineer { SCHEMATIC_FILL } else { (self.palette)(&module.finish) };
        let faces = FaceSide::ALL
            .iter()
            .map(|&side| build_face(side, w, h, d, color, engineer))
            .collect();

        let callouts = if is_selected || engineer { callouts(module, w, h) } else { Vec::new() };
        let slats = if module.is_ripado && !engineer { slats(module.width, w, color) } else { Vec::new() };

        ModuleBox {
            id: module.id.clone(),
            anchor,
            depth_offset,
            rotation: module.rotation,
            width: w,
            height: h,
            depth: d,
            selected: is_selected,
            faces,
            callouts,
            slats,
            handle: !module.is_ripado && module.category == KITCHEN_CATEGORY && !engineer,
            watermark: engineer.then(|| module.kind.clone()),
            corners: box_corners(w, h, d)
                .iter()
                .map(|&c| camera.project(transform.apply(c)))
                .collect(),
            transform,
        }
    }
}

fn build_face(side: FaceSide, w: f64, h: f64, d: f64, color: &str, engineer: bool) -> Face {
    let (width, height, center) = match side {
        FaceSide::Front => (w, h, Vec3::new(0.0, -h / 2.0, d / 2.0)),
        FaceSide::Left => (d, h, Vec3::new(-w / 2.0, -h / 2.0, 0.0)),
        FaceSide::Right => (d, h, Vec3::new(w / 2.0, -h / 2.0, 0.0)),
        FaceSide::Top => (w, d, Vec3::new(0.0, -h, 0.0)),
        FaceSide::Bottom => (w, d, Vec3::new(0.0, 0.0, 0.0)),
    };
    let brightness = side.brightness();
    Face {
        side,
        width,
        height,
        center,
        brightness,
        color: color.to_string(),
        fill: shade_hex(color, brightness),
        outline: engineer.then_some(SCHEMATIC_OUTLINE),
    }
}

fn callouts(module: &Module, w: f64, h: f64) -> Vec<Callout> {
    vec![
        Callout {
            dimension: Dimension::Width,
            value_mm: module.width,
            label: format!("{}mm", module.width),
            position: Point::new(0.0, -h - CALLOUT_GAP),
            rotation: 0.0,
            lift: CALLOUT_LIFT,
        },
        Callout {
            dimension: Dimension::Height,
            value_mm: module.height,
            label: format!("{}mm", module.height),
            position: Point::new(w / 2.0 + CALLOUT_GAP, -h / 2.0),
            rotation: 90.0,
            lift: CALLOUT_LIFT,
        },
    ]
}

/// Split the front face into `floor(width_mm / 35)` equal strips, at most
/// [`MAX_SLATS`].
fn slats(width_mm: f64, face_width: f64, color: &str) -> Vec<Slat> {
    let pitches = (width_mm / SLAT_PITCH_MM).floor();
    if pitches.is_nan() || pitches < 1.0 {
        return Vec::new();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = pitches.min(f64::from(MAX_SLATS)) as usize;
    #[allow(clippy::cast_precision_loss)]
    let strip = face_width / count as f64;
    (0..count)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let x = -face_width / 2.0 + strip * i as f64;
            Slat { x, width: strip, fill: color.to_string() }
        })
        .collect()
}

fn box_corners(w: f64, h: f64, d: f64) -> [Vec3; 8] {
    let (hw, hd) = (w / 2.0, d / 2.0);
    [
        Vec3::new(-hw, 0.0, hd),
        Vec3::new(hw, 0.0, hd),
        Vec3::new(hw, -h, hd),
        Vec3::new(-hw, -h, hd),
        Vec3::new(-hw, 0.0, -hd),
        Vec3::new(hw, 0.0, -hd),
        Vec3::new(hw, -h, -hd),
        Vec3::new(-hw, -h, -hd),
    ]
}
