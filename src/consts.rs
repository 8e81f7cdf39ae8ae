//! Shared numeric constants for the cabinetry crate.

// ── Projection ──────────────────────────────────────────────────

/// Millimeters-to-display-unit factor shared by the room shell and modules.
pub const DEFAULT_SCALE: f64 = 0.15;

/// CSS-style perspective distance used by the oblique viewports.
pub const PERSPECTIVE_DISTANCE: f64 = 3000.0;

/// Width of one slat on a ripado panel, in millimeters.
pub const SLAT_PITCH_MM: f64 = 35.0;

/// Upper bound on slats per panel. Wider panels get wider strips.
pub const MAX_SLATS: u32 = 512;

/// How far dimension callouts float toward the viewer, in display units.
pub const CALLOUT_LIFT: f64 = 120.0;

/// Gap between a module edge and its dimension callout, in display units.
pub const CALLOUT_GAP: f64 = 64.0;

// ── Face shading ────────────────────────────────────────────────

pub const FRONT_BRIGHTNESS: f64 = 1.0;
pub const LEFT_BRIGHTNESS: f64 = 0.7;
pub const RIGHT_BRIGHTNESS: f64 = 0.8;
pub const TOP_BRIGHTNESS: f64 = 1.1;
pub const BOTTOM_BRIGHTNESS: f64 = 0.5;

// ── Colors ──────────────────────────────────────────────────────

/// Fallback finish color for names missing from the finish table.
pub const DEFAULT_FINISH_COLOR: &str = "#ffffff";

/// Translucent face fill used by the engineer viewport instead of finishes.
pub const SCHEMATIC_FILL: &str = "rgba(212, 175, 55, 0.05)";

/// Face outline drawn in the engineer viewport.
pub const SCHEMATIC_OUTLINE: &str = "rgba(212, 175, 55, 0.2)";

// ── Module defaults ─────────────────────────────────────────────

pub const DEFAULT_FINISH: &str = "Branco Tx";

/// Fallbacks applied to generated module descriptors.
pub const GENERATED_WIDTH_MM: f64 = 800.0;
pub const GENERATED_HEIGHT_MM: f64 = 720.0;
pub const GENERATED_DEPTH_MM: f64 = 580.0;
pub const GENERATED_PRICE: f64 = 1500.0;
pub const GENERATED_TYPE: &str = "Módulo IA";
pub const GENERATED_CATEGORY: &str = "IA Generated";

/// Type-name marker for slatted panels, compared case-insensitively.
pub const RIPADO_MARKER: &str = "ripado";

/// Category that gets a door handle drawn on its front face.
pub const KITCHEN_CATEGORY: &str = "Cozinha";

// ── Room defaults ───────────────────────────────────────────────

pub const DEFAULT_FLOOR_WIDTH_MM: f64 = 6000.0;
pub const DEFAULT_FLOOR_DEPTH_MM: f64 = 5000.0;
pub const DEFAULT_WALL_HEIGHT_MM: f64 = 2700.0;

// ── Ids ─────────────────────────────────────────────────────────

/// Length of a generated base36 module id.
pub const MODULE_ID_LEN: usize = 9;
