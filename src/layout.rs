//! Layout model: placed furniture modules, the room shell, and the store
//! that owns them.
//!
//! A [`Layout`] is one project. It exclusively owns an ordered sequence of
//! [`Module`]s; sequence order is paint order, not spatial order. Every
//! mutation that changes data bumps [`Layout::version`] so the shell can tell
//! when a fresh projection is needed.
//!
//! Mutations that name an unknown module id are silent no-ops. They report
//! whether anything happened through their return value but never fail.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::CatalogEntry;
use crate::consts::{
    DEFAULT_FINISH, DEFAULT_FLOOR_DEPTH_MM, DEFAULT_FLOOR_WIDTH_MM, DEFAULT_WALL_HEIGHT_MM, GENERATED_CATEGORY,
    MODULE_ID_LEN, RIPADO_MARKER,
};
use crate::proposal::{ModuleDescriptor, coerce_descriptor};

const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque, immutable identifier of a placed module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    /// Wrap an existing id string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Draw a random base36 token.
    #[must_use]
    pub fn random() -> Self {
        let mut rng = rand::rng();
        let token = (0..MODULE_ID_LEN)
            .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
            .collect();
        Self(token)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A placed furniture module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: ModuleId,
    /// Catalog type name.
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    /// Width in millimeters. Always positive.
    pub width: f64,
    /// Height in millimeters. Always positive.
    pub height: f64,
    /// Depth in millimeters. Always positive.
    pub depth: f64,
    /// Room-relative position in millimeters.
    pub x: f64,
    pub y: f64,
    /// Depth into the room.
    pub z: f64,
    /// Rotation about the vertical axis in degrees. Unbounded.
    pub rotation: f64,
    /// Name from the finish table.
    pub finish: String,
    pub price: f64,
    /// Render the front face as a slatted panel.
    pub is_ripado: bool,
}

impl Module {
    /// Rotation wrapped into `[0, 360)` for display.
    #[must_use]
    pub fn display_rotation(&self) -> f64 {
        self.rotation.rem_euclid(360.0)
    }

    /// Position component along `axis`.
    #[must_use]
    pub fn coordinate(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    fn coordinate_mut(&mut self, axis: Axis) -> &mut f64 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}

/// Whether a type name denotes a slatted panel.
#[must_use]
pub fn is_ripado_type(kind: &str) -> bool {
    kind.to_lowercase().contains(RIPADO_MARKER)
}

/// Sparse update for a module. Only present fields are applied; the id is
/// not updatable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialModule {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_ripado: Option<bool>,
}

/// Position axis for [`Layout::move_module`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Room dimension addressed by [`Layout::resize_room`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoomField {
    FloorWidth,
    FloorDepth,
    WallHeight,
}

/// Room shell dimensions in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub floor_width: f64,
    pub floor_depth: f64,
    pub wall_height: f64,
}

impl Default for Room {
    fn default() -> Self {
        Self {
            floor_width: DEFAULT_FLOOR_WIDTH_MM,
            floor_depth: DEFAULT_FLOOR_DEPTH_MM,
            wall_height: DEFAULT_WALL_HEIGHT_MM,
        }
    }
}

impl Room {
    #[must_use]
    pub fn get(&self, field: RoomField) -> f64 {
        match field {
            RoomField::FloorWidth => self.floor_width,
            RoomField::FloorDepth => self.floor_depth,
            RoomField::WallHeight => self.wall_height,
        }
    }
}

/// Floor material shown by the ambient panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloorTexture {
    #[default]
    Porcelanato,
    Madeira,
    Concreto,
}

/// Ambient display settings. Passive data; projection ignores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentSettings {
    pub floor_texture: FloorTexture,
    pub wall_color: String,
    pub ceiling_visible: bool,
}

impl Default for EnvironmentSettings {
    fn default() -> Self {
        Self { floor_texture: FloorTexture::default(), wall_color: "#ffffff".into(), ceiling_visible: false }
    }
}

/// Why a stored layout was refused.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LayoutError {
    #[error("module id {0} appears more than once")]
    DuplicateId(ModuleId),
    #[error("module {id}: {field} must be finite and positive, got {value}")]
    InvalidDimension { id: ModuleId, field: &'static str, value: f64 },
    #[error("module {id}: {field} must be finite, got {value}")]
    NonFinite { id: ModuleId, field: &'static str, value: f64 },
    #[error("module {id}: price must be finite and non-negative, got {value}")]
    InvalidPrice { id: ModuleId, value: f64 },
    #[error("room {field:?} must be finite and positive, got {value}")]
    InvalidRoom { field: RoomField, value: f64 },
}

/// One project: modules in paint order, the room, and ambient settings.
///
/// Deserialization goes through [`Layout::validate`], so a stored layout
/// holds the same guarantees as one built through the mutations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "LayoutRecord")]
pub struct Layout {
    pub id: String,
    pub name: String,
    pub client_name: String,
    modules: Vec<Module>,
    room: Room,
    settings: EnvironmentSettings,
    #[serde(skip)]
    version: u64,
}

impl Layout {
    /// Create an empty layout for a client project.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, client_name: impl Into<String>, room: Room) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            client_name: client_name.into(),
            modules: Vec::new(),
            room,
            settings: EnvironmentSettings::default(),
            version: 0,
        }
    }

    // --- Snapshot reads ---

    /// All modules in paint order.
    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    #[must_use]
    pub fn module(&self, id: &ModuleId) -> Option<&Module> {
        self.modules.iter().find(|m| &m.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ModuleId) -> bool {
        self.module(id).is_some()
    }

    #[must_use]
    pub fn room(&self) -> Room {
        self.room
    }

    #[must_use]
    pub fn settings(&self) -> &EnvironmentSettings {
        &self.settings
    }

    /// Counter bumped by every mutation that changed data.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Sum of module prices; `0.0` for an empty layout.
    #[must_use]
    pub fn total_price(&self) -> f64 {
        self.modules.iter().map(|m| m.price).sum()
    }

    // --- Mutations ---

    /// Place a new module copied from a catalog entry at the room origin.
    pub fn add_module(&mut self, entry: &CatalogEntry) -> ModuleId {
        let id = self.fresh_id();
        self.modules.push(Module {
            id: id.clone(),
            kind: entry.kind.to_string(),
            category: entry.category.to_string(),
            width: entry.width,
            height: entry.height,
            depth: entry.depth,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            rotation: 0.0,
            finish: DEFAULT_FINISH.to_string(),
            price: entry.price,
            is_ripado: is_ripado_type(entry.kind),
        });
        self.touch();
        debug!(%id, kind = entry.kind, "module added from catalog");
        id
    }

    /// Append modules built from loosely-typed descriptors.
    ///
    /// Every descriptor produces a module; bad fields fall back to defaults.
    /// Existing modules are never replaced.
    pub fn add_generated(&mut self, descriptors: &[ModuleDescriptor], price: f64) -> Vec<ModuleId> {
        let mut ids = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let generated = coerce_descriptor(descriptor);
            let id = self.fresh_id();
            let is_ripado = is_ripado_type(&generated.kind);
            self.modules.push(Module {
                id: id.clone(),
                kind: generated.kind,
                category: GENERATED_CATEGORY.to_string(),
                width: generated.width,
                height: generated.height,
                depth: generated.depth,
                x: generated.x,
                y: generated.y,
                z: generated.z,
                rotation: generated.rotation,
                finish: DEFAULT_FINISH.to_string(),
                price,
                is_ripado,
            });
            ids.push(id);
        }
        if !ids.is_empty() {
            self.touch();
        }
        info!(count = ids.len(), total = self.modules.len(), "generated modules appended");
        ids
    }

    /// Merge present fields into the module with `id`.
    ///
    /// Dimensions that are not finite and positive, and prices that are not
    /// finite and non-negative, are skipped. Returns false if no module matched.
    pub fn update_module(&mut self, id: &ModuleId, partial: &PartialModule) -> bool {
        let Some(module) = self.modules.iter_mut().find(|m| &m.id == id) else {
            debug!(%id, "update ignored: no such module");
            return false;
        };
        if let Some(ref kind) = partial.kind {
            module.kind.clone_from(kind);
        }
        if let Some(ref category) = partial.category {
            module.category.clone_from(category);
        }
        apply_dimension(&mut module.width, partial.width, "width", id);
        apply_dimension(&mut module.height, partial.height, "height", id);
        apply_dimension(&mut module.depth, partial.depth, "depth", id);
        apply_finite(&mut module.x, partial.x, "x", id);
        apply_finite(&mut module.y, partial.y, "y", id);
        apply_finite(&mut module.z, partial.z, "z", id);
        apply_finite(&mut module.rotation, partial.rotation, "rotation", id);
        if let Some(ref finish) = partial.finish {
            module.finish.clone_from(finish);
        }
        if let Some(price) = partial.price {
            if price.is_finite() && price >= 0.0 {
                module.price = price;
            } else {
                warn!(%id, price, "ignoring invalid price");
            }
        }
        if let Some(is_ripado) = partial.is_ripado {
            module.is_ripado = is_ripado;
        }
        self.touch();
        true
    }

    /// Shift the module with `id` by `delta` millimeters along `axis`.
    pub fn move_module(&mut self, id: &ModuleId, axis: Axis, delta: f64) -> bool {
        if !delta.is_finite() {
            warn!(%id, ?axis, delta, "ignoring non-finite move");
            return false;
        }
        let Some(module) = self.modules.iter_mut().find(|m| &m.id == id) else {
            debug!(%id, "move ignored: no such module");
            return false;
        };
        *module.coordinate_mut(axis) += delta;
        self.touch();
        true
    }

    /// Delete the module with `id`, returning it if it was present.
    pub fn remove_module(&mut self, id: &ModuleId) -> Option<Module> {
        let index = self.modules.iter().position(|m| &m.id == id)?;
        let removed = self.modules.remove(index);
        self.touch();
        debug!(%id, remaining = self.modules.len(), "module removed");
        Some(removed)
    }

    /// Set one room dimension. Values that are not finite and positive are ignored.
    pub fn resize_room(&mut self, field: RoomField, value: f64) -> bool {
        if !(value.is_finite() && value > 0.0) {
            warn!(?field, value, "ignoring invalid room dimension");
            return false;
        }
        match field {
            RoomField::FloorWidth => self.room.floor_width = value,
            RoomField::FloorDepth => self.room.floor_depth = value,
            RoomField::WallHeight => self.room.wall_height = value,
        }
        self.touch();
        true
    }

    /// Replace the ambient display settings.
    pub fn set_settings(&mut self, settings: EnvironmentSettings) {
        self.settings = settings;
        self.touch();
    }

    /// Check the store invariants: unique ids, positive finite dimensions,
    /// finite positions, non-negative prices and a positive room.
    ///
    /// # Errors
    ///
    /// Returns the first [`LayoutError`] found, in module order.
    pub fn validate(&self) -> Result<(), LayoutError> {
        for field in [RoomField::FloorWidth, RoomField::FloorDepth, RoomField::WallHeight] {
            let value = self.room.get(field);
            if !is_positive(value) {
                return Err(LayoutError::InvalidRoom { field, value });
            }
        }
        let mut seen = HashSet::with_capacity(self.modules.len());
        for m in &self.modules {
            if !seen.insert(&m.id) {
                return Err(LayoutError::DuplicateId(m.id.clone()));
            }
            for (field, value) in [("width", m.width), ("height", m.height), ("depth", m.depth)] {
                if !is_positive(value) {
                    return Err(LayoutError::InvalidDimension { id: m.id.clone(), field, value });
                }
            }
            for (field, value) in [("x", m.x), ("y", m.y), ("z", m.z), ("rotation", m.rotation)] {
                if !value.is_finite() {
                    return Err(LayoutError::NonFinite { id: m.id.clone(), field, value });
                }
            }
            if !(m.price.is_finite() && m.price >= 0.0) {
                return Err(LayoutError::InvalidPrice { id: m.id.clone(), value: m.price });
            }
        }
        Ok(())
    }

    fn fresh_id(&self) -> ModuleId {
        loop {
            let id = ModuleId::random();
            if !self.contains(&id) {
                return id;
            }
        }
    }

    fn touch(&mut self) {
        self.version += 1;
    }
}

/// Wire shape of a [`Layout`] before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutRecord {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    client_name: String,
    #[serde(default)]
    modules: Vec<Module>,
    #[serde(default)]
    room: Room,
    #[serde(default)]
    settings: EnvironmentSettings,
}

impl TryFrom<LayoutRecord> for Layout {
    type Error = LayoutError;

    fn try_from(record: LayoutRecord) -> Result<Self, Self::Error> {
        let layout = Self {
            id: record.id,
            name: record.name,
            client_name: record.client_name,
            modules: record.modules,
            room: record.room,
            settings: record.settings,
            version: 0,
        };
        layout.validate()?;
        Ok(layout)
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn apply_dimension(slot: &mut f64, value: Option<f64>, field: &'static str, id: &ModuleId) {
    let Some(value) = value else {
        return;
    };
    if value.is_finite() && value > 0.0 {
        *slot = value;
    } else {
        warn!(%id, field, value, "ignoring non-positive dimension");
    }
}

fn apply_finite(slot: &mut f64, value: Option<f64>, field: &'static str, id: &ModuleId) {
    let Some(value) = value else {
        return;
    };
    if value.is_finite() {
        *slot = value;
    } else {
        warn!(%id, field, value, "ignoring non-finite value");
    }
}
