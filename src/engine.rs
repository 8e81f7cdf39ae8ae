use tracing::debug;

use crate::camera::{Point, ToolMode, ViewportMode};
use crate::catalog::{CatalogEntry, catalog_entry};
use crate::config::StudioConfig;
use crate::hit;
use crate::layout::{Axis, EnvironmentSettings, Layout, LayoutError, Module, ModuleId, PartialModule, RoomField};
use crate::project::{Projector, Scene};
use crate::proposal::{ModuleDescriptor, ProposalError, parse_proposal};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Designer state for one open project: the layout plus everything the
/// shell toggles around it.
///
/// All calls are synchronous. The shell mutates through these methods and
/// re-reads [`Studio::scene`] afterwards.
pub struct Studio {
    layout: Layout,
    selected: Option<ModuleId>,
    viewport: ViewportMode,
    tool: ToolMode,
    projector: Projector,
    generated_price: f64,
}

impl Default for Studio {
    fn default() -> Self {
        Self::new(&StudioConfig::default())
    }
}

impl Studio {
    /// An empty project sized by `config`.
    #[must_use]
    pub fn new(config: &StudioConfig) -> Self {
        Self::open(Layout::new("1", "", "", config.room), config)
    }

    /// Open an existing layout, nothing selected.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when the layout breaks a store invariant, such
    /// as duplicate ids or a non-positive dimension.
    pub fn with_layout(layout: Layout, config: &StudioConfig) -> Result<Self, LayoutError> {
        layout.validate()?;
        Ok(Self::open(layout, config))
    }

    fn open(layout: Layout, config: &StudioConfig) -> Self {
        Self {
            layout,
            selected: None,
            viewport: ViewportMode::default(),
            tool: ToolMode::default(),
            projector: Projector::new(config.scale),
            generated_price: config.generated_price,
        }
    }

    // --- Layout mutations ---

    /// Place a catalog module at the origin and select it.
    pub fn add_module(&mut self, entry: &CatalogEntry) -> ModuleId {
        let id = self.layout.add_module(entry);
        self.selected = Some(id.clone());
        id
    }

    /// [`Studio::add_module`] by catalog type name. `None` if the type is unknown.
    pub fn add_from_catalog(&mut self, kind: &str) -> Option<ModuleId> {
        let Some(entry) = catalog_entry(kind) else {
            debug!(kind, "catalog add ignored: unknown type");
            return None;
        };
        Some(self.add_module(entry))
    }

    /// Append generated modules. Selection is left alone.
    pub fn add_generated(&mut self, descriptors: &[ModuleDescriptor]) -> Vec<ModuleId> {
        self.layout.add_generated(descriptors, self.generated_price)
    }

    /// Parse a raw generator response and append its modules.
    ///
    /// # Errors
    ///
    /// Returns [`ProposalError`] when the response is not a module list. The
    /// layout is untouched in that case.
    pub fn apply_proposal(&mut self, text: &str) -> Result<Vec<ModuleId>, ProposalError> {
        let descriptors = parse_proposal(text)?;
        Ok(self.add_generated(&descriptors))
    }

    pub fn update_module(&mut self, id: &ModuleId, partial: &PartialModule) -> bool {
        self.layout.update_module(id, partial)
    }

    /// Update the selected module. No-op without a selection.
    pub fn update_selected(&mut self, partial: &PartialModule) -> bool {
        let Some(id) = self.selection().cloned() else {
            return false;
        };
        self.layout.update_module(&id, partial)
    }

    /// Move a module along one axis. Only the selected module moves; any
    /// other id, or an empty selection, is a no-op. Use
    /// [`Layout::move_module`] through [`Studio::layout_mut`] to move
    /// arbitrary modules.
    pub fn move_module(&mut self, id: &ModuleId, axis: Axis, delta: f64) -> bool {
        if self.selection() != Some(id) {
            debug!(%id, "move ignored: module is not selected");
            return false;
        }
        self.layout.move_module(id, axis, delta)
    }

    pub fn move_selected(&mut self, axis: Axis, delta: f64) -> bool {
        let Some(id) = self.selection().cloned() else {
            return false;
        };
        self.layout.move_module(&id, axis, delta)
    }

    /// Remove a module, clearing the selection if it pointed there.
    pub fn remove_module(&mut self, id: &ModuleId) -> Option<Module> {
        let removed = self.layout.remove_module(id)?;
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        Some(removed)
    }

    pub fn remove_selected(&mut self) -> Option<Module> {
        let id = self.selection().cloned()?;
        self.remove_module(&id)
    }

    pub fn resize_room(&mut self, field: RoomField, value: f64) -> bool {
        self.layout.resize_room(field, value)
    }

    pub fn set_settings(&mut self, settings: EnvironmentSettings) {
        self.layout.set_settings(settings);
    }

    // --- Selection / viewport / tool ---

    /// Select a module, or clear with `None`. Unknown ids clear the selection.
    pub fn select(&mut self, id: Option<ModuleId>) {
        self.selected = id.filter(|id| self.layout.contains(id));
    }

    /// Select whatever is under `screen_pt`, clearing the selection on a miss.
    pub fn select_at(&mut self, screen_pt: Point) -> Option<ModuleId> {
        let scene = self.scene();
        let hit = hit::pick(&scene, screen_pt).cloned();
        self.selected.clone_from(&hit);
        hit
    }

    pub fn set_viewport(&mut self, mode: ViewportMode) {
        self.viewport = mode;
    }

    pub fn set_tool(&mut self, tool: ToolMode) {
        self.tool = tool;
    }

    // --- Queries ---

    /// The selection, if it still names a module in the layout.
    #[must_use]
    pub fn selection(&self) -> Option<&ModuleId> {
        self.selected.as_ref().filter(|id| self.layout.contains(id))
    }

    #[must_use]
    pub fn selected_module(&self) -> Option<&Module> {
        self.selected.as_ref().and_then(|id| self.layout.module(id))
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Mutable access for project metadata (name, client).
    pub fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    #[must_use]
    pub fn viewport(&self) -> ViewportMode {
        self.viewport
    }

    #[must_use]
    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    #[must_use]
    pub fn total_price(&self) -> f64 {
        self.layout.total_price()
    }

    /// Project the current state for compositing.
    #[must_use]
    pub fn scene(&self) -> Scene {
        self.projector.scene(&self.layout, self.viewport, self.selection())
    }
}
