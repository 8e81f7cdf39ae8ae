#![allow(clippy::float_cmp)]

use std::collections::HashSet;

use super::*;
use crate::catalog::{MODULE_CATALOG, catalog_entry};
use crate::layout::{FloorTexture, Room};

// =============================================================
// Helpers
// =============================================================

fn studio() -> Studio {
    Studio::default()
}

fn add(studio: &mut Studio, kind: &str) -> ModuleId {
    studio.add_from_catalog(kind).unwrap()
}

fn finish(name: &str) -> PartialModule {
    PartialModule { finish: Some(name.to_string()), ..Default::default() }
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_studio_is_empty_with_configured_room() {
    let config = StudioConfig {
        room: Room { floor_width: 4000.0, floor_depth: 3000.0, wall_height: 2500.0 },
        ..StudioConfig::default()
    };
    let s = Studio::new(&config);
    assert!(s.layout().is_empty());
    assert_eq!(s.layout().room().floor_width, 4000.0);
    assert!(s.selection().is_none());
    assert_eq!(s.viewport(), ViewportMode::Perspective);
    assert_eq!(s.tool(), ToolMode::Select);
    assert_eq!(s.total_price(), 0.0);
}

#[test]
fn with_layout_opens_valid_layout_without_selection() {
    let mut layout = Layout::default();
    let id = layout.add_module(catalog_entry("Ilha Gourmet").unwrap());
    let s = Studio::with_layout(layout, &StudioConfig::default()).unwrap();
    assert!(s.layout().contains(&id));
    assert!(s.selection().is_none());
}

#[test]
fn with_layout_refuses_broken_room() {
    let room = Room { floor_width: -1.0, ..Room::default() };
    let layout = Layout::new("9", "Sala", "Bia", room);
    let err = Studio::with_layout(layout, &StudioConfig::default()).err().unwrap();
    assert_eq!(err, LayoutError::InvalidRoom { field: RoomField::FloorWidth, value: -1.0 });
}

#[test]
fn stored_layout_with_duplicate_ids_never_reaches_a_studio() {
    let mut layout = Layout::default();
    let first = layout.add_module(catalog_entry("Ilha Gourmet").unwrap());
    layout.add_module(catalog_entry("Torre Fornos 2P").unwrap());
    let mut value = serde_json::to_value(&layout).unwrap();
    value["modules"][1]["id"] = serde_json::json!(first.as_str());
    assert!(serde_json::from_value::<Layout>(value).is_err());
}

// =============================================================
// Adding
// =============================================================

#[test]
fn add_module_selects_new_module() {
    let mut s = studio();
    let first = add(&mut s, "Ilha Gourmet");
    assert_eq!(s.selection(), Some(&first));
    let second = add(&mut s, "Torre Fornos 2P");
    assert_eq!(s.selection(), Some(&second));
    assert_eq!(s.selected_module().unwrap().kind, "Torre Fornos 2P");
}

#[test]
fn add_module_ids_are_distinct() {
    let mut s = studio();
    let mut seen = HashSet::new();
    for _ in 0..100 {
        for entry in MODULE_CATALOG {
            assert!(seen.insert(s.add_module(entry)));
        }
    }
}

#[test]
fn add_from_catalog_unknown_type_is_none() {
    let mut s = studio();
    assert!(s.add_from_catalog("Cama Box").is_none());
    assert!(s.layout().is_empty());
}

#[test]
fn apply_proposal_appends_without_touching_selection() {
    let mut s = studio();
    let kept = add(&mut s, "Balcão Base 2P");
    let ids = s
        .apply_proposal(r#"{ "modules": [ { "type": "Painel Ripado" }, { "type": "Aéreo", "x": "1200", "y": 1500 } ] }"#)
        .unwrap();
    assert_eq!(ids.len(), 2);
    assert_eq!(s.layout().len(), 3);
    assert_eq!(s.selection(), Some(&kept));
    let aereo = s.layout().module(&ids[1]).unwrap();
    assert_eq!((aereo.x, aereo.y), (1200.0, 1500.0));
    assert_eq!(aereo.price, 1500.0);
    assert!(s.layout().module(&ids[0]).unwrap().is_ripado);
}

#[test]
fn apply_proposal_with_enormous_ripado_still_projects() {
    let mut s = studio();
    let ids = s.apply_proposal(r#"{ "modules": [ { "type": "Painel Ripado", "width": "1e300" } ] }"#).unwrap();
    assert_eq!(s.layout().module(&ids[0]).unwrap().width, 1e300);
    let scene = s.scene();
    assert_eq!(scene.modules.len(), 1);
    assert!(!scene.modules[0].slats.is_empty());
}

#[test]
fn apply_proposal_uses_configured_price() {
    let config = StudioConfig { generated_price: 99.0, ..StudioConfig::default() };
    let mut s = Studio::new(&config);
    let ids = s.apply_proposal(r#"{ "modules": [ {} ] }"#).unwrap();
    assert_eq!(s.layout().module(&ids[0]).unwrap().price, 99.0);
}

#[test]
fn apply_proposal_error_leaves_layout_untouched() {
    let mut s = studio();
    add(&mut s, "Ilha Gourmet");
    let version = s.layout().version();
    assert!(s.apply_proposal("not json").is_err());
    assert!(matches!(s.apply_proposal(r#"{ "layout": [] }"#), Err(ProposalError::MissingModules)));
    assert_eq!(s.layout().len(), 1);
    assert_eq!(s.layout().version(), version);
}

// =============================================================
// Updating / moving
// =============================================================

#[test]
fn update_selected_changes_finish_only() {
    let mut s = studio();
    add(&mut s, "Balcão Base 2P");
    let before = s.selected_module().cloned().unwrap();
    assert!(s.update_selected(&finish("Grafite Silk")));
    let after = s.selected_module().unwrap();
    assert_eq!(after.finish, "Grafite Silk");
    assert_eq!(Module { finish: before.finish.clone(), ..after.clone() }, before);
}

#[test]
fn update_selected_without_selection_is_noop() {
    let mut s = studio();
    let id = add(&mut s, "Balcão Base 2P");
    s.select(None);
    assert!(!s.update_selected(&finish("Grafite Silk")));
    assert_eq!(s.layout().module(&id).unwrap().finish, "Branco Tx");
}

#[test]
fn update_module_unknown_id_is_noop() {
    let mut s = studio();
    add(&mut s, "Balcão Base 2P");
    assert!(!s.update_module(&ModuleId::new("unknown12"), &finish("Preto Absoluto")));
}

#[test]
fn move_selected_is_additive() {
    let mut s = studio();
    let id = add(&mut s, "Ilha Gourmet");
    s.move_selected(Axis::X, 100.0);
    s.move_selected(Axis::X, 100.0);
    s.move_selected(Axis::Z, -100.0);
    let module = s.layout().module(&id).unwrap();
    assert_eq!(module.x, 200.0);
    assert_eq!(module.z, -100.0);
}

#[test]
fn move_module_requires_a_selection() {
    let mut s = studio();
    let id = add(&mut s, "Ilha Gourmet");
    s.select(None);
    assert!(!s.move_module(&id, Axis::X, 100.0));
    assert!(!s.move_selected(Axis::X, 100.0));
    assert_eq!(s.layout().module(&id).unwrap().x, 0.0);

    s.select(Some(id.clone()));
    assert!(s.move_module(&id, Axis::Y, 50.0));
    assert_eq!(s.layout().module(&id).unwrap().y, 50.0);
}

#[test]
fn move_module_only_moves_the_selected_module() {
    let mut s = studio();
    let other = add(&mut s, "Ilha Gourmet");
    let selected = add(&mut s, "Torre Fornos 2P");
    assert!(!s.move_module(&other, Axis::X, 100.0));
    assert_eq!(s.layout().module(&other).unwrap().x, 0.0);
    assert!(s.move_module(&selected, Axis::X, 100.0));
    assert_eq!(s.layout().module(&selected).unwrap().x, 100.0);
}

#[test]
fn move_module_unknown_id_is_noop() {
    let mut s = studio();
    add(&mut s, "Ilha Gourmet");
    assert!(!s.move_module(&ModuleId::new("ghost"), Axis::X, 100.0));
}

// =============================================================
// Removing / selection healing
// =============================================================

#[test]
fn remove_selected_module_clears_selection() {
    let mut s = studio();
    let id = add(&mut s, "Ilha Gourmet");
    assert!(s.remove_module(&id).is_some());
    assert!(s.selection().is_none());
    assert!(s.selected_module().is_none());
}

#[test]
fn remove_other_module_keeps_selection() {
    let mut s = studio();
    let first = add(&mut s, "Ilha Gourmet");
    let second = add(&mut s, "Torre Fornos 2P");
    s.remove_module(&first);
    assert_eq!(s.selection(), Some(&second));
}

#[test]
fn remove_selected_returns_removed_module() {
    let mut s = studio();
    add(&mut s, "Sofá Living SD");
    let removed = s.remove_selected().unwrap();
    assert_eq!(removed.kind, "Sofá Living SD");
    assert!(s.remove_selected().is_none());
}

#[test]
fn selection_heals_when_layout_is_edited_directly() {
    let mut s = studio();
    let id = add(&mut s, "Ilha Gourmet");
    s.layout_mut().remove_module(&id);
    assert!(s.selection().is_none());
    assert!(s.scene().selected.is_none());
}

#[test]
fn select_unknown_id_clears_selection() {
    let mut s = studio();
    add(&mut s, "Ilha Gourmet");
    s.select(Some(ModuleId::new("nobody")));
    assert!(s.selection().is_none());
}

#[test]
fn select_at_picks_and_misses() {
    let mut s = studio();
    let id = add(&mut s, "Balcão Base 2P");
    s.set_viewport(ViewportMode::Front);
    s.select(None);
    assert_eq!(s.select_at(Point::new(0.0, -50.0)), Some(id.clone()));
    assert_eq!(s.selection(), Some(&id));
    assert!(s.select_at(Point::new(500.0, 500.0)).is_none());
    assert!(s.selection().is_none());
}

// =============================================================
// Room / settings / totals
// =============================================================

#[test]
fn total_price_tracks_layout() {
    let mut s = studio();
    add(&mut s, "Balcão Base 2P");
    add(&mut s, "Aéreo Lux Basculante");
    let ilha = add(&mut s, "Ilha Gourmet");
    assert_eq!(s.total_price(), 6430.0);
    s.remove_module(&ilha);
    assert_eq!(s.total_price(), 2230.0);
}

#[test]
fn resize_room_and_settings_flow_through() {
    let mut s = studio();
    assert!(s.resize_room(RoomField::FloorWidth, 7200.0));
    s.set_settings(EnvironmentSettings { floor_texture: FloorTexture::Concreto, ..EnvironmentSettings::default() });
    assert_eq!(s.layout().room().floor_width, 7200.0);
    assert_eq!(s.layout().settings().floor_texture, FloorTexture::Concreto);
    let scene = s.scene();
    assert!((scene.room.floor_width - 1080.0).abs() < 1e-9);
}

// =============================================================
// Scene
// =============================================================

#[test]
fn scene_reflects_viewport_and_selection() {
    let mut s = studio();
    let id = add(&mut s, "Ilha Gourmet");
    s.set_viewport(ViewportMode::Top);
    let scene = s.scene();
    assert_eq!(scene.mode, ViewportMode::Top);
    assert_eq!(scene.selected.as_ref(), Some(&id));
    assert_eq!(scene.modules[0].callouts.len(), 2);
}

#[test]
fn switching_viewport_and_tool_leaves_modules_alone() {
    let mut s = studio();
    add(&mut s, "Painel Ripado SD");
    let before = s.layout().modules().to_vec();
    let version = s.layout().version();
    for mode in [ViewportMode::Engineer, ViewportMode::Side, ViewportMode::Front] {
        s.set_viewport(mode);
        s.set_tool(ToolMode::Rotate);
        let _scene = s.scene();
    }
    assert_eq!(s.layout().modules(), before.as_slice());
    assert_eq!(s.layout().version(), version);
    assert_eq!(s.tool(), ToolMode::Rotate);
}

#[test]
fn configured_scale_reaches_projection() {
    let config = StudioConfig { scale: 0.1, ..StudioConfig::default() };
    let mut s = Studio::new(&config);
    add(&mut s, "Balcão Base 2P");
    let scene = s.scene();
    assert!((scene.modules[0].width - 80.0).abs() < 1e-9);
}
