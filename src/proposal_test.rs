#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn descriptor(value: serde_json::Value) -> ModuleDescriptor {
    value.as_object().cloned().unwrap()
}

// =============================================================
// coerce_number
// =============================================================

#[test]
fn coerce_number_passes_finite_numbers() {
    assert_eq!(coerce_number(&json!(1250)), Some(1250.0));
    assert_eq!(coerce_number(&json!(-300.5)), Some(-300.5));
}

#[test]
fn coerce_number_parses_numeric_strings() {
    assert_eq!(coerce_number(&json!(" 900 ")), Some(900.0));
    assert_eq!(coerce_number(&json!("12.5")), Some(12.5));
}

#[test]
fn coerce_number_rejects_garbage() {
    assert_eq!(coerce_number(&json!("wide")), None);
    assert_eq!(coerce_number(&json!("800mm")), None);
    assert_eq!(coerce_number(&json!("")), None);
    assert_eq!(coerce_number(&json!(true)), None);
    assert_eq!(coerce_number(&json!(null)), None);
    assert_eq!(coerce_number(&json!([1, 2])), None);
    assert_eq!(coerce_number(&json!({"v": 1})), None);
}

#[test]
fn coerce_number_rejects_zero_and_non_finite_strings() {
    assert_eq!(coerce_number(&json!(0)), None);
    assert_eq!(coerce_number(&json!("0")), None);
    assert_eq!(coerce_number(&json!("NaN")), None);
    assert_eq!(coerce_number(&json!("inf")), None);
}

#[test]
fn coerce_number_keeps_extreme_finite_magnitudes() {
    assert_eq!(coerce_number(&json!("1e300")), Some(1e300));
    assert_eq!(coerce_number(&json!(1e-9)), Some(1e-9));
    assert_eq!(coerce_number(&json!("1e400")), None);
}

// =============================================================
// coerce_descriptor
// =============================================================

#[test]
fn coerce_descriptor_applies_all_defaults_for_type_only() {
    let generated = coerce_descriptor(&descriptor(json!({ "type": "Ripado Teste" })));
    assert_eq!(generated.kind, "Ripado Teste");
    assert_eq!(generated.width, 800.0);
    assert_eq!(generated.height, 720.0);
    assert_eq!(generated.depth, 580.0);
    assert_eq!(generated.x, 0.0);
    assert_eq!(generated.y, 0.0);
    assert_eq!(generated.z, 0.0);
    assert_eq!(generated.rotation, 0.0);
}

#[test]
fn coerce_descriptor_keeps_well_typed_fields() {
    let generated = coerce_descriptor(&descriptor(json!({
        "type": "Torre",
        "width": 600, "height": 2200, "depth": 580,
        "x": -1200, "y": 10, "z": 300, "rotation": 90
    })));
    assert_eq!(generated.width, 600.0);
    assert_eq!(generated.height, 2200.0);
    assert_eq!(generated.x, -1200.0);
    assert_eq!(generated.y, 10.0);
    assert_eq!(generated.z, 300.0);
    assert_eq!(generated.rotation, 90.0);
}

#[test]
fn coerce_descriptor_defaults_each_bad_field_independently() {
    let generated = coerce_descriptor(&descriptor(json!({
        "type": "Balcão",
        "width": "wide",
        "height": "450",
        "depth": null,
        "x": "left",
        "z": 150
    })));
    assert_eq!(generated.width, 800.0);
    assert_eq!(generated.height, 450.0);
    assert_eq!(generated.depth, 580.0);
    assert_eq!(generated.x, 0.0);
    assert_eq!(generated.z, 150.0);
}

#[test]
fn coerce_descriptor_replaces_non_positive_dimensions() {
    let generated = coerce_descriptor(&descriptor(json!({ "width": -10, "height": 0, "depth": -0.5 })));
    assert_eq!(generated.width, 800.0);
    assert_eq!(generated.height, 720.0);
    assert_eq!(generated.depth, 580.0);
}

#[test]
fn coerce_descriptor_defaults_missing_or_blank_type() {
    assert_eq!(coerce_descriptor(&descriptor(json!({}))).kind, "Módulo IA");
    assert_eq!(coerce_descriptor(&descriptor(json!({ "type": "   " }))).kind, "Módulo IA");
    assert_eq!(coerce_descriptor(&descriptor(json!({ "type": 42 }))).kind, "Módulo IA");
}

#[test]
fn coerce_descriptor_passes_huge_and_tiny_dimensions() {
    let generated = coerce_descriptor(&descriptor(json!({ "width": "1e300", "depth": 1e-9, "rotation": 1e12 })));
    assert_eq!(generated.width, 1e300);
    assert_eq!(generated.depth, 1e-9);
    assert_eq!(generated.rotation, 1e12);
}

// =============================================================
// parse_proposal
// =============================================================

#[test]
fn parse_proposal_extracts_object_entries() {
    let text = r#"{ "modules": [ { "type": "A" }, { "type": "B", "width": 400 } ] }"#;
    let descriptors = parse_proposal(text).unwrap();
    assert_eq!(descriptors.len(), 2);
    assert_eq!(descriptors[1].get("width"), Some(&json!(400)));
}

#[test]
fn parse_proposal_skips_non_object_entries() {
    let text = r#"{ "modules": [ 7, "junk", null, { "type": "Ilha" } ] }"#;
    let descriptors = parse_proposal(text).unwrap();
    assert_eq!(descriptors.len(), 1);
    assert_eq!(descriptors[0].get("type"), Some(&json!("Ilha")));
}

#[test]
fn parse_proposal_accepts_empty_module_list() {
    assert!(parse_proposal(r#"{ "modules": [] }"#).unwrap().is_empty());
}

#[test]
fn parse_proposal_rejects_invalid_json() {
    let err = parse_proposal("{ modules: ").unwrap_err();
    assert!(matches!(err, ProposalError::InvalidJson(_)));
    assert!(err.to_string().starts_with("proposal is not valid JSON"));
}

#[test]
fn parse_proposal_rejects_missing_modules() {
    assert!(matches!(parse_proposal("{}"), Err(ProposalError::MissingModules)));
    assert!(matches!(parse_proposal(r#"{ "modules": {} }"#), Err(ProposalError::MissingModules)));
    assert!(matches!(parse_proposal("[]"), Err(ProposalError::MissingModules)));
}
