//! Boundary with the external layout generator.
//!
//! The generator returns loosely-typed JSON: any field may be missing, a
//! string instead of a number, or garbage. Nothing here trusts that shape.
//! Each descriptor is coerced field by field, falling back to a named default
//! per field, so one bad value never rejects the descriptor and one bad
//! descriptor never rejects the batch.

#[cfg(test)]
#[path = "proposal_test.rs"]
mod proposal_test;

use serde_json::{Map, Value};
use tracing::warn;

use crate::consts::{GENERATED_DEPTH_MM, GENERATED_HEIGHT_MM, GENERATED_TYPE, GENERATED_WIDTH_MM};

/// An untyped module descriptor as produced by the generator.
pub type ModuleDescriptor = Map<String, Value>;

/// Error returned by [`parse_proposal`].
#[derive(Debug, thiserror::Error)]
pub enum ProposalError {
    /// The response text is not JSON at all.
    #[error("proposal is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// The response parsed but has no `modules` array.
    #[error("proposal has no `modules` array")]
    MissingModules,
}

/// A descriptor after coercion: every field present and well-typed.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedModule {
    pub kind: String,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub rotation: f64,
}

/// Extract the module descriptors from a raw `{ "modules": [...] }` response.
///
/// Array entries that are not objects are skipped.
///
/// # Errors
///
/// Returns [`ProposalError::InvalidJson`] for unparseable text and
/// [`ProposalError::MissingModules`] when `modules` is absent or not an array.
pub fn parse_proposal(text: &str) -> Result<Vec<ModuleDescriptor>, ProposalError> {
    let value: Value = serde_json::from_str(text)?;
    let Some(entries) = value.get("modules").and_then(Value::as_array) else {
        return Err(ProposalError::MissingModules);
    };
    let descriptors = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match entry {
            Value::Object(map) => Some(map.clone()),
            other => {
                warn!(index, kind = json_kind(other), "skipping non-object module descriptor");
                None
            }
        })
        .collect();
    Ok(descriptors)
}

/// Coerce one descriptor, defaulting each field independently.
#[must_use]
pub fn coerce_descriptor(descriptor: &ModuleDescriptor) -> GeneratedModule {
    GeneratedModule {
        kind: coerce_type(descriptor.get("type")),
        width: coerce_dimension(descriptor, "width", GENERATED_WIDTH_MM),
        height: coerce_dimension(descriptor, "height", GENERATED_HEIGHT_MM),
        depth: coerce_dimension(descriptor, "depth", GENERATED_DEPTH_MM),
        x: coerce_field(descriptor, "x", 0.0),
        y: coerce_field(descriptor, "y", 0.0),
        z: coerce_field(descriptor, "z", 0.0),
        rotation: coerce_field(descriptor, "rotation", 0.0),
    }
}

/// Read a loosely-typed number.
///
/// Finite non-zero numbers pass through; numeric strings are trimmed and
/// parsed. Zero, non-finite values, and every other JSON type yield `None`.
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (parsed.is_finite() && parsed != 0.0).then_some(parsed)
}

fn coerce_field(descriptor: &ModuleDescriptor, field: &'static str, default: f64) -> f64 {
    let Some(raw) = descriptor.get(field) else {
        return default;
    };
    match coerce_number(raw) {
        Some(v) => v,
        None => {
            if !is_zero(raw) {
                warn!(field, value = %raw, default, "descriptor field is not a number; using default");
            }
            default
        }
    }
}

fn coerce_dimension(descriptor: &ModuleDescriptor, field: &'static str, default: f64) -> f64 {
    let value = coerce_field(descriptor, field, default);
    if value > 0.0 {
        value
    } else {
        warn!(field, value, default, "descriptor dimension is not positive; using default");
        default
    }
}

fn coerce_type(value: Option<&Value>) -> String {
    match value.and_then(Value::as_str).map(str::trim) {
        Some(kind) if !kind.is_empty() => kind.to_string(),
        _ => GENERATED_TYPE.to_string(),
    }
}

fn is_zero(value: &Value) -> bool {
    value.as_f64().is_some_and(|v| v == 0.0)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
