//! Static catalog data: the module library offered to the designer and the
//! finish table used to color faces.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use serde::Serialize;

use crate::consts::DEFAULT_FINISH_COLOR;

/// One entry in the module library.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CatalogEntry {
    /// Catalog type name; becomes the module's `type`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub category: &'static str,
    pub price: f64,
    /// Icon identifier used by the shell's library panel.
    pub icon: &'static str,
    /// Width in millimeters.
    pub width: f64,
    /// Height in millimeters.
    pub height: f64,
    /// Depth in millimeters.
    pub depth: f64,
}

pub const MODULE_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        kind: "Balcão Base 2P",
        category: "Cozinha",
        price: 1250.0,
        icon: "border-bottom",
        width: 800.0,
        height: 720.0,
        depth: 580.0,
    },
    CatalogEntry {
        kind: "Aéreo Lux Basculante",
        category: "Cozinha",
        price: 980.0,
        icon: "border-top",
        width: 800.0,
        height: 400.0,
        depth: 350.0,
    },
    CatalogEntry {
        kind: "Painel Ripado SD",
        category: "Sala",
        price: 1800.0,
        icon: "align-justify",
        width: 1200.0,
        height: 2600.0,
        depth: 45.0,
    },
    CatalogEntry {
        kind: "Torre Fornos 2P",
        category: "Cozinha",
        price: 2450.0,
        icon: "columns",
        width: 600.0,
        height: 2200.0,
        depth: 580.0,
    },
    CatalogEntry {
        kind: "Sofá Living SD",
        category: "Decoração",
        price: 3500.0,
        icon: "couch",
        width: 2200.0,
        height: 450.0,
        depth: 900.0,
    },
    CatalogEntry {
        kind: "Ilha Gourmet",
        category: "Cozinha",
        price: 4200.0,
        icon: "square",
        width: 1800.0,
        height: 900.0,
        depth: 900.0,
    },
];

/// A named surface finish and its display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Finish {
    pub name: &'static str,
    /// Display color as `#rrggbb`.
    pub color: &'static str,
}

pub const FINISHES: &[Finish] = &[
    Finish { name: "Branco Tx", color: "#ffffff" },
    Finish { name: "Louredo Matt", color: "#d4af37" },
    Finish { name: "Grafite Silk", color: "#444444" },
    Finish { name: "Carvalho SD", color: "#a67b5b" },
    Finish { name: "Preto Absoluto", color: "#1a1a1a" },
];

/// Look up a catalog entry by type name, ignoring case and surrounding whitespace.
#[must_use]
pub fn catalog_entry(kind: &str) -> Option<&'static CatalogEntry> {
    let trimmed = kind.trim();
    MODULE_CATALOG
        .iter()
        .find(|entry| entry.kind.to_lowercase() == trimmed.to_lowercase())
}

/// Resolve a finish name to its display color. Unknown names render white.
#[must_use]
pub fn finish_color(name: &str) -> &'static str {
    FINISHES
        .iter()
        .find(|finish| finish.name == name)
        .map_or(DEFAULT_FINISH_COLOR, |finish| finish.color)
}

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
#[must_use]
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => Some((
            channel(&hex[0..1].repeat(2))?,
            channel(&hex[1..2].repeat(2))?,
            channel(&hex[2..3].repeat(2))?,
        )),
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => None,
    }
}

fn channel(pair: &str) -> Option<u8> {
    u8::from_str_radix(pair, 16).ok()
}

/// Multiply each channel of a hex color by `brightness`, clamping to 255.
///
/// Mirrors a CSS `brightness()` filter. Values that are not hex colors are
/// returned untouched.
#[must_use]
pub fn shade_hex(color: &str, brightness: f64) -> String {
    let Some((r, g, b)) = parse_hex_rgb(color) else {
        return color.to_string();
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scale = |c: u8| (f64::from(c) * brightness).round().clamp(0.0, 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", scale(r), scale(g), scale(b))
}
