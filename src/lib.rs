//! Layout store and viewport projection for the cabinetry designer.
//!
//! This crate holds the part of the furniture-design front-end that carries
//! real state and geometry: the placed modules of a project and the pseudo-3D
//! preview of them. The host shell (views, CRM, calls to the generative
//! service) wires UI events to a [`engine::Studio`] and composites the
//! [`project::Scene`] it returns. Nothing here is asynchronous or persistent.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::Studio`]: layout, selection, viewport and tool state |
//! | [`layout`] | Module and room types and the in-memory layout store |
//! | [`proposal`] | Lenient coercion of generator-supplied module descriptors |
//! | [`catalog`] | Static module library and finish colors |
//! | [`camera`] | Viewport presets and the affine toolkit |
//! | [`project`] | Projection of modules and room into presentation records |
//! | [`hit`] | Screen-space picking over projected boxes |
//! | [`config`] | Environment-driven [`config::StudioConfig`] |
//! | [`consts`] | Shared numeric constants (scale, shading table, defaults) |

pub mod camera;
pub mod catalog;
pub mod config;
pub mod consts;
pub mod engine;
pub mod hit;
pub mod layout;
pub mod project;
pub mod proposal;
