//! Core 2-D particle-field simulation library for the animated galaxy effect.
//!
//! Main components:
//! - [`particle`] — particle state and the seeded particle store.
//! - [`settings`] — per-tick configuration snapshot and sanitization.
//! - [`phases`] — the per-tick simulation passes (forces, collisions, integration, proximity).
//! - [`frame`] — reusable renderable frame output (points and connection segments).
//! - [`engine`] — the stateful engine driven once per frame by a host render loop.
//! - [`types`] — shared simulation-space types.

pub mod engine;
pub mod frame;
pub mod particle;
pub mod phases;
pub mod settings;
pub mod types;
