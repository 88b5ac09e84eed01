//! # Models Module
//!
//! Water model definitions used as conversion targets.
//!
//! - [`water`] - A validated [`water::WaterModel`]: geometric parameters, the number of sites
//!   it emits per molecule, and the coordinate transform onto its ideal geometry.
//! - [`registry`] - The built-in catalog of established models and a [`registry::ModelRegistry`]
//!   that can be extended with user-defined models loaded from TOML.

pub mod registry;
pub mod water;
