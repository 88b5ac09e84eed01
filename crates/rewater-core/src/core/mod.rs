//! # Core Module
//!
//! Stateless building blocks of the converter.
//!
//! - **File I/O** ([`io`]) - Fixed-width `.gro` record codec and whole-file line loading.
//! - **Water Models** ([`models`]) - Target model parameters and the model registry.
//! - **Geometry** ([`utils`]) - Idealization of water molecules and virtual-site placement.

pub mod io;
pub mod models;
pub mod utils;
