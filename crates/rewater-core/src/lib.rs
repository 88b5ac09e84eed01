//! # Rewater Core Library
//!
//! Converts the water molecules of GROMACS `.gro` coordinate files from one rigid water model
//! to another, replacing hydrogen positions and virtual sites with an idealized geometry.
//!
//! ## Architecture
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Fixed-width record parsing and formatting (`io`), the water
//!   model parameters and registry (`models`), and the pure geometry of the idealizer (`utils`).
//!
//! - **[`engine`]: The Logic Core.** Classification of the atom section into water runs and
//!   ordinary atoms, the conversion error taxonomy, and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together into a complete
//!   file conversion that writes to any [`std::io::Write`] sink.

pub mod core;
pub mod engine;
pub mod workflows;
