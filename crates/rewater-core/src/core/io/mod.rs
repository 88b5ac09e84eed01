//! Provides input/output functionality for GROMACS coordinate files.
//!
//! The `.gro` format is handled at the level of single fixed-width records: the converter
//! never builds a full molecular model, it decodes only atom names and positions and
//! re-emits every other column unchanged. Whole files are loaded into memory as lines.

pub mod gro;
pub mod lines;
