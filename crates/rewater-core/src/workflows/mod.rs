//! # Workflows Module
//!
//! High-level entry points that run a complete conversion, from the raw lines of a `.gro`
//! file to the rewritten output.
//!
//! - **Conversion Workflow** ([`convert`]) - classifies the atom section once, writes the
//!   updated header, then emits ordinary atoms renumbered and water molecules rebuilt on the
//!   target model, reporting progress along the way.

pub mod convert;
