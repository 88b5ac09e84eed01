//! Numerical helpers shared by the rest of the library.
//!
//! - [`geometry`] - Idealization of rigid water geometry and virtual-site placement.

pub mod geometry;
