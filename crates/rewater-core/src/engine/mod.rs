//! # Engine Module
//!
//! The scanning machinery behind a conversion.
//!
//! - **Classification** ([`classifier`]) - Partitions the atom section of a `.gro` file into
//!   ordinary atoms and water runs. The single span list it produces drives both the atom
//!   count written in the header and the emission of atom records, so the two can never
//!   disagree.
//! - **Error Handling** ([`error`]) - The [`error::ConversionError`] taxonomy.
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting.

pub mod classifier;
pub mod error;
pub mod progress;
