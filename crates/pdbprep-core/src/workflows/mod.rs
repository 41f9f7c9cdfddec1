//! # Workflows Module
//!
//! High-level procedures that tie the [`crate::core`] building blocks together.
//!
//! - [`align`] - Runs an external multiple-sequence aligner and restores input record order
//! - [`renumber`] - Removes residues and renumbers the rest of a structure

pub mod align;
pub mod renumber;
