//! # Core Models Module
//!
//! Residue-level representation of a protein structure read from PDB `ATOM` records.
//!
//! ## Key Components
//!
//! - [`atom`] - A single fixed-width `ATOM` line with its parsed residue name, sequence number
//!   and coordinates
//! - [`residue`] - Atoms grouped by sequence number, with distance and cascading renumbering
//! - [`structure`] - The ordered residue collection produced by the reader
//!
//! ## Usage
//!
//! ```ignore
//! use pdbprep::core::io::{pdb::PdbFile, traits::StructureFile};
//!
//! let mut structure = PdbFile::read_from_path("input.pdb")?;
//! if let Some(residue) = structure.by_original_number_mut(10) {
//!     residue.set_sequence_number(100)?;
//! }
//! PdbFile::write_to_path(&structure, "output.pdb")?;
//! ```

pub mod atom;
pub mod residue;
pub mod structure;
