//! Provides input/output functionality for structure and sequence files.
//!
//! Structure files go through the [`traits::StructureFile`] interface, implemented for the
//! `ATOM` records of PDB files in [`pdb`]. Sequence records are read and written as FASTA
//! by [`fasta`].

pub mod fasta;
pub mod pdb;
pub mod traits;
