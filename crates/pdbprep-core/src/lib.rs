//! # pdbprep
//!
//! Residue-level utilities for preparing protein structures and sequences: reading PDB
//! `ATOM` records into residues, measuring inter-residue distances, renumbering and deleting
//! residues while preserving every other column of the source lines, extracting one-letter
//! sequences, aligning sequence sets with an external tool, and back-translating proteins
//! into DNA with organism-specific preferred codons.
//!
//! ## Layout
//!
//! - **[`core`]: The Foundation.** Data models (`AtomRecord`, `Residue`, `Structure`), file
//!   I/O, sequence and codon tables, and distance geometry.
//!
//! - **[`workflows`]: The Public API.** Multi-step procedures built on `core`, such as running
//!   the aligner or applying a renumbering plan.

pub mod core;
pub mod workflows;
