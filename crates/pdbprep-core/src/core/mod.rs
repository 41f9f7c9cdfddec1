//! # Core Module
//!
//! The stateless building blocks of the library: structure models, file I/O, and the lookup
//! tables used to move between residue names, one-letter sequences and DNA codons.
//!
//! - **Structure Representation** ([`models`]) - Atom records, residues and structures
//! - **File I/O** ([`io`]) - PDB `ATOM` records and FASTA sequence records
//! - **Sequences** ([`sequence`]) - Three-letter to one-letter residue code conversion
//! - **Codons** ([`codons`]) - Preferred-codon tables and randomized back-translation
//! - **Geometry** ([`geometry`]) - Residue distance matrices and contact lists

pub mod codons;
pub mod geometry;
pub mod io;
pub mod models;
pub mod sequence;
