use crate::core::models::residue::Residue;
use crate::core::models::structure::Structure;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing residue-level structure files.
///
/// Implementors handle format-specific parsing and serialization; the path-based helpers
/// are provided in terms of the reader/writer methods.
pub trait StructureFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a structure from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Structure, Self::Error>;

    /// Writes the given residues, in iteration order, to a writer.
    ///
    /// Residues marked for removal are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_residues_to<'a>(
        residues: impl IntoIterator<Item = &'a Residue>,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Writes every residue of a structure to a writer.
    fn write_to(structure: &Structure, writer: &mut impl Write) -> Result<(), Self::Error> {
        Self::write_residues_to(structure, writer)
    }

    /// Reads a structure from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Structure, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes the given residues to a file path, truncating any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_residues_to_path<'a, P: AsRef<Path>>(
        residues: impl IntoIterator<Item = &'a Residue>,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_residues_to(residues, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Writes a structure to a file path, truncating any existing file.
    fn write_to_path<P: AsRef<Path>>(structure: &Structure, path: P) -> Result<(), Self::Error> {
        Self::write_residues_to_path(structure, path)
    }
}
