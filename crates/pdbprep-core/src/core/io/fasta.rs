use bio::io::fasta;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid FASTA record #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
    #[error("Got {names} record names for {sequences} sequences")]
    LengthMismatch { names: usize, sequences: usize },
}

/// A named sequence, as stored in a FASTA file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub name: String,
    pub description: Option<String>,
    pub sequence: String,
}

impl SequenceRecord {
    pub fn new(name: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sequence: sequence.into(),
        }
    }
}

impl From<&fasta::Record> for SequenceRecord {
    fn from(record: &fasta::Record) -> Self {
        Self {
            name: record.id().to_string(),
            description: record.desc().map(str::to_string),
            sequence: String::from_utf8_lossy(record.seq()).into_owned(),
        }
    }
}

/// FASTA reading and writing on top of `bio::io::fasta`.
///
/// Records are written with the whole sequence on one line.
pub struct FastaFile;

impl FastaFile {
    /// Reads every record from `reader`.
    ///
    /// # Errors
    ///
    /// Fails with [`FastaError::Io`] on read errors and on input that does not start with a
    /// `>` header, and with [`FastaError::InvalidRecord`] (1-based index) for a record with an
    /// empty name or a non-ASCII sequence.
    pub fn read_from(reader: &mut impl BufRead) -> Result<Vec<SequenceRecord>, FastaError> {
        fasta::Reader::from_bufread(reader)
            .records()
            .enumerate()
            .map(|(i, result)| -> Result<SequenceRecord, FastaError> {
                let record = result?;
                record
                    .check()
                    .map_err(|reason| FastaError::InvalidRecord {
                        index: i + 1,
                        reason: reason.to_string(),
                    })?;
                Ok(SequenceRecord::from(&record))
            })
            .collect()
    }

    pub fn write_to<'a>(
        records: impl IntoIterator<Item = &'a SequenceRecord>,
        writer: &mut impl Write,
    ) -> Result<(), FastaError> {
        let mut fasta_writer = fasta::Writer::new(writer);
        for record in records {
            fasta_writer.write(
                &record.name,
                record.description.as_deref(),
                record.sequence.as_bytes(),
            )?;
        }
        fasta_writer.flush()?;
        Ok(())
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<SequenceRecord>, FastaError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    pub fn write_to_path<'a, P: AsRef<Path>>(
        records: impl IntoIterator<Item = &'a SequenceRecord>,
        path: P,
    ) -> Result<(), FastaError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(records, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Pairs `names` with `sequences` and writes them as FASTA records.
///
/// # Errors
///
/// Returns [`FastaError::LengthMismatch`] if the two lists differ in length.
pub fn save_records<P: AsRef<Path>>(
    names: &[impl AsRef<str>],
    sequences: &[impl AsRef<str>],
    path: P,
) -> Result<(), FastaError> {
    if names.len() != sequences.len() {
        return Err(FastaError::LengthMismatch {
            names: names.len(),
            sequences: sequences.len(),
        });
    }
    let records: Vec<_> = names
        .iter()
        .zip(sequences)
        .map(|(n, s)| SequenceRecord::new(n.as_ref(), s.as_ref()))
        .collect();
    FastaFile::write_to_path(&records, path)
}
