use pdbprep::core::codons::{CodonError, CodonTableError};
use pdbprep::core::geometry::DistanceError;
use pdbprep::core::io::fasta::FastaError;
use pdbprep::core::io::pdb::PdbError;
use pdbprep::core::sequence::SequenceError;
use pdbprep::workflows::align::AlignError;
use pdbprep::workflows::renumber::RenumberError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Pdb(#[from] PdbError),

    #[error(transparent)]
    Fasta(#[from] FastaError),

    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error(transparent)]
    Renumber(#[from] RenumberError),

    #[error(transparent)]
    Distance(#[from] DistanceError),

    #[error(transparent)]
    Align(#[from] AlignError),

    #[error(transparent)]
    CodonTable(#[from] CodonTableError),

    #[error("Cannot back-translate record '{record}': {source}")]
    BackTranslation {
        record: String,
        #[source]
        source: CodonError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
