pub mod align;
pub mod backtranslate;
pub mod distance;
pub mod renumber;
pub mod sequence;

use crate::error::{CliError, Result};
use pdbprep::core::io::fasta::{FastaFile, SequenceRecord};
use pdbprep::core::io::pdb::PdbFile;
use pdbprep::core::io::traits::StructureFile;
use pdbprep::core::models::structure::Structure;
use std::path::Path;
use tracing::info;

fn read_structure(path: &Path) -> Result<Structure> {
    info!("Loading input structure from {:?}", path);
    PdbFile::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn read_records(path: &Path) -> Result<Vec<SequenceRecord>> {
    info!("Loading sequences from {:?}", path);
    FastaFile::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub const SAMPLE_PDB: &str = "\
HEADER    TEST STRUCTURE
ATOM      1  N   ALA A  10       0.000   0.000   0.000  1.00  0.00           N
ATOM      2  CA  ALA A  10       1.500   0.000   0.000  1.00  0.00           C
HETATM    3  O   HOH A 201       9.000   9.000   9.000  1.00  0.00           O
ATOM      4  N   GLY A  11       3.000   2.000   0.000  1.00  0.00           N
ATOM      5  CA  GLY A  11       4.000   3.000   1.000  1.00  0.00           C
ATOM      6  CA  SER A  12       7.000   3.000   1.000  1.00  0.00           C
END
";
}
