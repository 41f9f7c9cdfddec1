use crate::core::models::residue::Residue;
use phf::{Map, phf_map};
use thiserror::Error;

static THREE_TO_ONE: Map<&'static str, char> = phf_map! {
    "ALA" => 'A', "ARG" => 'R', "ASN" => 'N', "ASP" => 'D', "CYS" => 'C',
    "GLN" => 'Q', "GLU" => 'E', "GLY" => 'G', "HIS" => 'H', "ILE" => 'I',
    "LEU" => 'L', "LYS" => 'K', "MET" => 'M', "PHE" => 'F', "PRO" => 'P',
    "SER" => 'S', "THR" => 'T', "TRP" => 'W', "TYR" => 'Y', "VAL" => 'V',
    "SEC" => 'U', "PYL" => 'O',
    "ASX" => 'B', "GLX" => 'Z', "XLE" => 'J',
    "XAA" => 'X', "UNK" => 'X',
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Unknown residue name '{name}' (residue {sequence_number:?})")]
    UnknownResidue {
        name: String,
        sequence_number: Option<isize>,
    },
}

/// How residue names missing from the IUPAC table are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownResiduePolicy {
    /// Fail with [`SequenceError::UnknownResidue`].
    #[default]
    Reject,
    /// Emit the given symbol instead, typically `'X'`.
    Substitute(char),
}

/// Maps a three-letter residue name to its IUPAC one-letter code.
///
/// The name is trimmed and compared case-insensitively.
pub fn one_letter_code(name: &str) -> Option<char> {
    let name = name.trim();
    THREE_TO_ONE.get(name).copied().or_else(|| {
        THREE_TO_ONE
            .get(name.to_ascii_uppercase().as_str())
            .copied()
    })
}

/// Concatenates the one-letter codes of `residues` in iteration order.
///
/// # Errors
///
/// With [`UnknownResiduePolicy::Reject`], the first residue whose name has no one-letter code
/// aborts the conversion.
pub fn sequence_of<'a>(
    residues: impl IntoIterator<Item = &'a Residue>,
    policy: UnknownResiduePolicy,
) -> Result<String, SequenceError> {
    residues
        .into_iter()
        .map(|residue| match (one_letter_code(residue.name()), policy) {
            (Some(code), _) => Ok(code),
            (None, UnknownResiduePolicy::Substitute(symbol)) => Ok(symbol),
            (None, UnknownResiduePolicy::Reject) => Err(SequenceError::UnknownResidue {
                name: residue.name().to_string(),
                sequence_number: residue.sequence_number(),
            }),
        })
        .collect()
}
