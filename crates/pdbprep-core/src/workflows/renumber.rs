use crate::core::models::atom::AtomParseError;
use crate::core::models::structure::Structure;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenumberError {
    #[error("Residue {0} not found in structure")]
    ResidueNotFound(isize),
    #[error("Cannot renumber residue {original}: {source}")]
    Overflow {
        original: isize,
        #[source]
        source: AtomParseError,
    },
}

/// Residues to drop and the numbering to apply to the rest.
///
/// Residues are identified by the sequence numbers they had in the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenumberPlan {
    /// First number for consecutive renumbering of the retained residues, in file order.
    /// `None` keeps the existing numbers.
    pub start: Option<isize>,
    /// Original sequence numbers of residues to remove.
    pub remove: Vec<isize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenumberSummary {
    pub retained: usize,
    pub removed: usize,
    pub renumbered: usize,
}

/// Applies `plan` to `structure` in place.
///
/// Removal is validated up front, so an unknown residue leaves the structure untouched.
/// A numbering overflow, however, stops part-way: residues before the failing one keep their
/// new numbers.
pub fn run(structure: &mut Structure, plan: &RenumberPlan) -> Result<RenumberSummary, RenumberError> {
    let mut positions = Vec::with_capacity(plan.remove.len());
    for &number in &plan.remove {
        let position = structure
            .position_of(number)
            .ok_or(RenumberError::ResidueNotFound(number))?;
        positions.push(position);
    }

    let mut summary = RenumberSummary::default();
    let residues = structure.residues_mut();
    for position in positions {
        if residues[position].is_retained() {
            residues[position].clear_sequence_number();
            summary.removed += 1;
        }
    }

    if let Some(start) = plan.start {
        let mut next = start;
        for residue in residues.iter_mut().filter(|r| r.is_retained()) {
            let original = residue.original_sequence_number();
            residue
                .set_sequence_number(next)
                .map_err(|source| RenumberError::Overflow { original, source })?;
            next += 1;
            summary.renumbered += 1;
        }
    }

    summary.retained = residues.iter().filter(|r| r.is_retained()).count();
    info!(
        "Renumbering done: {} retained, {} removed, {} renumbered.",
        summary.retained, summary.removed, summary.renumbered
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::pdb::PdbFile;
    use crate::core::io::traits::StructureFile;
    use std::io::{BufReader, Cursor};

    const SAMPLE: &str = "\
ATOM      1  N   MET A   5       0.000   0.000   0.000  1.00  0.00           N
ATOM      2  CA  MET A   5       1.000   0.000   0.000  1.00  0.00           C
ATOM      3  CA  LYS A   6       2.000   0.000   0.000  1.00  0.00           C
ATOM      4  CA  VAL A   9       3.000   0.000   0.000  1.00  0.00           C
";

    fn sample() -> Structure {
        PdbFile::read_from(&mut BufReader::new(Cursor::new(SAMPLE))).unwrap()
    }

    fn numbers(structure: &Structure) -> Vec<Option<isize>> {
        structure.iter().map(|r| r.sequence_number()).collect()
    }

    #[test]
    fn run_renumbers_consecutively_from_start() {
        let mut structure = sample();
        let plan = RenumberPlan {
            start: Some(1),
            remove: vec![],
        };
        let summary = run(&mut structure, &plan).unwrap();
        assert_eq!(numbers(&structure), vec![Some(1), Some(2), Some(3)]);
        assert_eq!(
            summary,
            RenumberSummary {
                retained: 3,
                removed: 0,
                renumbered: 3
            }
        );
    }

    #[test]
    fn run_removes_before_renumbering() {
        let mut structure = sample();
        let plan = RenumberPlan {
            start: Some(100),
            remove: vec![6],
        };
        let summary = run(&mut structure, &plan).unwrap();
        assert_eq!(numbers(&structure), vec![Some(100), None, Some(101)]);
        assert_eq!(summary.removed, 1);
        assert_eq!(summary.retained, 2);

        let mut out = Vec::new();
        PdbFile::write_to(&structure, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let written: Vec<_> = text.lines().map(|l| &l[22..26]).collect();
        assert_eq!(written, vec![" 100", " 100", " 101"]);
    }

    #[test]
    fn run_without_start_keeps_numbers() {
        let mut structure = sample();
        let plan = RenumberPlan {
            start: None,
            remove: vec![5, 5],
        };
        let summary = run(&mut structure, &plan).unwrap();
        assert_eq!(numbers(&structure), vec![None, Some(6), Some(9)]);
        assert_eq!(summary.removed, 1);
        assert_eq!(summary.renumbered, 0);
    }

    #[test]
    fn run_rejects_unknown_residue_without_modifying_structure() {
        let mut structure = sample();
        let plan = RenumberPlan {
            start: Some(1),
            remove: vec![5, 42],
        };
        assert_eq!(
            run(&mut structure, &plan),
            Err(RenumberError::ResidueNotFound(42))
        );
        assert_eq!(numbers(&structure), vec![Some(5), Some(6), Some(9)]);
    }

    #[test]
    fn run_surfaces_overflow() {
        let mut structure = sample();
        let plan = RenumberPlan {
            start: Some(9998),
            remove: vec![],
        };
        assert_eq!(
            run(&mut structure, &plan),
            Err(RenumberError::Overflow {
                original: 9,
                source: AtomParseError::SequenceNumberOverflow(10000)
            })
        );
    }
}
