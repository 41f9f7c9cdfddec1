use super::atom::AtomRecord;
use super::residue::Residue;
use crate::core::sequence::{self, SequenceError, UnknownResiduePolicy};
use std::collections::HashMap;

/// An ordered collection of residues parsed from a structure file.
///
/// Residues are stored in the order their sequence numbers first appeared in the file; this
/// order is authoritative for writing and sequence extraction. A parallel index maps each
/// *original* sequence number to its position, so lookups keep working after residues have
/// been renumbered or cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    /// Residues in first-seen file order.
    residues: Vec<Residue>,
    /// Lookup map from original sequence number to position in `residues`.
    index: HashMap<isize, usize>,
}

impl Structure {
    /// Creates a new, empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an atom, grouping it by its sequence number.
    ///
    /// The first atom seen for a number creates a new residue at the end of the collection;
    /// later atoms with the same number are appended to that residue.
    ///
    /// # Return
    ///
    /// The position of the residue that received the atom.
    pub fn push_atom(&mut self, atom: AtomRecord) -> usize {
        let number = atom.sequence_number();
        match self.index.get(&number) {
            Some(&position) => {
                self.residues[position].add_atom(atom);
                position
            }
            None => {
                let position = self.residues.len();
                self.residues.push(Residue::new(atom));
                self.index.insert(number, position);
                position
            }
        }
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    /// Mutable access to the residues.
    ///
    /// The slice cannot grow or shrink, so the original-number index stays valid.
    pub fn residues_mut(&mut self) -> &mut [Residue] {
        &mut self.residues
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Residue> {
        self.residues.iter()
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Total number of atoms across all residues, including cleared ones.
    pub fn atom_count(&self) -> usize {
        self.residues.iter().map(Residue::len).sum()
    }

    /// Looks up a residue by the sequence number it had in the source file.
    pub fn by_original_number(&self, number: isize) -> Option<&Residue> {
        self.index.get(&number).map(|&i| &self.residues[i])
    }

    /// Mutable variant of [`Structure::by_original_number`].
    pub fn by_original_number_mut(&mut self, number: isize) -> Option<&mut Residue> {
        self.index.get(&number).map(|&i| &mut self.residues[i])
    }

    /// Position of the residue that had `number` in the source file.
    pub fn position_of(&self, number: isize) -> Option<usize> {
        self.index.get(&number).copied()
    }

    /// Residues that have not been marked for removal, in file order.
    pub fn retained(&self) -> impl Iterator<Item = &Residue> {
        self.residues.iter().filter(|r| r.is_retained())
    }

    /// One-letter sequence of every residue, in file order.
    pub fn sequence(&self, policy: UnknownResiduePolicy) -> Result<String, SequenceError> {
        sequence::sequence_of(&self.residues, policy)
    }

    /// One-letter sequence of the residues that would be written.
    pub fn retained_sequence(&self, policy: UnknownResiduePolicy) -> Result<String, SequenceError> {
        sequence::sequence_of(self.retained(), policy)
    }
}

impl<'a> IntoIterator for &'a Structure {
    type Item = &'a Residue;
    type IntoIter = std::slice::Iter<'a, Residue>;

    fn into_iter(self) -> Self::IntoIter {
        self.residues.iter()
    }
}
