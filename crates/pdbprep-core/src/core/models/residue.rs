use super::atom::{AtomParseError, AtomRecord, check_sequence_number};
use std::fmt;

/// A group of [`AtomRecord`]s that share one residue sequence number.
///
/// The residue exclusively owns its atoms, in file order. Its sequence number is the single
/// source of truth for every owned atom: [`Residue::set_sequence_number`] is the only way to
/// change it, and it rewrites all atoms before updating the residue itself.
///
/// A residue whose number has been cleared with [`Residue::clear_sequence_number`] is kept in
/// its collection but skipped when the structure is written.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    name: String,                   // Residue name copied from the first atom (e.g., "ALA")
    original_sequence_number: isize, // Number read from the source file
    sequence_number: Option<isize>, // `None` marks the residue for removal on write
    atoms: Vec<AtomRecord>,         // Owned atoms in insertion (file) order
}

impl Residue {
    /// Creates a residue owning exactly `first_atom`.
    ///
    /// The residue name and sequence number are copied from the atom.
    pub fn new(first_atom: AtomRecord) -> Self {
        Self {
            name: first_atom.residue_name().to_string(),
            original_sequence_number: first_atom.sequence_number(),
            sequence_number: Some(first_atom.sequence_number()),
            atoms: vec![first_atom],
        }
    }

    /// Appends an atom.
    ///
    /// The atom's own sequence number is not checked against the residue; the reader groups
    /// atoms by number before calling this.
    pub fn add_atom(&mut self, atom: AtomRecord) {
        self.atoms.push(atom);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn atoms(&self) -> &[AtomRecord] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// The sequence number the residue had when it was parsed.
    pub fn original_sequence_number(&self) -> isize {
        self.original_sequence_number
    }

    /// The current sequence number, or `None` if the residue is marked for removal.
    pub fn sequence_number(&self) -> Option<isize> {
        self.sequence_number
    }

    /// Returns `true` unless the residue has been marked for removal.
    pub fn is_retained(&self) -> bool {
        self.sequence_number.is_some()
    }

    /// Sets the sequence number of the residue and every atom it owns.
    ///
    /// # Errors
    ///
    /// Returns [`AtomParseError::SequenceNumberOverflow`] if `number` does not fit in the
    /// 4-character PDB field. Nothing is modified in that case.
    pub fn set_sequence_number(&mut self, number: isize) -> Result<(), AtomParseError> {
        check_sequence_number(number)?;
        for atom in &mut self.atoms {
            atom.set_sequence_number(number);
        }
        self.sequence_number = Some(number);
        Ok(())
    }

    /// Marks the residue for removal. Its atoms are left untouched and are never written.
    pub fn clear_sequence_number(&mut self) {
        self.sequence_number = None;
    }

    /// Minimum Euclidean distance over every pair of atoms drawn from `self` and `other`.
    ///
    /// Every pair is visited and the running minimum only changes on a strict `<`.
    /// Comparing a residue with itself yields `0.0`, since each atom is paired with itself.
    pub fn distance(&self, other: &Residue) -> f64 {
        let mut min = f64::INFINITY;
        for a in &self.atoms {
            for b in &other.atoms {
                let d = a.distance_to(b);
                if d < min {
                    min = d;
                }
            }
        }
        min
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sequence_number {
            Some(number) => write!(f, "residue: {} {}", self.name, number),
            None => write!(f, "residue: {} None", self.name),
        }
    }
}
