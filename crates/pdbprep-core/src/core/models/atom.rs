use nalgebra::Point3;
use std::fmt;
use std::ops::{Range, RangeInclusive};
use thiserror::Error;

const ATOM_SERIAL_COLUMNS: Range<usize> = 6..11;
const ATOM_NAME_COLUMNS: Range<usize> = 12..16;
const RESIDUE_NAME_COLUMNS: Range<usize> = 17..20;
const SEQUENCE_NUMBER_COLUMNS: Range<usize> = 22..26;
const X_COLUMNS: Range<usize> = 30..38;
const Y_COLUMNS: Range<usize> = 38..46;
const Z_COLUMNS: Range<usize> = 46..54;

/// Minimum line length required to extract every field used by [`AtomRecord`].
pub const MIN_RECORD_LENGTH: usize = 54;

/// Values that fit the 4-character residue sequence number field.
pub const SEQUENCE_NUMBER_RANGE: RangeInclusive<isize> = -999..=9999;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AtomParseError {
    #[error("Line is too short for ATOM record (must be at least 54 chars, got {length})")]
    LineTooShort { length: usize },
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Residue sequence number {0} does not fit in a 4-character field")]
    SequenceNumberOverflow(isize),
    #[error("Columns 1-54 of an ATOM record must be ASCII")]
    NonAsciiColumns,
    #[error("ATOM record is not valid UTF-8")]
    InvalidUtf8,
}

/// Renders a 0-indexed, end-exclusive range as the 1-indexed column span used in PDB documentation.
fn column_label(columns: &Range<usize>) -> String {
    format!("{}-{}", columns.start + 1, columns.end)
}

fn field<'a>(line: &'a str, columns: &Range<usize>) -> &'a str {
    line.get(columns.clone()).unwrap_or("").trim()
}

fn parse_coordinate(line: &str, columns: &Range<usize>) -> Result<f64, AtomParseError> {
    let value = field(line, columns);
    value.parse().map_err(|_| AtomParseError::InvalidFloat {
        columns: column_label(columns),
        value: value.into(),
    })
}

/// Ensures `number` can be written back into the fixed-width sequence number field.
pub fn check_sequence_number(number: isize) -> Result<(), AtomParseError> {
    if SEQUENCE_NUMBER_RANGE.contains(&number) {
        Ok(())
    } else {
        Err(AtomParseError::SequenceNumberOverflow(number))
    }
}

/// A single `ATOM` line from a PDB file, parsed into the fields needed for residue grouping
/// and distance calculations.
///
/// The source line is kept verbatim. Rendering reproduces it byte-for-byte except for the
/// residue sequence number field, which always reflects the current number.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    line: String,
    residue_name: String,
    sequence_number: isize,
    position: Point3<f64>,
}

impl AtomRecord {
    /// Parses a fixed-width `ATOM` line.
    ///
    /// The record type in columns 1-4 is not checked here; the reader decides which lines
    /// qualify.
    ///
    /// # Errors
    ///
    /// Returns [`AtomParseError::LineTooShort`] if the line has fewer than 54 bytes,
    /// [`AtomParseError::NonAsciiColumns`] if any of those bytes is not ASCII, and
    /// [`AtomParseError::InvalidInt`] / [`AtomParseError::InvalidFloat`] if the sequence
    /// number or a coordinate is not numeric after trimming.
    ///
    /// Columns are byte offsets. Text past column 54 may hold any UTF-8.
    pub fn parse(line: &str) -> Result<Self, AtomParseError> {
        if line.len() < MIN_RECORD_LENGTH {
            return Err(AtomParseError::LineTooShort { length: line.len() });
        }
        if !line.as_bytes()[..MIN_RECORD_LENGTH].is_ascii() {
            return Err(AtomParseError::NonAsciiColumns);
        }

        let residue_name = field(line, &RESIDUE_NAME_COLUMNS);
        let number_str = field(line, &SEQUENCE_NUMBER_COLUMNS);
        let sequence_number: isize =
            number_str
                .parse()
                .map_err(|_| AtomParseError::InvalidInt {
                    columns: column_label(&SEQUENCE_NUMBER_COLUMNS),
                    value: number_str.into(),
                })?;
        let x = parse_coordinate(line, &X_COLUMNS)?;
        let y = parse_coordinate(line, &Y_COLUMNS)?;
        let z = parse_coordinate(line, &Z_COLUMNS)?;

        Ok(Self {
            line: line.to_string(),
            residue_name: residue_name.to_string(),
            sequence_number,
            position: Point3::new(x, y, z),
        })
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn residue_name(&self) -> &str {
        &self.residue_name
    }

    pub fn sequence_number(&self) -> isize {
        self.sequence_number
    }

    pub fn position(&self) -> &Point3<f64> {
        &self.position
    }

    /// Atom name from columns 13-16, trimmed. Empty if the columns are blank.
    pub fn atom_name(&self) -> &str {
        field(&self.line, &ATOM_NAME_COLUMNS)
    }

    /// Atom serial number from columns 7-11, if present and numeric.
    pub fn serial(&self) -> Option<usize> {
        field(&self.line, &ATOM_SERIAL_COLUMNS).parse().ok()
    }

    /// Euclidean distance between the two atoms' coordinates.
    pub fn distance_to(&self, other: &AtomRecord) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }

    // Only `Residue` calls this, after validating the number for all of its atoms.
    pub(crate) fn set_sequence_number(&mut self, number: isize) {
        self.sequence_number = number;
    }

    /// Returns the source line with the sequence number field rewritten to the current number.
    pub fn render(&self) -> String {
        let prefix = &self.line[..SEQUENCE_NUMBER_COLUMNS.start];
        let suffix = &self.line[SEQUENCE_NUMBER_COLUMNS.end..];
        format!("{}{:>4}{}", prefix, self.sequence_number, suffix)
    }
}

impl fmt::Display for AtomRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
