use crate::core::io::traits::StructureFile;
use crate::core::models::atom::{AtomParseError, AtomRecord};
use crate::core::models::residue::Residue;
use crate::core::models::structure::Structure;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::debug;

const ATOM_RECORD: &str = "ATOM";

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: AtomParseError,
    },
}

/// Returns `true` if the first four bytes of the raw line are exactly `ATOM`.
///
/// `HETATM` and any other record types are excluded; no whitespace is stripped first.
pub fn is_atom_record(line: &[u8]) -> bool {
    line.get(..4) == Some(ATOM_RECORD.as_bytes())
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Reader/writer for the `ATOM` records of a PDB file.
///
/// Only `ATOM` lines take part: other records are dropped on read and never written.
/// Written lines are the parsed source lines with the residue sequence number field
/// rewritten, so every other column survives untouched.
///
/// Lines are handled as bytes until they qualify as `ATOM` records, so text in other
/// encodings (e.g. Latin-1 author names in `REMARK` lines) does not affect reading.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Structure, Self::Error> {
        let mut structure = Structure::new();
        let mut buf = Vec::new();
        let mut line_num = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_num += 1;

            let raw = strip_line_ending(&buf);
            if !is_atom_record(raw) {
                continue;
            }
            let line = std::str::from_utf8(raw).map_err(|_| PdbError::Parse {
                line: line_num,
                source: AtomParseError::InvalidUtf8,
            })?;
            let atom = AtomRecord::parse(line).map_err(|source| PdbError::Parse {
                line: line_num,
                source,
            })?;
            structure.push_atom(atom);
        }

        debug!(
            "Parsed {} ATOM records into {} residues.",
            structure.atom_count(),
            structure.len()
        );
        Ok(structure)
    }

    fn write_residues_to<'a>(
        residues: impl IntoIterator<Item = &'a Residue>,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        for residue in residues.into_iter().filter(|r| r.is_retained()) {
            for atom in residue.atoms() {
                writeln!(writer, "{}", atom.render())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sequence::UnknownResiduePolicy;
    use std::io::{BufReader, Cursor};
    use tempfile::tempdir;

    const SAMPLE: &str = "\
HEADER    TEST STRUCTURE
ATOM      1  N   ALA A  10      11.104   6.134  -6.504  1.00  0.00           N
ATOM      2  CA  ALA A  10      11.639   6.071  -5.147  1.00  0.00           C
HETATM    3  O   HOH A  50       1.000   1.000   1.000  1.00  0.00           O
ATOM      4  N   GLY A  11      12.001   7.200  -4.100  1.00  0.00           N
TER
END
";

    fn read(text: &str) -> Result<Structure, PdbError> {
        PdbFile::read_from(&mut BufReader::new(Cursor::new(text)))
    }

    fn write(residues: &[Residue]) -> String {
        let mut out = Vec::new();
        PdbFile::write_residues_to(residues, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn is_atom_record_matches_exact_prefix_only() {
        assert!(is_atom_record(b"ATOM      1  N"));
        assert!(!is_atom_record(b"HETATM    1  N"));
        assert!(!is_atom_record(b"atom      1  N"));
        assert!(!is_atom_record(b" ATOM     1  N"));
        assert!(!is_atom_record(b"ATO"));
    }

    #[test]
    fn read_ignores_non_utf8_bytes_in_skipped_records() {
        let mut bytes = b"REMARK   1 AUTHOR M\xfcLLER\n".to_vec();
        bytes.extend_from_slice(SAMPLE.lines().nth(1).unwrap().as_bytes());
        bytes.push(b'\n');

        let structure = PdbFile::read_from(&mut BufReader::new(Cursor::new(bytes))).unwrap();
        assert_eq!(structure.len(), 1);
        assert_eq!(structure.residues()[0].name(), "ALA");
    }

    #[test]
    fn read_reports_non_utf8_atom_record() {
        let mut bytes = b"HEADER\n".to_vec();
        bytes.extend_from_slice(SAMPLE.lines().nth(1).unwrap().as_bytes());
        bytes.extend_from_slice(b"  \xfc\n");

        let result = PdbFile::read_from(&mut BufReader::new(Cursor::new(bytes)));
        assert!(matches!(
            result,
            Err(PdbError::Parse {
                line: 2,
                source: AtomParseError::InvalidUtf8
            })
        ));
    }

    #[test]
    fn read_strips_crlf_line_endings() {
        let structure = read(&SAMPLE.replace('\n', "\r\n")).unwrap();
        let first = &structure.residues()[0].atoms()[0];
        assert_eq!(first.render(), SAMPLE.lines().nth(1).unwrap());
    }

    #[test]
    fn read_groups_atom_lines_into_residues() {
        let structure = read(SAMPLE).unwrap();
        assert_eq!(structure.len(), 2);
        assert_eq!(structure.residues()[0].name(), "ALA");
        assert_eq!(structure.residues()[0].len(), 2);
        assert_eq!(structure.residues()[1].name(), "GLY");
        assert_eq!(structure.residues()[1].len(), 1);
        assert!(structure.by_original_number(50).is_none());
    }

    #[test]
    fn read_keeps_first_seen_order_for_interleaved_numbers() {
        let text = "\
ATOM      1  CA  LYS A   5       0.000   0.000   0.000  1.00  0.00           C
ATOM      2  CA  ALA A   2       1.000   0.000   0.000  1.00  0.00           C
ATOM      3  CB  LYS A   5       2.000   0.000   0.000  1.00  0.00           C
";
        let structure = read(text).unwrap();
        let numbers: Vec<_> = structure.iter().map(|r| r.sequence_number()).collect();
        assert_eq!(numbers, vec![Some(5), Some(2)]);
        let lys: Vec<_> = structure.residues()[0]
            .atoms()
            .iter()
            .map(|a| a.serial())
            .collect();
        assert_eq!(lys, vec![Some(1), Some(3)]);
    }

    #[test]
    fn read_reports_line_number_of_malformed_record() {
        let text = "REMARK\nATOM      1  CA  ALA A  1X       0.000   0.000   0.000\n";
        match read(text) {
            Err(PdbError::Parse { line, source }) => {
                assert_eq!(line, 2);
                assert!(matches!(source, AtomParseError::InvalidInt { .. }));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn read_reports_short_atom_line() {
        let result = read("ATOM      1  CA  ALA A   1\n");
        assert!(matches!(
            result,
            Err(PdbError::Parse {
                line: 1,
                source: AtomParseError::LineTooShort { .. }
            })
        ));
    }

    #[test]
    fn read_without_atom_records_yields_empty_structure() {
        let structure = read("HEADER\nEND\n").unwrap();
        assert!(structure.is_empty());
    }

    #[test]
    fn write_round_trips_atom_lines() {
        let structure = read(SAMPLE).unwrap();
        let expected: String = SAMPLE
            .lines()
            .filter(|l| l.starts_with("ATOM"))
            .map(|l| format!("{}\n", l))
            .collect();
        assert_eq!(write(structure.residues()), expected);
    }

    #[test]
    fn write_skips_cleared_residues() {
        let mut structure = read(SAMPLE).unwrap();
        structure.by_original_number_mut(10).unwrap().clear_sequence_number();
        let output = write(structure.residues());
        assert_eq!(output.lines().count(), 1);
        assert!(output.starts_with("ATOM      4  N   GLY A  11"));
    }

    #[test]
    fn write_follows_caller_residue_order() {
        let structure = read(SAMPLE).unwrap();
        let reversed: Vec<_> = structure.iter().rev().collect();
        let mut out = Vec::new();
        PdbFile::write_residues_to(reversed, &mut out).unwrap();
        let serials: Vec<_> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| l[6..11].trim().to_string())
            .collect();
        assert_eq!(serials, vec!["4", "1", "2"]);
    }

    #[test]
    fn end_to_end_renumber_and_sequence() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.pdb");
        let output = dir.path().join("out.pdb");
        std::fs::write(&input, SAMPLE).unwrap();

        let mut structure = PdbFile::read_from_path(&input).unwrap();
        let numbers: Vec<_> = structure.iter().map(|r| r.sequence_number()).collect();
        assert_eq!(numbers, vec![Some(10), Some(11)]);
        assert_eq!(
            structure.sequence(UnknownResiduePolicy::Reject).unwrap(),
            "AG"
        );

        structure
            .by_original_number_mut(10)
            .unwrap()
            .set_sequence_number(100)
            .unwrap();
        PdbFile::write_to_path(&structure, &output).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<_> = written.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(&lines[0][22..26], " 100");
        assert_eq!(&lines[1][22..26], " 100");
        assert_eq!(
            lines[2],
            "ATOM      4  N   GLY A  11      12.001   7.200  -4.100  1.00  0.00           N"
        );
        assert!(written.ends_with('\n'));
    }

    #[test]
    fn write_to_path_truncates_existing_file() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.pdb");
        std::fs::write(&output, "stale content that is longer than nothing\n".repeat(10)).unwrap();

        let structure = Structure::new();
        PdbFile::write_to_path(&structure, &output).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
    }

    #[test]
    fn read_from_path_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = PdbFile::read_from_path(dir.path().join("missing.pdb"));
        match result {
            Err(PdbError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
