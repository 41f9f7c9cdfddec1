use crate::core::io::fasta::{FastaError, FastaFile, SequenceRecord};
use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Placeholder argument replaced by the input path.
pub const INPUT_PLACEHOLDER: &str = "{input}";
/// Placeholder argument replaced by the output path.
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

#[derive(Debug, Error)]
pub enum AlignError {
    #[error("Failed to launch aligner '{program}': {source}", program = program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Aligner exited with {status}: {stderr}")]
    AlignmentFailed { status: ExitStatus, stderr: String },
    #[error("Aligner did not produce an output file at '{}'", .0.display())]
    MissingOutput(PathBuf),
    #[error("Record '{0}' from the input is missing from the alignment output")]
    MissingRecord(String),
    #[error(transparent)]
    Fasta(#[from] FastaError),
}

/// How to invoke the external alignment program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentConfig {
    /// Executable name or path (resolved through `PATH` when bare).
    pub program: PathBuf,
    /// Arguments passed to the program. An argument exactly equal to [`INPUT_PLACEHOLDER`] or
    /// [`OUTPUT_PLACEHOLDER`] is replaced by the corresponding path.
    pub args: Vec<String>,
}

impl Default for AlignmentConfig {
    /// MUSCLE 3 style invocation: `muscle -in <input> -out <output>`.
    fn default() -> Self {
        Self {
            program: PathBuf::from("muscle"),
            args: vec![
                "-in".to_string(),
                INPUT_PLACEHOLDER.to_string(),
                "-out".to_string(),
                OUTPUT_PLACEHOLDER.to_string(),
            ],
        }
    }
}

impl AlignmentConfig {
    fn command_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        self.args
            .iter()
            .map(|arg| match arg.as_str() {
                INPUT_PLACEHOLDER => input.as_os_str().to_owned(),
                OUTPUT_PLACEHOLDER => output.as_os_str().to_owned(),
                other => OsString::from(other),
            })
            .collect()
    }
}

/// Reorders `aligned` so that its records follow the order of `reference`, matching by name.
///
/// Reference records that share a name all receive the aligned record with that name.
/// Aligned records whose names do not occur in `reference` are dropped.
///
/// # Errors
///
/// Returns [`AlignError::MissingRecord`] if a reference name has no aligned counterpart.
pub fn reorder_to_match(
    reference: &[SequenceRecord],
    aligned: Vec<SequenceRecord>,
) -> Result<Vec<SequenceRecord>, AlignError> {
    let by_name: HashMap<String, SequenceRecord> = aligned
        .into_iter()
        .map(|record| (record.name.clone(), record))
        .collect();

    let ordered = reference
        .iter()
        .map(|r| {
            by_name
                .get(&r.name)
                .cloned()
                .ok_or_else(|| AlignError::MissingRecord(r.name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let wanted: HashSet<&str> = reference.iter().map(|r| r.name.as_str()).collect();
    for name in by_name.keys().filter(|name| !wanted.contains(name.as_str())) {
        warn!("Dropping aligned record '{}' not present in the input.", name);
    }
    Ok(ordered)
}

/// Aligns the FASTA records in `input` with an external program and writes the alignment to
/// `output`, with records in the same order as the input.
///
/// # Errors
///
/// Fails if the program cannot be launched, exits unsuccessfully, leaves no output file, or
/// its output cannot be matched back to the input records.
pub fn align(input: &Path, output: &Path, config: &AlignmentConfig) -> Result<(), AlignError> {
    info!(
        "Running {} with {}, saving to {}.",
        config.program.display(),
        input.display(),
        output.display()
    );

    let result = Command::new(&config.program)
        .args(config.command_args(input, output))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| AlignError::Launch {
            program: config.program.clone(),
            source: e,
        })?;

    if !result.status.success() {
        return Err(AlignError::AlignmentFailed {
            status: result.status,
            stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
        });
    }
    if !output.is_file() {
        return Err(AlignError::MissingOutput(output.to_path_buf()));
    }

    let reference = FastaFile::read_from_path(input)?;
    let aligned = FastaFile::read_from_path(output)?;
    debug!(
        "Aligner returned {} records for {} inputs.",
        aligned.len(),
        reference.len()
    );

    let ordered = reorder_to_match(&reference, aligned)?;
    FastaFile::write_to_path(&ordered, output)?;
    info!("Alignment of {} records done.", ordered.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn records(pairs: &[(&str, &str)]) -> Vec<SequenceRecord> {
        pairs
            .iter()
            .map(|(n, s)| SequenceRecord::new(*n, *s))
            .collect()
    }

    #[test]
    fn default_config_invokes_muscle_with_in_and_out() {
        let config = AlignmentConfig::default();
        assert_eq!(config.program, PathBuf::from("muscle"));
        let args = config.command_args(Path::new("a.fasta"), Path::new("b.fasta"));
        assert_eq!(args, vec!["-in", "a.fasta", "-out", "b.fasta"]);
    }

    #[test]
    fn command_args_only_replaces_exact_placeholders() {
        let config = AlignmentConfig {
            program: PathBuf::from("tool"),
            args: vec!["--in={input}".into(), OUTPUT_PLACEHOLDER.into()],
        };
        let args = config.command_args(Path::new("x"), Path::new("y"));
        assert_eq!(args, vec!["--in={input}", "y"]);
    }

    #[test]
    fn reorder_to_match_restores_reference_order() {
        let reference = records(&[("a", "MKV"), ("b", "MV"), ("c", "K")]);
        let aligned = records(&[("c", "--K"), ("a", "MKV"), ("b", "M-V")]);
        let ordered = reorder_to_match(&reference, aligned).unwrap();
        let names: Vec<_> = ordered.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(ordered[1].sequence, "M-V");
    }

    #[test]
    fn reorder_to_match_drops_extra_records() {
        let reference = records(&[("a", "MK")]);
        let aligned = records(&[("z", "--"), ("a", "MK")]);
        let ordered = reorder_to_match(&reference, aligned).unwrap();
        assert_eq!(ordered, records(&[("a", "MK")]));
    }

    #[test]
    fn reorder_to_match_accepts_repeated_input_names() {
        let reference = records(&[("a", "MK"), ("b", "MV"), ("a", "MK")]);
        let aligned = records(&[("b", "M-V"), ("a", "MK-")]);
        let ordered = reorder_to_match(&reference, aligned).unwrap();
        assert_eq!(
            ordered,
            records(&[("a", "MK-"), ("b", "M-V"), ("a", "MK-")])
        );
    }

    #[test]
    fn reorder_to_match_fails_for_missing_record() {
        let reference = records(&[("a", "MK"), ("b", "MV")]);
        let aligned = records(&[("a", "MK")]);
        assert!(matches!(
            reorder_to_match(&reference, aligned),
            Err(AlignError::MissingRecord(name)) if name == "b"
        ));
    }

    #[test]
    fn align_fails_when_program_cannot_be_launched() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.fasta");
        std::fs::write(&input, ">a\nMK\n").unwrap();
        let config = AlignmentConfig {
            program: dir.path().join("no-such-aligner"),
            ..AlignmentConfig::default()
        };
        let result = align(&input, &dir.path().join("out.fasta"), &config);
        assert!(matches!(result, Err(AlignError::Launch { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn align_surfaces_nonzero_exit_status() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.fasta");
        std::fs::write(&input, ">a\nMK\n").unwrap();
        let config = AlignmentConfig {
            program: PathBuf::from("sh"),
            args: vec!["-c".into(), "echo boom >&2; exit 3".into()],
        };
        match align(&input, &dir.path().join("out.fasta"), &config) {
            Err(AlignError::AlignmentFailed { status, stderr }) => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn align_fails_when_output_is_missing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.fasta");
        std::fs::write(&input, ">a\nMK\n").unwrap();
        let config = AlignmentConfig {
            program: PathBuf::from("sh"),
            args: vec!["-c".into(), "exit 0".into()],
        };
        let result = align(&input, &dir.path().join("out.fasta"), &config);
        assert!(matches!(result, Err(AlignError::MissingOutput(_))));
    }

    #[cfg(unix)]
    #[test]
    fn align_rewrites_output_in_input_order() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.fasta");
        let output = dir.path().join("out.fasta");
        std::fs::write(&input, ">a\nAA\n>b\nCC\n").unwrap();
        let config = AlignmentConfig {
            program: PathBuf::from("sh"),
            args: vec![
                "-c".into(),
                "printf '>b\\nC-C\\n>a\\nA-A\\n' > \"$1\"".into(),
                INPUT_PLACEHOLDER.into(),
                OUTPUT_PLACEHOLDER.into(),
            ],
        };

        align(&input, &output, &config).unwrap();
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            ">a\nA-A\n>b\nC-C\n"
        );
    }
}
