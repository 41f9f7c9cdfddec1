use super::read_structure;
use crate::cli::SequenceArgs;
use crate::error::{CliError, Result};
use pdbprep::core::io::fasta::save_records;
use pdbprep::core::sequence::UnknownResiduePolicy;
use tracing::info;

const UNKNOWN_SYMBOL: char = 'X';

pub fn run(args: SequenceArgs) -> Result<()> {
    let structure = read_structure(&args.input)?;

    let policy = if args.allow_unknown {
        UnknownResiduePolicy::Substitute(UNKNOWN_SYMBOL)
    } else {
        UnknownResiduePolicy::Reject
    };
    let sequence = if args.retained_only {
        structure.retained_sequence(policy)?
    } else {
        structure.sequence(policy)?
    };
    info!(
        "Extracted a sequence of {} residues from {:?}",
        sequence.len(),
        &args.input
    );

    match &args.output {
        Some(output) => {
            let name = match &args.name {
                Some(name) => name.clone(),
                None => record_name_from(&args.input)?,
            };
            save_records(&[name], &[sequence], output)?;
            println!("Sequence written to {}", output.display());
        }
        None => println!("{}", sequence),
    }
    Ok(())
}

fn record_name_from(path: &std::path::Path) -> Result<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .ok_or_else(|| {
            CliError::Argument(format!(
                "Cannot derive a record name from '{}'; pass --name.",
                path.display()
            ))
        })
}
