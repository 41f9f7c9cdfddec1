use super::read_records;
use crate::cli::AlignArgs;
use crate::config::PartialAppConfig;
use crate::error::{CliError, Result};
use pdbprep::workflows::align;
use tracing::info;

pub fn run(args: AlignArgs, config: &PartialAppConfig) -> Result<()> {
    let alignment = config.alignment_config(&args);

    let records = read_records(&args.input)?;
    if records.is_empty() {
        return Err(CliError::Argument(format!(
            "No FASTA records found in '{}'",
            args.input.display()
        )));
    }
    info!(
        "Aligning {} records with {}",
        records.len(),
        alignment.program.display()
    );

    align::align(&args.input, &args.output, &alignment)?;
    println!(
        "Alignment of {} records written to {}",
        records.len(),
        args.output.display()
    );
    Ok(())
}
