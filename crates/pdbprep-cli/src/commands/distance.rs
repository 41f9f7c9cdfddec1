use super::read_structure;
use crate::cli::DistanceArgs;
use crate::error::{CliError, Result};
use pdbprep::core::geometry::{DistanceMatrix, residue_distance};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::info;

pub fn run(args: DistanceArgs) -> Result<()> {
    let structure = read_structure(&args.input)?;

    if let Some(pair) = &args.pair {
        let [a, b] = pair.as_slice() else {
            return Err(CliError::Argument(format!(
                "--pair expects exactly two residue numbers, got {}",
                pair.len()
            )));
        };
        let distance = residue_distance(&structure, *a, *b)?;
        println!("{:.3}", distance);
        return Ok(());
    }

    info!(
        "Computing distance matrix for {} residues.",
        structure.len()
    );
    let matrix = DistanceMatrix::compute(&structure);

    if let Some(cutoff) = args.cutoff {
        let labels = matrix.labels();
        let contacts = matrix.contacts(cutoff);
        info!("Found {} residue pairs within {:.2} A.", contacts.len(), cutoff);
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for contact in contacts {
            writeln!(
                out,
                "{}\t{}\t{:.3}",
                label(labels[contact.first]),
                label(labels[contact.second]),
                contact.distance
            )?;
        }
        return Ok(());
    }

    match &args.output {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            matrix.write_csv(writer)?;
            println!("Distance matrix written to {}", path.display());
        }
        None => matrix.write_csv(io::stdout().lock())?,
    }
    Ok(())
}

fn label(number: Option<isize>) -> String {
    number.map_or_else(|| "-".to_string(), |n| n.to_string())
}
