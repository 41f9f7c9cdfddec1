use super::read_records;
use crate::cli::BacktranslateArgs;
use crate::config::PartialAppConfig;
use crate::error::{CliError, Result};
use pdbprep::core::codons::CodonTable;
use pdbprep::core::io::fasta::{FastaFile, SequenceRecord};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

pub fn run(args: BacktranslateArgs, config: &PartialAppConfig) -> Result<()> {
    let settings = config.back_translation_settings(&args);

    let table = match &settings.table {
        Some(path) => {
            info!("Loading codon table from {:?}", path);
            CodonTable::load(path)?
        }
        None => CodonTable::escherichia_coli(),
    };
    info!("Using preferred codons for {}.", table.organism());

    let mut rng = match settings.seed {
        Some(seed) => {
            debug!("Seeding codon choice with {}.", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let proteins = read_records(&args.input)?;
    let genes = proteins
        .iter()
        .map(|protein| -> Result<SequenceRecord> {
            let dna = table
                .back_translate_to_dna(&protein.sequence, &mut rng)
                .map_err(|source| CliError::BackTranslation {
                    record: protein.name.clone(),
                    source,
                })?;
            Ok(SequenceRecord {
                name: protein.name.clone(),
                description: protein.description.clone(),
                sequence: dna,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    FastaFile::write_to_path(&genes, &args.output)?;
    println!(
        "Back-translated {} records to {}",
        genes.len(),
        args.output.display()
    );
    Ok(())
}
