use super::read_structure;
use crate::cli::RenumberArgs;
use crate::error::Result;
use pdbprep::core::io::pdb::PdbFile;
use pdbprep::core::io::traits::StructureFile;
use pdbprep::workflows::renumber::{self, RenumberPlan};
use tracing::{info, warn};

pub fn run(args: RenumberArgs) -> Result<()> {
    let mut structure = read_structure(&args.input)?;

    let plan = RenumberPlan {
        start: args.start,
        remove: args.remove,
    };
    if plan.start.is_none() && plan.remove.is_empty() {
        warn!("Neither --start nor --remove given; the structure is written unchanged.");
    }

    let summary = renumber::run(&mut structure, &plan)?;

    info!("Writing renumbered structure to {:?}", &args.output);
    PdbFile::write_to_path(&structure, &args.output)?;
    println!(
        "Wrote {} residues to {} ({} removed, {} renumbered).",
        summary.retained,
        args.output.display(),
        summary.removed,
        summary.renumbered
    );
    Ok(())
}
