use pdbprep::workflows::align::AlignmentConfig;
use std::path::PathBuf;

/// Built-in values used when neither the command line nor the config file sets a key.
#[derive(Debug, Default)]
pub struct DefaultsConfig {
    pub alignment: AlignmentConfig,
    /// `None` selects the built-in E. coli table.
    pub codon_table: Option<PathBuf>,
    /// `None` seeds from system entropy.
    pub codon_seed: Option<u64>,
}
