mod defaults;

pub use defaults::DefaultsConfig;

use crate::cli::{AlignArgs, BacktranslateArgs};
use crate::error::{CliError, Result};
use pdbprep::workflows::align::AlignmentConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialAlignmentConfig {
    program: Option<PathBuf>,
    args: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialCodonConfig {
    table: Option<PathBuf>,
    seed: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    alignment: Option<PartialAlignmentConfig>,
    codons: Option<PartialCodonConfig>,
}

/// Resolved settings for the `backtranslate` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackTranslationSettings {
    /// Codon table file; `None` selects the built-in E. coli table.
    pub table: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads `path` when given, otherwise starts from an empty configuration, then applies
    /// `--set` overrides.
    pub fn load(path: Option<&Path>, set_values: &[String]) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_set_values(set_values)?;
        Ok(config)
    }

    pub fn alignment_config(&self, args: &AlignArgs) -> AlignmentConfig {
        let defaults = DefaultsConfig::default().alignment;
        let file = self.alignment.clone().unwrap_or_default();
        AlignmentConfig {
            program: args
                .program
                .clone()
                .or(file.program)
                .unwrap_or(defaults.program),
            args: file.args.unwrap_or(defaults.args),
        }
    }

    pub fn back_translation_settings(&self, args: &BacktranslateArgs) -> BackTranslationSettings {
        let defaults = DefaultsConfig::default();
        let file = self.codons.clone().unwrap_or_default();
        BackTranslationSettings {
            table: args.table.clone().or(file.table).or(defaults.codon_table),
            seed: args.seed.or(file.seed).or(defaults.codon_seed),
        }
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
                CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                ))
            })?;

            match key {
                "alignment.program" => {
                    self.alignment
                        .get_or_insert_with(Default::default)
                        .program = Some(PathBuf::from(value_str));
                }
                "codons.table" => {
                    self.codons.get_or_insert_with(Default::default).table =
                        Some(PathBuf::from(value_str));
                }
                "codons.seed" => {
                    self.codons.get_or_insert_with(Default::default).seed =
                        Some(value_str.parse().map_err(|_| {
                            CliError::Config(format!(
                                "Invalid integer value for {}: {}",
                                key, value_str
                            ))
                        })?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
