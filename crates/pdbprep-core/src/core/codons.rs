use phf::{Map, phf_map};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;

/// Preferred codons for expression in *Escherichia coli*, including stop (`*`) and gap (`-`).
static E_COLI_PREFERRED_CODONS: Map<char, &'static [&'static str]> = phf_map! {
    'A' => &["GCT", "GCA"], 'R' => &["CGT", "CGA"], 'N' => &["AAT"],
    'D' => &["GAT"], 'C' => &["TGT"], 'Q' => &["CAA", "CAG"], 'E' => &["GAA"],
    'G' => &["GGT"], 'H' => &["CAT", "CAC"], 'I' => &["ATT", "ATC"],
    'L' => &["TTA", "TTG", "CTA"], 'K' => &["AAA"], 'M' => &["ATG"],
    'F' => &["TTT"], 'P' => &["CCT", "CCA"], 'S' => &["AGT", "TCA"],
    'T' => &["ACA", "ACT"], 'W' => &["TGG"], 'Y' => &["TAT"],
    'V' => &["GTT", "GTA"], '*' => &["TGA"], '-' => &["---"],
};

const GAP_CODON: &str = "---";

#[derive(Debug, Error)]
pub enum CodonTableError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Codon table key '{0}' must be a single character")]
    InvalidSymbol(String),
    #[error("Invalid codon '{codon}' for symbol '{symbol}'")]
    InvalidCodon { symbol: char, codon: String },
    #[error("Symbol '{0}' has no codons")]
    EmptyCodonList(char),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodonError {
    #[error("Symbol '{symbol}' at position {position} is not in the codon table")]
    UnknownSymbol { symbol: char, position: usize },
    #[error("Symbol '{0}' has no codons")]
    NoCodons(char),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CodonTableFile {
    organism: String,
    codons: HashMap<String, Vec<String>>,
}

fn is_valid_codon(codon: &str) -> bool {
    codon == GAP_CODON
        || (codon.len() == 3 && codon.bytes().all(|b| matches!(b, b'A' | b'C' | b'G' | b'T')))
}

/// A per-organism table of preferred codons, keyed by one-letter amino-acid symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodonTable {
    organism: String,
    codons: BTreeMap<char, Vec<String>>,
}

impl CodonTable {
    /// The built-in *E. coli* preferred-codon table.
    pub fn escherichia_coli() -> Self {
        let codons = E_COLI_PREFERRED_CODONS
            .entries()
            .map(|(&symbol, codons)| (symbol, codons.iter().map(|c| c.to_string()).collect()))
            .collect();
        Self {
            organism: "Escherichia coli".to_string(),
            codons,
        }
    }

    /// Loads a table from a TOML file of the form:
    ///
    /// ```toml
    /// organism = "Saccharomyces cerevisiae"
    ///
    /// [codons]
    /// A = ["GCT"]
    /// "*" = ["TAA"]
    /// ```
    pub fn load(path: &Path) -> Result<Self, CodonTableError> {
        let content = std::fs::read_to_string(path).map_err(|e| CodonTableError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: CodonTableFile = toml::from_str(&content).map_err(|e| CodonTableError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut codons = BTreeMap::new();
        for (key, list) in file.codons {
            let mut chars = key.chars();
            let symbol = match (chars.next(), chars.next()) {
                (Some(symbol), None) => symbol,
                _ => return Err(CodonTableError::InvalidSymbol(key)),
            };
            if list.is_empty() {
                return Err(CodonTableError::EmptyCodonList(symbol));
            }
            if let Some(codon) = list.iter().find(|c| !is_valid_codon(c)) {
                return Err(CodonTableError::InvalidCodon {
                    symbol,
                    codon: codon.clone(),
                });
            }
            codons.insert(symbol, list);
        }

        Ok(Self {
            organism: file.organism,
            codons,
        })
    }

    pub fn organism(&self) -> &str {
        &self.organism
    }

    /// Preferred codons for `symbol`, if the table has any.
    pub fn codons_for(&self, symbol: char) -> Option<&[String]> {
        self.codons.get(&symbol).map(Vec::as_slice)
    }

    /// Picks one preferred codon for each symbol of `protein`.
    ///
    /// Every distinct symbol draws a single random codon per call, so repeated symbols within
    /// one sequence share a codon; separate calls draw independently.
    ///
    /// # Errors
    ///
    /// Returns [`CodonError::UnknownSymbol`] for the first symbol missing from the table,
    /// before any codon is drawn.
    pub fn back_translate<R: Rng + ?Sized>(
        &self,
        protein: &str,
        rng: &mut R,
    ) -> Result<Vec<&str>, CodonError> {
        if let Some((position, symbol)) = protein
            .chars()
            .enumerate()
            .find(|(_, s)| !self.codons.contains_key(s))
        {
            return Err(CodonError::UnknownSymbol { symbol, position });
        }

        let mut chosen: HashMap<char, &str> = HashMap::new();
        let mut result = Vec::with_capacity(protein.len());
        for symbol in protein.chars() {
            let codon = match chosen.get(&symbol) {
                Some(&codon) => codon,
                None => {
                    let codon = self.codons[&symbol]
                        .choose(rng)
                        .map(String::as_str)
                        .ok_or(CodonError::NoCodons(symbol))?;
                    chosen.insert(symbol, codon);
                    codon
                }
            };
            result.push(codon);
        }
        Ok(result)
    }

    /// Back-translates `protein` into a single DNA string.
    pub fn back_translate_to_dna<R: Rng + ?Sized>(
        &self,
        protein: &str,
        rng: &mut R,
    ) -> Result<String, CodonError> {
        Ok(self.back_translate(protein, rng)?.concat())
    }
}

impl Default for CodonTable {
    fn default() -> Self {
        Self::escherichia_coli()
    }
}
