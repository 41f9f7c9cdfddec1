use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan",
    version,
    about = "pdbprep - residue renumbering, distances, sequences, alignment and codon back-translation for protein structures.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S codons.seed=42
    #[arg(short = 'S', long = "set", global = true, value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print or save the one-letter sequence of a PDB structure.
    Sequence(SequenceArgs),
    /// Remove residues and renumber the rest of a PDB structure.
    Renumber(RenumberArgs),
    /// Compute minimum inter-residue distances.
    Distance(DistanceArgs),
    /// Align FASTA records with an external aligner, keeping the input record order.
    Align(AlignArgs),
    /// Reverse-translate protein FASTA records into DNA using preferred codons.
    Backtranslate(BacktranslateArgs),
}

/// Arguments for the `sequence` subcommand.
#[derive(Args, Debug)]
pub struct SequenceArgs {
    /// Path to the input PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Write the sequence as a FASTA record instead of printing it.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Record name for FASTA output. Defaults to the input file stem.
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Map residues without a one-letter code to 'X' instead of failing.
    #[arg(long)]
    pub allow_unknown: bool,

    /// Skip residues whose sequence number is cleared.
    #[arg(long)]
    pub retained_only: bool,
}

/// Arguments for the `renumber` subcommand.
#[derive(Args, Debug)]
pub struct RenumberArgs {
    /// Path to the input PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Renumber retained residues consecutively, starting from this number.
    #[arg(short, long, value_name = "INT", allow_negative_numbers = true)]
    pub start: Option<isize>,

    /// Original sequence number of a residue to remove. Can be used multiple times.
    #[arg(short, long, value_name = "INT", allow_negative_numbers = true)]
    pub remove: Vec<isize>,
}

/// Arguments for the `distance` subcommand.
#[derive(Args, Debug)]
pub struct DistanceArgs {
    /// Path to the input PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Print the distance between two residues, given by their sequence numbers.
    #[arg(
        long,
        num_args = 2,
        value_names = ["A", "B"],
        allow_negative_numbers = true,
        conflicts_with_all = ["cutoff", "output"]
    )]
    pub pair: Option<Vec<isize>>,

    /// List residue pairs closer than this distance (in Angstroms).
    #[arg(long, value_name = "FLOAT", conflicts_with = "output")]
    pub cutoff: Option<f64>,

    /// Write the full distance matrix as CSV. Printed to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `align` subcommand.
#[derive(Args, Debug)]
pub struct AlignArgs {
    /// Path to the input FASTA file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the aligned FASTA file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Override the aligner executable from the config file.
    #[arg(long, value_name = "PATH")]
    pub program: Option<PathBuf>,
}

/// Arguments for the `backtranslate` subcommand.
#[derive(Args, Debug)]
pub struct BacktranslateArgs {
    /// Path to the input protein FASTA file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output DNA FASTA file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Codon table in TOML format. Defaults to the built-in E. coli table.
    #[arg(short, long, value_name = "PATH")]
    pub table: Option<PathBuf>,

    /// Seed for the random codon choice, for reproducible output.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,
}
