use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scrub")]
#[command(about = "Normalize and sanitize LLM output streams", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract the JSON-shaped region from raw model output
    Extract(ExtractArgs),

    /// Repair a truncated or malformed JSON fragment
    Repair(RepairArgs),

    /// Scan text for sensitive substrings
    Scan(ScanArgs),

    /// Tokenize sensitive substrings with a one-shot vault
    Mask(MaskArgs),
}

#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (stdin when omitted)
    pub input: Option<PathBuf>,

    /// Take the first JSON candidate instead of the last
    #[arg(long)]
    pub first: bool,
}

#[derive(Args)]
pub struct RepairArgs {
    /// Input file (stdin when omitted)
    pub input: Option<PathBuf>,

    /// Repair the input verbatim, without the extraction step
    #[arg(long)]
    pub no_extract: bool,

    /// Print the full repair result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Input file (stdin when omitted)
    pub input: Option<PathBuf>,

    /// Print a redacted copy of the input
    #[arg(long)]
    pub redact: bool,

    /// Print the full scan report as JSON
    #[arg(long)]
    pub json: bool,

    /// Extra allow-list entries for this run
    #[arg(long)]
    pub allow: Vec<String>,
}

#[derive(Args)]
pub struct MaskArgs {
    /// Input file (stdin when omitted)
    pub input: Option<PathBuf>,
}
