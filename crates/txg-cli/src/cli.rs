use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "txg",
    about = "Transaction entry graph: entry IDs and wire encodings",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build an output and print its entry ID and wire encoding
    OutputId(OutputArgs),
    /// Decode a wire-encoded output
    DecodeOutput(DecodeArgs),
    /// Build an output and a spend of it, and print both IDs
    SpendId(SpendArgs),
}

#[derive(Args, Clone, Debug)]
pub struct OutputArgs {
    /// Asset ID (64 hex chars)
    #[arg(long)]
    pub asset: String,
    #[arg(long)]
    pub amount: u64,
    /// Claim program (hex)
    #[arg(long, default_value = "")]
    pub program: String,
    /// Reference data (hex)
    #[arg(long, default_value = "")]
    pub ref_data: String,
}

#[derive(Args, Clone, Debug)]
pub struct DecodeArgs {
    /// Wire encoding (hex)
    pub hex: String,
    /// Transaction version the output was written under; overrides the config
    #[arg(long)]
    pub tx_version: Option<u64>,
}

#[derive(Args, Clone, Debug)]
pub struct SpendArgs {
    #[command(flatten)]
    pub output: OutputArgs,
    /// Spend data hash (64 hex chars)
    #[arg(long)]
    pub data: String,
    /// Position of the spend among its transaction's inputs
    #[arg(long, default_value_t = 0)]
    pub ordinal: usize,
}
