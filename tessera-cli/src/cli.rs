//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tessera_engine::FormattingStrategy;

#[derive(Debug, Parser)]
#[command(name = "tessera")]
#[command(about = "Deterministic passwords and codenames from a hardware authenticator")]
#[command(version)]
pub struct Cli {
    /// Directory holding config.json
    #[arg(long, global = true, env = "TESSERA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Write logs to daily-rotated files in this directory instead of stderr
    #[arg(long, global = true, env = "TESSERA_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate the password or codename for one service
    Generate(GenerateArgs),
    /// Show the canonical label and challenge for a service
    Canonicalize {
        /// Service name, domain, or URL host
        service: String,
    },
    /// Generate for a fixed set of sample services with the demo key
    Demo {
        /// Version to generate
        #[arg(short, long, default_value_t = 1)]
        version: u32,
    },
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Service name, domain, or URL host
    pub service: String,

    /// Version to generate; bump to rotate
    #[arg(short, long, default_value_t = 1)]
    pub version: u32,

    /// Output format (defaults to the configured strategy)
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Credential identifier, hex-encoded
    #[arg(short, long)]
    pub credential: Option<String>,

    /// File holding a hex-encoded 32-byte software authenticator secret
    #[arg(long, conflicts_with = "demo")]
    pub secret_file: Option<PathBuf>,

    /// Use the public demo key (outputs are NOT secret)
    #[arg(long)]
    pub demo: bool,

    /// Print the artifact as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Password,
    Codename,
}

impl From<StrategyArg> for FormattingStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Password => Self::Password,
            StrategyArg::Codename => Self::Codename,
        }
    }
}
