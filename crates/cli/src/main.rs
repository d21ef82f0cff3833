use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

use output::{OutputFormat, print_error};

/// modmeta - Realise published module metadata
#[derive(Parser)]
#[command(name = "modmeta")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Realise a module document and print its configurations and variants
  Realise {
    /// Path to the module document (JSON)
    module: PathBuf,

    /// Path to a variant rules document (JSON)
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Show which configurations pull in each declared dependency
  Explain {
    /// Path to the module document (JSON)
    module: PathBuf,

    /// Path to a variant rules document (JSON)
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Print the content hash of the realised metadata
  Hash {
    /// Path to the module document (JSON)
    module: PathBuf,

    /// Path to a variant rules document (JSON)
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,
  },
}

fn init_logging(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let result = match cli.command {
    Commands::Realise { module, rules, format } => cmd::cmd_realise(&module, rules.as_deref(), format, cli.verbose),
    Commands::Explain { module, rules, format } => cmd::cmd_explain(&module, rules.as_deref(), format),
    Commands::Hash { module, rules, format } => cmd::cmd_hash(&module, rules.as_deref(), format),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
