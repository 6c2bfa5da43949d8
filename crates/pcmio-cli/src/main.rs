// SPDX-License-Identifier: Apache-2.0

mod devices;
mod error;
mod info;
mod record;

use clap::{Parser, Subcommand};
use error::result_to_exit_code;
use std::process::ExitCode;

/// pcmio CLI - PCM device discovery, inspection, and raw capture tool
#[derive(Parser)]
#[command(name = "pcmio")]
#[command(version)]
#[command(about = "pcmio CLI - PCM device discovery, inspection, and raw capture tool")]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (use RUST_LOG=debug for more)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List PCM devices found under /dev/snd
    Devices(devices::Args),

    /// Display metadata for one PCM device
    Info(info::Args),

    /// Capture raw interleaved frames from a device to a file
    Record(record::Args),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    // Execute the subcommand and convert result to exit code
    let result = match cli.command {
        Commands::Devices(args) => devices::execute(args, cli.json),
        Commands::Info(args) => info::execute(args, cli.json),
        Commands::Record(args) => record::execute(args, cli.json),
    };

    result_to_exit_code(result)
}

/// Initialize env_logger based on verbosity flags
fn init_logging(verbose: bool, quiet: bool) {
    // Determine log level from flags or RUST_LOG environment variable
    let env = env_logger::Env::default();

    let env = if quiet {
        // Quiet mode: only show errors
        env.default_filter_or("error")
    } else if verbose {
        // Verbose mode: show debug messages
        env.default_filter_or("debug")
    } else {
        // Default: show info and above
        env.default_filter_or("info")
    };

    env_logger::Builder::from_env(env)
        .format_timestamp(None) // Disable timestamps for cleaner CLI output
        .format_target(false) // Disable target (module path) for cleaner output
        .init();

    log::debug!("Logging initialized");
}
