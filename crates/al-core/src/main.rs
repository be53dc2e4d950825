//! applist - deterministic installed-application inventory as JSON.
//!
//! Collects a snapshot of the host's installed-application inventory and
//! build constants and prints it as a single JSON document on stdout.
//! Everything that varies between hosts resolves from the environment
//! (see `config`); the CLI surface is log-verbosity only.

use al_core::config::Config;
use al_core::exit_codes::ExitCode;
use al_core::index::ManifestIndex;
use al_core::logging::init_logging;
use al_core::platform::HostPlatform;
use al_core::run::{self, Orchestrator};
use al_core::walk::Walker;
use clap::Parser;
use std::io::BufWriter;
use tracing::error;

/// Deterministic installed-application inventory as JSON on stdout.
#[derive(Parser)]
#[command(name = "applist", version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = Config::from_env();
    run::cleanup_scratch_binary(&config);

    let code = match run_document(&config) {
        Ok(()) => ExitCode::Done,
        Err(err) => {
            let code = ExitCode::from(&err);
            error!(error = %err, exit = %code, "run failed");
            code
        }
    };

    // The run is complete in a terminal state. Exit explicitly so stray
    // non-daemon threads spawned by the hosting environment cannot keep
    // the process alive.
    std::process::exit(code.as_i32());
}

fn run_document(config: &Config) -> al_common::Result<()> {
    let index = match &config.index_path {
        Some(path) => ManifestIndex::load(path)?,
        None => ManifestIndex::empty(),
    };
    let platform = HostPlatform;
    let walker = Walker::with_max_depth(config.max_depth);

    let stdout = std::io::stdout();
    let sink = BufWriter::new(stdout.lock());

    let mut orchestrator = Orchestrator::new(&index, &platform, walker);
    orchestrator.run(sink)
}
