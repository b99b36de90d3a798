//! # Console Host Daemon
//!
//! Main entry point for the two-pane console.

use clap::Parser;
use consoled::{init_logging, Cli, HostMode, HostRuntime, LogTarget};
use std::process;

fn main() {
    let cli = Cli::parse();
    let mode = cli.mode();

    let target = LogTarget::for_mode(mode, cli.log_file.as_deref());
    if let Err(e) = init_logging(&target, cli.log_level.as_deref()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let config = cli.runtime_config().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let mut runtime = HostRuntime::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to create runtime: {}", e);
        process::exit(1);
    });

    if let Err(e) = runtime.run() {
        eprintln!("Runtime error: {}", e);
        process::exit(1);
    }

    if mode == HostMode::Scripted {
        println!("{}", runtime.transcript());
    }
}
