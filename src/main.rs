use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use folio::cli::commands::Cli;
use folio::cli::handlers::{self, Context};
use folio::io::config_io::read_config;
use tracing_subscriber::EnvFilter;

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_env("FOLIO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// The TUI owns the terminal, so its logs go to `<data_dir>/folio.log`.
fn init_file_logging(data_dir: &Path) {
    let file = std::fs::create_dir_all(data_dir).and_then(|()| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(data_dir.join("folio.log"))
    });
    match file {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(log_filter())
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init(),
        Err(_) => init_silent_logging(),
    }
}

/// Drop logs rather than draw over the TUI.
fn init_silent_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("off"))
        .init();
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_tui(ctx: &Context, admin: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = read_config(&ctx.data_dir)?;
    config.ui.admin |= admin;
    let store = handlers::open_store(&ctx.data_dir, ctx.persist);
    folio::tui::run(&ctx.data_dir, config, store, ctx.persist)
}

fn main() {
    let cli = Cli::parse();
    let ctx = Context::from_cli(&cli);

    let result = match cli.command {
        None => {
            // No subcommand → launch TUI
            if ctx.persist {
                init_file_logging(&ctx.data_dir);
            } else {
                init_silent_logging();
            }
            run_tui(&ctx, cli.admin)
        }
        Some(command) => {
            init_stderr_logging();
            handlers::dispatch(&ctx, command)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
