//! pyprep CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use pyprep::cli::{Cli, CommandDispatcher};
use pyprep::ui::{create_ui, OutputMode};
use pyprep::PyprepError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("pyprep=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pyprep=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Configuration problems exit with 2, everything else with 1.
fn exit_code_for(error: &PyprepError) -> u8 {
    match error {
        PyprepError::ConfigNotFound { .. }
        | PyprepError::ConfigParseError { .. }
        | PyprepError::ConfigValidationError { .. } => 2,
        _ => 1,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("pyprep starting with args: {:?}", cli);

    let output_mode = OutputMode::from_flags(cli.verbose, cli.quiet);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let project_root = match cli.project.clone() {
        Some(path) => std::path::absolute(&path).unwrap_or(path),
        None => std::env::current_dir().unwrap_or_default(),
    };

    let mut ui = create_ui(output_mode);

    let result = CommandDispatcher::load(project_root, cli.config.as_deref())
        .and_then(|dispatcher| dispatcher.dispatch(&cli, ui.as_mut()));

    match result {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(exit_code_for(&e))
        }
    }
}
