//! # Shape Editor
//!
//! Command-line host for the shape editor.

use clap::Parser;
use shape_editor::{command, CliArgs, EditorHost, Flow, HostConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: info,shape_core=debug,shape_editor=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shape_core=debug,shape_editor=debug"));

    // Logs go to stderr so command output stays clean on stdout
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

// All edits run on one thread, one command at a time.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = HostConfig::from(args);
    tracing::info!("Starting shape editor (data dir: {})", config.data_dir.display());

    let mut host = EditorHost::new(&config);

    if let Some(ref path) = config.import {
        match host.import_startup(path).await {
            Ok(summary) => tracing::info!(
                "Loaded {} shapes from {}",
                summary.imported,
                path.display()
            ),
            Err(e) => tracing::warn!("Failed to import {}: {e}", path.display()),
        }
    }

    let mut stdout = std::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("error: {e}");
                continue;
            }
        };
        if host.execute(command, &mut stdout).await? == Flow::Quit {
            break;
        }
    }

    tracing::info!("Shape editor exited");
    Ok(())
}
