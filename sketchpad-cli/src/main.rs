//! # Sketchpad
//!
//! Replays a recorded session and writes raster exports.

use anyhow::Context;
use clap::Parser;
use sketchpad_cli::{load_script, CliArgs, SessionConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: info,sketchpad_core=debug,sketchpad_renderer=debug).
/// Set `SKETCHPAD_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,sketchpad_core=debug,sketchpad_renderer=debug")
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false);

    if std::env::var("SKETCHPAD_LOG_FORMAT").as_deref() == Ok("json") {
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

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let steps = load_script(&args.script)
        .with_context(|| format!("failed to load {}", args.script.display()))?;
    let config = SessionConfig::from(args);

    let report = sketchpad_cli::run(config, &steps)?;
    for path in &report.outputs {
        println!("{}", path.display());
    }
    Ok(())
}
