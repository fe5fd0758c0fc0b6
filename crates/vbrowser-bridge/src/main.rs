//! VBrowser session bridge: script replay entry point.
//!
//! Runs a [`SessionBridge`] against a recording session and a software
//! texture, driven by a JSON-lines replay script.  Every event the bridge
//! forwards is written to stdout as one JSON object per line, so a replay can
//! be diffed against expected output.  Logs go to stderr.
//!
//! # Usage
//!
//! ```text
//! vbrowser-bridge --config <PATH> --script <PATH> [--log-level <LEVEL>]
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable          | Default | Description                        |
//! |-------------------|---------|------------------------------------|
//! | `VBROWSER_CONFIG` |         | TOML config file                   |
//! | `VBROWSER_SCRIPT` |         | JSON-lines replay script           |
//! | `VBROWSER_LOG`    | `info`  | `tracing` filter directive         |
//!
//! CLI args take precedence when both are present.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use vbrowser_bridge::application::{Clock, SessionBridge};
use vbrowser_bridge::infrastructure::{
    load_from_path, load_script, run_script, ManualClock, RecordingSessionProvider, SoftwareSurface,
};
use vbrowser_core::SurfaceTransform;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Replays a scripted interaction through the VBrowser session bridge.
#[derive(Debug, Parser)]
#[command(
    name = "vbrowser-bridge",
    about = "Replay pointer, frame and lifecycle scripts through the VBrowser session bridge",
    version
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, env = "VBROWSER_CONFIG")]
    config: PathBuf,

    /// Path to the JSON-lines replay script.
    #[arg(long, env = "VBROWSER_SCRIPT")]
    script: PathBuf,

    /// Log filter, e.g. `debug` or `vbrowser_core=trace,info`.
    #[arg(long, default_value = "info", env = "VBROWSER_LOG")]
    log_level: String,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = load_from_path(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;
    let steps = load_script(&cli.script)
        .with_context(|| format!("failed to load replay script from {}", cli.script.display()))?;
    info!(
        config = %cli.config.display(),
        script = %cli.script.display(),
        steps = steps.len(),
        "VBrowser bridge replay starting"
    );

    let dims = config.surface.dimensions().context("invalid surface dimensions")?;
    let surface = SoftwareSurface::new(dims, SurfaceTransform::IDENTITY);
    let clock = Arc::new(ManualClock::new(0));
    let mut bridge = SessionBridge::new(surface, &config, Arc::clone(&clock) as Arc<dyn Clock>);

    // ── Forwarded-event printer ───────────────────────────────────────────────
    //
    // Runs until every sender is gone, i.e. until both the provider and the
    // bridge (which owns the session) have been dropped.
    let (provider, mut rx) = RecordingSessionProvider::new();
    let printer = tokio::spawn(async move {
        let mut printed = 0usize;
        while let Some(recorded) = rx.recv().await {
            match serde_json::to_string(&recorded.event) {
                Ok(line) => {
                    println!("{line}");
                    printed += 1;
                }
                Err(e) => warn!(session_id = %recorded.session_id, "failed to encode forwarded event: {e}"),
            }
        }
        printed
    });

    bridge
        .connect(&provider)
        .await
        .context("failed to open recording session")?;

    let summary = run_script(&mut bridge, &steps, &clock);
    bridge.close();

    drop(provider);
    drop(bridge);
    let printed = printer.await.context("forwarded-event printer panicked")?;

    info!(
        sent = summary.sent,
        ignored = summary.ignored,
        no_session = summary.no_session,
        throttled = summary.throttled,
        failed = summary.failed,
        frames_bound = summary.frames_bound,
        frames_redrawn = summary.frames_redrawn,
        frames_discarded = summary.frames_discarded,
        session_events = summary.session_events,
        printed,
        "VBrowser bridge replay finished"
    );
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
