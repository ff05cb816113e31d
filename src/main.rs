mod config;
mod ipc;
mod model;
mod render;
mod scan;
mod session;
mod store;
mod workflow;

use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // stdout carries the protocol; logs go to stderr.
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(io::stderr)
        .init();

    let config = config::Config::from_args(config::Args::parse())?;
    let mut state = ipc::AppState::new(config);
    if let Some(ws) = state.config.workspace.clone() {
        ipc::open_workspace(&mut state, &ws)?;
    }
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        scan_delay_min_secs = state.config.scan_delay.min_secs,
        scan_delay_max_secs = state.config.scan_delay.max_secs,
        "attendd ready"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id.
                tracing::warn!(error = %e, "unparseable request line");
                let reply = serde_json::json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() }
                });
                let _ = writeln!(stdout, "{}", reply);
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
    Ok(())
}
