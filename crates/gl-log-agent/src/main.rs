//! GlusterFS log agent: turns a GlusterFS log file into tagged JSON events.
//!
//! Events go to stdout, one JSON object per line; the agent's own logs go to
//! stderr.

use tracing_subscriber::EnvFilter;

use gl_log_agent::config::AgentConfig;
use gl_log_agent::pipeline;
use gl_log_agent::sink::{EventSink, JsonLinesSink};
use gl_log_agent::source::FileLineSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "gl-log-agent starting");

    // ── Load config ─────────────────────────────────────────────
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/etc/gl-log-agent/agent.toml".to_string());

    let config = AgentConfig::from_file(&config_path)?;
    let extractor = config.parser.build()?;
    tracing::info!(
        tag = %config.tag,
        path = %config.path,
        gluster_log_level = %extractor.alphabet(),
        handle_parse_failure = extractor.handles_parse_failure(),
        hostname = %extractor.hostname(),
        "config loaded"
    );

    // ── Source and sink ─────────────────────────────────────────
    let source = FileLineSource;
    let sink = JsonLinesSink::new(tokio::io::stdout());

    tokio::select! {
        result = pipeline::run(&config, &extractor, &source, &sink) => {
            let stats = result?;
            tracing::info!(
                lines = stats.lines,
                emitted = stats.emitted(),
                by_level = %serde_json::to_string(&stats.by_level)?,
                "gl-log-agent finished"
            );
        }
        // Graceful shutdown on SIGINT/SIGTERM
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
            sink.flush().await?;
        }
    }

    tracing::info!("gl-log-agent stopped");
    Ok(())
}
