//! Hatchet MCP Server
//!
//! Read-only tools for debugging and monitoring Hatchet workflow runs
//! from an MCP client.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use hatchet_client::config::{SERVER_URL_ENV, TENANT_ID_ENV, TOKEN_ENV};
use hatchet_client::{ClientConfig, HatchetApi, HatchetClient};
use hatchet_mcp::{serve_http, serve_stdio};

/// How MCP clients reach the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    /// MCP over stdin/stdout
    Stdio,
    /// MCP over Streamable HTTP at /mcp
    Http,
}

/// MCP server exposing read-only Hatchet queries.
#[derive(Parser, Debug)]
#[command(name = "hatchet-mcp", version, about = "Debug and monitor Hatchet workflow runs over MCP")]
struct Args {
    /// Hatchet API token
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    token: Option<String>,

    /// Hatchet API address (defaults to the token's server_url claim)
    #[arg(long, env = SERVER_URL_ENV)]
    server_url: Option<String>,

    /// Tenant ID (defaults to the token's sub claim)
    #[arg(long, env = TENANT_ID_ENV)]
    tenant_id: Option<String>,

    /// Transport to serve MCP over
    #[arg(long, value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// Bind address for the HTTP transport
    #[arg(long, default_value = "127.0.0.1:8765")]
    http_addr: SocketAddr,

    /// Timeout for each Hatchet API request, in seconds
    #[arg(long, default_value = "30")]
    request_timeout_secs: u64,
}

/// Directives used when `RUST_LOG` is unset or unparsable.
const DEFAULT_LOG_DIRECTIVES: &str = "hatchet_mcp=info,hatchet_client=info";

/// Build the log filter, letting `RUST_LOG` replace the defaults entirely.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging (to stderr, stdout carries the stdio transport)
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = ClientConfig::resolve(args.token, args.server_url, args.tenant_id)?
        .with_request_timeout(Duration::from_secs(args.request_timeout_secs));

    info!(
        server_url = %config.server_url,
        tenant_id = %config.tenant_id,
        transport = ?args.transport,
        "Starting Hatchet MCP server"
    );

    let api: Arc<dyn HatchetApi> = Arc::new(HatchetClient::new(&config)?);

    match args.transport {
        Transport::Stdio => serve_stdio(api).await?,
        Transport::Http => {
            let ct = CancellationToken::new();

            let shutdown = ct.clone();
            tokio::spawn(async move {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    error!(error = %e, "Failed to listen for Ctrl-C");
                }
                info!("Shutting down");
                shutdown.cancel();
            });

            serve_http(api, args.http_addr, ct).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["hatchet-mcp", "--token", "t"]).unwrap();
        assert_eq!(args.transport, Transport::Stdio);
        assert_eq!(args.http_addr, "127.0.0.1:8765".parse::<SocketAddr>().unwrap());
        assert_eq!(args.request_timeout_secs, 30);
    }

    #[test]
    fn test_rust_log_overrides_default_filter() {
        let filter = log_filter(Some("hatchet_client=debug,hatchet_mcp=debug")).to_string();
        assert!(filter.contains("hatchet_client=debug"));
        assert!(filter.contains("hatchet_mcp=debug"));
        assert!(!filter.contains("=info"));
    }

    #[test]
    fn test_default_filter_without_rust_log() {
        for rust_log in [None, Some(""), Some("  ")] {
            let filter = log_filter(rust_log).to_string();
            assert!(filter.contains("hatchet_client=info"));
            assert!(filter.contains("hatchet_mcp=info"));
        }
    }

    #[test]
    fn test_args_http_transport() {
        let args = Args::try_parse_from([
            "hatchet-mcp",
            "--transport",
            "http",
            "--http-addr",
            "0.0.0.0:9000",
        ])
        .unwrap();
        assert_eq!(args.transport, Transport::Http);
        assert_eq!(args.http_addr.port(), 9000);
    }
}
