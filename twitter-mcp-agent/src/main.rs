use anyhow::Result;
use clap::{Parser, ValueEnum};
use rmcp::{
    transport::sse_server::SseServer,
    transport::stdio,
    transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpService,
    },
    ServiceExt,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tower_http::cors::CorsLayer;
use twitter_mcp_agent::utils::init_logging;
use twitter_mcp_agent::{Configuration, TwitterWrapper};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Twitter MCP Server - post and search tweets through a remote browser"
)]
struct Args {
    /// Transport mode to use
    #[arg(short, long, value_enum, default_value = "stdio")]
    transport: TransportMode,

    /// Port to listen on (only used for SSE and HTTP transports)
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host to bind to (only used for SSE and HTTP transports)
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Enable CORS for the HTTP transport
    #[arg(long)]
    cors: bool,

    /// Path to a JSON or YAML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Inline JSON or YAML configuration (ignored when --config is given)
    #[arg(long, value_name = "JSON")]
    config_json: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum TransportMode {
    /// Standard I/O transport (default)
    Stdio,
    /// Server-Sent Events transport for web integrations
    Sse,
    /// Streamable HTTP transport for HTTP-based clients
    Http,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Never write to stdout during panic - it corrupts the JSON-RPC stream
    std::panic::set_hook(Box::new(|panic_info| {
        if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            eprintln!("MCP Server Panic: {s}");
        } else {
            eprintln!("MCP Server Panic occurred");
        }
        if let Some(location) = panic_info.location() {
            eprintln!("Panic location: {}:{}", location.file(), location.line());
        }
    }));

    init_logging()?;

    let config = Configuration::resolve(args.config.as_deref(), args.config_json.as_deref())?;
    tracing::info!("Initializing Twitter MCP server...");
    tracing::info!("Configuration: {:?}", config);
    tracing::info!("Transport mode: {:?}", args.transport);

    let twitter = TwitterWrapper::new(config);

    match args.transport {
        TransportMode::Stdio => {
            tracing::info!("Starting stdio transport...");
            let service = twitter.serve(stdio()).await.inspect_err(|e| {
                tracing::error!("Serving error: {:?}", e);
            })?;

            service.waiting().await?;
        }
        TransportMode::Sse => {
            let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
            tracing::info!("Starting SSE server on http://{}", addr);

            let ct = SseServer::serve(addr)
                .await?
                .with_service(move || twitter.clone());

            eprintln!("SSE server running on http://{addr}");
            eprintln!("Connect your MCP client to:");
            eprintln!("  SSE endpoint: http://{addr}/sse");
            eprintln!("  Message endpoint: http://{addr}/message");
            eprintln!("Press Ctrl+C to stop");

            tokio::signal::ctrl_c().await?;
            ct.cancel();
            tracing::info!("Shutting down SSE server");
        }
        TransportMode::Http => {
            let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
            tracing::info!("Starting streamable HTTP server on http://{}", addr);

            let service = StreamableHttpService::new(
                move || Ok(twitter.clone()),
                LocalSessionManager::default().into(),
                Default::default(),
            );

            let mut router = axum::Router::new()
                .route("/health", axum::routing::get(health_check))
                .nest_service("/mcp", service);
            if args.cors {
                router = router.layer(CorsLayer::permissive());
            }
            let tcp_listener = tokio::net::TcpListener::bind(addr).await?;

            eprintln!("Streamable HTTP server running on http://{addr}");
            eprintln!("Connect your MCP client to: http://{addr}/mcp");
            eprintln!("Health check available at: http://{addr}/health");
            eprintln!("Press Ctrl+C to stop");

            axum::serve(tcp_listener, router)
                .with_graceful_shutdown(async {
                    tokio::signal::ctrl_c().await.ok();
                })
                .await?;

            tracing::info!("Shutting down HTTP server");
        }
    }

    Ok(())
}

async fn health_check() -> impl axum::response::IntoResponse {
    (
        axum::http::StatusCode::OK,
        axum::Json(serde_json::json!({"status": "ok"})),
    )
}
