use lavable_relay::client::run_analysis;
use lavable_relay::main_helper::{AppState, Args, Command};
use lavable_relay::relay;
use lavable_relay::types::AnalyzeRequest;

use clap::Parser;
use std::io::Write;
use std::sync::Arc;

fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::prelude::*;

    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => "lavable_relay=info".into(),
    };

    let file_appender = tracing_appender::rolling::daily(".", "lavable-relay.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_error::ErrorLayer::default())
        .init();

    guard
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let _log_guard = init_logging();
    lavable_relay::logging::setup_panic_hook();

    let args = Args::parse();
    match args.command {
        Command::Serve {
            port,
            host,
            request_timeout_secs,
            connect_timeout_secs,
            gateway_url,
        } => {
            serve(
                port,
                host,
                request_timeout_secs,
                connect_timeout_secs,
                gateway_url,
            )
            .await;
        }
        Command::Analyze {
            design_url,
            platform,
            custom_prompt,
            endpoint,
        } => {
            analyze(design_url, platform, custom_prompt, endpoint).await;
        }
    }
}

async fn serve(
    port: u16,
    host: String,
    request_timeout_secs: u64,
    connect_timeout_secs: u64,
    gateway_url: String,
) {
    let api_key = match std::env::var("LOVABLE_API_KEY") {
        Ok(k) if !k.is_empty() => Some(k),
        _ => {
            tracing::warn!(
                "LOVABLE_API_KEY is not set; analysis requests will be rejected until it is configured"
            );
            None
        }
    };

    let client = match reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(request_timeout_secs))
        .connect_timeout(std::time::Duration::from_secs(connect_timeout_secs))
        .pool_idle_timeout(std::time::Duration::from_secs(90))
        .tcp_keepalive(Some(std::time::Duration::from_secs(60)))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState {
        client,
        api_key,
        gateway_url,
    });

    let app = relay::router(state);

    let addr = format!("{}:{}", host, port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Lavable relay listening on {}", addr);
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn analyze(
    design_url: Option<String>,
    platform: String,
    custom_prompt: Option<String>,
    endpoint: String,
) {
    let client = match reqwest::Client::builder()
        .connect_timeout(std::time::Duration::from_secs(10))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let request = AnalyzeRequest {
        design_url,
        platform: Some(platform),
        custom_prompt,
    };

    let mut stdout = std::io::stdout();
    let result = run_analysis(&client, &endpoint, &request, |fragment| {
        let _ = stdout.write_all(fragment.as_bytes());
        let _ = stdout.flush();
    })
    .await;

    match result {
        Ok(text) => {
            println!();
            tracing::info!("Analysis complete ({} chars)", text.chars().count());
        }
        Err(e) => {
            eprintln!("Analysis failed: {}", e);
            std::process::exit(1);
        }
    }
}
