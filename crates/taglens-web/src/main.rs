use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use taglens_inference::{GradioSpaceClient, InferenceService, ServiceConfig};
use taglens_web::app::run_server;
use taglens_web::cli::Cli;
use taglens_web::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let client = Arc::new(GradioSpaceClient::new(&cli.space_url, &cli.api_name)?);
    let service = InferenceService::new(
        client,
        ServiceConfig {
            worker_slots: cli.worker_slots,
            wait_budget: Duration::from_secs(cli.wait_budget_secs),
        },
    );

    let addr: SocketAddr = format!("{}:{}", cli.address, cli.port).parse()?;

    println!();
    println!("  taglens: research-abstract subject classification demo");
    println!();
    println!("  Model space:  {}", cli.space_url);
    println!("  Worker slots: {}", cli.worker_slots);
    println!("  Wait budget:  {}s", cli.wait_budget_secs);
    println!();
    println!("  Open http://{} in your browser", addr);
    println!();

    run_server(AppState::new(service), addr).await
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "taglens_web=debug,taglens_inference=debug,tower_http=debug"
    } else {
        "taglens_web=info,taglens_inference=info,tower_http=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
