//! Leave Balance Engine HTTP server.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use leave_engine::api::{create_router, AppState};
use leave_engine::config::ConfigLoader;
use leave_engine::sources::InMemorySource;

#[derive(Parser)]
#[command(name = "leave-engine", version, about = "Serves employee leave balances over HTTP")]
struct Args {
    /// Configuration directory containing engine.yaml and companies/
    #[arg(long, default_value = "./config/default")]
    config: PathBuf,

    /// JSON file with employees and leave requests to serve
    #[arg(long)]
    data: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:3000")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let config = ConfigLoader::load(&args.config)?;
    tracing::info!(
        rule_set = %config.metadata().code,
        companies = config.config().companies().len(),
        "Configuration loaded from {:?}",
        args.config
    );

    let data = match &args.data {
        Some(path) => {
            let source = InMemorySource::from_json_file(path)?;
            tracing::info!(
                employees = source.employee_count(),
                leave_requests = source.leave_request_count(),
                "Seed data loaded from {:?}",
                path
            );
            source
        }
        None => {
            tracing::warn!("No seed data given; only /leave-balances/calculate will return balances");
            InMemorySource::default()
        }
    };

    let app = create_router(AppState::new(config, data));
    let listener = TcpListener::bind(&args.bind).await?;
    tracing::info!("Leave Balance Engine listening on {}", args.bind);
    axum::serve(listener, app).await?;

    Ok(())
}
