use dotenv::dotenv;
use krill_web::config::ServerConfig;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env();
    let listener = TcpListener::bind(&config.addr).await?;
    tracing::info!(
        addr = %config.addr,
        api = %config.api.api_url,
        next_api = %config.api.next_api_url,
        "krill space listening"
    );
    axum::serve(listener, krill_web::app(&config.api)).await?;
    Ok(())
}
