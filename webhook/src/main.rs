use planforge_webhook::{handlers::AppState, routes::create_routes, Config, Secrets};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load()?;
    let secrets = Secrets::from_env();
    let bind_address = config.bind_address.clone();

    if secrets.hmac_shared_secret.is_none() {
        tracing::warn!("PLANFORGE_WEBHOOK_SECRET not set; signature verification is disabled outside production");
    }

    let state = AppState::new(config, secrets);
    let app = create_routes(state);

    let listener = TcpListener::bind(&bind_address).await?;
    info!("planforge-webhook listening on http://{bind_address}");
    info!("health check available at http://{bind_address}/health");

    axum::serve(listener, app).await?;
    Ok(())
}
