use anyhow::Context;

use ferremas_api::config::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the process environment still applies.
    dotenvy::dotenv().ok();
    ferremas_observability::init();

    let settings = Settings::from_env().context("invalid configuration")?;
    let app = ferremas_api::app::build_app(&settings).await?;

    let addr = settings.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(addr = %listener.local_addr()?, algorithm = %settings.algorithm, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
