use anyhow::Context;

use salesight_ai::{InsightClient, InsightConfig};
use salesight_infra::ai::AcceptPolicy;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    salesight_observability::init();

    let config = InsightConfig::from_env().context("invalid AI configuration")?;
    if !config.has_credential() {
        tracing::warn!("SALESIGHT_AI_API_KEY not set; insights will use fallback content");
    }
    tracing::info!(config = ?config, "insight client configured");

    let client = InsightClient::from_config(config).context("failed to build insight client")?;
    let app = salesight_api::app::build_app(client, AcceptPolicy::LatestIssued);

    let bind = std::env::var("SALESIGHT_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
