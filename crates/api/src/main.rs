use anyhow::Context;

use sitegate_api::config::{ApiConfig, SECRET_VAR};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sitegate_observability::init();

    let config = ApiConfig::from_env().context("invalid sitegate configuration")?;

    if !config.webhook.verifies_signatures() {
        tracing::warn!(
            "{SECRET_VAR} not set; webhook signatures will NOT be verified and any caller can grant roles"
        );
    }
    tracing::info!(
        role = %config.webhook.gating_role(),
        trusted_domain = %config.webhook.trusted_domain(),
        "identity webhook configured"
    );

    let app = sitegate_api::app::build_app(config.webhook);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
