use anyhow::Context;

use erpadmin_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    erpadmin_observability::init();

    let config = ApiConfig::from_env();
    tracing::info!(
        denial_messages = ?config.denial_messages,
        role_header = %config.role_header,
        session_header = %config.session_header,
        "configuration loaded"
    );

    let app = erpadmin_api::app::build_app(&config);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
