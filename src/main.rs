mod db;
mod docs;
mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let (llm, config) = llm::LlmClient::from_env().expect("invalid LLM configuration");
    tracing::info!(model = llm.model(), host = %config.base_url, "LLM client initialized");

    let mut state = state::AppState::new(Arc::new(llm), &config.system_prompt);

    match std::env::var("DATABASE_URL") {
        Ok(url) => match db::init_pool(&url).await {
            Ok(pool) => {
                tracing::info!("database connected");
                state = state.with_database(Arc::new(db::MySqlDatabase::new(pool)));
            }
            Err(e) => tracing::warn!(error = %e, "database unavailable; database questions will report it"),
        },
        Err(_) => tracing::warn!("DATABASE_URL not set; database questions will report it"),
    }

    let docs_path = docs::DocumentIndex::path_from_env();
    match docs::DocumentIndex::load(&docs_path).await {
        Ok(index) => {
            tracing::info!(path = %docs_path, chunks = index.len(), "document index loaded");
            state = state.with_documents(Arc::new(index));
        }
        Err(e) => tracing::warn!(path = %docs_path, error = %e, "document index unavailable"),
    }

    let app = routes::app(state).expect("router init failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "pnai listening");
    axum::serve(listener, app).await.expect("server failed");
}
