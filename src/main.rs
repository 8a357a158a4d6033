use std::sync::Arc;

use marquee::{
    api::{create_router, AppState},
    config::Config,
    services::{
        playback::{SourceChain, SourceStrategy, VidsrcStrategy},
        providers::{MetadataProvider, TmdbProvider},
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    let provider: Arc<dyn MetadataProvider> = Arc::new(TmdbProvider::new(
        config.tmdb_api_token.clone(),
        config.tmdb_api_url.clone(),
    ));
    let strategies: Vec<Box<dyn SourceStrategy>> =
        vec![Box::new(VidsrcStrategy::new(config.embed_base_url.clone()))];
    let sources = Arc::new(SourceChain::new(strategies));

    let state = AppState::new(provider, sources);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
