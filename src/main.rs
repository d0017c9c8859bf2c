use anyhow::Result;
use bilingua::{
    analysis::HttpAnalysisProvider, config::Config, pipeline::Pipeline,
    translator::HttpTranslateProvider,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        eprintln!("usage: bilingua <url> [<url>...]");
        std::process::exit(2);
    }

    let config = Config::from_env()?;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(config.database_url())
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let translate = Arc::new(HttpTranslateProvider::new(
        config.translate_api_url(),
        config.translate_api_key(),
    )?);
    let analysis = Arc::new(HttpAnalysisProvider::new(
        config.ai_api_url(),
        config.ai_api_key(),
    )?);

    let pipeline = Pipeline::new(pool, translate, analysis);
    let summary = pipeline.ingest_all(&urls).await?;
    info!(
        "done: {} article(s) stored, {} skipped",
        summary.stored, summary.skipped
    );

    Ok(())
}
