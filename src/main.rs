use anyhow::Result;
use clap::Parser;
use inbox_triage_bot::{
    cache::{CacheStore, MemoryCache, RedisCache},
    config::env::load_config,
    llm::http::HttpGenerator,
    mail::{cache::InboxCache, http::HttpMailSource},
    triage::{reporter, ClassificationCache, Classifier, Orchestrator},
};
use log::info;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(
    name = "inbox-triage-bot",
    about = "Classify the inbox with a local LLM and summarize the results"
)]
struct Args {
    /// Maximum number of records to fetch from the mail source.
    #[arg(long)]
    limit: Option<usize>,

    /// Use the in-process cache instead of Redis (nothing persists across runs).
    #[arg(long)]
    memory_cache: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let config = load_config();
    let limit = args.limit.unwrap_or(config.fetch_limit);

    let cache: Arc<dyn CacheStore> = if args.memory_cache {
        info!("Using in-memory cache store");
        Arc::new(MemoryCache::new())
    } else {
        Arc::new(RedisCache::new(&config.redis_url).await?)
    };

    let inbox = InboxCache::new(
        HttpMailSource::new(&config.mail_api_url),
        Arc::clone(&cache),
        config.inbox_cache_ttl_secs,
    );
    let pipeline = Orchestrator::new(ClassificationCache::new(
        Classifier::new(HttpGenerator::new(&config.llm_api_url)),
        cache,
        config.classification_cache_ttl_secs,
    ));

    let batch = inbox.fetch_batch(limit).await?;
    info!("Processing {} records", batch.len());

    let insights = pipeline.run(&batch).await;
    let summary = reporter::summarize(&insights);
    reporter::render(&summary);

    Ok(())
}
