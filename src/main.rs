use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hyperleda::{
    config::Config,
    fetch::HttpFetcher,
    record::{GalaxyRecord, ResolvedPath},
    table::PropertiesTable,
};

/// One line of output per galaxy.
#[derive(Serialize)]
struct Summary<'a> {
    name: &'a str,
    resolved_path: &'a ResolvedPath,
    table_count: usize,
    fetched_at: DateTime<Utc>,
    properties: Option<&'a PropertiesTable>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the JSON summaries.
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    match log_format.to_lowercase().as_str() {
        "gcp" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_stackdriver::layer().with_writer(std::io::stderr))
                .init();
        }
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_span_list(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let names: Vec<String> = std::env::args().skip(1).collect();
    if names.is_empty() {
        anyhow::bail!("usage: hyperleda <galaxy>...");
    }

    let config = Config::load()?;
    let options = config.record_options();
    info!(
        source = %config.source_url_template,
        cache_dir = ?config.cache.dir,
        "hyperleda starting"
    );

    let fetcher = HttpFetcher::with_user_agent(&config.user_agent)?;

    for name in &names {
        let record = GalaxyRecord::fetch_with(name, &options, &fetcher).await?;

        let summary = Summary {
            name: record.name(),
            resolved_path: record.resolved_path(),
            table_count: record.tables().len(),
            fetched_at: record.fetched_at(),
            properties: record.properties(),
        };
        println!("{}", serde_json::to_string(&summary)?);
    }

    Ok(())
}
