use anyhow::{Context, Result};
use futures::future::join_all;
use std::env;
use std::sync::Arc;
use tracing::{error, info, warn};

use ismp_document_client::config;
use ismp_document_client::metrics::Metrics;
use ismp_document_client::{BatchEntry, SubmissionClient, SubmissionOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ismp_document_client=info".parse()?)
        )
        .init();

    info!("Starting ISMP document client");

    let batch_path = env::args()
        .nth(1)
        .context("usage: ismp-client <batch.json>")?;

    let config = config::load_config()?;
    info!(
        "Configuration loaded: {} requests per {:?}",
        config.limits.request_limit, config.limits.time_unit
    );

    let batch_content = tokio::fs::read_to_string(&batch_path)
        .await
        .with_context(|| format!("Failed to read batch file: {}", batch_path))?;
    let batch: Vec<BatchEntry> = serde_json::from_str(&batch_content)
        .with_context(|| format!("Failed to parse batch file: {}", batch_path))?;
    info!("Submitting {} documents", batch.len());

    let metrics = Arc::new(Metrics::new());
    let client = Arc::new(SubmissionClient::from_config(&config, metrics.clone())?);

    let tasks = batch.into_iter().map(|entry| {
        let client = client.clone();
        tokio::spawn(async move {
            let outcome = client.submit(&entry.document, entry.product_group).await;
            (entry.document.doc_id, outcome)
        })
    });

    for joined in join_all(tasks).await {
        let (doc_id, outcome) = match joined {
            Ok(result) => result,
            Err(e) => {
                error!("Submission task failed: {}", e);
                continue;
            }
        };
        match outcome {
            Ok(SubmissionOutcome::Accepted { status, message, .. }) => {
                info!("{}: {} ({})", doc_id, message, status);
            }
            Ok(SubmissionOutcome::Rejected { reason, status, body }) => {
                warn!("{}: {} ({}): {}", doc_id, reason, status, body);
            }
            Ok(SubmissionOutcome::Throttled { message }) => {
                warn!("{}: {}", doc_id, message);
            }
            Err(e) => {
                error!("{}: {}", doc_id, e);
            }
        }
    }

    if config.metrics.enable {
        metrics
            .write_textfile(&config.metrics.textfile_path)
            .await
            .with_context(|| format!("Failed to write metrics: {}", config.metrics.textfile_path))?;
    }

    Ok(())
}
