use std::sync::Arc;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::resolver::WikiquoteClient;
use crate::transport::Transport;

/// Counts returned once every query has been answered.
pub struct BatchStats {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
}

/// Outcome of one query, printed as a JSON line.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRow {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One query per line; blank lines and `#` comments are skipped.
pub fn read_queries(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Resolve every query concurrently, handing each row to `on_row` as it arrives.
/// Queries are independent: a failure is reported in its row, never aborts the rest.
pub async fn resolve_many<T, F>(
    client: Arc<WikiquoteClient<T>>,
    queries: Vec<String>,
    concurrency: usize,
    mut on_row: F,
) -> Result<BatchStats>
where
    T: Transport + Send + Sync + 'static,
    F: FnMut(&BatchRow) -> Result<()>,
{
    let concurrency = concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let total = queries.len();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    // Workers send rows, the loop below reports them in arrival order
    let (tx, mut rx) = tokio::sync::mpsc::channel::<BatchRow>(concurrency * 2);

    for query in queries {
        let client = Arc::clone(&client);
        let sem = Arc::clone(&semaphore);
        let tx = tx.clone();

        tokio::spawn(async move {
            let Ok(_permit) = sem.acquire().await else {
                return;
            };
            let mut rng = StdRng::from_entropy();
            let result = client.random_quote(&query, &mut rng).await;
            let row = match result {
                Ok(q) => BatchRow {
                    query,
                    canonical_title: Some(q.canonical_title),
                    quote: Some(q.quote),
                    error: None,
                },
                Err(e) => {
                    warn!("Quote lookup failed for {:?}: {}", query, e);
                    BatchRow {
                        query,
                        canonical_title: None,
                        quote: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            let _ = tx.send(row).await;
        });
    }

    // Drop our copy of tx so rx closes when all spawned tasks finish
    drop(tx);

    let mut ok = 0usize;
    let mut errors = 0usize;
    while let Some(row) = rx.recv().await {
        if row.error.is_some() {
            errors += 1;
        } else {
            ok += 1;
        }
        on_row(&row)?;
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("Resolved {} queries ({} ok, {} errors)", total, ok, errors);

    Ok(BatchStats { total, ok, errors })
}
