use chrono::Utc;
use midas_core::{Token, TokenEvent, TokenId, TokenPrice};
use midas_ports::{
    EventPublisher, OracleError, PriceLookup, PriceOracle, PublishError, StoreError, TokenStore,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock, Semaphore};
use tokio::task::JoinSet;

use crate::config::RefreshConfig;

/// Observable lifecycle of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Running,
    Completed,
    Failed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// A refresh run is already in progress; overlapping runs are rejected
    /// rather than interleaved.
    #[error("a price refresh run is already in progress")]
    AlreadyRunning,

    /// The streaming reader itself failed. Fatal to the run: per-token and
    /// per-batch failures are absorbed, but losing the cursor means the
    /// rest of the collection cannot be reached.
    #[error("cursor read failed: {0}")]
    CursorRead(StoreError),
}

/// Outcome of one refresh run. Degraded runs (nonzero `error_count`) are
/// still successful runs; only a cursor read failure surfaces as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Tokens pulled from the store, whether or not their price moved
    pub total_processed: usize,
    /// Tokens whose new price was published and persisted
    pub updated_count: usize,
    /// Per-token oracle failures plus tokens dropped with a failed batch
    pub error_count: usize,
    pub duration_ms: u64,
}

impl RunSummary {
    /// Fraction of processed tokens that did not end in an error, as a
    /// percentage. 100.0 for an empty run.
    pub fn success_rate(&self) -> f64 {
        if self.total_processed == 0 {
            return 100.0;
        }
        let ok = self.total_processed - self.error_count;
        ok as f64 / self.total_processed as f64 * 100.0
    }
}

/// Per-run counters, folded into the final [`RunSummary`]
#[derive(Default)]
struct RunTotals {
    processed: usize,
    updated: usize,
    errors: usize,
}

/// Orchestrates one pass over the token collection.
///
/// Per batch: fan out oracle lookups under a bounded worker limit, apply
/// the fetched prices, publish the resulting events, and only then persist
/// the changed tokens. Batches are processed sequentially so in-flight
/// memory and event ordering stay bounded; a failed batch is logged,
/// counted, and skipped, never fatal to the run.
pub struct PriceRefreshPipeline<S, O, P> {
    store: Arc<S>,
    oracle: Arc<O>,
    publisher: Arc<P>,
    config: RefreshConfig,
    state: RwLock<PipelineState>,
    /// Single-flight guard: held for the whole of `run`
    run_gate: Mutex<()>,
}

impl<S, O, P> PriceRefreshPipeline<S, O, P>
where
    S: TokenStore + 'static,
    O: PriceOracle + 'static,
    P: EventPublisher + 'static,
{
    pub fn new(store: Arc<S>, oracle: Arc<O>, publisher: Arc<P>, config: RefreshConfig) -> Self {
        Self {
            store,
            oracle,
            publisher,
            config,
            state: RwLock::new(PipelineState::Idle),
            run_gate: Mutex::new(()),
        }
    }

    pub async fn state(&self) -> PipelineState {
        *self.state.read().await
    }

    async fn set_state(&self, state: PipelineState) {
        *self.state.write().await = state;
    }

    /// Refresh every token's price once.
    ///
    /// The periodic trigger and on-demand callers both come through here.
    /// Returns `AlreadyRunning` if invoked while a previous run is still in
    /// flight.
    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        let _gate = self
            .run_gate
            .try_lock()
            .map_err(|_| PipelineError::AlreadyRunning)?;

        self.set_state(PipelineState::Running).await;
        let started = Instant::now();
        let mut totals = RunTotals::default();
        let mut cursor: Option<TokenId> = None;

        log::info!(
            "price refresh started (batch size {}, concurrency {})",
            self.config.batch_size,
            self.config.concurrency
        );

        loop {
            let batch = match self.store.batch_after(cursor, self.config.batch_size).await {
                Ok(batch) => batch,
                Err(err) => {
                    log::error!("aborting run, cursor read failed: {}", err);
                    self.set_state(PipelineState::Failed).await;
                    return Err(PipelineError::CursorRead(err));
                }
            };

            if batch.is_empty() {
                break;
            }

            let last_full = batch.len() == self.config.batch_size;
            cursor = batch.last().map(|token| token.id);

            self.process_batch(batch, &mut totals).await;

            if !last_full {
                break;
            }
        }

        let summary = RunSummary {
            total_processed: totals.processed,
            updated_count: totals.updated,
            error_count: totals.errors,
            duration_ms: started.elapsed().as_millis() as u64,
        };

        self.set_state(PipelineState::Completed).await;
        log::info!(
            "price refresh complete: {} processed, {} updated, {} errors in {}ms ({:.1}% success)",
            summary.total_processed,
            summary.updated_count,
            summary.error_count,
            summary.duration_ms,
            summary.success_rate()
        );

        Ok(summary)
    }

    /// Fetch, apply, publish, persist - in that order - for one batch.
    async fn process_batch(&self, batch: Vec<Token>, totals: &mut RunTotals) {
        totals.processed += batch.len();

        let now = Utc::now();
        let mut changed: Vec<Token> = Vec::new();
        let mut events: Vec<TokenEvent> = Vec::new();

        for (token, fetched) in self.fetch_prices(batch).await {
            match fetched {
                Ok(price) => {
                    let (updated, event) = token.with_price(price, now);
                    if let Some(event) = event {
                        changed.push(updated);
                        events.push(event);
                    }
                }
                Err(err) => {
                    totals.errors += 1;
                    log::warn!("price fetch failed for token {}: {}", token.id, err);
                }
            }
        }

        if changed.is_empty() {
            log::debug!("batch produced no price changes");
            return;
        }

        // Events first: a price must never become durable without its event
        // having reached the bus.
        let published = self
            .config
            .retry
            .run("event publish", PublishError::is_transient, || {
                self.publisher.publish_batch(&events)
            })
            .await;

        if let Err(err) = published {
            totals.errors += changed.len();
            log::error!(
                "batch dropped: publish failed for {} events: {}",
                events.len(),
                err
            );
            return;
        }

        let saved = self
            .config
            .retry
            .run("batch persist", StoreError::is_transient, || {
                self.store.save_batch(&changed)
            })
            .await;

        match saved {
            Ok(()) => {
                totals.updated += changed.len();
                log::debug!("batch persisted: {} tokens updated", changed.len());
            }
            Err(err) => {
                totals.errors += changed.len();
                log::error!(
                    "batch dropped: persist failed for {} tokens: {}",
                    changed.len(),
                    err
                );
            }
        }
    }

    /// Look up prices for a whole batch with bounded concurrency. Each
    /// lookup is isolated: a failure or panic in one never cancels its
    /// siblings.
    async fn fetch_prices(&self, batch: Vec<Token>) -> Vec<(Token, Result<TokenPrice, OracleError>)> {
        let workers = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut lookups: JoinSet<(Token, Result<TokenPrice, OracleError>)> = JoinSet::new();

        for token in batch {
            let oracle = Arc::clone(&self.oracle);
            let workers = Arc::clone(&workers);
            lookups.spawn(async move {
                let _permit = workers.acquire_owned().await.ok();
                let lookup = PriceLookup::from(&token);
                let result = oracle.price_of(&lookup).await;
                (token, result)
            });
        }

        let mut results = Vec::with_capacity(lookups.len());
        while let Some(joined) = lookups.join_next().await {
            match joined {
                Ok(pair) => results.push(pair),
                Err(err) => log::error!("price lookup task failed: {}", err),
            }
        }
        results
    }
}
