//! Midas Pipeline
//!
//! The price refresh orchestrator: cursor-streamed batches, bounded
//! concurrent oracle fan-out, publish-before-persist ordering, and
//! per-token / per-batch failure isolation.

mod config;
mod pipeline;
mod retry;

pub use config::RefreshConfig;
pub use pipeline::{PipelineError, PipelineState, PriceRefreshPipeline, RunSummary};
pub use retry::RetryPolicy;
