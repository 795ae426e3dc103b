//! Core Processor implementation

use crate::config::ProcessorConfig;
use crate::correlator::correlate;
use crate::error::ExtractorError;
use crate::lines::{extract_delivered_clis, extract_pairs, normalize_lines};
use crate::types::{FailureKind, PairFailure, ProcessMetadata, ProcessOutcome, ProcessRequest};
use clitrace_domain::{CliPair, ExtractionMode, LogSearch, RequestId};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::timeout_at;
use tracing::{debug, error, info, warn};

/// The Processor turns call-detail text into result lines
///
/// `only_cli` requests never touch the backend. `with_samples` requests
/// query and correlate every pair; a pair that fails is recorded in the
/// outcome and skipped, never aborting its siblings.
pub struct Processor<S>
where
    S: LogSearch,
{
    search: Arc<S>,
    config: ProcessorConfig,
}

impl<S> Processor<S>
where
    S: LogSearch + 'static,
{
    /// Create a new Processor
    pub fn new(search: S, config: ProcessorConfig) -> Self {
        Self::with_shared_search(Arc::new(search), config)
    }

    /// Create a Processor around a search backend shared with other owners
    pub fn with_shared_search(search: Arc<S>, config: ProcessorConfig) -> Self {
        Self { search, config }
    }

    /// The search backend
    pub fn search(&self) -> &S {
        &self.search
    }

    /// The active configuration
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Process one request
    pub async fn process(&self, request: ProcessRequest) -> Result<ProcessOutcome, ExtractorError> {
        let start_time = Instant::now();

        self.config.validate().map_err(ExtractorError::Config)?;
        if request.text.trim().is_empty() {
            return Err(ExtractorError::EmptyText);
        }
        let mode = ExtractionMode::parse(&request.mode)
            .ok_or_else(|| ExtractorError::UnknownMode(request.mode.clone()))?;
        if request.text.len() > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(
                request.text.len(),
                self.config.max_text_length,
            ));
        }

        let request_id = RequestId::new();
        let lines = normalize_lines(&request.text);

        info!(
            "[{}] Processing {} request: {} lines",
            request_id,
            mode,
            lines.len()
        );

        let (results, failures, pairs_found, partial) = match mode {
            ExtractionMode::OnlyCli => {
                let pairs_found = extract_pairs(&lines).len();
                let clis = extract_delivered_clis(&lines);
                (clis, Vec::new(), pairs_found, false)
            }
            ExtractionMode::WithSamples => {
                let pairs = extract_pairs(&lines);
                let pairs_found = pairs.len();
                let run = self.correlate_pairs(request_id, pairs).await;
                (run.results, run.failures, pairs_found, run.partial)
            }
        };

        let processing_time_ms = start_time.elapsed().as_millis() as u64;

        info!(
            "[{}] Processing complete: {} pairs, {} results, {} skipped{}",
            request_id,
            pairs_found,
            results.len(),
            failures.len(),
            if partial { " (deadline reached)" } else { "" }
        );

        Ok(ProcessOutcome {
            results,
            failures,
            metadata: ProcessMetadata {
                request_id,
                mode,
                pairs_found,
                partial,
                processing_time_ms,
            },
        })
    }

    /// Query and correlate every pair, collecting outcomes in pair order
    async fn correlate_pairs(&self, request_id: RequestId, pairs: Vec<CliPair>) -> PairRun {
        let mut run = PairRun::default();
        if pairs.is_empty() {
            return run;
        }

        if !self.search.is_configured() {
            error!(
                "[{}] Search backend is not configured; {} pairs cannot be correlated",
                request_id,
                pairs.len()
            );
        }

        let deadline = self
            .config
            .request_deadline()
            .map(|budget| tokio::time::Instant::now() + budget);
        let permits = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));

        let mut tasks = PairTasks(
            pairs
                .iter()
                .cloned()
                .map(|pair| {
                    let search = Arc::clone(&self.search);
                    let permits = Arc::clone(&permits);
                    tokio::spawn(async move {
                        let _permit = permits
                            .acquire_owned()
                            .await
                            .map_err(|e| FailureKind::Unexpected(format!("Semaphore closed: {}", e)))?;
                        resolve_pair(search.as_ref(), &pair).await
                    })
                })
                .collect(),
        );

        for (index, pair) in pairs.into_iter().enumerate() {
            let handle = &mut tasks.0[index];
            let joined = match deadline {
                Some(deadline) => timeout_at(deadline, &mut *handle).await.ok(),
                None => Some(handle.await),
            };

            let kind = match joined {
                Some(Ok(Ok(line))) => {
                    debug!("[{}] Pair {} resolved", request_id, index);
                    run.results.push(line);
                    continue;
                }
                Some(Ok(Err(kind))) => kind,
                Some(Err(join_error)) => FailureKind::Unexpected(format!("Pair task failed: {}", join_error)),
                None => {
                    tasks.0[index].abort();
                    run.partial = true;
                    FailureKind::DeadlineExceeded
                }
            };

            let failure = PairFailure { index, pair, kind };
            match &failure.kind {
                FailureKind::BackendUnavailable(_) | FailureKind::Unexpected(_) => {
                    error!("[{}] Skipping {}", request_id, failure);
                }
                _ => warn!("[{}] Skipping {}", request_id, failure),
            }
            run.failures.push(failure);
        }

        run
    }
}

/// Collected per-pair outcomes
#[derive(Default)]
struct PairRun {
    results: Vec<String>,
    failures: Vec<PairFailure>,
    partial: bool,
}

/// Spawned pair tasks, in pair order
///
/// Aborts every task still running when dropped, so a cancelled request
/// stops issuing backend searches.
struct PairTasks(Vec<JoinHandle<Result<String, FailureKind>>>);

impl Drop for PairTasks {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}

/// Query the backend for one pair and correlate the hits
async fn resolve_pair<S: LogSearch>(search: &S, pair: &CliPair) -> Result<String, FailureKind> {
    let hits = search.search(&pair.sent).await?;
    let line = correlate(&hits, &pair.sent, &pair.received)?;
    Ok(line)
}
