use super::errors::ExtractionError;
use super::orchestrator::ExtractionOrchestrator;
use super::recipe::CompositeRecord;
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

pub type BatchItem = Result<CompositeRecord, ExtractionError>;

/// Runs the orchestrator over many documents at once.
///
/// One task per document; at most `concurrency` of them hold a permit at a
/// time. A failing document only fills its own slot with an error.
pub struct BatchRunner {
    orchestrator: Arc<ExtractionOrchestrator>,
    concurrency: usize,
}

impl BatchRunner {
    pub fn new(orchestrator: Arc<ExtractionOrchestrator>) -> Self {
        let concurrency = orchestrator.config().concurrency.max(1);
        Self {
            orchestrator,
            concurrency,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Results come back in input order, one per document.
    pub async fn run(&self, documents: &[PathBuf]) -> Vec<BatchItem> {
        if documents.is_empty() {
            return Vec::new();
        }

        let run_id = Uuid::new_v4();
        let span = info_span!("extraction_batch", %run_id, documents = documents.len());
        self.run_all(documents).instrument(span).await
    }

    async fn run_all(&self, documents: &[PathBuf]) -> Vec<BatchItem> {
        info!(concurrency = self.concurrency, "Starting extraction batch");
        let semaphore = Arc::new(Semaphore::new(self.concurrency));

        let handles: Vec<_> = documents
            .iter()
            .cloned()
            .map(|document| {
                let orchestrator = self.orchestrator.clone();
                let sem = semaphore.clone();
                let slot = document.clone();
                let handle = tokio::spawn(
                    async move {
                        let _permit = sem.acquire_owned().await.map_err(|err| {
                            ExtractionError::TaskFailed {
                                document: document.clone(),
                                reason: err.to_string(),
                            }
                        })?;
                        orchestrator.extract(&document).await
                    }
                    .in_current_span(),
                );
                (slot, handle)
            })
            .collect();

        let results = join_all(handles.into_iter().map(|(document, handle)| async move {
            match handle.await {
                Ok(result) => result,
                Err(err) => Err(ExtractionError::TaskFailed {
                    document,
                    reason: err.to_string(),
                }),
            }
        }))
        .await;

        let failed = results.iter().filter(|result| result.is_err()).count();
        if failed > 0 {
            warn!(
                failed,
                succeeded = results.len() - failed,
                "Extraction batch finished with failures"
            );
        } else {
            info!(succeeded = results.len(), "Extraction batch finished");
        }
        results
    }
}
