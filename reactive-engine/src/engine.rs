use crate::{
    progress::{GenerationProgress, ProgressSimulator},
    recent::{RecentItem, RecentStorage, RecentStore},
    search::ContextSearchDebouncer,
    EngineError,
};
use reactive_sdk::{
    ContentService, ContentServiceError, ContentType, ContextSuggestions, GeneratedContent,
    GenerationContext, GenerationRequest,
};
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{sleep, Duration},
};

/// How long after an outcome the engine stays visibly "generating" before it
/// settles back to idle and discards the live progress.
const SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Trimmed inputs of this length or shorter are rejected before any request
/// is issued.
const MIN_INPUT_CHARS: usize = 10;

/// Upper bound on the user input; the form caps entry at the same length.
const MAX_INPUT_CHARS: usize = 2000;

/// The generation orchestrator: owns the request lifecycle from validation
/// through the progress simulation, the single generation call, result
/// merging, recent-item bookkeeping, and every failure path.
///
/// All UI-facing state is published on watch channels: the simulated
/// timeline and the real request outcome are independent streams, merged
/// only at the field level by consumers.
///
/// Cheap to clone; clones share all state.
#[derive(Clone)]
pub struct ReactiveEngine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    service: Arc<dyn ContentService>,
    recent: RecentStore,
    simulator: ProgressSimulator,
    search: ContextSearchDebouncer,
    content_tx: watch::Sender<Option<GeneratedContent>>,
    error_tx: watch::Sender<Option<String>>,
    generating_tx: watch::Sender<bool>,
    /// Bumped by each generation start and by `reset()`; an in-flight
    /// outcome whose epoch is no longer current is discarded.
    epoch: AtomicU64,
    in_flight: AtomicBool,
    settle: Mutex<Option<JoinHandle<()>>>,
}

impl ReactiveEngine {
    pub fn new(service: Arc<dyn ContentService>, storage: Box<dyn RecentStorage>) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                search: ContextSearchDebouncer::new(Arc::clone(&service)),
                service,
                recent: RecentStore::new(storage),
                simulator: ProgressSimulator::new(),
                content_tx: watch::Sender::new(None),
                error_tx: watch::Sender::new(None),
                generating_tx: watch::Sender::new(false),
                epoch: AtomicU64::new(0),
                in_flight: AtomicBool::new(false),
                settle: Mutex::new(None),
            }),
        }
    }

    /// The last successful generation, replaced wholesale by the next one.
    #[must_use]
    pub fn content(&self) -> watch::Receiver<Option<GeneratedContent>> {
        self.inner.content_tx.subscribe()
    }

    /// The user-visible message of the last generation failure.
    #[must_use]
    pub fn error(&self) -> watch::Receiver<Option<String>> {
        self.inner.error_tx.subscribe()
    }

    #[must_use]
    pub fn generating(&self) -> watch::Receiver<bool> {
        self.inner.generating_tx.subscribe()
    }

    /// The simulated five-stage timeline.
    #[must_use]
    pub fn progress(&self) -> watch::Receiver<Option<GenerationProgress>> {
        self.inner.simulator.progress()
    }

    /// Seconds since the in-flight generation started.
    #[must_use]
    pub fn elapsed(&self) -> watch::Receiver<u64> {
        self.inner.simulator.elapsed()
    }

    /// The current context suggestions from the debounced search.
    #[must_use]
    pub fn suggestions(&self) -> watch::Receiver<Option<ContextSuggestions>> {
        self.inner.search.suggestions()
    }

    #[must_use]
    pub fn is_generating(&self) -> bool {
        *self.inner.generating_tx.borrow()
    }

    /// Forward an input change to the context-search debouncer.
    pub fn input_changed(&self, user_input: &str, project: &str, content_type: ContentType) {
        self.inner.search.input_changed(user_input, project, content_type);
    }

    /// Run one generation to its outcome. Validation failures return
    /// immediately without entering the in-flight state; a call while
    /// another generation is in flight is a no-op. Generation failures are
    /// returned and also published on the error channel.
    pub async fn generate(
        &self,
        content_type: ContentType,
        user_input: &str,
        context: GenerationContext,
    ) -> Result<(), EngineError> {
        let trimmed = user_input.trim();
        if trimmed.len() <= MIN_INPUT_CHARS {
            return Err(EngineError::Validation(
                "Please describe what you need to generate".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_INPUT_CHARS {
            return Err(EngineError::Validation(
                "The description is limited to 2000 characters".to_string(),
            ));
        }

        let inner = &self.inner;
        if inner
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("generation already in flight, ignoring");
            return Ok(());
        }

        let epoch = inner.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(settle) = inner.settle.lock().expect("settle task poisoned").take() {
            settle.abort();
        }
        inner.content_tx.send_replace(None);
        inner.error_tx.send_replace(None);
        inner.generating_tx.send_replace(true);
        inner.simulator.start();

        let request = GenerationRequest {
            content_type,
            user_input: user_input.to_string(),
            context: context.clone(),
            output_format: context.output_formats.clone(),
        };

        tracing::info!(
            content_type = content_type.as_str(),
            project = %context.project,
            "starting generation"
        );
        let result = inner.service.generate(request).await;

        if inner.epoch.load(Ordering::SeqCst) != epoch {
            // reset() ran while the request was in flight; the outcome no
            // longer belongs to any live generation.
            tracing::debug!("discarding generation outcome superseded by reset");
            return Ok(());
        }

        let outcome = match result {
            Ok(content) => {
                let item = RecentItem::from_generation(
                    inner.recent.next_id(),
                    content_type,
                    context.project,
                    &content.content.markdown,
                    user_input,
                );
                inner.recent.record(item);
                inner.content_tx.send_replace(Some(content));
                Ok(())
            }
            Err(error) => {
                let message = user_message(&error);
                tracing::warn!(%message, "generation failed");
                inner.error_tx.send_replace(Some(message));
                inner.simulator.finish();
                Err(EngineError::Service(error))
            }
        };

        let inner = Arc::clone(&self.inner);
        let settle = tokio::spawn(async move {
            sleep(SETTLE_DELAY).await;
            if inner.epoch.load(Ordering::SeqCst) == epoch {
                inner.generating_tx.send_replace(false);
                inner.simulator.finish();
                inner.in_flight.store(false, Ordering::SeqCst);
            }
        });
        *self.inner.settle.lock().expect("settle task poisoned") = Some(settle);

        outcome
    }

    /// Forcibly return to idle from any state: discard the generated
    /// content, the live progress, the suggestions, and any in-flight
    /// outcome. Never touches the recent-items store.
    pub fn reset(&self) {
        let inner = &self.inner;
        inner.epoch.fetch_add(1, Ordering::SeqCst);
        if let Some(settle) = inner.settle.lock().expect("settle task poisoned").take() {
            settle.abort();
        }
        inner.in_flight.store(false, Ordering::SeqCst);
        inner.simulator.clear();
        inner.search.clear();
        inner.content_tx.send_replace(None);
        inner.error_tx.send_replace(None);
        inner.generating_tx.send_replace(false);
    }

    /// Snapshot of the recent items, newest first.
    #[must_use]
    pub fn recent_items(&self) -> Vec<RecentItem> {
        self.inner.recent.items()
    }

    /// Remove one recent item. The destructive-action confirmation is the
    /// caller's responsibility.
    pub fn remove_recent(&self, id: i64) -> Vec<RecentItem> {
        self.inner.recent.remove(id)
    }

    /// Remove all recent items. The destructive-action confirmation is the
    /// caller's responsibility.
    pub fn clear_recent(&self) {
        self.inner.recent.clear();
    }
}

/// The text surfaced to the user for a failed generation: the
/// backend-supplied message verbatim when the backend sent one.
fn user_message(error: &ContentServiceError) -> String {
    match error {
        ContentServiceError::Status { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
