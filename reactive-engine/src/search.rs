use reactive_sdk::{ContentService, ContentType, ContextQuery, ContextSuggestions};
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{sleep, Duration},
};

/// Quiescence period after which a pending search is actually issued.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Inputs of this trimmed length or shorter clear the suggestions instead of
/// searching.
const MIN_QUERY_CHARS: usize = 10;

struct PendingSearch {
    handle: JoinHandle<()>,
    fired: Arc<AtomicBool>,
}

/// Converts raw input-change events into at most one trailing context-search
/// per quiescence window. Each issued lookup captures a monotonic token; a
/// response is applied only while its token is still the latest, so a result
/// that arrives after newer input never overwrites the current suggestions.
pub struct ContextSearchDebouncer {
    service: Arc<dyn ContentService>,
    suggestions_tx: Arc<watch::Sender<Option<ContextSuggestions>>>,
    issue_seq: Arc<AtomicU64>,
    pending: Mutex<Option<PendingSearch>>,
}

impl ContextSearchDebouncer {
    pub fn new(service: Arc<dyn ContentService>) -> Self {
        Self {
            service,
            suggestions_tx: Arc::new(watch::Sender::new(None)),
            issue_seq: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
        }
    }

    /// The current suggestions, replaced wholesale by each applied response.
    #[must_use]
    pub fn suggestions(&self) -> watch::Receiver<Option<ContextSuggestions>> {
        self.suggestions_tx.subscribe()
    }

    /// Call on every change to the `(user_input, project, content_type)`
    /// tuple. Cancels the previously scheduled search; a lookup whose timer
    /// already fired is left to complete, and its stale result dropped.
    pub fn input_changed(&self, user_input: &str, project: &str, content_type: ContentType) {
        let seq = self.issue_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.cancel_scheduled();

        if user_input.trim().len() <= MIN_QUERY_CHARS {
            self.suggestions_tx.send_replace(None);
            return;
        }

        let query = ContextQuery::new(user_input, project, content_type);
        let service = Arc::clone(&self.service);
        let suggestions_tx = Arc::clone(&self.suggestions_tx);
        let issue_seq = Arc::clone(&self.issue_seq);
        let fired = Arc::new(AtomicBool::new(false));
        let task_fired = Arc::clone(&fired);

        let handle = tokio::spawn(async move {
            sleep(DEBOUNCE_WINDOW).await;
            task_fired.store(true, Ordering::SeqCst);
            if issue_seq.load(Ordering::SeqCst) != seq {
                return;
            }
            match service.search_context(query).await {
                Ok(suggestions) => {
                    if issue_seq.load(Ordering::SeqCst) == seq {
                        suggestions_tx.send_replace(Some(suggestions));
                    } else {
                        tracing::debug!("dropping stale context-search response");
                    }
                }
                // Not critical: leave the current suggestions as they are.
                Err(error) => {
                    tracing::debug!(%error, "context search unavailable, continuing without suggestions");
                }
            }
        });

        *self.pending.lock().expect("pending search poisoned") =
            Some(PendingSearch { handle, fired });
    }

    /// Drop any scheduled search, invalidate in-flight lookups, clear the
    /// published suggestions.
    pub fn clear(&self) {
        self.issue_seq.fetch_add(1, Ordering::SeqCst);
        self.cancel_scheduled();
        self.suggestions_tx.send_replace(None);
    }

    fn cancel_scheduled(&self) {
        if let Some(pending) = self.pending.lock().expect("pending search poisoned").take() {
            if !pending.fired.load(Ordering::SeqCst) {
                pending.handle.abort();
            }
        }
    }
}
