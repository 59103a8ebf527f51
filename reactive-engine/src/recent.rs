use chrono::{DateTime, Utc};
use reactive_sdk::ContentType;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::PathBuf,
    sync::{
        atomic::{AtomicI64, Ordering},
        Mutex,
    },
};

/// The store retains at most this many items, newest first.
pub const MAX_RECENT_ITEMS: usize = 10;

const PREVIEW_CHARS: usize = 100;

/// A persisted summary record of one past successful generation. The only
/// state that survives a restart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentItem {
    /// Unique, monotonically increasing millisecond timestamp.
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub project: String,
    pub created_at: DateTime<Utc>,
    pub preview: String,
}

impl RecentItem {
    /// Derive a recent item from a successful generation: title from the
    /// first level-1 markdown heading, falling back to
    /// `Generated <contentType>`; preview from the first 100 characters of
    /// the user input, with an ellipsis when truncated.
    #[must_use]
    pub fn from_generation(
        id: i64,
        content_type: ContentType,
        project: impl Into<String>,
        markdown: &str,
        user_input: &str,
    ) -> Self {
        let title = extract_title(markdown)
            .unwrap_or_else(|| format!("Generated {}", content_type.as_str()));
        Self {
            id,
            title,
            content_type,
            project: project.into(),
            created_at: Utc::now(),
            preview: preview_of(user_input),
        }
    }
}

/// First level-1 heading of the markdown body, if any.
fn extract_title(markdown: &str) -> Option<String> {
    markdown
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(ToString::to_string)
}

fn preview_of(user_input: &str) -> String {
    let mut preview: String = user_input.chars().take(PREVIEW_CHARS).collect();
    if user_input.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

/// Where the serialized recent-item list lives. One opaque payload per
/// store; reads and writes always cover the whole list.
pub trait RecentStorage: Send + Sync {
    /// The stored payload, or `None` when nothing has been written yet.
    fn read(&self) -> Option<String>;
    fn write(&self, payload: &str) -> io::Result<()>;
    /// Remove the stored payload entirely.
    fn clear(&self) -> io::Result<()>;
}

/// Durable storage in a single JSON file under the user data directory.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<data dir>/reactive-engine/recent-items.json`, when the platform has
    /// a data directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("reactive-engine").join("recent-items.json"))
    }
}

impl RecentStorage for FileStorage {
    fn read(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    fn write(&self, payload: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, payload)
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(error) if error.kind() != io::ErrorKind::NotFound => Err(error),
            _ => Ok(()),
        }
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    payload: Mutex<Option<String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a pre-seeded payload, e.g. to exercise corrupted state.
    #[must_use]
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Mutex::new(Some(payload.into())),
        }
    }
}

impl RecentStorage for MemoryStorage {
    fn read(&self) -> Option<String> {
        self.payload.lock().expect("storage poisoned").clone()
    }

    fn write(&self, payload: &str) -> io::Result<()> {
        *self.payload.lock().expect("storage poisoned") = Some(payload.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.payload.lock().expect("storage poisoned") = None;
        Ok(())
    }
}

/// Bounded, persisted list of past generations. Loaded once at startup;
/// every mutating operation writes the entire list back (no delta
/// persistence). A corrupted payload loads as an empty list and never
/// reaches the caller as an error.
pub struct RecentStore {
    storage: Box<dyn RecentStorage>,
    items: Mutex<Vec<RecentItem>>,
    last_id: AtomicI64,
}

impl RecentStore {
    pub fn new(storage: Box<dyn RecentStorage>) -> Self {
        let items = load_from(storage.as_ref());
        let last_id = items.iter().map(|item| item.id).max().unwrap_or(0);
        Self {
            storage,
            items: Mutex::new(items),
            last_id: AtomicI64::new(last_id),
        }
    }

    /// Snapshot of the current list, newest first.
    #[must_use]
    pub fn items(&self) -> Vec<RecentItem> {
        self.items.lock().expect("recent items poisoned").clone()
    }

    /// Prepend `item`, truncate to the newest ten, persist the full list.
    /// The only write path in normal operation.
    pub fn record(&self, item: RecentItem) -> Vec<RecentItem> {
        let mut items = self.items.lock().expect("recent items poisoned");
        items.insert(0, item);
        items.truncate(MAX_RECENT_ITEMS);
        self.persist(&items);
        items.clone()
    }

    /// Drop the matching item and persist synchronously.
    pub fn remove(&self, id: i64) -> Vec<RecentItem> {
        let mut items = self.items.lock().expect("recent items poisoned");
        items.retain(|item| item.id != id);
        self.persist(&items);
        items.clone()
    }

    /// Empty the persisted list.
    pub fn clear(&self) {
        let mut items = self.items.lock().expect("recent items poisoned");
        items.clear();
        if let Err(error) = self.storage.clear() {
            tracing::warn!(%error, "failed to clear recent items storage");
        }
    }

    /// Next unique item id: the current millisecond timestamp, bumped past
    /// the previous id when the clock has not advanced.
    pub fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut last = self.last_id.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last + 1);
            match self.last_id.compare_exchange_weak(
                last,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }

    fn persist(&self, items: &[RecentItem]) {
        match serde_json::to_string(items) {
            Ok(payload) => {
                if let Err(error) = self.storage.write(&payload) {
                    tracing::warn!(%error, "failed to persist recent items");
                }
            }
            Err(error) => tracing::warn!(%error, "failed to serialize recent items"),
        }
    }
}

fn load_from(storage: &dyn RecentStorage) -> Vec<RecentItem> {
    let Some(payload) = storage.read() else {
        return Vec::new();
    };
    match serde_json::from_str(&payload) {
        Ok(items) => items,
        Err(error) => {
            tracing::warn!(%error, "discarding unparseable recent items payload");
            Vec::new()
        }
    }
}
