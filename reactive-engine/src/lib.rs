mod engine;
mod errors;
mod progress;
mod recent;
mod search;

pub use engine::ReactiveEngine;
pub use errors::EngineError;
pub use progress::{GenerationProgress, ProgressSimulator, Stage};
pub use recent::{
    FileStorage, MemoryStorage, RecentItem, RecentStorage, RecentStore, MAX_RECENT_ITEMS,
};
pub use search::{ContextSearchDebouncer, DEBOUNCE_WINDOW};
