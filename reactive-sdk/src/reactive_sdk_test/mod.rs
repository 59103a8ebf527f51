mod service;

pub use service::{MockContentService, MockGenerateResult, MockSearchResult, MockTemplatesResult};
