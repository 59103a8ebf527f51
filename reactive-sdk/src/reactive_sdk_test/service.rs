use std::{collections::VecDeque, sync::Mutex};

use crate::{
    errors::{ContentServiceError, ContentServiceResult},
    ContentService, ContextQuery, ContextSuggestions, GeneratedContent, GenerationRequest,
    Template, TemplateQuery,
};

/// Result for a mocked `generate` call.
/// It can either be a full response or an error to return.
pub enum MockGenerateResult {
    Content(GeneratedContent),
    Error(ContentServiceError),
}

impl MockGenerateResult {
    /// Construct a result that yields the provided content.
    pub fn content(content: GeneratedContent) -> Self {
        Self::Content(content)
    }

    /// Construct a result that yields the provided error.
    pub fn error(error: ContentServiceError) -> Self {
        Self::Error(error)
    }
}

impl From<GeneratedContent> for MockGenerateResult {
    fn from(content: GeneratedContent) -> Self {
        Self::content(content)
    }
}

impl From<ContentServiceResult<GeneratedContent>> for MockGenerateResult {
    fn from(result: ContentServiceResult<GeneratedContent>) -> Self {
        match result {
            Ok(content) => Self::Content(content),
            Err(error) => Self::Error(error),
        }
    }
}

/// Result for a mocked `search_context` call.
pub enum MockSearchResult {
    Suggestions(ContextSuggestions),
    Error(ContentServiceError),
}

impl MockSearchResult {
    /// Construct a result that yields the provided suggestions.
    pub fn suggestions(suggestions: ContextSuggestions) -> Self {
        Self::Suggestions(suggestions)
    }

    /// Construct a result that yields the provided error.
    pub fn error(error: ContentServiceError) -> Self {
        Self::Error(error)
    }
}

impl From<ContextSuggestions> for MockSearchResult {
    fn from(suggestions: ContextSuggestions) -> Self {
        Self::Suggestions(suggestions)
    }
}

impl From<ContentServiceResult<ContextSuggestions>> for MockSearchResult {
    fn from(result: ContentServiceResult<ContextSuggestions>) -> Self {
        match result {
            Ok(suggestions) => Self::Suggestions(suggestions),
            Err(error) => Self::Error(error),
        }
    }
}

/// Result for a mocked `list_templates` call.
pub enum MockTemplatesResult {
    Templates(Vec<Template>),
    Error(ContentServiceError),
}

impl From<Vec<Template>> for MockTemplatesResult {
    fn from(templates: Vec<Template>) -> Self {
        Self::Templates(templates)
    }
}

#[derive(Default)]
struct MockContentServiceState {
    mocked_generate_results: VecDeque<MockGenerateResult>,
    mocked_search_results: VecDeque<MockSearchResult>,
    mocked_templates_results: VecDeque<MockTemplatesResult>,
    tracked_generate_requests: Vec<GenerationRequest>,
    tracked_search_queries: Vec<ContextQuery>,
    tracked_template_queries: Vec<TemplateQuery>,
}

impl MockContentServiceState {
    fn reset(&mut self) {
        self.tracked_generate_requests.clear();
        self.tracked_search_queries.clear();
        self.tracked_template_queries.clear();
    }

    fn restore(&mut self) {
        self.mocked_generate_results.clear();
        self.mocked_search_results.clear();
        self.mocked_templates_results.clear();
        self.reset();
    }
}

/// A mock content service for testing that tracks requests and yields
/// predefined results.
#[derive(Default)]
pub struct MockContentService {
    state: Mutex<MockContentServiceState>,
}

impl MockContentService {
    /// Construct a new mock content service instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue one or more mocked generate results.
    pub fn enqueue_generate_results<I>(&self, results: I) -> &Self
    where
        I: IntoIterator<Item = MockGenerateResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_generate_results.extend(results);
        drop(state);
        self
    }

    /// Convenience to enqueue a single mocked generate result.
    pub fn enqueue_generate<R>(&self, result: R) -> &Self
    where
        R: Into<MockGenerateResult>,
    {
        self.enqueue_generate_results(std::iter::once(result.into()))
    }

    /// Enqueue one or more mocked search results.
    pub fn enqueue_search_results<I>(&self, results: I) -> &Self
    where
        I: IntoIterator<Item = MockSearchResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_search_results.extend(results);
        drop(state);
        self
    }

    /// Convenience to enqueue a single mocked search result.
    pub fn enqueue_search<R>(&self, result: R) -> &Self
    where
        R: Into<MockSearchResult>,
    {
        self.enqueue_search_results(std::iter::once(result.into()))
    }

    /// Convenience to enqueue a single mocked templates result.
    pub fn enqueue_templates<R>(&self, result: R) -> &Self
    where
        R: Into<MockTemplatesResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_templates_results.push_back(result.into());
        drop(state);
        self
    }

    /// Retrieve the tracked generate requests accumulated so far.
    #[must_use]
    pub fn tracked_generate_requests(&self) -> Vec<GenerationRequest> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_generate_requests.clone()
    }

    /// Retrieve the tracked search queries accumulated so far.
    #[must_use]
    pub fn tracked_search_queries(&self) -> Vec<ContextQuery> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_search_queries.clone()
    }

    /// Retrieve the tracked template queries accumulated so far.
    #[must_use]
    pub fn tracked_template_queries(&self) -> Vec<TemplateQuery> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_template_queries.clone()
    }

    /// Reset tracked requests without touching enqueued results.
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.reset();
    }

    /// Clear both tracked requests and enqueued results.
    pub fn restore(&self) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.restore();
    }
}

#[async_trait::async_trait]
impl ContentService for MockContentService {
    async fn generate(&self, request: GenerationRequest) -> ContentServiceResult<GeneratedContent> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_generate_requests.push(request);

        let result = state.mocked_generate_results.pop_front().ok_or_else(|| {
            ContentServiceError::Invariant("no mocked generate results available".into())
        })?;

        match result {
            MockGenerateResult::Content(content) => Ok(content),
            MockGenerateResult::Error(error) => Err(error),
        }
    }

    async fn search_context(&self, query: ContextQuery) -> ContentServiceResult<ContextSuggestions> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_search_queries.push(query);

        let result = state.mocked_search_results.pop_front().ok_or_else(|| {
            ContentServiceError::Invariant("no mocked search results available".into())
        })?;

        match result {
            MockSearchResult::Suggestions(suggestions) => Ok(suggestions),
            MockSearchResult::Error(error) => Err(error),
        }
    }

    async fn list_templates(&self, query: TemplateQuery) -> ContentServiceResult<Vec<Template>> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_template_queries.push(query);

        let result = state.mocked_templates_results.pop_front().ok_or_else(|| {
            ContentServiceError::Invariant("no mocked templates results available".into())
        })?;

        match result {
            MockTemplatesResult::Templates(templates) => Ok(templates),
            MockTemplatesResult::Error(error) => Err(error),
        }
    }
}
