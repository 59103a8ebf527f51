use crate::{
    ContentServiceResult, ContextQuery, ContextSuggestions, GeneratedContent, GenerationRequest,
    Template, TemplateQuery,
};

/// The backend surface consumed by the engine. The backend is opaque; this
/// trait is the seam that lets the orchestrator run against the HTTP client
/// in production and a mock in tests.
#[async_trait::async_trait]
pub trait ContentService: Send + Sync {
    /// Issue one content-generation request. A 2xx response yields the
    /// generated content; anything else is an error.
    async fn generate(&self, request: GenerationRequest) -> ContentServiceResult<GeneratedContent>;

    /// Look up contextual suggestions for the current input. Callers treat
    /// any error as "no suggestions available".
    async fn search_context(&self, query: ContextQuery) -> ContentServiceResult<ContextSuggestions>;

    /// List the templates available for a content type and project.
    async fn list_templates(&self, query: TemplateQuery) -> ContentServiceResult<Vec<Template>>;
}
