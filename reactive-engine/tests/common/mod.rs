#![allow(dead_code)]

use reactive_sdk::{
    reactive_sdk_test::MockContentService, ContentFormats, ContentService, ContentServiceResult,
    ContextQuery, ContextSuggestions, GeneratedContent, GenerationContext, GenerationMetadata,
    GenerationRequest, Priority, Template, TemplateQuery,
};
use std::sync::Arc;
use tokio::time::{sleep, Duration};

/// A minimal successful generation response around the given markdown body.
pub fn generated(markdown: &str) -> GeneratedContent {
    GeneratedContent {
        content: ContentFormats {
            markdown: markdown.to_string(),
            ..ContentFormats::default()
        },
        context: GenerationMetadata::default(),
        processing_time: 15_000,
        generated_at: "2026-08-06T12:00:00Z".to_string(),
    }
}

pub fn story_context() -> GenerationContext {
    GenerationContext {
        project: "3PI".to_string(),
        priority: Priority::High,
        output_formats: vec!["markdown".to_string(), "jira".to_string()],
        ..GenerationContext::default()
    }
}

pub fn suggestions_for(query: &str, total_results: i64) -> ContextSuggestions {
    ContextSuggestions {
        query: query.to_string(),
        total_results,
        ..ContextSuggestions::default()
    }
}

/// Delegates to a mock after a fixed delay, so tests can interleave other
/// events with an in-flight call under the paused clock.
pub struct DelayedService {
    pub inner: Arc<MockContentService>,
    pub delay: Duration,
}

impl DelayedService {
    pub fn new(inner: Arc<MockContentService>, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait::async_trait]
impl ContentService for DelayedService {
    async fn generate(&self, request: GenerationRequest) -> ContentServiceResult<GeneratedContent> {
        sleep(self.delay).await;
        self.inner.generate(request).await
    }

    async fn search_context(&self, query: ContextQuery) -> ContentServiceResult<ContextSuggestions> {
        sleep(self.delay).await;
        self.inner.search_context(query).await
    }

    async fn list_templates(&self, query: TemplateQuery) -> ContentServiceResult<Vec<Template>> {
        sleep(self.delay).await;
        self.inner.list_templates(query).await
    }
}
