use reactive_engine::{MemoryStorage, ReactiveEngine};
use reactive_sdk::{
    reactive_sdk_test::MockContentService, ContentFormats, ContentType, ContextSuggestions,
    GeneratedContent, GenerationContext, GenerationMetadata, Priority,
};
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tracing_subscriber::EnvFilter;

/// Drives one full engine session against a mocked backend: a debounced
/// context search, a generation, and the recent-item bookkeeping.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let service = Arc::new(MockContentService::new());
    service.enqueue_search(ContextSuggestions {
        query: "login".to_string(),
        total_results: 3,
        ..ContextSuggestions::default()
    });
    service.enqueue_generate(GeneratedContent {
        content: ContentFormats {
            markdown: "# User Story: Mobile Login\n\nAs a user, I want to log in with email \
                       and password."
                .to_string(),
            ..ContentFormats::default()
        },
        context: GenerationMetadata::default(),
        processing_time: 15_000,
        generated_at: "2026-08-06T12:00:00Z".to_string(),
    });

    let engine = ReactiveEngine::new(service, Box::new(MemoryStorage::new()));

    let user_input =
        "I need a user story for login functionality with basic email and password authentication";

    engine.input_changed(user_input, "3PI", ContentType::Story);
    sleep(Duration::from_millis(600)).await;
    if let Some(suggestions) = engine.suggestions().borrow().as_ref() {
        println!("{} context results", suggestions.total_results);
    }

    let context = GenerationContext {
        project: "3PI".to_string(),
        priority: Priority::High,
        output_formats: vec!["markdown".to_string()],
        ..GenerationContext::default()
    };
    engine
        .generate(ContentType::Story, user_input, context)
        .await
        .unwrap();

    println!(
        "generated:\n{}",
        engine
            .content()
            .borrow()
            .as_ref()
            .map(|content| content.content.markdown.clone())
            .unwrap_or_default()
    );

    sleep(Duration::from_millis(1100)).await;
    for item in engine.recent_items() {
        println!("recent: {} ({})", item.title, item.preview);
    }
}
