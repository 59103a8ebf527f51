use reactive_sdk::{
    reactive_sdk_test::{MockContentService, MockGenerateResult, MockSearchResult},
    ContentFormats, ContentService, ContentServiceError, ContentType, ContextQuery,
    ContextSuggestions, GeneratedContent, GenerationContext, GenerationMetadata,
    GenerationRequest, Template, TemplateQuery,
};

fn story_request(user_input: &str) -> GenerationRequest {
    GenerationRequest {
        content_type: ContentType::Story,
        user_input: user_input.to_string(),
        context: GenerationContext {
            project: "3PI".to_string(),
            output_formats: vec!["markdown".to_string()],
            ..GenerationContext::default()
        },
        output_format: vec!["markdown".to_string()],
    }
}

fn markdown_content(markdown: &str) -> GeneratedContent {
    GeneratedContent {
        content: ContentFormats {
            markdown: markdown.to_string(),
            ..ContentFormats::default()
        },
        context: GenerationMetadata::default(),
        processing_time: 12_000,
        generated_at: "2026-08-06T12:00:00Z".to_string(),
    }
}

#[tokio::test]
async fn mock_content_service_tracks_generate_requests_and_returns_results() {
    let service = MockContentService::new();

    let content1 = markdown_content("# User Story: Mobile Login");
    let content3 = markdown_content("# Epic: Checkout");

    service
        .enqueue_generate(content1.clone())
        .enqueue_generate(MockGenerateResult::error(
            ContentServiceError::InvalidInput("generate error".to_string()),
        ))
        .enqueue_generate(content3.clone());

    let request1 = story_request("login story please");
    let res1 = service
        .generate(request1.clone())
        .await
        .expect("first generate should succeed");
    assert_eq!(res1, content1);
    let tracked = service.tracked_generate_requests();
    assert_eq!(tracked.len(), 1);
    assert_eq!(tracked[0], request1);

    let err = service
        .generate(story_request("error please"))
        .await
        .expect_err("second generate should error");
    match err {
        ContentServiceError::InvalidInput(msg) => assert_eq!(msg, "generate error"),
        other => panic!("unexpected error variant: {other:?}"),
    }

    let res3 = service
        .generate(story_request("checkout epic"))
        .await
        .expect("third generate should succeed");
    assert_eq!(res3, content3);
    assert_eq!(service.tracked_generate_requests().len(), 3);

    service.reset();
    assert!(service.tracked_generate_requests().is_empty());

    service.enqueue_generate(markdown_content("# After reset"));
    service.restore();

    let err = service
        .generate(request1)
        .await
        .expect_err("generate after restore should fail");
    match err {
        ContentServiceError::Invariant(message) => {
            assert_eq!(message, "no mocked generate results available");
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
}

#[tokio::test]
async fn mock_content_service_tracks_search_queries_and_returns_results() {
    let service = MockContentService::new();

    let suggestions = ContextSuggestions {
        query: "login".to_string(),
        total_results: 2,
        ..ContextSuggestions::default()
    };

    service
        .enqueue_search(suggestions.clone())
        .enqueue_search(MockSearchResult::error(ContentServiceError::InvalidInput(
            "search error".to_string(),
        )));

    let query = ContextQuery::new("login", "3PI", ContentType::Story);
    let res = service
        .search_context(query.clone())
        .await
        .expect("first search should succeed");
    assert_eq!(res, suggestions);
    let tracked = service.tracked_search_queries();
    assert_eq!(tracked.len(), 1);
    assert_eq!(tracked[0], query);

    let err = service
        .search_context(query)
        .await
        .expect_err("second search should error");
    match err {
        ContentServiceError::InvalidInput(msg) => assert_eq!(msg, "search error"),
        other => panic!("unexpected error variant: {other:?}"),
    }
}

#[tokio::test]
async fn mock_content_service_serves_template_listings() {
    let service = MockContentService::new();
    service.enqueue_templates(vec![Template {
        name: "user-story".to_string(),
        content_type: Some("story".to_string()),
        description: "Standard user story skeleton".to_string(),
        example: None,
    }]);

    let query = TemplateQuery::new(ContentType::Story, "3PI");
    let templates = service
        .list_templates(query.clone())
        .await
        .expect("templates should be served");
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].name, "user-story");
    assert_eq!(service.tracked_template_queries(), vec![query]);
}
