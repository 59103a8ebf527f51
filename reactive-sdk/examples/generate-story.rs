use dotenvy::dotenv;
use reactive_sdk::{
    ContentService, ContentType, GenerationContext, GenerationRequest, Priority,
    ReactiveModeClient,
};

#[tokio::main]
async fn main() {
    dotenv().ok();

    let client = ReactiveModeClient::from_env();

    let context = GenerationContext {
        project: "3PI".to_string(),
        priority: Priority::High,
        output_formats: vec!["markdown".to_string(), "jira".to_string()],
        ..GenerationContext::default()
    };

    let response = client
        .generate(GenerationRequest {
            content_type: ContentType::Story,
            user_input:
                "I need a user story for login functionality with basic email and password \
                 authentication"
                    .to_string(),
            output_format: context.output_formats.clone(),
            context,
        })
        .await
        .unwrap();

    println!("{}", response.content.markdown);
}
