use crate::{
    client_utils::{get_json, post_json},
    ContentService, ContentServiceResult, ContextQuery, ContextSuggestions, GeneratedContent,
    GenerationRequest, Template, TemplateQuery,
};
use reqwest::Client;
use serde::Deserialize;

const PRODUCTION_BASE_URL: &str = "https://github-meeting-webhook.vercel.app";
const DEVELOPMENT_BASE_URL: &str = "http://localhost:3000";

/// Which backend host the client talks to. Selection affects only the
/// endpoint host, never behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Development => DEVELOPMENT_BASE_URL,
            Self::Production => PRODUCTION_BASE_URL,
        }
    }

    /// Resolve the environment from `REACTIVE_ENV`. Anything other than
    /// `development` selects production.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var("REACTIVE_ENV").as_deref() {
            Ok("development") => Self::Development,
            _ => Self::Production,
        }
    }
}

/// HTTP client for the reactive-mode backend.
pub struct ReactiveModeClient {
    base_url: String,
    client: Client,
}

impl ReactiveModeClient {
    #[must_use]
    pub fn new(environment: Environment) -> Self {
        Self {
            base_url: environment.base_url().to_string(),
            client: Client::new(),
        }
    }

    /// Point the client at an explicit base URL, e.g. from
    /// `REACTIVE_API_BASE_URL`.
    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build a client from the process environment: `REACTIVE_API_BASE_URL`
    /// wins over the `REACTIVE_ENV` host selection.
    #[must_use]
    pub fn from_env() -> Self {
        let client = Self::new(Environment::from_env());
        match std::env::var("REACTIVE_API_BASE_URL") {
            Ok(base_url) if !base_url.trim().is_empty() => client.with_base_url(base_url),
            _ => client,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for ReactiveModeClient {
    fn default() -> Self {
        Self::from_env()
    }
}

#[derive(Debug, Default, Deserialize)]
struct TemplatesResponse {
    #[serde(default)]
    templates: Vec<Template>,
}

#[async_trait::async_trait]
impl ContentService for ReactiveModeClient {
    async fn generate(&self, request: GenerationRequest) -> ContentServiceResult<GeneratedContent> {
        tracing::debug!(
            content_type = request.content_type.as_str(),
            project = %request.context.project,
            "issuing generation request"
        );
        post_json(
            &self.client,
            &format!("{}/api/reactive-mode/generate", self.base_url),
            &request,
        )
        .await
    }

    async fn search_context(&self, query: ContextQuery) -> ContentServiceResult<ContextSuggestions> {
        get_json(
            &self.client,
            &format!("{}/api/reactive-mode/context-search", self.base_url),
            &query,
        )
        .await
    }

    async fn list_templates(&self, query: TemplateQuery) -> ContentServiceResult<Vec<Template>> {
        let response: TemplatesResponse = get_json(
            &self.client,
            &format!("{}/api/reactive-mode/templates", self.base_url),
            &query,
        )
        .await?;
        Ok(response.templates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_selects_the_endpoint_host() {
        assert_eq!(
            Environment::Production.base_url(),
            "https://github-meeting-webhook.vercel.app"
        );
        assert_eq!(Environment::Development.base_url(), "http://localhost:3000");
    }

    #[test]
    fn explicit_base_url_overrides_the_environment() {
        let client = ReactiveModeClient::new(Environment::Production)
            .with_base_url("http://127.0.0.1:8080".to_string());
        assert_eq!(client.base_url(), "http://127.0.0.1:8080");
    }
}
