use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// The kind of document the backend is asked to produce.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    Epic,
    Story,
    Prd,
    Analysis,
    Summary,
    StakeholderMap,
}

impl ContentType {
    /// The wire spelling of the content type, as used in request bodies and
    /// query strings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Epic => "epic",
            Self::Story => "story",
            Self::Prd => "prd",
            Self::Analysis => "analysis",
            Self::Summary => "summary",
            Self::StakeholderMap => "stakeholder-map",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// User-selected context that accompanies a generation request. Mutable by
/// the user until a generation is in flight; never mutated during one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationContext {
    pub project: String,
    pub priority: Priority,
    #[serde(default)]
    pub selected_docs: Vec<String>,
    #[serde(default)]
    pub selected_notes: Vec<String>,
    #[serde(default)]
    pub output_formats: Vec<String>,
}

/// Body of `POST /api/reactive-mode/generate`. Immutable once submitted.
/// `output_format` mirrors `context.output_formats`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub content_type: ContentType,
    pub user_input: String,
    pub context: GenerationContext,
    pub output_format: Vec<String>,
}

/// Query string of `GET /api/reactive-mode/context-search`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContextQuery {
    pub query: String,
    pub project: String,
    pub content_type: ContentType,
    pub include_templates: bool,
    pub include_similar: bool,
}

impl ContextQuery {
    #[must_use]
    pub fn new(query: impl Into<String>, project: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            query: query.into(),
            project: project.into(),
            content_type,
            include_templates: true,
            include_similar: true,
        }
    }
}

/// Result of a context search. Ephemeral: superseded wholesale by the next
/// search response, never merged field-by-field with a prior result.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContextSuggestions {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub total_results: i64,
    #[serde(default)]
    pub results: SuggestionResults,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResults {
    #[serde(default)]
    pub documents: Vec<DocumentMatch>,
    #[serde(default)]
    pub meeting_notes: Vec<MeetingNoteMatch>,
    #[serde(default)]
    pub templates: Vec<TemplateMatch>,
    #[serde(default)]
    pub similar_content: Vec<SimilarContentMatch>,
    /// Free-form AI suggestions for refining the request.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// A knowledge-base document matched by the search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMatch {
    pub path: String,
    pub title: String,
    /// Match strength in `0.0..=1.0`.
    #[serde(default)]
    pub relevance: f64,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeetingNoteMatch {
    pub path: String,
    pub title: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub relevance: f64,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMatch {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub usage: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimilarContentMatch {
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: String,
    /// Similarity score in `0.0..=1.0`.
    #[serde(default)]
    pub similarity: f64,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub project: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
}

/// Successful response of the generate endpoint. Created only on a 2xx
/// response; immutable thereafter; replaced wholesale by the next success.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub content: ContentFormats,
    #[serde(default)]
    pub context: GenerationMetadata,
    /// Backend-side processing time in milliseconds.
    #[serde(default)]
    pub processing_time: u64,
    #[serde(default)]
    pub generated_at: String,
}

/// The generated document in each requested output format. `markdown` is
/// always present; the others only when requested.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentFormats {
    pub markdown: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira: Option<JiraContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<MarkdownContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confluence: Option<MarkdownContent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JiraContent {
    #[serde(default)]
    pub fields: HashMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_paste_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MarkdownContent {
    pub markdown: String,
}

/// What the backend used to produce the content.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    #[serde(default)]
    pub documents_used: i64,
    #[serde(default)]
    pub suggestions_applied: i64,
    #[serde(default)]
    pub project_context: String,
    #[serde(default)]
    pub priority: Priority,
}

/// Query string of `GET /api/reactive-mode/templates`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateQuery {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub project: String,
    pub include_examples: bool,
}

impl TemplateQuery {
    #[must_use]
    pub fn new(content_type: ContentType, project: impl Into<String>) -> Self {
        Self {
            content_type,
            project: project.into(),
            include_examples: true,
        }
    }
}

/// A reusable document template known to the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub name: String,
    #[serde(rename = "type", default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}
