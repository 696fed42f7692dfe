use serde::{Deserialize, Serialize};

/// Category of a piece of pull-request review feedback.
///
/// # Examples
///
/// ```
/// use skilllens_core::FeedbackKind;
///
/// let kind = FeedbackKind::Inline;
/// assert_eq!(serde_json::to_string(&kind).unwrap(), "\"inline\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    /// A review comment tied to a file position.
    Inline,
    /// A review-level summary.
    Review,
    /// A general conversation comment on the PR.
    Conversation,
}

/// One piece of reviewer feedback, normalized for the recommendation proxy.
///
/// Constructed only for bodies that survived the noise filter, with fenced
/// code blocks already redacted. Held for the duration of one run; nothing
/// is persisted.
///
/// # Examples
///
/// ```
/// use skilllens_core::{FeedbackItem, FeedbackKind};
///
/// let item = FeedbackItem {
///     kind: FeedbackKind::Inline,
///     text: "Consider extracting this into a helper".into(),
///     file_path: Some("src/main.rs".into()),
///     author: Some("reviewer1".into()),
///     created_at: "2023-01-01T00:00:00Z".into(),
/// };
/// let json = serde_json::to_value(&item).unwrap();
/// assert_eq!(json["type"], "inline");
/// assert_eq!(json["path"], "src/main.rs");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItem {
    /// Feedback category.
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    /// The feedback body, noise-filtered and fence-redacted.
    #[serde(rename = "body")]
    pub text: String,
    /// File the comment is attached to; inline feedback only.
    #[serde(rename = "path", skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// Author login, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Creation timestamp; submission time for reviews, empty string when
    /// a review carries none.
    pub created_at: String,
}

/// Repository identity as the proxy expects it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
    pub pr_number: u64,
}

/// Recommendation defaults derived from the action configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Defaults {
    pub language: String,
    pub max_topics: u32,
    pub min_confidence: f64,
}

/// Request body for the recommendation proxy.
///
/// # Examples
///
/// ```
/// use skilllens_core::{Defaults, RecommendationRequest, RepoRef};
///
/// let request = RecommendationRequest {
///     repo: RepoRef { owner: "o".into(), name: "r".into(), pr_number: 1 },
///     reviews: vec![],
///     defaults: Defaults {
///         language: "English".into(),
///         max_topics: 5,
///         min_confidence: 0.6,
///     },
/// };
/// let json = serde_json::to_value(&request).unwrap();
/// assert_eq!(json["repo"]["prNumber"], 1);
/// assert_eq!(json["defaults"]["maxTopics"], 5);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationRequest {
    pub repo: RepoRef,
    pub reviews: Vec<FeedbackItem>,
    pub defaults: Defaults,
}

/// Decoded response from the recommendation proxy.
///
/// `topics` is an opaque pass-through: it is serialized verbatim into the
/// `topics-json` output without schema validation. When `comment_markdown`
/// is empty, nothing is published.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Topic records, structure owned by the proxy.
    #[serde(default)]
    pub topics: Vec<serde_json::Value>,
    /// Markdown to publish as the managed comment.
    #[serde(default)]
    pub comment_markdown: String,
}
