use async_trait::async_trait;
use serde::Deserialize;
use skilllens_core::{Result, SkillLensError};

/// Page size for every list request. Only the first page is fetched; review
/// volumes past that are out of scope for this action.
pub const PAGE_SIZE: u8 = 100;

/// Comment author identity.
#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    pub login: String,
}

/// Raw inline review comment as returned by the pulls comments endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct InlineComment {
    pub body: Option<String>,
    pub path: String,
    pub user: Option<Author>,
    #[serde(default)]
    pub created_at: String,
}

/// Raw review summary as returned by the reviews endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewSummary {
    pub body: Option<String>,
    pub user: Option<Author>,
    pub submitted_at: Option<String>,
}

/// Raw conversation comment as returned by the issue comments endpoint.
/// Also the shape returned when creating a comment.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueComment {
    pub id: u64,
    pub body: Option<String>,
    pub html_url: String,
    pub user: Option<Author>,
    #[serde(default)]
    pub created_at: String,
}

/// Read/write surface of the GitHub pull-request API the action consumes.
///
/// A trait seam so the aggregator, upserter, and orchestrator are testable
/// against in-memory fixtures.
#[async_trait]
pub trait PullRequestApi: Send + Sync {
    /// First page of inline review comments on a PR.
    async fn list_inline_comments(
        &self,
        owner: &str,
        repo: &str,
        pr: u64,
    ) -> Result<Vec<InlineComment>>;

    /// First page of review summaries on a PR.
    async fn list_reviews(&self, owner: &str, repo: &str, pr: u64) -> Result<Vec<ReviewSummary>>;

    /// First page of general conversation comments on a PR.
    async fn list_conversation_comments(
        &self,
        owner: &str,
        repo: &str,
        pr: u64,
    ) -> Result<Vec<IssueComment>>;

    /// Create a conversation comment; returns the created record.
    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        pr: u64,
        body: &str,
    ) -> Result<IssueComment>;

    /// Overwrite the body of an existing conversation comment.
    async fn update_comment(
        &self,
        owner: &str,
        repo: &str,
        comment_id: u64,
        body: &str,
    ) -> Result<()>;
}

/// GitHub client backed by octocrab.
///
/// # Examples
///
/// ```no_run
/// use skilllens_review::github::GitHubClient;
///
/// let client = GitHubClient::new("ghp_xxxx").unwrap();
/// ```
pub struct GitHubClient {
    octocrab: octocrab::Octocrab,
}

impl GitHubClient {
    /// Create a client from an access token.
    ///
    /// # Errors
    ///
    /// Returns [`SkillLensError::Github`] if the client cannot be built.
    pub fn new(token: &str) -> Result<Self> {
        let octocrab = octocrab::Octocrab::builder()
            .personal_token(token.to_string())
            .build()
            .map_err(|e| SkillLensError::Github(format!("failed to create GitHub client: {e}")))?;
        Ok(Self { octocrab })
    }

    async fn get_list<T: serde::de::DeserializeOwned>(&self, route: String) -> Result<Vec<T>> {
        self.octocrab
            .get(route, None::<&()>)
            .await
            .map_err(|e| SkillLensError::Github(e.to_string()))
    }
}

#[async_trait]
impl PullRequestApi for GitHubClient {
    async fn list_inline_comments(
        &self,
        owner: &str,
        repo: &str,
        pr: u64,
    ) -> Result<Vec<InlineComment>> {
        self.get_list(format!(
            "/repos/{owner}/{repo}/pulls/{pr}/comments?per_page={PAGE_SIZE}"
        ))
        .await
    }

    async fn list_reviews(&self, owner: &str, repo: &str, pr: u64) -> Result<Vec<ReviewSummary>> {
        self.get_list(format!(
            "/repos/{owner}/{repo}/pulls/{pr}/reviews?per_page={PAGE_SIZE}"
        ))
        .await
    }

    async fn list_conversation_comments(
        &self,
        owner: &str,
        repo: &str,
        pr: u64,
    ) -> Result<Vec<IssueComment>> {
        self.get_list(format!(
            "/repos/{owner}/{repo}/issues/{pr}/comments?per_page={PAGE_SIZE}"
        ))
        .await
    }

    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        pr: u64,
        body: &str,
    ) -> Result<IssueComment> {
        let route = format!("/repos/{owner}/{repo}/issues/{pr}/comments");
        let payload = serde_json::json!({ "body": body });
        self.octocrab
            .post(route, Some(&payload))
            .await
            .map_err(|e| SkillLensError::Github(format!("failed to create comment: {e}")))
    }

    async fn update_comment(
        &self,
        owner: &str,
        repo: &str,
        comment_id: u64,
        body: &str,
    ) -> Result<()> {
        let route = format!("/repos/{owner}/{repo}/issues/comments/{comment_id}");
        let payload = serde_json::json!({ "body": body });
        let _response: serde_json::Value = self
            .octocrab
            .patch(route, Some(&payload))
            .await
            .map_err(|e| SkillLensError::Github(format!("failed to update comment: {e}")))?;
        Ok(())
    }
}

/// In-memory [`PullRequestApi`] fixture shared by the aggregator, upserter,
/// and orchestrator tests.
#[cfg(test)]
pub(crate) mod tests_support {
    use std::sync::Mutex;

    use super::*;

    pub struct MockApi {
        pub inline: Vec<InlineComment>,
        pub reviews: Vec<ReviewSummary>,
        pub conversation: Vec<IssueComment>,
        pub reviews_error: Option<String>,
        pub create_url: String,
        pub created: Mutex<Vec<String>>,
        pub updated: Mutex<Vec<(u64, String)>>,
    }

    impl Default for MockApi {
        fn default() -> Self {
            Self {
                inline: Vec::new(),
                reviews: Vec::new(),
                conversation: Vec::new(),
                reviews_error: None,
                create_url: "https://github.com/test/comment/1".into(),
                created: Mutex::new(Vec::new()),
                updated: Mutex::new(Vec::new()),
            }
        }
    }

    impl MockApi {
        pub fn with_inline(mut self, body: &str, path: &str, login: &str) -> Self {
            self.inline.push(InlineComment {
                body: Some(body.into()),
                path: path.into(),
                user: Some(Author { login: login.into() }),
                created_at: "2023-01-01T00:00:00Z".into(),
            });
            self
        }

        pub fn with_review(mut self, body: &str, login: &str) -> Self {
            self.reviews.push(ReviewSummary {
                body: Some(body.into()),
                user: Some(Author { login: login.into() }),
                submitted_at: Some("2023-01-01T00:00:00Z".into()),
            });
            self
        }

        pub fn with_conversation(mut self, body: &str, login: &str) -> Self {
            self.conversation.push(IssueComment {
                id: self.conversation.len() as u64 + 1,
                body: Some(body.into()),
                html_url: "https://github.com/test/comment/0".into(),
                user: Some(Author { login: login.into() }),
                created_at: "2023-01-01T00:00:00Z".into(),
            });
            self
        }

        pub fn with_existing_comment(mut self, id: u64, body: &str, url: &str) -> Self {
            self.conversation.push(IssueComment {
                id,
                body: Some(body.into()),
                html_url: url.into(),
                user: None,
                created_at: "2023-01-01T00:00:00Z".into(),
            });
            self
        }

        pub fn with_reviews_error(mut self, message: &str) -> Self {
            self.reviews_error = Some(message.into());
            self
        }
    }

    #[async_trait]
    impl PullRequestApi for MockApi {
        async fn list_inline_comments(
            &self,
            _owner: &str,
            _repo: &str,
            _pr: u64,
        ) -> Result<Vec<InlineComment>> {
            Ok(self.inline.clone())
        }

        async fn list_reviews(
            &self,
            _owner: &str,
            _repo: &str,
            _pr: u64,
        ) -> Result<Vec<ReviewSummary>> {
            match &self.reviews_error {
                Some(message) => Err(SkillLensError::Github(message.clone())),
                None => Ok(self.reviews.clone()),
            }
        }

        async fn list_conversation_comments(
            &self,
            _owner: &str,
            _repo: &str,
            _pr: u64,
        ) -> Result<Vec<IssueComment>> {
            Ok(self.conversation.clone())
        }

        async fn create_comment(
            &self,
            _owner: &str,
            _repo: &str,
            _pr: u64,
            body: &str,
        ) -> Result<IssueComment> {
            self.created.lock().unwrap().push(body.to_string());
            Ok(IssueComment {
                id: 1,
                body: Some(body.to_string()),
                html_url: self.create_url.clone(),
                user: None,
                created_at: "2023-01-01T00:00:00Z".into(),
            })
        }

        async fn update_comment(
            &self,
            _owner: &str,
            _repo: &str,
            comment_id: u64,
            body: &str,
        ) -> Result<()> {
            self.updated
                .lock()
                .unwrap()
                .push((comment_id, body.to_string()));
            Ok(())
        }
    }
}
