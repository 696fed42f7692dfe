use std::path::Path;

use crate::error::{Result, SkillLensError};

/// Repository identity and pull-request number for one run, resolved from
/// the workflow trigger context.
///
/// # Examples
///
/// ```
/// use skilllens_core::RepoContext;
///
/// let payload = serde_json::json!({ "pull_request": { "number": 123 } });
/// let ctx = RepoContext::from_parts("octocat/hello-world", &payload).unwrap();
/// assert_eq!(ctx.owner, "octocat");
/// assert_eq!(ctx.name, "hello-world");
/// assert_eq!(ctx.pr_number, Some(123));
/// ```
#[derive(Debug, Clone)]
pub struct RepoContext {
    /// Repository owner login.
    pub owner: String,
    /// Repository name.
    pub name: String,
    /// Pull-request number, when the trigger was a PR event or an
    /// issue-comment event on a PR. `None` for anything else.
    pub pr_number: Option<u64>,
}

impl RepoContext {
    /// Resolve the context from `GITHUB_REPOSITORY` and the event payload at
    /// `GITHUB_EVENT_PATH`.
    ///
    /// A missing or unreadable payload file is not an error; it only means
    /// no pull-request number can be resolved.
    ///
    /// # Errors
    ///
    /// Returns [`SkillLensError::Config`] if `GITHUB_REPOSITORY` is absent
    /// or not of the form `owner/name`, and
    /// [`SkillLensError::Serialization`] if the payload file exists but is
    /// not valid JSON.
    pub fn from_env() -> Result<Self> {
        let repository = std::env::var("GITHUB_REPOSITORY").map_err(|_| {
            SkillLensError::Config("GITHUB_REPOSITORY is not set".into())
        })?;
        let payload = match std::env::var("GITHUB_EVENT_PATH") {
            Ok(path) => Self::read_payload(Path::new(&path))?,
            Err(_) => serde_json::Value::Null,
        };
        Self::from_parts(&repository, &payload)
    }

    /// Build the context from a `owner/name` string and an event payload.
    ///
    /// # Errors
    ///
    /// Returns [`SkillLensError::Config`] if `repository` is not of the form
    /// `owner/name`.
    pub fn from_parts(repository: &str, payload: &serde_json::Value) -> Result<Self> {
        let Some((owner, name)) = repository.split_once('/') else {
            return Err(SkillLensError::Config(format!(
                "invalid GITHUB_REPOSITORY '{repository}', expected owner/name"
            )));
        };
        if owner.is_empty() || name.is_empty() {
            return Err(SkillLensError::Config(format!(
                "invalid GITHUB_REPOSITORY '{repository}', expected owner/name"
            )));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
            pr_number: pr_number_from_payload(payload),
        })
    }

    fn read_payload(path: &Path) -> Result<serde_json::Value> {
        if !path.exists() {
            return Ok(serde_json::Value::Null);
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Extract the pull-request number from a webhook payload:
/// `pull_request.number` for PR events, then `issue.number` for
/// issue-comment events on a PR.
fn pr_number_from_payload(payload: &serde_json::Value) -> Option<u64> {
    payload
        .pointer("/pull_request/number")
        .or_else(|| payload.pointer("/issue/number"))
        .and_then(serde_json::Value::as_u64)
}
