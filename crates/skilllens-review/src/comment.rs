use skilllens_core::{Result, RunnerLog};

use crate::github::PullRequestApi;

/// Create or update the single managed summary comment on a pull request.
///
/// The managed comment is the first existing conversation comment whose body
/// contains `marker` as a substring. Behavior is undefined when more than
/// one comment carries the marker: the first match wins and the rest are
/// left untouched. The published body is `{marker}\n\n{body}`, fully
/// overwriting any previous content.
///
/// Returns the URL of the updated or newly created comment.
///
/// # Errors
///
/// Propagates any [`skilllens_core::SkillLensError::Github`] from the list,
/// create, or update call.
pub async fn upsert_comment(
    api: &dyn PullRequestApi,
    owner: &str,
    repo: &str,
    pr: u64,
    marker: &str,
    body: &str,
    log: &RunnerLog,
) -> Result<String> {
    log.debug(format!("Looking for existing comment with marker: {marker}"));
    let existing = api.list_conversation_comments(owner, repo, pr).await?;
    let found = existing.iter().find(|c| {
        c.body
            .as_deref()
            .is_some_and(|b| b.contains(marker))
    });

    let full_body = format!("{marker}\n\n{body}");

    match found {
        Some(comment) => {
            log.debug(format!("Updating existing comment (ID: {})", comment.id));
            api.update_comment(owner, repo, comment.id, &full_body)
                .await?;
            log.debug(format!("Updated comment URL: {}", comment.html_url));
            Ok(comment.html_url.clone())
        }
        None => {
            log.debug("Creating new comment (no existing comment found)");
            let created = api.create_comment(owner, repo, pr, &full_body).await?;
            log.debug(format!("Created comment URL: {}", created.html_url));
            Ok(created.html_url)
        }
    }
}
