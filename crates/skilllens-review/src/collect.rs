use skilllens_core::{FeedbackItem, FeedbackKind, Result, RunnerLog};

use crate::filter::is_noisy;
use crate::github::PullRequestApi;
use crate::redact::{redact_fences, DEFAULT_FENCE_LIMIT};

/// Fetch and normalize all review feedback for a pull request.
///
/// The three list requests run concurrently and the join is all-or-nothing:
/// the first failure fails the aggregation. Output order is all inline
/// items, then all reviews, then all conversation comments, each in fetch
/// order — concatenation, not a chronological merge.
///
/// Records with an absent or noisy body are dropped; surviving bodies have
/// oversized code fences redacted before the item is built.
///
/// # Errors
///
/// Propagates the first [`skilllens_core::SkillLensError::Github`] from any
/// of the three fetches.
pub async fn collect_feedback(
    api: &dyn PullRequestApi,
    owner: &str,
    repo: &str,
    pr: u64,
    log: &RunnerLog,
) -> Result<Vec<FeedbackItem>> {
    log.debug(format!("Fetching review data for PR #{pr} in {owner}/{repo}"));

    let (inline, reviews, convo) = tokio::try_join!(
        api.list_inline_comments(owner, repo, pr),
        api.list_reviews(owner, repo, pr),
        api.list_conversation_comments(owner, repo, pr),
    )?;

    log.debug(format!(
        "Fetched {} inline comment(s), {} review(s), {} conversation comment(s)",
        inline.len(),
        reviews.len(),
        convo.len()
    ));

    let mut items: Vec<FeedbackItem> = Vec::new();

    for comment in inline {
        if let Some(body) = keep_body(comment.body, log) {
            items.push(FeedbackItem {
                kind: FeedbackKind::Inline,
                text: body,
                file_path: Some(comment.path),
                author: comment.user.map(|u| u.login),
                created_at: comment.created_at,
            });
        }
    }

    for review in reviews {
        if let Some(body) = keep_body(review.body, log) {
            items.push(FeedbackItem {
                kind: FeedbackKind::Review,
                text: body,
                file_path: None,
                author: review.user.map(|u| u.login),
                created_at: review.submitted_at.unwrap_or_default(),
            });
        }
    }

    for comment in convo {
        if let Some(body) = keep_body(comment.body, log) {
            items.push(FeedbackItem {
                kind: FeedbackKind::Conversation,
                text: body,
                file_path: None,
                author: comment.user.map(|u| u.login),
                created_at: comment.created_at,
            });
        }
    }

    log.debug(format!(
        "Returning {} non-noisy review item(s) after filtering",
        items.len()
    ));
    Ok(items)
}

fn keep_body(body: Option<String>, log: &RunnerLog) -> Option<String> {
    let body = body?;
    if is_noisy(&body, log) {
        return None;
    }
    Some(redact_fences(&body, DEFAULT_FENCE_LIMIT, log))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::tests_support::MockApi;

    fn log() -> RunnerLog {
        RunnerLog::new(false)
    }

    #[tokio::test]
    async fn normalizes_all_three_categories_in_order() {
        let api = MockApi::default()
            .with_inline("Inline comment", "src/file.rs", "reviewer1")
            .with_review("Review body", "reviewer2")
            .with_conversation("Conversation comment", "commenter1");

        let items = collect_feedback(&api, "owner", "repo", 123, &log())
            .await
            .unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].kind, FeedbackKind::Inline);
        assert_eq!(items[0].file_path.as_deref(), Some("src/file.rs"));
        assert_eq!(items[1].kind, FeedbackKind::Review);
        assert!(items[1].file_path.is_none());
        assert_eq!(items[2].kind, FeedbackKind::Conversation);
        assert_eq!(items[2].author.as_deref(), Some("commenter1"));
    }

    #[tokio::test]
    async fn drops_noisy_comments() {
        let api = MockApi::default().with_inline("LGTM", "src/file.rs", "reviewer1");
        let items = collect_feedback(&api, "owner", "repo", 123, &log())
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn drops_absent_bodies() {
        let mut api = MockApi::default();
        api.inline.push(crate::github::InlineComment {
            body: None,
            path: "src/file.rs".into(),
            user: None,
            created_at: "2023-01-01T00:00:00Z".into(),
        });
        let items = collect_feedback(&api, "owner", "repo", 123, &log())
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn review_without_submission_time_gets_empty_timestamp() {
        let mut api = MockApi::default();
        api.reviews.push(crate::github::ReviewSummary {
            body: Some("Pending review text".into()),
            user: None,
            submitted_at: None,
        });
        let items = collect_feedback(&api, "owner", "repo", 123, &log())
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].created_at, "");
    }

    #[tokio::test]
    async fn redacts_long_fences_in_kept_items() {
        let body = format!("See this:\n```{}```", "x".repeat(300));
        let api = MockApi::default().with_inline(&body, "src/file.rs", "reviewer1");
        let items = collect_feedback(&api, "owner", "repo", 123, &log())
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].text.contains('…'));
        assert!(items[0].text.len() < body.len());
    }

    #[tokio::test]
    async fn any_fetch_failure_fails_the_aggregation() {
        let api = MockApi::default().with_reviews_error("boom");
        let err = collect_feedback(&api, "owner", "repo", 123, &log())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("boom"));
    }
}
