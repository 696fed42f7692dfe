use skilllens_core::{
    ActionConfig, Defaults, RecommendationRequest, RepoContext, RepoRef, Result, RunnerLog,
    SkillLensError,
};

use crate::collect::collect_feedback;
use crate::comment::upsert_comment;
use crate::github::PullRequestApi;
use crate::proxy::Recommender;

/// How one orchestration run ended.
///
/// Everything except [`RunOutcome::Published`] is an early exit; only the
/// published path carries step outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The recommendation was posted; both step outputs are ready.
    Published {
        /// JSON-serialized topics array for the `topics-json` output.
        topics_json: String,
        /// URL of the created or updated comment for the `comment-url` output.
        comment_url: String,
    },
    /// The trigger context carried no pull-request number.
    NoPullRequest,
    /// Every fetched comment was empty or noise.
    NoFeedback,
    /// The proxy answered without `commentMarkdown`; nothing to post.
    EmptyRecommendation,
    /// The proxy failed and `fail-on-proxy-error` is off; a warning was
    /// already emitted.
    ProxyUnavailable,
}

/// Run the full pipeline: aggregate feedback, consult the recommendation
/// proxy, publish the managed comment.
///
/// Linear stages with early exits; no stage loops back. Proxy failures are
/// resolved against `fail_on_proxy_error`: fatal when set, a logged warning
/// and [`RunOutcome::ProxyUnavailable`] otherwise. Every other error
/// propagates to the caller's catch-all.
///
/// # Errors
///
/// GitHub API failures, OIDC failures, and policy-promoted proxy failures.
pub async fn run(
    config: &ActionConfig,
    ctx: &RepoContext,
    api: &dyn PullRequestApi,
    recommender: &dyn Recommender,
    log: &RunnerLog,
) -> Result<RunOutcome> {
    log.debug(format!("Repository: {}/{}", ctx.owner, ctx.name));
    let Some(pr) = ctx.pr_number else {
        log.debug("PR number: not found");
        log.info("No PR number found in context; exiting.");
        return Ok(RunOutcome::NoPullRequest);
    };
    log.debug(format!("PR number: {pr}"));

    let items = collect_feedback(api, &ctx.owner, &ctx.name, pr, log).await?;
    if items.is_empty() {
        log.debug("No review content found after fetching and filtering");
        log.info("No review content to analyze; exiting.");
        return Ok(RunOutcome::NoFeedback);
    }

    log.debug(format!("OIDC Audience: {}", config.oidc_audience));
    log.debug(format!(
        "Defaults: language={}, maxTopics={}, minConfidence={}",
        config.default_language, config.max_topics, config.min_confidence
    ));
    log.debug(format!(
        "Fail on proxy error: {}",
        config.fail_on_proxy_error
    ));

    let request = RecommendationRequest {
        repo: RepoRef {
            owner: ctx.owner.clone(),
            name: ctx.name.clone(),
            pr_number: pr,
        },
        reviews: items,
        defaults: Defaults {
            language: config.default_language.clone(),
            max_topics: config.max_topics,
            min_confidence: config.min_confidence,
        },
    };

    log.debug(format!(
        "Calling SkillLens API with {} review item(s)",
        request.reviews.len()
    ));

    let recommendation = match recommender.recommend(&request, log).await {
        Ok(recommendation) => recommendation,
        Err(SkillLensError::Proxy(message)) => {
            log.debug(&message);
            if config.fail_on_proxy_error {
                return Err(SkillLensError::Proxy(message));
            }
            log.warning(&message);
            return Ok(RunOutcome::ProxyUnavailable);
        }
        Err(other) => return Err(other),
    };

    log.debug(format!(
        "API returned {} topic(s)",
        recommendation.topics.len()
    ));
    log.debug(format!(
        "Comment markdown length: {} chars",
        recommendation.comment_markdown.len()
    ));

    if recommendation.comment_markdown.is_empty() {
        log.debug("No comment markdown in API response");
        log.info("Proxy returned no commentMarkdown; nothing to post.");
        return Ok(RunOutcome::EmptyRecommendation);
    }

    log.debug(format!(
        "Upserting comment with marker: {}",
        config.comment_marker
    ));
    let comment_url = upsert_comment(
        api,
        &ctx.owner,
        &ctx.name,
        pr,
        &config.comment_marker,
        &recommendation.comment_markdown,
        log,
    )
    .await?;

    let topics_json = serde_json::to_string(&recommendation.topics)?;
    log.debug("Action completed successfully");

    Ok(RunOutcome::Published {
        topics_json,
        comment_url,
    })
}
