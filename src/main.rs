use clap::Parser;

use skilllens_core::{ActionConfig, Outputs, RepoContext, Result, RunnerLog, SkillLensError};
use skilllens_review::action::{run, RunOutcome};
use skilllens_review::github::GitHubClient;
use skilllens_review::proxy::HttpRecommender;

#[derive(Parser)]
#[command(
    name = "skilllens-action",
    version,
    about = "Turn PR review feedback into SkillLens learning recommendations",
    long_about = "SkillLens action — a CI step that collects a pull request's review\n\
                  feedback, sends a normalized digest to the SkillLens recommendation\n\
                  service, and posts (or updates) a single summary comment on the PR.\n\n\
                  All configuration comes from the GitHub Actions input convention\n\
                  (INPUT_* environment variables); see the action manifest for the\n\
                  available inputs."
)]
struct Cli {
    /// Emit ::debug:: diagnostics even when the runner did not request them
    #[arg(long)]
    debug: bool,
}

async fn execute(config: &ActionConfig, log: &RunnerLog) -> Result<()> {
    let ctx = RepoContext::from_env()?;

    // A non-PR trigger is a no-op, not a configuration failure: exit
    // before the token check so neither is required on that path. The
    // traces match the ones the pipeline emits for the same condition.
    if ctx.pr_number.is_none() {
        log.debug(format!("Repository: {}/{}", ctx.owner, ctx.name));
        log.debug("PR number: not found");
        log.info("No PR number found in context; exiting.");
        return Ok(());
    }

    let token = config
        .resolve_token(std::env::var("GITHUB_TOKEN").ok())
        .ok_or_else(|| SkillLensError::Config("GITHUB_TOKEN is required".into()))?;

    let api = GitHubClient::new(&token)?;
    let recommender = HttpRecommender::new(config.api_url.clone(), config.oidc_audience.clone())?;

    match run(config, &ctx, &api, &recommender, log).await? {
        RunOutcome::Published {
            topics_json,
            comment_url,
        } => {
            let outputs = Outputs::from_env()?;
            outputs.set("topics-json", &topics_json)?;
            outputs.set("comment-url", &comment_url)?;
        }
        // Benign early exits and tolerated proxy failures already logged
        // their own message; no outputs on these paths.
        RunOutcome::NoPullRequest
        | RunOutcome::NoFeedback
        | RunOutcome::EmptyRecommendation
        | RunOutcome::ProxyUnavailable => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Diagnostics flag first: it gates every trace that follows.
    let config = match ActionConfig::from_env() {
        Ok(mut config) => {
            config.debug = config.debug || cli.debug;
            config
        }
        Err(e) => {
            RunnerLog::new(false).error(e.to_string());
            std::process::exit(1);
        }
    };
    let log = RunnerLog::new(config.debug);

    // Single catch-all: anything that escaped the stage policies becomes
    // the run's fatal failure reason.
    if let Err(e) = execute(&config, &log).await {
        log.error(e.to_string());
        std::process::exit(1);
    }
}
