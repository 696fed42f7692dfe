use async_trait::async_trait;
use skilllens_core::{Recommendation, RecommendationRequest, Result, RunnerLog, SkillLensError};

/// The recommendation service as the orchestrator sees it.
///
/// A trait seam so the end-to-end tests can script proxy responses without
/// a network.
#[async_trait]
pub trait Recommender: Send + Sync {
    /// Submit the feedback digest and decode the recommendation.
    async fn recommend(
        &self,
        request: &RecommendationRequest,
        log: &RunnerLog,
    ) -> Result<Recommendation>;
}

/// HTTP client for the SkillLens recommendation proxy.
///
/// Authenticates with a short-lived OIDC id token requested from the Actions
/// runner immediately before the POST. No timeouts, retries, or backoff: a
/// hung request hangs the run, bounded only by whatever the runner enforces.
///
/// # Examples
///
/// ```
/// use skilllens_review::proxy::HttpRecommender;
///
/// let client = HttpRecommender::new(
///     "https://api.test.com/v1/recommendations".into(),
///     "skilllens.dev".into(),
/// )
/// .unwrap();
/// ```
pub struct HttpRecommender {
    http: reqwest::Client,
    url: String,
    audience: String,
}

#[derive(Debug, serde::Deserialize)]
struct IdTokenResponse {
    value: String,
}

impl HttpRecommender {
    /// Create a client for the given proxy endpoint and OIDC audience.
    ///
    /// # Errors
    ///
    /// Returns [`SkillLensError::Proxy`] if the HTTP client cannot be built.
    pub fn new(url: String, audience: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| SkillLensError::Proxy(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http, url, audience })
    }

    /// Request a signed id token scoped to the configured audience from the
    /// Actions runner's token endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SkillLensError::Oidc`] when the runner did not grant
    /// `id-token: write` (the request URL/token variables are absent) or the
    /// token endpoint call fails. OIDC failures are always fatal; the
    /// fail-on-proxy-error policy does not apply to them.
    async fn fetch_id_token(&self) -> Result<String> {
        let request_url = std::env::var("ACTIONS_ID_TOKEN_REQUEST_URL").map_err(|_| {
            SkillLensError::Oidc(
                "ACTIONS_ID_TOKEN_REQUEST_URL is not set; does the workflow grant id-token: write?"
                    .into(),
            )
        })?;
        let request_token = std::env::var("ACTIONS_ID_TOKEN_REQUEST_TOKEN").map_err(|_| {
            SkillLensError::Oidc("ACTIONS_ID_TOKEN_REQUEST_TOKEN is not set".into())
        })?;

        let response = self
            .http
            .get(&request_url)
            .query(&[("audience", self.audience.as_str())])
            .bearer_auth(&request_token)
            .send()
            .await
            .map_err(|e| SkillLensError::Oidc(format!("id token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SkillLensError::Oidc(format!(
                "id token endpoint returned {status}: {body}"
            )));
        }

        let token: IdTokenResponse = response
            .json()
            .await
            .map_err(|e| SkillLensError::Oidc(format!("failed to parse id token response: {e}")))?;
        Ok(token.value)
    }
}

#[async_trait]
impl Recommender for HttpRecommender {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
        log: &RunnerLog,
    ) -> Result<Recommendation> {
        let id_token = self.fetch_id_token().await?;

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&id_token)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                SkillLensError::Proxy(format!("Network error calling SkillLens API: {e}"))
            })?;

        let status = response.status();
        log.debug(format!("API response status: {}", status.as_u16()));
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SkillLensError::Proxy(format!(
                "Proxy error {}: {body}",
                status.as_u16()
            )));
        }

        let body = response.text().await.map_err(|e| {
            SkillLensError::Proxy(format!("Network error calling SkillLens API: {e}"))
        })?;
        // A malformed success body always fails the run; the
        // fail-on-proxy-error policy covers unreachable or erroring
        // proxies, not broken response contracts.
        Ok(serde_json::from_str(&body)?)
    }
}
