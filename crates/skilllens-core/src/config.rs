use crate::error::Result;

/// Fixed default endpoint of the SkillLens recommendation proxy.
pub const DEFAULT_API_URL: &str = "https://skilllens-25qt.onrender.com/v1/recommendations";

/// Per-run configuration read from the GitHub Actions input convention.
///
/// The Actions runner exposes each `with:` input as an `INPUT_<NAME>`
/// environment variable (spaces replaced by underscores, upper-cased, dashes
/// preserved). Every field has a default so the action also runs with an
/// empty `with:` block.
///
/// # Examples
///
/// ```
/// use skilllens_core::ActionConfig;
///
/// let config = ActionConfig::default();
/// assert_eq!(config.max_topics, 5);
/// assert_eq!(config.comment_marker, "<!-- SkillLens:v0 -->");
/// assert!(!config.fail_on_proxy_error);
/// ```
#[derive(Debug, Clone)]
pub struct ActionConfig {
    /// Recommendation proxy endpoint (`skilllens-api-url`).
    pub api_url: String,
    /// Audience for the OIDC id token (`oidc-audience`).
    pub oidc_audience: String,
    /// Natural language the proxy should recommend in (`default-language`).
    pub default_language: String,
    /// Maximum number of topics to request (`max-topics`).
    pub max_topics: u32,
    /// Minimum recommendation confidence, 0–1 (`min-confidence`).
    pub min_confidence: f64,
    /// Idempotency marker embedded in the managed comment (`comment-marker`).
    pub comment_marker: String,
    /// When set, a proxy failure fails the workflow step
    /// (`fail-on-proxy-error`, string `"true"` / anything else).
    pub fail_on_proxy_error: bool,
    /// Emit `::debug::` diagnostics (`enable-debug`, or `RUNNER_DEBUG=1`).
    pub debug: bool,
    /// Token fallback when `GITHUB_TOKEN` is not in the environment
    /// (`github-token`).
    pub github_token: Option<String>,
}

fn default_oidc_audience() -> String {
    "skilllens.dev".into()
}

fn default_language() -> String {
    "English".into()
}

fn default_max_topics() -> u32 {
    5
}

fn default_min_confidence() -> f64 {
    0.6
}

fn default_comment_marker() -> String {
    "<!-- SkillLens:v0 -->".into()
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            oidc_audience: default_oidc_audience(),
            default_language: default_language(),
            max_topics: default_max_topics(),
            min_confidence: default_min_confidence(),
            comment_marker: default_comment_marker(),
            fail_on_proxy_error: false,
            debug: false,
            github_token: None,
        }
    }
}

impl ActionConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an environment lookup function.
    ///
    /// The lookup receives raw environment variable names
    /// (`INPUT_MAX-TOPICS`, `RUNNER_DEBUG`, ...), which keeps tests free of
    /// process-global environment mutation.
    ///
    /// Numeric inputs that fail to parse fall back to their defaults; the
    /// inputs are declared but unvalidated at this layer.
    ///
    /// # Examples
    ///
    /// ```
    /// use skilllens_core::ActionConfig;
    ///
    /// let config = ActionConfig::from_lookup(|name| match name {
    ///     "INPUT_MAX-TOPICS" => Some("3".into()),
    ///     "INPUT_FAIL-ON-PROXY-ERROR" => Some("true".into()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.max_topics, 3);
    /// assert!(config.fail_on_proxy_error);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let input = |name: &str| -> Option<String> {
            let var = format!("INPUT_{}", name.replace(' ', "_").to_uppercase());
            lookup(&var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        };

        let debug = input("enable-debug").as_deref() == Some("true")
            || lookup("RUNNER_DEBUG").as_deref() == Some("1");

        Ok(Self {
            api_url: input("skilllens-api-url").unwrap_or_else(|| DEFAULT_API_URL.into()),
            oidc_audience: input("oidc-audience").unwrap_or_else(default_oidc_audience),
            default_language: input("default-language").unwrap_or_else(default_language),
            max_topics: input("max-topics")
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_max_topics),
            min_confidence: input("min-confidence")
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_min_confidence),
            comment_marker: input("comment-marker").unwrap_or_else(default_comment_marker),
            fail_on_proxy_error: input("fail-on-proxy-error").as_deref() == Some("true"),
            debug,
            github_token: input("github-token"),
        })
    }

    /// Resolve the GitHub access token: the `GITHUB_TOKEN` environment
    /// variable wins, then the `github-token` input.
    pub fn resolve_token(&self, env_token: Option<String>) -> Option<String> {
        env_token
            .filter(|t| !t.is_empty())
            .or_else(|| self.github_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = ActionConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.oidc_audience, "skilllens.dev");
        assert_eq!(config.default_language, "English");
        assert_eq!(config.max_topics, 5);
        assert_eq!(config.min_confidence, 0.6);
        assert!(!config.fail_on_proxy_error);
        assert!(!config.debug);
        assert!(config.github_token.is_none());
    }

    #[test]
    fn inputs_override_defaults() {
        let config = ActionConfig::from_lookup(lookup_from(&[
            ("INPUT_SKILLLENS-API-URL", "https://api.test.com/v1/recommendations"),
            ("INPUT_OIDC-AUDIENCE", "skilllens.dev"),
            ("INPUT_DEFAULT-LANGUAGE", "Python"),
            ("INPUT_MAX-TOPICS", "5"),
            ("INPUT_MIN-CONFIDENCE", "0.65"),
            ("INPUT_COMMENT-MARKER", "<!-- SkillLens:v0 -->"),
            ("INPUT_FAIL-ON-PROXY-ERROR", "false"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://api.test.com/v1/recommendations");
        assert_eq!(config.default_language, "Python");
        assert_eq!(config.min_confidence, 0.65);
        assert!(!config.fail_on_proxy_error);
    }

    #[test]
    fn unparseable_numbers_fall_back_to_defaults() {
        let config = ActionConfig::from_lookup(lookup_from(&[
            ("INPUT_MAX-TOPICS", "lots"),
            ("INPUT_MIN-CONFIDENCE", ""),
        ]))
        .unwrap();
        assert_eq!(config.max_topics, 5);
        assert_eq!(config.min_confidence, 0.6);
    }

    #[test]
    fn fail_on_proxy_error_requires_exact_true() {
        let config =
            ActionConfig::from_lookup(lookup_from(&[("INPUT_FAIL-ON-PROXY-ERROR", "TRUE")]))
                .unwrap();
        assert!(!config.fail_on_proxy_error);
    }

    #[test]
    fn runner_debug_enables_diagnostics() {
        let config = ActionConfig::from_lookup(lookup_from(&[("RUNNER_DEBUG", "1")])).unwrap();
        assert!(config.debug);
    }

    #[test]
    fn token_resolution_prefers_environment() {
        let config = ActionConfig {
            github_token: Some("input-token".into()),
            ..ActionConfig::default()
        };
        assert_eq!(
            config.resolve_token(Some("env-token".into())).as_deref(),
            Some("env-token")
        );
        assert_eq!(config.resolve_token(None).as_deref(), Some("input-token"));
        assert_eq!(
            config.resolve_token(Some(String::new())).as_deref(),
            Some("input-token")
        );

        let bare = ActionConfig::default();
        assert!(bare.resolve_token(None).is_none());
    }
}
