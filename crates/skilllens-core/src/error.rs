/// Errors that can occur across the SkillLens action.
///
/// Each variant wraps a specific error domain. Library crates use this type
/// directly; the binary crate converts to a fatal workflow report at the
/// boundary. [`SkillLensError::Proxy`] is the one recoverable-by-policy
/// variant: the orchestrator downgrades it to a warning unless the
/// `fail-on-proxy-error` input is set.
///
/// # Examples
///
/// ```
/// use skilllens_core::SkillLensError;
///
/// let err = SkillLensError::Config("GITHUB_TOKEN is required".into());
/// assert!(err.to_string().contains("GITHUB_TOKEN"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SkillLensError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// GitHub API failure (feedback fetch or comment upsert).
    #[error("GitHub API error: {0}")]
    Github(String),

    /// OIDC id-token acquisition failure.
    #[error("OIDC token error: {0}")]
    Oidc(String),

    /// SkillLens proxy failure (network error or non-success status).
    /// The message is pre-formatted for the warning/failure report.
    #[error("{0}")]
    Proxy(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A convenience `Result` type for SkillLens operations.
pub type Result<T> = std::result::Result<T, SkillLensError>;
