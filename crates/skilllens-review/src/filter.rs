use skilllens_core::RunnerLog;

/// Characters that make up pure-approval feedback: a handful of reaction
/// emoji plus the letters of `lgtm`.
const APPROVAL_ALPHABET: [char; 10] = ['👍', '👎', '✅', '❌', '🎉', '💯', 'l', 'g', 't', 'm'];

/// Maximum length (in chars) at which an all-approval body counts as noise.
const NOISE_MAX_LEN: usize = 5;

/// Classify a feedback body as noise.
///
/// Noise is an empty (or whitespace-only) body, or a short body — at most
/// five characters after trimming and lower-casing — made up entirely of
/// approval glyphs and `lgtm` letters. Anything longer, or containing any
/// other character, is substantive.
///
/// # Examples
///
/// ```
/// use skilllens_core::RunnerLog;
/// use skilllens_review::filter::is_noisy;
///
/// let log = RunnerLog::new(false);
/// assert!(is_noisy("LGTM", &log));
/// assert!(is_noisy("👍", &log));
/// assert!(!is_noisy("This needs improvement", &log));
/// ```
pub fn is_noisy(text: &str, log: &RunnerLog) -> bool {
    let trimmed = text.trim().to_lowercase();
    if trimmed.is_empty() {
        log.debug("Filtered noisy comment: empty");
        return true;
    }
    if trimmed.chars().count() <= NOISE_MAX_LEN
        && trimmed.chars().all(|c| APPROVAL_ALPHABET.contains(&c))
    {
        log.debug(format!("Filtered noisy comment: \"{trimmed}\""));
        return true;
    }
    false
}
