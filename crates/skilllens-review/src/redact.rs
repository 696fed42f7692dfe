use std::sync::LazyLock;

use regex::Regex;
use skilllens_core::RunnerLog;

/// Default cap on fenced-block content passed through to the proxy.
pub const DEFAULT_FENCE_LIMIT: usize = 200;

// Non-greedy so each delimiter pair closes the shortest span; dot-matches-
// newline because fenced content is almost always multi-line.
static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").expect("fence pattern"));

/// Truncate oversized fenced code blocks in a feedback body.
///
/// Each ```-delimited region whose inner content exceeds `max_len`
/// characters is rewritten as its first `max_len` characters plus `…`,
/// re-wrapped in the delimiters. Regions at or under the limit, and text
/// without fences, pass through unchanged.
///
/// # Examples
///
/// ```
/// use skilllens_core::RunnerLog;
/// use skilllens_review::redact::redact_fences;
///
/// let log = RunnerLog::new(false);
/// let short = "```console\necho \"hello\"\n```";
/// assert_eq!(redact_fences(short, 200, &log), short);
///
/// let long = format!("```{}```", "x".repeat(300));
/// let redacted = redact_fences(&long, 200, &log);
/// assert!(redacted.contains('…'));
/// assert!(redacted.len() < long.len());
/// ```
pub fn redact_fences(text: &str, max_len: usize, log: &RunnerLog) -> String {
    let mut trimmed_blocks = 0usize;
    let result = FENCE.replace_all(text, |caps: &regex::Captures<'_>| {
        let inner = &caps[1];
        if inner.chars().count() <= max_len {
            return caps[0].to_string();
        }
        trimmed_blocks += 1;
        let head: String = inner.chars().take(max_len).collect();
        format!("```{head}…```")
    });

    if trimmed_blocks > 0 {
        log.debug(format!("Trimmed {trimmed_blocks} oversized code fence(s)"));
    }
    result.into_owned()
}
