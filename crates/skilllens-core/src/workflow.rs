use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::{Result, SkillLensError};

/// Per-run logger that speaks the Actions runner's workflow-command syntax.
///
/// Debug tracing is gated by a flag threaded in at construction, never by
/// module-level state: every component receives the logger for the run it
/// belongs to.
///
/// # Examples
///
/// ```
/// use skilllens_core::RunnerLog;
///
/// let log = RunnerLog::new(true);
/// log.debug("Fetching review data");
/// log.info("No review content to analyze; exiting.");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RunnerLog {
    debug_enabled: bool,
}

impl RunnerLog {
    /// Create a logger; `debug_enabled` gates all [`RunnerLog::debug`] output.
    pub fn new(debug_enabled: bool) -> Self {
        Self { debug_enabled }
    }

    /// Emit a `::debug::` diagnostic line, when enabled.
    pub fn debug(&self, message: impl AsRef<str>) {
        if self.debug_enabled {
            println!("::debug::{}", escape_data(message.as_ref()));
        }
    }

    /// Emit an informational line.
    pub fn info(&self, message: impl AsRef<str>) {
        println!("{}", message.as_ref());
    }

    /// Emit a `::warning::` annotation.
    pub fn warning(&self, message: impl AsRef<str>) {
        println!("::warning::{}", escape_data(message.as_ref()));
    }

    /// Emit an `::error::` annotation. The caller decides the exit code.
    pub fn error(&self, message: impl AsRef<str>) {
        println!("::error::{}", escape_data(message.as_ref()));
    }
}

/// Escape a workflow-command data payload (`%`, CR and LF carry meaning for
/// the runner's command parser).
fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Step-output sink backed by the `GITHUB_OUTPUT` file.
///
/// # Examples
///
/// ```no_run
/// use skilllens_core::Outputs;
///
/// let outputs = Outputs::from_env().unwrap();
/// outputs.set("comment-url", "https://github.com/o/r/pull/1#issuecomment-2").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Outputs {
    path: PathBuf,
}

// Delimiter for the heredoc record form. Output values here are JSON arrays
// and URLs, which cannot contain this line.
const OUTPUT_DELIMITER: &str = "SKILLLENS_OUTPUT";

impl Outputs {
    /// Resolve the sink from the `GITHUB_OUTPUT` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`SkillLensError::Config`] when the variable is not set.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var("GITHUB_OUTPUT").map_err(|_| {
            SkillLensError::Config("GITHUB_OUTPUT is not set".into())
        })?;
        Ok(Self::new(PathBuf::from(path)))
    }

    /// Create a sink writing to an explicit file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Append one named output record.
    ///
    /// Single-line values use the `name=value` form; values with newlines
    /// use the heredoc form the runner also accepts.
    ///
    /// # Errors
    ///
    /// Returns [`SkillLensError::Io`] when the output file cannot be
    /// appended to.
    pub fn set(&self, name: &str, value: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if value.contains('\n') {
            writeln!(file, "{name}<<{OUTPUT_DELIMITER}")?;
            writeln!(file, "{value}")?;
            writeln!(file, "{OUTPUT_DELIMITER}")?;
        } else {
            writeln!(file, "{name}={value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_command_payload() {
        assert_eq!(escape_data("plain"), "plain");
        assert_eq!(escape_data("50% done\nnext"), "50%25 done%0Anext");
    }

    #[test]
    fn writes_simple_output_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output");
        let outputs = Outputs::new(path.clone());
        outputs.set("comment-url", "https://example.com/1").unwrap();
        outputs.set("topics-json", "[]").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "comment-url=https://example.com/1\ntopics-json=[]\n"
        );
    }

    #[test]
    fn writes_multiline_output_as_heredoc() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output");
        let outputs = Outputs::new(path.clone());
        outputs.set("summary", "line one\nline two").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "summary<<SKILLLENS_OUTPUT\nline one\nline two\nSKILLLENS_OUTPUT\n"
        );
    }
}
