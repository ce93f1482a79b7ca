//! The search request record and its validation.
//!
//! A request is assembled by the caller (or a binding layer), validated
//! once at the entry point, and passed immutably through the pipeline.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::SearchError;

/// The shape of the result produced by a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputMode {
    /// Matching lines (with optional context) formatted as
    /// `path:lineno:text`, with `--` separators between regions.
    Content,
    /// Paths of files containing at least one match, in walk order.
    #[default]
    FilesWithMatches,
    /// Per-file match counts; files with zero matches are omitted.
    Count,
    /// Every candidate file in walk order, without scanning contents.
    /// The pattern is ignored in this mode.
    Files,
}

impl OutputMode {
    /// The wire name of this mode, as used by binding layers.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputMode::Content => "content",
            OutputMode::FilesWithMatches => "files_with_matches",
            OutputMode::Count => "count",
            OutputMode::Files => "files",
        }
    }

    /// True for the modes that require a pattern to be present.
    pub(crate) fn requires_pattern(self) -> bool {
        !matches!(self, OutputMode::Files)
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "content" => Ok(OutputMode::Content),
            "files_with_matches" => Ok(OutputMode::FilesWithMatches),
            "count" => Ok(OutputMode::Count),
            "files" => Ok(OutputMode::Files),
            other => Err(SearchError::InvalidOption(format!(
                "unknown output mode `{other}`"
            ))),
        }
    }
}

/// A single search request.
///
/// Construct with struct-update syntax over [`SearchRequest::default`]:
///
/// ```
/// use linesift::{OutputMode, SearchRequest};
///
/// let request = SearchRequest {
///     pattern: Some("fn main".to_string()),
///     root_path: "src".into(),
///     output_mode: OutputMode::Content,
///     context: 2,
///     ..SearchRequest::default()
/// };
/// assert_eq!(request.resolved_context(), (2, 2));
/// ```
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Regex (or literal, see [`literal`](Self::literal)) pattern.
    /// Required for every mode except [`OutputMode::Files`].
    pub pattern: Option<String>,
    /// Root of the traversal. May be a directory or a single file.
    /// Relative paths are resolved against the process working directory.
    pub root_path: PathBuf,
    /// Glob filter applied to candidate paths. A pattern without `/`
    /// matches basenames anywhere under the root; a pattern with `/` is
    /// rooted at `root_path`. Case-sensitive.
    pub glob: Option<String>,
    /// File type names. Multiple names union their extension sets; the
    /// union is intersected with `glob`. Empty disables the type filter.
    pub types: Vec<String>,
    /// Result shape. Defaults to [`OutputMode::FilesWithMatches`].
    pub output_mode: OutputMode,
    /// Context lines both before and after each match (`-C`).
    pub context: u32,
    /// Context lines before each match (`-B`); overrides `context`.
    pub before_context: Option<u32>,
    /// Context lines after each match (`-A`); overrides `context`.
    pub after_context: Option<u32>,
    /// Include 1-based line numbers in `content` output (`-n`).
    pub line_numbers: bool,
    /// Case-insensitive matching (`-i`).
    pub case_insensitive: bool,
    /// Treat the pattern as a literal string instead of a regex.
    pub literal: bool,
    /// Allow matches to span lines; `.` matches `\n`.
    pub multiline: bool,
    /// Search hidden files and directories.
    pub include_hidden: bool,
    /// Disable all ignore files (`.gitignore`, `.ignore`, global ignore).
    pub no_ignore: bool,
    /// Skip files larger than this many bytes.
    pub max_filesize: Option<u64>,
    /// Maximum directory depth to descend. `Some(0)` means the root only.
    pub max_depth: Option<usize>,
    /// Cap on emitted output items. In `content` mode this counts match
    /// lines, context lines and `--` separators alike. Must be positive.
    pub head_limit: Option<usize>,
    /// Wall-clock budget for the whole call. On expiry the call fails
    /// with [`SearchError::Timeout`] and partial results are discarded.
    pub timeout: Option<Duration>,
}

impl Default for SearchRequest {
    fn default() -> SearchRequest {
        SearchRequest {
            pattern: None,
            root_path: PathBuf::from("."),
            glob: None,
            types: Vec::new(),
            output_mode: OutputMode::default(),
            context: 0,
            before_context: None,
            after_context: None,
            line_numbers: false,
            case_insensitive: false,
            literal: false,
            multiline: false,
            include_hidden: false,
            no_ignore: false,
            max_filesize: None,
            max_depth: None,
            head_limit: None,
            timeout: None,
        }
    }
}

impl SearchRequest {
    /// Resolve `-B`/`-A`/`-C` into effective (before, after) counts.
    /// Explicit `before_context`/`after_context` win over `context`.
    pub fn resolved_context(&self) -> (u32, u32) {
        (
            self.before_context.unwrap_or(self.context),
            self.after_context.unwrap_or(self.context),
        )
    }

    /// Check option combinations that do not need the filesystem.
    ///
    /// # Errors
    ///
    /// `InvalidOption` for a zero `head_limit` or zero `timeout`;
    /// `PatternRequired` when the mode scans content but no pattern was
    /// supplied.
    pub(crate) fn validate(&self) -> Result<(), SearchError> {
        if self.head_limit == Some(0) {
            return Err(SearchError::InvalidOption(
                "head_limit must be positive".to_string(),
            ));
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(SearchError::InvalidOption(
                "timeout must be positive".to_string(),
            ));
        }
        if self.output_mode.requires_pattern() && self.pattern.is_none() {
            return Err(SearchError::PatternRequired {
                mode: self.output_mode,
            });
        }
        Ok(())
    }
}
