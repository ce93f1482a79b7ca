//! The shaped result of a search call.

use std::collections::HashMap;

/// The result of a search, tagged by the output shape the request asked
/// for. Consumers branch on the variant matching their `OutputMode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutput {
    /// File paths in walk order. Produced by `Files` and
    /// `FilesWithMatches` modes.
    Files(Vec<String>),
    /// Formatted output lines (matches, context and `--` separators).
    /// Produced by `Content` mode.
    Lines(Vec<String>),
    /// Per-file match counts. Every count is at least one; files without
    /// matches are omitted. Produced by `Count` mode.
    Counts(HashMap<String, u64>),
}

impl SearchOutput {
    /// The number of items in the result. For `Lines` this includes
    /// separator lines, mirroring the head-limit accounting.
    pub fn len(&self) -> usize {
        match self {
            SearchOutput::Files(paths) => paths.len(),
            SearchOutput::Lines(lines) => lines.len(),
            SearchOutput::Counts(counts) => counts.len(),
        }
    }

    /// True if the search produced nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The path list, if this is a `Files` result.
    pub fn into_files(self) -> Option<Vec<String>> {
        match self {
            SearchOutput::Files(paths) => Some(paths),
            _ => None,
        }
    }

    /// The formatted lines, if this is a `Lines` result.
    pub fn into_lines(self) -> Option<Vec<String>> {
        match self {
            SearchOutput::Lines(lines) => Some(lines),
            _ => None,
        }
    }

    /// The per-file counts, if this is a `Counts` result.
    pub fn into_counts(self) -> Option<HashMap<String, u64>> {
        match self {
            SearchOutput::Counts(counts) => Some(counts),
            _ => None,
        }
    }
}
