//! Glob filter compilation.
//!
//! Patterns follow the usual wildcard grammar: `*`, `?`, `[abc]`, `**`
//! and `{a,b,c}` brace alternation. A pattern containing no separator
//! matches basenames anywhere under the root; one with a separator is
//! rooted at the search root. Matching is case-sensitive and performed
//! against the root-relative path.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::error::SearchError;

/// Compile a glob filter.
///
/// # Errors
///
/// `InvalidPattern` when the glob is malformed.
pub(crate) fn compile_glob(glob: &str) -> Result<GlobSet, SearchError> {
    let rooted = rooted_pattern(glob);
    let compiled = GlobBuilder::new(&rooted)
        .literal_separator(true)
        .build()
        .map_err(|err| SearchError::InvalidPattern(format!("invalid glob `{glob}`: {err}")))?;
    let mut builder = GlobSetBuilder::new();
    builder.add(compiled);
    builder
        .build()
        .map_err(|err| SearchError::InvalidPattern(format!("invalid glob `{glob}`: {err}")))
}

/// A separator-free pattern matches basenames at any depth.
fn rooted_pattern(glob: &str) -> String {
    let normalized = glob.replace('\\', "/");
    if normalized.contains('/') {
        normalized
    } else {
        format!("**/{normalized}")
    }
}
