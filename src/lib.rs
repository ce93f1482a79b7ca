/*!
Recursive regex search over directory trees, exposed as an in-process
library.

A [`SearchRequest`] names a pattern and a root path; [`search`] walks the
tree with full ignore-file semantics, scans candidate files in parallel,
and returns one [`SearchOutput`] shaped by the requested
[`OutputMode`]: matching lines with merged context regions, paths with
matches, per-file counts, or a plain file enumeration.

Output is deterministic: it always equals what a serial depth-first,
lexicographic walk would produce, regardless of worker count. An optional
head limit caps emitted items (separator lines included in `content`
mode), and an optional wall-clock timeout cancels in-flight work across
all threads, failing the call with [`SearchError::Timeout`].

```no_run
use linesift::{OutputMode, SearchRequest, search};

let request = SearchRequest {
    pattern: Some(r"fn \w+".to_string()),
    root_path: "src".into(),
    output_mode: OutputMode::Content,
    context: 2,
    line_numbers: true,
    ..SearchRequest::default()
};
for line in search(&request)?.into_lines().unwrap_or_default() {
    println!("{line}");
}
# Ok::<(), linesift::SearchError>(())
```
*/

mod cancel;
mod error;
mod executor;
mod filters;
mod output;
mod regions;
mod request;
mod scan;
mod walk;

pub use error::SearchError;
pub use output::SearchOutput;
pub use request::{OutputMode, SearchRequest};

use filters::CompiledFilters;

/// Run one search to completion and return the shaped result.
///
/// The call is synchronous and thread-safe; concurrent calls share no
/// state. Validation happens before any traversal: option combinations,
/// pattern presence, root existence, then filter compilation. Per-file
/// I/O problems during the search are logged and skipped.
///
/// # Errors
///
/// - [`SearchError::InvalidOption`]: zero `head_limit` or `timeout`,
///   unknown file type name.
/// - [`SearchError::PatternRequired`]: a scanning mode without a pattern.
/// - [`SearchError::InvalidPattern`]: the regex or glob failed to
///   compile.
/// - [`SearchError::PathNotFound`]: the root path does not exist.
/// - [`SearchError::Timeout`]: the deadline expired; partial output is
///   discarded.
pub fn search(request: &SearchRequest) -> Result<SearchOutput, SearchError> {
    request.validate()?;
    let filters = CompiledFilters::compile(request)?;
    let cancel = cancel::CancelToken::new(request.timeout);

    let candidates = walk::collect_candidates(request, &filters, &cancel)?;

    if request.output_mode == OutputMode::Files {
        let mut paths: Vec<String> = candidates
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        if let Some(limit) = request.head_limit {
            paths.truncate(limit);
        }
        return Ok(SearchOutput::Files(paths));
    }

    let Some(matcher) = filters.matcher.as_ref() else {
        return Err(SearchError::PatternRequired {
            mode: request.output_mode,
        });
    };
    executor::run(candidates, request, matcher, &cancel)
}
