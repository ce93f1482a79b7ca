//! Candidate discovery.
//!
//! The walker traverses the root in parallel with full ignore-file
//! semantics, applies the compiled glob and type filters, and hands back
//! one sorted path list. Sorting by path equals the depth-first,
//! lexicographic-per-directory order a serial walk would produce, which
//! is the order every downstream stage keys on.

use std::path::{Path, PathBuf};

use ignore::{DirEntry, ParallelVisitor, ParallelVisitorBuilder, WalkBuilder, WalkState};
use parking_lot::Mutex;

use crate::cancel::CancelToken;
use crate::error::SearchError;
use crate::filters::CompiledFilters;
use crate::request::SearchRequest;

/// Per-visitor buffer size before flushing into the shared list.
const CANDIDATE_BUFFER: usize = 64;

/// Collect every candidate file under the request's root, sorted in walk
/// order.
///
/// A root that is itself a regular file short-circuits the walk: ignore
/// and hidden rules do not apply to an explicitly named file, but glob
/// (against the basename) and type filters still do.
///
/// # Errors
///
/// `PathNotFound` if the root does not exist or cannot be inspected;
/// `Timeout` if the deadline expired during traversal.
pub(crate) fn collect_candidates(
    request: &SearchRequest,
    filters: &CompiledFilters,
    cancel: &CancelToken,
) -> Result<Vec<PathBuf>, SearchError> {
    let root = request.root_path.as_path();
    let metadata =
        std::fs::metadata(root).map_err(|_| SearchError::PathNotFound(root.to_path_buf()))?;

    if metadata.is_file() {
        let basename = root.file_name().map_or(root, Path::new);
        if filters.accepts(basename) {
            return Ok(vec![root.to_path_buf()]);
        }
        return Ok(Vec::new());
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(!request.include_hidden)
        .parents(!request.no_ignore)
        .ignore(!request.no_ignore)
        .git_ignore(!request.no_ignore)
        .git_global(!request.no_ignore)
        .git_exclude(!request.no_ignore)
        .follow_links(false)
        .max_depth(request.max_depth)
        .max_filesize(request.max_filesize)
        .threads(0);

    let shared = Mutex::new(Vec::new());
    let mut collector = CandidateCollector {
        root,
        filters,
        cancel,
        shared: &shared,
    };
    builder.build_parallel().visit(&mut collector);

    if cancel.timed_out() {
        return Err(cancel.timeout_error());
    }

    let mut candidates = shared.into_inner();
    candidates.sort();
    log::debug!(
        "walk of {} produced {} candidates",
        root.display(),
        candidates.len()
    );
    Ok(candidates)
}

struct CandidateCollector<'s> {
    root: &'s Path,
    filters: &'s CompiledFilters,
    cancel: &'s CancelToken,
    shared: &'s Mutex<Vec<PathBuf>>,
}

impl<'s> ParallelVisitorBuilder<'s> for CandidateCollector<'s> {
    fn build(&mut self) -> Box<dyn ParallelVisitor + 's> {
        Box::new(CandidateVisitor {
            root: self.root,
            filters: self.filters,
            cancel: self.cancel,
            shared: self.shared,
            buffer: Vec::with_capacity(CANDIDATE_BUFFER),
        })
    }
}

struct CandidateVisitor<'s> {
    root: &'s Path,
    filters: &'s CompiledFilters,
    cancel: &'s CancelToken,
    shared: &'s Mutex<Vec<PathBuf>>,
    buffer: Vec<PathBuf>,
}

impl CandidateVisitor<'_> {
    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            self.shared.lock().append(&mut self.buffer);
        }
    }
}

impl Drop for CandidateVisitor<'_> {
    fn drop(&mut self) {
        self.flush();
    }
}

impl ParallelVisitor for CandidateVisitor<'_> {
    fn visit(&mut self, entry: Result<DirEntry, ignore::Error>) -> WalkState {
        if self.cancel.should_stop() {
            self.flush();
            return WalkState::Quit;
        }
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                // Traversal errors are diagnostics, never call failures.
                log::warn!("walk error: {err}");
                return WalkState::Continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            return WalkState::Continue;
        }
        let path = entry.into_path();
        let accepted = {
            let relative = path.strip_prefix(self.root).unwrap_or(&path);
            self.filters.accepts(relative)
        };
        if accepted {
            self.buffer.push(path);
            if self.buffer.len() >= CANDIDATE_BUFFER {
                self.flush();
            }
        }
        WalkState::Continue
    }
}
