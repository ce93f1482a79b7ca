//! Parallel execution of per-file scans with deterministic reassembly.
//!
//! Candidates are fed to a scoped worker pool through a channel; each
//! worker owns a scanner and produces one fragment per file, keyed by the
//! file's walk-order index. The assembler releases fragments in strictly
//! ascending index order, buffering out-of-order producers, so output is
//! identical regardless of worker interleaving. Head-limit accounting
//! happens in the assembler, in walk order; reaching the cap flips the
//! shared cancellation token and remaining workers wind down.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use crossbeam_channel::{Receiver, RecvTimeoutError, bounded, unbounded};
use grep::regex::RegexMatcher;

use crate::cancel::CancelToken;
use crate::error::SearchError;
use crate::output::SearchOutput;
use crate::regions::{REGION_SEPARATOR, render_file};
use crate::request::{OutputMode, SearchRequest};
use crate::scan::FileScanner;

/// The per-file unit of output, produced by workers and reassembled in
/// walk order.
enum Fragment {
    /// Rendered `content` lines, including intra-file separators.
    Lines(Vec<String>),
    /// A path that matched (`files_with_matches`).
    MatchedPath(String),
    /// A path with its positive match count (`count`).
    Count(String, u64),
    /// Nothing to contribute: no match, or the file was skipped.
    Skip,
}

/// Scan every candidate and assemble the shaped result.
///
/// Only the scanning modes (`content`, `files_with_matches`, `count`)
/// come through here; `files` mode is resolved from the walk alone.
///
/// # Errors
///
/// `Timeout` when the deadline expires before assembly completes;
/// partial results are discarded.
pub(crate) fn run(
    candidates: Vec<PathBuf>,
    request: &SearchRequest,
    matcher: &RegexMatcher,
    cancel: &CancelToken,
) -> Result<SearchOutput, SearchError> {
    let mut assembly = Assembly::new(request);
    if candidates.is_empty() {
        return Ok(assembly.finish());
    }

    let workers = worker_count(candidates.len());
    let (job_tx, job_rx) = bounded(candidates.len());
    for job in candidates.into_iter().enumerate() {
        // The channel holds every job; this never blocks.
        let _ = job_tx.send(job);
    }
    drop(job_tx);

    let (result_tx, result_rx) = unbounded();

    std::thread::scope(|scope| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let mut scanner = FileScanner::new(request, matcher.clone());
            scope.spawn(move || {
                for (index, path) in job_rx.iter() {
                    if cancel.should_stop() {
                        break;
                    }
                    let fragment = match scan_fragment(&mut scanner, &path, request, cancel) {
                        Ok(fragment) => fragment,
                        Err(err) if err.kind() == io::ErrorKind::Interrupted => break,
                        Err(err) => {
                            // Unreadable files are skipped, not fatal.
                            log::warn!("skipping {}: {err}", path.display());
                            Fragment::Skip
                        }
                    };
                    if result_tx.send((index, fragment)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(result_tx);
        drop(job_rx);

        assembly.consume(result_rx, cancel);
    });

    if cancel.timed_out() {
        return Err(cancel.timeout_error());
    }
    Ok(assembly.finish())
}

/// Scan one file into its fragment for the requested mode.
fn scan_fragment(
    scanner: &mut FileScanner,
    path: &Path,
    request: &SearchRequest,
    cancel: &CancelToken,
) -> io::Result<Fragment> {
    cancel.check()?;
    let scan = scanner.scan(path, cancel)?;
    if scan.match_count == 0 {
        return Ok(Fragment::Skip);
    }
    let display = path.display().to_string();
    Ok(match request.output_mode {
        OutputMode::Content => {
            Fragment::Lines(render_file(&display, &scan.events, request.line_numbers))
        }
        OutputMode::Count => Fragment::Count(display, scan.match_count),
        OutputMode::FilesWithMatches => Fragment::MatchedPath(display),
        // Files mode enumerates without scanning and never enters the
        // executor.
        OutputMode::Files => unreachable!("files mode is resolved before scanning"),
    })
}

fn worker_count(jobs: usize) -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .clamp(1, jobs.max(1))
}

/// In-order reassembly buffer plus head-limit accounting.
struct Assembly {
    mode: OutputMode,
    head_limit: Option<usize>,
    pending: BTreeMap<usize, Fragment>,
    next_index: usize,
    lines: Vec<String>,
    paths: Vec<String>,
    counts: Vec<(String, u64)>,
    full: bool,
}

impl Assembly {
    fn new(request: &SearchRequest) -> Assembly {
        Assembly {
            mode: request.output_mode,
            head_limit: request.head_limit,
            pending: BTreeMap::new(),
            next_index: 0,
            lines: Vec::new(),
            paths: Vec::new(),
            counts: Vec::new(),
            full: false,
        }
    }

    /// Drain worker results until the channel closes, the head limit is
    /// satisfied, or the deadline expires.
    fn consume(&mut self, results: Receiver<(usize, Fragment)>, cancel: &CancelToken) {
        loop {
            let (index, fragment) = match cancel.deadline() {
                Some(deadline) => match results.recv_deadline(deadline) {
                    Ok(message) => message,
                    Err(RecvTimeoutError::Timeout) => {
                        cancel.mark_timed_out();
                        return;
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                },
                None => match results.recv() {
                    Ok(message) => message,
                    Err(_) => break,
                },
            };
            if cancel.should_stop() && cancel.timed_out() {
                return;
            }
            self.pending.insert(index, fragment);
            self.release();
            if self.full {
                // Natural stop: the cap is met, nothing further is
                // published.
                cancel.stop();
                return;
            }
        }
        self.release();
    }

    /// Release the in-order prefix of buffered fragments.
    fn release(&mut self) {
        while !self.full {
            let Some(fragment) = self.pending.remove(&self.next_index) else {
                break;
            };
            self.next_index += 1;
            self.append(fragment);
        }
    }

    fn append(&mut self, fragment: Fragment) {
        match fragment {
            Fragment::Skip => {}
            Fragment::Lines(lines) => self.append_lines(lines),
            Fragment::MatchedPath(path) => {
                if self.reserve_item() {
                    self.paths.push(path);
                }
            }
            Fragment::Count(path, count) => {
                if self.reserve_item() {
                    self.counts.push((path, count));
                }
            }
        }
    }

    /// Account for one path or count item against the head limit.
    fn reserve_item(&mut self) -> bool {
        let limit = self.head_limit.unwrap_or(usize::MAX);
        let used = match self.mode {
            OutputMode::Count => self.counts.len(),
            _ => self.paths.len(),
        };
        if used >= limit {
            self.full = true;
            return false;
        }
        if used + 1 >= limit {
            self.full = true;
        }
        true
    }

    /// Append one file's rendered lines, inserting the inter-file
    /// separator and charging every emitted line, separators included,
    /// against the head limit. A separator is only emitted when at least
    /// one more line fits after it, so `--` never trails the output.
    fn append_lines(&mut self, fragment: Vec<String>) {
        if fragment.is_empty() {
            return;
        }
        let limit = self.head_limit.unwrap_or(usize::MAX);
        if !self.lines.is_empty() {
            if self.lines.len() + 1 >= limit {
                self.full = true;
                return;
            }
            self.lines.push(REGION_SEPARATOR.to_string());
        }
        for line in fragment {
            if self.lines.len() >= limit
                || (line == REGION_SEPARATOR && self.lines.len() + 1 >= limit)
            {
                self.full = true;
                return;
            }
            self.lines.push(line);
        }
        if self.lines.len() >= limit {
            self.full = true;
        }
    }

    fn finish(self) -> SearchOutput {
        match self.mode {
            OutputMode::Content => SearchOutput::Lines(self.lines),
            OutputMode::Count => SearchOutput::Counts(self.counts.into_iter().collect()),
            OutputMode::FilesWithMatches => SearchOutput::Files(self.paths),
            OutputMode::Files => unreachable!("files mode is resolved before scanning"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::build_matcher;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn write_tree(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            if let Some(parent) = Path::new(name).parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(dir.path().join(parent)).unwrap();
            }
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    fn candidates_of(dir: &TempDir, names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| dir.path().join(n)).collect()
    }

    fn run_mode(
        dir: &TempDir,
        names: &[&str],
        pattern: &str,
        request: SearchRequest,
    ) -> Result<SearchOutput, SearchError> {
        let matcher = build_matcher(pattern, false, false, false).unwrap();
        let request = SearchRequest {
            pattern: Some(pattern.to_string()),
            root_path: dir.path().to_path_buf(),
            ..request
        };
        run(
            candidates_of(dir, names),
            &request,
            &matcher,
            &CancelToken::new(request.timeout),
        )
    }

    #[test]
    fn content_output_is_ordered_with_file_separators() {
        let dir = write_tree(&[
            ("a.txt", "hit one\nmiss\n"),
            ("b.txt", "miss\nhit two\n"),
            ("c.txt", "nothing here\n"),
        ]);
        let request = SearchRequest {
            output_mode: OutputMode::Content,
            context: 1,
            line_numbers: true,
            ..SearchRequest::default()
        };
        let lines = run_mode(&dir, &["a.txt", "b.txt", "c.txt"], "hit", request)
            .unwrap()
            .into_lines()
            .unwrap();

        let a = dir.path().join("a.txt").display().to_string();
        let b = dir.path().join("b.txt").display().to_string();
        assert_eq!(
            lines,
            vec![
                format!("{a}:1:hit one"),
                format!("{a}-2-miss"),
                "--".to_string(),
                format!("{b}-1-miss"),
                format!("{b}:2:hit two"),
            ]
        );
    }

    #[test]
    fn head_limit_counts_separators_and_never_trails_one() {
        let dir = write_tree(&[
            ("a.txt", "hit\n"),
            ("b.txt", "hit\n"),
            ("c.txt", "hit\n"),
        ]);
        let request = SearchRequest {
            output_mode: OutputMode::Content,
            head_limit: Some(2),
            ..SearchRequest::default()
        };
        let lines = run_mode(&dir, &["a.txt", "b.txt", "c.txt"], "hit", request)
            .unwrap()
            .into_lines()
            .unwrap();

        // One match line fits; the separator would trail, so it is
        // withheld.
        assert!(lines.len() <= 2);
        assert_ne!(lines.last().map(String::as_str), Some("--"));
    }

    #[test]
    fn head_limit_truncates_paths_deterministically() {
        let dir = write_tree(&[
            ("a.txt", "hit\n"),
            ("b.txt", "hit\n"),
            ("c.txt", "hit\n"),
        ]);
        let request = SearchRequest {
            head_limit: Some(2),
            ..SearchRequest::default()
        };
        let paths = run_mode(&dir, &["a.txt", "b.txt", "c.txt"], "hit", request)
            .unwrap()
            .into_files()
            .unwrap();
        assert_eq!(
            paths,
            vec![
                dir.path().join("a.txt").display().to_string(),
                dir.path().join("b.txt").display().to_string(),
            ]
        );
    }

    #[test]
    fn count_mode_maps_paths_to_positive_counts() {
        let dir = write_tree(&[
            ("two.txt", "hit\nhit\n"),
            ("zero.txt", "nope\n"),
            ("one.txt", "hit\n"),
        ]);
        let request = SearchRequest {
            output_mode: OutputMode::Count,
            ..SearchRequest::default()
        };
        let counts = run_mode(&dir, &["one.txt", "two.txt", "zero.txt"], "hit", request)
            .unwrap()
            .into_counts()
            .unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(
            counts.get(&dir.path().join("two.txt").display().to_string()),
            Some(&2)
        );
        assert_eq!(
            counts.get(&dir.path().join("one.txt").display().to_string()),
            Some(&1)
        );
    }

    #[test]
    fn expired_deadline_surfaces_timeout() {
        let dir = write_tree(&[("a.txt", "hit\n"), ("b.txt", "hit\n")]);
        let request = SearchRequest {
            output_mode: OutputMode::Content,
            timeout: Some(Duration::from_nanos(1)),
            ..SearchRequest::default()
        };
        std::thread::sleep(Duration::from_millis(2));
        let err = run_mode(&dir, &["a.txt", "b.txt"], "hit", request).unwrap_err();
        assert!(err.is_timeout());
    }
}
