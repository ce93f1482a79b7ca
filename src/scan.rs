//! Per-file line scanning.
//!
//! A [`FileScanner`] wraps a `grep` searcher and a compiled matcher and
//! produces an ordered event stream per file: match lines, context lines
//! and the breaks between context regions. The searcher owns window
//! coalescing and match-over-context precedence; a line that is both a
//! match and inside another match's window is always reported as a match.

use std::io;
use std::path::Path;

use bstr::ByteSlice;
use grep::regex::RegexMatcher;
use grep::searcher::{BinaryDetection, Searcher, SearcherBuilder, Sink, SinkContext, SinkMatch};

use crate::cancel::CancelToken;
use crate::request::{OutputMode, SearchRequest};

/// One entry in a file's scan record, in ascending line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ScanEvent {
    /// A line containing (or covered by) a match.
    Match { line_number: u64, text: String },
    /// A line emitted only because it falls inside a match's
    /// before/after window.
    Context { line_number: u64, text: String },
    /// The gap between two non-adjacent context regions.
    Break,
}

/// The scan record for one file.
#[derive(Debug, Default)]
pub(crate) struct FileScan {
    pub(crate) events: Vec<ScanEvent>,
    pub(crate) match_count: u64,
}

/// How much of the scan record a mode needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanMode {
    /// Collect every event for `content` rendering.
    Collect,
    /// Stop the file at the first match (`files_with_matches`).
    FirstMatch,
    /// Count matching lines without collecting text (`count`).
    CountOnly,
}

impl ScanMode {
    pub(crate) fn for_output(mode: OutputMode) -> ScanMode {
        match mode {
            OutputMode::Content => ScanMode::Collect,
            OutputMode::Count => ScanMode::CountOnly,
            _ => ScanMode::FirstMatch,
        }
    }
}

/// A reusable scanner; one per worker thread.
pub(crate) struct FileScanner {
    searcher: Searcher,
    matcher: RegexMatcher,
    multiline: bool,
    mode: ScanMode,
}

impl FileScanner {
    pub(crate) fn new(request: &SearchRequest, matcher: RegexMatcher) -> FileScanner {
        let mode = ScanMode::for_output(request.output_mode);
        // Context windows only matter when the record is rendered.
        let (before, after) = match mode {
            ScanMode::Collect => request.resolved_context(),
            _ => (0, 0),
        };
        let searcher = SearcherBuilder::new()
            .line_number(true)
            .before_context(before as usize)
            .after_context(after as usize)
            .multi_line(request.multiline)
            .binary_detection(BinaryDetection::quit(b'\x00'))
            .build();
        FileScanner {
            searcher,
            matcher,
            multiline: request.multiline,
            mode,
        }
    }

    /// Scan one file into its event record.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors opening or reading the file, and an
    /// `Interrupted` error when the cancellation token flips mid-file.
    pub(crate) fn scan(&mut self, path: &Path, cancel: &CancelToken) -> io::Result<FileScan> {
        let mut sink = EventSink {
            events: Vec::new(),
            match_count: 0,
            multiline: self.multiline,
            mode: self.mode,
            cancel,
        };
        self.searcher.search_path(&self.matcher, path, &mut sink)?;
        Ok(FileScan {
            events: sink.events,
            match_count: sink.match_count,
        })
    }
}

/// Sink that records searcher callbacks as [`ScanEvent`]s.
struct EventSink<'c> {
    events: Vec<ScanEvent>,
    match_count: u64,
    multiline: bool,
    mode: ScanMode,
    cancel: &'c CancelToken,
}

impl Sink for EventSink<'_> {
    type Error = io::Error;

    fn matched(&mut self, _searcher: &Searcher, mat: &SinkMatch<'_>) -> io::Result<bool> {
        self.cancel.check()?;

        // A multiline match arrives as one callback spanning whole lines;
        // every covered line counts as a match line.
        let lines: Vec<&[u8]> = mat.bytes().lines().collect();
        let spanned = lines.len().max(1) as u64;
        self.match_count += if self.multiline { 1 } else { spanned };

        match self.mode {
            ScanMode::FirstMatch => Ok(false),
            ScanMode::CountOnly => Ok(true),
            ScanMode::Collect => {
                let first = mat.line_number().unwrap_or(0);
                for (offset, line) in lines.iter().enumerate() {
                    self.events.push(ScanEvent::Match {
                        line_number: first + offset as u64,
                        text: line.to_str_lossy().into_owned(),
                    });
                }
                Ok(true)
            }
        }
    }

    fn context(&mut self, _searcher: &Searcher, ctx: &SinkContext<'_>) -> io::Result<bool> {
        self.cancel.check()?;
        if self.mode == ScanMode::Collect {
            self.events.push(ScanEvent::Context {
                line_number: ctx.line_number().unwrap_or(0),
                text: line_text(ctx.bytes()),
            });
        }
        Ok(true)
    }

    fn context_break(&mut self, _searcher: &Searcher) -> io::Result<bool> {
        // Breaks are only meaningful between regions, never before the
        // first one.
        if !self.events.is_empty() && self.events.last() != Some(&ScanEvent::Break) {
            self.events.push(ScanEvent::Break);
        }
        Ok(true)
    }
}

/// One line's text with its terminator stripped.
fn line_text(bytes: &[u8]) -> String {
    let mut end = bytes.len();
    if end > 0 && bytes[end - 1] == b'\n' {
        end -= 1;
        if end > 0 && bytes[end - 1] == b'\r' {
            end -= 1;
        }
    }
    bytes[..end].to_str_lossy().into_owned()
}
