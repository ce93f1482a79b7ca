//! Rendering of per-file scan records into `content`-mode lines.
//!
//! Match lines use `:` as the field separator, context lines use `-`, and
//! the literal `--` stands between non-adjacent regions. Separators are
//! never emitted leading or trailing; the executor owns the `--` between
//! files.

use crate::scan::ScanEvent;

/// The literal separator emitted between regions and between files.
pub(crate) const REGION_SEPARATOR: &str = "--";

/// Render one file's events into formatted output lines.
pub(crate) fn render_file(path: &str, events: &[ScanEvent], line_numbers: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(events.len());
    let mut pending_break = false;
    for event in events {
        match event {
            ScanEvent::Break => {
                if !lines.is_empty() {
                    pending_break = true;
                }
            }
            ScanEvent::Match { line_number, text } => {
                if std::mem::take(&mut pending_break) {
                    lines.push(REGION_SEPARATOR.to_string());
                }
                lines.push(if line_numbers {
                    format!("{path}:{line_number}:{text}")
                } else {
                    format!("{path}:{text}")
                });
            }
            ScanEvent::Context { line_number, text } => {
                if std::mem::take(&mut pending_break) {
                    lines.push(REGION_SEPARATOR.to_string());
                }
                lines.push(if line_numbers {
                    format!("{path}-{line_number}-{text}")
                } else {
                    format!("{path}-{text}")
                });
            }
        }
    }
    lines
}
