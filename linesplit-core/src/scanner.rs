//! The boundary-decision state machine

use crate::options::ScanOptions;
use alloc::string::String;
use core::mem;

/// Outcome of feeding one unit to the [`Scanner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The unit was appended to the pending segment
    Continue,
    /// A boundary closed a segment
    Segment(String),
    /// A boundary closed a blank segment that was dropped
    Suppressed,
    /// The stream ended, optionally with a trailing segment
    ///
    /// Every later call yields `Finished(None)`.
    Finished(Option<String>),
}

/// Scan state for one segment sequence
///
/// Holds the characters accumulated since the last boundary. A scanner is
/// single-pass: once it has reported [`Step::Finished`] (or been
/// [aborted](Scanner::abort)) it never produces another segment.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    options: ScanOptions,
    pending: String,
    emitted: usize,
    suppressed: usize,
    finished: bool,
}

impl Scanner {
    /// Create a scanner with an empty accumulation buffer
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            pending: String::new(),
            emitted: 0,
            suppressed: 0,
            finished: false,
        }
    }

    /// Feed one unit; `None` signals end-of-stream
    pub fn step(&mut self, unit: Option<char>) -> Step {
        match unit {
            Some(ch) => self.push(ch),
            None => self.finish(),
        }
    }

    /// Feed one character
    pub fn push(&mut self, ch: char) -> Step {
        if self.finished {
            return Step::Finished(None);
        }

        if !self.options.is_boundary(ch) {
            self.pending.push(ch);
            return Step::Continue;
        }

        if self.options.is_blank(&self.pending) {
            self.pending.clear();
            self.suppressed += 1;
            return Step::Suppressed;
        }

        self.emitted += 1;
        Step::Segment(mem::take(&mut self.pending))
    }

    /// Signal end-of-stream
    ///
    /// Only the trailing segment is subject to the empty check here: a stream
    /// that ends right after a separator yields a final empty segment only when
    /// blanks are kept.
    pub fn finish(&mut self) -> Step {
        if self.finished {
            return Step::Finished(None);
        }
        self.finished = true;

        let trailing = mem::take(&mut self.pending);
        if self.options.is_blank(&trailing) {
            self.suppressed += 1;
            return Step::Finished(None);
        }

        self.emitted += 1;
        Step::Finished(Some(trailing))
    }

    /// Discard the pending segment and end the sequence without emitting it
    pub fn abort(&mut self) {
        self.pending = String::new();
        self.finished = true;
    }

    /// Options this scanner decides with
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Characters accumulated since the last boundary
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Number of segments emitted so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Number of blank segments dropped so far
    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    /// Whether the sequence has ended
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn run(input: &str, options: ScanOptions) -> Vec<String> {
        let mut scanner = Scanner::new(options);
        let mut segments = Vec::new();
        for unit in input.chars().map(Some).chain([None]) {
            match scanner.step(unit) {
                Step::Segment(segment) | Step::Finished(Some(segment)) => segments.push(segment),
                _ => {}
            }
        }
        segments
    }

    fn keep_blanks() -> ScanOptions {
        ScanOptions {
            suppress_blanks: false,
            ..ScanOptions::default()
        }
    }

    #[test]
    fn test_empty_stream() {
        assert!(run("", ScanOptions::default()).is_empty());
        assert_eq!(run("", keep_blanks()), [""]);
    }

    #[test]
    fn test_separator_only_stream() {
        assert!(run("\n\n", ScanOptions::default()).is_empty());
        assert_eq!(run("\n\n", keep_blanks()), ["", "", ""]);
    }

    #[test]
    fn test_trailing_separator() {
        assert_eq!(run("a\nb\n", ScanOptions::default()), ["a", "b"]);
        assert_eq!(run("a\nb\n", keep_blanks()), ["a", "b", ""]);
    }

    #[test]
    fn test_step_reports_each_decision() {
        let mut scanner = Scanner::new(ScanOptions::default());
        assert_eq!(scanner.step(Some('a')), Step::Continue);
        assert_eq!(scanner.pending(), "a");
        assert_eq!(scanner.step(Some('\n')), Step::Segment("a".into()));
        assert_eq!(scanner.pending(), "");
        assert_eq!(scanner.step(Some('\n')), Step::Suppressed);
        assert_eq!(scanner.step(None), Step::Finished(None));
        assert_eq!(scanner.emitted(), 1);
        assert_eq!(scanner.suppressed(), 2);
    }

    #[test]
    fn test_finished_scanner_stays_finished() {
        let mut scanner = Scanner::new(keep_blanks());
        assert_eq!(scanner.step(None), Step::Finished(Some(String::new())));
        assert!(scanner.is_finished());
        assert_eq!(scanner.step(Some('x')), Step::Finished(None));
        assert_eq!(scanner.step(Some('\n')), Step::Finished(None));
        assert_eq!(scanner.step(None), Step::Finished(None));
        assert_eq!(scanner.emitted(), 1);
    }

    #[test]
    fn test_abort_discards_pending() {
        let mut scanner = Scanner::new(ScanOptions::default());
        scanner.step(Some('a'));
        scanner.step(Some('b'));
        scanner.abort();
        assert_eq!(scanner.pending(), "");
        assert_eq!(scanner.step(None), Step::Finished(None));
        assert_eq!(scanner.emitted(), 0);
    }

    #[test]
    fn test_crlf_fold_treats_cr_as_boundary() {
        let folded = ScanOptions {
            crlf_fold: true,
            suppress_blanks: false,
            ..ScanOptions::default()
        };
        assert_eq!(run("foo\r\nbar", folded), ["foo", "", "bar"]);
        assert_eq!(run("foo\rbar", folded), ["foo", "bar"]);
    }

    #[test]
    fn test_crlf_fold_with_custom_separator() {
        let options = ScanOptions {
            separator: ',',
            crlf_fold: true,
            suppress_blanks: true,
        };
        assert_eq!(run("a,b\rc\nd", options), ["a", "b", "c\nd"]);
    }

    #[test]
    fn test_stray_cr_is_blank_without_folding() {
        assert_eq!(run("a\r\n\r\nb\r\n", ScanOptions::default()), ["a\r", "b\r"]);
        assert_eq!(
            run("a\r\n\r\nb", keep_blanks()),
            ["a\r", "\r", "b"]
        );
    }
}
