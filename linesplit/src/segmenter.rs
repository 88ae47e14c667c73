//! The segmenter and its pull-iteration driver

use crate::config::SegmenterConfig;
use crate::error::{Result, SegmentError};
use crate::source::{CharSource, TextReader};
use linesplit_core::{Scanner, Step};
use std::io::{self, Read};
use tracing::{debug, trace};

/// Streaming splitter over one character source
///
/// A segmenter owns its source for its whole lifetime and produces a single
/// forward-only sequence of segments. Consume it either by iterating (blocking
/// reads, see [`Iterator`]) or through
/// [`next_segment`](Segmenter::next_segment) /
/// [`into_stream`](Segmenter::into_stream) (suspending, cancellable reads).
/// Both drivers share the same boundary decisions, so they yield identical
/// segments for identical input.
///
/// The sequence ends either exhausted (`None`) or failed (one `Err`, then
/// `None`). A failure discards the partially accumulated segment.
///
/// ```rust
/// use linesplit::Segmenter;
///
/// let segments: Vec<String> = Segmenter::new("foo\n\nbar".as_bytes())
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(segments, ["foo", "bar"]);
/// ```
#[derive(Debug)]
pub struct Segmenter<S> {
    pub(crate) source: S,
    pub(crate) scanner: Scanner,
    pub(crate) config: SegmenterConfig,
    pub(crate) units_read: u64,
}

/// What the driver does after one unit went through the scanner
pub(crate) enum Turn {
    /// Keep reading
    Continue,
    /// Hand this item to the consumer
    Yield(Result<String>),
    /// The sequence is over
    Done,
}

impl<R: Read> Segmenter<TextReader<R>> {
    /// Split `reader` with the default configuration
    pub fn new(reader: R) -> Self {
        let config = SegmenterConfig::default();
        let source = TextReader::new(reader, &config);
        Self::assemble(source, config)
    }

    /// Split `reader` with a custom configuration
    ///
    /// Performs no I/O; an unreadable source is reported by the first read as
    /// [`SegmentError::InvalidSource`].
    pub fn with_config(reader: R, config: SegmenterConfig) -> Result<Self> {
        config.validate()?;
        let source = TextReader::new(reader, &config);
        Ok(Self::assemble(source, config))
    }

    /// Recover the byte stream
    ///
    /// See [`TextReader::into_inner`] for what is lost.
    pub fn into_inner(self) -> R {
        self.source.into_inner()
    }
}

impl<S> Segmenter<S> {
    /// Split a custom character source
    ///
    /// The buffering and encoding settings of `config` do not apply; the
    /// source already yields characters.
    pub fn from_source(source: S, config: SegmenterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(source, config))
    }

    pub(crate) fn assemble(source: S, config: SegmenterConfig) -> Self {
        debug!(
            separator = ?config.separator(),
            suppress_blanks = config.suppress_blanks(),
            crlf_fold = config.crlf_fold(),
            buffered = config.buffered(),
            encoding = config.encoding().name(),
            "segmenter created"
        );

        Self {
            source,
            scanner: Scanner::new(config.scan_options()),
            config,
            units_read: 0,
        }
    }

    /// Configuration this segmenter was built with
    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Number of segments produced so far
    pub fn segments_emitted(&self) -> usize {
        self.scanner.emitted()
    }

    /// Whether the sequence has ended, normally or by failure
    pub fn is_finished(&self) -> bool {
        self.scanner.is_finished()
    }

    /// Borrow the character source
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Map a failed read to the error reported for it
    ///
    /// Readability is validated lazily: failing before the source ever
    /// delivered data means it was never usable. `source_has_read` covers
    /// bytes that were read but have not completed a character yet.
    pub(crate) fn read_failure(&self, err: io::Error, source_has_read: bool) -> SegmentError {
        if self.units_read == 0 && !source_has_read {
            SegmentError::InvalidSource(err)
        } else {
            SegmentError::Io(err)
        }
    }

    /// Run one unit (or a failure to obtain it) through the scanner
    pub(crate) fn turn(&mut self, unit: Result<Option<char>>) -> Turn {
        let unit = match unit {
            Ok(unit) => unit,
            Err(err) => {
                debug!(
                    error = %err,
                    discarded = self.scanner.pending().len(),
                    segments = self.scanner.emitted(),
                    "segmentation failed"
                );
                self.scanner.abort();
                return Turn::Yield(Err(err));
            }
        };

        self.units_read += 1;
        match self.scanner.step(unit) {
            Step::Continue => Turn::Continue,
            Step::Suppressed => {
                trace!("blank segment suppressed");
                Turn::Continue
            }
            Step::Segment(segment) => {
                trace!(len = segment.len(), "segment emitted");
                Turn::Yield(Ok(segment))
            }
            Step::Finished(trailing) => {
                debug!(
                    segments = self.scanner.emitted(),
                    suppressed = self.scanner.suppressed(),
                    "end of stream"
                );
                match trailing {
                    Some(segment) => Turn::Yield(Ok(segment)),
                    None => Turn::Done,
                }
            }
        }
    }
}

impl<S: CharSource> Segmenter<S> {
    /// Blocking read of the next unit
    fn pull_unit(&mut self) -> Result<Option<char>> {
        self.source
            .read_char()
            .map_err(|err| self.read_failure(err, self.source.has_read()))
    }
}

impl<S: CharSource> Iterator for Segmenter<S> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.scanner.is_finished() {
            let unit = self.pull_unit();
            match self.turn(unit) {
                Turn::Continue => continue,
                Turn::Yield(item) => return Some(item),
                Turn::Done => return None,
            }
        }
        None
    }
}

impl<S: CharSource> std::iter::FusedIterator for Segmenter<S> {}
