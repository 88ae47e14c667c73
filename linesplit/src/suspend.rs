//! Suspending, cancellable driver
//!
//! Each unit read may suspend the calling task instead of blocking a thread.
//! A [`CancellationToken`] is checked before every read and raced against the
//! read while it is suspended; once cancellation is observed the sequence
//! fails with [`SegmentError::Cancelled`] and the partially accumulated
//! segment is discarded.

use crate::config::SegmenterConfig;
use crate::error::{Result, SegmentError};
use crate::segmenter::{Segmenter, Turn};
use crate::source::{AsyncCharSource, AsyncTextReader};
use futures::stream::{self, Stream};
use tokio::io::AsyncRead;
use tokio_util::sync::CancellationToken;
use tracing::debug;

impl<R: AsyncRead + Unpin> Segmenter<AsyncTextReader<R>> {
    /// Split an async `reader` with the default configuration
    pub fn new_async(reader: R) -> Self {
        let config = SegmenterConfig::default();
        let source = AsyncTextReader::new(reader, &config);
        Self::assemble(source, config)
    }

    /// Split an async `reader` with a custom configuration
    pub fn with_config_async(reader: R, config: SegmenterConfig) -> Result<Self> {
        config.validate()?;
        let source = AsyncTextReader::new(reader, &config);
        Ok(Self::assemble(source, config))
    }

    /// Recover the byte stream
    pub fn into_inner(self) -> R {
        self.source.into_inner()
    }
}

impl<S: AsyncCharSource> Segmenter<S> {
    /// Produce the next segment, or `None` once the sequence has ended
    ///
    /// A token that is already cancelled fails the very first read, so no
    /// segment is produced. After any error the sequence is over and further
    /// calls return `Ok(None)`.
    ///
    /// ```rust
    /// use linesplit::Segmenter;
    /// use tokio_util::sync::CancellationToken;
    ///
    /// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
    /// let cancel = CancellationToken::new();
    /// let mut segmenter = Segmenter::new_async("foo\nbar".as_bytes());
    ///
    /// assert_eq!(segmenter.next_segment(&cancel).await.unwrap().as_deref(), Some("foo"));
    /// assert_eq!(segmenter.next_segment(&cancel).await.unwrap().as_deref(), Some("bar"));
    /// assert_eq!(segmenter.next_segment(&cancel).await.unwrap(), None);
    /// # });
    /// ```
    pub async fn next_segment(&mut self, cancel: &CancellationToken) -> Result<Option<String>> {
        while !self.scanner.is_finished() {
            let unit = self.suspend_unit(cancel).await;
            match self.turn(unit) {
                Turn::Continue => continue,
                Turn::Yield(item) => return item.map(Some),
                Turn::Done => return Ok(None),
            }
        }
        Ok(None)
    }

    /// Consume the segmenter as a stream of segments
    ///
    /// The stream ends after the last segment, or right after the first error.
    pub fn into_stream(self, cancel: CancellationToken) -> impl Stream<Item = Result<String>> {
        stream::unfold((self, cancel), |(mut segmenter, cancel)| async move {
            let item = segmenter.next_segment(&cancel).await.transpose()?;
            Some((item, (segmenter, cancel)))
        })
    }

    /// The single suspension point
    async fn suspend_unit(&mut self, cancel: &CancellationToken) -> Result<Option<char>> {
        if cancel.is_cancelled() {
            debug!(units_read = self.units_read, "cancelled before read");
            return Err(SegmentError::Cancelled);
        }

        let read = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(units_read = self.units_read, "cancelled while suspended");
                return Err(SegmentError::Cancelled);
            }
            read = self.source.read_char() => read,
        };

        read.map_err(|err| self.read_failure(err, self.source.has_read()))
    }
}
