//! Character sources
//!
//! A segmenter reads its input one character at a time through one of two
//! contracts: [`CharSource`] for blocking reads and [`AsyncCharSource`] for
//! reads that may suspend. [`TextReader`] and [`AsyncTextReader`] implement
//! them over byte streams; other implementations can feed already-decoded
//! text.

use crate::config::SegmenterConfig;
use crate::decode::TextDecoder;
use std::future::Future;
use std::io::{self, BufRead, BufReader, ErrorKind, Read};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader as AsyncBufReader};

/// Blocking character source
pub trait CharSource {
    /// Read the next character, or `None` at end of stream
    fn read_char(&mut self) -> io::Result<Option<char>>;

    /// Whether a read from the underlying stream has already succeeded
    ///
    /// Sources that do not track this report `false`; only characters
    /// handed out then count as progress.
    fn has_read(&self) -> bool {
        false
    }
}

/// Character source whose reads may suspend the calling task
pub trait AsyncCharSource {
    /// Read the next character, or `None` at end of stream
    ///
    /// Dropping the returned future before it completes must not lose input
    /// that a later call would otherwise have returned.
    fn read_char(&mut self) -> impl Future<Output = io::Result<Option<char>>>;

    /// Whether a read from the underlying stream has already succeeded
    fn has_read(&self) -> bool {
        false
    }
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        (**self).read_char()
    }

    fn has_read(&self) -> bool {
        (**self).has_read()
    }
}

/// Byte stream, wrapped in a buffering layer or read directly
#[derive(Debug)]
enum Layer<B, R> {
    Buffered(B),
    Direct(R),
}

/// Blocking source decoding a [`Read`] stream
///
/// When unbuffered, bytes are pulled from the stream one at a time, so the
/// stream is never advanced past the last character handed out.
#[derive(Debug)]
pub struct TextReader<R> {
    layer: Layer<BufReader<R>, R>,
    decoder: TextDecoder,
    has_read: bool,
}

impl<R: Read> TextReader<R> {
    /// Wrap `reader` according to the buffering and encoding settings
    pub fn new(reader: R, config: &SegmenterConfig) -> Self {
        let layer = if config.buffered() {
            Layer::Buffered(BufReader::with_capacity(config.buffer_capacity(), reader))
        } else {
            Layer::Direct(reader)
        };

        Self {
            layer,
            decoder: TextDecoder::new(config.encoding()),
            has_read: false,
        }
    }

    /// Recover the byte stream
    ///
    /// Bytes held by the buffering layer or decoded but not yet read are lost.
    pub fn into_inner(self) -> R {
        match self.layer {
            Layer::Buffered(reader) => reader.into_inner(),
            Layer::Direct(reader) => reader,
        }
    }

    fn fill(&mut self) -> io::Result<()> {
        match &mut self.layer {
            Layer::Buffered(reader) => {
                let chunk = reader.fill_buf()?;
                let len = chunk.len();
                self.decoder.feed(chunk);
                reader.consume(len);
            }
            Layer::Direct(reader) => {
                let mut byte = [0u8; 1];
                let len = reader.read(&mut byte)?;
                self.decoder.feed(&byte[..len]);
            }
        }
        self.has_read = true;
        Ok(())
    }
}

impl<R: Read> CharSource for TextReader<R> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        loop {
            if let Some(ch) = self.decoder.next_char() {
                return Ok(Some(ch));
            }
            if self.decoder.is_drained() {
                return Ok(None);
            }
            match self.fill() {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
    }

    fn has_read(&self) -> bool {
        self.has_read
    }
}

/// Suspending source decoding an [`AsyncRead`] stream
///
/// Mirrors [`TextReader`]; when unbuffered, bytes are pulled one at a time.
#[derive(Debug)]
pub struct AsyncTextReader<R> {
    layer: Layer<AsyncBufReader<R>, R>,
    decoder: TextDecoder,
    has_read: bool,
}

impl<R: AsyncRead + Unpin> AsyncTextReader<R> {
    /// Wrap `reader` according to the buffering and encoding settings
    pub fn new(reader: R, config: &SegmenterConfig) -> Self {
        let layer = if config.buffered() {
            Layer::Buffered(AsyncBufReader::with_capacity(
                config.buffer_capacity(),
                reader,
            ))
        } else {
            Layer::Direct(reader)
        };

        Self {
            layer,
            decoder: TextDecoder::new(config.encoding()),
            has_read: false,
        }
    }

    /// Recover the byte stream
    ///
    /// Bytes held by the buffering layer or decoded but not yet read are lost.
    pub fn into_inner(self) -> R {
        match self.layer {
            Layer::Buffered(reader) => reader.into_inner(),
            Layer::Direct(reader) => reader,
        }
    }

    async fn fill(&mut self) -> io::Result<()> {
        match &mut self.layer {
            Layer::Buffered(reader) => {
                let chunk = reader.fill_buf().await?;
                let len = chunk.len();
                self.decoder.feed(chunk);
                reader.consume(len);
            }
            Layer::Direct(reader) => {
                let mut byte = [0u8; 1];
                let len = reader.read(&mut byte).await?;
                self.decoder.feed(&byte[..len]);
            }
        }
        self.has_read = true;
        Ok(())
    }
}

impl<R: AsyncRead + Unpin> AsyncCharSource for AsyncTextReader<R> {
    async fn read_char(&mut self) -> io::Result<Option<char>> {
        loop {
            if let Some(ch) = self.decoder.next_char() {
                return Ok(Some(ch));
            }
            if self.decoder.is_drained() {
                return Ok(None);
            }
            match self.fill().await {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
    }

    fn has_read(&self) -> bool {
        self.has_read
    }
}
