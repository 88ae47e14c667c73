//! Segmenter configuration

use crate::error::{Result, SegmentError};
use encoding_rs::Encoding;
use linesplit_core::ScanOptions;
use serde::{Deserialize, Serialize};

/// Default configuration constants
pub mod defaults {
    /// Default separator
    pub const SEPARATOR: char = '\n';

    /// Blank segments are dropped by default
    pub const SUPPRESS_BLANKS: bool = true;

    /// Sources are wrapped in a buffering layer by default
    pub const BUFFERED: bool = true;

    /// Carriage returns are ordinary characters by default
    pub const CRLF_FOLD: bool = false;

    /// Capacity of the buffering layer in bytes (8KB)
    pub const BUFFER_CAPACITY: usize = 8 * 1024;

    /// Default text encoding label
    pub const ENCODING: &str = "utf-8";
}

/// Segmenter configuration
///
/// Every option is fixed once a segmenter is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmenterConfig {
    pub(crate) separator: char,
    pub(crate) suppress_blanks: bool,
    pub(crate) buffered: bool,
    pub(crate) crlf_fold: bool,
    pub(crate) buffer_capacity: usize,
    #[serde(with = "encoding_label")]
    pub(crate) encoding: &'static Encoding,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            separator: defaults::SEPARATOR,
            suppress_blanks: defaults::SUPPRESS_BLANKS,
            buffered: defaults::BUFFERED,
            crlf_fold: defaults::CRLF_FOLD,
            buffer_capacity: defaults::BUFFER_CAPACITY,
            encoding: encoding_rs::UTF_8,
        }
    }
}

impl SegmenterConfig {
    /// Create a configuration builder
    pub fn builder() -> SegmenterConfigBuilder {
        SegmenterConfigBuilder::default()
    }

    /// Newline-separated lines, blanks dropped
    pub fn lines() -> Self {
        Self::default()
    }

    /// DOS text: carriage returns split like line feeds, blanks dropped
    pub fn dos_lines() -> Self {
        Self {
            crlf_fold: true,
            ..Self::default()
        }
    }

    /// NUL-terminated records as produced by `find -print0`
    pub fn nul_terminated() -> Self {
        Self {
            separator: '\0',
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document
    ///
    /// Missing keys take their defaults; unknown keys are rejected.
    ///
    /// ```rust
    /// use linesplit::SegmenterConfig;
    ///
    /// let config = SegmenterConfig::from_toml_str(
    ///     r#"
    ///     separator = ","
    ///     suppress_blanks = false
    ///     "#,
    /// )
    /// .unwrap();
    /// assert_eq!(config.separator(), ',');
    /// assert!(!config.suppress_blanks());
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as a TOML document
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| SegmentError::Config(e.to_string()))
    }

    /// Validate the configuration
    pub(crate) fn validate(&self) -> Result<()> {
        if self.buffered && self.buffer_capacity == 0 {
            return Err(SegmentError::Config(
                "buffer_capacity must be greater than 0".into(),
            ));
        }

        if self.encoding == encoding_rs::REPLACEMENT {
            return Err(SegmentError::Config(
                "the replacement encoding cannot decode text".into(),
            ));
        }

        Ok(())
    }

    /// Options for the boundary-decision core
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            separator: self.separator,
            suppress_blanks: self.suppress_blanks,
            crlf_fold: self.crlf_fold,
        }
    }

    /// Separator character
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Whether blank segments are dropped
    pub fn suppress_blanks(&self) -> bool {
        self.suppress_blanks
    }

    /// Whether sources are wrapped in a buffering layer
    pub fn buffered(&self) -> bool {
        self.buffered
    }

    /// Whether carriage returns split segments
    pub fn crlf_fold(&self) -> bool {
        self.crlf_fold
    }

    /// Capacity of the buffering layer in bytes
    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    /// Text encoding of the source
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}

/// Fluent builder for [`SegmenterConfig`]
#[derive(Debug, Default)]
pub struct SegmenterConfigBuilder {
    separator: Option<char>,
    suppress_blanks: Option<bool>,
    buffered: Option<bool>,
    crlf_fold: Option<bool>,
    buffer_capacity: Option<usize>,
    encoding: Option<String>,
}

impl SegmenterConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the separator character
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Drop or keep blank segments
    pub fn suppress_blanks(mut self, suppress: bool) -> Self {
        self.suppress_blanks = Some(suppress);
        self
    }

    /// Wrap the source in a buffering layer
    ///
    /// Turn this off when the source is already buffered.
    pub fn buffered(mut self, buffered: bool) -> Self {
        self.buffered = Some(buffered);
        self
    }

    /// Treat carriage return as a boundary
    pub fn crlf_fold(mut self, fold: bool) -> Self {
        self.crlf_fold = Some(fold);
        self
    }

    /// Set the buffering layer capacity in bytes
    pub fn buffer_capacity(mut self, bytes: usize) -> Self {
        self.buffer_capacity = Some(bytes);
        self
    }

    /// Set the text encoding by WHATWG label (e.g. `"utf-16le"`, `"latin1"`)
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SegmenterConfig> {
        let mut config = SegmenterConfig::default();

        if let Some(separator) = self.separator {
            config.separator = separator;
        }

        if let Some(suppress) = self.suppress_blanks {
            config.suppress_blanks = suppress;
        }

        if let Some(buffered) = self.buffered {
            config.buffered = buffered;
        }

        if let Some(fold) = self.crlf_fold {
            config.crlf_fold = fold;
        }

        if let Some(capacity) = self.buffer_capacity {
            config.buffer_capacity = capacity;
        }

        if let Some(label) = self.encoding {
            config.encoding = lookup_encoding(&label)?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn lookup_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.as_bytes())
        .ok_or_else(|| SegmentError::Config(format!("unknown encoding: {label}")))
}

mod encoding_label {
    use encoding_rs::Encoding;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        encoding: &&'static Encoding,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encoding.name().to_ascii_lowercase())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<&'static Encoding, D::Error> {
        let label = String::deserialize(deserializer)?;
        Encoding::for_label(label.as_bytes())
            .ok_or_else(|| de::Error::custom(format!("unknown encoding: {label}")))
    }
}
