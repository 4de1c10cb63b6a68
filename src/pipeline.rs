//! Format detection and routing.
//!
//! `PK` at the start of the input means a Fade In archive; anything else is
//! read as plain text. The archive path is all-or-nothing, the text path
//! cannot fail.

use serde::Serialize;
use tracing::{debug, info};

use crate::element::CanonicalElement;
use crate::error::Result;
use crate::osf::{classify_document, parse_osf};
use crate::text::PlainTextClassifier;
use crate::text::patterns::is_slugline;
use crate::zip::{MIN_INFLATE_CAPACITY, ZipExtractor, has_zip_magic};

/// Lines [`looks_like_screenplay`] inspects before giving up
pub const PROBE_LINE_LIMIT: usize = 200;

/// Input shape, decided from the leading bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputFormat {
    FadeIn,
    PlainText,
}

impl InputFormat {
    pub fn detect(data: &[u8]) -> Self {
        if has_zip_magic(data) {
            InputFormat::FadeIn
        } else {
            InputFormat::PlainText
        }
    }
}

/// Programmatic configuration for an import
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Exact archive entry to read instead of the selection policy
    pub entry_override: Option<String>,
    /// Smallest inflate output buffer
    pub min_inflate_capacity: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            entry_override: None,
            min_inflate_capacity: MIN_INFLATE_CAPACITY,
        }
    }
}

/// Turns file contents into canonical screenplay elements.
#[derive(Debug, Clone, Default)]
pub struct ImportPipeline {
    options: ImportOptions,
}

impl ImportPipeline {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    /// Import a buffer of unknown provenance.
    ///
    /// # Errors
    ///
    /// Only archive input can fail; see [`ImportError`](crate::ImportError).
    pub fn import(&self, data: &[u8]) -> Result<Vec<CanonicalElement>> {
        let format = InputFormat::detect(data);
        info!(?format, bytes = data.len(), "importing screenplay");

        match format {
            InputFormat::FadeIn => self.import_fadein(data),
            InputFormat::PlainText => Ok(Self::import_text(&decode_text(data))),
        }
    }

    /// Import a Fade In archive.
    pub fn import_fadein(&self, data: &[u8]) -> Result<Vec<CanonicalElement>> {
        let extractor =
            ZipExtractor::new(data).with_min_inflate_capacity(self.options.min_inflate_capacity);
        let xml = match &self.options.entry_override {
            Some(name) => extractor.extract_named(name)?,
            None => extractor.extract_document()?,
        };
        debug!(bytes = xml.len(), "extracted OSF document");

        let paragraphs = parse_osf(&xml)?;
        Ok(classify_document(&paragraphs))
    }

    /// Import plain text.
    pub fn import_text(text: &str) -> Vec<CanonicalElement> {
        PlainTextClassifier::classify(text)
    }
}

/// Import with default options.
pub fn import(data: &[u8]) -> Result<Vec<CanonicalElement>> {
    ImportPipeline::default().import(data)
}

/// Decode plain-text input: drop a UTF-8 BOM, replace invalid sequences.
pub fn decode_text(data: &[u8]) -> String {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    String::from_utf8_lossy(data).into_owned()
}

/// Does the text contain a scene heading within its first 200 non-blank lines?
///
/// Callers use this to decide whether to import at all; it classifies nothing.
pub fn looks_like_screenplay(text: &str) -> bool {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(PROBE_LINE_LIMIT)
        .any(|line| is_slugline(&line.to_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    #[test]
    fn detects_format_from_magic() {
        assert_eq!(InputFormat::detect(b"PK\x03\x04rest"), InputFormat::FadeIn);
        assert_eq!(InputFormat::detect(b"INT. HOUSE"), InputFormat::PlainText);
        assert_eq!(InputFormat::detect(b"P"), InputFormat::PlainText);
        assert_eq!(InputFormat::detect(b""), InputFormat::PlainText);
    }

    #[test]
    fn plain_text_never_fails() {
        let elements = import(b"\xEF\xBB\xBFjust some words\xFF here").unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].kind, ElementKind::Title);
        assert!(elements[0].text.starts_with("just some words"));
    }

    #[test]
    fn broken_archive_fails() {
        assert!(import(b"PK\x03\x04 not really a zip").is_err());
    }

    #[test]
    fn probe_finds_sluglines() {
        assert!(looks_like_screenplay("Title\n\n  int. house - day\n"));
        assert!(!looks_like_screenplay("Dear diary,\ntoday was fine."));
    }

    #[test]
    fn probe_stops_after_limit() {
        let mut text = "words\n\n".repeat(PROBE_LINE_LIMIT);
        text.push_str("INT. LATE - DAY\n");
        assert!(!looks_like_screenplay(&text));
    }
}
