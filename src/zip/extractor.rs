use tracing::debug;

use crate::error::{ImportError, Result};

use super::inflate::{InflateSession, MIN_INFLATE_CAPACITY};
use super::parser::ZipParser;
use super::structures::{CentralDirectoryEntry, CompressionMethod};

/// Name of the screenplay document inside a Fade In archive
pub const DOCUMENT_ENTRY: &str = "document.xml";

/// ZIP entry extractor over an in-memory archive
pub struct ZipExtractor<'a> {
    parser: ZipParser<'a>,
    min_inflate_capacity: usize,
}

impl<'a> ZipExtractor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            parser: ZipParser::new(data),
            min_inflate_capacity: MIN_INFLATE_CAPACITY,
        }
    }

    /// Override the smallest inflate buffer (64 KiB by default).
    pub fn with_min_inflate_capacity(mut self, capacity: usize) -> Self {
        self.min_inflate_capacity = capacity.max(1);
        self
    }

    /// List all entries in the archive
    pub fn list_entries(&self) -> Result<Vec<CentralDirectoryEntry>> {
        self.parser.list_entries()
    }

    /// Pick the screenplay document entry.
    ///
    /// Priority: `document.xml` at the root, then any `*/document.xml`, then
    /// the first `*.xml`. Names are compared case-insensitively.
    pub fn select_document<'e>(
        entries: &'e [CentralDirectoryEntry],
    ) -> Option<&'e CentralDirectoryEntry> {
        let lowered: Vec<String> = entries.iter().map(|e| e.name.to_lowercase()).collect();
        let nested = format!("/{DOCUMENT_ENTRY}");

        let index = lowered
            .iter()
            .position(|n| n == DOCUMENT_ENTRY)
            .or_else(|| lowered.iter().position(|n| n.ends_with(&nested)))
            .or_else(|| lowered.iter().position(|n| n.ends_with(".xml")))?;

        Some(&entries[index])
    }

    /// Decompressed bytes of the archive's screenplay document
    pub fn extract_document(&self) -> Result<Vec<u8>> {
        let entries = self.list_entries()?;
        let entry = Self::select_document(&entries).ok_or(ImportError::MissingDocument)?;
        debug!(name = %entry.name, "selected document entry");
        self.extract(entry)
    }

    /// Decompressed bytes of the entry with exactly this name
    pub fn extract_named(&self, name: &str) -> Result<Vec<u8>> {
        let entries = self.list_entries()?;
        let entry = entries
            .iter()
            .find(|e| e.name == name)
            .ok_or(ImportError::MissingDocument)?;
        self.extract(entry)
    }

    /// Extract file data to memory
    pub fn extract(&self, entry: &CentralDirectoryEntry) -> Result<Vec<u8>> {
        if entry.is_encrypted() {
            return Err(ImportError::UnsupportedArchiveFeature(format!(
                "encrypted entry '{}'",
                entry.name
            )));
        }

        let range = self.parser.data_range(entry)?;
        let raw = &self.parser.data()[range];

        match entry.compression_method {
            CompressionMethod::Stored => Ok(raw.to_vec()),
            CompressionMethod::Deflate => InflateSession::new(
                raw,
                entry.uncompressed_size as usize,
                self.min_inflate_capacity,
            )
            .run(),
            CompressionMethod::Unknown(method) => Err(ImportError::UnsupportedCompression(method)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> CentralDirectoryEntry {
        CentralDirectoryEntry {
            name: name.to_string(),
            compression_method: CompressionMethod::Stored,
            flags: 0,
            compressed_size: 0,
            uncompressed_size: 0,
            local_header_offset: 0,
        }
    }

    fn selected(names: &[&str]) -> Option<String> {
        let entries: Vec<_> = names.iter().map(|n| entry(n)).collect();
        ZipExtractor::select_document(&entries).map(|e| e.name.clone())
    }

    #[test]
    fn prefers_root_document() {
        assert_eq!(
            selected(&["styles.xml", "x/document.xml", "Document.XML"]),
            Some("Document.XML".to_string())
        );
    }

    #[test]
    fn falls_back_to_nested_document() {
        assert_eq!(
            selected(&["styles.xml", "Script/document.xml"]),
            Some("Script/document.xml".to_string())
        );
    }

    #[test]
    fn falls_back_to_any_xml() {
        assert_eq!(
            selected(&["thumb.png", "meta.XML"]),
            Some("meta.XML".to_string())
        );
    }

    #[test]
    fn nothing_matches() {
        assert_eq!(selected(&["thumb.png", "mydocument.xmlx"]), None);
    }
}
