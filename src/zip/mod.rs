//! ZIP container reading.
//!
//! Fade In saves screenplays as a ZIP archive whose `document.xml` entry
//! holds the Open Screenplay Format document. This module finds that entry
//! and returns its decompressed bytes.
//!
//! ## Architecture
//!
//! - [`structures`]: Data structures representing ZIP format elements (EOCD, file headers, etc.)
//! - [`parser`]: Low-level parsing of ZIP structures from raw bytes
//! - [`inflate`]: Raw DEFLATE decompression with a growing output buffer
//! - [`extractor`]: Entry selection and materialization
//!
//! ## ZIP Format Overview
//!
//! A ZIP file consists of:
//! 1. Local file headers and compressed data for each file
//! 2. Central Directory with metadata for all files
//! 3. End of Central Directory (EOCD) record at the end
//!
//! ## Supported Features
//!
//! - Standard ZIP format (PKZIP APPNOTE 6.3.x compatible), 32-bit offsets
//! - STORED (no compression) method
//! - DEFLATE compression method
//!
//! ## Limitations
//!
//! - No ZIP64 support
//! - No encryption support
//! - No multi-disk archive support
//! - No BZIP2, LZMA, or other compression methods

mod extractor;
pub mod inflate;
mod parser;
mod structures;

pub use extractor::{DOCUMENT_ENTRY, ZipExtractor};
pub use inflate::{MIN_INFLATE_CAPACITY, inflate_raw};
pub use parser::ZipParser;
pub use structures::*;

/// Does the buffer start with the local file header magic `PK`?
pub fn has_zip_magic(data: &[u8]) -> bool {
    data.starts_with(b"PK")
}
