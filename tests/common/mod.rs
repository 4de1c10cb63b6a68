//! In-memory ZIP archive construction for tests.

#![allow(dead_code)]

use flate2::Compression;
use flate2::write::DeflateEncoder;
use std::io::Write;

pub struct TestEntry {
    pub name: Vec<u8>,
    pub method: u16,
    pub data: Vec<u8>,
    pub uncompressed_size: u32,
    pub flags: u16,
}

impl TestEntry {
    pub fn stored(name: &str, data: &[u8]) -> Self {
        Self {
            name: name.as_bytes().to_vec(),
            method: 0,
            data: data.to_vec(),
            uncompressed_size: data.len() as u32,
            flags: 0,
        }
    }

    pub fn deflated(name: &str, data: &[u8]) -> Self {
        Self {
            name: name.as_bytes().to_vec(),
            method: 8,
            data: deflate(data),
            uncompressed_size: data.len() as u32,
            flags: 0,
        }
    }

    /// Report a different uncompressed size than the real one.
    pub fn with_declared_size(mut self, size: u32) -> Self {
        self.uncompressed_size = size;
        self
    }
}

pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Assemble local headers, central directory and EOCD (with optional comment).
pub fn build_zip(entries: &[TestEntry], comment: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut central = Vec::new();

    for entry in entries {
        let offset = out.len() as u32;

        out.extend_from_slice(b"PK\x03\x04");
        out.extend_from_slice(&20u16.to_le_bytes());
        out.extend_from_slice(&entry.flags.to_le_bytes());
        out.extend_from_slice(&entry.method.to_le_bytes());
        out.extend_from_slice(&[0u8; 4]); // time, date
        out.extend_from_slice(&0u32.to_le_bytes()); // crc32
        out.extend_from_slice(&(entry.data.len() as u32).to_le_bytes());
        out.extend_from_slice(&entry.uncompressed_size.to_le_bytes());
        out.extend_from_slice(&(entry.name.len() as u16).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&entry.name);
        out.extend_from_slice(&entry.data);

        central.extend_from_slice(b"PK\x01\x02");
        central.extend_from_slice(&20u16.to_le_bytes());
        central.extend_from_slice(&20u16.to_le_bytes());
        central.extend_from_slice(&entry.flags.to_le_bytes());
        central.extend_from_slice(&entry.method.to_le_bytes());
        central.extend_from_slice(&[0u8; 4]);
        central.extend_from_slice(&0u32.to_le_bytes());
        central.extend_from_slice(&(entry.data.len() as u32).to_le_bytes());
        central.extend_from_slice(&entry.uncompressed_size.to_le_bytes());
        central.extend_from_slice(&(entry.name.len() as u16).to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes()); // extra
        central.extend_from_slice(&0u16.to_le_bytes()); // comment
        central.extend_from_slice(&0u16.to_le_bytes()); // disk
        central.extend_from_slice(&0u16.to_le_bytes()); // internal attrs
        central.extend_from_slice(&0u32.to_le_bytes()); // external attrs
        central.extend_from_slice(&offset.to_le_bytes());
        central.extend_from_slice(&entry.name);
    }

    let cd_offset = out.len() as u32;
    out.extend_from_slice(&central);

    out.extend_from_slice(b"PK\x05\x06");
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    out.extend_from_slice(&(central.len() as u32).to_le_bytes());
    out.extend_from_slice(&cd_offset.to_le_bytes());
    out.extend_from_slice(&(comment.len() as u16).to_le_bytes());
    out.extend_from_slice(comment);
    out
}

/// Byte offset of the EOCD record in an archive from [`build_zip`].
pub fn eocd_offset(archive: &[u8], comment_len: usize) -> usize {
    archive.len() - comment_len - 22
}

pub const SAMPLE_OSF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<document type="Open Screenplay Format document" version="40">
 <paragraphs>
  <para><style basestyle="Normal Text" align="center"/><text bold="1" size="24">THE LONG NIGHT</text></para>
  <para><style basestyle="Normal Text" align="center"/><text>by Jane Doe</text></para>
  <para><style basestyle="Normal Text"/></para>
  <para><style basestyle="Scene Heading"/><text>int. kitchen - day</text></para>
  <para><style basestyle="Action"/><text>Jane pours coffee. </text><text italic="1">Slowly.</text></para>
  <para><style basestyle="Character"/><text>jane</text></para>
  <para><style basestyle="Parenthetical"/><text>(to herself)</text></para>
  <para><style basestyle="Dialogue"/><text>Another day &amp; another pot.</text></para>
  <para><style basestyle="Transition" align="right"/><text>cut to:</text></para>
  <para><style basestyle="Shot"/><text>close on the mug</text></para>
  <para><style basestyle="Lyrics" align="right"/><text>fade out.</text></para>
 </paragraphs>
</document>
"#;
