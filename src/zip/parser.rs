//! Low-level ZIP archive parser.
//!
//! This module handles the binary parsing of ZIP file structures from an
//! in-memory archive buffer.
//!
//! ## Parsing Strategy
//!
//! ZIP files are designed to be read from the end:
//! 1. Find the End of Central Directory (EOCD) at the file's end
//! 2. Read the Central Directory to get metadata for all files
//! 3. For extraction, read the entry's Local File Header to find its data
//!
//! Every offset taken from the archive is checked against the buffer length
//! before it is used, so a hostile archive fails with an error rather than
//! a panic.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;
use std::ops::Range;
use tracing::{debug, trace};

use crate::error::{ImportError, Result};

use super::structures::*;

/// Maximum ZIP comment size allowed by the format (65535 bytes).
///
/// This limits the search area when looking for EOCD with a comment.
const MAX_COMMENT_SIZE: usize = 65535;

/// Low-level ZIP file parser.
///
/// Borrows the archive bytes; nothing is copied until an entry is
/// materialized by [`ZipExtractor`](super::ZipExtractor).
pub struct ZipParser<'a> {
    /// The whole archive
    data: &'a [u8],
}

impl<'a> ZipParser<'a> {
    /// Create a new parser over the given archive bytes.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Find and parse the End of Central Directory record.
    ///
    /// The EOCD may be followed by a comment of up to 65535 bytes, so the
    /// last `min(len, 65557)` bytes are scanned backwards for its signature.
    ///
    /// # Returns
    ///
    /// A tuple of (EOCD record, offset of EOCD in the archive).
    ///
    /// # Errors
    ///
    /// [`ImportError::MalformedArchive`] if no signature is found.
    pub fn find_eocd(&self) -> Result<(EndOfCentralDirectory, usize)> {
        let len = self.data.len();
        if len < EndOfCentralDirectory::SIZE {
            return Err(ImportError::MalformedArchive(
                "archive is smaller than an end of central directory record".to_string(),
            ));
        }

        // Common case first: no comment, EOCD is the last 22 bytes.
        let tail = len - EndOfCentralDirectory::SIZE;
        if &self.data[tail..tail + 4] == EndOfCentralDirectory::SIGNATURE {
            let eocd = EndOfCentralDirectory::from_bytes(&self.data[tail..])?;
            return Ok((eocd, tail));
        }

        let search_size = (MAX_COMMENT_SIZE + EndOfCentralDirectory::SIZE).min(len);
        let search_start = len - search_size;

        for i in (search_start..=tail).rev() {
            if &self.data[i..i + 4] == EndOfCentralDirectory::SIGNATURE {
                let eocd = EndOfCentralDirectory::from_bytes(
                    &self.data[i..i + EndOfCentralDirectory::SIZE],
                )?;
                debug!(offset = i, "found end of central directory behind comment");
                return Ok((eocd, i));
            }
        }

        Err(ImportError::MalformedArchive(
            "end of central directory signature not found".to_string(),
        ))
    }

    /// List all entries in the central directory.
    ///
    /// The walk is bounded by the declared directory size and entry count and
    /// stops early at the first record without a `PK\x01\x02` signature.
    ///
    /// # Errors
    ///
    /// - [`ImportError::MalformedArchive`] if the directory lies outside the archive
    /// - [`ImportError::UnsupportedArchiveFeature`] for ZIP64 or multi-volume archives
    pub fn list_entries(&self) -> Result<Vec<CentralDirectoryEntry>> {
        let (eocd, eocd_offset) = self.find_eocd()?;

        if eocd.is_zip64() {
            return Err(ImportError::UnsupportedArchiveFeature("ZIP64".to_string()));
        }
        if eocd.is_multi_volume() {
            return Err(ImportError::UnsupportedArchiveFeature(
                "multi-volume archive".to_string(),
            ));
        }

        let cd_offset = eocd.cd_offset as usize;
        let cd_end = cd_offset
            .checked_add(eocd.cd_size as usize)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| {
                ImportError::MalformedArchive(format!(
                    "central directory {}+{} exceeds archive length {}",
                    eocd.cd_offset,
                    eocd.cd_size,
                    self.data.len()
                ))
            })?;

        debug!(
            entries = eocd.total_entries,
            cd_offset,
            cd_size = eocd.cd_size,
            eocd_offset,
            "reading central directory"
        );

        let cd_data = &self.data[cd_offset..cd_end];
        let mut entries = Vec::with_capacity(eocd.total_entries as usize);
        let mut pos = 0usize;

        while entries.len() < eocd.total_entries as usize {
            if pos + CDFH_MIN_SIZE > cd_data.len() || &cd_data[pos..pos + 4] != CDFH_SIGNATURE {
                break;
            }
            let (entry, record_len) = Self::parse_cdfh(&cd_data[pos..])?;
            trace!(
                name = %entry.name,
                method = entry.compression_method.as_u16(),
                "central directory record"
            );
            entries.push(entry);
            pos += record_len;
        }

        Ok(entries)
    }

    /// Parse one Central Directory File Header.
    ///
    /// `record` starts at the header's signature. Returns the entry and the
    /// total length of the record including its variable-length fields.
    fn parse_cdfh(record: &[u8]) -> Result<(CentralDirectoryEntry, usize)> {
        let short = |_| ImportError::MalformedArchive("short central directory record".to_string());

        // Skip signature, version made by, version needed
        let mut cursor = Cursor::new(&record[8..CDFH_MIN_SIZE]);
        let flags = cursor.read_u16::<LittleEndian>().map_err(short)?;
        let compression_method = cursor.read_u16::<LittleEndian>().map_err(short)?;
        let _last_mod_time = cursor.read_u16::<LittleEndian>().map_err(short)?;
        let _last_mod_date = cursor.read_u16::<LittleEndian>().map_err(short)?;
        let _crc32 = cursor.read_u32::<LittleEndian>().map_err(short)?;
        let compressed_size = cursor.read_u32::<LittleEndian>().map_err(short)?;
        let uncompressed_size = cursor.read_u32::<LittleEndian>().map_err(short)?;
        let file_name_length = cursor.read_u16::<LittleEndian>().map_err(short)? as usize;
        let extra_field_length = cursor.read_u16::<LittleEndian>().map_err(short)? as usize;
        let file_comment_length = cursor.read_u16::<LittleEndian>().map_err(short)? as usize;
        let _disk_number_start = cursor.read_u16::<LittleEndian>().map_err(short)?;
        let _internal_attrs = cursor.read_u16::<LittleEndian>().map_err(short)?;
        let _external_attrs = cursor.read_u32::<LittleEndian>().map_err(short)?;
        let local_header_offset = cursor.read_u32::<LittleEndian>().map_err(short)?;

        let name_end = CDFH_MIN_SIZE + file_name_length;
        let record_len = name_end + extra_field_length + file_comment_length;
        if record_len > record.len() {
            return Err(ImportError::MalformedArchive(
                "central directory record runs past the directory".to_string(),
            ));
        }

        let name = decode_entry_name(&record[CDFH_MIN_SIZE..name_end]);

        Ok((
            CentralDirectoryEntry {
                name,
                compression_method: CompressionMethod::from_u16(compression_method),
                flags,
                compressed_size,
                uncompressed_size,
                local_header_offset,
            },
            record_len,
        ))
    }

    /// Locate an entry's compressed bytes.
    ///
    /// The Local File Header has its own filename and extra field lengths,
    /// which may differ from the central directory's, so it is read to find
    /// where the data begins.
    ///
    /// # Errors
    ///
    /// - [`ImportError::TruncatedEntry`] if the header or data runs past the archive
    /// - [`ImportError::MalformedArchive`] if the local signature is wrong
    pub fn data_range(&self, entry: &CentralDirectoryEntry) -> Result<Range<usize>> {
        let len = self.data.len();
        let lfh_offset = entry.local_header_offset as usize;
        let truncated = |needed: u64| ImportError::TruncatedEntry {
            name: entry.name.clone(),
            needed,
            available: len as u64,
        };

        let header_end = lfh_offset + LFH_SIZE;
        if header_end > len {
            return Err(truncated(header_end as u64));
        }
        let header = &self.data[lfh_offset..header_end];

        if &header[0..4] != LFH_SIGNATURE {
            return Err(ImportError::MalformedArchive(format!(
                "invalid local file header for '{}'",
                entry.name
            )));
        }

        // Filename and extra field lengths sit at fixed offsets 26 and 28
        let file_name_length = u16::from_le_bytes([header[26], header[27]]) as usize;
        let extra_field_length = u16::from_le_bytes([header[28], header[29]]) as usize;

        let data_start = header_end + file_name_length + extra_field_length;
        let data_end = data_start + entry.compressed_size as usize;
        if data_end > len {
            return Err(truncated(data_end as u64));
        }

        Ok(data_start..data_end)
    }

    /// The archive bytes this parser reads from.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}
