use byteorder::{LittleEndian, ReadBytesExt};
use serde::Serialize;
use std::io::Cursor;

use crate::error::{ImportError, Result};

/// ZIP compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompressionMethod {
    Stored,
    Deflate,
    Unknown(u16),
}

impl CompressionMethod {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => CompressionMethod::Stored,
            8 => CompressionMethod::Deflate,
            _ => CompressionMethod::Unknown(value),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            CompressionMethod::Stored => 0,
            CompressionMethod::Deflate => 8,
            CompressionMethod::Unknown(v) => *v,
        }
    }
}

/// End of Central Directory (EOCD) - 22 bytes minimum
pub struct EndOfCentralDirectory {
    pub disk_number: u16,
    pub disk_with_cd: u16,
    pub disk_entries: u16,
    pub total_entries: u16,
    pub cd_size: u32,
    pub cd_offset: u32,
    pub comment_len: u16,
}

impl EndOfCentralDirectory {
    pub const SIGNATURE: &'static [u8] = b"PK\x05\x06";
    pub const SIZE: usize = 22;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE || &data[0..4] != Self::SIGNATURE {
            return Err(ImportError::MalformedArchive(
                "invalid end of central directory record".to_string(),
            ));
        }

        let mut cursor = Cursor::new(&data[4..Self::SIZE]);
        let short = |_| ImportError::MalformedArchive("short end of central directory".to_string());

        Ok(Self {
            disk_number: cursor.read_u16::<LittleEndian>().map_err(short)?,
            disk_with_cd: cursor.read_u16::<LittleEndian>().map_err(short)?,
            disk_entries: cursor.read_u16::<LittleEndian>().map_err(short)?,
            total_entries: cursor.read_u16::<LittleEndian>().map_err(short)?,
            cd_size: cursor.read_u32::<LittleEndian>().map_err(short)?,
            cd_offset: cursor.read_u32::<LittleEndian>().map_err(short)?,
            comment_len: cursor.read_u16::<LittleEndian>().map_err(short)?,
        })
    }

    /// Sentinel values mean the real numbers live in a ZIP64 record.
    pub fn is_zip64(&self) -> bool {
        self.disk_entries == 0xFFFF
            || self.total_entries == 0xFFFF
            || self.cd_size == 0xFFFFFFFF
            || self.cd_offset == 0xFFFFFFFF
    }

    pub fn is_multi_volume(&self) -> bool {
        self.disk_number != 0 || self.disk_with_cd != 0
    }
}

/// Central Directory File Header (CDFH) - 46 bytes minimum
pub const CDFH_SIGNATURE: &[u8] = b"PK\x01\x02";
pub const CDFH_MIN_SIZE: usize = 46;

/// Local File Header (LFH) - 30 bytes
pub const LFH_SIGNATURE: &[u8] = b"PK\x03\x04";
pub const LFH_SIZE: usize = 30;

/// General purpose flag bit 0: entry is encrypted
pub const FLAG_ENCRYPTED: u16 = 0x0001;

/// One record of the central directory.
#[derive(Debug, Clone, Serialize)]
pub struct CentralDirectoryEntry {
    pub name: String,
    pub compression_method: CompressionMethod,
    pub flags: u16,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub local_header_offset: u32,
}

impl CentralDirectoryEntry {
    pub fn is_directory(&self) -> bool {
        self.name.ends_with('/')
    }

    pub fn is_encrypted(&self) -> bool {
        self.flags & FLAG_ENCRYPTED != 0
    }
}

/// Decode an entry name: UTF-8 first, raw bytes (one char per byte) when that fails.
pub fn decode_entry_name(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(name) => name.to_string(),
        Err(_) => {
            tracing::warn!("entry name is not valid UTF-8, decoding raw bytes");
            bytes.iter().map(|&b| char::from(b)).collect()
        }
    }
}
