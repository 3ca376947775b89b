use crate::entry::normalize_path;
use crate::error::{AssetError, Result};
use std::io::{self, Cursor, Read};

/// Signature prefix of the header string, e.g. `PKGV0001`
pub const MAGIC_PREFIX: &[u8; 4] = b"PKGV";

/// Length of the header string: prefix plus four decimal version digits
pub const HEADER_STRING_LENGTH: usize = 8;

/// Smallest possible directory record: path length, offset and size
pub const MIN_RECORD_SIZE: usize = 12;

/// Archive header: a sized string holding the signature and version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageHeader {
    pub version: u16,
}

impl PackageHeader {
    /// Read and validate the header from the start of the archive
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let length = read_u32(&mut reader)
            .map_err(|_| AssetError::InvalidHeader("missing header length".to_string()))?;

        if length as usize != HEADER_STRING_LENGTH {
            return Err(AssetError::InvalidHeader(format!(
                "header length {} (expected {})",
                length, HEADER_STRING_LENGTH
            )));
        }

        let mut marker = [0u8; HEADER_STRING_LENGTH];
        reader
            .read_exact(&mut marker)
            .map_err(|_| AssetError::InvalidHeader("header cut short".to_string()))?;

        if &marker[..4] != MAGIC_PREFIX {
            return Err(AssetError::InvalidHeader(format!(
                "bad signature {:?}",
                String::from_utf8_lossy(&marker[..4])
            )));
        }

        let digits = &marker[4..];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(AssetError::InvalidHeader(format!(
                "bad version {:?}",
                String::from_utf8_lossy(digits)
            )));
        }

        let version = digits
            .iter()
            .fold(0u16, |acc, digit| acc * 10 + u16::from(digit - b'0'));
        if version == 0 {
            return Err(AssetError::InvalidHeader("unsupported version 0000".to_string()));
        }

        Ok(Self { version })
    }
}

/// One record of the archive directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRecord {
    pub path: String,
    pub offset: u32,
    pub length: u32,
}

/// Parsed header and directory, plus where the data region starts
#[derive(Debug, Clone)]
pub struct PackageDirectory {
    pub header: PackageHeader,
    pub records: Vec<DirectoryRecord>,
    pub data_start: usize,
}

impl PackageDirectory {
    /// Parse the header and directory of an archive held in `bytes`.
    ///
    /// Every record is checked against the data region that follows the directory, so a
    /// successfully parsed directory never points outside the archive.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(bytes);
        let header = PackageHeader::read_from(&mut cursor)?;

        let count = read_u32(&mut cursor)
            .map_err(truncated(|| "entry count".to_string()))? as usize;
        let remaining = bytes.len() - cursor.position() as usize;
        if count.saturating_mul(MIN_RECORD_SIZE) > remaining {
            return Err(AssetError::TruncatedArchive(format!(
                "{} entries declared but only {} directory bytes left",
                count, remaining
            )));
        }

        let mut records = Vec::with_capacity(count);
        for index in 0..count {
            let raw = read_sized_string(&mut cursor)
                .map_err(truncated(|| format!("path of entry {}", index)))?;
            let path = String::from_utf8(raw).map_err(|_| {
                AssetError::InvalidFormat(format!("entry {} path is not UTF-8", index))
            })?;
            let offset = read_u32(&mut cursor).map_err(truncated(|| path.clone()))?;
            let length = read_u32(&mut cursor).map_err(truncated(|| path.clone()))?;

            records.push(DirectoryRecord {
                path: normalize_path(&path),
                offset,
                length,
            });
        }

        let data_start = cursor.position() as usize;
        let data_len = bytes.len() - data_start;
        for record in &records {
            let end = record.offset as u64 + record.length as u64;
            if end > data_len as u64 {
                return Err(AssetError::TruncatedArchive(format!(
                    "{} spans {}..{} but data region is {} bytes",
                    record.path, record.offset, end, data_len
                )));
            }
        }

        Ok(Self {
            header,
            records,
            data_start,
        })
    }
}

/// Map a short read to `TruncatedArchive`; `what` only runs when the read failed
fn truncated<F: FnOnce() -> String>(what: F) -> impl FnOnce(io::Error) -> AssetError {
    move |e| match e.kind() {
        io::ErrorKind::UnexpectedEof => {
            AssetError::TruncatedArchive(format!("archive ends inside {}", what()))
        }
        _ => AssetError::Io(e),
    }
}

/// Read one little-endian unsigned 32-bit integer
pub fn read_u32<R: Read>(mut reader: R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a `u32` length followed by that many bytes (no terminator)
pub fn read_sized_string<R: Read>(mut reader: R) -> io::Result<Vec<u8>> {
    let length = read_u32(&mut reader)? as u64;
    let mut buf = Vec::new();
    reader.by_ref().take(length).read_to_end(&mut buf)?;

    if buf.len() as u64 != length {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
    }
    Ok(buf)
}
