//! File entries and the byte views handed out by containers

use std::fmt;
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;

/// Where the bytes of one logical file live inside its container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Byte range relative to the start of an archive's data region
    Range { offset: u32, length: u32 },
    /// Resolved absolute path inside a directory container, not loaded yet
    Disk(PathBuf),
    /// Bytes already materialized in memory
    Buffer(Arc<[u8]>),
}

/// Metadata for one logical file, owned by the container that created it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: String,
    pub origin: Origin,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, origin: Origin) -> Self {
        Self {
            path: path.into(),
            origin,
        }
    }

    /// Size of the entry in bytes, when known without touching the disk
    pub fn len(&self) -> Option<usize> {
        match &self.origin {
            Origin::Range { length, .. } => Some(*length as usize),
            Origin::Buffer(data) => Some(data.len()),
            Origin::Disk(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }
}

/// Bytes returned by a container read.
///
/// Archive reads borrow straight from the archive's data region; directory reads share the
/// cached buffer. Either way the view cannot outlive the container that produced it.
#[derive(Clone)]
pub enum FileData<'a> {
    Borrowed(&'a [u8]),
    Shared(Arc<[u8]>),
}

impl<'a> FileData<'a> {
    pub fn as_slice(&self) -> &[u8] {
        match self {
            FileData::Borrowed(data) => data,
            FileData::Shared(data) => data,
        }
    }

    /// Copy the bytes out so they can outlive the container
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }
}

impl Deref for FileData<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsRef<[u8]> for FileData<'_> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl PartialEq<[u8]> for FileData<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_slice() == other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for FileData<'_> {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.as_slice() == other
    }
}

impl PartialEq<&[u8]> for FileData<'_> {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_slice() == *other
    }
}

impl fmt::Debug for FileData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            FileData::Borrowed(_) => "Borrowed",
            FileData::Shared(_) => "Shared",
        };
        f.debug_struct("FileData")
            .field("kind", &kind)
            .field("len", &self.len())
            .finish()
    }
}

/// Normalize a logical path: forward slashes, no empty or `.` segments, no leading slash.
///
/// `..` segments are kept on purpose so directory containers can detect and reject them
/// after canonicalization. Lookups stay case-sensitive.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}
