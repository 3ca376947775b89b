use crate::archive::format::PackageDirectory;
use crate::container::Container;
use crate::entry::{normalize_path, FileData, FileEntry, Origin};
use crate::error::{AssetError, Result};
use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, info};

/// How the archive's bytes are kept around after the directory is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStrategy {
    /// Memory-map the file and serve reads straight from the mapping
    #[default]
    Mapped,
    /// Read the whole file into one owned buffer
    Buffered,
}

#[derive(Debug)]
enum ArchiveData {
    Buffered(Vec<u8>),
    Mapped(Mmap),
}

impl ArchiveData {
    fn bytes(&self) -> &[u8] {
        match self {
            ArchiveData::Buffered(data) => data.as_slice(),
            ArchiveData::Mapped(mmap) => &mmap[..],
        }
    }
}

/// Container backed by a single packed archive.
///
/// The directory is parsed once at construction; reads are index lookups returning views
/// into the data region.
#[derive(Debug)]
pub struct ArchiveContainer {
    name: String,
    version: u16,
    data: ArchiveData,
    data_start: usize,
    entries: HashMap<String, FileEntry>,
    entry_list: Vec<String>,
}

impl ArchiveContainer {
    /// Open an archive file, memory-mapping it
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, LoadStrategy::default())
    }

    /// Open an archive file with an explicit load strategy
    pub fn open_with<P: AsRef<Path>>(path: P, strategy: LoadStrategy) -> Result<Self> {
        let path = path.as_ref();
        let data = match strategy {
            LoadStrategy::Buffered => ArchiveData::Buffered(fs::read(path)?),
            LoadStrategy::Mapped => {
                let file = File::open(path)?;
                // The archive is treated as immutable for the lifetime of the mapping
                let mmap = unsafe { Mmap::map(&file)? };
                ArchiveData::Mapped(mmap)
            }
        };

        Self::build(path.display().to_string(), data)
    }

    /// Build an archive container over bytes already in memory
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        Self::build(name.into(), ArchiveData::Buffered(bytes))
    }

    fn build(name: String, data: ArchiveData) -> Result<Self> {
        let directory = PackageDirectory::parse(data.bytes())?;

        let mut entries = HashMap::with_capacity(directory.records.len());
        let mut entry_list = Vec::with_capacity(directory.records.len());

        for record in directory.records {
            let entry = FileEntry::new(
                record.path.clone(),
                Origin::Range {
                    offset: record.offset,
                    length: record.length,
                },
            );

            // Later records win over earlier ones with the same path
            if entries.insert(record.path.clone(), entry).is_some() {
                debug!("Duplicate entry {:?} in {}, keeping the later one", record.path, name);
            } else {
                entry_list.push(record.path);
            }
        }

        info!(
            "Archive container {} (PKGV{:04}, {} entries)",
            name,
            directory.header.version,
            entries.len()
        );

        Ok(Self {
            name,
            version: directory.header.version,
            data,
            data_start: directory.data_start,
            entries,
            entry_list,
        })
    }

    /// Format version from the header
    pub fn version(&self) -> u16 {
        self.version
    }

    /// Number of distinct paths in the archive
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// All paths in directory order, duplicates listed once
    pub fn list_files(&self) -> &[String] {
        &self.entry_list
    }

    /// Paths starting with `prefix`
    pub fn list_prefix(&self, prefix: &str) -> Vec<&String> {
        self.entry_list
            .iter()
            .filter(|path| path.starts_with(prefix))
            .collect()
    }

    /// Get entry information without reading data
    pub fn entry(&self, path: &str) -> Option<&FileEntry> {
        self.entries
            .get(path)
            .or_else(|| self.entries.get(&normalize_path(path)))
    }

    fn data_region(&self) -> &[u8] {
        &self.data.bytes()[self.data_start..]
    }
}

impl Container for ArchiveContainer {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_file(&self, path: &str) -> Result<FileData<'_>> {
        let entry = self
            .entry(path)
            .ok_or_else(|| AssetError::NotFound(path.to_string()))?;

        match entry.origin {
            Origin::Range { offset, length } => {
                let start = offset as usize;
                let end = start + length as usize;
                // Ranges were validated against the data region when the directory was parsed
                Ok(FileData::Borrowed(&self.data_region()[start..end]))
            }
            _ => Err(AssetError::NotFound(path.to_string())),
        }
    }

    fn contains(&self, path: &str) -> bool {
        self.entry(path).is_some()
    }
}
