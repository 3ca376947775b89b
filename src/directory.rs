//! Directory-backed container with a lazy per-file cache

use crate::container::Container;
use crate::entry::{FileData, FileEntry, Origin};
use crate::error::{AssetError, Result};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

/// One resolved file. The bytes are filled in once by whichever reader gets there first.
#[derive(Debug)]
struct CacheSlot {
    real_path: PathBuf,
    data: OnceLock<Arc<[u8]>>,
    loading: Mutex<()>,
}

/// Container serving files out of a real directory
#[derive(Debug)]
pub struct DirectoryContainer {
    name: String,
    base: PathBuf,
    cache: RwLock<HashMap<String, Arc<CacheSlot>>>,
    disk_reads: AtomicU64,
}

impl DirectoryContainer {
    /// Open a directory container rooted at `base`
    pub fn new<P: AsRef<Path>>(base: P) -> Result<Self> {
        let requested = base.as_ref();
        let base = fs::canonicalize(requested)
            .map_err(|_| AssetError::InvalidBase(requested.to_path_buf()))?;

        if !base.is_dir() {
            return Err(AssetError::InvalidBase(requested.to_path_buf()));
        }

        info!("Directory container at {:?}", base);

        Ok(Self {
            name: base.display().to_string(),
            base,
            cache: RwLock::new(HashMap::new()),
            disk_reads: AtomicU64::new(0),
        })
    }

    /// Override the diagnostic name (defaults to the canonical base path)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Canonical root of this container
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Number of files actually read from disk so far
    pub fn disk_reads(&self) -> u64 {
        self.disk_reads.load(Ordering::Relaxed)
    }

    /// Resolve a logical path to a canonical path inside the base directory.
    ///
    /// Missing files give [`AssetError::NotFound`]; anything that canonicalizes to a
    /// location outside the base gives [`AssetError::PathEscape`].
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = path.replace('\\', "/");
        let joined = self.base.join(relative.trim_start_matches('/'));

        let real = fs::canonicalize(&joined).map_err(|e| classify(path, e))?;

        if !real.starts_with(&self.base) {
            return Err(AssetError::PathEscape {
                path: path.to_string(),
                base: self.base.clone(),
            });
        }

        if !real.is_file() {
            return Err(AssetError::NotFound(path.to_string()));
        }

        Ok(real)
    }

    /// Entry for a path that has already been looked up through this container
    pub fn cached_entry(&self, path: &str) -> Option<FileEntry> {
        let slot = self.cache.read().get(path).cloned()?;
        let origin = match slot.data.get() {
            Some(data) => Origin::Buffer(data.clone()),
            None => Origin::Disk(slot.real_path.clone()),
        };

        Some(FileEntry::new(path, origin))
    }

    /// Resolve with escapes folded into NotFound, logging them
    fn resolve_logged(&self, path: &str) -> Result<PathBuf> {
        match self.resolve(path) {
            Err(AssetError::PathEscape { path, base }) => {
                warn!("Rejected path {:?} escaping container base {:?}", path, base);
                Err(AssetError::NotFound(path))
            }
            other => other,
        }
    }

    fn slot(&self, path: &str) -> Result<Arc<CacheSlot>> {
        if let Some(slot) = self.cache.read().get(path) {
            return Ok(slot.clone());
        }

        let real_path = self.resolve_logged(path)?;
        let mut cache = self.cache.write();
        let slot = cache.entry(path.to_string()).or_insert_with(|| {
            Arc::new(CacheSlot {
                real_path,
                data: OnceLock::new(),
                loading: Mutex::new(()),
            })
        });

        Ok(slot.clone())
    }

    fn load(&self, path: &str, slot: &CacheSlot) -> Result<Arc<[u8]>> {
        if let Some(data) = slot.data.get() {
            return Ok(data.clone());
        }

        // Only one thread reads a given file; the rest wait and pick up its result
        let _guard = slot.loading.lock();
        if let Some(data) = slot.data.get() {
            return Ok(data.clone());
        }

        debug!("Loading {:?} from {:?}", path, slot.real_path);
        let bytes = fs::read(&slot.real_path).map_err(|e| classify(path, e))?;
        self.disk_reads.fetch_add(1, Ordering::Relaxed);

        let data: Arc<[u8]> = Arc::from(bytes);
        let _ = slot.data.set(data.clone());

        Ok(data)
    }
}

/// Errors meaning "no such file under that name" become NotFound; the rest are real failures
fn classify(path: &str, e: io::Error) -> AssetError {
    match e.kind() {
        io::ErrorKind::NotFound
        | io::ErrorKind::NotADirectory
        | io::ErrorKind::InvalidInput
        | io::ErrorKind::InvalidFilename => AssetError::NotFound(path.to_string()),
        _ => AssetError::IoFailure {
            path: path.to_string(),
            source: e,
        },
    }
}

impl Container for DirectoryContainer {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_file(&self, path: &str) -> Result<FileData<'_>> {
        let slot = self.slot(path)?;
        Ok(FileData::Shared(self.load(path, &slot)?))
    }

    fn resolve_real_path(&self, path: &str) -> Result<PathBuf> {
        Ok(self.slot(path)?.real_path.clone())
    }

    fn supports_real_paths(&self) -> bool {
        true
    }

    fn contains(&self, path: &str) -> bool {
        self.cache.read().contains_key(path) || self.resolve_logged(path).is_ok()
    }
}
