//! The read interface shared by every backing store

use crate::entry::FileData;
use crate::error::{AssetError, Result};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// A named, read-only source of logical path to bytes lookups.
///
/// Implementations must be safe to read from several threads at once; the index of a
/// container never changes after construction.
pub trait Container: Send + Sync {
    /// Name used in diagnostics and override tracing
    fn name(&self) -> &str;

    /// Read a whole file.
    ///
    /// A missing path is reported as [`AssetError::NotFound`], which callers treat as the
    /// ordinary "try somewhere else" outcome rather than a failure.
    fn read_file(&self, path: &str) -> Result<FileData<'_>>;

    /// Canonical on-disk path for consumers that need a real file (external decoders)
    fn resolve_real_path(&self, path: &str) -> Result<PathBuf> {
        Err(AssetError::NotFound(path.to_string()))
    }

    /// Whether [`Container::resolve_real_path`] can ever succeed for this container
    fn supports_real_paths(&self) -> bool {
        false
    }

    /// Check if a file exists
    fn contains(&self, path: &str) -> bool {
        self.read_file(path).is_ok()
    }
}

impl<C: Container + ?Sized> Container for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn read_file(&self, path: &str) -> Result<FileData<'_>> {
        (**self).read_file(path)
    }

    fn resolve_real_path(&self, path: &str) -> Result<PathBuf> {
        (**self).resolve_real_path(path)
    }

    fn supports_real_paths(&self) -> bool {
        (**self).supports_real_paths()
    }

    fn contains(&self, path: &str) -> bool {
        (**self).contains(path)
    }
}

/// Convenience readers available on every container
pub trait ContainerExt: Container {
    /// Read a file and decode it as UTF-8 text (shader sources, scene descriptions)
    fn read_to_string(&self, path: &str) -> Result<String> {
        let data = self.read_file(path)?;
        String::from_utf8(data.to_vec()).map_err(|_| AssetError::InvalidUtf8(path.to_string()))
    }

    /// Read the raw texture named `name`, stored as `materials/<name>.tex`
    fn read_texture(&self, name: &str) -> Result<FileData<'_>> {
        self.read_file(&format!("materials/{}.tex", name))
    }

    /// Read and deserialize a JSON document such as `project.json`
    fn read_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let data = self.read_file(path)?;
        Ok(serde_json::from_slice(&data)?)
    }
}

impl<C: Container + ?Sized> ContainerExt for C {}
