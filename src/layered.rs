//! Override-ordered composition of containers

use crate::container::Container;
use crate::entry::FileData;
use crate::error::{AssetError, Result};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Ordered list of containers searched front to back.
///
/// The first layer added has the highest priority, so a wallpaper's own files shadow the
/// shared engine assets registered after it.
pub struct LayeredContainer {
    name: String,
    layers: Vec<Box<dyn Container>>,
}

impl LayeredContainer {
    pub fn new() -> Self {
        Self {
            name: "layered".to_string(),
            layers: Vec::new(),
        }
    }

    /// Set the diagnostic name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Append a layer below every layer already present, taking ownership of it
    pub fn add<C: Container + 'static>(&mut self, container: C) {
        self.add_boxed(Box::new(container));
    }

    pub fn add_boxed(&mut self, container: Box<dyn Container>) {
        debug!(
            "Layer {} registered at priority {}",
            container.name(),
            self.layers.len()
        );
        self.layers.push(container);
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layer names in priority order
    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|layer| layer.name()).collect()
    }

    /// Name of the layer that would answer a read of `path`
    pub fn locate(&self, path: &str) -> Option<&str> {
        self.layers
            .iter()
            .find(|layer| layer.contains(path))
            .map(|layer| layer.name())
    }
}

impl Default for LayeredContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LayeredContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredContainer")
            .field("name", &self.name)
            .field("layers", &self.layer_names())
            .finish()
    }
}

impl Container for LayeredContainer {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_file(&self, path: &str) -> Result<FileData<'_>> {
        for layer in &self.layers {
            match layer.read_file(path) {
                Ok(data) => {
                    debug!("{} served from {}", path, layer.name());
                    return Ok(data);
                }
                Err(e) if e.is_not_found() => {}
                Err(e) => {
                    // A broken local copy must not hide a usable shared one
                    warn!("Layer {} failed to read {}: {}", layer.name(), path, e);
                }
            }
        }

        Err(AssetError::NotFound(path.to_string()))
    }

    fn resolve_real_path(&self, path: &str) -> Result<PathBuf> {
        for layer in self.layers.iter().filter(|layer| layer.supports_real_paths()) {
            match layer.resolve_real_path(path) {
                Ok(real) => return Ok(real),
                Err(e) if e.is_not_found() => {}
                Err(e) => {
                    warn!("Layer {} failed to resolve {}: {}", layer.name(), path, e);
                }
            }
        }

        Err(AssetError::NotFound(path.to_string()))
    }

    fn supports_real_paths(&self) -> bool {
        self.layers.iter().any(|layer| layer.supports_real_paths())
    }

    fn contains(&self, path: &str) -> bool {
        self.layers.iter().any(|layer| layer.contains(path))
    }
}
