//! wallpaper-assets: layered asset containers for animated wallpapers
//!
//! A wallpaper's files can live in its own folder, in a packed `PKGV` archive next to it,
//! or in the engine's shared assets directory. This crate puts all of them behind one
//! read interface:
//! - Directory containers with a lazily filled, thread-safe per-file cache
//! - Archive containers parsing the packed format once, then serving zero-copy views
//! - A layered container searching its layers in override order
//!
//! # Example
//!
//! ```no_run
//! use wallpaper_assets::{ArchiveContainer, Container, DirectoryContainer, LayeredContainer};
//!
//! let mut assets = LayeredContainer::new();
//! assets.add(DirectoryContainer::new("wallpaper")?);
//! assets.add(ArchiveContainer::open("wallpaper/scene.pkg")?);
//! assets.add(DirectoryContainer::new("assets")?);
//!
//! let shader = assets.read_file("shaders/generic.frag")?;
//! println!("{} bytes", shader.len());
//! # Ok::<(), wallpaper_assets::AssetError>(())
//! ```

// Core modules
pub mod archive;
pub mod bootstrap;
pub mod config;
pub mod container;
pub mod directory;
pub mod entry;
pub mod error;
pub mod layered;

// Re-export commonly used types
pub use archive::{ArchiveContainer, LoadStrategy, PackageHeader, MAGIC_PREFIX};
pub use config::{AssetsConfig, InvalidArchivePolicy};
pub use container::{Container, ContainerExt};
pub use directory::DirectoryContainer;
pub use entry::{normalize_path, FileData, FileEntry, Origin};
pub use error::{AssetError, Result};
pub use layered::LayeredContainer;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Ensure core types are accessible
        let _strategy = LoadStrategy::Buffered;
        let layered = LayeredContainer::new();
        let _as_dyn: &dyn Container = &layered;
    }
}
