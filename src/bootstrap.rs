//! Assembly of the standard layer stack for one wallpaper
//!
//! Priority, highest first: the wallpaper folder, the wallpaper's packed archive (when it
//! ships one), then the shared engine assets directory.

use crate::archive::ArchiveContainer;
use crate::config::{AssetsConfig, InvalidArchivePolicy};
use crate::directory::DirectoryContainer;
use crate::error::{AssetError, Result};
use crate::layered::LayeredContainer;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Build the layered container for the wallpaper stored in `wallpaper_dir`.
///
/// A missing archive is the normal case and leaves the stack directory-only. An archive
/// that exists but fails to parse is handled per `config.archive.on_invalid`.
pub fn assemble<P: AsRef<Path>>(wallpaper_dir: P, config: &AssetsConfig) -> Result<LayeredContainer> {
    let home = env::var_os("HOME").map(PathBuf::from);
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    let assets_dir = locate_assets_dir(config, home.as_deref(), exe_dir.as_deref())?;
    assemble_with_assets(wallpaper_dir, &assets_dir, config)
}

/// Same as [`assemble`] with the shared assets directory already chosen
pub fn assemble_with_assets<P: AsRef<Path>, Q: AsRef<Path>>(
    wallpaper_dir: P,
    assets_dir: Q,
    config: &AssetsConfig,
) -> Result<LayeredContainer> {
    let wallpaper_dir = wallpaper_dir.as_ref();
    let mut layers = LayeredContainer::new().with_name(wallpaper_dir.display().to_string());

    layers.add(DirectoryContainer::new(wallpaper_dir)?.with_name("wallpaper"));

    let archive_path = wallpaper_dir.join(&config.archive.file_name);
    if archive_path.is_file() {
        match ArchiveContainer::open_with(&archive_path, config.archive.load) {
            Ok(archive) => {
                info!("Detected {:?}, adding it to the searchable paths", archive_path);
                layers.add(archive);
            }
            Err(e) => match config.archive.on_invalid {
                InvalidArchivePolicy::Fail => return Err(e),
                InvalidArchivePolicy::Skip => {
                    warn!("Ignoring unreadable archive {:?}: {}", archive_path, e);
                }
            },
        }
    } else {
        info!(
            "No {} in {:?}, using plain folder storage",
            config.archive.file_name, wallpaper_dir
        );
    }

    layers.add(DirectoryContainer::new(assets_dir)?.with_name("assets"));

    Ok(layers)
}

/// Pick the shared assets directory.
///
/// An explicitly configured directory must exist; otherwise the configured search paths are
/// tried under `home`, then an `assets` folder next to the executable.
pub fn locate_assets_dir(
    config: &AssetsConfig,
    home: Option<&Path>,
    exe_dir: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(dir) = &config.assets.dir {
        if dir.is_dir() {
            info!("Using assets at {:?} from configuration", dir);
            return Ok(dir.clone());
        }
        return Err(AssetError::AssetsDirNotFound(format!(
            "configured directory {:?} is not a directory",
            dir
        )));
    }

    if let Some(home) = home {
        for candidate in &config.assets.search_paths {
            let path = home.join(candidate);
            if path.is_dir() {
                info!("Found assets at {:?}", path);
                return Ok(path);
            }
        }
    }

    if let Some(exe_dir) = exe_dir {
        let path = exe_dir.join("assets");
        if path.is_dir() {
            info!("Found assets folder alongside the binary: {:?}", path);
            return Ok(path);
        }
    }

    Err(AssetError::AssetsDirNotFound(
        "no configured directory, search path, or assets folder beside the binary".to_string(),
    ))
}
