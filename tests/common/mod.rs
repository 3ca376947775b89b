//! Shared helpers for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Append a `u32` length-prefixed string
pub fn push_sized(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(bytes);
}

/// Raw archive bytes with an explicit directory and data region
pub fn raw_archive(header: &[u8], entries: &[(&str, u32, u32)], data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    push_sized(&mut out, header);
    out.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    for (path, offset, length) in entries {
        push_sized(&mut out, path.as_bytes());
        out.extend_from_slice(&offset.to_le_bytes());
        out.extend_from_slice(&length.to_le_bytes());
    }
    out.extend_from_slice(data);
    out
}

/// Pack files back to back into a `PKGV0001` archive
pub fn pack(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut entries = Vec::with_capacity(files.len());
    let mut data = Vec::new();
    for (path, contents) in files {
        entries.push((*path, data.len() as u32, contents.len() as u32));
        data.extend_from_slice(contents);
    }
    raw_archive(b"PKGV0001", &entries, &data)
}

/// Write files (creating parent folders) under `root`
pub fn write_tree(root: &Path, files: &[(&str, &[u8])]) {
    for (path, contents) in files {
        let full = root.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, contents).unwrap();
    }
}
