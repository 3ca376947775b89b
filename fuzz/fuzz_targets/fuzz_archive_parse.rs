#![no_main]

use libfuzzer_sys::fuzz_target;
use wallpaper_assets::{ArchiveContainer, Container};

fuzz_target!(|data: &[u8]| {
    // Try to parse the archive - should never panic
    let archive = match ArchiveContainer::from_bytes("fuzz.pkg", data.to_vec()) {
        Ok(a) => a,
        Err(_) => return, // Expected for invalid data
    };

    // Every listed entry was validated at construction, so every read must succeed
    let files: Vec<String> = archive.list_files().to_vec();
    for file in &files {
        let view = archive.read_file(file).expect("listed entry must be readable");
        let _ = view.len();
    }

    // Lookups with odd paths - should never panic
    let _ = archive.contains("scene.json");
    let _ = archive.contains("");
    let _ = archive.contains("/");
    let _ = archive.contains("../../../etc/passwd");
    let _ = archive.entry_count();
});
