//! Generate seed corpus for fuzzing

use std::fs;

fn push_sized(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(bytes);
}

fn archive(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut out = Vec::new();
    push_sized(&mut out, b"PKGV0001");
    out.extend_from_slice(&(files.len() as u32).to_le_bytes());

    let mut offset = 0u32;
    for (path, contents) in files {
        push_sized(&mut out, path.as_bytes());
        out.extend_from_slice(&offset.to_le_bytes());
        out.extend_from_slice(&(contents.len() as u32).to_le_bytes());
        offset += contents.len() as u32;
    }
    for (_, contents) in files {
        out.extend_from_slice(contents);
    }
    out
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let corpus_dir = "fuzz/corpus/fuzz_archive_parse";
    fs::create_dir_all(corpus_dir)?;

    println!("Generating seed corpus...");

    let binary: Vec<u8> = (0..=255u8).collect();
    let seeds: Vec<(&str, Vec<u8>)> = vec![
        ("seed_empty.pkg", archive(&[])),
        ("seed_single.pkg", archive(&[("scene.json", b"{\"objects\":[]}")])),
        (
            "seed_multi.pkg",
            archive(&[
                ("project.json", b"{}"),
                ("materials/a.tex", b"TEXV0005"),
                ("shaders/effect.frag", b"void main() {}"),
            ]),
        ),
        ("seed_binary.pkg", archive(&[("binary.bin", &binary)])),
        ("seed_zero_length.pkg", archive(&[("empty.txt", b"")])),
        (
            "seed_duplicate.pkg",
            archive(&[("a.txt", b"first"), ("a.txt", b"second")]),
        ),
    ];

    for (name, bytes) in seeds {
        let path = format!("{}/{}", corpus_dir, name);
        fs::write(&path, bytes)?;
        println!("Generated: {}", path);
    }

    Ok(())
}
