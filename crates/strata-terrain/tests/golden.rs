//! Golden-file checks for seed 356556635, chunk (0, 0).
//!
//! `test_golden_matches_checked_in_file` compares against
//! `tests/golden/chunk_0_0.golden`, which pins the output across commits and
//! toolchains. Set `STRATA_BLESS=1` to rewrite it after an intended change; a
//! missing file is written on first run and must then be committed.
//!
//! `test_golden_file_across_processes` re-runs this test binary twice,
//! filtered to `golden_child`. The first child writes a scratch golden file;
//! the second recomputes the chunk and compares against it.

use std::path::{Path, PathBuf};
use std::process::Command;

use strata_terrain::{generate_chunk, hash_chunk_data};

const SEED: u64 = 356_556_635;
const GOLDEN_ENV: &str = "STRATA_GOLDEN_FILE";
const BLESS_ENV: &str = "STRATA_BLESS";

fn pinned_golden_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("golden")
        .join("chunk_0_0.golden")
}

fn render_golden() -> String {
    let chunk = generate_chunk(SEED, 0, 0).unwrap();
    let heights: Vec<String> = chunk.heights().iter().map(i16::to_string).collect();
    let biomes: Vec<String> = chunk.biome_ids().iter().map(u8::to_string).collect();
    format!(
        "heights: {}\nbiomes: {}\ndigest: {:016x}\n",
        heights.join(","),
        biomes.join(","),
        hash_chunk_data(&chunk)
    )
}

fn run_child(golden: &Path) -> std::process::Output {
    let exe = std::env::current_exe().unwrap();
    Command::new(exe)
        .args(["golden_child", "--exact", "--nocapture", "--test-threads=1", "--quiet"])
        .env(GOLDEN_ENV, golden)
        .output()
        .unwrap()
}

/// Runs only when spawned by `test_golden_file_across_processes`.
#[test]
fn golden_child() {
    let Some(path) = std::env::var_os(GOLDEN_ENV) else {
        return;
    };
    let rendered = render_golden();
    match std::fs::read_to_string(&path) {
        Ok(golden) => assert_eq!(golden, rendered, "Chunk (0, 0) differs from golden file"),
        Err(_) => std::fs::write(&path, &rendered).unwrap(),
    }
    println!("golden-digest: {}", rendered.lines().last().unwrap_or_default());
}

#[test]
fn test_golden_file_across_processes() {
    let dir = tempfile::tempdir().unwrap();
    let golden = dir.path().join("chunk_0_0.golden");

    let first = run_child(&golden);
    assert!(first.status.success(), "First run failed: {first:?}");
    assert!(golden.exists(), "First run did not write the golden file");

    let second = run_child(&golden);
    assert!(
        second.status.success(),
        "Second process disagreed with the golden file: {}",
        String::from_utf8_lossy(&second.stdout)
    );

    let digest_line = |output: &std::process::Output| {
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .find(|line| line.starts_with("golden-digest:"))
            .map(str::to_owned)
    };
    let first_digest = digest_line(&first);
    assert!(first_digest.is_some(), "Child did not report a digest");
    assert_eq!(first_digest, digest_line(&second));

    // The in-process result matches what the children agreed on.
    let golden_text = std::fs::read_to_string(&golden).unwrap();
    assert_eq!(golden_text, render_golden());
    assert_eq!(golden_text.lines().count(), 3);
    let heights = golden_text.lines().next().unwrap_or_default();
    assert_eq!(heights.split(',').count(), 256);
}

#[test]
fn test_golden_matches_checked_in_file() {
    let path = pinned_golden_path();
    let rendered = render_golden();
    let bless = std::env::var_os(BLESS_ENV).is_some_and(|v| v == "1");

    if bless || !path.exists() {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, &rendered).unwrap();
        eprintln!("Wrote golden file {}", path.display());
        return;
    }

    let golden = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        golden.replace("\r\n", "\n"),
        rendered,
        "Chunk (0, 0) no longer matches {}; rerun with {BLESS_ENV}=1 if the change is intended",
        path.display()
    );
}
