//! Catalog ordering tests for triptych.
//!
//! These tests build randomized directory trees in temporary directories and check the
//! ordering and filtering rules of catalog loading.

use rand::Rng;
use std::fs;
use tempfile::tempdir;
use triptych::core::catalog;

const ALPHABET: &[u8] = b"abcXYZ019._-";

fn random_name(rng: &mut impl Rng) -> String {
    let len = rng.random_range(1..8);
    (0..len)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

#[test]
fn test_directories_first_each_run_sorted() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::rng();

    for _ in 0..20 {
        let dir = tempdir()?;
        for _ in 0..rng.random_range(0..15) {
            let name = random_name(&mut rng);
            if name == "." || name == ".." || dir.path().join(&name).exists() {
                continue;
            }
            if rng.random::<bool>() {
                fs::create_dir(dir.path().join(&name))?;
            } else {
                fs::write(dir.path().join(&name), name.as_bytes())?;
            }
        }

        for show_hidden in [false, true] {
            let entries = catalog::load(dir.path(), show_hidden);

            let first_file = entries.iter().position(|e| !e.is_dir()).unwrap_or(entries.len());
            assert!(
                entries[first_file..].iter().all(|e| !e.is_dir()),
                "directory listed after a file: {:?}",
                entries.iter().map(|e| e.name()).collect::<Vec<_>>()
            );

            let (dirs, files) = entries.split_at(first_file);
            assert!(dirs.windows(2).all(|w| w[0].name() < w[1].name()));
            assert!(files.windows(2).all(|w| w[0].name() < w[1].name()));

            if !show_hidden {
                assert!(entries.iter().all(|e| !e.name().starts_with('.')));
            }

            let on_disk = fs::read_dir(dir.path())?
                .filter_map(Result::ok)
                .filter(|e| show_hidden || !e.file_name().to_string_lossy().starts_with('.'))
                .count();
            assert_eq!(entries.len(), on_disk);
        }
    }
    Ok(())
}

#[test]
fn test_sizes_are_eager_and_directories_zero() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("Sub"))?;
    fs::write(dir.path().join("a.TXT"), b"12345")?;

    let entries = catalog::load(dir.path(), false);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name(), "Sub");
    assert_eq!(entries[0].size(), 0);
    assert_eq!(entries[1].size(), 5);
    assert_eq!(entries[1].ext(), "txt");
    Ok(())
}

#[test]
fn test_unreadable_directory_is_empty() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    assert!(catalog::load(&dir.path().join("missing"), true).is_empty());
    assert!(catalog::read(&dir.path().join("missing"), true).is_err());
    Ok(())
}
