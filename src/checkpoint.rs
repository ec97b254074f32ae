//! JSON checkpoints under `data/`. After each unit of progress the full
//! accumulated batch is rewritten, so a crash mid-batch leaves a readable
//! prefix on disk. Writes are advisory, not transactional; reads of a
//! checkpoint that was never written are fatal.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::IngestError;

/// Overwrite `path` with the batch produced so far.
pub fn write<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Read a checkpoint back as the typed array it holds.
pub fn read<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(IngestError::MissingCheckpoint(path.to_path_buf()).into());
    }
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("failed to parse {}", path.display()))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IngestError;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        name: String,
        level: i32,
    }

    #[test]
    fn round_trips_a_typed_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parsed-data.json");
        let records = vec![
            Entry {
                name: "Pichu".to_string(),
                level: 1,
            },
            Entry {
                name: "Pikachu".to_string(),
                level: 10,
            },
        ];

        write(&path, &records).unwrap();
        let restored: Vec<Entry> = read(&path).unwrap();
        assert_eq!(restored, records);
    }

    #[test]
    fn rewrites_replace_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parsed-data.json");

        write(
            &path,
            &[Entry {
                name: "Pichu".to_string(),
                level: 1,
            }],
        )
        .unwrap();
        write(
            &path,
            &[
                Entry {
                    name: "Pichu".to_string(),
                    level: 1,
                },
                Entry {
                    name: "Pikachu".to_string(),
                    level: 10,
                },
            ],
        )
        .unwrap();

        let restored: Vec<Entry> = read(&path).unwrap();
        assert_eq!(restored.len(), 2);
    }

    #[test]
    fn missing_file_is_a_fatal_checkpoint_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never-written.json");
        let err = read::<Entry>(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<IngestError>(),
            Some(IngestError::MissingCheckpoint(_))
        ));
    }

    #[test]
    fn creates_parent_directory_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("parsed-data.json");
        write(
            &path,
            &[Entry {
                name: "Pichu".to_string(),
                level: 1,
            }],
        )
        .unwrap();
        assert!(path.exists());
    }
}
