//! JSON files on disk
//!
//! Records are replaced whole: the new contents go to a sibling `.json.tmp`
//! file which is synced and then renamed over the target.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::TrackerError;

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> TrackerError {
    TrackerError::Storage(format!("Could not {} {}: {}", action, path.display(), err))
}

/// Read and decode a JSON file; `Ok(None)` when the file is absent
pub fn read_json<T, P>(path: P) -> Result<Option<T>, TrackerError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(storage_error("read", path, err)),
    };

    serde_json::from_str(&text)
        .map(Some)
        .map_err(|err| storage_error("decode", path, err))
}

/// Replace `path` with the pretty-printed JSON of `data`
///
/// Readers see either the previous contents or the new ones, never a
/// partial write.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), TrackerError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|err| storage_error("create", dir, err))?;
    }

    let mut bytes =
        serde_json::to_vec_pretty(data).map_err(|err| storage_error("encode", path, err))?;
    bytes.push(b'\n');

    let staging = path.with_extension("json.tmp");
    let staged = File::create(&staging).and_then(|mut file| {
        file.write_all(&bytes)?;
        file.sync_all()
    });

    if let Err(err) = staged.and_then(|()| fs::rename(&staging, path)) {
        discard(&staging);
        return Err(storage_error("write", path, err));
    }
    Ok(())
}

fn discard(staging: &Path) {
    if let Err(err) = fs::remove_file(staging) {
        if err.kind() != ErrorKind::NotFound {
            tracing::debug!(path = %staging.display(), error = %err, "left staging file behind");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        label: String,
        count: u32,
    }

    fn sample() -> Sample {
        Sample {
            label: "groceries".into(),
            count: 3,
        }
    }

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let loaded: Option<Sample> = read_json(dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_written_file_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.json");

        write_json_atomic(&path, &sample()).unwrap();

        assert_eq!(read_json::<Sample, _>(&path).unwrap(), Some(sample()));
        assert!(!dir.path().join("sample.json.tmp").exists());
    }

    #[test]
    fn test_overwrite_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.json");

        write_json_atomic(&path, &sample()).unwrap();
        let replacement = Sample {
            label: "rent".into(),
            count: 1,
        };
        write_json_atomic(&path, &replacement).unwrap();

        assert_eq!(read_json::<Sample, _>(&path).unwrap(), Some(replacement));
    }

    #[test]
    fn test_missing_parent_directories_are_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("sample.json");

        write_json_atomic(&path, &sample()).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_unparseable_file_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let result = read_json::<Sample, _>(&path);
        assert!(matches!(result, Err(TrackerError::Storage(_))));
    }
}
