use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{Result, Snapshot, store::SnapshotStore, store::validate_key};

/// Snapshot store writing one JSON file per key into a directory.
///
/// Files are named `<key>.json`. Writes go to `<key>.json.tmp` first and are
/// renamed into place so a crash mid-write leaves the previous snapshot intact.
/// The directory is created lazily on the first write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory snapshots are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path used for `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn tmp_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json.tmp"))
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<Snapshot>> {
        validate_key(key)?;

        let bytes = match fs::read(self.path_for(key)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn save(&self, snapshot: Snapshot) -> Result<()> {
        validate_key(&snapshot.key)?;
        fs::create_dir_all(&self.dir)?;

        let bytes = serde_json::to_vec_pretty(&snapshot)?;
        let tmp = self.tmp_path_for(&snapshot.key);
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, self.path_for(&snapshot.key))?;

        tracing::trace!(key = %snapshot.key, revision = %snapshot.revision, "snapshot written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;

        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
