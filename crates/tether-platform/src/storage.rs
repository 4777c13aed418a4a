use std::fs;
use std::io;
use std::path::PathBuf;

use parking_lot::Mutex;
use tether_core::{StorageBackend, StoreError};

/// File-per-key JSON storage under an application directory.
///
/// Writes go through a temp file and a rename, serialized behind a mutex so
/// concurrent bindings on the same store cannot interleave a write.
pub struct FsStorage {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FsStorage {
    /// Storage rooted at the platform config dir for `app_name`
    /// (e.g. `~/.config/<app_name>/state` on Linux).
    pub fn for_app(app_name: &str) -> Result<Self, StoreError> {
        let base = dirs::config_dir()
            .ok_or_else(|| StoreError::Backend("no config directory on this platform".into()))?;
        Self::at(base.join(app_name).join("state"))
    }

    pub fn at(dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    // Keys are caller-chosen strings; anything outside [A-Za-z0-9-_.] maps
    // to '_' (distinct keys may collide if they differ only in mapped
    // characters).
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl StorageBackend for FsStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStorage::at(dir.path().join("state")).unwrap();

        assert_eq!(store.read("greeting").unwrap(), None);
        store.write("greeting", r#""hello""#).unwrap();
        assert_eq!(store.read("greeting").unwrap().as_deref(), Some(r#""hello""#));

        store.remove("greeting").unwrap();
        assert_eq!(store.read("greeting").unwrap(), None);
    }

    #[test]
    fn overwrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStorage::at(dir.path().join("state")).unwrap();

        store.write("n", "1").unwrap();
        store.write("n", "2").unwrap();
        assert_eq!(store.read("n").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn sanitizes_awkward_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStorage::at(dir.path().join("state")).unwrap();

        store.write("profile/name:v2", "true").unwrap();
        assert_eq!(store.read("profile/name:v2").unwrap().as_deref(), Some("true"));
        // No file escaped the storage dir.
        assert!(dir.path().join("state").join("profile_name_v2.json").exists());
    }

    #[test]
    fn removing_a_missing_key_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStorage::at(dir.path().join("state")).unwrap();
        store.remove("never-written").unwrap();
    }
}
