//! The persistence collaborator: a plain key-value text store. The core
//! only ever calls `get`/`set` and must keep working when writes fail, so
//! `set` reports success as a bool instead of an error.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    /// Best-effort write; returns whether it landed
    fn set(&mut self, key: &str, value: &str) -> bool;
}

/// One file per key under the data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    /// Probe writability by creating and removing a test file, the same
    /// check the UI consults before attempting any save.
    pub fn available(&self) -> bool {
        if fs::create_dir_all(&self.dir).is_err() {
            return false;
        }
        let probe = self.dir.join(".probe");
        if fs::write(&probe, "probe").is_err() {
            return false;
        }
        fs::remove_file(&probe).is_ok()
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        if fs::create_dir_all(&self.dir).is_err() {
            return false;
        }
        // Write-then-rename so a failed write never truncates the old value
        let Ok(mut tmp) = tempfile::NamedTempFile::new_in(&self.dir) else {
            return false;
        };
        if tmp.write_all(value.as_bytes()).is_err() {
            return false;
        }
        tmp.persist(self.path_for(key)).is_ok()
    }
}
