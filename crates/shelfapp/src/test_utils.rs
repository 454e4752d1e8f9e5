use crate::store::fs::FileStore;
use crate::store::fs_backend::DEFAULT_SLOT;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub store: FileStore,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let store = FileStore::new(root.clone(), DEFAULT_SLOT);
        Self {
            _temp_dir: temp_dir,
            store,
            root,
        }
    }

    /// A fresh store over the same directory, as a new session would see it.
    pub fn reopen(&self) -> FileStore {
        FileStore::new(self.root.clone(), DEFAULT_SLOT)
    }
}
