use super::book_store::BookStore;
use super::fs_backend::FsBackend;
use std::path::PathBuf;

pub type FileStore = BookStore<FsBackend>;

impl FileStore {
    /// A hydrated store over `<root>/<slot>.json`.
    pub fn new(root: PathBuf, slot: &str) -> Self {
        BookStore::open(FsBackend::new(root).with_slot(slot))
    }

    pub fn slot_path(&self) -> PathBuf {
        self.backend.slot_path()
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{BookPatch, NewBook, ReadingStatus};
    use crate::test_utils::TestEnv;
    use std::fs;

    #[test]
    fn mutations_survive_reopen() {
        let mut env = TestEnv::new();
        let dune = env.store.add(NewBook::new("Dune")).unwrap().unwrap();
        let emma = env.store.add(NewBook::new("Emma")).unwrap().unwrap();
        env.store
            .update(dune.id, BookPatch::new().status(ReadingStatus::Finished))
            .unwrap();
        env.store.delete(emma.id).unwrap();

        let reopened = env.reopen();
        assert_eq!(reopened.books(), env.store.books());
        assert_eq!(reopened.books()[0].status, ReadingStatus::Finished);
    }

    #[test]
    fn slot_file_is_a_json_list() {
        let mut env = TestEnv::new();
        env.store.add(NewBook::new("Dune")).unwrap();

        let text = fs::read_to_string(env.store.slot_path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["title"], "Dune");
        assert_eq!(value[0]["status"], "want-to-read");
        assert!(value[0]["dateAdded"].is_string());
    }

    #[test]
    fn fresh_directory_loads_empty() {
        let env = TestEnv::new();
        assert!(env.store.is_empty());
        assert!(!env.store.slot_path().exists());
    }
}
