use std::path::PathBuf;
use tempfile::TempDir;

/// Temporary directory backing a `LocalStorage` under test.
pub struct TestStorage {
    pub temp_dir: TempDir,
    pub base_path: PathBuf,
    pub base_url: String,
}

impl TestStorage {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let base_path = temp_dir.path().to_path_buf();
        let base_url = "http://localhost:8080/files".to_string();
        Self {
            temp_dir,
            base_path,
            base_url,
        }
    }

    /// Path a storage key lands on.
    pub fn path_of(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }
}

impl Default for TestStorage {
    fn default() -> Self {
        Self::new()
    }
}
