use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the cached dataset inside the cache directory
const DATASET_FILE: &str = "pokedex.json";

pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(custom_dir: Option<PathBuf>) -> Result<Self> {
        let cache_dir = match custom_dir {
            Some(dir) => dir,
            None => {
                let proj_dirs = ProjectDirs::from("", "", "pokedex-to-sqlite")
                    .context("Could not determine cache directory")?;
                proj_dirs.cache_dir().to_path_buf()
            }
        };

        fs::create_dir_all(&cache_dir).context("Failed to create cache directory")?;

        Ok(Self { cache_dir })
    }

    /// Get the cache directory path
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Path where the dataset is (or will be) cached
    pub fn dataset_path(&self) -> PathBuf {
        self.cache_dir.join(DATASET_FILE)
    }

    /// Check if a non-empty dataset is already cached
    pub fn is_cached(&self) -> bool {
        self.dataset_path()
            .metadata()
            .map(|meta| meta.len() > 0)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_dir_dataset_path() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(Some(dir.path().to_path_buf())).unwrap();

        assert_eq!(cache.cache_dir(), dir.path());
        assert_eq!(cache.dataset_path(), dir.path().join("pokedex.json"));
        assert!(!cache.is_cached());
    }

    #[test]
    fn test_empty_file_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(Some(dir.path().to_path_buf())).unwrap();

        std::fs::write(cache.dataset_path(), "").unwrap();
        assert!(!cache.is_cached());

        std::fs::write(cache.dataset_path(), "{\"pokemon\": []}").unwrap();
        assert!(cache.is_cached());
    }
}
