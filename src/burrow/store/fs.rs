use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use super::TreeStore;
use crate::error::{BurrowError, Result};
use crate::model::Tree;

/// File-based tree storage rooted at the burrow data directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The data directory: `$BURROW_DIR` when set, else the platform data
    /// dir (e.g. `~/.local/share/burrow` on Linux).
    pub fn default_root() -> PathBuf {
        if let Ok(dir) = std::env::var("BURROW_DIR") {
            if !dir.is_empty() {
                return PathBuf::from(dir);
            }
        }
        let dirs =
            ProjectDirs::from("com", "burrow", "burrow").expect("could not determine data dir");
        dirs.data_dir().to_path_buf()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn trees_dir(&self) -> PathBuf {
        self.root.join("trees")
    }

    fn tree_path(&self, name: &str) -> PathBuf {
        self.trees_dir().join(format!("{}.json", name))
    }

    fn current_path(&self) -> PathBuf {
        self.root.join("current")
    }

    fn ensure_dirs(&self) -> Result<()> {
        let dir = self.trees_dir();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(())
    }
}

impl TreeStore for FileStore {
    /// Atomic save: serialize to `<name>.json.tmp`, back up the previous
    /// version to `<name>.json.bak`, then rename the temp file over the
    /// target. A failure at any step leaves the previous file intact.
    fn save_tree(&mut self, tree: &Tree) -> Result<()> {
        self.ensure_dirs()?;
        let path = self.tree_path(&tree.name);
        let tmp = self.trees_dir().join(format!("{}.json.tmp", tree.name));
        let content = serde_json::to_string_pretty(tree)?;
        fs::write(&tmp, content)?;
        if path.exists() {
            let bak = self.trees_dir().join(format!("{}.json.bak", tree.name));
            fs::copy(&path, &bak)?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn load_tree(&self, name: &str) -> Result<Tree> {
        let path = self.tree_path(name);
        if !path.exists() {
            return Err(BurrowError::TreeNotFound(name.to_string()));
        }
        let content = fs::read_to_string(&path)?;
        let mut tree: Tree = serde_json::from_str(&content)?;
        tree.normalize()?;
        Ok(tree)
    }

    fn list_trees(&self) -> Result<Vec<String>> {
        let dir = self.trees_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_tree(&mut self, name: &str) -> Result<()> {
        let path = self.tree_path(name);
        if !path.exists() {
            return Err(BurrowError::TreeNotFound(name.to_string()));
        }
        fs::remove_file(&path)?;
        let bak = self.trees_dir().join(format!("{}.json.bak", name));
        if bak.exists() {
            let _ = fs::remove_file(&bak);
        }
        Ok(())
    }

    fn tree_exists(&self, name: &str) -> bool {
        self.tree_path(name).exists()
    }

    fn current_name(&self) -> Result<Option<String>> {
        let path = self.current_path();
        if !path.exists() {
            return Ok(None);
        }
        let name = fs::read_to_string(&path)?.trim().to_string();
        if name.is_empty() {
            return Ok(None);
        }
        Ok(Some(name))
    }

    fn set_current_name(&mut self, name: &str) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        fs::write(self.current_path(), name)?;
        Ok(())
    }
}
