//! Workbench root directory management.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::services::{PLATFORMS_DIR, scaffold};

/// Directory holding the layered configuration tree.
pub const KNOWLEDGE_DIR: &str = "knowledge";

/// Directory holding job outputs and scratch space.
pub const DATA_DIR: &str = "data";

/// A workbench rooted at a directory containing `knowledge/` and `data/`.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Create a workspace instance for the given root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a workspace instance for the current directory.
    pub fn current() -> Result<Self, AppError> {
        let cwd = std::env::current_dir()?;
        Ok(Self::new(cwd))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn knowledge_root(&self) -> PathBuf {
        self.root.join(KNOWLEDGE_DIR)
    }

    pub fn platforms_root(&self) -> PathBuf {
        self.knowledge_root().join(PLATFORMS_DIR)
    }

    pub fn data_root(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    pub fn outputs_root(&self) -> PathBuf {
        self.data_root().join("outputs")
    }

    pub fn store_root(&self) -> PathBuf {
        self.data_root().join("store")
    }

    pub fn tmp_root(&self) -> PathBuf {
        self.data_root().join("tmp")
    }

    /// Check whether a knowledge tree exists at this root.
    pub fn is_initialized(&self) -> bool {
        self.knowledge_root().is_dir()
    }

    pub fn ensure_initialized(&self) -> Result<(), AppError> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(AppError::WorkbenchNotFound(self.root.display().to_string()))
        }
    }

    /// Create the complete workbench directory structure with starter files.
    ///
    /// Fails if a knowledge tree is already present; starter files are meant
    /// to be taken over by the operator, never regenerated over their edits.
    pub fn create_structure(&self) -> Result<(), AppError> {
        if self.is_initialized() {
            return Err(AppError::AlreadyInitialized(
                self.knowledge_root().display().to_string(),
            ));
        }

        for dir in scaffold::directories() {
            fs::create_dir_all(self.root.join(dir))?;
        }

        for entry in scaffold::starter_files() {
            let path = self.root.join(entry.path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, entry.content)?;
        }

        Ok(())
    }
}
