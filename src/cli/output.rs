use crate::error::{Error, Result};
use crate::export::Export;

use std::fs;
use std::path::PathBuf;

/// Folder exports are saved to.
#[derive(Debug, Clone)]
pub struct OutputDir {
    pub prefix: PathBuf,
}

impl OutputDir {
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Where `export` would be written.
    pub fn path(&self, export: &Export) -> PathBuf {
        let mut path = self.prefix.clone();
        path.push(&export.filename);
        path
    }

    pub fn write(&self, export: &Export) -> Result<PathBuf> {
        fs::create_dir_all(&self.prefix).map_err(|e| Error::output_write(&self.prefix, e))?;
        let path = self.path(export);
        fs::write(&path, &export.png).map_err(|e| Error::output_write(&path, e))?;
        Ok(path)
    }
}
