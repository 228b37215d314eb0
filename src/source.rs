use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, ErrorKind, Result};

pub const CALIN_FILE_EXT: &'static str = ".calin";

pub fn has_calin_ext(path: &str) -> bool {
    path.ends_with(CALIN_FILE_EXT)
}

/// Loads the text of a description file.
pub trait Source {
    fn fetch(&self, path: &str) -> Result<String>;
}

/// Reads description files from disk. Relative paths, including the ones
/// named by `include`, are resolved against `root`.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: &Path) -> Self {
        FsSource {
            root: root.to_owned(),
        }
    }
}

impl Default for FsSource {
    fn default() -> Self {
        Self::new(Path::new("."))
    }
}

impl Source for FsSource {
    fn fetch(&self, path: &str) -> Result<String> {
        if !has_calin_ext(path) {
            return Err(Error::new(ErrorKind::Extension, path));
        }

        Ok(fs::read_to_string(self.root.join(path))?)
    }
}

/// Description files held in memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: &str, content: &str) {
        self.files.insert(path.to_owned(), content.to_owned());
    }
}

impl Source for MemorySource {
    fn fetch(&self, path: &str) -> Result<String> {
        if !has_calin_ext(path) {
            return Err(Error::new(ErrorKind::Extension, path));
        }

        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::from(std::io::ErrorKind::NotFound).with_msg(path))
    }
}
