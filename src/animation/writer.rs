//! Artifact writers that persist serialized frames.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::format::{artifact_file_name, frame_file_name};
use crate::error::{GeneratorError, Result};

/// Commits serialized output to storage.
pub trait ArtifactWriter {
    /// Create or overwrite `<name>.<extension>` with `content`.
    fn save(&mut self, content: &str, name: &str, extension: &str) -> Result<PathBuf>;

    /// Append `content` to `<name>_frame_<frame>.json`, creating it if needed.
    fn append_frame(&mut self, content: &str, name: &str, frame: u64) -> Result<PathBuf>;
}

/// Writes artifacts into an existing directory. Missing directories are an
/// error, not created on demand.
#[derive(Debug, Clone)]
pub struct FileWriter {
    directory: PathBuf,
}

impl FileWriter {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    fn write(path: PathBuf, file: std::io::Result<File>, content: &str) -> Result<PathBuf> {
        let result = file.and_then(|mut f| {
            f.write_all(content.as_bytes())?;
            f.flush()
        });
        match result {
            Ok(()) => {
                log::info!("Wrote {} ({} bytes)", path.display(), content.len());
                Ok(path)
            }
            Err(source) => Err(GeneratorError::WriteFailure { path, source }),
        }
    }
}

impl ArtifactWriter for FileWriter {
    fn save(&mut self, content: &str, name: &str, extension: &str) -> Result<PathBuf> {
        let path = self.directory.join(artifact_file_name(name, extension));
        let file = File::create(&path);
        Self::write(path, file, content)
    }

    fn append_frame(&mut self, content: &str, name: &str, frame: u64) -> Result<PathBuf> {
        let path = self.directory.join(frame_file_name(name, frame));
        let file = OpenOptions::new().create(true).append(true).open(&path);
        Self::write(path, file, content)
    }
}

/// Keeps artifacts in memory, keyed by file name. Useful for dry runs and
/// tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    files: BTreeMap<String, String>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.files.get(file_name).map(String::as_str)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ArtifactWriter for MemoryWriter {
    fn save(&mut self, content: &str, name: &str, extension: &str) -> Result<PathBuf> {
        let file_name = artifact_file_name(name, extension);
        self.files.insert(file_name.clone(), content.to_string());
        Ok(PathBuf::from(file_name))
    }

    fn append_frame(&mut self, content: &str, name: &str, frame: u64) -> Result<PathBuf> {
        let file_name = frame_file_name(name, frame);
        self.files
            .entry(file_name.clone())
            .or_default()
            .push_str(content);
        Ok(PathBuf::from(file_name))
    }
}
