use std::fs::File;
use std::path::{Path, PathBuf};

use tempfile::TempPath;

use crate::{Error, Result};

#[derive(Clone, Copy, Debug)]
pub struct StageOptions {
    prefix:        &'static str,
    suffix:        &'static str,
    create_parent: bool,
}

impl Default for StageOptions {
    fn default() -> Self { Self::new() }
}

impl StageOptions {
    pub fn new() -> Self {
        Self {
            prefix:        ".",
            suffix:        ".part",
            create_parent: true,
        }
    }

    pub fn prefix(mut self, prefix: &'static str) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn suffix(mut self, suffix: &'static str) -> Self {
        self.suffix = suffix;
        self
    }

    pub fn create_parent(mut self, create_parent: bool) -> Self {
        self.create_parent = create_parent;
        self
    }

    pub fn prefix_str(&self) -> &'static str { self.prefix }

    pub fn suffix_str(&self) -> &'static str { self.suffix }
}

/// A file being written next to its final destination.
///
/// The staging file lives in the destination's directory so that
/// [`StagedFile::commit`] is a same-filesystem rename. Dropping an
/// uncommitted `StagedFile` deletes the staging file.
pub struct StagedFile {
    temp:        TempPath,
    destination: PathBuf,
}

impl StagedFile {
    /// Create the staging file and return it together with a writable handle.
    pub fn create(destination: impl AsRef<Path>, options: StageOptions) -> Result<(Self, File)> {
        let destination = destination.as_ref().to_path_buf();
        let parent = match destination.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => return Err(Error::NoParent(destination)),
        };
        let file_name = destination
            .file_name()
            .ok_or_else(|| Error::NoFileName(destination.clone()))?
            .to_string_lossy()
            .into_owned();

        if options.create_parent && !parent.exists() {
            std::fs::create_dir_all(&parent).map_err(|e| Error::CreateDir {
                path:   parent.clone(),
                source: e,
            })?;
        }

        let prefix = format!("{}{}.", options.prefix, file_name);
        let temp = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(options.suffix)
            .tempfile_in(&parent)
            .map_err(|e| Error::Stage {
                path:   parent.clone(),
                source: e,
            })?;
        let (file, temp) = temp.into_parts();

        tracing::trace!(staging = %temp.display(), destination = %destination.display(), "staged file");

        Ok((Self { temp, destination }, file))
    }

    pub fn path(&self) -> &Path { &self.temp }

    pub fn destination(&self) -> &Path { &self.destination }

    /// Atomically move the staged content onto the destination.
    ///
    /// An existing file at the destination is replaced.
    pub fn commit(self) -> Result<PathBuf> {
        let Self { temp, destination } = self;
        temp.persist(&destination).map_err(|e| Error::Commit {
            path:   destination.clone(),
            source: e.error,
        })?;
        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_commit_moves_content() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let dest = dir.path().join("doc.pdf");

        let (staged, mut file) = StagedFile::create(&dest, StageOptions::new())?;
        file.write_all(b"payload")?;
        drop(file);

        assert!(!dest.exists());
        let staging = staged.path().to_path_buf();
        let committed = staged.commit()?;

        assert_eq!(committed, dest);
        assert_eq!(std::fs::read(&dest)?, b"payload");
        assert!(!staging.exists());
        Ok(())
    }

    #[test]
    fn test_drop_removes_staging_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let dest = dir.path().join("doc.pdf");

        let staging = {
            let (staged, mut file) = StagedFile::create(&dest, StageOptions::new())?;
            file.write_all(b"partial")?;
            staged.path().to_path_buf()
        };

        assert!(!staging.exists());
        assert!(!dest.exists());
        Ok(())
    }

    #[test]
    fn test_staging_name_is_hidden_sibling() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let dest = dir.path().join("doc.pdf");

        let (staged, _file) = StagedFile::create(&dest, StageOptions::new())?;
        let name = staged.path().file_name().unwrap().to_string_lossy().into_owned();

        assert_eq!(staged.path().parent(), Some(dir.path()));
        assert!(name.starts_with(".doc.pdf."));
        assert!(name.ends_with(".part"));
        Ok(())
    }

    #[test]
    fn test_creates_missing_parent() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let dest = dir.path().join("nested").join("doc.pdf");

        let (staged, _file) = StagedFile::create(&dest, StageOptions::new())?;
        assert!(dir.path().join("nested").is_dir());
        staged.commit()?;
        assert!(dest.is_file());
        Ok(())
    }

    #[test]
    fn test_missing_parent_without_create() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("absent").join("doc.pdf");

        let result = StagedFile::create(&dest, StageOptions::new().create_parent(false));
        assert!(matches!(result, Err(Error::Stage { .. })));
    }

    #[test]
    fn test_bare_file_name_has_no_parent() {
        let result = StagedFile::create("doc.pdf", StageOptions::new());
        assert!(matches!(result, Err(Error::NoParent(_))));
    }
}
