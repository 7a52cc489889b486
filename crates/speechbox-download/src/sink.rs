//! Saving downloaded audio into a directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use speechbox_core::{AudioSink, SaveError};

/// An [`AudioSink`] that writes files into one directory.
///
/// Each file is written to a temporary file in the target directory and then
/// renamed into place, so a failed or interrupted save never leaves a
/// truncated `speech*.mp3` behind. The temporary file is removed on every
/// error path when it goes out of scope.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// A bare file name: no separators, no `.`/`..`.
fn validate_file_name(name: &str) -> Result<(), SaveError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.contains('\0');
    if bad {
        return Err(SaveError::InvalidName(name.to_string()));
    }
    Ok(())
}

impl AudioSink for DirectorySink {
    fn save(&self, file_name: &str, audio: &[u8]) -> Result<PathBuf, SaveError> {
        validate_file_name(file_name)?;

        std::fs::create_dir_all(&self.dir).map_err(|e| SaveError::from_io_error(&e))?;

        let mut temp = NamedTempFile::new_in(&self.dir).map_err(|e| SaveError::from_io_error(&e))?;
        temp.write_all(audio)
            .and_then(|()| temp.flush())
            .map_err(|e| SaveError::from_io_error(&e))?;

        let target = self.dir.join(file_name);
        temp.persist(&target)
            .map_err(|e| SaveError::from_io_error(&e.error))?;

        tracing::debug!(path = %target.display(), bytes = audio.len(), "Saved audio file");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_writes_file() {
        let dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(dir.path());

        let path = sink.save("speech.mp3", b"ID3data").unwrap();
        assert_eq!(path, dir.path().join("speech.mp3"));
        assert_eq!(std::fs::read(&path).unwrap(), b"ID3data");
    }

    #[test]
    fn test_save_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(dir.path());

        sink.save("speech.mp3", b"old").unwrap();
        sink.save("speech.mp3", b"new").unwrap();
        assert_eq!(std::fs::read(dir.path().join("speech.mp3")).unwrap(), b"new");
    }

    #[test]
    fn test_save_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let sink = DirectorySink::new(&nested);

        let path = sink.save("speech_part_1.mp3", b"x").unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(dir.path());
        sink.save("speech.mp3", b"x").unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("speech.mp3")]);
    }

    #[test]
    fn test_rejects_path_like_names() {
        let dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(dir.path());

        for name in ["", ".", "..", "../escape.mp3", "sub/file.mp3", "a\\b.mp3"] {
            assert!(
                matches!(sink.save(name, b"x"), Err(SaveError::InvalidName(_))),
                "accepted {name:?}"
            );
        }
    }
}
