use super::Fragment;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const SESSION_FILENAME: &str = "session.token";

/// The production fragment: a single token file in the app data directory.
/// Absence of the file means "no saved session".
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            path: data_dir.as_ref().join(SESSION_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Fragment for SessionFile {
    fn get(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents.trim().to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&mut self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)
    }

    fn clear(&mut self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionFile::new(dir.path());
        assert_eq!(session.get().unwrap(), None);
    }

    #[test]
    fn set_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = SessionFile::new(dir.path().join("nested").join("deeper"));
        session.set("tok").unwrap();
        assert_eq!(session.get().unwrap().as_deref(), Some("tok"));
    }

    #[test]
    fn clear_is_a_no_op_when_nothing_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = SessionFile::new(dir.path());
        session.clear().unwrap();
        session.set("tok").unwrap();
        session.clear().unwrap();
        assert_eq!(session.get().unwrap(), None);
    }

    #[test]
    fn get_trims_trailing_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = SessionFile::new(dir.path());
        session.set("tok\n").unwrap();
        assert_eq!(session.get().unwrap().as_deref(), Some("tok"));
    }
}
