use super::Fragment;
use std::io;

/// In-memory fragment for tests: no filesystem, fast, isolated.
#[derive(Debug, Default)]
pub struct MemoryFragment {
    token: Option<String>,
}

impl MemoryFragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a fragment with an already-stored token, as if a previous
    /// session had saved it.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl Fragment for MemoryFragment {
    fn get(&self) -> io::Result<Option<String>> {
        Ok(self.token.clone())
    }

    fn set(&mut self, token: &str) -> io::Result<()> {
        self.token = Some(token.to_string());
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.token = None;
        Ok(())
    }
}
