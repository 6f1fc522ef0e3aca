//! # Shareable State
//!
//! The current document is always recoverable from its share token alone;
//! there is no other persistence. This module owns both halves of that
//! promise: the lossless text ↔ token codec ([`token`]) and the policy for
//! when tokens are written and how reading them fails safe ([`ShareCodec`]).
//!
//! ## The Fragment Seam
//!
//! Where a token lives is abstracted behind the [`Fragment`] trait:
//!
//! - [`session::SessionFile`]: production, a token file in the app data dir
//! - [`memory::MemoryFragment`]: in-memory, for tests
//!
//! Centralizing reads and writes here keeps the rest of the system away from
//! ambient global state; only the codec ever touches the fragment.
//!
//! ## Failure Policy
//!
//! Neither `save` nor `load` ever raises. A fragment that cannot be written
//! or a token that cannot be decoded degrades to a `tracing` warning, and
//! `load` falls back to "nothing saved".

pub mod memory;
pub mod session;
pub mod token;

pub use memory::MemoryFragment;
pub use session::SessionFile;
pub use token::TokenError;

use tracing::warn;

/// One externally visible slot that can hold a share token.
pub trait Fragment {
    fn get(&self) -> std::io::Result<Option<String>>;
    fn set(&mut self, token: &str) -> std::io::Result<()>;
    fn clear(&mut self) -> std::io::Result<()>;
}

pub struct ShareCodec<F: Fragment> {
    fragment: F,
}

impl<F: Fragment> ShareCodec<F> {
    pub fn new(fragment: F) -> Self {
        Self { fragment }
    }

    /// Persist `source` as a token. An empty document clears the slot
    /// instead of storing a token for nothing.
    pub fn save(&mut self, source: &str) {
        let outcome = if source.is_empty() {
            self.fragment.clear()
        } else {
            match token::encode(source) {
                Ok(t) => self.fragment.set(&t),
                Err(e) => {
                    warn!("failed to encode share token: {e}");
                    return;
                }
            }
        };
        if let Err(e) = outcome {
            warn!("failed to update share token: {e}");
        }
    }

    /// Read back the saved document, if any. A missing, empty, or malformed
    /// token all come back as `None`; only the malformed case is worth a
    /// warning.
    pub fn load(&self) -> Option<String> {
        let stored = match self.fragment.get() {
            Ok(Some(t)) if !t.is_empty() => t,
            Ok(_) => return None,
            Err(e) => {
                warn!("failed to read share token: {e}");
                return None;
            }
        };
        match token::decode(&stored) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("ignoring malformed share token: {e}");
                None
            }
        }
    }

    pub fn fragment(&self) -> &F {
        &self.fragment
    }
}
