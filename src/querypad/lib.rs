//! # Querypad Architecture
//!
//! Querypad is a **UI-agnostic playground library**. The terminal front end is
//! one client of it; the same core could sit behind a web UI or a language
//! server without changing a line of the loop logic.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Front end (tui/, args.rs, wired by main.rs)                │
//! │  - Terminal I/O, key handling, argument parsing, exit codes │
//! │  - The ONLY place that knows about stdout/stderr/the screen │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Playground controller (playground.rs)                      │
//! │  - Owns the source buffer and the derived rendered buffer   │
//! │  - One edit notification in, one save + one render out      │
//! └─────────────────────────────────────────────────────────────┘
//!                   │                        │
//!                   ▼                        ▼
//! ┌──────────────────────────┐  ┌──────────────────────────────┐
//! │  Render adapter          │  │  Share codec (share/)        │
//! │  (render.rs)             │  │  - Lossless text ↔ token     │
//! │  - Transform trait seam  │  │  - Fragment trait seam       │
//! │  - Failure containment   │  │  - SessionFile / in-memory   │
//! └──────────────────────────┘  └──────────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Query formatter (query/)                                   │
//! │  - Lexer, parser, width-aware pretty printer                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Every Edit Is a Full Pass
//!
//! The controller never caches across edits and never debounces. Each change
//! notification re-derives the rendered buffer and the share token from the
//! current source, in order, before the next notification is looked at. The
//! front end delivers notifications on a single sequential event stream, so
//! there is no reentrancy to guard against.
//!
//! ## Failure Policy
//!
//! Nothing in the loop is fatal. A query the formatter rejects becomes visible
//! error text in the output pane; a share token that fails to decode at
//! startup degrades to the built-in sample document plus a logged warning. The
//! source buffer is never touched by a failure.
//!
//! ## Module Overview
//!
//! - [`playground`]: The controller, startup sequence and the edit loop
//! - [`render`]: The [`render::Transform`] seam and result wrapping
//! - [`share`]: Token encode/decode and the session fragment
//! - [`query`]: The tree-sitter query formatter itself
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - [`tui`]: The ratatui front end (terminal-only, not used by the core)

pub mod config;
pub mod error;
pub mod playground;
pub mod query;
pub mod render;
pub mod share;
pub mod tui;
