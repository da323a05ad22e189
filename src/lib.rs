//! # pathwalk
//!
//! Depth-first, pre-order filesystem walker steered by a single visitor
//! callback.
//!
//! The visitor sees every entry, the root included, together with its full
//! path and any I/O error met while reading it. What it returns decides what
//! happens next: carry on, skip a subtree, or abort the whole walk with an
//! error of its own choosing. Symbolic links are reported, never followed.
//!
//! pathwalk owns the traversal order and the control-flow contract. It does
//! **not** own output formatting or error policy. Whether an unreadable
//! directory is fatal is up to the visitor.
//!
//! # Quick Start
//!
//! ```rust
//! use pathwalk::{WalkError, WalkState};
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::create_dir(dir.path().join("src")).unwrap();
//! std::fs::write(dir.path().join("src/lib.rs"), "").unwrap();
//! std::fs::create_dir(dir.path().join(".git")).unwrap();
//!
//! let mut seen = Vec::new();
//! pathwalk::walk(dir.path(), |err, path, entry| {
//!     if let Some(err) = err {
//!         return Err(err);
//!     }
//!     // tempdir names start with `.tmp`, so leave the root alone
//!     if entry.is_some_and(|e| e.depth > 0 && e.is_hidden()) {
//!         return Ok(WalkState::SkipDir);
//!     }
//!     seen.push(path.to_path_buf());
//!     Ok::<_, WalkError>(WalkState::Continue)
//! })
//! .unwrap();
//!
//! assert_eq!(seen.len(), 3); // root, src, src/lib.rs
//! ```
//!
//! # Configured walkers
//!
//! Bind options once with [`create()`] (or the [`Walker`] builder) and reuse
//! the result:
//!
//! ```rust
//! use pathwalk::{filters, WalkConfig, WalkError, WalkState};
//!
//! let walker = pathwalk::create(WalkConfig {
//!     sort: Some(filters::chain(filters::skip_hidden(), filters::by_name())),
//!     ..WalkConfig::default()
//! });
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("b.txt"), "").unwrap();
//! std::fs::write(dir.path().join("a.txt"), "").unwrap();
//!
//! let mut names = Vec::new();
//! walker
//!     .walk(dir.path(), |_err, _path, entry| {
//!         if let Some(entry) = entry {
//!             names.push(entry.name_lossy().into_owned());
//!         }
//!         Ok::<_, WalkError>(WalkState::Continue)
//!     })
//!     .unwrap();
//!
//! assert_eq!(&names[1..], ["a.txt", "b.txt"]);
//! ```
//!
//! # Stopping early
//!
//! There is no cancellation token. To stop the whole walk once something is
//! found, return an error from the visitor and recognise it at the call site.
//!
//! # Custom filesystems
//!
//! Implement [`FileSystem`] to walk anything with the same rules and hand it
//! to [`Walker::with_fs`].

#![forbid(unsafe_code)]

pub mod filters;

mod builder;
mod engine;
mod entry;
mod error;
mod fs;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::Walker;
pub use engine::{SortFn, WalkConfig, WalkState};
pub use entry::{resolve, Child, Entry, EntryKind, Metadata};
pub use error::WalkError;
pub use fs::OsFs;
pub use traits::FileSystem;

// ── Entry points ──────────────────────────────────────────────────────────────

/// Walk `root` on the real filesystem with default options.
///
/// Shorthand for `Walker::new().walk(root, visitor)`. See [`Walker::walk`]
/// for the visitor contract.
///
/// # Errors
///
/// Returns the first error the visitor returns.
pub fn walk<P, V, E>(root: P, visitor: V) -> Result<(), E>
where
    P: AsRef<std::path::Path>,
    V: FnMut(Option<WalkError>, &std::path::Path, Option<&Entry>) -> Result<WalkState, E>,
{
    Walker::new().walk(root, visitor)
}

/// Create a [`Walker`] with `config` bound in, so call sites do not have to
/// pass the same options on every walk.
pub fn create(config: WalkConfig) -> Walker {
    Walker::with_config(config)
}
