use std::path::Path;
use std::sync::Arc;

use crate::engine::{run, SortFn, WalkConfig, WalkState};
use crate::entry::{Child, Entry};
use crate::error::WalkError;
use crate::fs::OsFs;
use crate::traits::FileSystem;

// ---------------------------------------------------------------------------
// Walker
// ---------------------------------------------------------------------------

/// A walk entry point with its options bound in.
///
/// Created via [`pathwalk::create()`](crate::create) or [`Walker::new()`].
/// Configure with chained builder methods, then call
/// [`walk()`](Walker::walk) as many times as needed. Every call uses the
/// same options.
///
/// # Example
///
/// ```rust,no_run
/// use pathwalk::{filters, WalkError, WalkState, Walker};
///
/// let walker = Walker::new()
///     .sort_by(filters::by_name())
///     .max_depth(2);
///
/// walker.walk("src", |err, path, entry| {
///     if let Some(err) = err {
///         return Err(err);
///     }
///     println!("{} {:?}", path.display(), entry.map(|e| e.kind));
///     Ok::<_, WalkError>(WalkState::Continue)
/// })?;
/// # Ok::<(), WalkError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Walker<F = OsFs> {
    fs:     F,
    config: WalkConfig,
}

impl Walker<OsFs> {
    /// Walker over the real filesystem with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Walker over the real filesystem with the given options.
    pub fn with_config(config: WalkConfig) -> Self {
        Self { fs: OsFs, config }
    }
}

impl<F: FileSystem> Walker<F> {
    /// Walker over any [`FileSystem`] implementation.
    pub fn with_fs(fs: F, config: WalkConfig) -> Self {
        Self { fs, config }
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Stat every entry instead of relying on the lightweight typed listing.
    ///
    /// Fills [`Entry::metadata`] for all entries at the cost of one extra
    /// `lstat` per entry.
    pub fn use_file_stats(mut self, yes: bool) -> Self {
        self.config.use_file_stats = yes;
        self
    }

    /// Reorder or filter each directory's children before they are visited.
    ///
    /// See [`filters`](crate::filters) for ready-made hooks.
    pub fn sort_by(mut self, sort: SortFn) -> Self {
        self.config.sort = Some(sort);
        self
    }

    /// Shorthand for [`sort_by`](Self::sort_by) with a plain closure.
    pub fn sort_with<S>(self, sort: S) -> Self
    where
        S: Fn(Vec<Child>) -> Vec<Child> + Send + Sync + 'static,
    {
        self.sort_by(Arc::new(sort))
    }

    /// Maximum traversal depth. `0` means the root only, `1` means one
    /// level of children, and so on. Unlimited by default.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = Some(depth);
        self
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Walk `root` depth-first in pre-order, root first.
    ///
    /// `visitor` is called as `(err, path, entry)` for every entry:
    ///
    /// - `err` is set when the entry could not be stat'd (then `entry` is
    ///   `None`) or when a directory that was already visited could not be
    ///   listed (a second call for that directory, `entry` unchanged).
    /// - Return [`WalkState::Continue`] to carry on,
    ///   [`WalkState::Skip`]/[`WalkState::SkipDir`] to not descend, or
    ///   `Err(e)` to stop the whole walk.
    ///
    /// Symbolic links are reported but never followed.
    ///
    /// # Errors
    ///
    /// Returns exactly the first error the visitor returned. Filesystem
    /// failures on their own never fail the walk.
    pub fn walk<P, V, E>(&self, root: P, visitor: V) -> Result<(), E>
    where
        P: AsRef<Path>,
        V: FnMut(Option<WalkError>, &Path, Option<&Entry>) -> Result<WalkState, E>,
    {
        run(&self.fs, &self.config, root.as_ref(), visitor)
    }
}
