use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::vec;

use tracing::{debug, trace};

use crate::entry::{root_name, Child, Entry};
use crate::error::WalkError;
use crate::traits::FileSystem;

// ---------------------------------------------------------------------------
// WalkState
// ---------------------------------------------------------------------------

/// What the visitor wants the walker to do next.
///
/// Aborting is not a variant: the visitor returns `Err(e)` instead, and the
/// walk stops at once and hands back exactly that `e`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkState {
    /// Keep going; descend if this entry is a directory.
    #[default]
    Continue,

    /// Stop processing this entry. A directory is not descended into.
    Skip,

    /// Do not descend into this directory. Same effect as [`Skip`](Self::Skip),
    /// reads better when the entry is known to be a directory.
    SkipDir,
}

impl WalkState {
    pub fn is_skip(self) -> bool {
        matches!(self, Self::Skip | Self::SkipDir)
    }
}

/// `true` continues, `false` skips.
impl From<bool> for WalkState {
    fn from(keep_going: bool) -> Self {
        if keep_going {
            Self::Continue
        } else {
            Self::Skip
        }
    }
}

// ---------------------------------------------------------------------------
// WalkConfig
// ---------------------------------------------------------------------------

/// Reorders and/or filters a directory's children before any of them are
/// visited. Runs once per directory.
///
/// The returned sequence must only contain children from the input; the
/// hook may drop or reorder them but not invent new ones.
pub type SortFn = Arc<dyn Fn(Vec<Child>) -> Vec<Child> + Send + Sync>;

/// Options for one walk. Bound into a [`Walker`](crate::Walker) and never
/// changed while a walk is running.
#[derive(Clone, Default)]
pub struct WalkConfig {
    /// Stat every child (filling [`Entry::metadata`]) instead of using the
    /// lightweight typed listing. Off by default.
    pub use_file_stats: bool,

    /// Optional per-directory sort/filter hook.
    pub sort: Option<SortFn>,

    /// Maximum depth to descend. `0` visits the root only, `1` the root and
    /// its children, and so on. Unlimited by default.
    pub max_depth: Option<usize>,
}

impl fmt::Debug for WalkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalkConfig")
            .field("use_file_stats", &self.use_file_stats)
            .field("sort", &self.sort.as_ref().map(|_| "..."))
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// A directory whose children are still being walked.
struct Frame {
    path: PathBuf,
    depth: usize,
    children: vec::IntoIter<Child>,
}

/// Walk `root` depth-first, pre-order, calling `visitor` for every entry.
///
/// Frames live on an explicit stack, so tree depth is bounded by memory
/// rather than by the call stack. A frame is only popped once its last child's
/// subtree is done, which keeps siblings strictly after each other's subtrees.
pub(crate) fn run<F, V, E>(
    fs: &F,
    config: &WalkConfig,
    root: &Path,
    mut visitor: V,
) -> Result<(), E>
where
    F: FileSystem + ?Sized,
    V: FnMut(Option<WalkError>, &Path, Option<&Entry>) -> Result<WalkState, E>,
{
    debug!(root = %root.display(), "starting walk");

    // The root has no parent listing, so it always gets a full lstat.
    // A failure here still goes to the visitor first.
    let (err, entry) = match fs.lstat(root) {
        Ok(md) => (None, Some(Entry::from_metadata(root_name(root), md))),
        Err(e) => (Some(WalkError::stat(root, e)), None),
    };

    let mut stack = Vec::new();
    if let Some(frame) = visit(fs, config, root.to_path_buf(), err, entry, &mut visitor)? {
        stack.push(frame);
    }

    loop {
        let (path, child, depth) = {
            let Some(frame) = stack.last_mut() else {
                break;
            };
            match frame.children.next() {
                Some(child) => (frame.path.join(child.name()), child, frame.depth + 1),
                None => {
                    stack.pop();
                    continue;
                }
            }
        };

        let (err, entry) = resolve_child(fs, &path, child, depth);
        if let Some(frame) = visit(fs, config, path, err, entry, &mut visitor)? {
            stack.push(frame);
        }
    }

    Ok(())
}

/// Turn a listed child into an entry, stat'ing it when the listing only
/// supplied a name.
fn resolve_child<F>(
    fs: &F,
    path: &Path,
    child: Child,
    depth: usize,
) -> (Option<WalkError>, Option<Entry>)
where
    F: FileSystem + ?Sized,
{
    match child {
        Child::Typed(entry) => (None, Some(entry.at_depth(depth))),
        Child::Named(name) => match fs.lstat(path) {
            Ok(md) => (None, Some(Entry::from_metadata(name, md).at_depth(depth))),
            Err(e) => (Some(WalkError::stat(path, e)), None),
        },
    }
}

/// Hand one entry to the visitor and, if it is a directory worth entering,
/// list it. Returns the frame to push, if any.
fn visit<F, V, E>(
    fs: &F,
    config: &WalkConfig,
    path: PathBuf,
    err: Option<WalkError>,
    entry: Option<Entry>,
    visitor: &mut V,
) -> Result<Option<Frame>, E>
where
    F: FileSystem + ?Sized,
    V: FnMut(Option<WalkError>, &Path, Option<&Entry>) -> Result<WalkState, E>,
{
    trace!(path = %path.display(), failed = err.is_some(), "visiting");

    let state = visitor(err, &path, entry.as_ref())?;
    if state.is_skip() {
        debug!(path = %path.display(), ?state, "visitor skipped entry");
        return Ok(None);
    }

    // Only real directories are entered. Symlinks are never followed, the
    // root included.
    let Some(entry) = entry.filter(Entry::is_dir) else {
        return Ok(None);
    };

    if config.max_depth.is_some_and(|max| entry.depth >= max) {
        debug!(path = %path.display(), depth = entry.depth, "max depth reached");
        return Ok(None);
    }

    match fs.read_dir(&path, !config.use_file_stats) {
        Ok(mut children) => {
            debug!(path = %path.display(), count = children.len(), "entering directory");
            if let Some(sort) = &config.sort {
                children = sort(children);
            }
            Ok(Some(Frame {
                path,
                depth: entry.depth,
                children: children.into_iter(),
            }))
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "directory listing failed");
            // The directory's one chance to react to being unreadable.
            // Anything short of an error ends this directory quietly.
            let err = WalkError::read_dir(&path, e);
            visitor(Some(err), &path, Some(&entry))?;
            Ok(None)
        }
    }
}
