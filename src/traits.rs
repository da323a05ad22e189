use std::io;
use std::path::Path;

use crate::entry::{Child, Metadata};

/// The read-only filesystem primitives the walker is built on.
///
/// [`OsFs`](crate::OsFs) is the real thing. Implement this to walk a virtual
/// tree, an archive, or a test fixture with the exact same traversal rules.
///
/// # Contract
///
/// - `lstat` must not follow a final symlink. A symlink to a directory is
///   reported as [`EntryKind::Symlink`](crate::EntryKind::Symlink).
/// - `read_dir` lists immediate children only, in whatever order is natural
///   for the backend. When `typed` is `true` it should return
///   [`Child::Typed`] entries (name and kind, no metadata). When `typed` is
///   `false` it may return [`Child::Named`]; the walker stats each of those
///   itself before visiting.
///
/// # Example
///
/// ```rust
/// use std::io;
/// use std::path::Path;
/// use pathwalk::{Child, EntryKind, FileSystem, Metadata};
///
/// /// A filesystem holding a single empty file.
/// struct OneFile;
///
/// impl FileSystem for OneFile {
///     fn lstat(&self, _path: &Path) -> io::Result<Metadata> {
///         Ok(Metadata::of_kind(EntryKind::File))
///     }
///
///     fn read_dir(&self, path: &Path, _typed: bool) -> io::Result<Vec<Child>> {
///         Err(io::Error::new(io::ErrorKind::Other, format!("{} is a file", path.display())))
///     }
/// }
/// ```
pub trait FileSystem {
    /// Resolve `path` to metadata without following a final symlink.
    fn lstat(&self, path: &Path) -> io::Result<Metadata>;

    /// List the immediate children of the directory at `path`.
    fn read_dir(&self, path: &Path, typed: bool) -> io::Result<Vec<Child>>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn lstat(&self, path: &Path) -> io::Result<Metadata> {
        (**self).lstat(path)
    }

    fn read_dir(&self, path: &Path, typed: bool) -> io::Result<Vec<Child>> {
        (**self).read_dir(path, typed)
    }
}
