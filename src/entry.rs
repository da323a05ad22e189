use std::env;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

/// A single filesystem object handed to the visitor.
///
/// The entry's full path is not stored here; the walker passes it alongside
/// the entry as a separate argument.
///
/// `metadata` is only populated when full stats were requested
/// ([`WalkConfig::use_file_stats`](crate::WalkConfig)) and for the walk's
/// root, which is always resolved with an `lstat`. Lightweight listings carry
/// just the name and kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Base name of the entry, never empty.
    pub name: OsString,

    /// What kind of entry this is. Symlinks are never resolved.
    pub kind: EntryKind,

    /// How deep in the traversal this entry was found. Root = 0.
    pub depth: usize,

    /// Full stat metadata, when available.
    pub metadata: Option<Metadata>,
}

impl Entry {
    /// Lightweight entry: name and kind only.
    pub fn new(name: impl Into<OsString>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
            depth: 0,
            metadata: None,
        }
    }

    /// Entry built from a full `lstat` result.
    pub fn from_metadata(name: impl Into<OsString>, metadata: Metadata) -> Self {
        Self {
            name: name.into(),
            kind: metadata.kind,
            depth: 0,
            metadata: Some(metadata),
        }
    }

    pub(crate) fn at_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// The name as UTF-8, with invalid sequences replaced.
    pub fn name_lossy(&self) -> std::borrow::Cow<'_, str> {
        self.name.to_string_lossy()
    }

    /// Whether the name starts with a `.`.
    pub fn is_hidden(&self) -> bool {
        is_hidden_name(&self.name)
    }

    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    pub fn is_symlink(&self) -> bool {
        self.kind.is_symlink()
    }
}

/// The kind of a traversed entry, as reported without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link, whatever it points at.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

impl EntryKind {
    pub fn is_dir(self) -> bool {
        self == Self::Dir
    }

    pub fn is_file(self) -> bool {
        self == Self::File
    }

    pub fn is_symlink(self) -> bool {
        self == Self::Symlink
    }
}

impl From<fs::FileType> for EntryKind {
    fn from(ft: fs::FileType) -> Self {
        if ft.is_dir() {
            Self::Dir
        } else if ft.is_file() {
            Self::File
        } else if ft.is_symlink() {
            Self::Symlink
        } else {
            Self::Other
        }
    }
}

/// Metadata captured by an `lstat`.
///
/// Owned and filesystem-agnostic so that non-OS [`FileSystem`](crate::FileSystem)
/// implementations can produce it too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub kind: EntryKind,
    pub len: u64,
    pub readonly: bool,
    /// Unix permission bits, `None` on other platforms.
    pub mode: Option<u32>,
    pub modified: Option<SystemTime>,
    pub accessed: Option<SystemTime>,
    pub created: Option<SystemTime>,
}

impl Metadata {
    /// Bare metadata of the given kind, everything else zeroed.
    pub fn of_kind(kind: EntryKind) -> Self {
        Self {
            kind,
            len: 0,
            readonly: false,
            mode: None,
            modified: None,
            accessed: None,
            created: None,
        }
    }
}

impl From<&fs::Metadata> for Metadata {
    fn from(md: &fs::Metadata) -> Self {
        #[cfg(unix)]
        let mode = {
            use std::os::unix::fs::PermissionsExt;
            Some(md.permissions().mode())
        };
        #[cfg(not(unix))]
        let mode = None;

        Self {
            kind: md.file_type().into(),
            len: md.len(),
            readonly: md.permissions().readonly(),
            mode,
            modified: md.modified().ok(),
            accessed: md.accessed().ok(),
            created: md.created().ok(),
        }
    }
}

/// One item of a directory listing, before it is visited.
///
/// Typed listings give the kind for free. Untyped listings (and full-stat
/// mode) give only the name; the walker stats those right before the visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Typed(Entry),
    Named(OsString),
}

impl Child {
    pub fn name(&self) -> &OsStr {
        match self {
            Self::Typed(entry) => &entry.name,
            Self::Named(name) => name,
        }
    }

    /// The kind, if the listing supplied one.
    pub fn kind(&self) -> Option<EntryKind> {
        match self {
            Self::Typed(entry) => Some(entry.kind),
            Self::Named(_) => None,
        }
    }

    pub fn is_hidden(&self) -> bool {
        is_hidden_name(self.name())
    }
}

fn is_hidden_name(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Make `path` absolute against the current directory and fold away `.` and
/// `..` components lexically. Symlinks are not consulted.
pub fn resolve(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` above the filesystem root stays at the root
                if !out.pop() && !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Name for the walk's root: the last component of the resolved path, or the
/// resolved path itself when there is none (`/`).
pub(crate) fn root_name(root: &Path) -> OsString {
    let resolved = resolve(root);
    match resolved.file_name() {
        Some(name) => name.to_os_string(),
        None if resolved.as_os_str().is_empty() => root.as_os_str().to_os_string(),
        None => resolved.into_os_string(),
    }
}
