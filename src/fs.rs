use std::fs;
use std::io;
use std::path::Path;

use crate::entry::{Child, Entry, EntryKind, Metadata};
use crate::traits::FileSystem;

/// [`FileSystem`] backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl FileSystem for OsFs {
    fn lstat(&self, path: &Path) -> io::Result<Metadata> {
        fs::symlink_metadata(path).map(|md| Metadata::from(&md))
    }

    fn read_dir(&self, path: &Path, typed: bool) -> io::Result<Vec<Child>> {
        let mut children = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let child = if typed {
                // DirEntry::file_type does not traverse symlinks
                let kind: EntryKind = entry.file_type()?.into();
                Child::Typed(Entry::new(entry.file_name(), kind))
            } else {
                Child::Named(entry.file_name())
            };
            children.push(child);
        }
        Ok(children)
    }
}
