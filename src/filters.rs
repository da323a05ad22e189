//! Ready-made sort hooks for [`Walker::sort_by`](crate::Walker::sort_by).
//!
//! Each function returns a [`SortFn`]. Combine them with [`chain`].

use std::path::Path;
use std::sync::Arc;

use ignore::overrides::OverrideBuilder;

use crate::engine::SortFn;
use crate::entry::{Child, EntryKind};
use crate::error::WalkError;

/// Visit children in byte-wise lexicographic name order.
pub fn by_name() -> SortFn {
    Arc::new(|mut children: Vec<Child>| {
        children.sort_by(|a, b| a.name().cmp(b.name()));
        children
    })
}

/// Drop children whose name starts with `.`. Hidden directories are not
/// descended into either, since they are never visited.
pub fn skip_hidden() -> SortFn {
    Arc::new(|children: Vec<Child>| {
        children.into_iter().filter(|c| !c.is_hidden()).collect()
    })
}

/// Drop children whose name matches any of the gitignore-style `patterns`.
///
/// Patterns are matched against the child's name, not its full path. A
/// trailing `/` restricts a pattern to directories, which only works for
/// typed listings (untyped children are matched as files).
///
/// # Errors
///
/// Returns [`WalkError::InvalidPattern`] for the first pattern that does not
/// parse as a glob.
pub fn exclude<I, S>(patterns: I) -> Result<SortFn, WalkError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = OverrideBuilder::new("/");
    for pattern in patterns {
        let pattern = pattern.as_ref();
        // Overrides whitelist by default; a leading `!` makes a glob an ignore.
        builder
            .add(&format!("!{pattern}"))
            .map_err(|e| WalkError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
    }
    let overrides = builder.build().map_err(|e| WalkError::InvalidPattern {
        pattern: String::new(),
        message: e.to_string(),
    })?;

    Ok(Arc::new(move |children: Vec<Child>| {
        children
            .into_iter()
            .filter(|c| {
                let is_dir = c.kind() == Some(EntryKind::Dir);
                !overrides.matched(Path::new(c.name()), is_dir).is_ignore()
            })
            .collect()
    }))
}

/// Run `first`, then feed its output to `then`.
pub fn chain(first: SortFn, then: SortFn) -> SortFn {
    Arc::new(move |children: Vec<Child>| then(first(children)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;

    fn names(children: &[Child]) -> Vec<String> {
        children
            .iter()
            .map(|c| c.name().to_string_lossy().into_owned())
            .collect()
    }

    fn listing() -> Vec<Child> {
        vec![
            Child::Named("zeta.txt".into()),
            Child::Typed(Entry::new(".git", EntryKind::Dir)),
            Child::Typed(Entry::new("build", EntryKind::Dir)),
            Child::Named("alpha.log".into()),
            Child::Typed(Entry::new("build.rs", EntryKind::File)),
        ]
    }

    #[test]
    fn by_name_sorts_lexicographically() {
        let sorted = by_name()(listing());
        assert_eq!(
            names(&sorted),
            vec![".git", "alpha.log", "build", "build.rs", "zeta.txt"]
        );
    }

    #[test]
    fn skip_hidden_keeps_order_of_the_rest() {
        let kept = skip_hidden()(listing());
        assert_eq!(names(&kept), vec!["zeta.txt", "build", "alpha.log", "build.rs"]);
    }

    #[test]
    fn exclude_matches_names_against_globs() {
        let hook = exclude(["*.log", ".git"]).unwrap();
        let kept = hook(listing());
        assert_eq!(names(&kept), vec!["zeta.txt", "build", "build.rs"]);
    }

    #[test]
    fn exclude_dir_only_pattern_spares_files() {
        let hook = exclude(["build/"]).unwrap();
        let kept = hook(listing());
        assert_eq!(
            names(&kept),
            vec!["zeta.txt", ".git", "alpha.log", "build.rs"]
        );
    }

    #[test]
    fn exclude_with_no_patterns_keeps_everything() {
        let hook = exclude(Vec::<String>::new()).unwrap();
        assert_eq!(hook(listing()).len(), 5);
    }

    #[test]
    fn exclude_rejects_bad_glob() {
        let err = exclude(["a[b"]).err().expect("unclosed class should fail");
        match err {
            WalkError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "a[b"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn chain_applies_in_order() {
        let hook = chain(skip_hidden(), by_name());
        assert_eq!(
            names(&hook(listing())),
            vec!["alpha.log", "build", "build.rs", "zeta.txt"]
        );
    }
}
