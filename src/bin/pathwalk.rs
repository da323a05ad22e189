//! `pathwalk`: print every entry under a directory, one per line.
//!
//! ```text
//! $ pathwalk src
//! d /home/me/project src
//! f /home/me/project/src lib.rs
//! ```

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use pathwalk::{filters, resolve, Entry, EntryKind, SortFn, WalkState, Walker};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// =============================================================================
// CLI
// =============================================================================

#[derive(Parser, Debug)]
#[command(name = "pathwalk")]
#[command(about = "Walk a directory tree depth-first and print each entry", version)]
struct Cli {
    /// Directory (or file) to walk
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Include entries whose name starts with `.`
    #[arg(short, long)]
    all: bool,

    /// Word-form type tags (`[ dir]`, `[file]`, `[link]`, `[----]`)
    #[arg(short, long)]
    long: bool,

    /// lstat every entry and print its size
    #[arg(long)]
    stats: bool,

    /// Visit children in name order instead of listing order
    #[arg(short, long)]
    sorted: bool,

    /// Skip entries whose name matches this glob (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "GLOB")]
    exclude: Vec<String>,

    /// Do not descend more than this many levels below the root
    #[arg(short = 'd', long)]
    max_depth: Option<usize>,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("pathwalk: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

// =============================================================================
// Walk
// =============================================================================

fn build_walker(cli: &Cli) -> Result<Walker> {
    let mut hooks: Vec<SortFn> = Vec::new();
    if !cli.all {
        hooks.push(filters::skip_hidden());
    }
    if !cli.exclude.is_empty() {
        hooks.push(filters::exclude(&cli.exclude)?);
    }
    if cli.sorted {
        hooks.push(filters::by_name());
    }

    let mut walker = Walker::new().use_file_stats(cli.stats);
    if let Some(sort) = hooks.into_iter().reduce(filters::chain) {
        walker = walker.sort_by(sort);
    }
    if let Some(depth) = cli.max_depth {
        walker = walker.max_depth(depth);
    }
    Ok(walker)
}

fn run(cli: &Cli) -> Result<()> {
    let walker = build_walker(cli)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    walker.walk(&cli.root, |err, path, entry| -> Result<WalkState> {
        if let Some(err) = err {
            return Err(err.into());
        }
        let Some(entry) = entry else {
            return Ok(WalkState::Continue);
        };
        writeln!(out, "{}", format_line(path, entry, cli.long, cli.stats))?;
        Ok(WalkState::Continue)
    })
    .with_context(|| format!("walking {}", cli.root.display()))?;

    out.flush()?;
    Ok(())
}

// =============================================================================
// Output
// =============================================================================

fn tag(kind: EntryKind, long: bool) -> &'static str {
    match (kind, long) {
        (EntryKind::Dir, false) => "d",
        (EntryKind::File, false) => "f",
        (EntryKind::Symlink, false) => "@",
        (EntryKind::Other, false) => "?",
        (EntryKind::Dir, true) => "[ dir]",
        (EntryKind::File, true) => "[file]",
        (EntryKind::Symlink, true) => "[link]",
        (EntryKind::Other, true) => "[----]",
    }
}

/// `<tag> <resolved parent> <name>[ <size>]`
fn format_line(path: &Path, entry: &Entry, long: bool, with_size: bool) -> String {
    let resolved = resolve(path);
    let parent = resolved.parent().unwrap_or(&resolved);
    let mut line = format!(
        "{} {} {}",
        tag(entry.kind, long),
        parent.display(),
        entry.name_lossy()
    );
    if with_size {
        if let Some(md) = &entry.metadata {
            line.push_str(&format!(" {}", md.len));
        }
    }
    line
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|io| io.kind() == io::ErrorKind::BrokenPipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathwalk::Metadata;

    #[test]
    fn short_and_long_tags() {
        assert_eq!(tag(EntryKind::Dir, false), "d");
        assert_eq!(tag(EntryKind::Symlink, false), "@");
        assert_eq!(tag(EntryKind::Dir, true), "[ dir]");
        assert_eq!(tag(EntryKind::Other, true), "[----]");
    }

    #[cfg(unix)]
    #[test]
    fn line_shows_parent_and_name() {
        let entry = Entry::new("lib.rs", EntryKind::File);
        let line = format_line(Path::new("/work/src/lib.rs"), &entry, false, false);
        assert_eq!(line, "f /work/src lib.rs");
    }

    #[cfg(unix)]
    #[test]
    fn line_appends_size_when_stat_available() {
        let mut md = Metadata::of_kind(EntryKind::File);
        md.len = 42;
        let entry = Entry::from_metadata("a.bin", md);
        let line = format_line(Path::new("/data/a.bin"), &entry, true, true);
        assert_eq!(line, "[file] /data a.bin 42");
    }

    #[test]
    fn cli_defaults_hide_dotfiles() {
        let cli = Cli::parse_from(["pathwalk"]);
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(!cli.all);
        let walker = build_walker(&cli).unwrap();
        assert!(walker.config().sort.is_some());
        assert!(!walker.config().use_file_stats);
    }

    #[test]
    fn cli_all_without_sort_has_no_hook() {
        let cli = Cli::parse_from(["pathwalk", "--all", "--stats", "-d", "2", "/tmp"]);
        let walker = build_walker(&cli).unwrap();
        assert!(walker.config().sort.is_none());
        assert!(walker.config().use_file_stats);
        assert_eq!(walker.config().max_depth, Some(2));
    }

    #[test]
    fn cli_bad_exclude_is_an_error() {
        let cli = Cli::parse_from(["pathwalk", "-x", "a[b"]);
        assert!(build_walker(&cli).is_err());
    }
}
