//! Scanner - depth-first walk that builds a `ScanResult`

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::filter::{Exclusion, ExclusionFilter};
use super::types::{ScanEntry, ScanResult};
use super::utils::{count_entries, extension_of, modified_time};

/// Walks a project tree, skipping whatever the filter excludes.
///
/// Within a directory, children are sorted by byte-wise file name and
/// directories are emitted before files. Symlinks are never descended;
/// a symlink to a file is listed with its target's size and time.
pub struct Scanner {
    filter: ExclusionFilter,
}

impl Scanner {
    pub fn new(filter: ExclusionFilter) -> Self {
        Self { filter }
    }

    /// Scan `root`. Only an unreadable root is an error; problems with
    /// individual entries become warnings on the result.
    pub fn scan(&self, root: &Path) -> io::Result<ScanResult> {
        let mut result = ScanResult::new(root);
        let children = read_sorted(root, &mut result)?;
        self.walk_entries(root, children, Path::new(""), 1, &mut result);
        Ok(result)
    }

    fn walk_dir(&self, dir: &Path, relative: &Path, depth: usize, result: &mut ScanResult) {
        match read_sorted(dir, result) {
            Ok(children) => self.walk_entries(dir, children, relative, depth, result),
            Err(e) => result.warn(dir.to_path_buf(), e.to_string()),
        }
    }

    fn walk_entries(
        &self,
        dir: &Path,
        children: Vec<Child>,
        relative: &Path,
        depth: usize,
        result: &mut ScanResult,
    ) {
        for child in children {
            // Filesystem access uses the raw name; `display` is only for output
            let path = dir.join(&child.name);
            let rel = relative.join(&child.name);

            if child.kind == ChildKind::Symlink {
                log::debug!("not following symlink {}", path.display());
                result.record_ignored(1);
                continue;
            }

            let is_dir = child.kind == ChildKind::Dir;
            match self.filter.check(&path, is_dir) {
                Some(Exclusion::SelfArtifact) => continue,
                Some(Exclusion::Pattern) => {
                    let nested = if is_dir { count_entries(&path) } else { 0 };
                    result.record_ignored(1 + nested);
                    continue;
                }
                None => {}
            }

            let meta = match child.kind {
                ChildKind::FileLink => fs::metadata(&path),
                _ => fs::symlink_metadata(&path),
            };
            let meta = match meta {
                Ok(m) => m,
                Err(e) if is_dir => {
                    // Still list the directory; its contents fail separately below
                    log::debug!("no metadata for {}: {}", path.display(), e);
                    self.record_dir(&child.display, rel.clone(), depth, None, result);
                    self.walk_dir(&path, &rel, depth + 1, result);
                    continue;
                }
                Err(e) => {
                    result.warn(path, e.to_string());
                    continue;
                }
            };

            if is_dir {
                self.record_dir(&child.display, rel.clone(), depth, Some(&meta), result);
                self.walk_dir(&path, &rel, depth + 1, result);
            } else {
                result.record_file(ScanEntry {
                    path: rel,
                    extension: extension_of(&child.display),
                    name: child.display,
                    depth,
                    is_dir: false,
                    size_bytes: meta.len(),
                    modified_at: modified_time(&meta),
                });
            }
        }
    }

    fn record_dir(
        &self,
        name: &str,
        path: PathBuf,
        depth: usize,
        meta: Option<&fs::Metadata>,
        result: &mut ScanResult,
    ) {
        result.record_dir(ScanEntry {
            path,
            name: name.to_string(),
            depth,
            is_dir: true,
            size_bytes: 0,
            modified_at: meta.and_then(modified_time),
            extension: None,
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChildKind {
    Dir,
    File,
    /// Symlink whose target is a regular file
    FileLink,
    /// Any other symlink: to a directory, dangling, or a loop
    Symlink,
}

struct Child {
    name: OsString,
    display: String,
    kind: ChildKind,
}

/// List `dir`, sorted by name with directories first. Entries that cannot be
/// read are recorded as warnings on `result`.
fn read_sorted(dir: &Path, result: &mut ScanResult) -> io::Result<Vec<Child>> {
    let mut entries = keep_readable(dir, fs::read_dir(dir)?, result);
    entries.sort_by_key(|a| a.file_name());

    let mut children: Vec<Child> = entries
        .into_iter()
        .map(|entry| {
            let kind = match entry.file_type() {
                Ok(t) if t.is_symlink() => match fs::metadata(entry.path()) {
                    Ok(target) if target.is_file() => ChildKind::FileLink,
                    _ => ChildKind::Symlink,
                },
                Ok(t) if t.is_dir() => ChildKind::Dir,
                _ => ChildKind::File,
            };
            let name = entry.file_name();
            Child {
                display: name.to_string_lossy().into_owned(),
                name,
                kind,
            }
        })
        .collect();
    // Stable, so name order holds within each group
    children.sort_by_key(|c| c.kind != ChildKind::Dir);
    Ok(children)
}

/// The readable items of a directory listing; each failed one becomes a warning.
fn keep_readable<T>(
    dir: &Path,
    entries: impl IntoIterator<Item = io::Result<T>>,
    result: &mut ScanResult,
) -> Vec<T> {
    let mut kept = Vec::new();
    for entry in entries {
        match entry {
            Ok(e) => kept.push(e),
            Err(e) => result.warn(dir.to_path_buf(), format!("unreadable entry: {}", e)),
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decisions::DecisionSet;
    use crate::patterns::PatternKey;
    use crate::tree::SelfExclusion;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn scanner(excluded_dirs: &[&str], excluded_files: &[&str]) -> Scanner {
        let mut decisions = DecisionSet::new();
        for d in excluded_dirs {
            decisions.exclude(PatternKey::directory(*d));
        }
        for f in excluded_files {
            decisions.exclude(PatternKey::file(*f));
        }
        let own = SelfExclusion::new()
            .with_name(crate::OUTPUT_FILE_NAME)
            .with_name(crate::PREFERENCE_FILE_NAME);
        Scanner::new(ExclusionFilter::new(&decisions, own))
    }

    #[test]
    fn test_example_project_totals() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "src/main.py", &[b'x'; 1024]);
        write(root, "node_modules/a.js", b"");
        write(root, "node_modules/b.js", b"");
        write(root, "node_modules/c.js", b"");
        write(root, ".git/HEAD", b"");
        write(root, ".git/config", b"");

        let result = scanner(&["node_modules", ".git"], &[]).scan(root).unwrap();
        assert_eq!(result.totals.file_count, 1);
        assert_eq!(result.totals.dir_count, 1);
        assert_eq!(result.totals.total_size_bytes, 1024);
        // Each excluded directory counts itself plus its contents
        assert_eq!(result.totals.ignored_count, 4 + 3);
        assert_eq!(result.extension_histogram.len(), 1);
        assert_eq!(result.extension_histogram.get(".py"), Some(&1));
    }

    #[test]
    fn test_empty_root() {
        let dir = TempDir::new().unwrap();
        let result = scanner(&[], &[]).scan(dir.path()).unwrap();
        assert!(result.entries.is_empty());
        assert_eq!(result.totals, Default::default());
        assert!(result.extension_histogram.is_empty());
    }

    #[test]
    fn test_excluded_directory_contributes_nothing() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "node_modules/pkg/index.js", b"module.exports = 1");
        write(root, "lib/node_modules/nested.js", b"");
        write(root, "lib/app.js", b"");

        let result = scanner(&["node_modules"], &[]).scan(root).unwrap();
        assert!(
            result
                .entries
                .iter()
                .all(|e| !e.path.components().any(|c| c.as_os_str() == "node_modules"))
        );
        assert_eq!(result.totals.file_count, 1);
        assert_eq!(result.totals.dir_count, 1);
        assert_eq!(result.extension_histogram.get(".js"), Some(&1));
        // node_modules(1) + pkg + index.js, lib/node_modules(1) + nested.js
        assert_eq!(result.totals.ignored_count, 5);
    }

    #[test]
    fn test_excluded_file_globs() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "app.py", b"");
        write(root, "app.pyc", b"");
        write(root, "pkg/util.pyc", b"");

        let result = scanner(&[], &["*.pyc"]).scan(root).unwrap();
        let names: Vec<_> = result.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["pkg", "app.py"]);
        assert_eq!(result.totals.ignored_count, 2);
    }

    #[test]
    fn test_self_artifacts_never_appear_and_are_not_counted() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "README.md", b"hi");
        write(root, crate::OUTPUT_FILE_NAME, b"# old map");
        write(root, crate::PREFERENCE_FILE_NAME, b"{}");

        let result = scanner(&[], &[]).scan(root).unwrap();
        let names: Vec<_> = result.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["README.md"]);
        assert_eq!(result.totals.ignored_count, 0);
    }

    #[test]
    fn test_order_is_dirs_first_then_bytewise_names() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "b.txt", b"");
        write(root, "A.txt", b"");
        write(root, "zeta/z.txt", b"");
        write(root, "Alpha/a.txt", b"");

        let result = scanner(&[], &[]).scan(root).unwrap();
        let paths: Vec<_> = result
            .entries
            .iter()
            .map(|e| e.path.to_string_lossy().to_string())
            .collect();
        assert_eq!(
            paths,
            vec!["Alpha", "Alpha/a.txt", "zeta", "zeta/z.txt", "A.txt", "b.txt"]
        );
    }

    #[test]
    fn test_entries_record_depth_and_extension() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "src/lib/Mod.RS", b"12345");
        write(root, "Makefile", b"all:");

        let result = scanner(&[], &[]).scan(root).unwrap();
        let module = result.entries.iter().find(|e| e.name == "Mod.RS").unwrap();
        assert_eq!(module.depth, 3);
        assert_eq!(module.extension.as_deref(), Some(".rs"));
        assert_eq!(module.size_bytes, 5);
        assert!(module.modified_at.is_some());

        let makefile = result.entries.iter().find(|e| e.name == "Makefile").unwrap();
        assert_eq!(makefile.depth, 1);
        assert_eq!(makefile.extension, None);
        assert_eq!(result.extension_histogram.get(crate::tree::NO_EXTENSION), Some(&1));
    }

    #[test]
    fn test_every_item_is_counted_once() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "a/b/c.txt", b"");
        write(root, "a/d.log", b"");
        write(root, "e.txt", b"");
        write(root, "build/out.o", b"");

        let result = scanner(&["build"], &["*.log"]).scan(root).unwrap();
        let t = result.totals;
        // a, a/b, a/b/c.txt, a/d.log, e.txt, build, build/out.o
        assert_eq!(t.file_count + t.dir_count + t.ignored_count, 7);
        assert_eq!(result.entries.len(), t.file_count + t.dir_count);
    }

    #[test]
    fn test_missing_root_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(scanner(&[], &[]).scan(&dir.path().join("missing")).is_err());
    }

    #[test]
    #[cfg(unix)]
    fn test_directory_symlinks_are_counted_as_ignored() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "real/file.txt", b"");
        std::os::unix::fs::symlink(root.join("real"), root.join("link")).unwrap();
        std::os::unix::fs::symlink(root.join("gone"), root.join("dangling")).unwrap();

        let result = scanner(&[], &[]).scan(root).unwrap();
        assert!(result.entries.iter().all(|e| e.name != "link" && e.name != "dangling"));
        assert_eq!(result.totals.ignored_count, 2);
        assert_eq!(result.totals.file_count, 1);
    }

    #[test]
    #[cfg(unix)]
    fn test_file_symlinks_are_listed_with_target_size() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "notes.md", b"12345678");
        std::os::unix::fs::symlink(root.join("notes.md"), root.join("alias.md")).unwrap();

        let result = scanner(&[], &[]).scan(root).unwrap();
        let alias = result.entries.iter().find(|e| e.name == "alias.md").unwrap();
        assert!(!alias.is_dir);
        assert_eq!(alias.size_bytes, 8);
        assert_eq!(result.totals.file_count, 2);
        assert_eq!(result.totals.ignored_count, 0);
        assert_eq!(result.extension_histogram.get(".md"), Some(&2));
    }

    #[test]
    #[cfg(unix)]
    fn test_file_symlinks_follow_file_patterns() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "real.log", b"");
        std::os::unix::fs::symlink(root.join("real.log"), root.join("latest.log")).unwrap();

        let result = scanner(&[], &["*.log"]).scan(root).unwrap();
        assert!(result.entries.is_empty());
        assert_eq!(result.totals.ignored_count, 2);
    }

    #[test]
    #[cfg(unix)]
    fn test_non_utf8_names_are_scanned() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "ok.txt", b"");
        let bad_file = root.join(OsStr::from_bytes(b"bad\xffname.txt"));
        if fs::write(&bad_file, b"abc").is_err() {
            // Some filesystems reject non-UTF-8 names
            return;
        }
        let bad_dir = root.join(OsStr::from_bytes(b"dir\xfe"));
        fs::create_dir(&bad_dir).unwrap();
        fs::write(bad_dir.join("inner.rs"), b"").unwrap();

        let result = scanner(&[], &[]).scan(root).unwrap();
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        assert_eq!(result.totals.file_count, 3);
        assert_eq!(result.totals.dir_count, 1);
        assert_eq!(result.totals.total_size_bytes, 3);

        let bad = result.entries.iter().find(|e| e.size_bytes == 3).unwrap();
        assert_eq!(bad.name, "bad\u{fffd}name.txt");
        assert_eq!(bad.path, PathBuf::from(OsStr::from_bytes(b"bad\xffname.txt")));
        assert!(result.entries.iter().any(|e| e.name == "inner.rs" && e.depth == 2));
    }

    #[test]
    fn test_unreadable_listing_items_become_warnings() {
        let mut result = ScanResult::new("/p");
        let listing = vec![
            Ok(1),
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
            Ok(2),
        ];
        let kept = keep_readable(Path::new("/p/src"), listing, &mut result);
        assert_eq!(kept, vec![1, 2]);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].path, PathBuf::from("/p/src"));
        assert!(result.warnings[0].message.contains("denied"));
    }

    #[test]
    #[cfg(unix)]
    fn test_unreadable_directory_is_listed_with_warning() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "open/file.txt", b"");
        write(root, "locked/secret.txt", b"");
        let locked = root.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let result = scanner(&[], &[]).scan(root);

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        let result = result.unwrap();

        assert!(result.entries.iter().any(|e| e.name == "locked"));
        assert!(result.entries.iter().any(|e| e.name == "file.txt"));
        // Running as root can bypass permission bits
        if result.entries.iter().all(|e| e.name != "secret.txt") {
            assert_eq!(result.warnings.len(), 1);
            assert!(result.warnings[0].path.ends_with("locked"));
        }
    }
}
