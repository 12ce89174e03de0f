//! Well-known ignorable directory names and file patterns
//!
//! The registry is static data: every candidate carries the reason shown to
//! the user when asking whether to leave it out. `NameMatcher` gives file
//! patterns an explicit, testable matching semantic.

use std::fmt;

use glob::Pattern;

/// Whether a pattern applies to directories or to files.
///
/// Directories sort before files so prompts and saved documents list them first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PatternKind {
    Directory,
    File,
}

/// Identity of a pattern. The same name may exist for both kinds (`.env`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatternKey {
    pub kind: PatternKind,
    pub name: String,
}

impl PatternKey {
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            kind: PatternKind::Directory,
            name: name.into(),
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            kind: PatternKind::File,
            name: name.into(),
        }
    }
}

impl fmt::Display for PatternKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PatternKind::Directory => write!(f, "{}/", self.name),
            PatternKind::File => write!(f, "{}", self.name),
        }
    }
}

/// A pattern the user may choose to leave out of the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternCandidate {
    pub key: PatternKey,
    pub reason: &'static str,
    /// Approximate number of nested items, for display only
    pub count_hint: Option<usize>,
}

impl PatternCandidate {
    pub fn new(key: PatternKey, reason: &'static str) -> Self {
        Self {
            key,
            reason,
            count_hint: None,
        }
    }

    pub fn with_count_hint(mut self, count: usize) -> Self {
        self.count_hint = Some(count);
        self
    }

    pub fn kind(&self) -> PatternKind {
        self.key.kind
    }

    pub fn name(&self) -> &str {
        &self.key.name
    }

    /// Build the matcher appropriate for this candidate's kind.
    pub fn matcher(&self) -> NameMatcher {
        match self.key.kind {
            PatternKind::Directory => NameMatcher::Exact(self.key.name.clone()),
            PatternKind::File => NameMatcher::parse(&self.key.name),
        }
    }
}

const DIRECTORY_PATTERNS: &[(&str, &str)] = &[
    ("node_modules", "Node.js dependencies"),
    (".git", "Git version control"),
    ("__pycache__", "Python cache"),
    (".pytest_cache", "Pytest cache"),
    ("venv", "Python virtual environment"),
    ("env", "Python virtual environment"),
    (".env", "Environment directory"),
    ("dist", "Distribution/build output"),
    ("build", "Build output"),
    ("target", "Build output (Java/Rust)"),
    (".idea", "IntelliJ IDEA config"),
    (".vscode", "VS Code config"),
    ("vendor", "Dependencies (PHP/Go)"),
    (".terraform", "Terraform files"),
    ("coverage", "Test coverage reports"),
    (".nyc_output", "NYC coverage output"),
    (".next", "Next.js build"),
    (".nuxt", "Nuxt.js build"),
    ("bower_components", "Bower dependencies"),
    (".sass-cache", "Sass cache"),
    ("logs", "Log files directory"),
    ("tmp", "Temporary files"),
    ("temp", "Temporary files"),
    (".cache", "Generic cache directory"),
    ("out", "Output directory"),
    (".svn", "SVN version control"),
    (".hg", "Mercurial version control"),
];

const FILE_PATTERNS: &[(&str, &str)] = &[
    (".DS_Store", "macOS system file"),
    ("Thumbs.db", "Windows thumbnail cache"),
    (".env", "Environment variables"),
    (".env.local", "Local environment variables"),
    (".env.production", "Production environment"),
    (".env.development", "Development environment"),
    ("*.pyc", "Python compiled file"),
    ("*.pyo", "Python optimized file"),
    ("*.log", "Log file"),
    ("*.tmp", "Temporary file"),
    ("*.temp", "Temporary file"),
    ("*.swp", "Vim swap file"),
    ("*.swo", "Vim swap file"),
    ("*.bak", "Backup file"),
    ("*.orig", "Original/backup file"),
    (".gitignore", "Git ignore file"),
    ("package-lock.json", "NPM lock file"),
    ("yarn.lock", "Yarn lock file"),
    ("composer.lock", "Composer lock file"),
    ("Gemfile.lock", "Ruby Bundler lock"),
    ("poetry.lock", "Poetry lock file"),
    ("desktop.ini", "Windows folder config"),
];

/// Ordered collection of pattern candidates: directories first, then files,
/// each in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternRegistry {
    candidates: Vec<PatternCandidate>,
}

impl PatternRegistry {
    /// The built-in table of common dependency, build, cache, and editor artifacts.
    pub fn builtin() -> Self {
        let directories = DIRECTORY_PATTERNS
            .iter()
            .map(|(name, reason)| PatternCandidate::new(PatternKey::directory(*name), *reason));
        let files = FILE_PATTERNS
            .iter()
            .map(|(name, reason)| PatternCandidate::new(PatternKey::file(*name), *reason));
        Self {
            candidates: directories.chain(files).collect(),
        }
    }

    /// Build a registry from arbitrary candidates, normalising their order.
    pub fn from_candidates(mut candidates: Vec<PatternCandidate>) -> Self {
        // Stable sort keeps declaration order within each kind
        candidates.sort_by_key(|c| c.kind());
        Self { candidates }
    }

    pub fn candidates(&self) -> &[PatternCandidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn contains(&self, key: &PatternKey) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &PatternKey) -> Option<&PatternCandidate> {
        self.candidates.iter().find(|c| &c.key == key)
    }

    /// Find the first directory candidate whose name is exactly `name`.
    pub fn match_directory(&self, name: &str) -> Option<&PatternCandidate> {
        self.candidates
            .iter()
            .filter(|c| c.kind() == PatternKind::Directory)
            .find(|c| c.name() == name)
    }

    /// All file candidates whose pattern matches `name`.
    pub fn match_file<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a PatternCandidate> {
        self.candidates
            .iter()
            .filter(|c| c.kind() == PatternKind::File)
            .filter(move |c| c.matcher().matches(name))
    }
}

/// Explicit name-matching semantics for patterns.
///
/// A pattern without wildcards matches exactly. A single leading `*` is a
/// suffix match, a single trailing `*` a prefix match. Anything else with
/// wildcard characters is handed to `glob::Pattern`.
#[derive(Debug, Clone)]
pub enum NameMatcher {
    Exact(String),
    Prefix(String),
    Suffix(String),
    Glob(Pattern),
    /// A malformed glob, which matches nothing
    Never,
}

impl NameMatcher {
    pub fn parse(pattern: &str) -> Self {
        if !has_wildcard(pattern) {
            return NameMatcher::Exact(pattern.to_string());
        }
        if let Some(rest) = pattern.strip_prefix('*') {
            if !has_wildcard(rest) {
                return NameMatcher::Suffix(rest.to_string());
            }
        }
        if let Some(rest) = pattern.strip_suffix('*') {
            if !has_wildcard(rest) {
                return NameMatcher::Prefix(rest.to_string());
            }
        }
        match Pattern::new(pattern) {
            Ok(p) => NameMatcher::Glob(p),
            Err(e) => {
                log::warn!("invalid pattern '{}': {}", pattern, e);
                NameMatcher::Never
            }
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameMatcher::Exact(s) => name == s,
            NameMatcher::Prefix(s) => name.starts_with(s.as_str()),
            NameMatcher::Suffix(s) => name.ends_with(s.as_str()),
            NameMatcher::Glob(p) => p.matches(name),
            NameMatcher::Never => false,
        }
    }
}

fn has_wildcard(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_orders_directories_first() {
        let registry = PatternRegistry::builtin();
        assert_eq!(registry.len(), DIRECTORY_PATTERNS.len() + FILE_PATTERNS.len());

        let first_file = registry
            .candidates()
            .iter()
            .position(|c| c.kind() == PatternKind::File)
            .unwrap();
        assert!(
            registry.candidates()[first_file..]
                .iter()
                .all(|c| c.kind() == PatternKind::File)
        );
        assert_eq!(registry.candidates()[0].name(), "node_modules");
    }

    #[test]
    fn test_env_exists_as_both_kinds() {
        let registry = PatternRegistry::builtin();
        assert!(registry.contains(&PatternKey::directory(".env")));
        assert!(registry.contains(&PatternKey::file(".env")));
        assert_ne!(
            registry.get(&PatternKey::directory(".env")).unwrap().reason,
            registry.get(&PatternKey::file(".env")).unwrap().reason
        );
    }

    #[test]
    fn test_matcher_variants() {
        assert!(matches!(NameMatcher::parse("yarn.lock"), NameMatcher::Exact(_)));
        assert!(matches!(NameMatcher::parse("*.pyc"), NameMatcher::Suffix(_)));
        assert!(matches!(NameMatcher::parse("npm-debug*"), NameMatcher::Prefix(_)));
        assert!(matches!(NameMatcher::parse("*.[ch]"), NameMatcher::Glob(_)));
    }

    #[test]
    fn test_matcher_semantics() {
        let suffix = NameMatcher::parse("*.pyc");
        assert!(suffix.matches("module.pyc"));
        assert!(suffix.matches(".pyc"));
        assert!(!suffix.matches("module.py"));
        assert!(!suffix.matches("module.pyc.txt"));

        let prefix = NameMatcher::parse("npm-debug*");
        assert!(prefix.matches("npm-debug.log.1"));
        assert!(!prefix.matches("my-npm-debug"));

        let exact = NameMatcher::parse(".DS_Store");
        assert!(exact.matches(".DS_Store"));
        assert!(!exact.matches(".DS_Store.bak"));

        let glob = NameMatcher::parse("*.[ch]");
        assert!(glob.matches("main.c"));
        assert!(glob.matches("main.h"));
        assert!(!glob.matches("main.cpp"));
    }

    #[test]
    fn test_directory_candidates_match_exact_name_only() {
        let registry = PatternRegistry::builtin();
        assert!(registry.match_directory("node_modules").is_some());
        assert!(registry.match_directory("my_node_modules").is_none());
        assert!(registry.match_directory("Node_Modules").is_none());
    }

    #[test]
    fn test_match_file_returns_every_matching_pattern() {
        let registry = PatternRegistry::builtin();
        let matched: Vec<_> = registry.match_file("debug.log").map(|c| c.name()).collect();
        assert_eq!(matched, vec!["*.log"]);
        assert_eq!(registry.match_file("main.rs").count(), 0);
    }

    #[test]
    fn test_from_candidates_sorts_directories_first() {
        let registry = PatternRegistry::from_candidates(vec![
            PatternCandidate::new(PatternKey::file("*.log"), "Log file"),
            PatternCandidate::new(PatternKey::directory("b"), "b"),
            PatternCandidate::new(PatternKey::directory("a"), "a"),
        ]);
        let names: Vec<_> = registry.candidates().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["b", "a", "*.log"]);
    }

    #[test]
    fn test_key_display_marks_directories() {
        assert_eq!(PatternKey::directory("dist").to_string(), "dist/");
        assert_eq!(PatternKey::file("*.log").to_string(), "*.log");
    }
}
