//! # repoflat-ignore
//!
//! The inclusion-decision engine: an ordered chain of ignore rules evaluated
//! for every directory before descent and every file before recording.
//!
//! The chain is composed once at startup from the resolved configuration and
//! is read-only during traversal. Evaluation short-circuits on the first
//! matching rule:
//!
//! 1. lock files (`*.lock` and well-known lock names) — never overridable
//! 2. configured ignored-directory names, matched per path segment
//! 3. the tool's own wrapper script
//! 4. the VCS ignore oracle (skippable via configuration)
//! 5. the project-local `.flattenignore` basename list
//!
//! ## What belongs here
//! * Rule ordering and matching
//! * The [`IgnoreOracle`] capability trait and its git implementation
//!
//! ## What does NOT belong here
//! * Traversal (use repoflat-walk)
//! * Classification (use repoflat-classify)

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Well-known package-manager and VCS lock files, matched by exact basename.
/// Basenames ending in `.lock` are excluded independently of this table.
static LOCK_FILE_NAMES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "composer.lock",
    "Gemfile.lock",
    "Cargo.lock",
    "poetry.lock",
    "pdm.lock",
    "npm-shrinkwrap.json",
    "bun.lockb",
];

/// The wrapper script the tool ships for driving itself; always excluded so
/// a run never flattens its own launcher. The content pass checks it again
/// because manifest and aggregate stages must agree even if the manifest
/// was produced by an older policy.
pub const WRAPPER_SCRIPT: &str = "fr.sh";

/// Answers "is this path excluded by version-control ignore rules".
///
/// Implementations are advisory: a failure to answer must be reported as
/// `false` (not ignored), never as an error. Tests inject deterministic
/// fakes through this trait.
pub trait IgnoreOracle {
    fn is_ignored(&self, path: &Path) -> bool;
}

/// `git check-ignore` backed oracle.
#[derive(Debug, Clone)]
pub struct GitOracle {
    root: PathBuf,
}

impl GitOracle {
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }
}

impl IgnoreOracle for GitOracle {
    /// Fail-open: a missing git binary, a non-repository root, or any other
    /// invocation failure all count as "not ignored".
    fn is_ignored(&self, path: &Path) -> bool {
        Command::new("git")
            .env_remove("GIT_DIR")
            .env_remove("GIT_WORK_TREE")
            .arg("-C")
            .arg(&self.root)
            .arg("check-ignore")
            .arg("-q")
            .arg(path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

/// Oracle that never ignores anything. Used when VCS-ignored paths are
/// explicitly included.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOracle;

impl IgnoreOracle for NullOracle {
    fn is_ignored(&self, _path: &Path) -> bool {
        false
    }
}

/// One link in the ordered chain. Each rule is a pure predicate over a path.
enum Rule {
    LockFile,
    IgnoredDirs {
        root: PathBuf,
        names: BTreeSet<String>,
    },
    WrapperScript,
    Vcs {
        oracle: Box<dyn IgnoreOracle>,
    },
    ProjectList {
        names: BTreeSet<String>,
    },
}

impl Rule {
    fn matches(&self, path: &Path) -> bool {
        let base = basename(path);
        match self {
            Rule::LockFile => base.ends_with(".lock") || LOCK_FILE_NAMES.contains(&base),
            Rule::IgnoredDirs { root, names } => {
                // A path outside the root fails open: the rule does not
                // match and later rules still get a say.
                match path.strip_prefix(root) {
                    Ok(rel) => rel
                        .components()
                        .any(|c| names.contains(&c.as_os_str().to_string_lossy().into_owned())),
                    Err(_) => false,
                }
            }
            Rule::WrapperScript => base == WRAPPER_SCRIPT,
            Rule::Vcs { oracle } => oracle.is_ignored(path),
            Rule::ProjectList { names } => names.contains(base),
        }
    }
}

/// The assembled ignore policy. Construct once per run, then consult
/// [`IgnorePolicy::should_ignore`] for every candidate path.
pub struct IgnorePolicy {
    rules: Vec<Rule>,
}

impl IgnorePolicy {
    /// Compose the rule chain for `root`.
    ///
    /// `ignored_dirs` are directory names to skip anywhere under the root.
    /// When `include_ignored` is true the VCS oracle rule is omitted
    /// entirely. The `.flattenignore` list is loaded here, once; blank lines
    /// and `#` comments are skipped.
    #[must_use]
    pub fn new(
        root: &Path,
        ignored_dirs: &[String],
        include_ignored: bool,
        oracle: Box<dyn IgnoreOracle>,
    ) -> Self {
        let mut rules = vec![
            Rule::LockFile,
            Rule::IgnoredDirs {
                root: root.to_path_buf(),
                names: ignored_dirs.iter().cloned().collect(),
            },
            Rule::WrapperScript,
        ];
        if !include_ignored {
            rules.push(Rule::Vcs { oracle });
        }
        rules.push(Rule::ProjectList {
            names: load_flattenignore(root),
        });
        Self { rules }
    }

    /// First matching rule wins; no rule matching means the path is included.
    #[must_use]
    pub fn should_ignore(&self, path: &Path) -> bool {
        self.rules.iter().any(|rule| rule.matches(path))
    }
}

fn basename(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("")
}

fn load_flattenignore(root: &Path) -> BTreeSet<String> {
    let Ok(content) = std::fs::read_to_string(root.join(".flattenignore")) else {
        return BTreeSet::new();
    };
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
