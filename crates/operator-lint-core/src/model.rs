//! Domain model for operator repositories.
//!
//! A repository is laid out on disk as:
//!
//! ```text
//! <root>/operators/<operator>/ci.yaml
//! <root>/operators/<operator>/<version>/manifests/*
//! <root>/operators/<operator>/<version>/metadata/annotations.yaml
//! ```
//!
//! Checks never receive the owned types directly; they get a [`Target`],
//! a borrowed, tagged view over one of them.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Directory under the repository root holding one directory per operator.
pub const OPERATORS_DIR: &str = "operators";

/// Per-operator CI configuration file name.
pub const CI_CONFIG_FILE: &str = "ci.yaml";

/// Bundle sub-directory holding the manifests.
pub const MANIFESTS_DIR: &str = "manifests";

/// Bundle annotations file, relative to the bundle root.
pub const ANNOTATIONS_FILE: &str = "metadata/annotations.yaml";

/// Errors raised while loading a repository from disk.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// IO error while walking the repository.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The repository root has no `operators/` directory.
    #[error("{root} is not an operator repository: missing `operators/` directory")]
    NotARepo {
        /// Repository root that was inspected.
        root: PathBuf,
    },
}

impl ModelError {
    fn walk(path: &Path, err: walkdir::Error) -> Self {
        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// An operator repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    /// Repository root.
    pub root: PathBuf,
    /// Operators, sorted by name.
    pub operators: Vec<Operator>,
}

impl Repo {
    /// Creates an empty repository rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            operators: Vec::new(),
        }
    }

    /// Adds an operator.
    #[must_use]
    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operators.push(operator);
        self
    }

    /// Loads a repository from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if `root/operators` does not exist or cannot be read.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, ModelError> {
        let root = root.as_ref();
        let operators_dir = root.join(OPERATORS_DIR);
        if !operators_dir.is_dir() {
            return Err(ModelError::NotARepo {
                root: root.to_path_buf(),
            });
        }

        let operators = subdirectories(&operators_dir)?
            .into_iter()
            .map(|dir| Operator::load(&dir))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Loaded {} operators from {}", operators.len(), root.display());

        Ok(Self {
            root: root.to_path_buf(),
            operators,
        })
    }

    /// Looks up an operator by name.
    #[must_use]
    pub fn operator(&self, name: &str) -> Option<&Operator> {
        self.operators.iter().find(|o| o.name == name)
    }

    /// Every object in the repository as a [`Target`]: the repository
    /// itself, then each operator followed by its bundles.
    pub fn targets(&self) -> impl Iterator<Item = Target<'_>> {
        std::iter::once(Target::Repo(self)).chain(self.operators.iter().flat_map(|operator| {
            std::iter::once(Target::Operator(operator))
                .chain(operator.bundles.iter().map(Target::Bundle))
        }))
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Repo({})", self.root.display())
    }
}

/// An operator: a named directory holding one bundle per version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    /// Operator name (its directory name).
    pub name: String,
    /// Operator directory.
    pub root: PathBuf,
    /// Path to `ci.yaml`, if present.
    pub config: Option<PathBuf>,
    /// Bundles, sorted by version.
    pub bundles: Vec<Bundle>,
}

impl Operator {
    /// Creates an operator with no bundles and no CI config.
    #[must_use]
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            config: None,
            bundles: Vec::new(),
        }
    }

    /// Sets the CI config path.
    #[must_use]
    pub fn with_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = Some(path.into());
        self
    }

    /// Adds a bundle.
    #[must_use]
    pub fn with_bundle(mut self, bundle: Bundle) -> Self {
        self.bundles.push(bundle);
        self
    }

    /// Loads an operator from its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub fn load(root: &Path) -> Result<Self, ModelError> {
        let name = dir_name(root);
        let config = Some(root.join(CI_CONFIG_FILE)).filter(|p| p.is_file());

        let mut bundles = subdirectories(root)?
            .into_iter()
            .map(|dir| Bundle::load(&name, &dir))
            .collect::<Result<Vec<_>, _>>()?;
        bundles.sort_by(|a, b| compare_versions(&a.version, &b.version));

        Ok(Self {
            name,
            root: root.to_path_buf(),
            config,
            bundles,
        })
    }

    /// Looks up a bundle by version.
    #[must_use]
    pub fn bundle(&self, version: &str) -> Option<&Bundle> {
        self.bundles.iter().find(|b| b.version == version)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Operator({})", self.name)
    }
}

/// One released version of an operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    /// Name of the owning operator.
    pub operator_name: String,
    /// Bundle version (its directory name).
    pub version: String,
    /// Bundle directory.
    pub root: PathBuf,
    /// Manifest file paths relative to `manifests/`, sorted.
    pub manifests: Vec<PathBuf>,
    /// Path to `metadata/annotations.yaml`, if present.
    pub annotations: Option<PathBuf>,
}

impl Bundle {
    /// Creates a bundle with no manifests and no annotations.
    #[must_use]
    pub fn new(
        operator_name: impl Into<String>,
        version: impl Into<String>,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            operator_name: operator_name.into(),
            version: version.into(),
            root: root.into(),
            manifests: Vec::new(),
            annotations: None,
        }
    }

    /// Adds a manifest file.
    #[must_use]
    pub fn with_manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifests.push(path.into());
        self
    }

    /// Sets the annotations path.
    #[must_use]
    pub fn with_annotations(mut self, path: impl Into<PathBuf>) -> Self {
        self.annotations = Some(path.into());
        self
    }

    /// Loads a bundle from its version directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifests directory cannot be walked.
    pub fn load(operator_name: &str, root: &Path) -> Result<Self, ModelError> {
        let manifests_dir = root.join(MANIFESTS_DIR);
        let mut manifests = Vec::new();
        if manifests_dir.is_dir() {
            for entry in WalkDir::new(&manifests_dir).sort_by_file_name() {
                let entry = entry.map_err(|e| ModelError::walk(&manifests_dir, e))?;
                if entry.file_type().is_file() {
                    if let Ok(relative) = entry.path().strip_prefix(&manifests_dir) {
                        manifests.push(relative.to_path_buf());
                    }
                }
            }
        }

        let annotations = Some(root.join(ANNOTATIONS_FILE)).filter(|p| p.is_file());

        Ok(Self {
            operator_name: operator_name.to_string(),
            version: dir_name(root),
            root: root.to_path_buf(),
            manifests,
            annotations,
        })
    }
}

impl fmt::Display for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bundle({}/{})", self.operator_name, self.version)
    }
}

/// Category tag carried by every [`Target`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// A whole repository.
    Repo,
    /// An operator.
    Operator,
    /// A bundle.
    Bundle,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Repo => write!(f, "repo"),
            Self::Operator => write!(f, "operator"),
            Self::Bundle => write!(f, "bundle"),
        }
    }
}

/// A borrowed domain object handed to checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// A repository.
    Repo(&'a Repo),
    /// An operator.
    Operator(&'a Operator),
    /// A bundle.
    Bundle(&'a Bundle),
}

impl<'a> Target<'a> {
    /// Returns the category tag of this target.
    #[must_use]
    pub fn kind(&self) -> TargetKind {
        match self {
            Self::Repo(_) => TargetKind::Repo,
            Self::Operator(_) => TargetKind::Operator,
            Self::Bundle(_) => TargetKind::Bundle,
        }
    }

    /// Returns the operator if this target is one.
    #[must_use]
    pub fn as_operator(&self) -> Option<&'a Operator> {
        match *self {
            Self::Operator(operator) => Some(operator),
            _ => None,
        }
    }

    /// Returns the bundle if this target is one.
    #[must_use]
    pub fn as_bundle(&self) -> Option<&'a Bundle> {
        match *self {
            Self::Bundle(bundle) => Some(bundle),
            _ => None,
        }
    }

    /// Name of the operator this target belongs to, if any.
    #[must_use]
    pub fn operator_name(&self) -> Option<&'a str> {
        match *self {
            Self::Repo(_) => None,
            Self::Operator(operator) => Some(operator.name.as_str()),
            Self::Bundle(bundle) => Some(bundle.operator_name.as_str()),
        }
    }
}

impl fmt::Display for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Repo(repo) => fmt::Display::fmt(repo, f),
            Self::Operator(operator) => fmt::Display::fmt(operator, f),
            Self::Bundle(bundle) => fmt::Display::fmt(bundle, f),
        }
    }
}

impl Serialize for Target<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Orders version strings by semantic-version precedence.
///
/// Core components compare numerically where both sides are numbers. A
/// prerelease (`1.0.0-rc.1`) sorts before its release; build metadata
/// (`+build.5`) is ignored.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let (a_core, a_pre) = split_prerelease(a);
    let (b_core, b_pre) = split_prerelease(b);

    compare_identifiers(a_core.split('.'), b_core.split('.')).then_with(|| match (a_pre, b_pre) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(l), Some(r)) => compare_identifiers(l.split('.'), r.split('.')),
    })
}

fn split_prerelease(version: &str) -> (&str, Option<&str>) {
    let version = version.split_once('+').map_or(version, |(v, _)| v);
    match version.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (version, None),
    }
}

/// Numeric identifiers compare as numbers and sort before alphanumeric ones.
fn compare_identifiers<'v>(
    mut left: impl Iterator<Item = &'v str>,
    mut right: impl Iterator<Item = &'v str>,
) -> Ordering {
    loop {
        let ord = match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(l), Some(r)) => match (l.parse::<u64>(), r.parse::<u64>()) {
                (Ok(l), Ok(r)) => l.cmp(&r),
                (Ok(_), Err(_)) => Ordering::Less,
                (Err(_), Ok(_)) => Ordering::Greater,
                (Err(_), Err(_)) => l.cmp(r),
            },
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}

fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>, ModelError> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| ModelError::walk(dir, e))?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
