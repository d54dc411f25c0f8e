//! Dependency resolution seam.
//!
//! The orchestrator never talks to a repository directly; it receives a
//! [`DependencyResolver`] and hands it the declared dependency list plus a
//! filter predicate. The resolver returns file locations for the matching
//! candidates without touching the canonical artifact record.

use crate::packager::error::Result;
use crate::packager::settings::{ProjectDependency, Scope};
use std::path::{Path, PathBuf};

/// A dependency candidate resolved to a concrete file.
#[derive(Debug, Clone)]
pub struct ResolvedArtifact {
    /// Group identifier.
    pub group: String,
    /// Artifact name.
    pub name: String,
    /// Resolved version.
    pub version: String,
    /// Declared scope.
    pub scope: Scope,
    /// Resolved file location.
    pub file: PathBuf,
}

impl ResolvedArtifact {
    /// File name of the resolved payload.
    pub fn file_name(&self) -> String {
        self.file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{}-{}.jar", self.name, self.version))
    }
}

/// Resolves declared dependencies to concrete files.
pub trait DependencyResolver {
    /// Resolves every dependency accepted by `filter`.
    ///
    /// Implementations must not mutate the declared records; resolved
    /// locations are returned as separate [`ResolvedArtifact`] values.
    fn resolve(
        &self,
        dependencies: &[ProjectDependency],
        filter: &dyn Fn(&ProjectDependency) -> bool,
    ) -> Result<Vec<ResolvedArtifact>>;
}

/// Resolver backed by a local repository with the conventional layout
/// `<root>/<group-as-path>/<name>/<version>/<name>-<version>.jar`.
#[derive(Debug, Clone)]
pub struct LocalRepositoryResolver {
    root: PathBuf,
}

impl LocalRepositoryResolver {
    /// Creates a resolver rooted at the given repository directory.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn candidate_path(&self, dependency: &ProjectDependency) -> PathBuf {
        let mut path = self.root.clone();
        for segment in dependency.group.split('.') {
            path.push(segment);
        }
        path.push(&dependency.name);
        path.push(&dependency.version);
        path.push(format!("{}-{}.jar", dependency.name, dependency.version));
        path
    }
}

impl DependencyResolver for LocalRepositoryResolver {
    fn resolve(
        &self,
        dependencies: &[ProjectDependency],
        filter: &dyn Fn(&ProjectDependency) -> bool,
    ) -> Result<Vec<ResolvedArtifact>> {
        let mut resolved = Vec::new();

        for dependency in dependencies.iter().filter(|d| filter(d)) {
            let file = self.candidate_path(dependency);
            if !file.is_file() {
                crate::bail!(
                    "cannot resolve {}:{}:{} - no file at {}",
                    dependency.group,
                    dependency.name,
                    dependency.version,
                    file.display()
                );
            }
            resolved.push(ResolvedArtifact {
                group: dependency.group.clone(),
                name: dependency.name.clone(),
                version: dependency.version.clone(),
                scope: dependency.scope.clone(),
                file,
            });
        }

        Ok(resolved)
    }
}
