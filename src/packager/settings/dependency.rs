//! Declared dependencies and their runtime/development classification.

use super::artifact::RESERVED_GROUP;

/// Declared dependency scope.
///
/// Parsed by exact match against the recognized scope names. Anything else is
/// preserved as [`Scope::Other`] and dropped during classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Needed to compile and at runtime.
    Compile,
    /// Needed at runtime only.
    Runtime,
    /// Supplied by the target environment.
    Provided,
    /// Needed for tests only.
    Test,
    /// Unrecognized scope value, ignored during classification.
    Other(String),
}

impl Scope {
    /// Parses a scope string by exact match.
    pub fn parse(value: &str) -> Self {
        match value {
            "compile" => Scope::Compile,
            "runtime" => Scope::Runtime,
            "provided" => Scope::Provided,
            "test" => Scope::Test,
            other => Scope::Other(other.to_string()),
        }
    }
}

/// Which gemspec dependency list a declared dependency lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    /// `s.add_dependency` entry.
    Runtime,
    /// `s.add_development_dependency` entry.
    Development,
}

/// A dependency declared by the project.
#[derive(Debug, Clone)]
pub struct ProjectDependency {
    /// Group identifier.
    pub group: String,
    /// Dependency name.
    pub name: String,
    /// Version requirement; empty means "any version".
    pub version: String,
    /// Declared scope.
    pub scope: Scope,
    /// Declared type, e.g. `gem`, `java-gem` or `jar`.
    pub kind: String,
    /// Whether the dependency is optional.
    pub optional: bool,
}

impl ProjectDependency {
    /// Namespace-qualified gem name for this dependency.
    ///
    /// Same rule as [`super::ProjectArtifact::gem_name`]: the reserved group
    /// contributes no prefix.
    pub fn gem_name(&self) -> String {
        if self.group == RESERVED_GROUP {
            self.name.clone()
        } else {
            format!("{}.{}", self.group, self.name)
        }
    }

    /// Whether the declared type denotes a packaged gem dependency.
    pub fn is_gem(&self) -> bool {
        self.kind.contains("gem")
    }

    /// Whether the declared type is a JAR archive.
    pub fn is_jar(&self) -> bool {
        self.kind == "jar"
    }

    /// Classifies the dependency into a gemspec dependency list.
    ///
    /// Only non-optional gem-typed dependencies are classified. Compile and
    /// runtime scopes become runtime dependencies, provided and test scopes
    /// become development dependencies. Any other scope is dropped; callers
    /// log the gap but do not treat it as an error.
    pub fn classify(&self) -> Option<DependencyKind> {
        if self.optional || !self.is_gem() {
            return None;
        }
        match self.scope {
            Scope::Compile | Scope::Runtime => Some(DependencyKind::Runtime),
            Scope::Provided | Scope::Test => Some(DependencyKind::Development),
            Scope::Other(_) => None,
        }
    }
}
