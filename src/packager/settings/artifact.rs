//! Project artifact identity and gem naming rules.

use std::path::{Path, PathBuf};

/// Group identifier treated as the default gem namespace.
///
/// Artifacts in this group keep their bare name; every other group is
/// prefixed onto the gem name (`<group>.<artifact>`).
pub const RESERVED_GROUP: &str = "rubygems";

/// Packaging kind declared for the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackagingKind {
    /// Pure-source gem without a JAR payload.
    #[default]
    Gem,
    /// Gem carrying a compiled JAR payload for JRuby.
    JavaGem,
}

impl PackagingKind {
    /// Parses the manifest `packaging` value. Unknown values fall back to `Gem`.
    pub fn parse(value: &str) -> Self {
        match value {
            "java-gem" => PackagingKind::JavaGem,
            _ => PackagingKind::Gem,
        }
    }
}

/// The buildable unit being converted into a gem.
///
/// Constructed once per invocation from project metadata and immutable
/// afterwards. Dependency resolution never rewrites the JAR location stored
/// here; resolved paths are threaded through as separate values.
#[derive(Debug, Clone)]
pub struct ProjectArtifact {
    group: String,
    artifact_id: String,
    version: String,
    jar_file: Option<PathBuf>,
    packaging: PackagingKind,
}

impl ProjectArtifact {
    /// Creates a new artifact record.
    pub fn new(
        group: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        jar_file: Option<PathBuf>,
        packaging: PackagingKind,
    ) -> Self {
        Self {
            group: group.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            jar_file,
            packaging,
        }
    }

    /// Returns the group identifier.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Returns the artifact identifier.
    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    /// Returns the raw build-tool version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the compiled JAR payload, if the artifact carries one.
    pub fn jar_file(&self) -> Option<&Path> {
        self.jar_file.as_deref()
    }

    /// Whether the artifact carries a compiled JAR payload.
    pub fn has_jar_file(&self) -> bool {
        self.jar_file.is_some()
    }

    /// Returns the declared packaging kind.
    pub fn packaging(&self) -> PackagingKind {
        self.packaging
    }

    /// Gem name derived from group and artifact id.
    ///
    /// The reserved `rubygems` group is omitted from the prefix; any other
    /// group is prepended as `<group>.`.
    pub fn gem_name(&self) -> String {
        if self.group == RESERVED_GROUP {
            self.artifact_id.clone()
        } else {
            format!("{}.{}", self.group, self.artifact_id)
        }
    }

    /// Version string normalized for RubyGems.
    ///
    /// RubyGems rejects `-` inside version segments, so dashes become dots
    /// and prerelease tags are lowercased (`1.0-SNAPSHOT` -> `1.0.snapshot`).
    pub fn gem_version(&self) -> String {
        self.version.replace('-', ".").to_lowercase()
    }

    /// Expected archive file name produced by `gem build`.
    ///
    /// `<gem_name>-<gem_version>[-java].gem`, with the `java` platform suffix
    /// when the artifact is a java-gem or the effective platform says so.
    pub fn gem_file_name(&self, platform: Option<&str>) -> String {
        let suffix = if self.packaging == PackagingKind::JavaGem || platform == Some("java") {
            "-java"
        } else {
            ""
        };
        format!("{}-{}{}.gem", self.gem_name(), self.gem_version(), suffix)
    }
}
