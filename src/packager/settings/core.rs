//! Core Settings struct and implementations.

use super::{GemspecOverrides, ProjectArtifact, ProjectDependency};
use std::path::{Path, PathBuf};

/// Main settings for one packaging invocation.
///
/// Central configuration for the packager, constructed via
/// [`super::SettingsBuilder`]. Contains the project artifact, declared
/// dependencies, directory layout and gemspec overrides. A fresh instance is
/// built per invocation; nothing here is shared or mutated across builds.
#[derive(Clone, Debug)]
pub struct Settings {
    /// The artifact being packaged.
    artifact: ProjectArtifact,

    /// Dependencies declared by the project.
    dependencies: Vec<ProjectDependency>,

    /// Project base directory holding `bin`, `lib`, `spec`, ...
    base_dir: PathBuf,

    /// Build output directory, used for staging and as fallback output.
    build_dir: PathBuf,

    /// Directory the build was launched from.
    ///
    /// Scanned for pre-existing gemspec files and the target of
    /// `gemspec_overwrite`. Defaults to the base directory.
    launch_dir: PathBuf,

    /// Explicit gemspec file to build instead of synthesizing one.
    gemspec: Option<PathBuf>,

    /// Overwrite the launch-directory gemspec when the synthesized one differs.
    gemspec_overwrite: bool,

    /// Embed resolved JAR dependencies into the gem.
    include_dependencies: bool,

    /// Post-install hook file loaded by the generated shim when present.
    gem_hook: String,

    /// Command used to build the archive. Injectable for tests.
    gem_command: PathBuf,

    /// Where the final archive is copied. Falls back to the build directory.
    output_path: Option<PathBuf>,

    /// Optional gemspec field overrides.
    overrides: GemspecOverrides,
}

impl Settings {
    /// Returns the artifact being packaged.
    pub fn artifact(&self) -> &ProjectArtifact {
        &self.artifact
    }

    /// Returns the declared dependencies.
    pub fn dependencies(&self) -> &[ProjectDependency] {
        &self.dependencies
    }

    /// Returns the project base directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the build output directory.
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Returns the launch directory.
    pub fn launch_dir(&self) -> &Path {
        &self.launch_dir
    }

    /// Returns the explicit gemspec file, if one was supplied.
    pub fn gemspec(&self) -> Option<&Path> {
        self.gemspec.as_deref()
    }

    /// Whether the launch-directory gemspec may be overwritten.
    pub fn gemspec_overwrite(&self) -> bool {
        self.gemspec_overwrite
    }

    /// Whether resolved JAR dependencies are embedded.
    pub fn include_dependencies(&self) -> bool {
        self.include_dependencies
    }

    /// Returns the post-install hook file name.
    pub fn gem_hook(&self) -> &str {
        &self.gem_hook
    }

    /// Returns the gem tool command.
    pub fn gem_command(&self) -> &Path {
        &self.gem_command
    }

    /// Returns the explicit output path for the archive, if any.
    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    /// Returns the gemspec field overrides.
    pub fn overrides(&self) -> &GemspecOverrides {
        &self.overrides
    }

    /// Effective platform tag: the override, or `java` for JAR-bearing artifacts.
    pub fn effective_platform(&self) -> Option<&str> {
        match self.overrides.platform.as_deref() {
            Some(p) if !p.is_empty() => Some(p),
            _ if self.artifact.has_jar_file() => Some("java"),
            _ => None,
        }
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        artifact: ProjectArtifact,
        dependencies: Vec<ProjectDependency>,
        base_dir: PathBuf,
        build_dir: PathBuf,
        launch_dir: PathBuf,
        gemspec: Option<PathBuf>,
        gemspec_overwrite: bool,
        include_dependencies: bool,
        gem_hook: String,
        gem_command: PathBuf,
        output_path: Option<PathBuf>,
        overrides: GemspecOverrides,
    ) -> Self {
        Self {
            artifact,
            dependencies,
            base_dir,
            build_dir,
            launch_dir,
            gemspec,
            gemspec_overwrite,
            include_dependencies,
            gem_hook,
            gem_command,
            output_path,
            overrides,
        }
    }
}
