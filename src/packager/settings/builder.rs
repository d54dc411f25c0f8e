//! Builder for constructing Settings.

use super::{GemspecOverrides, ProjectArtifact, ProjectDependency, Settings};
use std::path::{Path, PathBuf};

/// Default post-install hook file name loaded by the generated shim.
pub const DEFAULT_GEM_HOOK: &str = "gem_hook.rb";

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use gempack::packager::{SettingsBuilder, ProjectArtifact, PackagingKind};
///
/// # fn example() -> gempack::packager::Result<()> {
/// let settings = SettingsBuilder::new()
///     .artifact(ProjectArtifact::new(
///         "rubygems",
///         "sample-lib",
///         "1.2.0",
///         None,
///         PackagingKind::Gem,
///     ))
///     .base_dir("projects/sample-lib")
///     .build_dir("projects/sample-lib/target")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    artifact: Option<ProjectArtifact>,
    dependencies: Vec<ProjectDependency>,
    base_dir: Option<PathBuf>,
    build_dir: Option<PathBuf>,
    launch_dir: Option<PathBuf>,
    gemspec: Option<PathBuf>,
    gemspec_overwrite: bool,
    include_dependencies: bool,
    gem_hook: Option<String>,
    gem_command: Option<PathBuf>,
    output_path: Option<PathBuf>,
    overrides: GemspecOverrides,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the artifact to package.
    ///
    /// # Required
    pub fn artifact(mut self, artifact: ProjectArtifact) -> Self {
        self.artifact = Some(artifact);
        self
    }

    /// Sets the declared dependency list.
    ///
    /// Default: empty
    pub fn dependencies(mut self, dependencies: Vec<ProjectDependency>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Sets the project base directory.
    ///
    /// # Required
    pub fn base_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.base_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the build output directory.
    ///
    /// # Required
    pub fn build_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.build_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the launch directory.
    ///
    /// Default: the base directory
    pub fn launch_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.launch_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Uses a pre-existing gemspec file instead of synthesizing one.
    ///
    /// Default: None (synthesize from metadata, or discover in the launch directory)
    pub fn gemspec<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.gemspec = Some(path.as_ref().to_path_buf());
        self
    }

    /// Allows overwriting the launch-directory gemspec with the synthesized one.
    ///
    /// Default: false
    pub fn gemspec_overwrite(mut self, overwrite: bool) -> Self {
        self.gemspec_overwrite = overwrite;
        self
    }

    /// Embeds resolved JAR dependencies into the gem.
    ///
    /// Default: false
    pub fn include_dependencies(mut self, include: bool) -> Self {
        self.include_dependencies = include;
        self
    }

    /// Sets the post-install hook file name.
    ///
    /// Default: `gem_hook.rb`
    pub fn gem_hook(mut self, hook: impl Into<String>) -> Self {
        self.gem_hook = Some(hook.into());
        self
    }

    /// Sets the command used to build the archive.
    ///
    /// Default: `gem` from PATH
    pub fn gem_command<P: AsRef<Path>>(mut self, command: P) -> Self {
        self.gem_command = Some(command.as_ref().to_path_buf());
        self
    }

    /// Sets the output path for the final archive.
    ///
    /// Default: `<build_dir>/<gem file name>`
    pub fn output_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets gemspec field overrides.
    ///
    /// Default: empty [`GemspecOverrides`]
    pub fn overrides(mut self, overrides: GemspecOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing:
    /// - `artifact`
    /// - `base_dir`
    /// - `build_dir`
    pub fn build(self) -> crate::packager::Result<Settings> {
        use crate::packager::error::Context;

        let base_dir = self.base_dir.context("base_dir is required")?;
        let launch_dir = self.launch_dir.unwrap_or_else(|| base_dir.clone());

        Ok(Settings::new(
            self.artifact.context("artifact is required")?,
            self.dependencies,
            base_dir,
            self.build_dir.context("build_dir is required")?,
            launch_dir,
            self.gemspec,
            self.gemspec_overwrite,
            self.include_dependencies,
            self.gem_hook.unwrap_or_else(|| DEFAULT_GEM_HOOK.to_string()),
            self.gem_command.unwrap_or_else(|| PathBuf::from("gem")),
            self.output_path,
            self.overrides,
        ))
    }
}
