//! Main packaging orchestration.
//!
//! [`Packager`] runs one linear pipeline per invocation: synthesize or locate
//! a gemspec, invoke the external gem tool, and place the archive at the
//! artifact's output location. No state is shared across invocations.

use super::checksum::calculate_sha256;
use super::discovery::discover_gemspec;
use super::tool::{HAS_GEM, run_gem_build};
use crate::packager::error::{Error, Result};
use crate::packager::gemspec::{GemspecWriter, write_loader_shim};
use crate::packager::resolve::DependencyResolver;
use crate::packager::settings::{DependencyKind, ProjectDependency, Scope, Settings};
use crate::packager::utils::fs::{content_equals, copy_file, newest_file_with_extension};
use std::path::{Path, PathBuf};

/// A packaged gem archive with its checksum.
#[derive(Debug, Clone)]
pub struct PackagedGem {
    /// Final location of the archive.
    pub path: PathBuf,
    /// Hex-encoded SHA-256 of the archive.
    pub checksum: String,
}

/// Packaging orchestrator.
///
/// Selects one of two branches per invocation:
///
/// - **gemspec-from-metadata**: no gemspec was supplied and the project base
///   directory exists. Synthesizes the gemspec, stages files and JAR
///   payloads, generates the loader shim, runs the gem tool and copies the
///   archive to the output path.
/// - **gemspec-supplied-or-discovered**: otherwise. Uses the supplied gemspec
///   or discovers exactly one in the launch directory, runs the gem tool
///   there, and copies the most recent archive to the output path.
///
/// The dependency resolver is passed in explicitly; the orchestrator holds no
/// ambient build-tool state.
pub struct Packager<R: DependencyResolver> {
    settings: Settings,
    resolver: R,
}

impl<R: DependencyResolver> Packager<R> {
    /// Creates a new packager with the given settings and resolver.
    pub fn new(settings: Settings, resolver: R) -> Self {
        Self { settings, resolver }
    }

    /// Returns a reference to the packager settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Executes the packaging pipeline.
    ///
    /// Runs to completion or hard failure; a failed build never leaves a
    /// partial archive at the output path because the archive is produced in
    /// the staging directory and only copied out after the tool succeeds.
    pub async fn package(&self) -> Result<PackagedGem> {
        if !*HAS_GEM {
            log::debug!(
                "gem not detected on PATH; relying on configured command {}",
                self.settings.gem_command().display()
            );
        }

        let archive =
            if self.settings.gemspec().is_none() && self.settings.base_dir().is_dir() {
                self.build_from_metadata().await?
            } else {
                self.build_from_gemspec().await?
            };

        let checksum = calculate_sha256(&archive).await?;
        log::info!("created gem {} (sha256 {})", archive.display(), checksum);

        Ok(PackagedGem {
            path: archive,
            checksum,
        })
    }

    /// Branch A: synthesize the gemspec from project metadata and build it.
    async fn build_from_metadata(&self) -> Result<PathBuf> {
        let settings = &self.settings;
        let artifact = settings.artifact();
        let overrides = settings.overrides();

        log::info!(
            "building gem for {}-{} ...",
            artifact.gem_name(),
            artifact.gem_version()
        );
        log::info!("include dependencies? {}", settings.include_dependencies());

        let staging_dir = settings.build_dir().join(artifact.gem_name());
        let gemspec_path = staging_dir.join(format!("{}.gemspec", artifact.gem_name()));
        let mut writer = GemspecWriter::new(
            gemspec_path,
            settings.base_dir().to_path_buf(),
            artifact,
        );

        writer.append_date(overrides.date.as_deref())?;
        writer.append("rubygems_version", overrides.rubygems_version.as_deref());
        writer.append(
            "required_rubygems_version",
            overrides.required_rubygems_version.as_deref(),
        );
        writer.append(
            "required_ruby_version",
            overrides.required_ruby_version.as_deref(),
        );
        writer.append("bindir", overrides.bindir.as_deref());
        writer.append(
            "post_install_message",
            overrides.post_install_message.as_deref(),
        );
        writer.append("rubyforge_project", overrides.rubyforge_project.as_deref());
        writer.append_rdoc_files(overrides.extra_rdoc_files.as_deref());
        writer.append_files(overrides.extra_files.as_deref());
        writer.append_list("executables", overrides.executables.as_deref());
        writer.append_list("extensions", overrides.extensions.as_deref());
        writer.append_list("rdoc_options", overrides.rdoc_options.as_deref());
        writer.append_list("require_paths", overrides.require_paths.as_deref());

        // Platform defaults to java for JAR-bearing artifacts.
        writer.append_platform(settings.effective_platform());

        if let Some(jar) = artifact.jar_file() {
            let jar_name = jar
                .file_name()
                .ok_or_else(|| Error::GenericError("JAR path has no file name".into()))?
                .to_string_lossy()
                .into_owned();
            writer.append_jar_file(jar, &jar_name);
            writer.append_file(&format!("lib/{}.rb", artifact.gem_name()));
        }

        if settings.include_dependencies() {
            let filter = |d: &ProjectDependency| {
                d.is_jar() && matches!(d.scope, Scope::Compile | Scope::Runtime)
            };
            let resolved = self.resolver.resolve(settings.dependencies(), &filter)?;
            for dependency in &resolved {
                log::info!(
                    " -- include -- {}:{}:{}",
                    dependency.group,
                    dependency.name,
                    dependency.version
                );
                writer.append_jar_file(&dependency.file, &dependency.file_name());
            }
        }

        self.register_conventional_dirs(&mut writer).await?;

        for dependency in settings.dependencies() {
            match dependency.classify() {
                Some(DependencyKind::Runtime) => {
                    writer.append_dependency(&dependency.gem_name(), &dependency.version);
                }
                Some(DependencyKind::Development) => {
                    writer
                        .append_development_dependency(&dependency.gem_name(), &dependency.version);
                }
                None => {
                    log::debug!(
                        "skipping dependency {} (scope {:?}, type {})",
                        dependency.name,
                        dependency.scope,
                        dependency.kind
                    );
                }
            }
        }

        let jar_names = writer.jar_names();
        let gemspec = writer.close().await?;

        if artifact.has_jar_file() {
            write_loader_shim(&staging_dir, artifact, &jar_names, settings.gem_hook()).await?;
        }

        run_gem_build(settings.gem_command(), gemspec.path(), &staging_dir).await?;

        if settings.gemspec_overwrite() {
            let file_name = gemspec
                .path()
                .file_name()
                .ok_or_else(|| Error::GenericError("gemspec path has no file name".into()))?;
            let local = settings.launch_dir().join(file_name);
            if !content_equals(&local, gemspec.path()).await? {
                log::info!("overwriting gemspec '{}'", local.display());
                gemspec.copy(settings.launch_dir()).await?;
            }
        }

        let produced = staging_dir.join(artifact.gem_file_name(settings.effective_platform()));
        if !produced.is_file() {
            crate::bail!(
                "gem build did not produce the expected archive {}",
                produced.display()
            );
        }

        self.place_archive(&produced).await
    }

    /// Branch B: build a supplied or discovered gemspec in place.
    async fn build_from_gemspec(&self) -> Result<PathBuf> {
        let settings = &self.settings;

        let gemspec = match settings.gemspec() {
            Some(path) => path.to_path_buf(),
            None => {
                let dir = settings.launch_dir();
                let gemspec = discover_gemspec(dir).await?.into_single(dir)?;
                log::info!("use gemspec: {}", gemspec.display());
                gemspec
            }
        };

        let working_dir = match gemspec.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => settings.launch_dir().to_path_buf(),
        };

        run_gem_build(settings.gem_command(), &gemspec, &working_dir).await?;

        let produced = newest_file_with_extension(&working_dir, "gem")
            .await?
            .ok_or_else(|| {
                Error::GenericError(format!(
                    "gem build produced no archive in {}",
                    working_dir.display()
                ))
            })?;

        self.place_archive(&produced).await
    }

    /// Maps the conventional project directories into the gemspec: `bin`
    /// (files + executables), `lib`, `generators`, and `spec`/`test` which
    /// are registered as both files and test paths.
    async fn register_conventional_dirs(&self, writer: &mut GemspecWriter) -> Result<()> {
        let base = self.settings.base_dir();

        let bin_dir = base.join("bin");
        if bin_dir.is_dir() {
            writer.append_path("bin")?;
            let mut names = Vec::new();
            let mut entries = tokio::fs::read_dir(&bin_dir)
                .await
                .map_err(Error::IoError)?;
            while let Some(entry) = entries.next_entry().await.map_err(Error::IoError)? {
                if entry.path().is_file() {
                    names.push(entry.file_name().to_string_lossy().into_owned());
                }
            }
            names.sort();
            for name in names {
                // the executable bit is not checked; see append_executable
                writer.append_executable(&name);
            }
        }

        if base.join("lib").is_dir() {
            writer.append_path("lib")?;
        }
        if base.join("generators").is_dir() {
            writer.append_path("generators")?;
        }
        if base.join("spec").is_dir() {
            writer.append_path("spec")?;
            writer.append_test_path("spec")?;
        }
        if base.join("test").is_dir() {
            writer.append_path("test")?;
            writer.append_test_path("test")?;
        }

        Ok(())
    }

    /// Copies the produced archive to the artifact output path, or to the
    /// build directory when no explicit output applies.
    async fn place_archive(&self, produced: &Path) -> Result<PathBuf> {
        let destination = match self.settings.output_path() {
            Some(path) => path.to_path_buf(),
            None => {
                let file_name = produced
                    .file_name()
                    .ok_or_else(|| Error::GenericError("archive path has no file name".into()))?;
                self.settings.build_dir().join(file_name)
            }
        };

        if destination != produced {
            copy_file(produced, &destination).await?;
        }

        Ok(destination)
    }
}
