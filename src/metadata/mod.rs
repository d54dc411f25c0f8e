//! Project manifest loading.
//!
//! Parses the `gempack.toml` project manifest in a single read + parse and
//! yields the project artifact, declared dependencies and gemspec overrides.
//!
//! ```toml
//! [project]
//! group = "rubygems"
//! artifact = "sample-lib"
//! version = "1.2.0"
//! jar = "target/sample-lib.jar"   # optional
//! packaging = "java-gem"          # optional
//! gem_hook = "post_install.rb"    # optional
//!
//! [gem]
//! required_ruby_version = ">= 1.8.6"
//!
//! [[dependencies]]
//! group = "rubygems"
//! name = "rake"
//! version = ">= 0.8.7"
//! scope = "compile"
//! type = "gem"
//! ```

use crate::error::{CliError, GempackError, Result};
use crate::packager::{GemspecOverrides, PackagingKind, ProjectArtifact, ProjectDependency, Scope};
use std::path::{Path, PathBuf};

/// Parsed project manifest.
pub struct ProjectManifest {
    /// The artifact to package.
    pub artifact: ProjectArtifact,

    /// Dependencies declared in the manifest.
    pub dependencies: Vec<ProjectDependency>,

    /// Gemspec field overrides from the `[gem]` table.
    pub overrides: GemspecOverrides,

    /// Project base directory (manifest directory unless overridden).
    pub base_dir: PathBuf,

    /// Build output directory (default `<base_dir>/target`).
    pub build_dir: PathBuf,

    /// Post-install hook file name loaded by the generated shim.
    pub gem_hook: Option<String>,
}

/// Loads the project manifest (single read + parse).
pub fn load_manifest(manifest_path: &Path) -> Result<ProjectManifest> {
    let manifest = std::fs::read_to_string(manifest_path).map_err(|e| {
        GempackError::Cli(CliError::ExecutionFailed {
            command: "read_manifest".to_string(),
            reason: format!("Failed to read {}: {}", manifest_path.display(), e),
        })
    })?;

    let toml_value: toml::Value = toml::from_str(&manifest).map_err(|e| {
        GempackError::Cli(CliError::ExecutionFailed {
            command: "parse_manifest".to_string(),
            reason: format!("Failed to parse {}: {}", manifest_path.display(), e),
        })
    })?;

    let project = toml_value.get("project").ok_or_else(|| {
        GempackError::Cli(CliError::InvalidArguments {
            reason: "No [project] section in manifest".to_string(),
        })
    })?;

    let manifest_dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));

    let base_dir = project
        .get("basedir")
        .and_then(|v| v.as_str())
        .map(|dir| manifest_dir.join(dir))
        .unwrap_or_else(|| manifest_dir.to_path_buf());

    let build_dir = project
        .get("build_dir")
        .and_then(|v| v.as_str())
        .map(|dir| base_dir.join(dir))
        .unwrap_or_else(|| base_dir.join("target"));

    let jar_file = project
        .get("jar")
        .and_then(|v| v.as_str())
        .map(|jar| base_dir.join(jar));

    let packaging = project
        .get("packaging")
        .and_then(|v| v.as_str())
        .map(PackagingKind::parse)
        .unwrap_or_default();

    let gem_hook = project
        .get("gem_hook")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    let artifact = ProjectArtifact::new(
        required_str(project, "group")?,
        required_str(project, "artifact")?,
        required_str(project, "version")?,
        jar_file,
        packaging,
    );

    let overrides = match toml_value.get("gem") {
        Some(gem) => gem.clone().try_into().map_err(|e| {
            GempackError::Cli(CliError::InvalidArguments {
                reason: format!("Invalid [gem] section: {}", e),
            })
        })?,
        None => GemspecOverrides::default(),
    };

    let dependencies = parse_dependencies(&toml_value)?;

    Ok(ProjectManifest {
        artifact,
        dependencies,
        overrides,
        base_dir,
        build_dir,
        gem_hook,
    })
}

fn required_str<'a>(table: &'a toml::Value, key: &str) -> Result<&'a str> {
    table.get(key).and_then(|v| v.as_str()).ok_or_else(|| {
        GempackError::Cli(CliError::InvalidArguments {
            reason: format!("Missing '{}' in [project]", key),
        })
    })
}

fn parse_dependencies(toml_value: &toml::Value) -> Result<Vec<ProjectDependency>> {
    let Some(entries) = toml_value.get("dependencies").and_then(|v| v.as_array()) else {
        return Ok(Vec::new());
    };

    let mut dependencies = Vec::with_capacity(entries.len());
    for entry in entries {
        let name = entry
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                GempackError::Cli(CliError::InvalidArguments {
                    reason: "Missing 'name' in [[dependencies]] entry".to_string(),
                })
            })?
            .to_string();

        dependencies.push(ProjectDependency {
            group: entry
                .get("group")
                .and_then(|v| v.as_str())
                .unwrap_or("rubygems")
                .to_string(),
            name,
            version: entry
                .get("version")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            scope: Scope::parse(
                entry.get("scope").and_then(|v| v.as_str()).unwrap_or("compile"),
            ),
            kind: entry
                .get("type")
                .and_then(|v| v.as_str())
                .unwrap_or("gem")
                .to_string(),
            optional: entry
                .get("optional")
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
        });
    }

    Ok(dependencies)
}
