//! Loader shim generation for JAR-bearing gems.
//!
//! Renders the Ruby source file that bridges the JAR payloads into JRuby,
//! using Handlebars with the embedded template.

use super::template::LOADER_SHIM_TEMPLATE;
use crate::packager::error::{Error, ErrorExt, Result};
use crate::packager::settings::ProjectArtifact;
use handlebars::Handlebars;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Renders the loader shim source for the given artifact and JAR payloads.
pub fn render_loader_shim(
    artifact: &ProjectArtifact,
    jar_files: &[String],
    gem_hook: &str,
) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("loader_shim.rb", LOADER_SHIM_TEMPLATE)
        .map_err(|e| Error::GenericError(format!("failed to register shim template: {e}")))?;

    let mut data: BTreeMap<&str, serde_json::Value> = BTreeMap::new();
    data.insert("module_name", titleize(artifact.artifact_id()).into());
    data.insert("gem_version", artifact.gem_version().into());
    data.insert("build_version", artifact.version().into());
    data.insert("jar_files", jar_files.into());
    data.insert("gem_hook", gem_hook.into());

    handlebars
        .render("loader_shim.rb", &data)
        .map_err(|e| Error::GenericError(format!("failed to render shim template: {e}")))
}

/// Writes the loader shim at `lib/<gem_name>.rb` under the staging directory,
/// unless a file already exists there.
///
/// An existing shim is never overwritten; user-supplied loaders win. Returns
/// the shim path when a file was written.
pub async fn write_loader_shim(
    staging_dir: &Path,
    artifact: &ProjectArtifact,
    jar_files: &[String],
    gem_hook: &str,
) -> Result<Option<PathBuf>> {
    let lib_dir = staging_dir.join("lib");
    let shim_path = lib_dir.join(format!("{}.rb", artifact.gem_name()));

    if shim_path.exists() {
        log::debug!("loader shim already present at {}", shim_path.display());
        return Ok(None);
    }

    let content = render_loader_shim(artifact, jar_files, gem_hook)?;

    tokio::fs::create_dir_all(&lib_dir)
        .await
        .fs_context("creating lib directory", &lib_dir)?;
    tokio::fs::write(&shim_path, content)
        .await
        .fs_context("writing loader shim", &shim_path)?;

    log::info!("generated loader shim {}", shim_path.display());
    Ok(Some(shim_path))
}

/// Title-cases each hyphen-separated segment of the artifact id and
/// concatenates them: `sample-lib` -> `SampleLib`.
fn titleize(artifact_id: &str) -> String {
    artifact_id
        .split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
