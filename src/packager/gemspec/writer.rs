//! Incremental gemspec document writer.
//!
//! [`GemspecWriter`] collects fields, file lists and dependencies for one
//! gemspec, then [`GemspecWriter::close`] stages the registered files next to
//! the gemspec and serializes the document. The writer is single-use by
//! construction: `close` consumes it and returns a [`Gemspec`] handle.

use crate::packager::error::{Error, ErrorExt, Result};
use crate::packager::settings::ProjectArtifact;
use crate::packager::utils::fs::copy_file;
use std::path::{Path, PathBuf};

/// Finalized gemspec file on disk.
#[derive(Debug, Clone)]
pub struct Gemspec {
    path: PathBuf,
}

impl Gemspec {
    /// Path of the written gemspec file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copies the gemspec file into another directory, keeping its file name.
    ///
    /// The copy is byte-identical to the original.
    pub async fn copy(&self, destination_dir: &Path) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| Error::GenericError("gemspec path has no file name".into()))?;
        let destination = destination_dir.join(file_name);
        copy_file(&self.path, &destination).await?;
        Ok(destination)
    }
}

/// Builds one gemspec document incrementally.
///
/// Every registered file path is recorded relative to the package root
/// (`base_dir`). Optional fields follow the skip-if-empty rule uniformly:
/// appending `None` or an empty string leaves the gemspec default untouched.
pub struct GemspecWriter {
    path: PathBuf,
    base_dir: PathBuf,
    name: String,
    version: String,
    platform: Option<String>,
    scalars: Vec<(String, String)>,
    lists: Vec<(String, Vec<String>)>,
    files: Vec<String>,
    rdoc_files: Vec<String>,
    test_files: Vec<String>,
    dependencies: Vec<(String, String)>,
    dev_dependencies: Vec<(String, String)>,
    jar_files: Vec<(PathBuf, String)>,
}

impl GemspecWriter {
    /// Creates a writer for the given target path, package root and artifact.
    pub fn new(path: PathBuf, base_dir: PathBuf, artifact: &ProjectArtifact) -> Self {
        Self {
            path,
            base_dir,
            name: artifact.gem_name(),
            version: artifact.gem_version(),
            platform: None,
            scalars: Vec::new(),
            lists: Vec::new(),
            files: Vec::new(),
            rdoc_files: Vec::new(),
            test_files: Vec::new(),
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
            jar_files: Vec::new(),
        }
    }

    /// Appends a scalar field iff the value is non-empty.
    pub fn append(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.scalars.push((key.to_string(), value.to_string()));
        }
    }

    /// Validates and appends the release date (`YYYY-MM-DD`).
    pub fn append_date(&mut self, value: Option<&str>) -> Result<()> {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            let date = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|source| {
                Error::InvalidDate {
                    value: value.to_string(),
                    source,
                }
            })?;
            self.scalars
                .push(("date".to_string(), date.format("%Y-%m-%d").to_string()));
        }
        Ok(())
    }

    /// Appends a list-valued field parsed from a comma- or space-separated
    /// override string. Empty input is a no-op.
    pub fn append_list(&mut self, key: &str, value: Option<&str>) {
        let items = split_list(value);
        if !items.is_empty() {
            self.lists.push((key.to_string(), items));
        }
    }

    /// Registers every file under `base_dir/<dir>` into the file list,
    /// recursively, as package-root-relative paths. Duplicates are skipped.
    pub fn append_path(&mut self, dir: &str) -> Result<()> {
        for entry in collect_files(&self.base_dir, dir)? {
            push_unique(&mut self.files, entry);
        }
        Ok(())
    }

    /// Registers a single package-root-relative file, skipping duplicates.
    pub fn append_file(&mut self, path: &str) {
        push_unique(&mut self.files, path.to_string());
    }

    /// Registers extra rdoc files from a delimited override string.
    ///
    /// Each file enters both the rdoc file list and the main file list.
    pub fn append_rdoc_files(&mut self, value: Option<&str>) {
        for item in split_list(value) {
            push_unique(&mut self.rdoc_files, item.clone());
            push_unique(&mut self.files, item);
        }
    }

    /// Registers extra files from a delimited override string.
    pub fn append_files(&mut self, value: Option<&str>) {
        for item in split_list(value) {
            push_unique(&mut self.files, item);
        }
    }

    /// Adds to the executables list.
    ///
    /// The executable bit on the underlying file is not verified; permission
    /// bits are not portably queryable.
    pub fn append_executable(&mut self, name: &str) {
        match self.lists.iter_mut().find(|(key, _)| key == "executables") {
            Some((_, items)) => push_unique(items, name.to_string()),
            None => self
                .lists
                .push(("executables".to_string(), vec![name.to_string()])),
        }
    }

    /// Registers every file under `base_dir/<dir>` into the test-file list,
    /// independent of the main file list.
    pub fn append_test_path(&mut self, dir: &str) -> Result<()> {
        for entry in collect_files(&self.base_dir, dir)? {
            push_unique(&mut self.test_files, entry);
        }
        Ok(())
    }

    /// Appends a runtime dependency. An empty requirement means any version.
    pub fn append_dependency(&mut self, name: &str, requirement: &str) {
        self.dependencies
            .push((name.to_string(), normalize_requirement(requirement)));
    }

    /// Appends a development dependency. An empty requirement means any version.
    pub fn append_development_dependency(&mut self, name: &str, requirement: &str) {
        self.dev_dependencies
            .push((name.to_string(), normalize_requirement(requirement)));
    }

    /// Records a JAR payload to be copied under `lib/` at close time and
    /// referenced in the file list.
    pub fn append_jar_file(&mut self, source: &Path, dest_name: &str) {
        push_unique(&mut self.files, format!("lib/{dest_name}"));
        self.jar_files
            .push((source.to_path_buf(), dest_name.to_string()));
    }

    /// Sets the platform tag. Empty input is a no-op; the first non-empty
    /// value wins.
    pub fn append_platform(&mut self, value: Option<&str>) {
        if self.platform.is_none() {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                self.platform = Some(value.to_string());
            }
        }
    }

    /// Names of the registered JAR payloads, in declaration order.
    pub fn jar_names(&self) -> Vec<String> {
        self.jar_files.iter().map(|(_, name)| name.clone()).collect()
    }

    /// Renders the gemspec document.
    pub fn render(&self) -> String {
        let mut out = String::from("# -*- encoding: utf-8 -*-\n\n");
        out.push_str("Gem::Specification.new do |s|\n");
        out.push_str(&format!("  s.name = '{}'\n", escape(&self.name)));
        out.push_str(&format!("  s.version = '{}'\n", escape(&self.version)));
        if let Some(platform) = &self.platform {
            out.push_str(&format!("  s.platform = '{}'\n", escape(platform)));
        }
        for (key, value) in &self.scalars {
            out.push_str(&format!("  s.{} = '{}'\n", key, escape(value)));
        }
        if !self.lists.iter().any(|(key, _)| key == "require_paths") {
            out.push_str("  s.require_paths = ['lib']\n");
        }
        for (key, items) in &self.lists {
            out.push_str(&format!("  s.{} = {}\n", key, ruby_array(items)));
        }
        if !self.files.is_empty() {
            out.push_str(&format!("  s.files = {}\n", ruby_array(&self.files)));
        }
        if !self.rdoc_files.is_empty() {
            out.push_str(&format!(
                "  s.extra_rdoc_files = {}\n",
                ruby_array(&self.rdoc_files)
            ));
        }
        if !self.test_files.is_empty() {
            out.push_str(&format!("  s.test_files = {}\n", ruby_array(&self.test_files)));
        }
        for (name, requirement) in &self.dependencies {
            out.push_str(&format!(
                "  s.add_dependency '{}', '{}'\n",
                escape(name),
                escape(requirement)
            ));
        }
        for (name, requirement) in &self.dev_dependencies {
            out.push_str(&format!(
                "  s.add_development_dependency '{}', '{}'\n",
                escape(name),
                escape(requirement)
            ));
        }
        out.push_str("end\n");
        out
    }

    /// Finalizes the gemspec: stages registered files and JAR payloads next
    /// to the target path, then writes the document.
    ///
    /// Registered files that do not exist under the package root are skipped
    /// during staging (the loader shim is generated after close). Consumes
    /// the writer; the returned [`Gemspec`] is the only handle left.
    pub async fn close(self) -> Result<Gemspec> {
        let staging_dir = self
            .path
            .parent()
            .ok_or_else(|| Error::GenericError("gemspec path has no parent directory".into()))?
            .to_path_buf();

        tokio::fs::create_dir_all(&staging_dir)
            .await
            .fs_context("creating staging directory", &staging_dir)?;

        // Stage project files referenced by the document.
        for relative in &self.files {
            let source = self.base_dir.join(relative);
            let target = staging_dir.join(relative);
            if source.is_file() && source != target {
                copy_file(&source, &target).await?;
            }
        }
        for relative in &self.test_files {
            let source = self.base_dir.join(relative);
            let target = staging_dir.join(relative);
            if source.is_file() && source != target {
                copy_file(&source, &target).await?;
            }
        }

        // Stage JAR payloads under lib/.
        for (source, dest_name) in &self.jar_files {
            let target = staging_dir.join("lib").join(dest_name);
            copy_file(source, &target).await?;
        }

        let document = self.render();
        tokio::fs::write(&self.path, document)
            .await
            .fs_context("writing gemspec", &self.path)?;

        log::debug!("wrote gemspec {}", self.path.display());

        Ok(Gemspec { path: self.path })
    }
}

/// Splits a comma- or space-separated override string into an ordered list.
fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split([',', ' '])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn push_unique(items: &mut Vec<String>, item: String) {
    if !items.contains(&item) {
        items.push(item);
    }
}

fn normalize_requirement(requirement: &str) -> String {
    if requirement.trim().is_empty() {
        ">= 0".to_string()
    } else {
        requirement.trim().to_string()
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn ruby_array(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|i| format!("'{}'", escape(i))).collect();
    format!("[{}]", quoted.join(", "))
}

/// Collects all files under `base_dir/<dir>`, sorted, as relative paths.
fn collect_files(base_dir: &Path, dir: &str) -> Result<Vec<String>> {
    let root = base_dir.join(dir);
    let mut entries = Vec::new();

    for entry in walkdir::WalkDir::new(&root) {
        let entry =
            entry.map_err(|e| Error::GenericError(format!("walking {}: {}", root.display(), e)))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(base_dir)
            .map_err(|e| Error::GenericError(format!("relativizing path: {e}")))?;
        entries.push(relative.to_string_lossy().replace('\\', "/"));
    }

    entries.sort();
    Ok(entries)
}
