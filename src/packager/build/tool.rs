//! External gem tool invocation and detection.

use crate::packager::error::{Error, Result};
use std::path::Path;
use std::sync::LazyLock;

/// Check if the `gem` command is available on PATH.
///
/// Cached result to avoid repeated subprocess calls. Diagnostic only; the
/// effective command may be overridden through settings.
pub static HAS_GEM: LazyLock<bool> = LazyLock::new(|| match which::which("gem") {
    Ok(path) => {
        log::debug!("Found gem at: {}", path.display());

        match std::process::Command::new(&path).arg("--version").output() {
            Ok(output) if output.status.success() => {
                let version = String::from_utf8_lossy(&output.stdout);
                log::info!("gem available: {}", version.trim());
                true
            }
            Ok(output) => {
                log::warn!(
                    "gem found at {} but --version check failed (exit code: {:?})",
                    path.display(),
                    output.status.code()
                );
                false
            }
            Err(e) => {
                log::warn!("gem found at {} but failed to execute: {}", path.display(), e);
                false
            }
        }
    }
    Err(e) => {
        log::debug!("gem not found in PATH: {}", e);
        false
    }
});

/// Runs `<command> build <gemspec>` in the given working directory and waits
/// for it to finish.
///
/// Blocking-call semantics: the pipeline suspends until the tool completes.
/// A non-zero exit code is fatal with the code attached; spawn failure is
/// fatal with the underlying cause.
pub async fn run_gem_build(command: &Path, gemspec: &Path, working_dir: &Path) -> Result<()> {
    let gemspec_arg = gemspec
        .file_name()
        .unwrap_or(gemspec.as_os_str())
        .to_os_string();

    log::info!(
        "running {} build {} in {}",
        command.display(),
        gemspec_arg.to_string_lossy(),
        working_dir.display()
    );

    let status = tokio::process::Command::new(command)
        .arg("build")
        .arg(&gemspec_arg)
        .current_dir(working_dir)
        .status()
        .await
        .map_err(|e| Error::CommandFailed {
            command: format!("{} build", command.display()),
            error: e,
        })?;

    if !status.success() {
        return Err(Error::ToolFailed {
            command: format!(
                "{} build {}",
                command.display(),
                gemspec_arg.to_string_lossy()
            ),
            code: status.code(),
        });
    }

    Ok(())
}
