//! Command line interface for gempack.

mod args;

pub use args::Args;

use crate::error::{CliError, Result};
use crate::metadata::load_manifest;
use crate::packager::{LocalRepositoryResolver, Packager, SettingsBuilder};
use std::path::PathBuf;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    run_with_args(args).await
}

/// Runs the packaging pipeline for parsed arguments.
pub async fn run_with_args(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let manifest = load_manifest(&args.project)?;

    let mut builder = SettingsBuilder::new()
        .artifact(manifest.artifact)
        .dependencies(manifest.dependencies)
        .base_dir(&manifest.base_dir)
        .build_dir(&manifest.build_dir)
        .overrides(manifest.overrides)
        .gemspec_overwrite(args.gemspec_overwrite)
        .include_dependencies(args.include_dependencies);

    if let Some(hook) = manifest.gem_hook {
        builder = builder.gem_hook(hook);
    }
    if let Some(gemspec) = &args.gemspec {
        builder = builder.gemspec(gemspec);
    }
    if let Some(output) = &args.output {
        builder = builder.output_path(output);
    }

    let settings = builder.build()?;

    let repository = args
        .local_repository
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let packager = Packager::new(settings, LocalRepositoryResolver::new(repository));

    let gem = packager.package().await?;

    println!("{}", gem.path.display());
    println!("sha256: {}", gem.checksum);

    Ok(0)
}
