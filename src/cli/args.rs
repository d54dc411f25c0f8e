//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// Gem packager for build projects
#[derive(Parser, Debug)]
#[command(
    name = "gempack",
    version,
    about = "Builds RubyGems packages from project metadata",
    long_about = "Converts a project manifest into a .gem archive, optionally embedding a \
compiled JAR payload and its runtime JAR dependencies for JRuby.

Usage:
  gempack --project gempack.toml
  gempack --project gempack.toml --include-dependencies --local-repository ~/.m2/repository
  gempack --project gempack.toml --gemspec my.gemspec --output out/my.gem

Exit code 0 = archive guaranteed to exist at the output path."
)]
pub struct Args {
    /// Path to the project manifest (gempack.toml)
    #[arg(short = 'p', long, value_name = "FILE")]
    pub project: PathBuf,

    /// Use this gemspec file instead of synthesizing one from the manifest
    #[arg(long, value_name = "FILE")]
    pub gemspec: Option<PathBuf>,

    /// Overwrite the gemspec next to the manifest when the synthesized one differs
    #[arg(long)]
    pub gemspec_overwrite: bool,

    /// Embed resolved JAR dependencies into the gem
    #[arg(long)]
    pub include_dependencies: bool,

    /// Local repository used to resolve JAR dependencies
    #[arg(long, value_name = "DIR")]
    pub local_repository: Option<PathBuf>,

    /// Output path for the created archive
    ///
    /// Defaults to `<build_dir>/<gem file name>`.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.project.is_file() {
            return Err(format!(
                "Project manifest not found: {}",
                self.project.display()
            ));
        }

        if self.include_dependencies && self.local_repository.is_none() {
            return Err(
                "--include-dependencies requires --local-repository to resolve JAR files"
                    .to_string(),
            );
        }

        if let Some(gemspec) = &self.gemspec
            && !gemspec.is_file()
        {
            return Err(format!("Gemspec file not found: {}", gemspec.display()));
        }

        Ok(())
    }
}
