//! Gem packaging: gemspec synthesis and build orchestration.
//!
//! The packager:
//! 1. Reads configuration from [`Settings`]
//! 2. Synthesizes a gemspec from project metadata, or locates an existing one
//! 3. Invokes the external gem tool
//! 4. Places the archive at the artifact output path and reports its checksum

pub mod build;
pub mod error;
pub mod gemspec;
pub mod resolve;
pub mod settings;
pub mod utils;

pub use build::{PackagedGem, Packager};
pub use error::{Error, Result};
pub use gemspec::{Gemspec, GemspecWriter};
pub use resolve::{DependencyResolver, LocalRepositoryResolver, ResolvedArtifact};
pub use settings::{
    DependencyKind, GemspecOverrides, PackagingKind, ProjectArtifact, ProjectDependency, Scope,
    Settings, SettingsBuilder,
};
