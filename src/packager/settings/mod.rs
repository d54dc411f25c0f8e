//! Configuration structures for packaging operations.
//!
//! Provides the project artifact model, declared dependencies, gemspec field
//! overrides and the builder pattern for constructing settings.

mod artifact;
mod builder;
mod core;
mod dependency;
mod overrides;

// Re-export all public types
pub use artifact::{PackagingKind, ProjectArtifact, RESERVED_GROUP};
pub use builder::{DEFAULT_GEM_HOOK, SettingsBuilder};
pub use core::Settings;
pub use dependency::{DependencyKind, ProjectDependency, Scope};
pub use overrides::GemspecOverrides;
