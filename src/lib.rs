//! Gem packaging library for build projects.
//!
//! Converts a project's metadata and artifacts into a RubyGems package,
//! optionally embedding a compiled JAR payload and its runtime JAR
//! dependencies so the resulting gem loads under JRuby without the original
//! build tool present.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod metadata;
pub mod packager;

// Re-export commonly used types
pub use error::{CliError, GempackError, Result};
