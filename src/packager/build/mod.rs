//! Packaging pipeline.
//!
//! - [`discovery`] - gemspec file discovery in the launch directory
//! - [`orchestrator`] - the [`Packager`] pipeline
//! - [`tool`] - external gem tool invocation
//! - [`checksum`] - SHA256 checksums for produced archives

mod checksum;
mod discovery;
mod orchestrator;
mod tool;

pub use checksum::calculate_sha256;
pub use discovery::{Discovery, discover_gemspec};
pub use orchestrator::{PackagedGem, Packager};
pub use tool::{HAS_GEM, run_gem_build};
