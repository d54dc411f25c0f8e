//! Gemspec synthesis.
//!
//! - [`writer`] - incremental gemspec document writer
//! - [`shim`] - loader shim generation for JAR-bearing gems

mod shim;
mod template;
mod writer;

pub use shim::{render_loader_shim, write_loader_shim};
pub use writer::{Gemspec, GemspecWriter};
