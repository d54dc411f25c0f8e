//! User-supplied gemspec field overrides.

/// Optional gemspec field overrides.
///
/// Every field follows the skip-if-empty rule: `None` (or an empty string)
/// leaves the gemspec's default for that field untouched. Typically parsed
/// from the `[gem]` table of the project manifest:
///
/// ```toml
/// [gem]
/// date = "2010-01-01"
/// required_ruby_version = ">= 1.8.6"
/// executables = "main-app helper"
/// post_install_message = "have fun"
/// ```
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct GemspecOverrides {
    /// Release date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,

    /// Extra files for the rdoc file list (comma or space separated).
    #[serde(default)]
    pub extra_rdoc_files: Option<String>,

    /// Extra files for the main file list (comma or space separated).
    #[serde(default)]
    pub extra_files: Option<String>,

    /// Options passed to rdoc (comma or space separated).
    #[serde(default)]
    pub rdoc_options: Option<String>,

    /// Override for `require_paths` (comma or space separated).
    #[serde(default)]
    pub require_paths: Option<String>,

    /// Project identifier on the gem forge.
    #[serde(default)]
    pub rubyforge_project: Option<String>,

    /// RubyGems version the gemspec was produced with.
    #[serde(default)]
    pub rubygems_version: Option<String>,

    /// Minimum RubyGems version requirement.
    #[serde(default)]
    pub required_rubygems_version: Option<String>,

    /// Install directory for executables.
    #[serde(default)]
    pub bindir: Option<String>,

    /// Minimum Ruby version requirement.
    #[serde(default)]
    pub required_ruby_version: Option<String>,

    /// Message printed after installation.
    #[serde(default)]
    pub post_install_message: Option<String>,

    /// Executables list override (comma or space separated).
    #[serde(default)]
    pub executables: Option<String>,

    /// Extensions list override (comma or space separated).
    #[serde(default)]
    pub extensions: Option<String>,

    /// Platform tag override. Defaults to `java` for JAR-bearing artifacts.
    #[serde(default)]
    pub platform: Option<String>,
}
