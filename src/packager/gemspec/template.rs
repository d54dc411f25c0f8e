//! Embedded template for the generated loader shim.

/// Handlebars template for the Ruby loader shim of JAR-bearing gems.
///
/// Defines the gem's module with version constants, requires each JAR
/// payload under JRuby, and loads an optional post-install hook file.
pub const LOADER_SHIM_TEMPLATE: &str = r#"module {{module_name}}
  VERSION = '{{gem_version}}'
  MAVEN_VERSION = '{{build_version}}'
end
begin
  require 'java'
{{#each jar_files}}
  require File.dirname(__FILE__) + '/{{this}}'
{{/each}}
rescue LoadError
  puts 'JAR-based gems require JRuby to load. Please visit www.jruby.org.'
  raise
end

load File.dirname(__FILE__) + '/{{gem_hook}}' if File.exists?( File.dirname(__FILE__) + '/{{gem_hook}}' )
"#;
