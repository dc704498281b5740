//! Sasskit
//!
//! Sass/SCSS to CSS compilation through libsass. The crate does not parse
//! Sass itself: it turns a typed configuration into libsass options, runs one
//! of libsass' two entry points and hands back the CSS (and source map) or
//! libsass' error message.
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! use sasskit::{CompileOutput, OutputStyle, Result, Sass};
//!
//! fn main() -> Result<()> {
//!     let mut sass = Sass::new();
//!     sass.set_style(OutputStyle::Compressed);
//!     let css = sass.compile("a { b: c; }")?;
//!     assert_eq!(css.trim_end(), "a{b:c}");
//!
//!     sass.set_map_path("app.css.map");
//!     if let CompileOutput::CssWithMap { css, map } = sass.compile_file("app.scss")? {
//!         println!("{} bytes of CSS, {} bytes of map", css.len(), map.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Option coupling
//!
//! Options are not independent. Source comments force the source map URL
//! comment on, and a configured map path forces both the URL comment and
//! embedded map contents on. See [`ContextOptions`].

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod options;
pub mod sass;
pub mod types;

use std::path::Path;

pub use cli::EnhancedCli;
pub use config::{CompilerConfiguration, DEFAULT_PRECISION};
pub use context::{CompilationContext, ContextKind};
pub use error::{Result, SassError};
pub use options::ContextOptions;
pub use sass::Sass;
pub use types::*;

/// Tool version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// The Sass implementation behind the façade.
pub const SASS_FLAVOR: &str = "libsass";

/// Compile Sass source with the default configuration
pub fn compile_string(source: &str) -> Result<String> {
    compile_string_with_config(source, CompilerConfiguration::default())
}

/// Compile Sass source with a custom configuration
pub fn compile_string_with_config(source: &str, config: CompilerConfiguration) -> Result<String> {
    Sass::with_config(config).compile(source)
}

/// Compile a Sass file with the default configuration
pub fn compile_file(path: impl AsRef<Path>) -> Result<CompileOutput> {
    compile_file_with_config(path, CompilerConfiguration::default())
}

/// Compile a Sass file with a custom configuration
pub fn compile_file_with_config(
    path: impl AsRef<Path>,
    config: CompilerConfiguration,
) -> Result<CompileOutput> {
    let path = path.as_ref();
    log::debug!("{} v{} (libsass {})", NAME, VERSION, Sass::library_version());
    log::debug!("Compiling '{}' with {:?}", path.display(), config);
    Sass::with_config(config).compile_file(path)
}
