//! The compilation façade.
//!
//! A [`Sass`] owns one [`CompilerConfiguration`]. Each compile copies that
//! configuration into a brand new libsass context, runs libsass to
//! completion on the calling thread and drops the context before returning.
//!
//! Compiles take `&self` and setters take `&mut self`, so the borrow checker
//! rules out changing an instance's configuration while it is compiling.
//! Separate instances share nothing and can compile on separate threads.

use crate::config::CompilerConfiguration;
use crate::context::{self, CompilationContext};
use crate::error::{Result, SassError};
use crate::options::ContextOptions;
use crate::types::{CompileOutput, OutputStyle};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sass {
    config: CompilerConfiguration,
}

impl Sass {
    pub const STYLE_NESTED: OutputStyle = OutputStyle::Nested;
    pub const STYLE_EXPANDED: OutputStyle = OutputStyle::Expanded;
    pub const STYLE_COMPACT: OutputStyle = OutputStyle::Compact;
    pub const STYLE_COMPRESSED: OutputStyle = OutputStyle::Compressed;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CompilerConfiguration) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfiguration {
        &self.config
    }

    pub fn into_config(self) -> CompilerConfiguration {
        self.config
    }

    /// Compiles Sass source held in memory.
    ///
    /// Never produces a source map, even when a map path is configured:
    /// string input has no file for a map to describe.
    pub fn compile(&self, source: &str) -> Result<String> {
        let mut context = CompilationContext::for_source(source)?;
        context.apply(&self.context_options())?;
        context.compile()?;
        Ok(css_output(&context))
    }

    /// Compiles the file at `path`.
    ///
    /// Answers [`CompileOutput::CssWithMap`] whenever a map path is
    /// configured and [`CompileOutput::CssOnly`] otherwise. A missing or
    /// unreadable file fails with [`SassError::FileNotFound`] before libsass
    /// is involved.
    pub fn compile_file(&self, path: impl AsRef<Path>) -> Result<CompileOutput> {
        let path = path.as_ref();
        ensure_readable(path)?;

        let path_str = path.to_str().ok_or_else(|| {
            SassError::invalid_argument(format!("path {} is not valid UTF-8", path.display()))
        })?;

        let mut context = CompilationContext::for_file(path_str)?;
        context.apply(&self.context_options())?;
        context.compile()?;

        let css = css_output(&context);
        if self.config.wants_source_map() {
            let map = context.source_map_string().unwrap_or_default();
            Ok(CompileOutput::CssWithMap { css, map })
        } else {
            Ok(CompileOutput::CssOnly(css))
        }
    }

    /// The option set the next compile will hand to libsass.
    pub fn context_options(&self) -> ContextOptions {
        ContextOptions::from_config(&self.config)
    }

    pub fn library_version() -> String {
        context::library_version()
    }

    pub fn style(&self) -> OutputStyle {
        self.config.output_style
    }

    pub fn set_style(&mut self, style: OutputStyle) {
        self.config.output_style = style;
    }

    /// Numeric form of [`Sass::set_style`], using libsass' style codes.
    pub fn set_style_code(&mut self, code: i32) -> Result<()> {
        self.config.output_style = OutputStyle::try_from(code)?;
        Ok(())
    }

    /// Empty when no include path was ever set.
    pub fn include_path(&self) -> &str {
        self.config.include_path.as_deref().unwrap_or("")
    }

    pub fn set_include_path(&mut self, path: impl Into<String>) {
        self.config.include_path = Some(path.into());
    }

    pub fn precision(&self) -> i32 {
        self.config.precision
    }

    pub fn set_precision(&mut self, precision: i32) {
        self.config.precision = precision;
    }

    pub fn comments(&self) -> bool {
        self.config.emit_comments
    }

    pub fn set_comments(&mut self, comments: bool) {
        self.config.emit_comments = comments;
    }

    /// Empty when no map path was ever set.
    pub fn map_path(&self) -> &str {
        self.config.source_map_path.as_deref().unwrap_or("")
    }

    pub fn set_map_path(&mut self, path: impl Into<String>) {
        self.config.source_map_path = Some(path.into());
    }

    /// Empty when no map root was ever set.
    pub fn map_root(&self) -> &str {
        self.config.source_map_root.as_deref().unwrap_or("")
    }

    pub fn set_map_root(&mut self, root: impl Into<String>) {
        self.config.source_map_root = Some(root.into());
    }

    pub fn embed(&self) -> bool {
        self.config.embed_source_map
    }

    pub fn set_embed(&mut self, embed: bool) {
        self.config.embed_source_map = embed;
    }

    pub fn map_contents(&self) -> bool {
        self.config.include_map_contents
    }

    pub fn set_map_contents(&mut self, contents: bool) {
        self.config.include_map_contents = contents;
    }

    pub fn omit_map_url(&self) -> bool {
        self.config.omit_map_url
    }

    pub fn set_omit_map_url(&mut self, omit: bool) {
        self.config.omit_map_url = omit;
    }
}

impl From<CompilerConfiguration> for Sass {
    fn from(config: CompilerConfiguration) -> Self {
        Self::with_config(config)
    }
}

/// libsass leaves the output unset only if it failed, so a successful
/// compile without output is logged and read as empty CSS.
fn css_output(context: &CompilationContext) -> String {
    context.output_string().unwrap_or_else(|| {
        log::warn!("libsass reported success but returned no CSS output");
        String::new()
    })
}

fn ensure_readable(path: &Path) -> Result<()> {
    let readable = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
        && fs::File::open(path).is_ok();
    if readable {
        Ok(())
    } else {
        log::debug!("Refusing to compile {}: not a readable file", path.display());
        Err(SassError::file_not_found(path))
    }
}
