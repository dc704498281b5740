//! Per-instance compiler configuration

use crate::types::OutputStyle;
use serde::{Deserialize, Serialize};

/// Default number of fractional digits libsass renders.
pub const DEFAULT_PRECISION: i32 = 5;

/// Everything a [`crate::Sass`] instance knows about how to compile.
///
/// The record is copied into a fresh compilation context at the start of
/// every compile; it is never shared with libsass beyond that call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfiguration {
    pub output_style: OutputStyle,

    /// Directories searched by `@import`, separated by the platform path
    /// separator. `None` keeps libsass' own lookup rules.
    pub include_path: Option<String>,

    /// Passed to libsass as is, including negative values.
    pub precision: i32,

    /// Emit `/* line N, file */` comments.
    pub emit_comments: bool,

    pub source_map_path: Option<String>,
    pub source_map_root: Option<String>,
    pub embed_source_map: bool,
    pub include_map_contents: bool,
    pub omit_map_url: bool,
}

impl Default for CompilerConfiguration {
    fn default() -> Self {
        Self {
            output_style: OutputStyle::Nested,
            include_path: None,
            precision: DEFAULT_PRECISION,
            emit_comments: false,
            source_map_path: None,
            source_map_root: None,
            embed_source_map: false,
            include_map_contents: false,
            omit_map_url: true,
        }
    }
}

impl CompilerConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a file compile answers with a CSS/map pair.
    pub fn wants_source_map(&self) -> bool {
        self.source_map_path.is_some()
    }
}
