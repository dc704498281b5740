//! Output styles and compile results

use crate::error::{Result, SassError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Numeric style codes, equal to libsass' `enum Sass_Output_Style`.
pub const STYLE_NESTED: i32 = 0;
pub const STYLE_EXPANDED: i32 = 1;
pub const STYLE_COMPACT: i32 = 2;
pub const STYLE_COMPRESSED: i32 = 3;

/// Formatting mode of the generated CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum OutputStyle {
    #[default]
    Nested = STYLE_NESTED,
    Expanded = STYLE_EXPANDED,
    Compact = STYLE_COMPACT,
    Compressed = STYLE_COMPRESSED,
}

impl OutputStyle {
    pub const ALL: [OutputStyle; 4] = [
        OutputStyle::Nested,
        OutputStyle::Expanded,
        OutputStyle::Compact,
        OutputStyle::Compressed,
    ];

    /// The libsass enumeration value for this style.
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            OutputStyle::Nested => "nested",
            OutputStyle::Expanded => "expanded",
            OutputStyle::Compact => "compact",
            OutputStyle::Compressed => "compressed",
        }
    }
}

impl TryFrom<i32> for OutputStyle {
    type Error = SassError;

    fn try_from(code: i32) -> Result<Self> {
        match code {
            STYLE_NESTED => Ok(OutputStyle::Nested),
            STYLE_EXPANDED => Ok(OutputStyle::Expanded),
            STYLE_COMPACT => Ok(OutputStyle::Compact),
            STYLE_COMPRESSED => Ok(OutputStyle::Compressed),
            other => Err(SassError::invalid_argument(format!(
                "unknown output style code {}",
                other
            ))),
        }
    }
}

impl From<OutputStyle> for i32 {
    fn from(style: OutputStyle) -> Self {
        style.code()
    }
}

impl FromStr for OutputStyle {
    type Err = SassError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nested" => Ok(OutputStyle::Nested),
            "expanded" => Ok(OutputStyle::Expanded),
            "compact" => Ok(OutputStyle::Compact),
            "compressed" => Ok(OutputStyle::Compressed),
            other => Err(SassError::invalid_argument(format!(
                "unknown output style '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a successful file compile.
///
/// The variant is chosen by configuration alone: `CssWithMap` whenever a
/// source map path was configured, whether or not libsass produced any map
/// content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutput {
    CssOnly(String),
    CssWithMap { css: String, map: String },
}

impl CompileOutput {
    pub fn css(&self) -> &str {
        match self {
            CompileOutput::CssOnly(css) => css,
            CompileOutput::CssWithMap { css, .. } => css,
        }
    }

    pub fn source_map(&self) -> Option<&str> {
        match self {
            CompileOutput::CssOnly(_) => None,
            CompileOutput::CssWithMap { map, .. } => Some(map),
        }
    }

    pub fn into_css(self) -> String {
        match self {
            CompileOutput::CssOnly(css) => css,
            CompileOutput::CssWithMap { css, .. } => css,
        }
    }

    /// Splits the output into its parts, CSS first.
    pub fn into_parts(self) -> (String, Option<String>) {
        match self {
            CompileOutput::CssOnly(css) => (css, None),
            CompileOutput::CssWithMap { css, map } => (css, Some(map)),
        }
    }
}
