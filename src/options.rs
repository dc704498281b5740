//! Derivation of the option set handed to libsass.
//!
//! Several options are coupled: enabling source comments or configuring a
//! map path forces the map URL comment on, and a map path always embeds the
//! original sources in the map. The derivation runs in a fixed order so that
//! later steps override what earlier steps set.

use crate::config::CompilerConfiguration;
use crate::types::OutputStyle;

/// The fully resolved options of one compilation context.
///
/// `None` for a string option means the setter is never called and libsass
/// keeps its own default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextOptions {
    pub precision: i32,
    pub output_style: OutputStyle,
    pub include_path: Option<String>,
    pub source_comments: bool,
    pub omit_source_map_url: bool,
    pub source_map_embed: bool,
    pub source_map_contents: bool,
    pub source_map_file: Option<String>,
    pub source_map_root: Option<String>,
}

impl ContextOptions {
    pub fn from_config(config: &CompilerConfiguration) -> Self {
        let mut options = ContextOptions {
            precision: config.precision,
            output_style: config.output_style,
            include_path: None,
            source_comments: false,
            omit_source_map_url: config.omit_map_url,
            source_map_embed: false,
            source_map_contents: false,
            source_map_file: None,
            source_map_root: None,
        };

        if let Some(include_path) = &config.include_path {
            options.include_path = Some(include_path.clone());
        }

        options.source_comments = config.emit_comments;
        if config.emit_comments {
            options.omit_source_map_url = false;
        }

        options.source_map_embed = config.embed_source_map;
        options.source_map_contents = config.include_map_contents;

        if let Some(map_path) = &config.source_map_path {
            options.source_map_file = Some(map_path.clone());
            options.omit_source_map_url = false;
            options.source_map_contents = true;
        }

        if let Some(map_root) = &config.source_map_root {
            options.source_map_root = Some(map_root.clone());
        }

        options
    }
}

impl From<&CompilerConfiguration> for ContextOptions {
    fn from(config: &CompilerConfiguration) -> Self {
        Self::from_config(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pass_through() {
        let options = ContextOptions::from_config(&CompilerConfiguration::default());
        assert_eq!(options.precision, 5);
        assert_eq!(options.output_style, OutputStyle::Nested);
        assert_eq!(options.include_path, None);
        assert!(!options.source_comments);
        assert!(options.omit_source_map_url);
        assert!(!options.source_map_embed);
        assert!(!options.source_map_contents);
        assert_eq!(options.source_map_file, None);
        assert_eq!(options.source_map_root, None);
    }

    #[test]
    fn test_comments_force_map_url() {
        let config = CompilerConfiguration {
            emit_comments: true,
            omit_map_url: true,
            ..Default::default()
        };
        let options = ContextOptions::from_config(&config);
        assert!(options.source_comments);
        assert!(!options.omit_source_map_url);
    }

    #[test]
    fn test_map_path_forces_contents_over_user_choice() {
        let config = CompilerConfiguration {
            source_map_path: Some("out.css.map".to_string()),
            include_map_contents: false,
            omit_map_url: true,
            ..Default::default()
        };
        let options = ContextOptions::from_config(&config);
        assert_eq!(options.source_map_file.as_deref(), Some("out.css.map"));
        assert!(options.source_map_contents);
        assert!(!options.omit_source_map_url);
    }

    #[test]
    fn test_map_contents_verbatim_without_map_path() {
        let config = CompilerConfiguration {
            include_map_contents: true,
            embed_source_map: true,
            ..Default::default()
        };
        let options = ContextOptions::from_config(&config);
        assert!(options.source_map_contents);
        assert!(options.source_map_embed);
        assert_eq!(options.source_map_file, None);
        assert!(options.omit_source_map_url);
    }

    #[test]
    fn test_user_can_turn_map_url_on() {
        let config = CompilerConfiguration {
            omit_map_url: false,
            ..Default::default()
        };
        assert!(!ContextOptions::from_config(&config).omit_source_map_url);
    }

    #[test]
    fn test_strings_copied_verbatim() {
        let config = CompilerConfiguration {
            include_path: Some("/a:/b".to_string()),
            source_map_root: Some("/srv/src".to_string()),
            precision: 10,
            output_style: OutputStyle::Compact,
            ..Default::default()
        };
        let options = ContextOptions::from(&config);
        assert_eq!(options.include_path.as_deref(), Some("/a:/b"));
        assert_eq!(options.source_map_root.as_deref(), Some("/srv/src"));
        assert_eq!(options.precision, 10);
        assert_eq!(options.output_style, OutputStyle::Compact);
    }

    #[test]
    fn test_negative_precision_not_validated() {
        let config = CompilerConfiguration {
            precision: -1,
            ..Default::default()
        };
        assert_eq!(ContextOptions::from_config(&config).precision, -1);
    }
}
