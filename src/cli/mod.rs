// FILE: src/cli/mod.rs

mod config;
mod handlers;

use crate::error::{Result, SassError};
use crate::{CompilerConfiguration, OutputStyle};
use clap::{Arg, ArgAction, Command, ValueEnum};
use std::time::Instant;

#[derive(Debug, Clone, ValueEnum)]
pub enum Style {
    Nested,
    Expanded,
    Compact,
    Compressed,
}

pub struct EnhancedCli {
    config: config::ConfigFile,
    start_time: Instant,
}

impl Default for EnhancedCli {
    fn default() -> Self {
        Self::new()
    }
}

impl EnhancedCli {
    pub fn new() -> Self {
        Self {
            config: config::ConfigFile::default(),
            start_time: Instant::now(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        self.start_time = Instant::now();
        let matches = self.build_cli().get_matches();

        self.setup_logging(matches.get_count("verbose"))?;

        if let Some(config_path) = matches.get_one::<String>("config") {
            self.config = config::load(config_path)?;
        }

        let result = match matches.subcommand() {
            Some(("compile", sub_matches)) => handlers::handle_compile_command(self, sub_matches),
            Some(("check", sub_matches)) => handlers::handle_check_command(self, sub_matches),
            Some(("version", _)) => handlers::handle_version_command(),
            _ => {
                println!("No subcommand specified. Use --help for usage information.");
                Ok(())
            }
        };
        log::debug!("Finished in {}ms", self.start_time.elapsed().as_millis());
        result
    }

    fn build_cli(&self) -> Command {
        Command::new(crate::NAME)
            .version(crate::VERSION)
            .about(crate::DESCRIPTION)
            .author("Sasskit Development Team")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path (.toml or .json)")
                    .action(ArgAction::Set),
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .help("Increase verbosity (can be used multiple times)")
                    .action(ArgAction::Count),
            )
            .subcommand(
                Command::new("compile")
                    .about("Compile a Sass/SCSS file (or stdin with '-') to CSS")
                    .arg(Arg::new("input").help("Input file, or '-' for stdin").required(true).index(1))
                    .arg(Arg::new("output").short('o').long("output").value_name("FILE").help("Output CSS file (stdout when omitted)"))
                    .arg(Arg::new("style").short('t').long("style").value_parser(clap::value_parser!(Style)).help("Output style"))
                    .arg(Arg::new("include").short('I').long("include").value_name("DIR").help("Add @import search directory").action(ArgAction::Append))
                    .arg(Arg::new("precision").short('p').long("precision").value_name("DIGITS").value_parser(clap::value_parser!(i32)).help("Fractional digits of computed numbers"))
                    .arg(Arg::new("comments").long("comments").help("Emit source line comments").action(ArgAction::SetTrue))
                    .arg(Arg::new("map").short('m').long("map").value_name("FILE").help("Write a source map to FILE (file input only; its URL is relative to the working directory)"))
                    .arg(Arg::new("map-root").long("map-root").value_name("PATH").help("Root path written into the source map"))
                    .arg(Arg::new("embed-map").long("embed-map").help("Embed the source map as a data URL").action(ArgAction::SetTrue))
                    .arg(Arg::new("map-contents").long("map-contents").help("Embed original sources in the source map").action(ArgAction::SetTrue))
                    .arg(Arg::new("no-omit-map-url").long("no-omit-map-url").help("Keep the sourceMappingURL comment").action(ArgAction::SetTrue))
                    .arg(Arg::new("watch").short('w').long("watch").help("Watch for file changes and recompile").action(ArgAction::SetTrue)),
            )
            .subcommand(
                Command::new("check")
                    .about("Check Sass/SCSS files for compile errors")
                    .arg(Arg::new("input").help("Input file or directory").required(true).index(1))
                    .arg(Arg::new("recursive").short('r').long("recursive").help("Check every .scss/.sass file in the directory recursively").action(ArgAction::SetTrue)),
            )
            .subcommand(Command::new("version").about("Show tool and libsass versions"))
    }

    fn setup_logging(&self, verbose_count: u8) -> Result<()> {
        let log_level = match verbose_count {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        env_logger::Builder::from_default_env()
            .filter_level(log_level)
            .format_timestamp_secs()
            .init();
        Ok(())
    }

    /// Merges command line flags, the config file and the defaults, in that
    /// order of precedence.
    pub fn build_configuration(&self, matches: &clap::ArgMatches) -> Result<CompilerConfiguration> {
        let mut config = CompilerConfiguration::default();

        if let Some(style) = matches.get_one::<Style>("style") {
            config.output_style = match style {
                Style::Nested => OutputStyle::Nested,
                Style::Expanded => OutputStyle::Expanded,
                Style::Compact => OutputStyle::Compact,
                Style::Compressed => OutputStyle::Compressed,
            };
        } else if let Some(style) = self.config.style {
            config.output_style = style;
        }

        let mut include_dirs: Vec<String> = Vec::new();
        if let Some(dirs) = matches.get_many::<String>("include") {
            include_dirs.extend(dirs.cloned());
        }
        if let Some(config_dirs) = &self.config.include_paths {
            include_dirs.extend(config_dirs.iter().cloned());
        }
        if !include_dirs.is_empty() {
            config.include_path = Some(join_include_paths(&include_dirs)?);
        }

        if let Some(precision) = matches.get_one::<i32>("precision") {
            config.precision = *precision;
        } else if let Some(precision) = self.config.precision {
            config.precision = precision;
        }

        config.emit_comments = matches.get_flag("comments") || self.config.comments.unwrap_or(false);
        config.embed_source_map =
            matches.get_flag("embed-map") || self.config.embed_map.unwrap_or(false);
        config.include_map_contents =
            matches.get_flag("map-contents") || self.config.map_contents.unwrap_or(false);
        config.omit_map_url = if matches.get_flag("no-omit-map-url") {
            false
        } else {
            self.config.omit_map_url.unwrap_or(true)
        };

        config.source_map_path = matches
            .get_one::<String>("map")
            .cloned()
            .or_else(|| self.config.map_path.clone());
        config.source_map_root = matches
            .get_one::<String>("map-root")
            .cloned()
            .or_else(|| self.config.map_root.clone());

        Ok(config)
    }

    /// Configuration for `check`: the config file's settings that affect
    /// whether a stylesheet compiles. Source maps are never requested.
    pub fn build_check_configuration(&self) -> CompilerConfiguration {
        let mut config = CompilerConfiguration::default();
        if let Some(style) = self.config.style {
            config.output_style = style;
        }
        if let Some(precision) = self.config.precision {
            config.precision = precision;
        }
        if let Some(dirs) = &self.config.include_paths {
            match join_include_paths(dirs) {
                Ok(joined) => config.include_path = Some(joined),
                Err(e) => log::warn!("Ignoring include_paths from config: {}", e),
            }
        }
        config
    }
}

fn join_include_paths(dirs: &[String]) -> Result<String> {
    let joined = std::env::join_paths(dirs)
        .map_err(|e| SassError::invalid_argument(format!("Invalid include directory: {}", e)))?;
    joined
        .into_string()
        .map_err(|_| SassError::invalid_argument("Include directories must be valid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile_matches(cli: &EnhancedCli, args: &[&str]) -> clap::ArgMatches {
        let mut argv = vec!["sasskit", "compile"];
        argv.extend_from_slice(args);
        let matches = cli.build_cli().try_get_matches_from(argv).unwrap();
        match matches.subcommand() {
            Some(("compile", sub_matches)) => sub_matches.clone(),
            _ => panic!("compile subcommand not parsed"),
        }
    }

    #[test]
    fn test_build_configuration_from_flags() {
        let cli = EnhancedCli::new();
        let matches = compile_matches(
            &cli,
            &[
                "main.scss",
                "--style", "compressed",
                "-I", "vendor",
                "-I", "shared",
                "--precision", "3",
                "--comments",
                "--map", "main.css.map",
                "--map-root", "/src",
                "--embed-map",
                "--no-omit-map-url",
            ],
        );

        let config = cli.build_configuration(&matches).unwrap();
        assert_eq!(config.output_style, OutputStyle::Compressed);
        assert_eq!(
            config.include_path,
            Some(join_include_paths(&["vendor".to_string(), "shared".to_string()]).unwrap())
        );
        assert_eq!(config.precision, 3);
        assert!(config.emit_comments);
        assert_eq!(config.source_map_path.as_deref(), Some("main.css.map"));
        assert_eq!(config.source_map_root.as_deref(), Some("/src"));
        assert!(config.embed_source_map);
        assert!(!config.include_map_contents);
        assert!(!config.omit_map_url);
    }

    #[test]
    fn test_build_configuration_defaults() {
        let cli = EnhancedCli::new();
        let matches = compile_matches(&cli, &["main.scss"]);
        let config = cli.build_configuration(&matches).unwrap();
        assert_eq!(config, CompilerConfiguration::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut cli = EnhancedCli::new();
        cli.config = config::ConfigFile {
            style: Some(OutputStyle::Expanded),
            include_paths: Some(vec!["from-config".to_string()]),
            precision: Some(9),
            map_path: Some("config.css.map".to_string()),
            omit_map_url: Some(false),
            ..Default::default()
        };

        let matches = compile_matches(&cli, &["main.scss", "-t", "compact", "-m", "flag.css.map"]);
        let config = cli.build_configuration(&matches).unwrap();
        assert_eq!(config.output_style, OutputStyle::Compact);
        assert_eq!(config.include_path.as_deref(), Some("from-config"));
        assert_eq!(config.precision, 9);
        assert_eq!(config.source_map_path.as_deref(), Some("flag.css.map"));
        assert!(!config.omit_map_url);
    }
}
