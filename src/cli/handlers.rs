// FILE: src/cli/handlers.rs
use crate::{CompileOutput, CompilerConfiguration, Result, Sass, SassError};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Instant;

const STDIN_MARKER: &str = "-";

// --- COMPILE ---
pub fn handle_compile_command(cli: &super::EnhancedCli, matches: &clap::ArgMatches) -> Result<()> {
    let input_path = matches
        .get_one::<String>("input")
        .ok_or_else(|| SassError::invalid_argument("missing input"))?;
    let output_path = matches.get_one::<String>("output").map(String::as_str);
    let config = cli.build_configuration(matches)?;
    log::debug!("Effective configuration: {:?}", config);

    if input_path == STDIN_MARKER {
        if matches.get_flag("watch") {
            return Err(SassError::invalid_argument("--watch needs a file input"));
        }
        return compile_stdin(&Sass::with_config(config), output_path);
    }

    if matches.get_flag("watch") {
        watch_and_compile(input_path, output_path, config)
    } else {
        compile_single_file(&Sass::with_config(config), input_path, output_path)
    }
}

fn compile_stdin(sass: &Sass, output_path: Option<&str>) -> Result<()> {
    if !sass.map_path().is_empty() {
        log::warn!("Source maps are only produced for file input; ignoring --map");
    }

    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source)?;
    let css = sass.compile(&source)?;
    write_css(&css, output_path)
}

/// Compiles one file and writes the CSS and, when configured, the map.
///
/// libsass is never told where the CSS goes, so the `sourceMappingURL`
/// comment points at the map path relative to the working directory rather
/// than to the output file.
fn compile_single_file(sass: &Sass, input_path: &str, output_path: Option<&str>) -> Result<()> {
    let compile_start = Instant::now();
    let output = sass.compile_file(input_path)?;
    log::info!(
        "Compiled {} in {}ms",
        input_path,
        compile_start.elapsed().as_millis()
    );

    match output {
        CompileOutput::CssOnly(css) => write_css(&css, output_path),
        CompileOutput::CssWithMap { css, map } => {
            write_css(&css, output_path)?;
            fs::write(sass.map_path(), map)?;
            log::info!("Source map written to {}", sass.map_path());
            Ok(())
        }
    }
}

fn write_css(css: &str, output_path: Option<&str>) -> Result<()> {
    match output_path {
        Some(path) => {
            fs::write(path, css)?;
            log::info!("CSS written to {} ({} bytes)", path, css.len());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(css.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn watch_and_compile(
    input_path: &str,
    output_path: Option<&str>,
    config: CompilerConfiguration,
) -> Result<()> {
    let sass = Sass::with_config(config);
    eprintln!("👀 Watching {} for changes...", input_path);

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                if let Err(e) = tx.send(event) {
                    eprintln!("Watch error: {}", e);
                }
            }
        },
        notify::Config::default(),
    )
    .map_err(|e| {
        SassError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to create file watcher: {}", e),
        ))
    })?;

    watcher
        .watch(Path::new(input_path), RecursiveMode::NonRecursive)
        .map_err(|e| {
            SassError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to watch file: {}", e),
            ))
        })?;

    if let Err(e) = compile_single_file(&sass, input_path, output_path) {
        eprintln!("❌ Initial compilation failed: {}", e);
    }

    loop {
        match rx.recv() {
            Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                eprintln!("🔄 File changed, recompiling...");
                match compile_single_file(&sass, input_path, output_path) {
                    Ok(()) => eprintln!("✅ Recompiled successfully"),
                    Err(e) => eprintln!("❌ Compilation failed: {}", e),
                }
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Watch error: {}", e);
                break;
            }
        }
    }

    Ok(())
}

// --- CHECK ---
pub fn handle_check_command(cli: &super::EnhancedCli, matches: &clap::ArgMatches) -> Result<()> {
    let input_path = matches
        .get_one::<String>("input")
        .ok_or_else(|| SassError::invalid_argument("missing input"))?;
    let recursive = matches.get_flag("recursive");
    let sass = Sass::with_config(cli.build_check_configuration());

    if recursive && Path::new(input_path).is_dir() {
        check_directory_recursive(&sass, input_path)
    } else {
        check_single_file(&sass, Path::new(input_path))
    }
}

fn check_single_file(sass: &Sass, input_path: &Path) -> Result<()> {
    match sass.compile_file(input_path) {
        Ok(_) => {
            println!("✅ {} - No issues found", input_path.display());
            Ok(())
        }
        Err(e) => {
            println!("❌ {} - {}", input_path.display(), e);
            Err(e)
        }
    }
}

/// Stylesheets worth compiling on their own: `.scss`/`.sass`, not partials.
fn is_entry_stylesheet(path: &Path) -> bool {
    let is_sass = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("scss") | Some("sass")
    );
    let is_partial = path
        .file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| n.starts_with('_'));
    is_sass && !is_partial
}

fn check_directory_recursive(sass: &Sass, dir_path: &str) -> Result<()> {
    let mut total_files = 0;
    let mut error_files = 0;

    for entry in walkdir::WalkDir::new(dir_path) {
        let entry = entry.map_err(|e| {
            SassError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Directory traversal error: {}", e),
            ))
        })?;
        if entry.file_type().is_file() && is_entry_stylesheet(entry.path()) {
            total_files += 1;
            if check_single_file(sass, entry.path()).is_err() {
                error_files += 1;
            }
        }
    }

    println!("\n📊 Check Summary:");
    println!("   Total files: {}", total_files);
    println!("   Files with errors: {}", error_files);

    if error_files > 0 {
        Err(SassError::compilation(format!(
            "{} of {} files have errors",
            error_files, total_files
        )))
    } else {
        Ok(())
    }
}

// --- VERSION ---
pub fn handle_version_command() -> Result<()> {
    println!("{} v{}", crate::NAME, crate::VERSION);
    println!("{} {}", crate::SASS_FLAVOR, Sass::library_version());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_entry_stylesheet_filter() {
        assert!(is_entry_stylesheet(Path::new("site/main.scss")));
        assert!(is_entry_stylesheet(Path::new("legacy.sass")));
        assert!(!is_entry_stylesheet(Path::new("site/_vars.scss")));
        assert!(!is_entry_stylesheet(Path::new("site/main.css")));
        assert!(!is_entry_stylesheet(Path::new("README")));
    }

    #[test]
    fn test_compile_single_file_writes_css_and_map() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("main.scss");
        let output = dir.path().join("main.css");
        let map = dir.path().join("main.css.map");
        fs::write(&input, ".a { .b { c: d; } }").unwrap();

        let mut sass = Sass::new();
        sass.set_map_path(map.to_string_lossy().into_owned());
        compile_single_file(&sass, input.to_str().unwrap(), output.to_str()).unwrap();

        let css = fs::read_to_string(&output).unwrap();
        assert!(css.contains(".a .b"));
        assert!(css.contains("sourceMappingURL="));
        assert!(css.trim_end().ends_with("main.css.map */"), "unexpected map url in {:?}", css);
        assert!(fs::read_to_string(&map).unwrap().contains("mappings"));
    }

    #[test]
    fn test_check_directory_counts_failures() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("good.scss"), "a { b: c; }").unwrap();
        fs::write(dir.path().join("_partial.scss"), "a { b: $undefined; }").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("bad.scss"), "a{b:c").unwrap();

        let err = check_directory_recursive(&Sass::new(), dir.path().to_str().unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 files have errors");

        fs::remove_file(dir.path().join("nested").join("bad.scss")).unwrap();
        check_directory_recursive(&Sass::new(), dir.path().to_str().unwrap()).unwrap();
    }
}
