use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use aigi_core::{Compression, EncodeOptions, empty_metadata, inspect, read_file, write_file};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use image::{DynamicImage, ImageFormat};
use serde_json::Value;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("AIGI_BUILD_COMMIT"),
    " ",
    env!("AIGI_BUILD_DATE"),
    ", ",
    env!("AIGI_BUILD_TARGET"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "aigi")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Bundle images and JSON metadata into a single AIGI container file.",
    long_about = None,
    after_help = "Examples:\n  aigi save frames.aigi --images a.png b.png --metadata '{\"fps\": 12}'\n  aigi load frames.aigi --extract out/\n  aigi info frames.aigi --json"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode images and metadata into a container file.
    Save {
        /// Output container path
        file: PathBuf,

        /// Image files to store, in order (PNG, JPEG, GIF, BMP, TIFF, WebP; globs are expanded)
        #[arg(long, num_args = 1..)]
        images: Vec<String>,

        /// Metadata as inline JSON (defaults to {})
        #[arg(long)]
        metadata: Option<String>,

        /// zlib compression level for image payloads (0-9)
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=9))]
        level: Option<u32>,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// Decode a container file and print its metadata.
    Load {
        /// Input container path
        file: PathBuf,

        /// Write decoded images as PNG files into this directory
        #[arg(long)]
        extract: Option<PathBuf>,

        /// Pretty-print metadata JSON
        #[arg(long)]
        pretty: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// Show container framing without decoding images.
    Info {
        /// Input container path
        file: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Save {
            file,
            images,
            metadata,
            level,
            quiet,
        } => cmd_save(file, images, metadata, level, quiet),
        Commands::Load {
            file,
            extract,
            pretty,
            quiet,
        } => cmd_load(file, extract, pretty, quiet),
        Commands::Info { file, json } => cmd_info(file, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_save(
    file: PathBuf,
    images: Vec<String>,
    metadata: Option<String>,
    level: Option<u32>,
    quiet: bool,
) -> Result<(), CliError> {
    if images.is_empty() {
        return Err(CliError::new(
            "no images provided",
            Some("pass one or more image files with --images".to_string()),
        ));
    }

    let metadata = parse_metadata(metadata.as_deref())?;
    let mut paths = Vec::new();
    for pattern in &images {
        paths.extend(resolve_image_paths(pattern)?);
    }
    ensure_output_differs(&file, &paths)?;

    let decoded = paths
        .iter()
        .map(|path| open_image(path))
        .collect::<Result<Vec<_>, _>>()?;

    let options = EncodeOptions {
        compression: level.map(Compression::new).unwrap_or_default(),
    };
    create_parent_dir(&file)?;
    write_file(&file, &decoded, &metadata, &options)
        .with_context(|| format!("Failed to save container: {}", file.display()))?;

    if !quiet {
        eprintln!("Saved {} images to {}", decoded.len(), file.display());
    }
    Ok(())
}

fn cmd_load(
    file: PathBuf,
    extract: Option<PathBuf>,
    pretty: bool,
    quiet: bool,
) -> Result<(), CliError> {
    validate_input_file(&file)?;
    let container = read_file(&file)
        .with_context(|| format!("Failed to load container: {}", file.display()))?;

    if !quiet {
        eprintln!(
            "Loaded {} images from {}",
            container.images.len(),
            file.display()
        );
    }
    println!("{}", serialize_json(&container.metadata, pretty)?);

    if let Some(dir) = extract {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        for (index, image) in container.images.iter().enumerate() {
            let path = dir.join(format!("image_{:03}.png", index + 1));
            image
                .save_with_format(&path, ImageFormat::Png)
                .with_context(|| format!("Failed to write image: {}", path.display()))?;
            log::debug!("extracted image {} -> {}", index + 1, path.display());
        }
        if !quiet {
            eprintln!(
                "OK: {} images extracted -> {}",
                container.images.len(),
                dir.display()
            );
        }
    }
    Ok(())
}

fn cmd_info(file: PathBuf, json: bool) -> Result<(), CliError> {
    validate_input_file(&file)?;
    let bytes = fs::read(&file)
        .with_context(|| format!("Failed to read input file: {}", file.display()))?;
    let info = inspect(&bytes)
        .with_context(|| format!("Failed to inspect container: {}", file.display()))?;

    if json {
        let text = serde_json::to_string(&info).context("JSON serialization failed")?;
        println!("{}", text);
        return Ok(());
    }

    println!("version: {}", info.version);
    println!("images: {}", info.image_count);
    println!("metadata: {} bytes", info.metadata_length);
    for (index, entry) in info.entries.iter().enumerate() {
        println!(
            "  #{}: {} bytes at offset {}",
            index + 1,
            entry.length,
            entry.offset
        );
    }
    if info.trailing_bytes > 0 {
        println!("trailing: {} bytes", info.trailing_bytes);
    }
    Ok(())
}

fn parse_metadata(raw: Option<&str>) -> Result<Value, CliError> {
    match raw {
        None => Ok(empty_metadata()),
        Some(text) => serde_json::from_str(text).map_err(|err| {
            CliError::new(
                format!("invalid --metadata JSON: {}", err),
                Some("pass a JSON value, e.g. --metadata '{\"key\": \"value\"}'".to_string()),
            )
        }),
    }
}

fn serialize_json(value: &Value, pretty: bool) -> Result<String, CliError> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.context("JSON serialization failed").map_err(Into::into)
}

fn open_image(path: &Path) -> Result<DynamicImage, CliError> {
    if !path.is_file() {
        return Err(CliError::new(
            format!("image file not found: {}", path.display()),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    image::open(path).map_err(|err| {
        CliError::new(
            format!("failed to open image {}: {}", path.display(), err),
            Some("supported input formats: PNG, JPEG, GIF, BMP, TIFF, WebP".to_string()),
        )
    })
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass the path of an .aigi container".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass the path of an .aigi container".to_string()),
        ));
    }
    Ok(())
}

fn ensure_output_differs(output: &Path, inputs: &[PathBuf]) -> Result<(), CliError> {
    let Ok(output_abs) = fs::canonicalize(output) else {
        return Ok(());
    };
    for input in inputs {
        if fs::canonicalize(input).is_ok_and(|input_abs| input_abs == output_abs) {
            return Err(CliError::new(
                format!("output path must differ from inputs: {}", output.display()),
                Some("choose a different output path".to_string()),
            ));
        }
    }
    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    Ok(())
}

fn resolve_image_paths(pattern: &str) -> Result<Vec<PathBuf>, CliError> {
    if !is_glob_pattern(pattern) {
        return Ok(vec![PathBuf::from(pattern)]);
    }

    let paths = glob(pattern).map_err(|err| {
        CliError::new(
            format!("invalid image pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    let mut matches = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid image pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    Ok(matches)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
