//! Document loading functionality.
//!
//! This module provides functions to load JSON or YAML documents from files or
//! stdin, decoding them into `Value` trees that paths can be resolved against.
//! Gzip-compressed input is decompressed transparently.

use crate::document::parser::{parse_json, parse_yaml};
use crate::document::value::Value;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How input text is decoded.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Pick by file extension, then try JSON, YAML and finally plain text.
    #[default]
    Auto,
    Json,
    Yaml,
    /// Keep the whole input as a single string value.
    Text,
}

/// Loads and decodes a document from the filesystem.
///
/// # Arguments
///
/// * `path` - The path to the file to load; a `.gz` suffix means gzip
/// * `format` - How to decode the content
///
/// # Examples
///
/// ```no_run
/// use pathquill::file::loader::{load_file, InputFormat};
///
/// let doc = load_file("response.json", InputFormat::Auto).unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file cannot be read or decompressed
/// - The content does not decode in the requested (non-auto) format
pub fn load_file<P: AsRef<Path>>(path: P, format: InputFormat) -> Result<Value> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))?
    };

    let format = match format {
        InputFormat::Auto => format_from_path(path_ref),
        explicit => explicit,
    };
    decode_content(&content, format)
}

/// Loads and decodes a document from standard input.
///
/// Gzip input is recognised by its magic bytes.
///
/// # Errors
///
/// Returns an error if stdin cannot be read, is not valid UTF-8 after
/// decompression, or does not decode in the requested format.
pub fn load_from_stdin(format: InputFormat) -> Result<Value> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    let content = decode_bytes(buffer)?;
    decode_content(&content, format)
}

/// Turns raw input bytes into text, gunzipping when the gzip magic is present.
pub fn decode_bytes(buffer: Vec<u8>) -> Result<String> {
    // Check for gzip magic bytes (0x1f 0x8b)
    if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in input")
    }
}

/// Decodes text in the given format.
///
/// `Auto` tries JSON, then YAML, and keeps the text as a string if neither
/// decodes, so it never fails.
pub fn decode_content(content: &str, format: InputFormat) -> Result<Value> {
    match format {
        InputFormat::Json => parse_json(content),
        InputFormat::Yaml => parse_yaml(content),
        InputFormat::Text => Ok(Value::String(content.to_string())),
        InputFormat::Auto => {
            if let Ok(value) = parse_json(content) {
                return Ok(value);
            }
            match parse_yaml(content) {
                Ok(value) => Ok(value),
                Err(err) => {
                    log::debug!("input is neither JSON nor YAML ({:#}), keeping text", err);
                    Ok(Value::String(content.to_string()))
                }
            }
        }
    }
}

/// Determines the format from the filename, ignoring a `.gz` suffix.
///
/// Examples:
/// - `data.json` → Json
/// - `data.yml.gz` → Yaml
/// - `data.txt` → Auto
fn format_from_path<P: AsRef<Path>>(path: P) -> InputFormat {
    let path_str = path.as_ref().to_string_lossy();

    let base = if let Some(stripped) = path_str.strip_suffix(".gz") {
        stripped
    } else {
        &path_str
    };

    if base.ends_with(".json") {
        InputFormat::Json
    } else if base.ends_with(".yaml") || base.ends_with(".yml") {
        InputFormat::Yaml
    } else {
        InputFormat::Auto
    }
}

/// Reads and decompresses a gzipped file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not valid gzip format (corrupted)
/// - The decompressed content is not valid UTF-8
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}
