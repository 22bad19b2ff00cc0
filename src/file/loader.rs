//! Input loading functionality.
//!
//! This module provides functions to load JSON and YAML documents from files
//! or stdin, decoding them into `Document`s that queries run against.
//! Gzip-compressed input is decompressed transparently.

use crate::document::parser::{decode, InputFormat};
use crate::document::tree::Document;
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use log::debug;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Loads and decodes a file from the filesystem.
///
/// When `format` is `None` it is derived from the file name (see
/// [`detect_format`]). Files ending in `.gz` are decompressed first.
///
/// # Examples
///
/// ```no_run
/// use uniquery::file::loader::load_file;
///
/// let doc = load_file("workflow.yml", None).unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist or cannot be read
/// - The file is gzipped but corrupted
/// - The contents cannot be decoded in the chosen format
pub fn load_file<P: AsRef<Path>>(path: P, format: Option<InputFormat>) -> Result<Document> {
    let path_ref = path.as_ref();
    let format = format.unwrap_or_else(|| detect_format(path_ref));
    debug!("Loading {} as {:?}", path_ref.display(), format);

    let content = if is_gzipped(path_ref) {
        let file = fs::File::open(path_ref)
            .with_context(|| format!("Failed to open file {}", path_ref.display()))?;
        decompress(file)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))?
    };

    decode(&content, format).with_context(|| format!("Failed to parse {}", path_ref.display()))
}

/// Loads a JSON file.
pub fn load_json_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    load_file(path, Some(InputFormat::Json))
}

/// Loads a YAML file.
pub fn load_yaml_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    load_file(path, Some(InputFormat::Yaml))
}

/// Loads and decodes a document from standard input.
///
/// # Errors
///
/// This function will return an error if reading from stdin fails or the
/// input cannot be decoded.
pub fn load_from_stdin(format: InputFormat) -> Result<Document> {
    load_from_reader(std::io::stdin().lock(), format).context("Failed to load document from stdin")
}

/// Loads and decodes a document from any reader.
///
/// Input starting with the gzip magic bytes (0x1f 0x8b) is decompressed.
pub fn load_from_reader<R: Read>(mut reader: R, format: InputFormat) -> Result<Document> {
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .context("Failed to read input")?;

    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress(&buffer[..])?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in input")?
    };

    decode(&content, format).context("Failed to parse input")
}

/// Determines the input format from a file name.
///
/// A trailing `.gz` is ignored. Examples:
/// - `data.json`, `data.json.gz` → JSON
/// - `ci.yml`, `ci.yaml` → YAML
/// - `events.jsonl`, `events.ndjson.gz` → JSONL
/// - anything else → auto-detect
pub fn detect_format<P: AsRef<Path>>(path: P) -> InputFormat {
    let path_str = path.as_ref().to_string_lossy().to_lowercase();
    let base = path_str.strip_suffix(".gz").unwrap_or(&path_str);

    if base.ends_with(".json") {
        InputFormat::Json
    } else if base.ends_with(".yaml") || base.ends_with(".yml") {
        InputFormat::Yaml
    } else if base.ends_with(".jsonl") || base.ends_with(".ndjson") {
        InputFormat::Jsonl
    } else {
        InputFormat::Auto
    }
}

fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

/// Decompresses a gzip stream into a UTF-8 string.
fn decompress<R: Read>(reader: R) -> Result<String> {
    let mut decoder = GzDecoder::new(reader);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzip input - data may be corrupted")?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::Value;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(content: &str) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(content.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format("data.json"), InputFormat::Json);
        assert_eq!(detect_format("path/to/data.JSON.gz"), InputFormat::Json);
        assert_eq!(detect_format("ci.yml"), InputFormat::Yaml);
        assert_eq!(detect_format("ci.yaml.gz"), InputFormat::Yaml);
        assert_eq!(detect_format("events.jsonl"), InputFormat::Jsonl);
        assert_eq!(detect_format("events.ndjson.gz"), InputFormat::Jsonl);
        assert_eq!(detect_format("README"), InputFormat::Auto);
    }

    #[test]
    fn test_is_gzipped() {
        assert!(is_gzipped(Path::new("data.json.gz")));
        assert!(!is_gzipped(Path::new("data.json")));
    }

    #[test]
    fn test_load_from_reader_plain() {
        let doc = load_from_reader(&b"[1, 2]"[..], InputFormat::Json).unwrap();
        assert!(matches!(doc.get(doc.root()), Value::Sequence(items) if items.len() == 2));
    }

    #[test]
    fn test_load_from_reader_gzip_magic() {
        let bytes = gzip("name: uniquery\n");
        let doc = load_from_reader(&bytes[..], InputFormat::Yaml).unwrap();
        assert!(matches!(doc.get(doc.root()), Value::GenericMapping(_)));
    }

    #[test]
    fn test_load_from_reader_invalid_utf8() {
        let result = load_from_reader(&[0xffu8, 0xfe, 0x00][..], InputFormat::Json);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_gzipped_file() {
        let dir = tempfile::tempdir().unwrap();
        let gz_path = dir.path().join("data.json.gz");
        fs::write(&gz_path, gzip(r#"{"name": "Alice", "age": 30}"#)).unwrap();

        let doc = load_file(&gz_path, None).unwrap();
        match doc.get(doc.root()) {
            Value::Mapping(entries) => assert_eq!(entries.len(), 2),
            other => panic!("expected mapping, got {:?}", other),
        }
    }

    #[test]
    fn test_load_corrupted_gzip_file() {
        let dir = tempfile::tempdir().unwrap();
        let gz_path = dir.path().join("data.json.gz");
        fs::write(&gz_path, b"not gzip data").unwrap();

        let err_msg = format!("{:#}", load_file(&gz_path, None).unwrap_err());
        assert!(err_msg.contains("decompress") || err_msg.contains("corrupted"));
    }
}
