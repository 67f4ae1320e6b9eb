use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Read a document from a file, or from stdin when the path is absent or `-`
///
/// Input must be valid UTF-8; anything else is rejected here so the
/// transform only ever sees decoded text.
pub fn read_document(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => read_document_file(path),
        _ => read_document_from(std::io::stdin().lock()),
    }
}

/// Read a document file
pub fn read_document_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    String::from_utf8(bytes).with_context(|| format!("Input file is not valid UTF-8: {:?}", path))
}

/// Read a whole document from any reader
pub fn read_document_from<R: Read>(mut reader: R) -> Result<String> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .context("Failed to read input")?;
    String::from_utf8(bytes).context("Input is not valid UTF-8")
}
