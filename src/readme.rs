//! Decoding of file bodies returned by the contents endpoint.

use crate::error::{GitfolioError, Result};
use crate::types::GitHubContent;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Name of the file read from a profile repository.
pub const README_PATH: &str = "README.md";

/// Decode a base64 payload into UTF-8 text.
///
/// The provider wraps the encoded body at 60 columns, so ASCII whitespace is
/// dropped before decoding.
pub fn decode_content(encoded: &str) -> Result<String> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}

/// Extract the text of a single-file contents response.
pub fn decode_file(file: &GitHubContent) -> Result<String> {
    if let Some(kind) = file.kind.as_deref() {
        if kind != "file" {
            return Err(GitfolioError::ApiError(format!(
                "expected a file, got {}",
                kind
            )));
        }
    }

    match (file.encoding.as_deref(), file.content.as_deref()) {
        (Some("base64") | None, Some(content)) => decode_content(content),
        (Some(other), Some(_)) => Err(GitfolioError::ApiError(format!(
            "unsupported content encoding: {}",
            other
        ))),
        (_, None) => Err(GitfolioError::ApiError("file has no inline content".to_string())),
    }
}
