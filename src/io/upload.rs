use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Error type for reading an image file into an inline reference
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("{path} is too large ({size} bytes); images must be under {limit} bytes")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0} is not a file")]
    NotAFile(PathBuf),
}

/// MIME type guessed from the file extension.
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("avif") => "image/avif",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Encode raw bytes as a `data:` URL.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Read an image file fully and return it as an inline `data:` reference.
///
/// The size check runs against file metadata before any content is read, so
/// an oversized file costs nothing and leaves no trace.
pub fn read_image(path: &Path, max_bytes: u64) -> Result<String, UploadError> {
    let meta = fs::metadata(path).map_err(|e| UploadError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    if !meta.is_file() {
        return Err(UploadError::NotAFile(path.to_path_buf()));
    }
    if meta.len() > max_bytes {
        return Err(UploadError::TooLarge {
            path: path.to_path_buf(),
            size: meta.len(),
            limit: max_bytes,
        });
    }

    let bytes = fs::read(path).map_err(|e| UploadError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "image read");
    Ok(to_data_url(mime_for(path), &bytes))
}
