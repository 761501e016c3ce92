//! Image blob store
//!
//! Uploaded photos are opaque blobs on disk, addressed by a generated
//! filename; the Photo record keeps the mapping back to metadata. This
//! module validates incoming files (extension, declared content type,
//! size) and persists or removes the blobs. It is the only place that
//! touches the upload directory.

use std::path::Path;

use chrono::Utc;
use rand::distr::Alphanumeric;
use rand::Rng;

use crate::error::ApiError;

/// Per-file upload limit: 10 MB
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Maximum number of files accepted in one upload request
pub const MAX_FILES_PER_UPLOAD: usize = 10;

/// Image formats accepted for upload
const ALLOWED_TYPES: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

/// Checks an incoming file against the upload policy and returns its
/// lowercased extension.
///
/// Both the filename extension and the declared content type (when the
/// browser sent one) must name an allowed image format.
pub fn validate(
    original_name: &str,
    content_type: Option<&str>,
    size: usize,
) -> Result<String, ApiError> {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if !ALLOWED_TYPES.contains(&extension.as_str()) {
        return Err(ApiError::upload_rejected(format!(
            "only image files are allowed (jpeg, jpg, png, gif, webp), got '{original_name}'"
        )));
    }

    if let Some(content_type) = content_type {
        if !ALLOWED_TYPES.iter().any(|t| content_type.contains(t)) {
            return Err(ApiError::upload_rejected(format!(
                "unsupported content type '{content_type}'"
            )));
        }
    }

    if size > MAX_FILE_SIZE {
        return Err(ApiError::upload_rejected(format!(
            "'{original_name}' exceeds the {} MB per-file limit",
            MAX_FILE_SIZE / (1024 * 1024)
        )));
    }

    Ok(extension)
}

/// Generates a unique blob filename: `{unix_millis}-{random}.{ext}`.
///
/// The random suffix disambiguates files landing in the same millisecond.
pub fn unique_filename(extension: &str) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    format!("{}-{}.{}", Utc::now().timestamp_millis(), suffix, extension)
}

/// Validates a file and writes it into the upload directory.
/// Returns the generated blob filename.
pub async fn save(
    upload_dir: &Path,
    original_name: &str,
    content_type: Option<&str>,
    data: &[u8],
) -> Result<String, ApiError> {
    let extension = validate(original_name, content_type, data.len())?;
    let filename = unique_filename(&extension);
    tokio::fs::write(upload_dir.join(&filename), data).await?;
    Ok(filename)
}

/// Removes a stored blob. A blob that is already gone is not an error;
/// the metadata delete still proceeds.
pub async fn remove(upload_dir: &Path, filename: &str) -> Result<(), ApiError> {
    match tokio::fs::remove_file(upload_dir.join(filename)).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ApiError::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_extensions() {
        for name in ["a.jpg", "b.JPEG", "c.png", "d.gif", "e.webp"] {
            assert!(validate(name, None, 1024).is_ok(), "{name} should pass");
        }
    }

    #[test]
    fn rejects_disallowed_extension() {
        assert!(validate("notes.txt", None, 10).is_err());
        assert!(validate("archive.zip", Some("application/zip"), 10).is_err());
        assert!(validate("no_extension", None, 10).is_err());
    }

    #[test]
    fn rejects_mismatched_content_type() {
        assert!(validate("photo.png", Some("text/html"), 10).is_err());
        assert!(validate("photo.png", Some("image/png"), 10).is_ok());
    }

    #[test]
    fn rejects_oversized_file() {
        assert!(validate("big.jpg", None, MAX_FILE_SIZE + 1).is_err());
        assert!(validate("fits.jpg", None, MAX_FILE_SIZE).is_ok());
    }

    #[test]
    fn filenames_are_unique() {
        let a = unique_filename("png");
        let b = unique_filename("png");
        assert_ne!(a, b);
        assert!(a.ends_with(".png"));
    }
}
