//! Reference-image file intake and artifact export helpers.
//!
//! Intake mirrors the upload rules of the web UI: image files only, at most
//! 5 MiB, handed to the client as a base64 data URL. Export decodes an
//! artifact's data URL back into raw bytes for saving to disk.
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tokio::fs;

use crate::error::{AppError, AppResult};
use crate::gemini::client::split_data_url;

pub const MAX_REFERENCE_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Declared mime type for a supported image file extension.
pub fn mime_type_for_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Read a reference image from disk and encode it as a data URL.
///
/// Rejects unsupported extensions and files over [`MAX_REFERENCE_IMAGE_BYTES`].
pub async fn load_reference_image(path: &Path) -> AppResult<String> {
    let mime_type = mime_type_for_extension(path).ok_or_else(|| {
        AppError::InvalidInput(format!("'{}' is not a supported image file (png, jpeg, webp)", path.display()))
    })?;

    let metadata = fs::metadata(path).await?;
    if metadata.len() > MAX_REFERENCE_IMAGE_BYTES {
        return Err(AppError::InvalidInput(format!(
            "Image is too large ({} bytes). Maximum is 5 MiB",
            metadata.len()
        )));
    }

    let bytes = fs::read(path).await?;
    Ok(format!("data:{};base64,{}", mime_type, BASE64.encode(bytes)))
}

/// Decode an artifact data URL back into raw image bytes.
pub fn decode_data_url(data_url: &str) -> AppResult<Vec<u8>> {
    let (_mime_type, payload) = split_data_url(data_url);
    Ok(BASE64.decode(payload.as_bytes())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_mime_type_for_extension() {
        assert_eq!(mime_type_for_extension(Path::new("a.PNG")), Some("image/png"));
        assert_eq!(mime_type_for_extension(Path::new("a.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_type_for_extension(Path::new("a.webp")), Some("image/webp"));
        assert_eq!(mime_type_for_extension(Path::new("a.gif")), None);
        assert_eq!(mime_type_for_extension(Path::new("noext")), None);
    }

    #[tokio::test]
    async fn test_load_reference_image_round_trips() {
        let mut file = NamedTempFile::with_suffix(".png").unwrap();
        file.write_all(b"fake png bytes").unwrap();

        let data_url = load_reference_image(file.path()).await.unwrap();
        assert!(data_url.starts_with("data:image/png;base64,"));
        assert_eq!(decode_data_url(&data_url).unwrap(), b"fake png bytes");
    }

    #[tokio::test]
    async fn test_load_reference_image_rejects_unsupported_extension() {
        let file = NamedTempFile::with_suffix(".txt").unwrap();
        let result = load_reference_image(file.path()).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_decode_data_url_without_prefix() {
        let encoded = BASE64.encode(b"raw");
        assert_eq!(decode_data_url(&encoded).unwrap(), b"raw");
    }

    #[test]
    fn test_decode_data_url_rejects_invalid_base64() {
        assert!(decode_data_url("data:image/png;base64,!!!").is_err());
    }
}
