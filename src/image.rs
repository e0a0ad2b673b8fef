use crate::error::RecipeError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use std::path::{Path, PathBuf};

/// Inline image data ready to be sent to the generation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    /// Base64-encoded image bytes, without any data URL prefix
    pub data: String,
    /// MIME type of the image, e.g. "image/png"
    pub mime_type: String,
}

impl ImagePayload {
    /// Encode raw image bytes
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        ImagePayload {
            data: STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        }
    }

    /// Build a payload from a `data:<mime>;base64,<payload>` URL
    pub fn from_data_url(url: &str) -> Result<Self, RecipeError> {
        let header = url
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','))
            .map(|(header, _)| header)
            .ok_or_else(|| RecipeError::UnsupportedImage("not a data URL".to_string()))?;

        let mime_type = header.strip_suffix(";base64").ok_or_else(|| {
            RecipeError::UnsupportedImage("data URL is not base64-encoded".to_string())
        })?;

        if !mime_type.starts_with("image/") {
            return Err(RecipeError::UnsupportedImage(mime_type.to_string()));
        }

        Ok(ImagePayload {
            data: strip_data_url_prefix(url).to_string(),
            mime_type: mime_type.to_string(),
        })
    }

    /// Decode the payload back into raw bytes
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.data)
    }
}

/// Return only the payload portion of a data URL.
///
/// Input without a `data:...,` prefix is returned unchanged.
pub fn strip_data_url_prefix(encoded: &str) -> &str {
    if encoded.starts_with("data:") {
        if let Some((_, payload)) = encoded.split_once(',') {
            return payload;
        }
    }
    encoded
}

/// Resolve the image MIME type claimed by a file's extension
pub fn mime_type_for_path(path: &Path) -> Result<&'static str, RecipeError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "avif" => "image/avif",
        _ => return Err(RecipeError::UnsupportedImage(path.display().to_string())),
    };

    Ok(mime)
}

/// Read a file fully and encode it
///
/// # Errors
/// Returns [`RecipeError::ImageRead`] if the file cannot be read
pub async fn encode_file(path: &Path, mime_type: &str) -> Result<ImagePayload, RecipeError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| RecipeError::ImageRead {
            path: path.to_path_buf(),
            source,
        })?;

    debug!("Read {} bytes from {}", bytes.len(), path.display());

    Ok(ImagePayload::from_bytes(&bytes, mime_type))
}

/// An image the user has picked but not yet submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub path: PathBuf,
    pub mime_type: String,
}

impl SelectedImage {
    /// Select an image by path. Only the extension is checked; the file is
    /// not touched until it is encoded.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, RecipeError> {
        let path = path.into();
        let mime_type = mime_type_for_path(&path)?.to_string();
        Ok(SelectedImage { path, mime_type })
    }

    /// Short label shown in place of the image itself
    pub fn preview(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub async fn encode(&self) -> Result<ImagePayload, RecipeError> {
        encode_file(&self.path, &self.mime_type).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bytes_round_trip() {
        let bytes: Vec<u8> = (0..=255u8).chain([0, 0, 255]).collect();
        let payload = ImagePayload::from_bytes(&bytes, "image/png");
        assert_eq!(payload.decode().unwrap(), bytes);
        assert_eq!(payload.mime_type, "image/png");
    }

    #[test]
    fn test_strip_data_url_prefix() {
        assert_eq!(
            strip_data_url_prefix("data:image/jpeg;base64,/9j/4AAQ"),
            "/9j/4AAQ"
        );
        assert_eq!(strip_data_url_prefix("/9j/4AAQ"), "/9j/4AAQ");
    }

    #[test]
    fn test_from_data_url() {
        let payload = ImagePayload::from_data_url("data:image/gif;base64,R0lGODlh").unwrap();
        assert_eq!(payload.mime_type, "image/gif");
        assert_eq!(payload.data, "R0lGODlh");
    }

    #[test]
    fn test_from_data_url_rejects_non_images() {
        assert!(ImagePayload::from_data_url("data:text/plain;base64,aGk=").is_err());
        assert!(ImagePayload::from_data_url("data:image/png,raw").is_err());
        assert!(ImagePayload::from_data_url("R0lGODlh").is_err());
    }

    #[test]
    fn test_mime_type_for_path() {
        assert_eq!(
            mime_type_for_path(Path::new("fridge.JPG")).unwrap(),
            "image/jpeg"
        );
        assert_eq!(
            mime_type_for_path(Path::new("/a/b/pantry.webp")).unwrap(),
            "image/webp"
        );
        assert!(matches!(
            mime_type_for_path(Path::new("notes.txt")),
            Err(RecipeError::UnsupportedImage(_))
        ));
        assert!(mime_type_for_path(Path::new("no_extension")).is_err());
    }

    #[tokio::test]
    async fn test_encode_file_round_trip() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        let bytes = b"\x89PNG\r\n\x1a\nnot really a png";
        file.write_all(bytes).unwrap();

        let selected = SelectedImage::new(file.path()).unwrap();
        let payload = selected.encode().await.unwrap();

        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(payload.decode().unwrap(), bytes.to_vec());
    }

    #[tokio::test]
    async fn test_encode_missing_file() {
        let result = encode_file(Path::new("/definitely/not/here.png"), "image/png").await;
        assert!(matches!(result, Err(RecipeError::ImageRead { .. })));
    }

    #[test]
    fn test_preview_is_file_name() {
        let selected = SelectedImage::new("/home/me/photos/fridge.jpeg").unwrap();
        assert_eq!(selected.preview(), "fridge.jpeg");
        assert_eq!(selected.mime_type, "image/jpeg");
    }
}
