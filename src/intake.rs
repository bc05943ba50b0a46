/// Image intake
///
/// This module turns a user-selected file into an `EncodedImage`: it
/// validates that the file is an image, reads the full bytes, and encodes
/// them as a data URL usable for both preview and API transmission.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::state::data::EncodedImage;

/// Why a selected file could not become an `EncodedImage`
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IntakeError {
    /// The selected file is not an image; nothing is mutated
    #[error("{0} is not an image file. Please select a PNG, JPEG, GIF or WebP image.")]
    UnsupportedFile(String),
    /// The file vanished or could not be read between pick and read
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },
}

/// Load a user-selected file and encode it for preview and transmission
///
/// The read is asynchronous and must finish before the image is usable;
/// no partial result is ever exposed. The MIME type comes from the file
/// extension, with a content sniff as fallback for unlabeled files.
pub async fn load_image(path: impl AsRef<Path>) -> Result<EncodedImage, IntakeError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let bytes = tokio::fs::read(path).await.map_err(|e| IntakeError::Read {
        path: display.clone(),
        message: e.to_string(),
    })?;

    let mime_type = mime_for_path(path)
        .or_else(|| sniff_mime(&bytes))
        .ok_or_else(|| IntakeError::UnsupportedFile(display.clone()))?;

    println!("🖼️  Encoded {} ({} bytes, {})", display, bytes.len(), mime_type);

    let data_url = data_url(mime_type, &bytes);
    Ok(EncodedImage {
        bytes,
        data_url,
        mime_type: mime_type.to_string(),
    })
}

/// Encode raw bytes as a `data:<mime>;base64,` URL
pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// MIME type declared by the file extension, for known image extensions
fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        _ => None,
    }
}

/// Identify an image by its magic bytes when the extension says nothing
fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|f| f.to_mime_type())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use std::path::PathBuf;

    fn png_bytes(r: u8, g: u8, b: u8) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(10, 10, image::Rgb([r, g, b]));
        let mut buf = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("fit-studio-test-{}", name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_mime_for_known_extensions() {
        assert_eq!(mime_for_path(Path::new("a.png")), Some("image/png"));
        assert_eq!(mime_for_path(Path::new("b.JPG")), Some("image/jpeg"));
        assert_eq!(mime_for_path(Path::new("c.webp")), Some("image/webp"));
        assert_eq!(mime_for_path(Path::new("d.txt")), None);
        assert_eq!(mime_for_path(Path::new("no_extension")), None);
    }

    #[test]
    fn test_data_url_round_trips() {
        let bytes = png_bytes(255, 0, 0);
        let url = data_url("image/png", &bytes);

        assert!(url.starts_with("data:image/png;base64,"));

        let payload = url.split_once(',').unwrap().1;
        let decoded = STANDARD.decode(payload).unwrap();
        assert_eq!(decoded, bytes);
    }

    #[tokio::test]
    async fn test_load_image_encodes_png() {
        let bytes = png_bytes(0, 0, 255);
        let path = temp_file("blue.png", &bytes);

        let image = load_image(&path).await.unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert!(image.data_url.starts_with("data:image/png;base64,"));
        assert_eq!(STANDARD.decode(image.base64_payload()).unwrap(), image.bytes);
        assert_eq!(image.bytes, bytes);

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_load_image_sniffs_missing_extension() {
        let bytes = png_bytes(0, 255, 0);
        let path = temp_file("green-no-ext", &bytes);

        let image = load_image(&path).await.unwrap();
        assert_eq!(image.mime_type, "image/png");

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_load_image_rejects_non_image() {
        let path = temp_file("notes.txt", b"just some text");

        let result = load_image(&path).await;
        assert!(matches!(result, Err(IntakeError::UnsupportedFile(_))));

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_load_image_reports_missing_file() {
        let result = load_image("/nonexistent/fit-studio/photo.png").await;
        assert!(matches!(result, Err(IntakeError::Read { .. })));
    }
}
