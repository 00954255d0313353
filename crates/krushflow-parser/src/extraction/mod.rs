//! Image metadata extraction (simulated OCR)
//!
//! Decodes a base64 image payload and reports its dimensions, format and
//! colour mode. Only the image header is read; pixel data is never decoded. Text extraction is simulated: the result carries a fixed
//! placeholder describing the image size. Every failure is recovered into an
//! [`Extraction`] with `status: "error"`, so callers never see an error value.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::{ColorType, ImageDecoder, ImageFormat, ImageReader};
use std::io::Cursor;
use thiserror::Error;

use crate::types::{Extraction, ImageMetadata};

/// Reasons an image payload could not be read
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("image data must be a base64 string")]
    NotAString,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("cannot identify image file")]
    UnknownFormat,

    #[error("{0}")]
    Image(#[from] image::ImageError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Extract metadata from a raw base64 string or a `data:` URL
pub fn extract(payload: &str) -> Extraction {
    match read_metadata(payload) {
        Ok(metadata) => Extraction::success(metadata),
        Err(e) => {
            tracing::warn!("Image extraction failed: {}", e);
            Extraction::failure(e.to_string())
        }
    }
}

/// Extract from the raw `data` value of an upload
pub fn extract_value(value: &serde_json::Value) -> Extraction {
    match value.as_str() {
        Some(payload) => extract(payload),
        None => Extraction::failure(ExtractionError::NotAString.to_string()),
    }
}

/// Run [`extract_value`] on the blocking pool
pub async fn extract_blocking(value: serde_json::Value) -> Extraction {
    match tokio::task::spawn_blocking(move || extract_value(&value)).await {
        Ok(extraction) => extraction,
        Err(e) => {
            tracing::error!("Extraction task failed: {}", e);
            Extraction::failure(format!("extraction task failed: {}", e))
        }
    }
}

/// Strip a `data:<mime>;base64,` style prefix, keeping what follows the last comma
pub fn strip_data_url(payload: &str) -> &str {
    match payload.rsplit_once(',') {
        Some((_, data)) => data,
        None => payload,
    }
}

fn read_metadata(payload: &str) -> Result<ImageMetadata, ExtractionError> {
    let encoded: String = strip_data_url(payload)
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = BASE64.decode(encoded.as_bytes())?;

    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let format = reader.format().ok_or(ExtractionError::UnknownFormat)?;
    let decoder = reader.into_decoder()?;
    let (width, height) = decoder.dimensions();

    Ok(ImageMetadata {
        width,
        height,
        format: format_tag(format),
        mode: color_mode(decoder.color_type()),
    })
}

/// Upper-case container name, e.g. `PNG`
fn format_tag(format: ImageFormat) -> String {
    match format {
        ImageFormat::Png => "PNG".to_string(),
        ImageFormat::Jpeg => "JPEG".to_string(),
        ImageFormat::Gif => "GIF".to_string(),
        ImageFormat::Bmp => "BMP".to_string(),
        ImageFormat::WebP => "WEBP".to_string(),
        ImageFormat::Tiff => "TIFF".to_string(),
        ImageFormat::Ico => "ICO".to_string(),
        other => other
            .extensions_str()
            .first()
            .map(|ext| ext.to_uppercase())
            .unwrap_or_else(|| "UNKNOWN".to_string()),
    }
}

/// Mode names as used by common imaging tools (`L`, `RGB`, `I;16`, ...)
fn color_mode(color: ColorType) -> String {
    let mode = match color {
        ColorType::L8 => "L",
        ColorType::La8 => "LA",
        ColorType::Rgb8 => "RGB",
        ColorType::Rgba8 => "RGBA",
        ColorType::L16 => "I;16",
        ColorType::La16 => "LA;16",
        ColorType::Rgb16 => "RGB;16",
        ColorType::Rgba16 => "RGBA;16",
        ColorType::Rgb32F => "RGB;F",
        ColorType::Rgba32F => "RGBA;F",
        other => return format!("{:?}", other).to_uppercase(),
    };
    mode.to_string()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::{Metadata, ParseStatus};
    use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

    /// Encode an image as base64 in the given container format
    pub(crate) fn encode(image: &DynamicImage, format: ImageFormat) -> String {
        let mut buf = Vec::new();
        image.write_to(&mut Cursor::new(&mut buf), format).unwrap();
        BASE64.encode(buf)
    }

    pub(crate) fn png_10x10() -> String {
        encode(&DynamicImage::ImageRgb8(RgbImage::new(10, 10)), ImageFormat::Png)
    }

    #[test]
    fn test_png_metadata() {
        let result = extract(&png_10x10());

        assert_eq!(result.status, ParseStatus::Success);
        assert!(result.error.is_none());
        assert_eq!(
            result.metadata,
            Metadata::Image(ImageMetadata {
                width: 10,
                height: 10,
                format: "PNG".to_string(),
                mode: "RGB".to_string(),
            })
        );
        assert_eq!(result.extracted_text, "[Simulated OCR extraction from 10x10 image]");
    }

    #[test]
    fn test_data_url_prefix() {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(32, 8));
        let url = format!("data:image/png;base64,{}", encode(&image, ImageFormat::Png));

        let result = extract(&url);
        let meta = result.metadata.image().unwrap();
        assert_eq!((meta.width, meta.height), (32, 8));
        assert_eq!(meta.mode, "RGBA");
    }

    #[test]
    fn test_grayscale_and_jpeg() {
        let gray = DynamicImage::ImageLuma8(GrayImage::new(4, 6));
        let result = extract(&encode(&gray, ImageFormat::Png));
        assert_eq!(result.metadata.image().unwrap().mode, "L");

        let photo = DynamicImage::ImageRgb8(RgbImage::new(16, 16));
        let result = extract(&encode(&photo, ImageFormat::Jpeg));
        let meta = result.metadata.image().unwrap();
        assert_eq!(meta.format, "JPEG");
        assert_eq!(meta.mode, "RGB");
    }

    #[test]
    fn test_idempotent() {
        let payload = png_10x10();
        assert_eq!(extract(&payload), extract(&payload));
    }

    #[test]
    fn test_malformed_base64() {
        let result = extract("not base64 at all!!");

        assert_eq!(result.status, ParseStatus::Error);
        assert_eq!(result.metadata, Metadata::Empty {});
        assert_eq!(result.extracted_text, "");
        assert!(result.error.unwrap().starts_with("invalid base64 payload"));
    }

    #[test]
    fn test_non_image_bytes() {
        let result = extract(&BASE64.encode(b"plain text, not an image"));

        assert_eq!(result.status, ParseStatus::Error);
        assert_eq!(result.error.as_deref(), Some("cannot identify image file"));
    }

    #[test]
    fn test_truncated_pixel_data() {
        let mut bytes = BASE64.decode(png_10x10()).unwrap();
        let idat = bytes.windows(4).position(|w| w == b"IDAT").unwrap();
        bytes.truncate(idat + 6);

        let result = extract(&BASE64.encode(bytes));
        assert_eq!(result.status, ParseStatus::Success);
        let meta = result.metadata.image().unwrap();
        assert_eq!((meta.width, meta.height), (10, 10));
        assert_eq!(meta.format, "PNG");
        assert_eq!(meta.mode, "RGB");
    }

    #[test]
    fn test_truncated_header() {
        let mut bytes = BASE64.decode(png_10x10()).unwrap();
        bytes.truncate(20);

        let result = extract(&BASE64.encode(bytes));
        assert_eq!(result.status, ParseStatus::Error);
        assert!(result.metadata.image().is_none());
    }

    #[test]
    fn test_non_string_value() {
        let result = extract_value(&serde_json::Value::Null);
        assert_eq!(result.status, ParseStatus::Error);
        assert_eq!(result.error.as_deref(), Some("image data must be a base64 string"));
    }

    #[test]
    fn test_strip_data_url() {
        assert_eq!(strip_data_url("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(strip_data_url("AAAA"), "AAAA");
        assert_eq!(strip_data_url("a,b,CCCC"), "CCCC");
    }

    #[tokio::test]
    async fn test_extract_blocking() {
        let result = extract_blocking(serde_json::Value::String(png_10x10())).await;
        assert!(result.is_success());
    }
}
