use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

pub const IMAGE_DATA_URI_PREFIX: &str = "data:image";
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("image source is not a base64 data URI")]
    NotDataUri,
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Ảnh biểu đồ đã giải mã, sẵn sàng cho image loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DecodedImage {
    /// File extension matching the MIME type, used to name the image for loaders.
    pub fn extension(&self) -> &str {
        match self.mime.strip_prefix("image/") {
            Some("jpeg") | Some("jpg") => "jpg",
            Some(subtype) if !subtype.is_empty() => subtype,
            _ => "png",
        }
    }
}

/// Values already carrying an image data URI are kept; bare base64 gets a PNG prefix.
pub fn image_source(raw: &str) -> String {
    if raw.starts_with(IMAGE_DATA_URI_PREFIX) {
        raw.to_string()
    } else {
        format!("{PNG_DATA_URI_PREFIX}{raw}")
    }
}

pub fn decode(source: &str) -> Result<DecodedImage, ChartError> {
    let rest = source.strip_prefix("data:").ok_or(ChartError::NotDataUri)?;
    let (header, payload) = rest.split_once(',').ok_or(ChartError::NotDataUri)?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or(ChartError::NotDataUri)?;

    // Python encoders sometimes wrap long payloads.
    let payload: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD.decode(payload)?;

    Ok(DecodedImage {
        mime: mime.to_string(),
        bytes,
    })
}
