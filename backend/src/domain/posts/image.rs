//! Inline post images.
//!
//! Images travel with the post document. They are stored as base64 inside
//! the persisted JSON and rendered to clients as `data:` URIs.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use super::PostValidationError;

/// Largest accepted image payload in bytes.
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// An uploaded image with its MIME type.
///
/// # Examples
/// ```
/// use snapmate::domain::posts::Image;
///
/// let image = Image::new("image/png", vec![1, 2, 3]).expect("valid image");
/// assert_eq!(image.data_uri(), "data:image/png;base64,AQID");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    content_type: String,
    #[serde(with = "base64_bytes")]
    data: Vec<u8>,
}

impl Image {
    /// Validate an upload: the type must be `image/*` and the payload at most
    /// [`MAX_IMAGE_BYTES`].
    pub fn new(content_type: impl Into<String>, data: Vec<u8>) -> Result<Self, PostValidationError> {
        let content_type = content_type.into();
        if !content_type.starts_with("image/") {
            return Err(PostValidationError::UnsupportedImageType { content_type });
        }
        if data.len() > MAX_IMAGE_BYTES {
            return Err(PostValidationError::ImageTooLarge {
                size: data.len(),
                max: MAX_IMAGE_BYTES,
            });
        }
        Ok(Self { content_type, data })
    }

    /// MIME type recorded at upload.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Raw image bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Render as an inline `data:` URI.
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            STANDARD.encode(&self.data)
        )
    }
}

mod base64_bytes {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
