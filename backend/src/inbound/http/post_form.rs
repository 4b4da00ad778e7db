//! Multipart form parsing for post creation and edits.
//!
//! Text parts: `content`, `visibility` and, on create, `group_id`. File
//! parts named `images` (or `images[]`) must be `image/*` and at most
//! [`MAX_IMAGE_BYTES`]. Empty text parts count as absent, so an edit form
//! only changes what it actually carries.

use actix_multipart::{Field, Multipart};
use futures_util::{StreamExt as _, TryStreamExt as _};
use tracing::debug;

use crate::domain::ports::CreatePostRequest;
use crate::domain::posts::{Image, MAX_IMAGE_BYTES, PostPatch, Visibility};
use crate::domain::{Error, GroupId};
use crate::inbound::http::validation::{FieldName, parse_id, parse_value};

/// Upper bound for a single text part.
const MAX_TEXT_BYTES: usize = 64 * 1024;

const VISIBILITY: FieldName = FieldName::new("visibility");
const GROUP_ID: FieldName = FieldName::new("group_id");

/// Raw parts of a post form.
#[derive(Debug, Default)]
pub(crate) struct PostForm {
    content: Option<String>,
    visibility: Option<String>,
    group_id: Option<String>,
    images: Vec<Image>,
}

impl PostForm {
    /// Drain `payload`, validating every uploaded image as it arrives.
    pub(crate) async fn read(mut payload: Multipart) -> Result<Self, Error> {
        let mut form = Self::default();
        while let Some(field) = payload.try_next().await.map_err(malformed)? {
            let name = field.name().unwrap_or_default().to_owned();
            match name.as_str() {
                "images" | "images[]" => form.images.push(read_image(field).await?),
                "content" => form.content = read_text(field).await?,
                "visibility" => form.visibility = read_text(field).await?,
                "group_id" => form.group_id = read_text(field).await?,
                other => {
                    debug!(field = other, "ignoring unknown multipart field");
                    drain(field).await?;
                }
            }
        }
        Ok(form)
    }

    /// Build a creation request. Visibility defaults to `Public`.
    pub(crate) fn into_create_request(self) -> Result<CreatePostRequest, Error> {
        let visibility = self
            .visibility
            .as_deref()
            .map(|raw| parse_value::<Visibility>(raw, VISIBILITY, "Invalid visibility"))
            .transpose()?
            .unwrap_or(Visibility::Public);
        let group = self
            .group_id
            .as_deref()
            .map(|raw| parse_id::<GroupId>(raw, GROUP_ID, "Invalid group ID"))
            .transpose()?;
        Ok(CreatePostRequest {
            content: self.content.unwrap_or_default(),
            images: self.images,
            visibility,
            group,
        })
    }

    /// Build an edit patch holding only the parts the form carried.
    pub(crate) fn into_patch(self) -> Result<PostPatch, Error> {
        let visibility = self
            .visibility
            .as_deref()
            .map(|raw| parse_value::<Visibility>(raw, VISIBILITY, "Invalid visibility"))
            .transpose()?;
        Ok(PostPatch {
            content: self.content,
            images: (!self.images.is_empty()).then_some(self.images),
            visibility,
        })
    }
}

fn malformed(err: actix_multipart::MultipartError) -> Error {
    Error::invalid_request(format!("Malformed multipart body: {err}"))
}

async fn read_bytes(mut field: Field, limit: usize, too_large: &str) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(malformed)?;
        if buf.len() + chunk.len() > limit {
            return Err(Error::invalid_request(too_large));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

async fn read_image(field: Field) -> Result<Image, Error> {
    let content_type = field
        .content_type()
        .map(|mime| mime.essence_str().to_owned())
        .unwrap_or_default();
    if !content_type.starts_with("image/") {
        return Err(Error::invalid_request(
            "Invalid file type, only images are allowed!",
        ));
    }
    let data = read_bytes(field, MAX_IMAGE_BYTES, "File too large").await?;
    Image::new(content_type, data).map_err(|err| Error::invalid_request(err.to_string()))
}

async fn read_text(field: Field) -> Result<Option<String>, Error> {
    let bytes = read_bytes(field, MAX_TEXT_BYTES, "Form field too large").await?;
    let text = String::from_utf8(bytes)
        .map_err(|_| Error::invalid_request("Form fields must be UTF-8"))?;
    Ok((!text.is_empty()).then_some(text))
}

async fn drain(mut field: Field) -> Result<(), Error> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(malformed)?;
    }
    Ok(())
}
