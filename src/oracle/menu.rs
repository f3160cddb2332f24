use std::{collections::BTreeSet, fmt, path::Path};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::json;

use super::{prompts, LlmOracle, MenuTranslationOracle};
use crate::{
    error::{PlannerError, Result},
    types::{DietaryPreference, MenuTranslation},
};

/// Largest menu photo accepted, in bytes.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// A menu photo, held as a `data:` URL ready to embed in a chat message.
#[derive(Clone, PartialEq, Eq)]
pub struct MenuImage {
    mime_type: String,
    data_url: String,
    byte_len: usize,
}

impl MenuImage {
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Result<Self> {
        let mime_type = mime_type.trim().to_ascii_lowercase();
        if !mime_type.starts_with("image/") {
            return Err(PlannerError::invalid(
                "image",
                format!("`{mime_type}` is not an image type"),
            ));
        }
        if bytes.is_empty() {
            return Err(PlannerError::invalid("image", "image is empty"));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(PlannerError::invalid(
                "image",
                format!(
                    "image is {} bytes, the limit is {} bytes",
                    bytes.len(),
                    MAX_IMAGE_BYTES
                ),
            ));
        }

        Ok(Self {
            data_url: format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)),
            mime_type,
            byte_len: bytes.len(),
        })
    }

    /// Accept an existing `data:image/...;base64,...` URL.
    pub fn from_data_url(data_url: &str) -> Result<Self> {
        let (header, encoded) = data_url
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','))
            .ok_or_else(|| PlannerError::invalid("image", "not a data URL"))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| PlannerError::invalid("image", "data URL is not base64 encoded"))?;
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|err| PlannerError::invalid("image", format!("invalid base64: {err}")))?;
        Self::from_bytes(&bytes, mime_type)
    }

    /// Read a photo from disk, typing it by file extension.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mime_type = mime_type_for_path(path).ok_or_else(|| {
            PlannerError::invalid(
                "image",
                format!("unsupported image extension: {}", path.display()),
            )
        })?;
        let bytes = tokio::fs::read(path).await.map_err(|err| {
            PlannerError::invalid("image", format!("cannot read {}: {err}", path.display()))
        })?;
        Self::from_bytes(&bytes, mime_type)
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }
}

impl fmt::Debug for MenuImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuImage")
            .field("mime_type", &self.mime_type)
            .field("byte_len", &self.byte_len)
            .finish()
    }
}

fn mime_type_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

#[async_trait]
impl MenuTranslationOracle for LlmOracle {
    async fn translate_menu(
        &self,
        image: &MenuImage,
        preferences: &BTreeSet<DietaryPreference>,
    ) -> Result<MenuTranslation> {
        let user_content = json!([
            { "type": "text", "text": prompts::MENU_USER_PROMPT },
            { "type": "image_url", "image_url": { "url": image.data_url() } },
        ]);
        self.request_structured::<MenuTranslation>(
            self.vision_model(),
            &prompts::menu_system_prompt(preferences),
            user_content,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_builds_data_url() {
        let image = MenuImage::from_bytes(b"abc", "image/PNG").unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.data_url(), "data:image/png;base64,YWJj");
        assert_eq!(image.byte_len(), 3);
    }

    #[test]
    fn test_rejects_non_image_and_oversized() {
        let err = MenuImage::from_bytes(b"%PDF", "application/pdf").unwrap_err();
        assert!(err.is_validation());

        let big = vec![0u8; MAX_IMAGE_BYTES + 1];
        let err = MenuImage::from_bytes(&big, "image/jpeg").unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput { field: "image", .. }));

        assert!(MenuImage::from_bytes(&[], "image/jpeg").is_err());
    }

    #[test]
    fn test_from_data_url() {
        let image = MenuImage::from_data_url("data:image/jpeg;base64,YWJj").unwrap();
        assert_eq!(image.mime_type(), "image/jpeg");
        assert_eq!(image.byte_len(), 3);

        assert!(MenuImage::from_data_url("https://example.com/menu.jpg").is_err());
        assert!(MenuImage::from_data_url("data:image/jpeg,abc").is_err());
        assert!(MenuImage::from_data_url("data:text/plain;base64,YWJj").is_err());
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("menu-{}.png", std::process::id()));
        std::fs::write(&path, b"png bytes").unwrap();

        let image = tokio_test::block_on(MenuImage::from_file(&path)).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.byte_len(), 9);

        std::fs::remove_file(&path).unwrap();
        let err = tokio_test::block_on(MenuImage::from_file(&path)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_mime_type_for_path() {
        assert_eq!(mime_type_for_path(Path::new("menu.JPG")), Some("image/jpeg"));
        assert_eq!(mime_type_for_path(Path::new("menu.webp")), Some("image/webp"));
        assert_eq!(mime_type_for_path(Path::new("menu.txt")), None);
        assert_eq!(mime_type_for_path(Path::new("menu")), None);
    }
}
