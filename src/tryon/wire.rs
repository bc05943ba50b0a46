/// Wire types for the generateContent API
///
/// Request and response bodies use the REST API's camelCase JSON. The
/// request for a try-on is always the same shape: the fixed instruction
/// text followed by the person and garment images as inline data.

use serde::{Deserialize, Serialize};

use crate::state::data::EncodedImage;

/// Multimodal model used for the try-on composite
pub const TRY_ON_MODEL: &str = "gemini-2.5-flash-image";

/// Fixed try-on instruction. Not user-configurable: the identity, pose
/// and background of the person must survive the edit, and the garment
/// must be draped and lit to match the source photo.
pub const TRY_ON_INSTRUCTION: &str = "\
You are an expert virtual try-on stylist. The first image is the person, \
the second image is the garment. Generate a photorealistic image of the \
person wearing the garment. Keep the person's face, hair, body shape, skin \
tone, pose, camera angle and background exactly as in the first image. The \
garment must drape naturally over the body and its lighting must match the \
lighting of the person's photo. Output only the generated image.";

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One ordered piece of a request or response: text or inline image data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

/// Image bytes embedded directly in the payload, prefix-free base64
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    // Absent when the model refuses to answer
    #[serde(default)]
    pub content: Option<Content>,
}

/// Error body the API returns alongside non-success statuses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: Option<String>,
}

impl Part {
    fn text(text: &str) -> Self {
        Part {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }

    fn inline_image(image: &EncodedImage) -> Self {
        Part {
            text: None,
            inline_data: Some(InlineData {
                mime_type: image.mime_type.clone(),
                data: image.base64_payload().to_string(),
            }),
        }
    }
}

impl GenerateContentRequest {
    /// Build the one fixed try-on request: instruction, person, garment
    pub fn try_on(person: &EncodedImage, garment: &EncodedImage) -> Self {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::text(TRY_ON_INSTRUCTION),
                    Part::inline_image(person),
                    Part::inline_image(garment),
                ],
            }],
        }
    }
}

impl GenerateContentResponse {
    /// First part of the first candidate that carries inline image data,
    /// in part order. This is the only thing we rely on in the response.
    pub fn first_inline_image(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.inline_data.as_ref().filter(|d| !d.data.is_empty()))
    }
}
