/// Stateless client for the generative try-on call
///
/// One remote call per invocation, no retries, no caching. The API
/// credential is injected at construction so tests can provide a fake
/// one (or none) deterministically.

use std::time::Duration;

use thiserror::Error;

use crate::state::data::EncodedImage;
use crate::tryon::wire::{
    ApiErrorBody, GenerateContentRequest, GenerateContentResponse, TRY_ON_MODEL,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Environment variable holding the API credential
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

// The transport default is unbounded; cap a stuck call explicitly.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Why a try-on attempt produced no image
#[derive(Debug, Clone, Error)]
pub enum TryOnError {
    /// Configuration error: no credential was provided at construction
    #[error("No API key is configured. Set GEMINI_API_KEY before launching Fit Studio.")]
    MissingCredential,
    /// The call succeeded but the response carried no usable image
    #[error("No image was generated. The model may have refused the request or failed to interpret the images.")]
    NoImageReturned,
    /// Transport or API-level failure, remote message preserved when available
    #[error("Try-on request failed: {0}")]
    RemoteCallFailed(String),
}

/// Client for the generateContent endpoint
#[derive(Debug, Clone)]
pub struct TryOnClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl TryOnClient {
    /// Create a client with an explicitly injected credential
    pub fn new(api_key: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        TryOnClient {
            http,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a client from the process environment
    pub fn from_env() -> Self {
        let key = std::env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty());
        Self::new(key)
    }

    /// Point the client at a different endpoint (tests, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whether a credential was configured
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Perform one try-on call: fixed instruction plus the person and
    /// garment images, returning the first inline image of the first
    /// candidate as a `data:image/png;base64,` URL.
    pub async fn generate(
        &self,
        person: &EncodedImage,
        garment: &EncodedImage,
    ) -> Result<String, TryOnError> {
        let api_key = self.api_key.as_deref().ok_or(TryOnError::MissingCredential)?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, TRY_ON_MODEL
        );
        let request = GenerateContentRequest::try_on(person, garment);

        println!("👗 Requesting try-on composite from {}", TRY_ON_MODEL);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TryOnError::RemoteCallFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TryOnError::RemoteCallFailed(remote_message(status, &body)));
        }

        let response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TryOnError::RemoteCallFailed(e.to_string()))?;

        match response.first_inline_image() {
            Some(inline) => Ok(format!("data:image/png;base64,{}", inline.data)),
            None => Err(TryOnError::NoImageReturned),
        }
    }
}

/// Prefer the API's own error message over a bare status line
fn remote_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| format!("HTTP {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash-image:generateContent";

    fn png_image(r: u8, g: u8, b: u8) -> EncodedImage {
        let img = image::RgbImage::from_pixel(10, 10, image::Rgb([r, g, b]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let data_url = crate::intake::data_url("image/png", &bytes);
        EncodedImage {
            bytes,
            data_url,
            mime_type: "image/png".to_string(),
        }
    }

    fn test_client(server: &mockito::ServerGuard) -> TryOnClient {
        TryOnClient::new(Some("test-key".to_string())).with_base_url(server.url())
    }

    #[tokio::test]
    async fn test_generate_returns_first_inline_image() {
        let mut server = mockito::Server::new_async().await;

        // Red person, blue garment in; the mocked model answers green
        let person = png_image(255, 0, 0);
        let garment = png_image(0, 0, 255);
        let green = png_image(0, 255, 0);
        let green_payload = STANDARD.encode(&green.bytes);

        let body = format!(
            r#"{{"candidates": [{{"content": {{"parts": [
                {{"text": "done"}},
                {{"inlineData": {{"mimeType": "image/png", "data": "{}"}}}}
            ]}}}}]}}"#,
            green_payload
        );

        let mock = server
            .mock("POST", GENERATE_PATH)
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let result = test_client(&server).generate(&person, &garment).await.unwrap();

        assert_eq!(result, format!("data:image/png;base64,{}", green_payload));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_without_inline_image_fails() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", GENERATE_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates": [{"content": {"parts": [{"text": "refused"}]}}]}"#)
            .create_async()
            .await;

        let person = png_image(255, 0, 0);
        let garment = png_image(0, 0, 255);
        let result = test_client(&server).generate(&person, &garment).await;

        assert!(matches!(result, Err(TryOnError::NoImageReturned)));
    }

    #[tokio::test]
    async fn test_generate_preserves_remote_error_message() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", GENERATE_PATH)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"code": 400, "message": "API key not valid"}}"#)
            .create_async()
            .await;

        let person = png_image(255, 0, 0);
        let garment = png_image(0, 0, 255);
        let result = test_client(&server).generate(&person, &garment).await;

        match result {
            Err(TryOnError::RemoteCallFailed(message)) => {
                assert!(message.contains("API key not valid"));
            }
            other => panic!("expected RemoteCallFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_without_credential_sends_nothing() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", GENERATE_PATH)
            .expect(0)
            .create_async()
            .await;

        let client = TryOnClient::new(None).with_base_url(server.url());
        let person = png_image(255, 0, 0);
        let garment = png_image(0, 0, 255);

        let result = client.generate(&person, &garment).await;

        assert!(matches!(result, Err(TryOnError::MissingCredential)));
        mock.assert_async().await;
    }
}
