/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the intake/network layers and the UI layer.

/// A user-selected image, fully read and encoded for preview and transmission
///
/// The same data URL serves both the on-screen preview and the API payload;
/// the API path strips the `data:<mime>;base64,` prefix separately.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    /// Raw bytes of the original file
    pub bytes: Vec<u8>,
    /// `data:<mime>;base64,<payload>` encoding of `bytes`
    pub data_url: String,
    /// MIME type of the original file (e.g., "image/jpeg")
    pub mime_type: String,
}

impl EncodedImage {
    /// The base64 payload with the data-URL prefix stripped,
    /// as the generative API expects it
    pub fn base64_payload(&self) -> &str {
        self.data_url
            .split_once(',')
            .map(|(_, payload)| payload)
            .unwrap_or("")
    }
}

/// Which upload slot an image belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// The person wearing the result
    Model,
    /// The clothing to try on
    Garment,
}

impl SlotKind {
    /// Human-readable slot label
    pub fn label(&self) -> &'static str {
        match self {
            SlotKind::Model => "The Model",
            SlotKind::Garment => "The Garment",
        }
    }
}

/// Lifecycle of the current generation attempt; exactly one holds at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// What the last finished generation produced: a result image or an
/// error message, never both
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Result image as a self-contained data URL
    Image(String),
    /// User-visible failure message
    Failure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_strips_prefix() {
        let img = EncodedImage {
            bytes: vec![1, 2, 3],
            data_url: "data:image/png;base64,AQID".to_string(),
            mime_type: "image/png".to_string(),
        };
        assert_eq!(img.base64_payload(), "AQID");
    }

    #[test]
    fn test_payload_of_malformed_url_is_empty() {
        let img = EncodedImage {
            bytes: Vec::new(),
            data_url: "not-a-data-url".to_string(),
            mime_type: "image/png".to_string(),
        };
        assert_eq!(img.base64_payload(), "");
    }
}
