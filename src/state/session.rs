use super::data::{EncodedImage, GenerationStatus, Outcome, SlotKind};

/// The Session owns all try-on state: both upload slots, the generation
/// status, and the latest outcome. Every mutation flows through its
/// transition methods; the UI layer only reads.
///
/// Each generation attempt carries a token. Completions whose token no
/// longer matches the current one (a reset happened, or a newer attempt
/// started) are discarded instead of applied.
#[derive(Debug, Default)]
pub struct Session {
    model: Option<EncodedImage>,
    garment: Option<EncodedImage>,
    status: GenerationStatus,
    outcome: Option<Outcome>,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Result image data URL, if the last attempt succeeded
    pub fn result_image(&self) -> Option<&str> {
        match &self.outcome {
            Some(Outcome::Image(url)) => Some(url),
            _ => None,
        }
    }

    /// Visible error message, if the last attempt failed
    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Some(Outcome::Failure(message)) => Some(message),
            _ => None,
        }
    }

    pub fn slot(&self, kind: SlotKind) -> Option<&EncodedImage> {
        match kind {
            SlotKind::Model => self.model.as_ref(),
            SlotKind::Garment => self.garment.as_ref(),
        }
    }

    /// Place a freshly encoded image into a slot, replacing any previous one
    pub fn set_slot(&mut self, kind: SlotKind, image: EncodedImage) {
        match kind {
            SlotKind::Model => self.model = Some(image),
            SlotKind::Garment => self.garment = Some(image),
        }
    }

    /// Empty a slot so the same file can be re-selected later
    pub fn clear_slot(&mut self, kind: SlotKind) {
        match kind {
            SlotKind::Model => self.model = None,
            SlotKind::Garment => self.garment = None,
        }
    }

    /// The first slot without an image, used as the target for window drops
    pub fn first_empty_slot(&self) -> Option<SlotKind> {
        if self.model.is_none() {
            Some(SlotKind::Model)
        } else if self.garment.is_none() {
            Some(SlotKind::Garment)
        } else {
            None
        }
    }

    /// Whether a generation can be triggered right now
    pub fn ready(&self) -> bool {
        self.model.is_some()
            && self.garment.is_some()
            && self.status != GenerationStatus::Loading
    }

    /// Enter `Loading` and hand back the token plus both images for the
    /// remote call. Returns `None` (a no-op) unless both slots are
    /// populated and no attempt is already in flight.
    ///
    /// Any prior outcome is cleared synchronously, before the call is
    /// issued, so at most one outcome is ever visible.
    pub fn begin_generation(&mut self) -> Option<(u64, EncodedImage, EncodedImage)> {
        if !self.ready() {
            return None;
        }

        // Both checked by ready() above
        let model = self.model.clone()?;
        let garment = self.garment.clone()?;

        self.outcome = None;
        self.status = GenerationStatus::Loading;
        self.generation += 1;

        Some((self.generation, model, garment))
    }

    /// Apply the result of a finished remote call. The completion is
    /// dropped when its token is stale or no attempt is in flight;
    /// returns whether it was applied.
    pub fn complete(&mut self, token: u64, result: Result<String, String>) -> bool {
        if token != self.generation || self.status != GenerationStatus::Loading {
            return false;
        }

        match result {
            Ok(image_url) => {
                self.status = GenerationStatus::Success;
                self.outcome = Some(Outcome::Image(image_url));
            }
            Err(message) => {
                self.status = GenerationStatus::Error;
                self.outcome = Some(Outcome::Failure(message));
            }
        }

        true
    }

    /// Return to a blank `Idle` session, unconditionally. An outstanding
    /// call is not cancelled, but the token bump guarantees its eventual
    /// completion is discarded.
    pub fn reset(&mut self) {
        self.model = None;
        self.garment = None;
        self.outcome = None;
        self.status = GenerationStatus::Idle;
        self.generation += 1;
    }
}
