//! An optional remote speech engine that may stand in for local synthesis.

use crate::{
    error::Result,
    voice::{RuntimeModifiers, VoiceProfile},
};
use async_trait::async_trait;

/// Speaker the remote engine uses when a voice has no mapping.
pub const DEFAULT_SPEAKER: &str = "p225";

/// What the remote engine is asked for.
#[derive(Clone, Debug, PartialEq)]
pub struct BridgeRequest {
    pub text: String,
    /// `en` or `hi`
    pub language_id: String,
    pub speaker_id: String,
    pub speed: f64,
    /// pitch offset divided by 100
    pub pitch: f64,
    /// volume divided by 100
    pub volume: f64,
}

impl BridgeRequest {
    #[must_use]
    pub fn new(text: &str, voice: &VoiceProfile, modifiers: &RuntimeModifiers) -> Self {
        BridgeRequest {
            text: text.trim().to_owned(),
            language_id: voice.language.code().to_owned(),
            speaker_id: speaker_for(&voice.id).to_owned(),
            speed: modifiers.speed,
            pitch: f64::from(modifiers.pitch_offset) / 100.0,
            volume: f64::from(modifiers.volume) / 100.0,
        }
    }
}

/// Remote speaker id for a voice id.
#[must_use]
pub fn speaker_for(voice_id: &str) -> &'static str {
    match voice_id {
        "sarah-en" => "p225",
        "michael-en" => "p226",
        "emma-en" => "p227",
        "priya-hi" => "hindi_female_1",
        "arjun-hi" => "hindi_male_1",
        "raj-hi" => "hindi_male_2",
        _ => DEFAULT_SPEAKER,
    }
}

/// A remote engine returning playable audio bytes.
#[async_trait]
pub trait SpeechBridge: Send + Sync {
    /// Whether requests should be tried at all.
    async fn is_ready(&self) -> bool;

    /// # Errors
    ///
    /// Any failure; the caller falls back to local synthesis.
    async fn synthesize(&self, request: BridgeRequest) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::VoiceCatalog;

    #[test]
    fn maps_speakers() {
        assert_eq!(speaker_for("michael-en"), "p226");
        assert_eq!(speaker_for("raj-hi"), "hindi_male_2");
        assert_eq!(speaker_for("kavya-hi"), DEFAULT_SPEAKER);
    }

    #[test]
    fn request_normalises_modifiers() {
        let catalog = VoiceCatalog::builtin();
        let voice = catalog.get("priya-hi").unwrap();
        let modifiers = RuntimeModifiers {
            pitch_offset: -20,
            speed: 1.5,
            volume: 80,
        };
        let request = BridgeRequest::new("  namaste ", voice, &modifiers);
        assert_eq!(request.text, "namaste");
        assert_eq!(request.language_id, "hi");
        assert_eq!(request.speaker_id, "hindi_female_1");
        assert_eq!(request.pitch, -0.2);
        assert_eq!(request.volume, 0.8);
        assert_eq!(request.speed, 1.5);
    }
}
