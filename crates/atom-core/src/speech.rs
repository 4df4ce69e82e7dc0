//! Speech recognition and synthesis capabilities.
//!
//! Both engines are blocking and are driven from a worker pool by the server.
//! Capabilities that vary between engines are explicit methods here rather
//! than something the caller has to detect.

use crate::{Result, SynthesisMode};

/// Speech-to-text engine.
pub trait SpeechRecognizer: Send + Sync {
    /// Running indicator, for engines that have one.
    ///
    /// Engines without a running indicator return `None` and are considered
    /// available as long as they exist.
    fn running(&self) -> Option<bool> {
        None
    }

    /// Records from the microphone until the speaker stops, then transcribes.
    fn listen(&self) -> Result<String>;

    /// Transcribes an encoded audio clip.
    fn transcribe(&self, audio: &[u8]) -> Result<String>;

    /// Stops the engine and releases its audio devices.
    fn shutdown(&self) -> Result<()>;
}

/// Synthesis backend family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SynthesisVariant {
    /// Cloud voice with a named voice profile.
    EdgeTts,
    /// Local Piper voice model.
    Piper,
}

impl From<SynthesisVariant> for SynthesisMode {
    fn from(variant: SynthesisVariant) -> Self {
        match variant {
            SynthesisVariant::EdgeTts => Self::EdgeTts,
            SynthesisVariant::Piper => Self::Piper,
        }
    }
}

/// Text-to-speech engine.
pub trait SpeechSynthesizer: Send + Sync {
    /// Returns `true` while the engine is actively processing speech.
    fn is_running(&self) -> bool;

    /// Declares which backend family this engine belongs to.
    fn variant(&self) -> SynthesisVariant;

    /// Normalizes text for speaking (markup, symbols, whitespace).
    fn clean_text(&self, text: &str) -> String;

    /// Pushes cleaned text onto the speech queue without waiting for playback.
    fn enqueue(&self, text: String) -> Result<()>;
}
