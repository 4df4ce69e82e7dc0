//! Mock speech engines.

use std::sync::{Arc, Mutex, PoisonError};

use atom_core::speech::{SpeechRecognizer, SpeechSynthesizer, SynthesisVariant};
use atom_core::{Error, Result};

/// Mock speech-to-text engine returning a fixed transcript.
#[derive(Clone, Debug)]
pub struct MockRecognizer {
    transcript: String,
    running: Option<bool>,
    failing: bool,
}

impl Default for MockRecognizer {
    fn default() -> Self {
        Self::new("hello atom")
    }
}

impl MockRecognizer {
    /// Creates a recognizer that transcribes everything as `transcript`.
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            running: None,
            failing: false,
        }
    }

    /// Sets the running indicator the engine reports.
    pub fn with_running(mut self, running: bool) -> Self {
        self.running = Some(running);
        self
    }

    /// Makes every transcription fail.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }
}

impl SpeechRecognizer for MockRecognizer {
    fn running(&self) -> Option<bool> {
        self.running
    }

    fn listen(&self) -> Result<String> {
        if self.failing {
            return Err(Error::internal_error().with_message("microphone unavailable"));
        }
        Ok(self.transcript.clone())
    }

    fn transcribe(&self, audio: &[u8]) -> Result<String> {
        if self.failing {
            return Err(Error::internal_error().with_message("decoder crashed"));
        }
        if audio.is_empty() {
            return Ok(String::new());
        }
        Ok(self.transcript.clone())
    }

    fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

/// Mock text-to-speech engine recording everything it is asked to speak.
#[derive(Clone, Debug)]
pub struct MockSynthesizer {
    variant: SynthesisVariant,
    running: bool,
    failing: bool,
    spoken: Arc<Mutex<Vec<String>>>,
}

impl Default for MockSynthesizer {
    fn default() -> Self {
        Self::new(SynthesisVariant::Piper)
    }
}

impl MockSynthesizer {
    /// Creates an idle synthesizer of the given backend family.
    pub fn new(variant: SynthesisVariant) -> Self {
        Self {
            variant,
            running: false,
            failing: false,
            spoken: Arc::default(),
        }
    }

    /// Sets whether the engine reports itself as running.
    pub fn with_running(mut self, running: bool) -> Self {
        self.running = running;
        self
    }

    /// Makes every enqueue fail.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Texts queued so far, after cleaning.
    pub fn spoken(&self) -> Vec<String> {
        self.spoken
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SpeechSynthesizer for MockSynthesizer {
    fn is_running(&self) -> bool {
        self.running
    }

    fn variant(&self) -> SynthesisVariant {
        self.variant
    }

    fn clean_text(&self, text: &str) -> String {
        text.replace(['*', '#', '`'], "")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn enqueue(&self, text: String) -> Result<()> {
        if self.failing {
            return Err(Error::internal_error().with_message("audio device busy"));
        }
        self.spoken
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesizer_cleans_markup() {
        let tts = MockSynthesizer::default();
        assert_eq!(tts.clean_text("**Hello**   #world"), "Hello world");
    }

    #[test]
    fn test_synthesizer_records_queue() -> Result<()> {
        let tts = MockSynthesizer::default();
        tts.enqueue("one".to_owned())?;
        assert_eq!(tts.spoken(), vec!["one".to_owned()]);
        Ok(())
    }
}
