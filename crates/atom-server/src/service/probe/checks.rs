//! Probe implementations for each collaborator.

use std::sync::Arc;

use atom_core::embedding::EmbeddingService;
use atom_core::engine::CoreEngine;
use atom_core::memory::MemoryService;
use atom_core::robotics::RoboticsClient;
use atom_core::speech::SpeechRecognizer;

use super::{Probe, ProbeFailure, ProbeOutcome};

/// Up once the generation engine has set its readiness marker.
#[derive(Clone)]
pub struct EngineProbe {
    engine: Option<Arc<dyn CoreEngine>>,
}

impl EngineProbe {
    pub fn new(engine: Option<Arc<dyn CoreEngine>>) -> Self {
        Self { engine }
    }
}

#[async_trait::async_trait]
impl Probe for EngineProbe {
    async fn check(&self) -> ProbeOutcome {
        let engine = self.engine.as_ref().ok_or(ProbeFailure::Missing)?;
        if engine.is_ready() {
            Ok(())
        } else {
            Err(ProbeFailure::NotReady)
        }
    }
}

/// Up once the judge model has been loaded.
#[derive(Clone)]
pub struct JudgeProbe {
    engine: Option<Arc<dyn CoreEngine>>,
}

impl JudgeProbe {
    pub fn new(engine: Option<Arc<dyn CoreEngine>>) -> Self {
        Self { engine }
    }
}

#[async_trait::async_trait]
impl Probe for JudgeProbe {
    async fn check(&self) -> ProbeOutcome {
        let engine = self.engine.as_ref().ok_or(ProbeFailure::Missing)?;
        if engine.judge_ready() {
            Ok(())
        } else {
            Err(ProbeFailure::NotReady)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemoryCheck {
    Heartbeat,
    Listing,
}

/// Up when the vector store answers.
///
/// The boot sequence only needs a liveness call; the composite report asks
/// for the collection listing, which also proves the API is usable.
#[derive(Debug, Clone)]
pub struct MemoryProbe {
    memory: Option<MemoryService>,
    check: MemoryCheck,
}

impl MemoryProbe {
    /// Checks the store with its heartbeat endpoint.
    pub fn heartbeat(memory: Option<MemoryService>) -> Self {
        Self {
            memory,
            check: MemoryCheck::Heartbeat,
        }
    }

    /// Checks the store by listing its collections.
    pub fn listing(memory: Option<MemoryService>) -> Self {
        Self {
            memory,
            check: MemoryCheck::Listing,
        }
    }
}

#[async_trait::async_trait]
impl Probe for MemoryProbe {
    async fn check(&self) -> ProbeOutcome {
        let memory = self.memory.as_ref().ok_or(ProbeFailure::Missing)?;
        match self.check {
            MemoryCheck::Heartbeat => memory.heartbeat().await?,
            MemoryCheck::Listing => {
                memory.list_collections().await?;
            }
        }
        Ok(())
    }
}

/// Up when the embedding server's health endpoint responds.
#[derive(Debug, Clone)]
pub struct EmbeddingProbe {
    embeddings: Option<EmbeddingService>,
    require_healthy: bool,
}

impl EmbeddingProbe {
    /// Any successful response counts.
    pub fn reachable(embeddings: Option<EmbeddingService>) -> Self {
        Self {
            embeddings,
            require_healthy: false,
        }
    }

    /// The server must also report `status: healthy`.
    pub fn healthy(embeddings: Option<EmbeddingService>) -> Self {
        Self {
            embeddings,
            require_healthy: true,
        }
    }
}

#[async_trait::async_trait]
impl Probe for EmbeddingProbe {
    async fn check(&self) -> ProbeOutcome {
        let embeddings = self.embeddings.as_ref().ok_or(ProbeFailure::Missing)?;
        let health = embeddings.health_check().await?;

        if self.require_healthy && !health.is_healthy() {
            let reason = health.message.unwrap_or_else(|| "not healthy".to_owned());
            return Err(ProbeFailure::Unreachable(reason));
        }

        Ok(())
    }
}

/// Up when the arm is enabled and its client was constructed.
#[derive(Clone)]
pub struct RoboticsProbe {
    enabled: bool,
    client: Option<Arc<dyn RoboticsClient>>,
}

impl RoboticsProbe {
    pub fn new(enabled: bool, client: Option<Arc<dyn RoboticsClient>>) -> Self {
        Self { enabled, client }
    }
}

#[async_trait::async_trait]
impl Probe for RoboticsProbe {
    async fn check(&self) -> ProbeOutcome {
        if !self.enabled {
            return Err(ProbeFailure::Disabled);
        }

        match &self.client {
            Some(_) => Ok(()),
            None => Err(ProbeFailure::Missing),
        }
    }
}

/// Up when a speech recognizer exists and is not reporting itself stopped.
#[derive(Clone)]
pub struct RecognizerProbe {
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
}

impl RecognizerProbe {
    pub fn new(recognizer: Option<Arc<dyn SpeechRecognizer>>) -> Self {
        Self { recognizer }
    }
}

#[async_trait::async_trait]
impl Probe for RecognizerProbe {
    async fn check(&self) -> ProbeOutcome {
        let recognizer = self.recognizer.as_ref().ok_or(ProbeFailure::Missing)?;
        match recognizer.running() {
            Some(false) => Err(ProbeFailure::NotReady),
            Some(true) | None => Ok(()),
        }
    }
}
