use std::sync::Arc;
use std::time::Duration;

use atom_core::{LinkStatus, RunStatus, StoreStatus, SynthesisMode, SynthesisStatus};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Probe, TRACING_TARGET, outcome_status, run_isolated};
use crate::service::speech::{SpeechOutput, SynthesisReport};

/// Composite readiness of every subsystem, assembled fresh per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// Generation engine.
    pub llm_status: RunStatus,
    /// Local embedding server.
    pub embeddings_server: LinkStatus,
    /// Vector store.
    pub chroma_db: StoreStatus,
    /// Judge model.
    pub judge_model: RunStatus,
    /// Speech synthesis backend family.
    pub tts_mode: SynthesisMode,
    /// Speech synthesis state.
    pub tts_status: SynthesisStatus,
    /// Speech recognition.
    pub stt: LinkStatus,
}

/// Runs the composite health probes side by side.
///
/// Probes are held directly rather than looked up by name. Each runs on its
/// own task, so a slow or panicking collaborator only affects its own field.
#[derive(Clone)]
pub struct SystemHealth {
    engine: Arc<dyn Probe>,
    judge: Arc<dyn Probe>,
    memory: Arc<dyn Probe>,
    embeddings: Arc<dyn Probe>,
    recognizer: Arc<dyn Probe>,
    speech_output: SpeechOutput,
    timeout: Duration,
}

impl SystemHealth {
    pub fn new(
        engine: impl Probe,
        judge: impl Probe,
        memory: impl Probe,
        embeddings: impl Probe,
        recognizer: impl Probe,
        speech_output: SpeechOutput,
        timeout: Duration,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            judge: Arc::new(judge),
            memory: Arc::new(memory),
            embeddings: Arc::new(embeddings),
            recognizer: Arc::new(recognizer),
            speech_output,
            timeout,
        }
    }

    async fn status(&self, name: &str, probe: &Arc<dyn Probe>) -> atom_core::ProbeStatus {
        let outcome = run_isolated(probe.clone(), self.timeout).await;
        outcome_status(name, &outcome)
    }

    async fn synthesis(&self) -> SynthesisReport {
        let speech_output = self.speech_output.clone();
        match tokio::spawn(async move { speech_output.report() }).await {
            Ok(report) => report,
            Err(join_error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %join_error,
                    "speech synthesis status check failed"
                );
                SynthesisReport::offline()
            }
        }
    }

    /// Checks every subsystem and merges the results.
    pub async fn report(&self) -> HealthReport {
        let (llm, embeddings, memory, judge, stt, synthesis) = tokio::join!(
            self.status("llm", &self.engine),
            self.status("embeddings", &self.embeddings),
            self.status("memory", &self.memory),
            self.status("judge", &self.judge),
            self.status("stt", &self.recognizer),
            self.synthesis(),
        );

        HealthReport {
            llm_status: llm.into(),
            embeddings_server: embeddings.into(),
            chroma_db: memory.into(),
            judge_model: judge.into(),
            tts_mode: synthesis.mode,
            tts_status: synthesis.status,
            stt: stt.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use atom_core::embedding::EmbeddingService;
    use atom_core::engine::{CoreEngine, EngineReadiness};
    use atom_core::memory::MemoryService;
    use atom_core::speech::{SpeechSynthesizer, SynthesisVariant};
    use atom_test::{MockEmbeddingServer, MockRecognizer, MockSynthesizer, MockVectorStore};

    use super::*;
    use crate::service::probe::{
        EmbeddingProbe, EngineProbe, JudgeProbe, MemoryProbe, ProbeOutcome, RecognizerProbe,
    };

    struct Panicking;

    #[async_trait::async_trait]
    impl Probe for Panicking {
        async fn check(&self) -> ProbeOutcome {
            panic!("vector store client bug");
        }
    }

    fn engine(ready: bool) -> Option<Arc<dyn CoreEngine>> {
        let readiness = EngineReadiness::new();
        if ready {
            readiness.mark_ready();
            readiness.mark_judge_ready();
        }
        Some(Arc::new(readiness))
    }

    #[tokio::test]
    async fn everything_up() {
        let synthesizer: Arc<dyn SpeechSynthesizer> =
            Arc::new(MockSynthesizer::new(SynthesisVariant::EdgeTts).with_running(true));
        let health = SystemHealth::new(
            EngineProbe::new(engine(true)),
            JudgeProbe::new(engine(true)),
            MemoryProbe::listing(Some(MemoryService::new(MockVectorStore::new()))),
            EmbeddingProbe::healthy(Some(EmbeddingService::new(MockEmbeddingServer::healthy()))),
            RecognizerProbe::new(Some(Arc::new(MockRecognizer::default()))),
            SpeechOutput::new(true, Some(synthesizer)),
            Duration::from_secs(2),
        );

        let report = health.report().await;
        assert_eq!(report.llm_status, RunStatus::Running);
        assert_eq!(report.embeddings_server, LinkStatus::Online);
        assert_eq!(report.chroma_db, StoreStatus::Connected);
        assert_eq!(report.judge_model, RunStatus::Running);
        assert_eq!(report.tts_mode, SynthesisMode::EdgeTts);
        assert_eq!(report.tts_status, SynthesisStatus::Online);
        assert_eq!(report.stt, LinkStatus::Online);
    }

    #[tokio::test]
    async fn one_panicking_probe_does_not_spoil_the_rest() {
        let health = SystemHealth::new(
            EngineProbe::new(engine(true)),
            JudgeProbe::new(engine(false)),
            Panicking,
            EmbeddingProbe::healthy(Some(EmbeddingService::new(MockEmbeddingServer::degraded()))),
            RecognizerProbe::new(None),
            SpeechOutput::new(false, None),
            Duration::from_secs(2),
        );

        let report = health.report().await;
        assert_eq!(report.llm_status, RunStatus::Running);
        assert_eq!(report.chroma_db, StoreStatus::Offline);
        assert_eq!(report.judge_model, RunStatus::Offline);
        assert_eq!(report.embeddings_server, LinkStatus::Offline);
        assert_eq!(report.tts_status, SynthesisStatus::Disabled);
        assert_eq!(report.tts_mode, SynthesisMode::Off);
        assert_eq!(report.stt, LinkStatus::Offline);
    }

    #[test]
    fn report_uses_camel_case_keys() -> serde_json::Result<()> {
        let report = HealthReport {
            llm_status: RunStatus::Offline,
            embeddings_server: LinkStatus::Offline,
            chroma_db: StoreStatus::Offline,
            judge_model: RunStatus::Offline,
            tts_mode: SynthesisMode::Off,
            tts_status: SynthesisStatus::Disabled,
            stt: LinkStatus::Offline,
        };
        let json = serde_json::to_value(&report)?;

        assert_eq!(json["llmStatus"], "Offline");
        assert_eq!(json["embeddingsServer"], "Offline");
        assert_eq!(json["chromaDb"], "Offline");
        assert_eq!(json["judgeModel"], "Offline");
        assert_eq!(json["ttsMode"], "Off");
        assert_eq!(json["ttsStatus"], "Disabled");
        assert_eq!(json["stt"], "Offline");
        Ok(())
    }
}
