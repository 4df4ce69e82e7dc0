//! Application state and dependency injection.

mod boot;
mod cache;
mod config;
mod memory;
mod pool;
mod probe;
mod proxy;
mod speech;

use std::fmt;
use std::sync::Arc;

use atom_core::embedding::EmbeddingService;
use atom_core::engine::CoreEngine;
use atom_core::memory::MemoryService;
use atom_core::news::NewsService;
use atom_core::robotics::RoboticsClient;
use atom_core::speech::{SpeechRecognizer, SpeechSynthesizer};
use atom_core::weather::WeatherService;

pub use crate::service::boot::{BootSequence, modules};
pub use crate::service::cache::{CoordinateKey, TtlCache};
pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::memory::{MemoryFeed, RecentMemory};
pub use crate::service::pool::BlockingPool;
pub use crate::service::probe::{
    EmbeddingProbe, EngineProbe, HealthReport, JudgeProbe, MemoryProbe, Probe, ProbeFailure,
    ProbeOutcome, ProbeRegistry, RecognizerProbe, RoboticsProbe, SystemHealth, UnknownProbe,
    run_isolated,
};
pub use crate::service::proxy::{
    CachedProxy, Fallback, NewsPlaceholder, NewsProxy, Proxied, ProxySource, Surface,
    WeatherProxy,
};
pub use crate::service::speech::{SpeechInput, SpeechOutput, SynthesisReport, decode_audio};
pub use crate::{Error, Result};

/// Tracing target for state construction.
pub(crate) const TRACING_TARGET: &str = "atom_server::service";

/// In-process collaborators handed to the server by the embedding binary.
///
/// Every field is optional: a missing collaborator is reported as down or
/// offline, never as a startup failure.
#[derive(Clone, Default)]
#[must_use = "collaborators do nothing unless passed to the state"]
pub struct Collaborators {
    pub engine: Option<Arc<dyn CoreEngine>>,
    pub memory: Option<MemoryService>,
    pub embeddings: Option<EmbeddingService>,
    pub recognizer: Option<Arc<dyn SpeechRecognizer>>,
    pub synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    pub robotics: Option<Arc<dyn RoboticsClient>>,
}

impl Collaborators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(mut self, engine: impl CoreEngine + 'static) -> Self {
        self.engine = Some(Arc::new(engine));
        self
    }

    pub fn with_memory(mut self, memory: MemoryService) -> Self {
        self.memory = Some(memory);
        self
    }

    pub fn with_embeddings(mut self, embeddings: EmbeddingService) -> Self {
        self.embeddings = Some(embeddings);
        self
    }

    pub fn with_recognizer(mut self, recognizer: impl SpeechRecognizer + 'static) -> Self {
        self.recognizer = Some(Arc::new(recognizer));
        self
    }

    pub fn with_synthesizer(mut self, synthesizer: impl SpeechSynthesizer + 'static) -> Self {
        self.synthesizer = Some(Arc::new(synthesizer));
        self
    }

    pub fn with_robotics(mut self, robotics: impl RoboticsClient + 'static) -> Self {
        self.robotics = Some(Arc::new(robotics));
        self
    }
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators")
            .field("engine", &self.engine.is_some())
            .field("memory", &self.memory.is_some())
            .field("embeddings", &self.embeddings.is_some())
            .field("recognizer", &self.recognizer.is_some())
            .field("synthesizer", &self.synthesizer.is_some())
            .field("robotics", &self.robotics.is_some())
            .finish()
    }
}

/// Third-party data APIs behind the cached proxies.
#[derive(Debug, Clone)]
pub struct Upstreams {
    pub weather: WeatherService,
    pub news: NewsService,
}

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    // Readiness:
    pub boot: BootSequence,
    pub system_health: SystemHealth,

    // Cached data proxies:
    pub weather: WeatherProxy,
    pub news: NewsProxy,

    // Collaborator front ends:
    pub speech_input: SpeechInput,
    pub speech_output: SpeechOutput,
    pub memory_feed: MemoryFeed,
}

impl ServiceState {
    /// Assembles the state from already constructed collaborators and upstreams.
    pub fn new(config: &ServiceConfig, collaborators: Collaborators, upstreams: Upstreams) -> Self {
        let Collaborators {
            engine,
            memory,
            embeddings,
            recognizer,
            synthesizer,
            robotics,
        } = collaborators;

        let probe_timeout = config.probe_timeout();
        let speech_output = SpeechOutput::new(config.use_tts, synthesizer);

        let registry = ProbeRegistry::new(probe_timeout)
            .with(modules::ATOM_CORE, EngineProbe::new(engine.clone()))
            .with(modules::MEMORY_ENGINE, MemoryProbe::heartbeat(memory.clone()))
            .with(
                modules::EMBEDDINGS_SERVER,
                EmbeddingProbe::reachable(embeddings.clone()),
            )
            .with(
                modules::ROBOTICS_INTERFACE,
                RoboticsProbe::new(config.robotic_arm, robotics),
            );

        let system_health = SystemHealth::new(
            EngineProbe::new(engine.clone()),
            JudgeProbe::new(engine),
            MemoryProbe::listing(memory.clone()),
            EmbeddingProbe::healthy(embeddings),
            RecognizerProbe::new(recognizer.clone()),
            speech_output.clone(),
            probe_timeout,
        );

        let state = Self {
            boot: BootSequence::new(registry, config.boot_delay()),
            system_health,

            weather: WeatherProxy::new(
                upstreams.weather,
                config.weather_cache_ttl(),
                config.fetch_timeout(),
                config.coordinate_precision,
            ),
            news: NewsProxy::new(
                upstreams.news,
                config.news_cache_ttl(),
                config.fetch_timeout(),
            ),

            speech_input: SpeechInput::new(recognizer, BlockingPool::new(config.blocking_workers)),
            speech_output,
            memory_feed: MemoryFeed::new(memory),
        };

        tracing::info!(
            target: TRACING_TARGET,
            boot_modules = ?state.boot.registry().names(),
            use_tts = config.use_tts,
            robotic_arm = config.robotic_arm,
            "service state initialized"
        );

        state
    }

    /// Initializes application state from configuration.
    ///
    /// Builds the HTTP upstream clients, and the vector store and embedding
    /// clients unless `collaborators` already carries them.
    pub fn from_config(config: &ServiceConfig, mut collaborators: Collaborators) -> Result<Self> {
        config.validate()?;

        let client = config.connect_http()?;
        let upstreams = Upstreams {
            weather: config.weather_service(&client)?,
            news: config.news_service(&client)?,
        };

        if collaborators.memory.is_none() {
            collaborators.memory = Some(config.memory_service(&client)?);
        }

        if collaborators.embeddings.is_none() {
            collaborators.embeddings = Some(config.embedding_service(&client)?);
        }

        Ok(Self::new(config, collaborators, upstreams))
    }
}

impl fmt::Debug for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceState")
            .field("boot", &self.boot)
            .field("weather", &self.weather)
            .field("news", &self.news)
            .field("speech_input", &self.speech_input)
            .field("speech_output", &self.speech_output)
            .finish_non_exhaustive()
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// Readiness:
impl_di!(boot: BootSequence);
impl_di!(system_health: SystemHealth);

// Cached data proxies:
impl_di!(weather: WeatherProxy);
impl_di!(news: NewsProxy);

// Collaborator front ends:
impl_di!(speech_input: SpeechInput);
impl_di!(speech_output: SpeechOutput);
impl_di!(memory_feed: MemoryFeed);

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn from_config_registers_boot_modules() -> anyhow::Result<()> {
        let state = ServiceState::from_config(&ServiceConfig::default(), Collaborators::new())?;

        assert_eq!(
            state.boot.registry().names(),
            vec![
                modules::ATOM_CORE,
                modules::EMBEDDINGS_SERVER,
                modules::MEMORY_ENGINE,
                modules::ROBOTICS_INTERFACE,
            ]
        );
        Ok(())
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ServiceConfig {
            blocking_workers: 0,
            ..ServiceConfig::default()
        };
        assert!(ServiceState::from_config(&config, Collaborators::new()).is_err());
    }
}
