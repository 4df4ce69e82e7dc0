//! Mock implementations of the atom collaborators for testing.
//!
//! Upstream mocks ([`MockWeatherProvider`], [`MockNewsProvider`]) share
//! their call counters between clones, so a test can hand one clone to the
//! server and keep another to inspect.

mod collaborator;
mod speech;
mod upstream;

pub use collaborator::{MockEmbeddingServer, MockRobotics, MockVectorStore};
pub use speech::{MockRecognizer, MockSynthesizer};
pub use upstream::{MockNewsProvider, MockWeatherProvider};
