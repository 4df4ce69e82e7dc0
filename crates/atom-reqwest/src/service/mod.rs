//! Upstream trait implementations.

mod chroma;
mod embedding;
mod news;
mod weather;

pub use chroma::ChromaClient;
pub use embedding::EmbeddingServerClient;
pub use news::NewsApiClient;
pub use weather::OpenMeteoClient;
