use atom_core::news::Article;
use atom_core::{Error, Result};

/// What a proxy returns when its upstream fails and nothing fresh is cached.
pub trait Fallback<V> {
    /// Turns the upstream failure into a response value, or passes it on.
    fn recover(&self, error: Error) -> Result<V>;
}

/// Passes the upstream failure through to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct Surface;

impl<V> Fallback<V> for Surface {
    #[inline]
    fn recover(&self, error: Error) -> Result<V> {
        Err(error)
    }
}

/// Replaces a failed headline fetch with one system article explaining it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewsPlaceholder;

impl NewsPlaceholder {
    pub const SOURCE: &'static str = "System";
    pub const HEADLINE: &'static str = "Live news temporarily unavailable";

    /// The placeholder article for `error`, with a fresh id and timestamp.
    pub fn article(error: &Error) -> Article {
        Article::new(
            Self::SOURCE,
            Self::HEADLINE,
            error.to_string(),
            Article::now_timestamp(),
        )
    }
}

impl Fallback<Vec<Article>> for NewsPlaceholder {
    fn recover(&self, error: Error) -> Result<Vec<Article>> {
        Ok(vec![Self::article(&error)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_carries_failure_message() -> Result<()> {
        let articles = NewsPlaceholder
            .recover(Error::configuration().with_message("NEWS_API_KEY is not set"))?;

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].source, "System");
        assert_eq!(articles[0].headline, "Live news temporarily unavailable");
        assert_eq!(articles[0].summary, "NEWS_API_KEY is not set");
        Ok(())
    }

    #[test]
    fn placeholders_get_fresh_identifiers() -> Result<()> {
        let first = NewsPlaceholder.recover(Error::timeout())?;
        let second = NewsPlaceholder.recover(Error::timeout())?;
        assert_ne!(first[0].id, second[0].id);
        Ok(())
    }

    #[test]
    fn surface_passes_error_through() {
        let result: Result<u8> = Surface.recover(Error::external_error().with_message("502"));
        assert_eq!(result.unwrap_err().to_string(), "502");
    }
}
