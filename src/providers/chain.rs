use tracing::{debug, warn};

use super::QuoteSource;
use crate::error::{QuoteError, Result};
use crate::quotes::types::Quote;

/// A named attempt run against a shared context
pub struct Strategy<'a, C: ?Sized, T> {
    name: String,
    run: Box<dyn FnOnce(&mut C) -> Result<T> + 'a>,
}

impl<'a, C: ?Sized, T> Strategy<'a, C, T> {
    pub fn new(name: impl Into<String>, run: impl FnOnce(&mut C) -> Result<T> + 'a) -> Self {
        Self {
            name: name.into(),
            run: Box::new(run),
        }
    }
}

/// Run strategies in order and return the first success
///
/// Later strategies are not run once one succeeds. On exhaustion every error
/// is returned in the order the strategies were tried.
pub fn first_success<'a, C, T, I>(ctx: &mut C, strategies: I) -> std::result::Result<T, Vec<QuoteError>>
where
    C: ?Sized,
    I: IntoIterator<Item = Strategy<'a, C, T>>,
{
    let mut errors = Vec::new();

    for strategy in strategies {
        match (strategy.run)(&mut *ctx) {
            Ok(value) => return Ok(value),
            Err(e) => {
                debug!(strategy = %strategy.name, error = %e, "strategy failed");
                errors.push(e);
            }
        }
    }

    Err(errors)
}

/// Fixed-priority list of single-quote providers
pub struct FallbackChain {
    sources: Vec<Box<dyn QuoteSource>>,
}

impl FallbackChain {
    pub fn new(sources: Vec<Box<dyn QuoteSource>>) -> Self {
        Self { sources }
    }

    /// Provider names in try order
    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// First complete quote from the providers, tried in order
    ///
    /// A quote with blank text or author counts as a failure. When every
    /// provider fails, the error carries each provider's failure.
    pub fn fetch_any_alternative(&self) -> Result<Quote> {
        let strategies = self.sources.iter().map(|source| {
            Strategy::new(source.name(), move |_: &mut ()| {
                let quote = source.fetch_quote().and_then(|quote| {
                    if quote.is_complete() {
                        Ok(quote)
                    } else {
                        Err(QuoteError::fetch(source.name(), "Incomplete quote"))
                    }
                });
                if let Err(ref e) = quote {
                    warn!(provider = source.name(), error = %e, "alternative provider failed");
                }
                quote
            })
        });

        first_success(&mut (), strategies).map_err(QuoteError::AllProvidersFailed)
    }
}
