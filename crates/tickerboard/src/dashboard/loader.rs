use chrono::NaiveDate;
use log::{debug, error};
use tickerboard_client::prelude::*;

/// Only the most recent articles are kept.
pub const NEWS_LIMIT: usize = 10;

/// Result of one load cycle for a symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The quote arrived; profile and news are `None` when their fetch failed.
    Loaded {
        symbol: String,
        quote: Quote,
        profile: Option<Profile>,
        news: Option<Vec<Article>>,
    },

    /// The quote could not be fetched, so nothing else was attempted.
    QuoteFailed { symbol: String, message: String },
}

impl LoadOutcome {
    pub fn quote_failed(symbol: &str, cause: impl std::fmt::Display) -> Self {
        Self::QuoteFailed {
            symbol: symbol.to_string(),
            message: format!("Failed to load data: {cause}"),
        }
    }
}

/// Quote first, on its own: without it the load is a failure. Profile and
/// news then go out together, and each may fail without touching the other.
pub async fn load<S: MarketData>(source: &S, symbol: &str, today: NaiveDate) -> LoadOutcome {
    debug!("[{symbol}] loading quote");
    let quote = match source.quote(symbol).await {
        Ok(quote) => quote,
        Err(e) => {
            error!("[{symbol}] Error fetching quote: {e}");
            return LoadOutcome::quote_failed(symbol, e);
        }
    };

    debug!("[{symbol}] loading profile & news");
    let (profile, news) = futures::join!(source.profile(symbol), source.news(symbol, today));

    let profile = match profile {
        Ok(profile) => Some(profile),
        Err(e) => {
            error!("[{symbol}] Profile fetch failed: {e}");
            None
        }
    };

    let news = match news {
        Ok(mut articles) => {
            articles.truncate(NEWS_LIMIT);
            Some(articles)
        }
        Err(e) => {
            error!("[{symbol}] News fetch failed: {e}");
            None
        }
    };

    LoadOutcome::Loaded {
        symbol: symbol.to_string(),
        quote,
        profile,
        news,
    }
}
