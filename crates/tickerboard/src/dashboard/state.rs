use super::loader::LoadOutcome;
use log::debug;
use tickerboard_client::prelude::*;

pub const DEFAULT_SYMBOL: &str = "AAPL";

/// Data plus the symbol it was fetched for; sections outlive a symbol
/// change until their own fetch succeeds again.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub symbol: String,
    pub data: T,
}

/// Identifies one load cycle, handed out by [`DashboardState::begin_load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    pub symbol: String,
}

/// Everything the view renders from. Only the event loop mutates it.
#[derive(Debug, Default)]
pub struct DashboardState {
    symbol: String,
    input: String,
    quote: Option<Fetched<Quote>>,
    profile: Option<Fetched<Profile>>,
    news: Option<Fetched<Vec<Article>>>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

/// Uppercase & trim, e.g., ` tsla ` -> `TSLA`.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// The symbol `watch` opens on: `raw` normalized, or [`DEFAULT_SYMBOL`] when
/// nothing usable was given.
pub fn starting_symbol(raw: Option<&str>) -> String {
    match raw.map(normalize) {
        Some(symbol) if !symbol.is_empty() => symbol,
        _ => DEFAULT_SYMBOL.to_string(),
    }
}

impl DashboardState {
    pub fn new(symbol: &str) -> Self {
        let symbol = normalize(symbol);
        Self {
            input: symbol.clone(),
            symbol,
            ..Default::default()
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn quote(&self) -> Option<&Fetched<Quote>> {
        self.quote.as_ref()
    }

    pub fn profile(&self) -> Option<&Fetched<Profile>> {
        self.profile.as_ref()
    }

    pub fn news(&self) -> Option<&Fetched<Vec<Article>>> {
        self.news.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    /// Commit the input as the new symbol. Returns the symbol when it
    /// changed (and so needs a load), `None` when it is empty or the same.
    pub fn submit(&mut self) -> Option<String> {
        let candidate = normalize(&self.input);
        if candidate.is_empty() || candidate == self.symbol {
            return None;
        }
        self.symbol = candidate.clone();
        Some(candidate)
    }

    /// Start a load for the current symbol; any load still in flight is
    /// superseded.
    pub fn begin_load(&mut self) -> Ticket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        Ticket {
            generation: self.generation,
            symbol: self.symbol.clone(),
        }
    }

    /// Apply the outcome of load `generation`. Returns `false` (and changes
    /// nothing) when a newer load has started since.
    pub fn finish(&mut self, generation: u64, outcome: LoadOutcome) -> bool {
        if generation != self.generation {
            debug!(
                "discarding outcome of load #{generation}; #{} is current",
                self.generation
            );
            return false;
        }

        self.loading = false;
        match outcome {
            LoadOutcome::QuoteFailed { symbol, message } => {
                debug!("[{symbol}] load #{generation} failed: {message}");
                self.error = Some(message);
            }
            LoadOutcome::Loaded {
                symbol,
                quote,
                profile,
                news,
            } => {
                self.error = None;
                self.quote = Some(Fetched {
                    symbol: symbol.clone(),
                    data: quote,
                });
                if let Some(profile) = profile {
                    self.profile = Some(Fetched {
                        symbol: symbol.clone(),
                        data: profile,
                    });
                }
                if let Some(news) = news {
                    self.news = Some(Fetched { symbol, data: news });
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::loader::tests::{aapl_quote, articles};

    fn loaded(symbol: &str) -> LoadOutcome {
        LoadOutcome::Loaded {
            symbol: symbol.to_string(),
            quote: aapl_quote(),
            profile: Some(Profile {
                name: format!("{symbol} Inc"),
                ..Default::default()
            }),
            news: Some(articles(3)),
        }
    }

    #[test]
    fn new_normalizes_symbol_and_input() {
        let state = DashboardState::new(" aapl ");
        assert_eq!(state.symbol(), "AAPL");
        assert_eq!(state.input(), "AAPL");
        assert!(!state.is_loading());
    }

    #[test]
    fn starting_symbol_falls_back_to_default() {
        assert_eq!(starting_symbol(None), DEFAULT_SYMBOL);
        assert_eq!(starting_symbol(Some("")), DEFAULT_SYMBOL);
        assert_eq!(starting_symbol(Some("  ")), DEFAULT_SYMBOL);
        assert_eq!(starting_symbol(Some(" msft ")), "MSFT");
    }

    #[test]
    fn unchanged_symbol_does_not_submit() {
        let mut state = DashboardState::new("AAPL");
        for raw in ["AAPL", "aapl", "  Aapl\t", "", "   "] {
            state.set_input(raw);
            assert_eq!(state.submit(), None, "input {raw:?}");
        }
        assert_eq!(state.symbol(), "AAPL");
    }

    #[test]
    fn changed_symbol_submits_normalized() {
        let mut state = DashboardState::new("AAPL");
        state.set_input(" tsla ");
        assert_eq!(state.submit(), Some("TSLA".to_string()));
        assert_eq!(state.symbol(), "TSLA");
    }

    #[test]
    fn begin_load_sets_loading_and_clears_error() {
        let mut state = DashboardState::new("AAPL");
        let first = state.begin_load();
        state.finish(first.generation, LoadOutcome::quote_failed("AAPL", "boom"));
        assert!(state.error().is_some());

        let ticket = state.begin_load();
        assert_eq!(ticket.generation, 2);
        assert_eq!(ticket.symbol, "AAPL");
        assert!(state.is_loading());
        assert_eq!(state.error(), None);
    }

    #[test]
    fn success_stores_everything_and_clears_error() {
        let mut state = DashboardState::new("AAPL");
        let ticket = state.begin_load();

        assert!(state.finish(ticket.generation, loaded("AAPL")));

        assert!(!state.is_loading());
        assert_eq!(state.error(), None);
        assert_eq!(state.quote().unwrap().data, aapl_quote());
        assert_eq!(state.profile().unwrap().data.name, "AAPL Inc");
        assert_eq!(state.news().unwrap().data.len(), 3);
    }

    #[test]
    fn quote_failure_keeps_prior_quote() {
        let mut state = DashboardState::new("AAPL");
        let ticket = state.begin_load();
        state.finish(ticket.generation, loaded("AAPL"));

        let ticket = state.begin_load();
        state.finish(
            ticket.generation,
            LoadOutcome::quote_failed("AAPL", "HTTP error! status: 500"),
        );

        assert!(!state.is_loading());
        assert_eq!(
            state.error(),
            Some("Failed to load data: HTTP error! status: 500")
        );
        assert_eq!(state.quote().unwrap().data, aapl_quote());
    }

    #[test]
    fn failed_sections_stay_stale() {
        let mut state = DashboardState::new("AAPL");
        let ticket = state.begin_load();
        state.finish(ticket.generation, loaded("AAPL"));

        state.set_input("MSFT");
        state.submit();
        let ticket = state.begin_load();
        state.finish(
            ticket.generation,
            LoadOutcome::Loaded {
                symbol: "MSFT".to_string(),
                quote: aapl_quote(),
                profile: None,
                news: None,
            },
        );

        assert_eq!(state.quote().unwrap().symbol, "MSFT");
        assert_eq!(state.profile().unwrap().symbol, "AAPL");
        assert_eq!(state.news().unwrap().symbol, "AAPL");
    }

    #[test]
    fn stale_generation_is_discarded() {
        let mut state = DashboardState::new("AAPL");
        let old = state.begin_load();
        state.set_input("TSLA");
        state.submit();
        let new = state.begin_load();

        assert!(!state.finish(old.generation, loaded("AAPL")));
        assert!(state.is_loading());
        assert!(state.quote().is_none());

        assert!(state.finish(new.generation, loaded("TSLA")));
        assert!(!state.is_loading());
        assert_eq!(state.quote().unwrap().symbol, "TSLA");
    }
}
